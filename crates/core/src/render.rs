//! Point styling and the drawing-surface seam.
//!
//! The renderer never touches simulation state: it reads a point, its
//! distance to the cursor and the clock, and issues one filled circle.

use crate::color::Rgba;
use crate::config::StyleConfig;
use crate::point::{Point, Viewport};
use glam::DVec2;

/// Anything the backdrop can draw into: a browser canvas, a CPU raster.
///
/// Object safe, so hosts may hand the driver a `Box<dyn Surface>`.
pub trait Surface {
    /// Matches the backing store to the viewport.
    fn resize(&mut self, viewport: Viewport);

    /// Clears to fully transparent.
    fn clear(&mut self);

    /// Fills a circle with a straight-alpha color.
    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba);
}

impl<S: Surface + ?Sized> Surface for Box<S> {
    fn resize(&mut self, viewport: Viewport) {
        (**self).resize(viewport);
    }

    fn clear(&mut self) {
        (**self).clear();
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba) {
        (**self).fill_circle(center, radius, color);
    }
}

/// Radius and color for one point this frame.
///
/// Inside `near_radius` of the cursor the point glows, brighter the
/// closer it is. Elsewhere it follows a slow shared breathing pulse,
/// desynchronized by the point's x phase.
pub fn point_style(point: &Point, distance: f64, time: f64, style: &StyleConfig) -> (f64, Rgba) {
    if distance < style.near_radius {
        let alpha =
            (1.0 - distance / style.near_radius) * style.glow_alpha_scale + style.glow_alpha_floor;
        (
            point.size() + style.glow_radius_boost,
            style.glow_color.with_alpha(alpha),
        )
    } else {
        let pulse = ((time * style.breath_rate + point.phase().x).sin() + 1.0) * 0.5;
        let alpha = style.breath_base + pulse * style.breath_range;
        (point.size(), style.base_color.with_alpha(alpha))
    }
}

/// Draws `point` at its current position.
pub fn draw_point<S: Surface + ?Sized>(
    surface: &mut S,
    point: &Point,
    distance: f64,
    time: f64,
    style: &StyleConfig,
) {
    let (radius, color) = point_style(point, distance, time, style);
    surface.fill_circle(point.position, radius, color);
}

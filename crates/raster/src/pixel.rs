//! CPU drawing surface.
//!
//! Pixels are stored as premultiplied f32 RGBA so repeated source-over
//! blending of faint dots accumulates without 8-bit banding. Conversion to
//! bytes happens once, on export.

use backdrop_core::color::{Rgba, Srgb};
use backdrop_core::point::Viewport;
use backdrop_core::render::Surface;
use glam::DVec2;

/// A transparent-by-default RGBA raster the size of the viewport.
#[derive(Debug, Clone)]
pub struct Raster {
    width: u32,
    height: u32,
    data: Vec<[f32; 4]>,
}

impl Raster {
    /// A fully transparent raster. Zero-sized viewports give an empty buffer.
    pub fn new(viewport: Viewport) -> Self {
        Self {
            width: viewport.width,
            height: viewport.height,
            data: vec![[0.0; 4]; viewport.width as usize * viewport.height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Straight alpha of pixel (`x`, `y`), or `None` outside the raster.
    pub fn alpha_at(&self, x: u32, y: u32) -> Option<f32> {
        self.index(x, y).map(|i| self.data[i][3])
    }

    /// True when nothing has been drawn since the last clear.
    pub fn is_blank(&self) -> bool {
        self.data.iter().all(|p| p[3] == 0.0)
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    /// Straight-alpha RGBA8 bytes, row-major.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.data
            .iter()
            .flat_map(|&[r, g, b, a]| {
                if a <= 0.0 {
                    [0, 0, 0, 0]
                } else {
                    [quantize(r / a), quantize(g / a), quantize(b / a), quantize(a)]
                }
            })
            .collect()
    }

    /// Opaque RGBA8 bytes with the raster composited over `background`.
    pub fn to_rgba8_over(&self, background: Srgb) -> Vec<u8> {
        let bg = [background.r as f32, background.g as f32, background.b as f32];
        self.data
            .iter()
            .flat_map(|&[r, g, b, a]| {
                let rest = 1.0 - a;
                [
                    quantize(r + bg[0] * rest),
                    quantize(g + bg[1] * rest),
                    quantize(b + bg[2] * rest),
                    255,
                ]
            })
            .collect()
    }
}

fn quantize(c: f32) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl Surface for Raster {
    fn resize(&mut self, viewport: Viewport) {
        *self = Raster::new(viewport);
    }

    fn clear(&mut self) {
        self.data.fill([0.0; 4]);
    }

    /// Anti-aliased disc: coverage ramps from 1 to 0 across the half-pixel
    /// band around the radius, measured at pixel centers.
    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba) {
        if radius <= 0.0 || color.alpha <= 0.0 || !center.is_finite() {
            return;
        }
        let reach = radius + 0.5;
        let x0 = ((center.x - reach).floor() as i64).max(0);
        let y0 = ((center.y - reach).floor() as i64).max(0);
        let x1 = ((center.x + reach).ceil() as i64).min(self.width as i64);
        let y1 = ((center.y + reach).ceil() as i64).min(self.height as i64);

        let rgb = [color.color.r as f32, color.color.g as f32, color.color.b as f32];
        for py in y0..y1 {
            for px in x0..x1 {
                let sample = DVec2::new(px as f64 + 0.5, py as f64 + 0.5);
                let coverage = (reach - sample.distance(center)).clamp(0.0, 1.0);
                if coverage <= 0.0 {
                    continue;
                }
                let a = (color.alpha * coverage) as f32;
                let dst = &mut self.data[py as usize * self.width as usize + px as usize];
                let keep = 1.0 - a;
                dst[0] = rgb[0] * a + dst[0] * keep;
                dst[1] = rgb[1] * a + dst[1] * keep;
                dst[2] = rgb[2] * a + dst[2] * keep;
                dst[3] = a + dst[3] * keep;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raster(w: u32, h: u32) -> Raster {
        Raster::new(Viewport::new(w, h))
    }

    #[test]
    fn new_raster_is_transparent() {
        let r = raster(8, 4);
        assert!(r.is_blank());
        assert_eq!(r.to_rgba8().len(), 8 * 4 * 4);
        assert!(r.to_rgba8().iter().all(|&b| b == 0));
    }

    #[test]
    fn zero_viewport_gives_empty_buffer() {
        let r = raster(0, 0);
        assert!(r.to_rgba8().is_empty());
        assert_eq!(r.alpha_at(0, 0), None);
    }

    #[test]
    fn fill_circle_covers_center_with_full_alpha() {
        let mut r = raster(16, 16);
        r.fill_circle(DVec2::new(8.0, 8.0), 3.0, Srgb::WHITE.with_alpha(1.0));
        assert_eq!(r.alpha_at(8, 8), Some(1.0));
        assert_eq!(r.alpha_at(0, 0), Some(0.0));
        let bytes = r.to_rgba8();
        let i = (8 * 16 + 8) * 4;
        assert_eq!(&bytes[i..i + 4], &[255, 255, 255, 255]);
    }

    #[test]
    fn fill_circle_blends_source_over() {
        let mut r = raster(4, 4);
        let half_white = Srgb::WHITE.with_alpha(0.5);
        r.fill_circle(DVec2::new(2.0, 2.0), 2.0, half_white);
        r.fill_circle(DVec2::new(2.0, 2.0), 2.0, half_white);
        let a = r.alpha_at(1, 1).unwrap();
        assert!((a - 0.75).abs() < 1e-6, "alpha {a}");
    }

    #[test]
    fn fill_circle_clips_at_edges_without_panicking() {
        let mut r = raster(10, 10);
        r.fill_circle(DVec2::new(-1.0, -1.0), 2.0, Srgb::WHITE.with_alpha(1.0));
        r.fill_circle(DVec2::new(10.5, 10.5), 2.0, Srgb::WHITE.with_alpha(1.0));
        r.fill_circle(DVec2::new(-500.0, 500.0), 1.0, Srgb::WHITE.with_alpha(1.0));
        r.fill_circle(DVec2::new(f64::NAN, 1.0), 1.0, Srgb::WHITE.with_alpha(1.0));
        assert!(r.alpha_at(0, 0).unwrap() > 0.0);
        assert!(r.alpha_at(9, 9).unwrap() > 0.0);
        assert_eq!(r.alpha_at(5, 5), Some(0.0));
    }

    #[test]
    fn transparent_or_degenerate_circles_draw_nothing() {
        let mut r = raster(10, 10);
        r.fill_circle(DVec2::new(5.0, 5.0), 2.0, Srgb::WHITE.with_alpha(0.0));
        r.fill_circle(DVec2::new(5.0, 5.0), 0.0, Srgb::WHITE.with_alpha(1.0));
        assert!(r.is_blank());
    }

    #[test]
    fn clear_and_resize_reset_pixels() {
        let mut r = raster(6, 6);
        r.fill_circle(DVec2::new(3.0, 3.0), 2.0, Srgb::WHITE.with_alpha(1.0));
        r.clear();
        assert!(r.is_blank());

        r.fill_circle(DVec2::new(3.0, 3.0), 2.0, Srgb::WHITE.with_alpha(1.0));
        r.resize(Viewport::new(12, 3));
        assert!(r.is_blank());
        assert_eq!((r.width(), r.height()), (12, 3));
    }

    #[test]
    fn composite_over_background_is_opaque() {
        let mut r = raster(4, 4);
        r.fill_circle(DVec2::new(2.0, 2.0), 1.0, Srgb::WHITE.with_alpha(0.5));
        let bg = Srgb::from_hex("#0a0a0a").unwrap();
        let bytes = r.to_rgba8_over(bg);
        assert!(bytes.chunks(4).all(|px| px[3] == 255));
        // untouched corner shows the background
        assert_eq!(&bytes[0..3], &[10, 10, 10]);
        // covered center is brighter than the background
        let i = (2 * 4 + 2) * 4;
        assert!(bytes[i] > 100);
    }

    #[test]
    fn straight_alpha_export_unpremultiplies() {
        let mut r = raster(3, 3);
        let cyan = Srgb::from_hex("#22d3ee").unwrap();
        r.fill_circle(DVec2::new(1.5, 1.5), 1.0, cyan.with_alpha(0.2));
        let bytes = r.to_rgba8();
        let i = (3 + 1) * 4;
        assert_eq!(&bytes[i..i + 3], &[0x22, 0xd3, 0xee]);
        assert_eq!(bytes[i + 3], 51);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn alpha_never_exceeds_one(
                circles in proptest::collection::vec(
                    (0.0_f64..32.0, 0.0_f64..32.0, 0.1_f64..6.0, 0.0_f64..1.0),
                    1..40,
                ),
            ) {
                let mut r = Raster::new(Viewport::new(32, 32));
                for (x, y, radius, alpha) in circles {
                    r.fill_circle(DVec2::new(x, y), radius, Srgb::WHITE.with_alpha(alpha));
                }
                for y in 0..32 {
                    for x in 0..32 {
                        let a = r.alpha_at(x, y).unwrap();
                        prop_assert!((0.0..=1.0 + 1e-6).contains(&a), "alpha {a} at ({x}, {y})");
                    }
                }
            }
        }
    }
}

//! 2D canvas drawing surface.

use backdrop_core::color::Rgba;
use backdrop_core::point::Viewport;
use backdrop_core::render::Surface;
use glam::DVec2;
use std::f64::consts::TAU;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// Draws points as filled arcs on a `CanvasRenderingContext2d`.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Acquires the canvas' 2D context. `None` when the browser refuses one.
    pub fn acquire(canvas: &HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self {
            canvas: canvas.clone(),
            ctx,
        })
    }
}

impl Surface for CanvasSurface {
    fn resize(&mut self, viewport: Viewport) {
        self.canvas.set_width(viewport.width);
        self.canvas.set_height(viewport.height);
    }

    fn clear(&mut self) {
        self.ctx.clear_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba) {
        self.ctx.begin_path();
        // arc only fails on a negative radius, which the renderer never emits
        if self.ctx.arc(center.x, center.y, radius, 0.0, TAU).is_err() {
            return;
        }
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill();
    }
}

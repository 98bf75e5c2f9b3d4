#![deny(unsafe_code)]
//! Browser binding for the particle backdrop.
//!
//! ```js
//! import init, { ParticleBackground } from "./backdrop_wasm.js";
//! await init();
//! const bg = ParticleBackground.mount(document.querySelector("#backdrop"));
//! // later
//! bg.unmount();
//! ```

mod canvas;
mod host;

use backdrop_core::config::FieldConfig;
use backdrop_core::driver::{DriverLoop, LoopState};
use backdrop_core::prng::Xorshift64;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

use canvas::CanvasSurface;
use host::{window_viewport, RafScheduler, SharedLoop, WindowEvents};

const CANVAS_STYLE: [(&str, &str); 6] = [
    ("position", "absolute"),
    ("inset", "0"),
    ("width", "100%"),
    ("height", "100%"),
    ("z-index", "-1"),
    ("pointer-events", "none"),
];

/// A mounted backdrop. Dropping (or `free()`-ing) the handle unmounts it.
#[wasm_bindgen]
pub struct ParticleBackground {
    shared: SharedLoop,
}

#[wasm_bindgen]
impl ParticleBackground {
    /// Mounts with default parameters.
    pub fn mount(canvas: HtmlCanvasElement) -> Result<ParticleBackground, JsValue> {
        Self::start(canvas, FieldConfig::default())
    }

    /// Mounts with a flat JSON object of parameter overrides.
    #[wasm_bindgen(js_name = mountWithParams)]
    pub fn mount_with_params(
        canvas: HtmlCanvasElement,
        params: &str,
    ) -> Result<ParticleBackground, JsValue> {
        let params: serde_json::Value =
            serde_json::from_str(params).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let config = FieldConfig::from_json(&params).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Self::start(canvas, config)
    }

    /// Cancels the pending frame and removes the window listeners. Idempotent.
    pub fn unmount(&self) {
        let taken = self.shared.borrow_mut().take();
        if let Some(mut driver) = taken {
            driver.unmount();
        }
    }

    /// True while frames are being drawn.
    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        // mutably borrowed only while one of the loop's own callbacks runs
        self.shared
            .try_borrow()
            .map(|slot| slot.as_ref().map(|d| d.state()) == Some(LoopState::Running))
            .unwrap_or(true)
    }

    /// Number of points in the current field.
    #[wasm_bindgen(getter, js_name = pointCount)]
    pub fn point_count(&self) -> usize {
        self.shared
            .try_borrow()
            .ok()
            .and_then(|slot| slot.as_ref().map(|d| d.field().len()))
            .unwrap_or(0)
    }
}

impl ParticleBackground {
    fn start(canvas: HtmlCanvasElement, config: FieldConfig) -> Result<ParticleBackground, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

        let style = canvas.style();
        for (name, value) in CANVAS_STYLE {
            style.set_property(name, value)?;
        }

        // Callbacks only fire from the event loop, after the loop is stored.
        let shared: SharedLoop = Rc::new(RefCell::new(None));
        let weak = Rc::downgrade(&shared);
        let mut driver = DriverLoop::new(
            config,
            Xorshift64::new(js_sys::Date::now() as u64),
            RafScheduler::new(window.clone(), weak.clone()),
            WindowEvents::new(window.clone(), weak),
        );
        driver
            .mount(window_viewport(&window), CanvasSurface::acquire(&canvas))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        *shared.borrow_mut() = Some(driver);
        Ok(ParticleBackground { shared })
    }
}

impl Drop for ParticleBackground {
    fn drop(&mut self) {
        self.unmount();
    }
}

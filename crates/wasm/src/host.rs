//! Browser implementations of the driver's host seams.
//!
//! Callbacks hold only a `Weak` reference to the mounted loop, so the loop
//! owns its closures without forming a reference cycle. Each callback
//! re-borrows the loop for the duration of one call.

use backdrop_core::driver::DriverLoop;
use backdrop_core::host::{EventTarget, FrameHandle, FrameScheduler, HostEvent, ListenerId};
use backdrop_core::point::Viewport;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};
use tracing::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{MouseEvent, Window};

use crate::canvas::CanvasSurface;

pub type BrowserLoop = DriverLoop<RafScheduler, WindowEvents, CanvasSurface>;

/// The mounted loop, shared between the JS handle and the callbacks.
pub type SharedLoop = Rc<RefCell<Option<BrowserLoop>>>;

/// Runs `f` against the loop if it is still alive and not already borrowed.
fn with_loop(weak: &Weak<RefCell<Option<BrowserLoop>>>, f: impl FnOnce(&mut BrowserLoop)) {
    let Some(shared) = weak.upgrade() else {
        return;
    };
    let Ok(mut slot) = shared.try_borrow_mut() else {
        warn!("backdrop callback re-entered while the loop was busy");
        return;
    };
    if let Some(driver) = slot.as_mut() {
        f(driver);
    }
}

/// Current window inner size, or an empty viewport if unavailable.
pub fn window_viewport(window: &Window) -> Viewport {
    let dim = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0).max(0.0) as u32
    };
    Viewport::new(dim(window.inner_width()), dim(window.inner_height()))
}

/// `requestAnimationFrame` scheduling.
pub struct RafScheduler {
    window: Window,
    tick: Closure<dyn FnMut()>,
}

impl RafScheduler {
    pub fn new(window: Window, shared: Weak<RefCell<Option<BrowserLoop>>>) -> Self {
        let tick = Closure::wrap(Box::new(move || {
            with_loop(&shared, |driver| driver.on_frame());
        }) as Box<dyn FnMut()>);
        Self { window, tick }
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        self.window
            .request_animation_frame(self.tick.as_ref().unchecked_ref())
            .ok()
            .map(|id| FrameHandle(id as u64))
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.window.cancel_animation_frame(handle.0 as i32).is_err() {
            warn!(handle = handle.0, "cancelAnimationFrame failed");
        }
    }
}

/// Window `resize` and `pointermove` subscriptions.
pub struct WindowEvents {
    window: Window,
    on_resize: Closure<dyn FnMut()>,
    on_pointer: Closure<dyn FnMut(MouseEvent)>,
    next: u64,
    active: BTreeMap<ListenerId, HostEvent>,
}

impl WindowEvents {
    pub fn new(window: Window, shared: Weak<RefCell<Option<BrowserLoop>>>) -> Self {
        let on_resize = {
            let shared = shared.clone();
            let window = window.clone();
            Closure::wrap(Box::new(move || {
                let viewport = window_viewport(&window);
                with_loop(&shared, |driver| driver.on_resize(viewport));
            }) as Box<dyn FnMut()>)
        };
        let on_pointer = Closure::wrap(Box::new(move |ev: MouseEvent| {
            let (x, y) = (ev.client_x() as f64, ev.client_y() as f64);
            with_loop(&shared, |driver| driver.on_pointer_move(x, y));
        }) as Box<dyn FnMut(MouseEvent)>);
        Self {
            window,
            on_resize,
            on_pointer,
            next: 0,
            active: BTreeMap::new(),
        }
    }

    fn binding(&self, event: HostEvent) -> (&'static str, &js_sys::Function) {
        match event {
            HostEvent::Resize => ("resize", self.on_resize.as_ref().unchecked_ref()),
            HostEvent::PointerMove => ("pointermove", self.on_pointer.as_ref().unchecked_ref()),
        }
    }
}

impl EventTarget for WindowEvents {
    fn listen(&mut self, event: HostEvent) -> Option<ListenerId> {
        let (name, callback) = self.binding(event);
        self.window
            .add_event_listener_with_callback(name, callback)
            .ok()?;
        self.next += 1;
        let id = ListenerId(self.next);
        self.active.insert(id, event);
        Some(id)
    }

    fn unlisten(&mut self, id: ListenerId) {
        let Some(event) = self.active.remove(&id) else {
            return;
        };
        let (name, callback) = self.binding(event);
        if self
            .window
            .remove_event_listener_with_callback(name, callback)
            .is_err()
        {
            warn!(event = name, "removeEventListener failed");
        }
    }
}

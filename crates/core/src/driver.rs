//! Frame-driven orchestration of the particle field.
//!
//! [`DriverLoop`] ties the point field, force model, integrator and
//! renderer together once per display refresh, and owns every host
//! resource it acquires: the pending frame request and the resize and
//! pointer-move subscriptions. Unmounting (or dropping) the loop releases
//! all of them.
//!
//! ```text
//! Uninitialized --mount--> Running --unmount--> Stopped
//!       \                                          ^
//!        `--mount without a surface / unmount------'
//! ```
//!
//! `Stopped` is terminal; a fresh mount needs a fresh loop.

use crate::config::FieldConfig;
use crate::error::BackdropError;
use crate::force::{drift_target, repulsion, Cursor};
use crate::host::{EventTarget, FrameHandle, FrameScheduler, HostEvent, ListenerId};
use crate::integrator::integrate;
use crate::point::{PointField, Viewport};
use crate::prng::{RandomSource, Xorshift64};
use crate::render::{draw_point, Surface};
use tracing::{debug, warn};

/// Lifecycle of a [`DriverLoop`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Uninitialized,
    Running,
    Stopped,
}

/// The animation loop for one mounted backdrop.
///
/// Each instance has its own cursor, clock and point set; nothing is
/// shared between instances.
pub struct DriverLoop<S, E, D, R = Xorshift64>
where
    S: FrameScheduler,
    E: EventTarget,
    D: Surface,
    R: RandomSource,
{
    config: FieldConfig,
    field: PointField,
    cursor: Cursor,
    time: f64,
    rng: R,
    scheduler: S,
    events: E,
    surface: Option<D>,
    state: LoopState,
    pending: Option<FrameHandle>,
    listeners: Vec<ListenerId>,
}

impl<S, E, D, R> DriverLoop<S, E, D, R>
where
    S: FrameScheduler,
    E: EventTarget,
    D: Surface,
    R: RandomSource,
{
    pub fn new(config: FieldConfig, rng: R, scheduler: S, events: E) -> Self {
        Self {
            config,
            field: PointField::new(),
            cursor: Cursor::default(),
            time: 0.0,
            rng,
            scheduler,
            events,
            surface: None,
            state: LoopState::Uninitialized,
            pending: None,
            listeners: Vec::new(),
        }
    }

    /// Builds the initial field, subscribes to host events and schedules
    /// the first frame.
    ///
    /// Without a surface the loop gives up quietly and goes straight to
    /// `Stopped`, acquiring nothing. Mounting a loop that is not
    /// `Uninitialized` is an error.
    pub fn mount(&mut self, viewport: Viewport, surface: Option<D>) -> Result<(), BackdropError> {
        if self.state != LoopState::Uninitialized {
            return Err(BackdropError::InvalidTransition {
                from: self.state,
                action: "mount",
            });
        }

        let Some(mut surface) = surface else {
            debug!("no drawing surface available, backdrop disabled");
            self.state = LoopState::Stopped;
            return Ok(());
        };

        surface.resize(viewport);
        self.surface = Some(surface);
        self.field.regenerate(viewport, &self.config.grid, &mut self.rng);

        for event in [HostEvent::Resize, HostEvent::PointerMove] {
            match self.events.listen(event) {
                Some(id) => self.listeners.push(id),
                None => warn!(?event, "host refused event subscription"),
            }
        }

        self.state = LoopState::Running;
        self.schedule_next();
        debug!(
            width = viewport.width,
            height = viewport.height,
            points = self.field.len(),
            "driver loop mounted"
        );
        Ok(())
    }

    /// Runs one tick: advance the clock, then for each point compute
    /// forces, integrate and draw, then request the next frame.
    ///
    /// Does nothing unless the loop is `Running`.
    pub fn on_frame(&mut self) {
        if self.state != LoopState::Running {
            return;
        }
        self.pending = None;
        self.time += self.config.motion.time_step;

        if let Some(surface) = self.surface.as_mut() {
            surface.clear();
            let cursor = self.cursor.position;
            let motion = &self.config.motion;
            let style = &self.config.style;

            for point in self.field.points_mut() {
                let distance = point.position.distance(cursor);
                let target = drift_target(point, self.time, motion);
                let impulse = repulsion(point.position, cursor, motion);
                integrate(point, target, impulse, motion);
                draw_point(surface, point, distance, self.time, style);
            }
        }

        self.schedule_next();
    }

    /// Rebuilds the field for the new viewport. Clock and cursor carry over.
    pub fn on_resize(&mut self, viewport: Viewport) {
        if self.state != LoopState::Running {
            return;
        }
        if let Some(surface) = self.surface.as_mut() {
            surface.resize(viewport);
        }
        self.field.regenerate(viewport, &self.config.grid, &mut self.rng);
    }

    /// Records the latest pointer position. Never touches the points.
    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        if self.state == LoopState::Running {
            self.cursor.move_to(x, y);
        }
    }

    /// Cancels the pending frame and removes every subscription.
    ///
    /// Idempotent. Afterwards the loop is `Stopped` for good.
    pub fn unmount(&mut self) {
        if self.state == LoopState::Stopped {
            return;
        }
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
        for id in self.listeners.drain(..) {
            self.events.unlisten(id);
        }
        self.state = LoopState::Stopped;
        debug!(time = self.time, "driver loop unmounted");
    }

    /// Unmounts and hands back the surface, if one was mounted.
    pub fn into_surface(mut self) -> Option<D> {
        self.unmount();
        self.surface.take()
    }

    fn schedule_next(&mut self) {
        self.pending = self.scheduler.request_frame();
        if self.pending.is_none() {
            warn!("host refused to schedule a frame, animation halted");
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn field(&self) -> &PointField {
        &self.field
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Simulated clock; advances by `time_step` per frame.
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.pending
    }

    pub fn surface(&self) -> Option<&D> {
        self.surface.as_ref()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn events(&self) -> &E {
        &self.events
    }
}

impl<S, E, D, R> Drop for DriverLoop<S, E, D, R>
where
    S: FrameScheduler,
    E: EventTarget,
    D: Surface,
    R: RandomSource,
{
    fn drop(&mut self) {
        self.unmount();
    }
}

//! The seams between the driver loop and its host environment.
//!
//! A host provides a "run this before the next repaint" primitive
//! ([`FrameScheduler`]) and a place to subscribe to viewport resizes and
//! pointer moves ([`EventTarget`]). In a browser these wrap
//! `requestAnimationFrame` and `window.addEventListener`; headless runs and
//! tests use [`ManualScheduler`] and [`ListenerRegistry`].

use std::collections::{BTreeMap, VecDeque};

/// Opaque ticket for one scheduled frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameHandle(pub u64);

/// Opaque ticket for one event subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

/// Host events the driver subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HostEvent {
    Resize,
    PointerMove,
}

/// Schedules the driver's frame callback once before the next repaint.
pub trait FrameScheduler {
    /// Requests one callback. `None` means the host refused.
    fn request_frame(&mut self) -> Option<FrameHandle>;

    /// Cancels a request that has not fired yet. Unknown handles are ignored.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Delivers resize and pointer-move notifications to the driver.
pub trait EventTarget {
    /// Subscribes to `event`. `None` means the host refused.
    fn listen(&mut self, event: HostEvent) -> Option<ListenerId>;

    /// Removes a subscription. Unknown ids are ignored.
    fn unlisten(&mut self, id: ListenerId);
}

/// Frame scheduler for headless hosts: requests queue up until pumped.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next: u64,
    queue: VecDeque<FrameHandle>,
    requested: usize,
    cancelled: usize,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames requested but neither fired nor cancelled.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Pops the oldest pending frame, treating it as fired.
    pub fn take_due(&mut self) -> Option<FrameHandle> {
        self.queue.pop_front()
    }

    /// Total requests ever made.
    pub fn requested(&self) -> usize {
        self.requested
    }

    /// Total successful cancellations.
    pub fn cancelled(&self) -> usize {
        self.cancelled
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        self.next += 1;
        self.requested += 1;
        let handle = FrameHandle(self.next);
        self.queue.push_back(handle);
        Some(handle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        let before = self.queue.len();
        self.queue.retain(|h| *h != handle);
        if self.queue.len() < before {
            self.cancelled += 1;
        }
    }
}

/// Event target for headless hosts: tracks live subscriptions.
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    next: u64,
    active: BTreeMap<ListenerId, HostEvent>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live subscriptions.
    pub fn active(&self) -> usize {
        self.active.len()
    }

    pub fn is_listening(&self, event: HostEvent) -> bool {
        self.active.values().any(|e| *e == event)
    }
}

impl EventTarget for ListenerRegistry {
    fn listen(&mut self, event: HostEvent) -> Option<ListenerId> {
        self.next += 1;
        let id = ListenerId(self.next);
        self.active.insert(id, event);
        Some(id)
    }

    fn unlisten(&mut self, id: ListenerId) {
        self.active.remove(&id);
    }
}

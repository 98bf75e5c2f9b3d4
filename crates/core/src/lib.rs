#![deny(unsafe_code)]
//! Core of the backdrop: an interactive particle field for a page background.
//!
//! A grid of points drifts around jittered anchors on a spring-damper model
//! and scatters away from the pointer. This crate holds the whole
//! simulation ([`PointField`], [`force`], [`integrator`]), styling
//! ([`render`]), and the frame-driven [`DriverLoop`] that ties them to a
//! host through the [`FrameScheduler`], [`EventTarget`] and [`Surface`]
//! traits. It has no platform code; see `backdrop-wasm` for the browser and
//! `backdrop-raster` for headless rendering.

pub mod color;
pub mod config;
pub mod driver;
pub mod error;
pub mod force;
pub mod host;
pub mod integrator;
pub mod params;
pub mod point;
pub mod prng;
pub mod render;
pub mod scene;

pub use color::{Rgba, Srgb};
pub use config::{FieldConfig, GridConfig, MotionConfig, StyleConfig};
pub use driver::{DriverLoop, LoopState};
pub use error::BackdropError;
pub use force::Cursor;
pub use host::{
    EventTarget, FrameHandle, FrameScheduler, HostEvent, ListenerId, ListenerRegistry,
    ManualScheduler,
};
pub use point::{GridLayout, Point, PointField, Viewport};
pub use prng::{RandomSource, Xorshift64};
pub use render::Surface;
pub use scene::{PointerSample, Scene};

#![deny(unsafe_code)]
//! Headless rendering for the backdrop.
//!
//! [`Raster`] implements the core `Surface` trait on the CPU,
//! [`replay`](replay::replay) runs a `Scene` through the real driver loop,
//! and [`snapshot`] (feature `png`) writes the resulting frame to disk. The
//! CLI builds on all three.

pub mod pixel;
pub mod replay;

#[cfg(feature = "png")]
pub mod snapshot;

pub use pixel::Raster;
pub use replay::{replay, HeadlessLoop};

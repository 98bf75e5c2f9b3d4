//! Error types for the backdrop core.

use crate::driver::LoopState;
use thiserror::Error;

/// Errors produced by backdrop operations.
///
/// The per-frame simulation itself never fails; errors come from
/// configuration, scene descriptions and lifecycle misuse.
#[derive(Debug, Error)]
pub enum BackdropError {
    /// Width or height was zero, or too large, where a drawable area is required.
    #[error("invalid dimensions: width and height must be non-zero and at most the size limit")]
    InvalidDimensions,

    /// A configuration value was out of its accepted range.
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParam { name: String, reason: String },

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A lifecycle operation was attempted from a state that does not allow it.
    #[error("cannot {action} a driver loop in state {from:?}")]
    InvalidTransition {
        from: LoopState,
        action: &'static str,
    },

    /// Reading a scene or writing a snapshot failed.
    #[error("i/o error: {0}")]
    Io(String),
}

impl BackdropError {
    pub(crate) fn param(name: &str, reason: impl Into<String>) -> Self {
        BackdropError::InvalidParam {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

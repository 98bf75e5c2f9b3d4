//! Failure classes of the `backdrop` binary and their exit codes.
//!
//! | code | cause |
//! |------|-------|
//! | 2    | clap rejected the command line |
//! | 10   | the field refused the request: empty or oversized viewport, out-of-range parameter |
//! | 11   | a scene file could not be read or the PNG could not be written |
//! | 12   | an argument or file did not parse: `--params`, `--pointer`, `--background`, scene JSON |
//! | 13   | `--json` output could not be produced |

use backdrop_core::BackdropError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Backdrop(BackdropError),

    #[error("{0}")]
    Io(String),

    #[error("{0}")]
    Input(String),

    #[error("cannot encode output: {0}")]
    Serialization(String),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Backdrop(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

/// Core I/O failures keep their own code, and a bad color string is
/// treated as user input rather than a field constraint.
impl From<BackdropError> for CliError {
    fn from(e: BackdropError) -> Self {
        match e {
            BackdropError::Io(msg) => CliError::Io(msg),
            BackdropError::InvalidColor(_) => CliError::Input(e.to_string()),
            other => CliError::Backdrop(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backdrop_core::scene::{Scene, MAX_SCENE_DIMENSION};
    use serde_json::json;

    #[test]
    fn empty_viewport_exits_with_field_code() {
        let err = CliError::from(Scene::new(0, 600, 1).validate().unwrap_err());
        assert_eq!(err.exit_code(), 10);
        assert!(err.to_string().contains("width"));
    }

    #[test]
    fn oversized_scene_exits_with_field_code() {
        let scene = Scene::new(MAX_SCENE_DIMENSION + 1, 600, 1);
        assert_eq!(CliError::from(scene.validate().unwrap_err()).exit_code(), 10);
    }

    #[test]
    fn out_of_range_param_names_the_key() {
        let mut scene = Scene::new(100, 100, 1);
        scene.params = json!({"desktop_spacing": 0.5});
        let err = CliError::from(scene.validate().unwrap_err());
        assert_eq!(err.exit_code(), 10);
        assert!(err.to_string().contains("desktop_spacing"), "{err}");
    }

    #[test]
    fn malformed_glow_color_is_an_input_error() {
        let mut scene = Scene::new(100, 100, 1);
        scene.params = json!({"glow_color": "cyan"});
        let err = CliError::from(scene.validate().unwrap_err());
        assert_eq!(err.exit_code(), 12);
        assert!(err.to_string().contains("cyan"), "{err}");
    }

    #[test]
    fn snapshot_write_failure_keeps_its_message() {
        let err = CliError::from(BackdropError::Io("permission denied".into()));
        assert_eq!(err.exit_code(), 11);
        assert_eq!(err.to_string(), "permission denied");
    }

    #[test]
    fn serde_json_failure_exits_with_13() {
        let encode = serde_json::from_str::<serde_json::Value>("{\"ticks\": ").unwrap_err();
        let err = CliError::from(encode);
        assert_eq!(err.exit_code(), 13);
        assert!(err.to_string().starts_with("cannot encode output"));
    }
}

//! Reproducible description of a headless backdrop run.
//!
//! A [`Scene`] captures everything needed to recreate a frame: viewport,
//! parameter overrides, PRNG seed, tick count and a scripted pointer path.
//! Two identical scenes replayed by the same binary produce identical
//! pixels.

use crate::config::FieldConfig;
use crate::error::BackdropError;
use crate::point::Viewport;
use serde::{Deserialize, Serialize};

/// Largest width or height a headless scene may request.
pub const MAX_SCENE_DIMENSION: u32 = 16384;

/// A pointer move applied just before tick `tick` (zero-based) runs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PointerSample {
    pub tick: usize,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scene {
    pub width: u32,
    pub height: u32,
    pub seed: u64,
    pub ticks: usize,
    #[serde(default = "empty_params")]
    pub params: serde_json::Value,
    #[serde(default)]
    pub pointer: Vec<PointerSample>,
}

fn empty_params() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

impl Scene {
    /// A scene with default params, no ticks and no pointer movement.
    pub fn new(width: u32, height: u32, seed: u64) -> Self {
        Self {
            width,
            height,
            seed,
            ticks: 0,
            params: empty_params(),
            pointer: Vec::new(),
        }
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }

    /// Parses and validates the scene's parameter overrides.
    pub fn config(&self) -> Result<FieldConfig, BackdropError> {
        FieldConfig::from_json(&self.params)
    }

    /// Checks that the scene describes a drawable area no larger than
    /// [`MAX_SCENE_DIMENSION`] on either side, and that its params are valid.
    pub fn validate(&self) -> Result<(), BackdropError> {
        if self.viewport().is_empty()
            || self.width > MAX_SCENE_DIMENSION
            || self.height > MAX_SCENE_DIMENSION
        {
            return Err(BackdropError::InvalidDimensions);
        }
        self.config()?;
        Ok(())
    }

    /// Pointer samples due before `tick`, in script order.
    pub fn pointer_at(&self, tick: usize) -> impl Iterator<Item = &PointerSample> {
        self.pointer.iter().filter(move |s| s.tick == tick)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_has_empty_params_and_script() {
        let s = Scene::new(800, 600, 42);
        assert_eq!(s.params, json!({}));
        assert_eq!(s.ticks, 0);
        assert!(s.pointer.is_empty());
        assert_eq!(s.viewport(), Viewport::new(800, 600));
    }

    #[test]
    fn json_round_trip_with_pointer_script() {
        let mut s = Scene::new(1280, 720, 7);
        s.ticks = 90;
        s.params = json!({"friction": 0.9});
        s.pointer = vec![
            PointerSample { tick: 0, x: 640.0, y: 360.0 },
            PointerSample { tick: 45, x: 100.0, y: 50.0 },
        ];
        let text = serde_json::to_string_pretty(&s).unwrap();
        let back: Scene = serde_json::from_str(&text).unwrap();
        assert_eq!(s, back);
    }

    #[test]
    fn params_and_pointer_are_optional_in_json() {
        let s: Scene =
            serde_json::from_str(r#"{"width": 10, "height": 10, "seed": 1, "ticks": 3}"#).unwrap();
        assert_eq!(s.params, json!({}));
        assert!(s.pointer.is_empty());
        assert!(s.validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_dimensions() {
        assert!(matches!(
            Scene::new(0, 600, 1).validate(),
            Err(BackdropError::InvalidDimensions)
        ));
        assert!(Scene::new(800, 0, 1).validate().is_err());
    }

    #[test]
    fn validate_rejects_oversized_dimensions() {
        let too_big = [
            (100_000, 100_000),
            (MAX_SCENE_DIMENSION + 1, 1),
            (1, MAX_SCENE_DIMENSION + 1),
        ];
        for (w, h) in too_big {
            assert!(
                matches!(
                    Scene::new(w, h, 1).validate(),
                    Err(BackdropError::InvalidDimensions)
                ),
                "{w}x{h} should be rejected"
            );
        }
        assert!(Scene::new(MAX_SCENE_DIMENSION, 1, 1).validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_params() {
        let mut s = Scene::new(100, 100, 1);
        s.params = json!({"friction": 2.0});
        assert!(matches!(
            s.validate(),
            Err(BackdropError::InvalidParam { .. })
        ));
    }

    #[test]
    fn pointer_at_selects_samples_for_tick() {
        let mut s = Scene::new(100, 100, 1);
        s.pointer = vec![
            PointerSample { tick: 2, x: 1.0, y: 1.0 },
            PointerSample { tick: 5, x: 2.0, y: 2.0 },
            PointerSample { tick: 2, x: 3.0, y: 3.0 },
        ];
        let xs: Vec<f64> = s.pointer_at(2).map(|p| p.x).collect();
        assert_eq!(xs, vec![1.0, 3.0]);
        assert_eq!(s.pointer_at(4).count(), 0);
    }
}

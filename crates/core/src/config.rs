//! Tunable constants for the particle field.
//!
//! Defaults reproduce the site's backdrop exactly. Every value can be
//! overridden from a flat JSON object (`{"friction": 0.9, "glow_color": "#f0abfc"}`),
//! which is how the CLI `--params` flag, scene files and the browser binding
//! configure the field.

use crate::color::Srgb;
use crate::error::BackdropError;
use crate::params::{param_color, param_f64, param_u32};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Viewport width at and above which the desktop spacing tier applies.
const DEFAULT_BREAKPOINT: u32 = 768;
/// Grid spacing for viewports at or above the breakpoint.
const DEFAULT_DESKTOP_SPACING: f64 = 50.0;
/// Grid spacing for viewports below the breakpoint.
const DEFAULT_MOBILE_SPACING: f64 = 60.0;
/// Smallest grid spacing accepted for either tier.
pub const MIN_SPACING: f64 = 1.0;
/// Per-axis jitter bound for base positions.
const DEFAULT_JITTER: f64 = 10.0;
const DEFAULT_SIZE_MIN: f64 = 0.5;
const DEFAULT_SIZE_MAX: f64 = 1.5;
const DEFAULT_AMPLITUDE_BASE: f64 = 12.0;
const DEFAULT_AMPLITUDE_RANGE: f64 = 12.0;
const DEFAULT_DRIFT_BASE: f64 = 0.12;
const DEFAULT_DRIFT_PER_SIZE: f64 = 0.04;

const DEFAULT_SPRING: f64 = 0.02;
const DEFAULT_FRICTION: f64 = 0.93;
const DEFAULT_REPULSION_RADIUS: f64 = 250.0;
const DEFAULT_REPULSION_STRENGTH: f64 = 1.2;
/// Simulated clock advance per frame.
const DEFAULT_TIME_STEP: f64 = 0.016;
/// Vertical drift runs slower than horizontal so paths trace ellipses.
const DEFAULT_VERTICAL_DRIFT_RATIO: f64 = 0.8;

const DEFAULT_NEAR_RADIUS: f64 = 150.0;
const DEFAULT_GLOW_COLOR: &str = "#22d3ee";
const DEFAULT_GLOW_ALPHA_SCALE: f64 = 0.4;
const DEFAULT_GLOW_ALPHA_FLOOR: f64 = 0.1;
const DEFAULT_GLOW_RADIUS_BOOST: f64 = 0.5;
const DEFAULT_BASE_COLOR: &str = "#ffffff";
const DEFAULT_BREATH_BASE: f64 = 0.03;
const DEFAULT_BREATH_RANGE: f64 = 0.05;
const DEFAULT_BREATH_RATE: f64 = 0.5;

/// Grid construction: spacing tiers and per-point randomization bands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    pub breakpoint: u32,
    pub desktop_spacing: f64,
    pub mobile_spacing: f64,
    pub jitter: f64,
    pub size_min: f64,
    pub size_max: f64,
    pub amplitude_base: f64,
    pub amplitude_range: f64,
    pub drift_base: f64,
    pub drift_per_size: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            breakpoint: DEFAULT_BREAKPOINT,
            desktop_spacing: DEFAULT_DESKTOP_SPACING,
            mobile_spacing: DEFAULT_MOBILE_SPACING,
            jitter: DEFAULT_JITTER,
            size_min: DEFAULT_SIZE_MIN,
            size_max: DEFAULT_SIZE_MAX,
            amplitude_base: DEFAULT_AMPLITUDE_BASE,
            amplitude_range: DEFAULT_AMPLITUDE_RANGE,
            drift_base: DEFAULT_DRIFT_BASE,
            drift_per_size: DEFAULT_DRIFT_PER_SIZE,
        }
    }
}

impl GridConfig {
    pub fn from_json(params: &Value) -> Self {
        Self {
            breakpoint: param_u32(params, "breakpoint", DEFAULT_BREAKPOINT),
            desktop_spacing: param_f64(params, "desktop_spacing", DEFAULT_DESKTOP_SPACING),
            mobile_spacing: param_f64(params, "mobile_spacing", DEFAULT_MOBILE_SPACING),
            jitter: param_f64(params, "jitter", DEFAULT_JITTER),
            size_min: param_f64(params, "size_min", DEFAULT_SIZE_MIN),
            size_max: param_f64(params, "size_max", DEFAULT_SIZE_MAX),
            amplitude_base: param_f64(params, "amplitude_base", DEFAULT_AMPLITUDE_BASE),
            amplitude_range: param_f64(params, "amplitude_range", DEFAULT_AMPLITUDE_RANGE),
            drift_base: param_f64(params, "drift_base", DEFAULT_DRIFT_BASE),
            drift_per_size: param_f64(params, "drift_per_size", DEFAULT_DRIFT_PER_SIZE),
        }
    }

    /// Grid spacing for a viewport of the given width.
    ///
    /// Wide viewports (at or above the breakpoint) get the *denser*
    /// desktop tier; narrow ones get the sparser mobile tier.
    pub fn spacing_for(&self, viewport_width: u32) -> f64 {
        if viewport_width >= self.breakpoint {
            self.desktop_spacing
        } else {
            self.mobile_spacing
        }
    }
}

/// Spring-damper and pointer repulsion constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionConfig {
    pub spring: f64,
    pub friction: f64,
    pub repulsion_radius: f64,
    pub repulsion_strength: f64,
    pub time_step: f64,
    pub vertical_drift_ratio: f64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            spring: DEFAULT_SPRING,
            friction: DEFAULT_FRICTION,
            repulsion_radius: DEFAULT_REPULSION_RADIUS,
            repulsion_strength: DEFAULT_REPULSION_STRENGTH,
            time_step: DEFAULT_TIME_STEP,
            vertical_drift_ratio: DEFAULT_VERTICAL_DRIFT_RATIO,
        }
    }
}

impl MotionConfig {
    pub fn from_json(params: &Value) -> Self {
        Self {
            spring: param_f64(params, "spring", DEFAULT_SPRING),
            friction: param_f64(params, "friction", DEFAULT_FRICTION),
            repulsion_radius: param_f64(params, "repulsion_radius", DEFAULT_REPULSION_RADIUS),
            repulsion_strength: param_f64(params, "repulsion_strength", DEFAULT_REPULSION_STRENGTH),
            time_step: param_f64(params, "time_step", DEFAULT_TIME_STEP),
            vertical_drift_ratio: param_f64(
                params,
                "vertical_drift_ratio",
                DEFAULT_VERTICAL_DRIFT_RATIO,
            ),
        }
    }
}

/// Colors and opacity curves used by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StyleConfig {
    pub near_radius: f64,
    pub glow_color: Srgb,
    pub glow_alpha_scale: f64,
    pub glow_alpha_floor: f64,
    pub glow_radius_boost: f64,
    pub base_color: Srgb,
    pub breath_base: f64,
    pub breath_range: f64,
    pub breath_rate: f64,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            near_radius: DEFAULT_NEAR_RADIUS,
            glow_color: Srgb {
                r: 34.0 / 255.0,
                g: 211.0 / 255.0,
                b: 238.0 / 255.0,
            },
            glow_alpha_scale: DEFAULT_GLOW_ALPHA_SCALE,
            glow_alpha_floor: DEFAULT_GLOW_ALPHA_FLOOR,
            glow_radius_boost: DEFAULT_GLOW_RADIUS_BOOST,
            base_color: Srgb::WHITE,
            breath_base: DEFAULT_BREATH_BASE,
            breath_range: DEFAULT_BREATH_RANGE,
            breath_rate: DEFAULT_BREATH_RATE,
        }
    }
}

impl StyleConfig {
    pub fn from_json(params: &Value) -> Result<Self, BackdropError> {
        let defaults = Self::default();
        Ok(Self {
            near_radius: param_f64(params, "near_radius", DEFAULT_NEAR_RADIUS),
            glow_color: param_color(params, "glow_color", defaults.glow_color)?,
            glow_alpha_scale: param_f64(params, "glow_alpha_scale", DEFAULT_GLOW_ALPHA_SCALE),
            glow_alpha_floor: param_f64(params, "glow_alpha_floor", DEFAULT_GLOW_ALPHA_FLOOR),
            glow_radius_boost: param_f64(params, "glow_radius_boost", DEFAULT_GLOW_RADIUS_BOOST),
            base_color: param_color(params, "base_color", defaults.base_color)?,
            breath_base: param_f64(params, "breath_base", DEFAULT_BREATH_BASE),
            breath_range: param_f64(params, "breath_range", DEFAULT_BREATH_RANGE),
            breath_rate: param_f64(params, "breath_rate", DEFAULT_BREATH_RATE),
        })
    }
}

/// Complete configuration for one particle field instance.
///
/// Serializes flat: the three groups share one JSON namespace, matching
/// the keys accepted by [`FieldConfig::from_json`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FieldConfig {
    #[serde(flatten)]
    pub grid: GridConfig,
    #[serde(flatten)]
    pub motion: MotionConfig,
    #[serde(flatten)]
    pub style: StyleConfig,
}

impl FieldConfig {
    /// Builds a config from a flat JSON object and validates it.
    ///
    /// Missing or mistyped numeric keys take their defaults; out-of-range
    /// values and malformed color strings are errors.
    pub fn from_json(params: &Value) -> Result<Self, BackdropError> {
        let config = Self {
            grid: GridConfig::from_json(params),
            motion: MotionConfig::from_json(params),
            style: StyleConfig::from_json(params)?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn spacing_for(&self, viewport_width: u32) -> f64 {
        self.grid.spacing_for(viewport_width)
    }

    /// Checks every range constraint the simulation relies on.
    pub fn validate(&self) -> Result<(), BackdropError> {
        let g = &self.grid;
        let m = &self.motion;
        let s = &self.style;

        let finite = [
            ("desktop_spacing", g.desktop_spacing),
            ("mobile_spacing", g.mobile_spacing),
            ("jitter", g.jitter),
            ("size_min", g.size_min),
            ("size_max", g.size_max),
            ("amplitude_base", g.amplitude_base),
            ("amplitude_range", g.amplitude_range),
            ("drift_base", g.drift_base),
            ("drift_per_size", g.drift_per_size),
            ("spring", m.spring),
            ("friction", m.friction),
            ("repulsion_radius", m.repulsion_radius),
            ("repulsion_strength", m.repulsion_strength),
            ("time_step", m.time_step),
            ("vertical_drift_ratio", m.vertical_drift_ratio),
            ("near_radius", s.near_radius),
            ("glow_alpha_scale", s.glow_alpha_scale),
            ("glow_alpha_floor", s.glow_alpha_floor),
            ("glow_radius_boost", s.glow_radius_boost),
            ("breath_base", s.breath_base),
            ("breath_range", s.breath_range),
            ("breath_rate", s.breath_rate),
        ];
        if let Some((name, _)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return Err(BackdropError::param(name, "must be finite"));
        }

        for (name, value) in [
            ("desktop_spacing", g.desktop_spacing),
            ("mobile_spacing", g.mobile_spacing),
        ] {
            if value < MIN_SPACING {
                return Err(BackdropError::param(
                    name,
                    format!("must be at least {MIN_SPACING}"),
                ));
            }
        }
        for (name, value) in [
            ("jitter", g.jitter),
            ("size_min", g.size_min),
            ("amplitude_base", g.amplitude_base),
            ("amplitude_range", g.amplitude_range),
            ("repulsion_strength", m.repulsion_strength),
        ] {
            if value < 0.0 {
                return Err(BackdropError::param(name, "must not be negative"));
            }
        }
        if g.size_min > g.size_max {
            return Err(BackdropError::param(
                "size_max",
                format!("must be at least size_min ({})", g.size_min),
            ));
        }
        if !(m.friction > 0.0 && m.friction < 1.0) {
            return Err(BackdropError::param(
                "friction",
                "must lie strictly between 0 and 1",
            ));
        }
        if m.time_step <= 0.0 {
            return Err(BackdropError::param("time_step", "must be positive"));
        }
        if m.repulsion_radius <= 0.0 {
            return Err(BackdropError::param("repulsion_radius", "must be positive"));
        }
        if s.near_radius <= 0.0 {
            return Err(BackdropError::param("near_radius", "must be positive"));
        }
        Ok(())
    }

    /// Current values as a flat JSON object.
    pub fn params(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// Describes every accepted key: type, default, range and meaning.
    pub fn param_schema() -> Value {
        json!({
            "breakpoint": {
                "type": "integer",
                "default": DEFAULT_BREAKPOINT,
                "description": "Viewport width (px) at and above which desktop_spacing applies"
            },
            "desktop_spacing": {
                "type": "number",
                "default": DEFAULT_DESKTOP_SPACING,
                "min": MIN_SPACING,
                "description": "Grid spacing (px) for viewports at or above the breakpoint"
            },
            "mobile_spacing": {
                "type": "number",
                "default": DEFAULT_MOBILE_SPACING,
                "min": MIN_SPACING,
                "description": "Grid spacing (px) for viewports below the breakpoint"
            },
            "jitter": {
                "type": "number",
                "default": DEFAULT_JITTER,
                "min": 0.0,
                "description": "Maximum per-axis random offset (px) of each base position"
            },
            "size_min": {
                "type": "number",
                "default": DEFAULT_SIZE_MIN,
                "min": 0.0,
                "description": "Smallest point radius (px)"
            },
            "size_max": {
                "type": "number",
                "default": DEFAULT_SIZE_MAX,
                "min": 0.0,
                "description": "Largest point radius (px)"
            },
            "amplitude_base": {
                "type": "number",
                "default": DEFAULT_AMPLITUDE_BASE,
                "min": 0.0,
                "description": "Minimum drift radius (px)"
            },
            "amplitude_range": {
                "type": "number",
                "default": DEFAULT_AMPLITUDE_RANGE,
                "min": 0.0,
                "description": "Random extra drift radius (px) added to amplitude_base"
            },
            "drift_base": {
                "type": "number",
                "default": DEFAULT_DRIFT_BASE,
                "description": "Drift angular speed shared by all points"
            },
            "drift_per_size": {
                "type": "number",
                "default": DEFAULT_DRIFT_PER_SIZE,
                "description": "Extra drift speed per pixel of point radius"
            },
            "spring": {
                "type": "number",
                "default": DEFAULT_SPRING,
                "min": 0.0,
                "max": 1.0,
                "description": "Spring constant pulling each point toward its drift target"
            },
            "friction": {
                "type": "number",
                "default": DEFAULT_FRICTION,
                "min": 0.0,
                "max": 1.0,
                "description": "Per-frame velocity multiplier, exclusive of both bounds"
            },
            "repulsion_radius": {
                "type": "number",
                "default": DEFAULT_REPULSION_RADIUS,
                "min": 1.0,
                "description": "Distance (px) beyond which the pointer exerts no force"
            },
            "repulsion_strength": {
                "type": "number",
                "default": DEFAULT_REPULSION_STRENGTH,
                "min": 0.0,
                "description": "Impulse scale applied at zero distance from the pointer"
            },
            "time_step": {
                "type": "number",
                "default": DEFAULT_TIME_STEP,
                "min": 0.0,
                "exclusive_min": true,
                "description": "Simulated clock advance per frame"
            },
            "vertical_drift_ratio": {
                "type": "number",
                "default": DEFAULT_VERTICAL_DRIFT_RATIO,
                "description": "Vertical drift speed relative to horizontal"
            },
            "near_radius": {
                "type": "number",
                "default": DEFAULT_NEAR_RADIUS,
                "min": 1.0,
                "description": "Distance (px) inside which points glow"
            },
            "glow_color": {
                "type": "string",
                "default": DEFAULT_GLOW_COLOR,
                "description": "Hex color of points near the pointer"
            },
            "glow_alpha_scale": {
                "type": "number",
                "default": DEFAULT_GLOW_ALPHA_SCALE,
                "description": "Glow opacity gained between near_radius and the pointer"
            },
            "glow_alpha_floor": {
                "type": "number",
                "default": DEFAULT_GLOW_ALPHA_FLOOR,
                "description": "Glow opacity at the edge of near_radius"
            },
            "glow_radius_boost": {
                "type": "number",
                "default": DEFAULT_GLOW_RADIUS_BOOST,
                "description": "Extra radius (px) of glowing points"
            },
            "base_color": {
                "type": "string",
                "default": DEFAULT_BASE_COLOR,
                "description": "Hex color of resting points"
            },
            "breath_base": {
                "type": "number",
                "default": DEFAULT_BREATH_BASE,
                "description": "Minimum opacity of resting points"
            },
            "breath_range": {
                "type": "number",
                "default": DEFAULT_BREATH_RANGE,
                "description": "Opacity swing of the breathing pulse"
            },
            "breath_rate": {
                "type": "number",
                "default": DEFAULT_BREATH_RATE,
                "description": "Angular speed of the breathing pulse"
            }
        })
    }
}

//! Color types for point styling.
//!
//! `Srgb` holds components in [0, 1] and serializes as a `"#rrggbb"` hex
//! string. `Rgba` pairs a color with a straight (non-premultiplied) alpha,
//! which is what both the canvas fill style and the raster surface consume.

use crate::error::BackdropError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// sRGB color with components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Srgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Srgb {
    pub const WHITE: Srgb = Srgb {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    pub const BLACK: Srgb = Srgb {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    /// Parses `"#22d3ee"` or `"22d3ee"` (case insensitive).
    ///
    /// Returns `BackdropError::InvalidColor` unless the input is exactly six hex digits.
    pub fn from_hex(hex: &str) -> Result<Srgb, BackdropError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(BackdropError::InvalidColor(format!(
                "expected 6 hex digits, got '{hex}'"
            )));
        }
        let channel = |range: std::ops::Range<usize>, name: &str| {
            u8::from_str_radix(&digits[range], 16)
                .map(|v| v as f64 / 255.0)
                .map_err(|e| BackdropError::InvalidColor(format!("invalid {name} component: {e}")))
        };
        Ok(Srgb {
            r: channel(0..2, "red")?,
            g: channel(2..4, "green")?,
            b: channel(4..6, "blue")?,
        })
    }

    /// Formats as `"#rrggbb"`, quantized to 8 bits.
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    pub fn to_rgb8(self) -> [u8; 3] {
        [quantize(self.r), quantize(self.g), quantize(self.b)]
    }

    /// Attaches an alpha, clamped to [0, 1].
    pub fn with_alpha(self, alpha: f64) -> Rgba {
        Rgba {
            color: self,
            alpha: alpha.clamp(0.0, 1.0),
        }
    }
}

fn quantize(c: f64) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl Serialize for Srgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Srgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Srgb::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// A color with straight alpha in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub color: Srgb,
    pub alpha: f64,
}

impl Rgba {
    /// CSS `rgba()` notation for a 2D canvas fill style.
    pub fn to_css(self) -> String {
        let [r, g, b] = self.color.to_rgb8();
        format!("rgba({r}, {g}, {b}, {:.4})", self.alpha)
    }
}

//! Tint colors for label materials
//!
//! Colors are stored as linear `f32` RGBA. Material caches key on the
//! 8-bit-per-channel packing of a color so that two colors which render
//! identically share one material.

use serde::{Deserialize, Serialize};

use super::math::Vec4;

/// RGBA color, each channel in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red channel
    pub r: f32,
    /// Green channel
    pub g: f32,
    /// Blue channel
    pub b: f32,
    /// Alpha channel
    pub a: f32,
}

/// Packed `0xRRGGBBAA` key for a color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColorKey(pub u32);

impl Color {
    /// Opaque white
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);

    /// Opaque black
    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);

    /// Create a color from all four channels
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    /// Same color with the alpha channel replaced (clamped to `0.0..=1.0`)
    #[must_use]
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            a: clamp_unit(alpha),
            ..self
        }
    }

    /// Quantize to 8 bits per channel
    pub fn to_rgba8(self) -> [u8; 4] {
        [
            quantize(self.r),
            quantize(self.g),
            quantize(self.b),
            quantize(self.a),
        ]
    }

    /// Cache key derived from the 8-bit quantization
    pub fn key(self) -> ColorKey {
        ColorKey(u32::from_be_bytes(self.to_rgba8()))
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<Vec4> for Color {
    fn from(v: Vec4) -> Self {
        Self::rgba(v.x, v.y, v.z, v.w)
    }
}

impl From<Color> for Vec4 {
    fn from(c: Color) -> Self {
        Self::new(c.r, c.g, c.b, c.a)
    }
}

fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn quantize(channel: f32) -> u8 {
    (clamp_unit(channel) * 255.0).round() as u8
}

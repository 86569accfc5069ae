//! Glyph descriptors
//!
//! A [`GlyphDescriptor`] is everything mesh assembly needs to know about one
//! character: where its cell sits in the atlas and how large its quad is.

use crate::foundation::math::Vec2;

/// Quad width of every glyph in label-local units
pub const GLYPH_WIDTH: f32 = 1.0;

/// Quad height of every glyph in label-local units
pub const GLYPH_HEIGHT: f32 = 2.0;

/// Geometry of one character in an atlas
///
/// `valid == false` is the "no such glyph" sentinel; its other fields are
/// zeroed and must not be drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphDescriptor {
    /// Character this descriptor draws
    pub character: char,
    /// UV coordinates of the bottom-left corner (normalized 0.0-1.0)
    pub uv_min: Vec2,
    /// UV coordinates of the top-right corner (normalized 0.0-1.0)
    pub uv_max: Vec2,
    /// Quad width
    pub width: f32,
    /// Quad height
    pub height: f32,
    /// Whether this descriptor refers to a real atlas cell
    pub valid: bool,
}

impl GlyphDescriptor {
    /// Create a valid descriptor with the fixed glyph quad size
    pub fn new(character: char, uv_min: Vec2, uv_max: Vec2) -> Self {
        Self {
            character,
            uv_min,
            uv_max,
            width: GLYPH_WIDTH,
            height: GLYPH_HEIGHT,
            valid: true,
        }
    }

    /// The "no such glyph" sentinel
    pub fn invalid() -> Self {
        Self {
            character: '\0',
            uv_min: Vec2::zeros(),
            uv_max: Vec2::zeros(),
            width: 0.0,
            height: 0.0,
            valid: false,
        }
    }

    /// UV of the bottom-left corner
    pub fn uv_bottom_left(&self) -> Vec2 {
        self.uv_min
    }

    /// UV of the top-left corner
    pub fn uv_top_left(&self) -> Vec2 {
        Vec2::new(self.uv_min.x, self.uv_max.y)
    }

    /// UV of the top-right corner
    pub fn uv_top_right(&self) -> Vec2 {
        self.uv_max
    }

    /// UV of the bottom-right corner
    pub fn uv_bottom_right(&self) -> Vec2 {
        Vec2::new(self.uv_max.x, self.uv_min.y)
    }
}

impl Default for GlyphDescriptor {
    fn default() -> Self {
        Self::invalid()
    }
}

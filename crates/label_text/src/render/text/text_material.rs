//! Text material descriptions
//!
//! Labels are drawn unlit with alpha blending: the atlas alpha channel is the
//! glyph coverage and the tint supplies color and overall opacity. A
//! [`TextMaterial`] is the backend-agnostic description handed to
//! [`RenderResources::create_material`](crate::render::RenderResources::create_material).

use crate::assets::TextureHandle;
use crate::foundation::Color;

/// How a material composites onto the floor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlendMode {
    /// Standard alpha blending
    #[default]
    Transparent,
}

/// Tinted atlas material
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMaterial {
    /// Font atlas texture
    pub texture: TextureHandle,
    /// Tint, alpha carries the label opacity
    pub color: Color,
    /// Blend mode
    pub blend: BlendMode,
}

/// Create an unlit, alpha-blended label material
///
/// # Arguments
///
/// * `font_atlas_texture` - Handle to the font atlas texture (alpha channel is glyph coverage)
/// * `color` - Tint; its alpha is the label opacity
pub fn create_unlit_text_material(font_atlas_texture: TextureHandle, color: Color) -> TextMaterial {
    TextMaterial {
        texture: font_atlas_texture,
        color,
        blend: BlendMode::Transparent,
    }
}

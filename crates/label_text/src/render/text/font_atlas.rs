//! Font atlas system for text rendering
//!
//! A [`FontAtlas`] wraps one packed bitmap-font texture whose cells form a
//! regular grid, plus the table saying which character lives in which cell.
//! It turns characters into [`GlyphDescriptor`]s with UV rectangles inset
//! by a few texels so linear filtering never samples the neighbouring cell.

use std::collections::HashMap;

use super::atlas_layout::AtlasLayout;
use super::glyph::GlyphDescriptor;
use crate::assets::{AtlasTexture, TextureHandle};
use crate::config::PaddingConfig;
use crate::foundation::math::Vec2;

/// Upper bound on UV padding as a fraction of one cell
const MAX_PADDING_FRACTION: f32 = 0.25;

/// Packed bitmap-font texture plus its character table
///
/// Immutable once built. Rebuilding fonts produces fresh atlases.
#[derive(Debug, Clone)]
pub struct FontAtlas {
    texture: AtlasTexture,
    columns: u32,
    rows: u32,
    cell_width: f32,
    cell_height: f32,
    character_to_index: HashMap<char, u32>,
    flip_vertical: bool,
    padding: PaddingConfig,
}

impl FontAtlas {
    /// Create an atlas over `texture` with an explicit grid and mapping
    ///
    /// Mapping entries that point outside the `columns × rows` grid are
    /// dropped with a warning, so no lookup can address a missing cell.
    /// Zero-sized grids are treated as 1×1.
    pub fn new(
        texture: AtlasTexture,
        columns: u32,
        rows: u32,
        mut character_to_index: HashMap<char, u32>,
        flip_vertical: bool,
        padding: PaddingConfig,
    ) -> Self {
        let columns = columns.max(1);
        let rows = rows.max(1);
        let cell_count = columns * rows;

        let before = character_to_index.len();
        character_to_index.retain(|_, index| *index < cell_count);
        if character_to_index.len() != before {
            log::warn!(
                "Dropped {} character(s) mapped outside the {}x{} atlas grid",
                before - character_to_index.len(),
                columns,
                rows
            );
        }

        Self {
            texture,
            columns,
            rows,
            cell_width: 1.0 / columns as f32,
            cell_height: 1.0 / rows as f32,
            character_to_index,
            flip_vertical,
            padding,
        }
    }

    /// Create an atlas from a layout descriptor
    pub fn from_layout(texture: AtlasTexture, layout: &AtlasLayout, padding: PaddingConfig) -> Self {
        Self::new(
            texture,
            layout.columns,
            layout.rows,
            layout.character_map(),
            true,
            padding,
        )
    }

    /// Whether `character` has its own cell (fallback is not considered)
    pub fn has_character(&self, character: char) -> bool {
        self.character_to_index.contains_key(&character)
    }

    /// Get glyph information for a character
    ///
    /// Unmapped characters resolve to the space glyph when the atlas has one,
    /// otherwise to [`GlyphDescriptor::invalid`].
    pub fn get_glyph(&self, character: char) -> GlyphDescriptor {
        let (character, index) = match self.character_to_index.get(&character) {
            Some(&index) => (character, index),
            None => match self.character_to_index.get(&' ') {
                Some(&space) => (' ', space),
                None => return GlyphDescriptor::invalid(),
            },
        };

        let grid_x = (index % self.columns) as f32;
        let grid_y = (index / self.columns) as f32;

        let (pad_u, pad_v) = self.uv_padding();

        let uv_left = grid_x * self.cell_width + pad_u;
        let uv_right = (grid_x + 1.0) * self.cell_width - pad_u;

        let (uv_bottom, uv_top) = if self.rows == 1 {
            // Single row strips use the full texture height, unpadded
            (0.0, 1.0)
        } else if self.flip_vertical {
            // Rows run top-to-bottom in the image, UV origin is bottom-left
            (
                1.0 - (grid_y + 1.0) * self.cell_height + pad_v,
                1.0 - grid_y * self.cell_height - pad_v,
            )
        } else {
            (
                grid_y * self.cell_height + pad_v,
                (grid_y + 1.0) * self.cell_height - pad_v,
            )
        };

        GlyphDescriptor::new(
            character,
            Vec2::new(uv_left, uv_bottom),
            Vec2::new(uv_right, uv_top),
        )
    }

    /// Padding in UV units (horizontal, vertical)
    fn uv_padding(&self) -> (f32, f32) {
        let pixels = self.padding.pixels_for(self.texture.width);
        let clamp = |texels: f32, extent: u32, cell: f32| {
            let limit = cell * MAX_PADDING_FRACTION;
            if extent == 0 {
                limit
            } else {
                (texels / extent as f32).min(limit)
            }
        };
        (
            clamp(pixels, self.texture.width, self.cell_width),
            clamp(pixels, self.texture.height, self.cell_height),
        )
    }

    /// Texture handle of the atlas image
    pub fn texture_handle(&self) -> TextureHandle {
        self.texture.handle
    }

    /// The atlas image
    pub fn texture(&self) -> AtlasTexture {
        self.texture
    }

    /// Grid dimensions (columns, rows)
    pub fn grid(&self) -> (u32, u32) {
        (self.columns, self.rows)
    }

    /// Number of mapped characters
    pub fn character_count(&self) -> usize {
        self.character_to_index.len()
    }

    /// Cell index of a mapped character
    pub fn index_of(&self, character: char) -> Option<u32> {
        self.character_to_index.get(&character).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::text::atlas_layout::{GRID_16, GRID_32, LEGACY_SINGLE_ROW};
    use approx::assert_relative_eq;

    fn texture(width: u32, height: u32) -> AtlasTexture {
        AtlasTexture {
            handle: TextureHandle(7),
            width,
            height,
        }
    }

    fn assert_contained(glyph: &GlyphDescriptor) {
        assert!(glyph.valid);
        assert!(0.0 <= glyph.uv_min.x && glyph.uv_min.x < glyph.uv_max.x && glyph.uv_max.x <= 1.0, "{:?}", glyph);
        assert!(0.0 <= glyph.uv_min.y && glyph.uv_min.y < glyph.uv_max.y && glyph.uv_max.y <= 1.0, "{:?}", glyph);
    }

    #[test]
    fn test_legacy_uppercase_a() {
        let atlas = FontAtlas::from_layout(texture(2415, 64), &LEGACY_SINGLE_ROW, PaddingConfig::default());
        assert_eq!(atlas.grid(), (69, 1));
        assert_eq!(atlas.index_of('A'), Some(33));

        let glyph = atlas.get_glyph('A');
        let pad = 4.0 / 2415.0;
        assert_relative_eq!(glyph.uv_min.x, 33.0 / 69.0 + pad, epsilon = 1e-6);
        assert_relative_eq!(glyph.uv_max.x, 34.0 / 69.0 - pad, epsilon = 1e-6);
        assert_eq!(glyph.uv_min.y, 0.0);
        assert_eq!(glyph.uv_max.y, 1.0);
        assert_eq!(glyph.width, 1.0);
        assert_eq!(glyph.height, 2.0);
    }

    #[test]
    fn test_grid_space_is_top_row_after_flip() {
        let atlas = FontAtlas::from_layout(texture(560, 1024), &GRID_16, PaddingConfig::default());
        let glyph = atlas.get_glyph(' ');

        let pad_u = 2.0 / 560.0;
        let pad_v = 2.0 / 1024.0;
        assert_relative_eq!(glyph.uv_min.x, pad_u, epsilon = 1e-6);
        assert_relative_eq!(glyph.uv_max.x, 1.0 / 16.0 - pad_u, epsilon = 1e-6);
        assert_relative_eq!(glyph.uv_max.y, 1.0 - pad_v, epsilon = 1e-6);
        assert_relative_eq!(glyph.uv_min.y, 1.0 - 1.0 / 16.0 + pad_v, epsilon = 1e-6);
    }

    #[test]
    fn test_unflipped_grid() {
        let mut mapping = HashMap::new();
        mapping.insert('x', 5);
        let atlas = FontAtlas::new(texture(4096, 4096), 4, 4, mapping, false, PaddingConfig::default());

        let glyph = atlas.get_glyph('x');
        let pad = 4.0 / 4096.0;
        assert_relative_eq!(glyph.uv_min.x, 0.25 + pad, epsilon = 1e-6);
        assert_relative_eq!(glyph.uv_min.y, 0.25 + pad, epsilon = 1e-6);
        assert_relative_eq!(glyph.uv_max.y, 0.5 - pad, epsilon = 1e-6);
    }

    #[test]
    fn test_fallback_to_space() {
        let mut mapping = HashMap::new();
        mapping.insert(' ', 0);
        mapping.insert('A', 33);
        let atlas = FontAtlas::new(texture(1120, 2048), 16, 16, mapping, true, PaddingConfig::default());

        let fallback = atlas.get_glyph('Ж');
        assert_eq!(fallback, atlas.get_glyph(' '));
        assert_ne!(fallback, atlas.get_glyph('A'));
        assert!(!atlas.has_character('Ж'));
    }

    #[test]
    fn test_missing_space_yields_invalid() {
        let mut mapping = HashMap::new();
        mapping.insert('A', 1);
        let atlas = FontAtlas::new(texture(64, 64), 16, 16, mapping, true, PaddingConfig::default());

        assert!(!atlas.get_glyph('B').valid);
        assert!(!atlas.get_glyph(' ').valid);
        assert!(atlas.get_glyph('A').valid);
    }

    #[test]
    fn test_out_of_grid_entries_dropped() {
        let mut mapping = HashMap::new();
        mapping.insert(' ', 0);
        mapping.insert('Z', 256);
        let atlas = FontAtlas::new(texture(560, 1024), 16, 16, mapping, true, PaddingConfig::default());

        assert!(!atlas.has_character('Z'));
        assert_eq!(atlas.character_count(), 1);
    }

    #[test]
    fn test_uv_containment_every_cell() {
        let cases = [
            (GRID_16, texture(560, 1024)),
            (GRID_16, texture(1120, 2048)),
            (GRID_16, texture(16, 16)),
            (GRID_32, texture(2240, 4096)),
            (GRID_32, texture(8, 8)),
            (LEGACY_SINGLE_ROW, texture(2415, 64)),
        ];

        for (layout, tex) in cases {
            let atlas = FontAtlas::from_layout(tex, &layout, PaddingConfig::default());
            for range in layout.ranges {
                for code in range.first..=range.last {
                    let ch = char::from_u32(code).unwrap();
                    assert_contained(&atlas.get_glyph(ch));
                }
            }
        }
    }

    #[test]
    fn test_small_grid_padding_never_inverts() {
        let mut mapping = HashMap::new();
        mapping.insert('a', 0);
        mapping.insert('b', 3);
        let atlas = FontAtlas::new(texture(4, 4), 2, 2, mapping, true, PaddingConfig::default());
        assert_contained(&atlas.get_glyph('a'));
        assert_contained(&atlas.get_glyph('b'));
    }

    #[test]
    fn test_zero_sized_texture_still_contained() {
        let atlas = FontAtlas::from_layout(texture(0, 0), &GRID_16, PaddingConfig::default());
        assert_contained(&atlas.get_glyph('A'));
    }
}

//! Text layout engine
//!
//! Converts label strings into positioned quads (vertices, UVs and indices).
//! Glyphs sit side by side at a fixed advance; there is no kerning, wrapping
//! or shaping.
//!
//! # Layout Coordinate System
//!
//! Labels lie flat on the floor plane:
//!
//! - Origin is the left edge of the first glyph
//! - +X runs along the text
//! - +Z is "up" on the label; Y is always 0

use super::font_asset::FontAsset;
use super::glyph::GlyphDescriptor;
use crate::foundation::math::{to_array2, to_array3, Vec2, Vec3};

/// Z of the tile floor relative to the label origin
const FLOOR_OFFSET: f32 = -0.4;

/// Lift applied to every glyph above the floor offset
const VERTICAL_PADDING: f32 = 0.1;

/// Vertices per glyph quad
pub const VERTICES_PER_GLYPH: usize = 4;

/// Indices per glyph quad (two triangles)
pub const INDICES_PER_GLYPH: usize = 6;

/// Geometry of one laid-out label
///
/// Glyph `i` owns vertices `[4i, 4i + 4)` in the order bottom-left,
/// top-left, top-right, bottom-right, and indices `[6i, 6i + 6)` forming
/// triangles `(0, 1, 2)` and `(0, 2, 3)` relative to its first vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelMesh {
    vertices: Vec<[f32; 3]>,
    uvs: Vec<[f32; 2]>,
    indices: Vec<u32>,
    width: f32,
}

impl LabelMesh {
    /// Vertex positions
    pub fn vertices(&self) -> &[[f32; 3]] {
        &self.vertices
    }

    /// Texture coordinates, parallel to [`vertices`](Self::vertices)
    pub fn uvs(&self) -> &[[f32; 2]] {
        &self.uvs
    }

    /// Triangle list indices
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Total advance width
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Number of glyph quads
    pub fn glyph_count(&self) -> usize {
        self.vertices.len() / VERTICES_PER_GLYPH
    }

    /// Vertex positions as raw bytes for GPU upload
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Texture coordinates as raw bytes for GPU upload
    pub fn uv_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.uvs)
    }

    /// Indices as raw bytes for GPU upload
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    fn with_capacity(glyphs: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(glyphs * VERTICES_PER_GLYPH),
            uvs: Vec::with_capacity(glyphs * VERTICES_PER_GLYPH),
            indices: Vec::with_capacity(glyphs * INDICES_PER_GLYPH),
            width: 0.0,
        }
    }

    fn push_glyph(&mut self, glyph: &GlyphDescriptor) {
        let x_min = self.width;
        let x_max = x_min + glyph.width;
        let bottom = FLOOR_OFFSET + VERTICAL_PADDING;
        let top = bottom + glyph.height;

        // Checked by the builder: glyph counts stay far below u32::MAX / 4
        #[allow(clippy::cast_possible_truncation)]
        let base = self.vertices.len() as u32;

        let positions: [Vec3; 4] = [
            Vec3::new(x_min, 0.0, bottom),
            Vec3::new(x_min, 0.0, top),
            Vec3::new(x_max, 0.0, top),
            Vec3::new(x_max, 0.0, bottom),
        ];
        self.vertices.extend(positions.into_iter().map(to_array3));

        let corners: [Vec2; 4] = [
            glyph.uv_bottom_left(),
            glyph.uv_top_left(),
            glyph.uv_top_right(),
            glyph.uv_bottom_right(),
        ];
        self.uvs.extend(corners.into_iter().map(to_array2));

        self.indices.extend_from_slice(&[
            base,
            base + 1,
            base + 2,
            base,
            base + 2,
            base + 3,
        ]);

        self.width = x_max;
    }
}

/// Lays label strings out into [`LabelMesh`]es
///
/// Stateless; caching is the job of [`MeshCache`](super::MeshCache).
#[derive(Debug, Clone, Copy, Default)]
pub struct TextMeshBuilder;

impl TextMeshBuilder {
    /// Largest number of characters laid out for one label
    pub const MAX_GLYPHS: usize = (u32::MAX as usize) / VERTICES_PER_GLYPH;

    /// Convert a text string into positioned quads
    ///
    /// Characters the font does not support are skipped (a space is always
    /// attempted so it can fall back to the font's blank cell). Returns
    /// `None` when nothing renderable remains, which callers treat as
    /// "draw nothing".
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use label_text::render::text::{FontAsset, TextMeshBuilder};
    /// # fn demo(font: &FontAsset) {
    /// let mesh = TextMeshBuilder::build(font, "KITCHEN").unwrap();
    /// assert_eq!(mesh.vertices().len(), 28); // 7 chars × 4 vertices
    /// assert_eq!(mesh.indices().len(), 42);  // 7 chars × 6 indices
    /// # }
    /// ```
    pub fn build(font: &FontAsset, text: &str) -> Option<LabelMesh> {
        if text.is_empty() {
            return None;
        }

        let mut mesh = LabelMesh::with_capacity(text.chars().count().min(Self::MAX_GLYPHS));

        for ch in text.chars() {
            if mesh.glyph_count() >= Self::MAX_GLYPHS {
                log::warn!("Label text truncated after {} glyphs", Self::MAX_GLYPHS);
                break;
            }

            if ch != ' ' && !font.supports_character(ch) {
                continue;
            }

            let glyph = font.get_glyph(ch);
            if !glyph.valid {
                continue;
            }

            mesh.push_glyph(&glyph);
        }

        if mesh.vertices.is_empty() {
            log::debug!("'{}' has no renderable glyphs in font '{}'", text, font.name());
            return None;
        }

        Some(mesh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{AtlasTexture, TextureHandle};
    use crate::config::PaddingConfig;
    use crate::render::text::atlas_layout::{GRID_16, LEGACY_SINGLE_ROW};
    use crate::render::text::FontAtlas;
    use approx::assert_relative_eq;

    fn font_with(layout: &crate::render::text::AtlasLayout, width: u32, height: u32) -> FontAsset {
        let texture = AtlasTexture {
            handle: TextureHandle(1),
            width,
            height,
        };
        FontAsset::from_atlas("Test", FontAtlas::from_layout(texture, layout, PaddingConfig::default()))
    }

    fn generic_font() -> FontAsset {
        font_with(&GRID_16, 1120, 2048)
    }

    #[test]
    fn test_two_glyphs() {
        let font = generic_font();
        let mesh = TextMeshBuilder::build(&font, "AB").unwrap();

        assert_eq!(mesh.vertices().len(), 8);
        assert_eq!(mesh.uvs().len(), 8);
        assert_eq!(mesh.indices().len(), 12);
        assert_eq!(mesh.glyph_count(), 2);
        assert_relative_eq!(mesh.width(), 2.0 * font.get_glyph('A').width);
    }

    #[test]
    fn test_quad_geometry_and_order() {
        let font = generic_font();
        let mesh = TextMeshBuilder::build(&font, "AB").unwrap();
        let glyph_b = font.get_glyph('B');

        let bottom = -0.4 + 0.1;
        let top = bottom + 2.0;
        let second = &mesh.vertices()[4..8];
        assert_relative_eq!(second[0][0], 1.0);
        assert_relative_eq!(second[0][2], bottom);
        assert_relative_eq!(second[1][2], top);
        assert_relative_eq!(second[2][0], 2.0);
        assert_relative_eq!(second[2][2], top);
        assert_relative_eq!(second[3][0], 2.0);
        assert_relative_eq!(second[3][2], bottom);
        assert!(mesh.vertices().iter().all(|v| v[1] == 0.0));

        assert_eq!(mesh.uvs()[4], to_array2(glyph_b.uv_bottom_left()));
        assert_eq!(mesh.uvs()[5], to_array2(glyph_b.uv_top_left()));
        assert_eq!(mesh.uvs()[6], to_array2(glyph_b.uv_top_right()));
        assert_eq!(mesh.uvs()[7], to_array2(glyph_b.uv_bottom_right()));

        assert_eq!(mesh.indices(), &[0, 1, 2, 0, 2, 3, 4, 5, 6, 4, 6, 7]);
    }

    #[test]
    fn test_triangles_stay_within_their_glyph() {
        let font = generic_font();
        let mesh = TextMeshBuilder::build(&font, "STORAGE ROOM 2").unwrap();

        assert_eq!(mesh.vertices().len(), 4 * mesh.glyph_count());
        assert_eq!(mesh.indices().len(), 6 * mesh.glyph_count());
        for (glyph, tri) in mesh.indices().chunks(6).enumerate() {
            let base = (glyph * 4) as u32;
            assert!(tri.iter().all(|&i| (base..base + 4).contains(&i)));
        }
    }

    #[test]
    fn test_deterministic() {
        let font = generic_font();
        let first = TextMeshBuilder::build(&font, "Спальня №1").unwrap();
        let second = TextMeshBuilder::build(&font, "Спальня №1").unwrap();

        assert_eq!(first.vertex_bytes(), second.vertex_bytes());
        assert_eq!(first.uv_bytes(), second.uv_bytes());
        assert_eq!(first.index_bytes(), second.index_bytes());
    }

    #[test]
    fn test_empty_text() {
        let font = generic_font();
        assert!(TextMeshBuilder::build(&font, "").is_none());
    }

    #[test]
    fn test_unsupported_characters_skipped() {
        let font = generic_font();
        // '№' and the CJK characters are not in the 16x16 table
        let mesh = TextMeshBuilder::build(&font, "A№B").unwrap();
        assert_eq!(mesh.glyph_count(), 2);

        assert!(TextMeshBuilder::build(&font, "倉庫").is_none());
    }

    #[test]
    fn test_spaces_advance() {
        let font = generic_font();
        let mesh = TextMeshBuilder::build(&font, "A B").unwrap();
        assert_eq!(mesh.glyph_count(), 3);
        assert_relative_eq!(mesh.width(), 3.0);
    }

    #[test]
    fn test_legacy_space_and_lowercase() {
        let font = font_with(&LEGACY_SINGLE_ROW, 2415, 64);
        let mesh = TextMeshBuilder::build(&font, "Bed room").unwrap();
        assert_eq!(mesh.glyph_count(), 8);
    }

    #[test]
    fn test_cyrillic_on_legacy_font() {
        let font = font_with(&LEGACY_SINGLE_ROW, 2415, 64);

        let glyph = font.get_glyph('Ж');
        assert_eq!(glyph, font.get_glyph(' '));
        assert_eq!(glyph.character, ' ');
        assert!(TextMeshBuilder::build(&font, "Ж").is_none());
    }

    #[test]
    fn test_unloaded_font_draws_nothing() {
        let font = FontAsset::new("Missing");
        assert!(TextMeshBuilder::build(&font, "HALL").is_none());
        assert!(TextMeshBuilder::build(&font, " ").is_none());
    }

    #[test]
    fn test_byte_views_match_lengths() {
        let font = generic_font();
        let mesh = TextMeshBuilder::build(&font, "ABC").unwrap();
        assert_eq!(mesh.vertex_bytes().len(), 12 * 3 * 4);
        assert_eq!(mesh.uv_bytes().len(), 12 * 2 * 4);
        assert_eq!(mesh.index_bytes().len(), 18 * 4);
    }
}

//! Label mesh cache
//!
//! Labels are redrawn every frame but their text rarely changes, so built
//! meshes are kept per `(font name, text)` together with their uploaded
//! GPU handle. Texts that produce no geometry are cached too, so they are
//! not rebuilt every frame either.
//!
//! Each font's entries remember the [`FontAsset::id`] they were built from.
//! When a different font instance shows up under the same name, the old
//! entries are released and rebuilt from the new atlas.

use std::collections::HashMap;

use super::font_asset::FontAsset;
use super::text_layout::{LabelMesh, TextMeshBuilder};
use crate::render::api::{MeshHandle, RenderResources};

/// A cached build result
#[derive(Debug, Clone, PartialEq)]
pub struct CachedLabelMesh {
    /// Geometry, `None` when the text has nothing to draw
    pub mesh: Option<LabelMesh>,
    /// GPU handle of the uploaded geometry
    pub handle: Option<MeshHandle>,
}

impl CachedLabelMesh {
    /// Advance width, 0 for empty results
    pub fn width(&self) -> f32 {
        self.mesh.as_ref().map_or(0.0, LabelMesh::width)
    }
}

#[derive(Debug)]
struct FontMeshes {
    font_id: u64,
    by_text: HashMap<String, CachedLabelMesh>,
}

/// Cache of built label meshes, keyed by font name then text
#[derive(Debug, Default)]
pub struct MeshCache {
    entries: HashMap<String, FontMeshes>,
    build_count: usize,
}

impl MeshCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached mesh for `text` in `font`, building and uploading it on a miss
    pub fn get_or_build(
        &mut self,
        resources: &mut dyn RenderResources,
        font: &FontAsset,
        text: &str,
    ) -> &CachedLabelMesh {
        let stale = self
            .entries
            .get(font.name())
            .is_some_and(|meshes| meshes.font_id != font.id());
        if stale {
            log::debug!("Font '{}' was replaced, dropping its cached meshes", font.name());
            self.clear_font(resources, font.name());
        }

        let cached = self
            .entries
            .get(font.name())
            .is_some_and(|meshes| meshes.by_text.contains_key(text));

        if !cached {
            let entry = self.build_entry(resources, font, text);
            self.entries
                .entry(font.name().to_string())
                .or_insert_with(|| FontMeshes {
                    font_id: font.id(),
                    by_text: HashMap::new(),
                })
                .by_text
                .insert(text.to_string(), entry);
        }

        &self.entries[font.name()].by_text[text]
    }

    fn build_entry(
        &mut self,
        resources: &mut dyn RenderResources,
        font: &FontAsset,
        text: &str,
    ) -> CachedLabelMesh {
        self.build_count += 1;
        let mesh = TextMeshBuilder::build(font, text);

        let handle = mesh.as_ref().and_then(|mesh| match resources.upload_mesh(mesh) {
            Ok(handle) => Some(handle),
            Err(e) => {
                log::warn!("Failed to upload mesh for '{}' in font '{}': {}", text, font.name(), e);
                None
            }
        });

        log::debug!(
            "Built label mesh for '{}' in font '{}' ({} glyphs)",
            text,
            font.name(),
            mesh.as_ref().map_or(0, LabelMesh::glyph_count)
        );

        CachedLabelMesh { mesh, handle }
    }

    /// Release every uploaded mesh and empty the cache
    pub fn clear(&mut self, resources: &mut dyn RenderResources) {
        let released: usize = self
            .entries
            .drain()
            .map(|(_, meshes)| Self::release_entries(resources, meshes.by_text))
            .sum();
        if released > 0 {
            log::debug!("Released {} cached label mesh(es)", released);
        }
    }

    /// Release and forget the meshes of a single font
    pub fn clear_font(&mut self, resources: &mut dyn RenderResources, font_name: &str) {
        if let Some(meshes) = self.entries.remove(font_name) {
            Self::release_entries(resources, meshes.by_text);
        }
    }

    fn release_entries(
        resources: &mut dyn RenderResources,
        by_text: HashMap<String, CachedLabelMesh>,
    ) -> usize {
        let mut released = 0;
        for handle in by_text.into_values().filter_map(|entry| entry.handle) {
            resources.release_mesh(handle);
            released += 1;
        }
        released
    }

    /// Number of cached entries, including empty results
    pub fn len(&self) -> usize {
        self.entries.values().map(|meshes| meshes.by_text.len()).sum()
    }

    /// Whether the cache holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.values().all(|meshes| meshes.by_text.is_empty())
    }

    /// Total builds performed since creation
    pub fn build_count(&self) -> usize {
        self.build_count
    }
}

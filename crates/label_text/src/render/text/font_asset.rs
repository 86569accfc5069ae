//! Loadable fonts
//!
//! A [`FontAsset`] is a named font backed by one atlas image. It is created
//! unloaded, initialized once against a [`ContentSource`], and from then on
//! answers glyph queries and hands out tinted materials. A font whose image
//! cannot be found stays unusable for its whole lifetime: every glyph is
//! invalid and no material is produced.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use thiserror::Error;

use super::atlas_layout::AtlasLayout;
use super::font_atlas::FontAtlas;
use super::glyph::GlyphDescriptor;
use super::text_material::create_unlit_text_material;
use crate::assets::{AtlasTexture, ContentSource};
use crate::config::LabelTextConfig;
use crate::foundation::{Color, ColorKey};
use crate::render::api::{MaterialHandle, RenderResources};

/// Font loading errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FontError {
    /// No atlas image at any candidate path
    #[error("No font texture found for '{name}' (tried {tried:?})")]
    TextureNotFound {
        /// Font name
        name: String,
        /// Content paths probed, in order
        tried: Vec<String>,
    },
}

/// Result type for font loading
pub type FontResult<T> = Result<T, FontError>;

#[derive(Debug)]
enum LoadState {
    Pending,
    Ready {
        atlas: FontAtlas,
        preview: Option<AtlasTexture>,
    },
    Failed,
}

static NEXT_FONT_ID: AtomicU64 = AtomicU64::new(1);

fn next_font_id() -> u64 {
    NEXT_FONT_ID.fetch_add(1, Ordering::Relaxed)
}

/// A named bitmap font
#[derive(Debug)]
pub struct FontAsset {
    id: u64,
    name: String,
    state: LoadState,
    materials: Mutex<HashMap<ColorKey, MaterialHandle>>,
}

impl FontAsset {
    /// Create an unloaded font
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: next_font_id(),
            name: name.into(),
            state: LoadState::Pending,
            materials: Mutex::new(HashMap::new()),
        }
    }

    /// Create a font around an already-built atlas
    pub fn from_atlas(name: impl Into<String>, atlas: FontAtlas) -> Self {
        Self {
            id: next_font_id(),
            name: name.into(),
            state: LoadState::Ready { atlas, preview: None },
            materials: Mutex::new(HashMap::new()),
        }
    }

    /// Content paths probed for the atlas image, in order
    pub fn candidate_paths(fonts_folder: &str, name: &str) -> [String; 4] {
        [
            format!("{fonts_folder}/{name}/Font"),
            name.to_string(),
            format!("{fonts_folder}/{name}/{name}"),
            format!("{fonts_folder}/{name}"),
        ]
    }

    /// Load the atlas image and build the glyph table
    ///
    /// Runs at most once: later calls (after success or failure) return the
    /// current usability without touching `content` again.
    pub fn initialize(&mut self, content: &dyn ContentSource, config: &LabelTextConfig) -> bool {
        if !matches!(self.state, LoadState::Pending) {
            return self.is_usable();
        }

        match Self::load(&self.name, content, config) {
            Ok((atlas, preview)) => {
                let (columns, rows) = atlas.grid();
                log::info!(
                    "Loaded font '{}' ({}x{} grid, {} characters{})",
                    self.name,
                    columns,
                    rows,
                    atlas.character_count(),
                    if preview.is_some() { ", with preview" } else { "" }
                );
                self.state = LoadState::Ready { atlas, preview };
                true
            }
            Err(e) => {
                log::error!("{}", e);
                self.state = LoadState::Failed;
                false
            }
        }
    }

    fn load(
        name: &str,
        content: &dyn ContentSource,
        config: &LabelTextConfig,
    ) -> FontResult<(FontAtlas, Option<AtlasTexture>)> {
        let candidates = Self::candidate_paths(&config.fonts_folder, name);

        let (position, texture) = candidates
            .iter()
            .enumerate()
            .find_map(|(i, path)| content.find_texture(path).map(|t| (i, t)))
            .ok_or_else(|| FontError::TextureNotFound {
                name: name.to_string(),
                tried: candidates.to_vec(),
            })?;

        // Only the structured folder layout carries a preview image
        let preview = if position == 0 {
            content.find_texture(&format!("{}/{name}/Preview", config.fonts_folder))
        } else {
            None
        };

        let layout = AtlasLayout::classify(
            texture.width,
            config.legacy_width_threshold,
            config.uses_extended_grid(name),
        );
        log::debug!(
            "Font '{}' found at '{}' ({}x{}), using {:?} layout",
            name,
            candidates[position],
            texture.width,
            texture.height,
            layout.kind
        );

        Ok((FontAtlas::from_layout(texture, &layout, config.padding), preview))
    }

    /// Font name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Process-unique id of this instance
    ///
    /// Two fonts registered under the same name in turn have different ids.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Whether initialization has run (successfully or not)
    pub fn is_initialized(&self) -> bool {
        !matches!(self.state, LoadState::Pending)
    }

    /// Whether the font has an atlas
    pub fn is_usable(&self) -> bool {
        matches!(self.state, LoadState::Ready { .. })
    }

    /// The atlas, when loaded
    pub fn atlas(&self) -> Option<&FontAtlas> {
        match &self.state {
            LoadState::Ready { atlas, .. } => Some(atlas),
            _ => None,
        }
    }

    /// Optional preview image shipped next to the atlas
    pub fn preview_texture(&self) -> Option<AtlasTexture> {
        match &self.state {
            LoadState::Ready { preview, .. } => *preview,
            _ => None,
        }
    }

    /// Whether `character` has its own atlas cell
    pub fn supports_character(&self, character: char) -> bool {
        self.atlas().is_some_and(|atlas| atlas.has_character(character))
    }

    /// Glyph for `character`, invalid when the font is unusable
    pub fn get_glyph(&self, character: char) -> GlyphDescriptor {
        self.atlas()
            .map_or_else(GlyphDescriptor::invalid, |atlas| atlas.get_glyph(character))
    }

    /// Tinted label material for this font
    ///
    /// `opacity` replaces the color's alpha (clamped to 0-1). Materials are
    /// cached per resulting color, so repeated calls with the same tint
    /// return the same handle.
    pub fn get_material(
        &self,
        resources: &mut dyn RenderResources,
        color: Color,
        opacity: f32,
    ) -> Option<MaterialHandle> {
        let atlas = self.atlas()?;
        let tint = color.with_alpha(opacity);
        let key = tint.key();

        let mut materials = self.lock_materials();
        if let Some(&handle) = materials.get(&key) {
            return Some(handle);
        }

        let material = create_unlit_text_material(atlas.texture_handle(), tint);
        match resources.create_material(&material) {
            Ok(handle) => {
                log::debug!("Created material {:?} for font '{}' ({:?})", handle, self.name, tint);
                materials.insert(key, handle);
                Some(handle)
            }
            Err(e) => {
                log::warn!("Failed to create material for font '{}': {}", self.name, e);
                None
            }
        }
    }

    /// Release and forget every cached material
    pub fn reset_materials(&self, resources: &mut dyn RenderResources) {
        let mut materials = self.lock_materials();
        if materials.is_empty() {
            return;
        }

        log::debug!("Releasing {} material(s) for font '{}'", materials.len(), self.name);
        for (_, handle) in materials.drain() {
            resources.release_material(handle);
        }
    }

    /// Number of cached materials
    pub fn cached_material_count(&self) -> usize {
        self.lock_materials().len()
    }

    fn lock_materials(&self) -> MutexGuard<'_, HashMap<ColorKey, MaterialHandle>> {
        self.materials.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::MemoryContent;
    use crate::render::api::HeadlessResources;
    use crate::render::text::atlas_layout::LayoutKind;

    fn load(content: &MemoryContent, name: &str, config: &LabelTextConfig) -> FontAsset {
        let mut font = FontAsset::new(name);
        font.initialize(content, config);
        font
    }

    #[test]
    fn test_structured_path_with_preview() {
        let content = MemoryContent::new()
            .with_texture("Fonts/Classic/Font", 560, 1024)
            .with_texture("Fonts/Classic/Preview", 256, 64);
        let font = load(&content, "Classic", &LabelTextConfig::default());

        assert!(font.is_usable());
        assert_eq!(font.preview_texture().map(|t| t.width), Some(256));
        assert_eq!(font.atlas().unwrap().grid(), (16, 16));
        assert!(font.supports_character('Ж'));
    }

    #[test]
    fn test_legacy_flat_path() {
        let content = MemoryContent::new()
            .with_texture("Consolas", 2415, 64)
            .with_texture("Fonts/Consolas/Preview", 256, 64);
        let font = load(&content, "Consolas", &LabelTextConfig::default());

        assert!(font.is_usable());
        assert_eq!(font.atlas().unwrap().grid(), (69, 1));
        // Preview only accompanies the structured layout
        assert!(font.preview_texture().is_none());
        assert!(font.supports_character('a'));
        assert!(!font.supports_character('é'));
    }

    #[test]
    fn test_remaining_candidate_paths() {
        let content = MemoryContent::new()
            .with_texture("Fonts/Medieval/Medieval", 560, 1024)
            .with_texture("Fonts/Runic", 560, 1024);

        assert!(load(&content, "Medieval", &LabelTextConfig::default()).is_usable());
        assert!(load(&content, "Runic", &LabelTextConfig::default()).is_usable());
    }

    #[test]
    fn test_extended_grid_from_config() {
        let content = MemoryContent::new().with_texture("Fonts/Wide/Font", 2240, 4096);
        let mut config = LabelTextConfig::default();

        let font = load(&content, "Wide", &config);
        assert_eq!(font.atlas().unwrap().grid(), (69, 1));

        config.extended_grid_fonts.push("Wide".to_string());
        let font = load(&content, "Wide", &config);
        let atlas = font.atlas().unwrap();
        assert_eq!(atlas.grid(), (32, 32));
        assert!(atlas.has_character('Ё'));
        assert_eq!(
            AtlasLayout::classify(2240, 2000, config.uses_extended_grid("Wide")).kind,
            LayoutKind::Grid32
        );
    }

    #[test]
    fn test_missing_texture_is_permanent() {
        let content = MemoryContent::new();
        let config = LabelTextConfig::default();
        let mut font = FontAsset::new("Ghost");

        assert!(!font.initialize(&content, &config));
        assert!(font.is_initialized());
        assert!(!font.get_glyph('A').valid);
        assert!(!font.supports_character('A'));

        // Not retried even once the image shows up
        content.insert("Fonts/Ghost/Font", 560, 1024);
        assert!(!font.initialize(&content, &config));

        let mut resources = HeadlessResources::new();
        assert!(font.get_material(&mut resources, Color::WHITE, 1.0).is_none());
        assert_eq!(resources.materials_created(), 0);
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let content = MemoryContent::new().with_texture("Fonts/Classic/Font", 560, 1024);
        let config = LabelTextConfig::default();
        let mut font = FontAsset::new("Classic");

        assert!(font.initialize(&content, &config));
        let before = font.get_glyph('Q');
        content.remove("Fonts/Classic/Font");
        assert!(font.initialize(&content, &config));
        assert_eq!(font.get_glyph('Q'), before);
    }

    #[test]
    fn test_material_cache_by_color_and_opacity() {
        let content = MemoryContent::new().with_texture("Fonts/Classic/Font", 560, 1024);
        let font = load(&content, "Classic", &LabelTextConfig::default());
        let mut resources = HeadlessResources::new();

        let white = font.get_material(&mut resources, Color::WHITE, 1.0).unwrap();
        let again = font.get_material(&mut resources, Color::WHITE, 1.0).unwrap();
        let faded = font.get_material(&mut resources, Color::WHITE, 0.5).unwrap();
        let red = font.get_material(&mut resources, Color::rgb(1.0, 0.0, 0.0), 1.0).unwrap();

        assert_eq!(white, again);
        assert_ne!(white, faded);
        assert_ne!(white, red);
        assert_eq!(resources.materials_created(), 3);
        assert_eq!(font.cached_material_count(), 3);

        let material = resources.material(faded).unwrap();
        assert_eq!(material.color.a, 0.5);
        assert_eq!(material.texture, font.atlas().unwrap().texture_handle());
    }

    #[test]
    fn test_opacity_is_clamped() {
        let content = MemoryContent::new().with_texture("Fonts/Classic/Font", 560, 1024);
        let font = load(&content, "Classic", &LabelTextConfig::default());
        let mut resources = HeadlessResources::new();

        let over = font.get_material(&mut resources, Color::WHITE, 3.0).unwrap();
        let full = font.get_material(&mut resources, Color::WHITE, 1.0).unwrap();
        assert_eq!(over, full);
    }

    #[test]
    fn test_reset_materials_releases_everything() {
        let content = MemoryContent::new().with_texture("Fonts/Classic/Font", 560, 1024);
        let font = load(&content, "Classic", &LabelTextConfig::default());
        let mut resources = HeadlessResources::new();

        font.get_material(&mut resources, Color::WHITE, 1.0);
        font.get_material(&mut resources, Color::BLACK, 0.3);
        assert_eq!(resources.live_materials(), 2);

        font.reset_materials(&mut resources);
        assert_eq!(resources.live_materials(), 0);
        assert_eq!(font.cached_material_count(), 0);

        // Next request creates a fresh material
        font.get_material(&mut resources, Color::WHITE, 1.0);
        assert_eq!(resources.materials_created(), 3);
    }

    #[test]
    fn test_ids_are_unique_per_instance() {
        let first = FontAsset::new("Classic");
        let second = FontAsset::new("Classic");
        assert_ne!(first.id(), second.id());
    }

    #[test]
    fn test_backend_failure_is_not_cached() {
        let content = MemoryContent::new().with_texture("Fonts/Classic/Font", 560, 1024);
        let font = load(&content, "Classic", &LabelTextConfig::default());
        let mut resources = HeadlessResources::new();

        resources.set_fail_creation(true);
        assert!(font.get_material(&mut resources, Color::WHITE, 1.0).is_none());
        assert_eq!(font.cached_material_count(), 0);

        resources.set_fail_creation(false);
        assert!(font.get_material(&mut resources, Color::WHITE, 1.0).is_some());
    }
}

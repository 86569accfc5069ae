//! In-memory content source
//!
//! Holds synthetic texture entries (path plus dimensions) without any pixel
//! data. Used when atlases are already resident elsewhere, and by tests.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use super::{normalize_content_path, AtlasTexture, ContentSource, TextureHandle};

struct MemoryTextures {
    by_path: BTreeMap<String, AtlasTexture>,
    next_handle: u32,
}

/// Content source backed by a path → texture table
pub struct MemoryContent {
    textures: RwLock<MemoryTextures>,
}

impl MemoryContent {
    /// Create an empty source
    pub fn new() -> Self {
        Self {
            textures: RwLock::new(MemoryTextures {
                by_path: BTreeMap::new(),
                next_handle: 1,
            }),
        }
    }

    /// Builder form of [`insert`](Self::insert)
    #[must_use]
    pub fn with_texture(self, path: &str, width: u32, height: u32) -> Self {
        self.insert(path, width, height);
        self
    }

    /// Register (or replace) a texture at `path`
    pub fn insert(&self, path: &str, width: u32, height: u32) -> TextureHandle {
        let mut textures = self.textures.write().unwrap_or_else(PoisonError::into_inner);
        let handle = TextureHandle(textures.next_handle);
        textures.next_handle += 1;
        textures.by_path.insert(
            normalize_content_path(path),
            AtlasTexture {
                handle,
                width,
                height,
            },
        );
        handle
    }

    /// Remove the texture at `path`, returning whether it existed
    pub fn remove(&self, path: &str) -> bool {
        let mut textures = self.textures.write().unwrap_or_else(PoisonError::into_inner);
        textures.by_path.remove(&normalize_content_path(path)).is_some()
    }

    /// Number of registered textures
    pub fn len(&self) -> usize {
        let textures = self.textures.read().unwrap_or_else(PoisonError::into_inner);
        textures.by_path.len()
    }

    /// Check if no textures are registered
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryContent {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentSource for MemoryContent {
    fn find_texture(&self, path: &str) -> Option<AtlasTexture> {
        let textures = self.textures.read().unwrap_or_else(PoisonError::into_inner);
        textures.by_path.get(&normalize_content_path(path)).copied()
    }

    fn textures_in_folder(&self, folder: &str) -> Vec<(String, AtlasTexture)> {
        let prefix = format!("{}/", normalize_content_path(folder));
        let textures = self.textures.read().unwrap_or_else(PoisonError::into_inner);
        textures
            .by_path
            .iter()
            .filter(|(path, _)| path.starts_with(&prefix))
            .map(|(path, texture)| (path.clone(), *texture))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_find() {
        let content = MemoryContent::new().with_texture("Fonts/Classic/Font", 1120, 2048);
        let texture = content.find_texture("Fonts/Classic/Font").unwrap();
        assert_eq!((texture.width, texture.height), (1120, 2048));
        assert!(content.find_texture("Fonts/Classic/Preview").is_none());
    }

    #[test]
    fn test_folder_listing_respects_prefix() {
        let content = MemoryContent::new()
            .with_texture("Fonts/B/Font", 16, 16)
            .with_texture("Fonts/A/Font", 16, 16)
            .with_texture("FontsExtra/C/Font", 16, 16)
            .with_texture("Consolas", 2415, 64);

        let paths: Vec<String> = content
            .textures_in_folder("Fonts")
            .into_iter()
            .map(|(path, _)| path)
            .collect();
        assert_eq!(paths, vec!["Fonts/A/Font".to_string(), "Fonts/B/Font".to_string()]);
    }

    #[test]
    fn test_remove() {
        let content = MemoryContent::new().with_texture("Fonts/A/Font", 16, 16);
        assert!(content.remove("Fonts/A/Font"));
        assert!(!content.remove("Fonts/A/Font"));
        assert!(content.is_empty());
    }
}

//! Filesystem-backed content source
//!
//! Maps content paths onto PNG files below a root directory:
//! `Fonts/Classic/Font` resolves to `{root}/Fonts/Classic/Font.png`.
//! Decoded images are kept so a renderer can fetch pixels by handle when
//! it uploads the atlas.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use super::{normalize_content_path, AtlasTexture, ContentError, ContentSource, ImageData, TextureHandle};

const IMAGE_EXTENSION: &str = "png";

#[derive(Default)]
struct LoadedTextures {
    by_path: HashMap<String, AtlasTexture>,
    images: HashMap<TextureHandle, Arc<ImageData>>,
    next_handle: u32,
}

/// Content source reading PNG atlases from a directory tree
pub struct DirectoryContent {
    root: PathBuf,
    loaded: Mutex<LoadedTextures>,
}

impl DirectoryContent {
    /// Create a source rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            loaded: Mutex::new(LoadedTextures {
                next_handle: 1, // Start from 1, reserve 0 for "no texture"
                ..Default::default()
            }),
        }
    }

    /// Root directory of this source
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Decoded pixels for a texture this source issued
    pub fn image_data(&self, handle: TextureHandle) -> Option<Arc<ImageData>> {
        let loaded = self.loaded.lock().unwrap_or_else(PoisonError::into_inner);
        loaded.images.get(&handle).cloned()
    }

    /// Number of textures decoded so far
    pub fn loaded_count(&self) -> usize {
        let loaded = self.loaded.lock().unwrap_or_else(PoisonError::into_inner);
        loaded.images.len()
    }

    fn dir_for(&self, content_path: &str) -> PathBuf {
        let mut dir = self.root.clone();
        dir.extend(content_path.split('/').filter(|segment| !segment.is_empty()));
        dir
    }

    fn file_for(&self, content_path: &str) -> PathBuf {
        let mut file = self.dir_for(content_path);
        if let Some(name) = file.file_name().and_then(|n| n.to_str()).map(str::to_owned) {
            file.set_file_name(format!("{name}.{IMAGE_EXTENSION}"));
        }
        file
    }

    fn content_path_for(&self, file: &Path) -> Option<String> {
        let relative = file.strip_prefix(&self.root).ok()?.with_extension("");
        let segments: Vec<&str> = relative
            .components()
            .map(|c| c.as_os_str().to_str())
            .collect::<Option<_>>()?;
        Some(segments.join("/"))
    }

    fn collect_images(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), ContentError> {
        let mut entries = std::fs::read_dir(dir)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<Result<Vec<_>, _>>()?;
        entries.sort();

        for path in entries {
            if path.is_dir() {
                Self::collect_images(&path, out)?;
            } else if path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case(IMAGE_EXTENSION))
            {
                out.push(path);
            }
        }
        Ok(())
    }
}

impl ContentSource for DirectoryContent {
    fn find_texture(&self, path: &str) -> Option<AtlasTexture> {
        let content_path = normalize_content_path(path);
        if content_path.is_empty() {
            return None;
        }

        let mut loaded = self.loaded.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(texture) = loaded.by_path.get(&content_path) {
            return Some(*texture);
        }

        let file = self.file_for(&content_path);
        if !file.is_file() {
            log::trace!("No texture at {:?}", file);
            return None;
        }

        let image = match ImageData::from_file(&file) {
            Ok(image) => image,
            Err(e) => {
                log::warn!("Skipping unreadable texture '{}': {}", content_path, e);
                return None;
            }
        };

        let handle = TextureHandle(loaded.next_handle);
        loaded.next_handle += 1;

        let texture = AtlasTexture {
            handle,
            width: image.width,
            height: image.height,
        };
        loaded.by_path.insert(content_path, texture);
        loaded.images.insert(handle, Arc::new(image));

        Some(texture)
    }

    fn textures_in_folder(&self, folder: &str) -> Vec<(String, AtlasTexture)> {
        let dir = self.dir_for(&normalize_content_path(folder));
        if !dir.is_dir() {
            log::debug!("Content folder {:?} does not exist", dir);
            return Vec::new();
        }

        let mut files = Vec::new();
        if let Err(e) = Self::collect_images(&dir, &mut files) {
            log::warn!("Failed to scan content folder {:?}: {}", dir, e);
        }

        files
            .iter()
            .filter_map(|file| self.content_path_for(file))
            .filter_map(|path| self.find_texture(&path).map(|texture| (path, texture)))
            .collect()
    }
}

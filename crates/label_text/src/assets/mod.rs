//! Asset lookup for font atlases
//!
//! Fonts never touch the filesystem directly. They ask a [`ContentSource`]
//! for textures by content path: `/`-separated, relative to the content
//! root and without a file extension (`Fonts/Classic/Font`). The source
//! answers with an [`AtlasTexture`]: an opaque texture handle plus the
//! pixel dimensions that layout detection and UV padding depend on.

pub mod directory;
pub mod image_loader;
pub mod memory;

pub use directory::DirectoryContent;
pub use image_loader::ImageData;
pub use memory::MemoryContent;

use thiserror::Error;

/// Handle for a texture owned by a content source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureHandle(pub u32);

/// A texture found by a content source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtlasTexture {
    /// Texture handle, resolvable through the source that issued it
    pub handle: TextureHandle,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

/// Texture lookup by content path
///
/// Lookups are infallible at this boundary: a missing or unreadable texture
/// is `None` (implementations log why).
pub trait ContentSource: Send + Sync {
    /// Find a single texture by content path
    fn find_texture(&self, path: &str) -> Option<AtlasTexture>;

    /// Every texture under `folder`, recursively, as `(content path, texture)`
    /// in a stable order
    fn textures_in_folder(&self, folder: &str) -> Vec<(String, AtlasTexture)>;
}

/// Content loading errors
#[derive(Error, Debug)]
pub enum ContentError {
    /// Image could not be decoded
    #[error("Failed to decode image {path}: {message}")]
    Decode {
        /// File the image came from
        path: String,
        /// Decoder message
        message: String,
    },

    /// IO error while scanning content folders
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Normalize a content path: forward slashes, no leading/trailing separator
pub(crate) fn normalize_content_path(path: &str) -> String {
    path.split(['/', '\\'])
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_content_path() {
        assert_eq!(normalize_content_path("Fonts/Classic/Font"), "Fonts/Classic/Font");
        assert_eq!(normalize_content_path("/Fonts//Classic/"), "Fonts/Classic");
        assert_eq!(normalize_content_path("Fonts\\Classic\\Font"), "Fonts/Classic/Font");
        assert_eq!(normalize_content_path(""), "");
    }
}

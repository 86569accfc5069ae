//! # Label Text
//!
//! Bitmap-font text for floor labels on a tile grid.
//!
//! ## Features
//!
//! - **Font Atlases**: Single-row legacy strips and 16×16 / 32×32 grids
//! - **Font Discovery**: Fonts found by folder scan and known-name probing
//! - **Mesh Assembly**: Fixed-advance quads laid flat on the floor plane
//! - **Caching**: Materials per tint and meshes per `(font, text)`, released explicitly
//! - **Backend Agnostic**: GPU objects go through the [`render::RenderResources`] trait
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use label_text::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     label_text::foundation::logging::init();
//!
//!     let config = LabelTextConfig::load_from_file("labels.toml")?;
//!     let content = Arc::new(DirectoryContent::new("Textures"));
//!     let registry = FontRegistry::new(config, content);
//!
//!     let mut labels = LabelTextSystem::new(registry, HeadlessResources::new());
//!     if let Some(draw) = labels.request_label_mesh(None, "STORAGE", None) {
//!         println!("{} vertices", draw.mesh.vertices().len());
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]

pub mod assets;
pub mod config;
pub mod foundation;
pub mod labels;
pub mod render;

/// Common imports for crate users
pub mod prelude {
    pub use crate::{
        assets::{AtlasTexture, ContentSource, DirectoryContent, MemoryContent, TextureHandle},
        config::{Config, LabelTextConfig},
        foundation::Color,
        labels::{LabelDraw, LabelTextSystem},
        render::{
            text::{FontAsset, FontRegistry, LabelMesh, MeshCache, TextMeshBuilder},
            HeadlessResources, MaterialHandle, MeshHandle, RenderResources,
        },
    };
}

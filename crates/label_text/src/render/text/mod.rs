//! Text rendering system
//!
//! Bitmap-font labels laid flat on the floor plane.
//!
//! # Architecture
//!
//! - [`FontAtlas`]: Grid-packed font texture plus character table
//! - [`FontAsset`]: Named font loaded from a content source, owns its materials
//! - [`FontRegistry`]: Font discovery and default selection
//! - [`TextMeshBuilder`]: Converts strings to positioned quads
//! - [`MeshCache`]: Built meshes per `(font, text)`
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use label_text::assets::DirectoryContent;
//! use label_text::config::LabelTextConfig;
//! use label_text::render::text::{FontRegistry, TextMeshBuilder};
//!
//! let content = Arc::new(DirectoryContent::new("Textures"));
//! let registry = FontRegistry::new(LabelTextConfig::default(), content);
//!
//! if let Some(font) = registry.default_font() {
//!     let mesh = TextMeshBuilder::build(&font, "KITCHEN");
//!     println!("{:?}", mesh.map(|m| m.width()));
//! }
//! ```

pub mod atlas_layout;
mod font_asset;
mod font_atlas;
mod font_registry;
mod glyph;
mod mesh_cache;
mod text_layout;
mod text_material;

pub use atlas_layout::{AtlasLayout, CodeRange, LayoutKind, GRID_16, GRID_32, LEGACY_SINGLE_ROW};
pub use font_asset::{FontAsset, FontError, FontResult};
pub use font_atlas::FontAtlas;
pub use font_registry::FontRegistry;
pub use glyph::{GlyphDescriptor, GLYPH_HEIGHT, GLYPH_WIDTH};
pub use mesh_cache::{CachedLabelMesh, MeshCache};
pub use text_layout::{LabelMesh, TextMeshBuilder, INDICES_PER_GLYPH, VERTICES_PER_GLYPH};
pub use text_material::{create_unlit_text_material, BlendMode, TextMaterial};

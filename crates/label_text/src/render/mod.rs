//! # Rendering System
//!
//! Backend-agnostic label rendering: font atlases and label geometry are
//! built here, while GPU objects are created through [`RenderResources`].
//!
//! ## Architecture
//!
//! - **api**: Resource handles, the [`RenderResources`] trait and a headless backend
//! - **text**: Fonts, glyph lookup, mesh assembly and caching

pub mod api;
pub mod text;

pub use api::{BackendResult, HeadlessResources, MaterialHandle, MeshHandle, RenderResources};

use thiserror::Error;

/// High-level rendering error types
///
/// Represents errors a backend can report while creating resources,
/// abstracted from specific graphics API error types.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Resource creation or management failed
    ///
    /// Occurs when GPU resources (buffers, textures) cannot be created,
    /// typically due to memory constraints or invalid data.
    #[error("Resource creation failed: {0}")]
    ResourceCreationFailed(String),
}

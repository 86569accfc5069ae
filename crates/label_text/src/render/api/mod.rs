//! Public rendering API
//!
//! The label engine never talks to a graphics API itself. It describes
//! materials and meshes, and a [`RenderResources`] implementation turns
//! them into GPU objects behind opaque handles.

pub mod headless;
pub mod render_backend;

// Re-export commonly used types
pub use headless::HeadlessResources;
pub use render_backend::{BackendResult, MaterialHandle, MeshHandle, RenderResources};

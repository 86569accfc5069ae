//! Backend abstraction traits for label resources
//!
//! This module defines the trait that rendering backends implement so the
//! label engine can create and release GPU-side materials and meshes.

use crate::render::text::{LabelMesh, TextMaterial};
use crate::render::RenderError;

/// Result type for backend operations
pub type BackendResult<T> = Result<T, RenderError>;

/// Handle to a mesh resource stored in the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub u64);

/// Handle to a material resource stored in the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialHandle(pub u64);

/// GPU resource creation and release
///
/// The backend is passed explicitly to every call that may create or
/// release resources. Every handle returned by `create_*`/`upload_*` is
/// released exactly once by its owner (material caches and mesh caches).
pub trait RenderResources {
    /// Create a material resource and return an opaque handle
    fn create_material(&mut self, material: &TextMaterial) -> BackendResult<MaterialHandle>;

    /// Release a material created by [`create_material`](Self::create_material)
    fn release_material(&mut self, handle: MaterialHandle);

    /// Upload label geometry and return an opaque handle
    fn upload_mesh(&mut self, mesh: &LabelMesh) -> BackendResult<MeshHandle>;

    /// Release a mesh created by [`upload_mesh`](Self::upload_mesh)
    fn release_mesh(&mut self, handle: MeshHandle);
}

impl<R: RenderResources + ?Sized> RenderResources for &mut R {
    fn create_material(&mut self, material: &TextMaterial) -> BackendResult<MaterialHandle> {
        (**self).create_material(material)
    }

    fn release_material(&mut self, handle: MaterialHandle) {
        (**self).release_material(handle);
    }

    fn upload_mesh(&mut self, mesh: &LabelMesh) -> BackendResult<MeshHandle> {
        (**self).upload_mesh(mesh)
    }

    fn release_mesh(&mut self, handle: MeshHandle) {
        (**self).release_mesh(handle);
    }
}

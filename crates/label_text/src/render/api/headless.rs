//! Headless resource backend
//!
//! Keeps materials and meshes in host memory and hands out sequential
//! handles. Used by tools that only need geometry, and by tests to check
//! that every created resource is released exactly once.

use std::collections::HashMap;

use super::render_backend::{BackendResult, MaterialHandle, MeshHandle, RenderResources};
use crate::render::text::{LabelMesh, TextMaterial};
use crate::render::RenderError;

/// Summary of an uploaded mesh
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshRecord {
    /// Vertex count
    pub vertex_count: usize,
    /// Index count
    pub index_count: usize,
    /// Advance width
    pub width: f32,
}

/// In-memory [`RenderResources`] implementation
#[derive(Debug)]
pub struct HeadlessResources {
    materials: HashMap<MaterialHandle, TextMaterial>,
    meshes: HashMap<MeshHandle, MeshRecord>,
    next_handle: u64,
    materials_created: usize,
    meshes_uploaded: usize,
    fail_creation: bool,
}

impl HeadlessResources {
    /// Create an empty backend
    pub fn new() -> Self {
        Self {
            materials: HashMap::new(),
            meshes: HashMap::new(),
            next_handle: 1, // Start at 1, 0 is reserved for invalid
            materials_created: 0,
            meshes_uploaded: 0,
            fail_creation: false,
        }
    }

    /// Make every subsequent create/upload fail
    pub fn set_fail_creation(&mut self, fail: bool) {
        self.fail_creation = fail;
    }

    /// Look up a live material
    pub fn material(&self, handle: MaterialHandle) -> Option<&TextMaterial> {
        self.materials.get(&handle)
    }

    /// Look up a live mesh
    pub fn mesh(&self, handle: MeshHandle) -> Option<&MeshRecord> {
        self.meshes.get(&handle)
    }

    /// Materials created and not yet released
    pub fn live_materials(&self) -> usize {
        self.materials.len()
    }

    /// Meshes uploaded and not yet released
    pub fn live_meshes(&self) -> usize {
        self.meshes.len()
    }

    /// Total materials ever created
    pub fn materials_created(&self) -> usize {
        self.materials_created
    }

    /// Total meshes ever uploaded
    pub fn meshes_uploaded(&self) -> usize {
        self.meshes_uploaded
    }

    fn allocate(&mut self) -> u64 {
        let handle = self.next_handle;
        self.next_handle += 1;
        handle
    }
}

impl Default for HeadlessResources {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderResources for HeadlessResources {
    fn create_material(&mut self, material: &TextMaterial) -> BackendResult<MaterialHandle> {
        if self.fail_creation {
            return Err(RenderError::ResourceCreationFailed("material creation disabled".to_string()));
        }

        let handle = MaterialHandle(self.allocate());
        self.materials.insert(handle, *material);
        self.materials_created += 1;
        log::trace!("Created material {:?} for texture {:?}", handle, material.texture);
        Ok(handle)
    }

    fn release_material(&mut self, handle: MaterialHandle) {
        if self.materials.remove(&handle).is_none() {
            log::warn!("Release of unknown material {:?}", handle);
        }
    }

    fn upload_mesh(&mut self, mesh: &LabelMesh) -> BackendResult<MeshHandle> {
        if self.fail_creation {
            return Err(RenderError::ResourceCreationFailed("mesh upload disabled".to_string()));
        }

        let handle = MeshHandle(self.allocate());
        self.meshes.insert(
            handle,
            MeshRecord {
                vertex_count: mesh.vertices().len(),
                index_count: mesh.indices().len(),
                width: mesh.width(),
            },
        );
        self.meshes_uploaded += 1;
        log::trace!("Uploaded mesh {:?} ({} vertices)", handle, mesh.vertices().len());
        Ok(handle)
    }

    fn release_mesh(&mut self, handle: MeshHandle) {
        if self.meshes.remove(&handle).is_none() {
            log::warn!("Release of unknown mesh {:?}", handle);
        }
    }
}

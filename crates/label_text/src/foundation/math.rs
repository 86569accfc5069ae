//! Math utilities and types
//!
//! Fixed-size vector aliases used by glyph descriptors and label meshes.

pub use nalgebra::{Vector2, Vector3, Vector4};

/// 2D vector type (texture space)
pub type Vec2 = Vector2<f32>;

/// 3D vector type (label-local space)
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// Flatten a 2D vector for GPU-facing buffers
#[inline]
pub fn to_array2(v: Vec2) -> [f32; 2] {
    [v.x, v.y]
}

/// Flatten a 3D vector for GPU-facing buffers
#[inline]
pub fn to_array3(v: Vec3) -> [f32; 3] {
    [v.x, v.y, v.z]
}

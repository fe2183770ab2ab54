//! GPU-facing camera block
//!
//! Plain-old-data layout matching a std140 uniform with two `mat4` and a
//! `vec4`. Matrices are stored column-major, as the shaders expect.

use bytemuck::{Pod, Zeroable};

use crate::foundation::math::{Mat4, Vec3};

/// Camera matrices packed for upload by the renderer
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct CameraUniform {
    /// World-to-view matrix, column-major
    pub view: [[f32; 4]; 4],
    /// View-to-clip matrix, column-major
    pub projection: [[f32; 4]; 4],
    /// Eye position; `w` is always 1
    pub position: [f32; 4],
}

impl CameraUniform {
    /// Pack matrices and eye position
    pub fn new(view: &Mat4, projection: &Mat4, position: &Vec3) -> Self {
        Self {
            view: (*view).into(),
            projection: (*projection).into(),
            position: [position.x, position.y, position.z, 1.0],
        }
    }

    /// Raw bytes for a buffer write
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

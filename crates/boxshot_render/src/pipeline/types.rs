//! GPU-compatible data types for the box pipeline
//!
//! These types are designed to match the shader layouts in `box.wgsl` exactly.
//! All types derive Pod and Zeroable for safe GPU buffer operations.

use bytemuck::{Pod, Zeroable};
use boxshot_math::mat4;

/// A mesh vertex with its face normal
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex {
    pub const fn new(position: [f32; 3], normal: [f32; 3]) -> Self {
        Self { position, normal }
    }
}

/// Per-instance data: one drawn box
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct InstanceData {
    /// Model matrix (column-major)
    pub model: [[f32; 4]; 4],
    /// RGBA color
    pub color: [f32; 4],
}

impl InstanceData {
    pub fn new(model: [[f32; 4]; 4], color: [f32; 4]) -> Self {
        Self { model, color }
    }
}

/// Frame uniforms
/// Layout: 112 bytes total (must match box.wgsl Uniforms)
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct RenderUniforms {
    /// Projection * view (64 bytes)
    pub view_proj: [[f32; 4]; 4],
    /// Direction the light travels (normalized) + padding (16 bytes)
    pub light_dir: [f32; 3],
    pub _padding0: f32,
    /// Directional light color + padding (16 bytes)
    pub light_color: [f32; 3],
    pub _padding1: f32,
    /// Ambient light color + padding (16 bytes)
    pub ambient_color: [f32; 3],
    pub _padding2: f32,
}

impl RenderUniforms {
    pub fn new(view_proj: [[f32; 4]; 4], light_dir: [f32; 3], light_color: [f32; 3], ambient_color: [f32; 3]) -> Self {
        Self {
            view_proj,
            light_dir,
            _padding0: 0.0,
            light_color,
            _padding1: 0.0,
            ambient_color,
            _padding2: 0.0,
        }
    }
}

impl Default for RenderUniforms {
    fn default() -> Self {
        Self::new(mat4::IDENTITY, [-0.5, 0.5, -0.7071], [0.8; 3], [0.2; 3])
    }
}

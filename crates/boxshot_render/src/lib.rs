//! Rendering for the Boxshot demo
//!
//! This crate provides the wgpu-based pipeline that draws every entity
//! as a lit, instanced box.
//!
//! ## Key Components
//!
//! - [`context::RenderContext`] - WGPU device, queue, and surface management
//! - [`camera::Camera`] - First-person yaw/pitch camera
//! - [`pipeline::BoxPipeline`] - Instanced box rendering with directional lighting
//! - [`renderable::RenderableInstances`] - Converts World/Entity to GPU instances

pub mod context;
pub mod camera;
pub mod mesh;
pub mod pipeline;
pub mod renderable;

pub use context::{ContextError, RenderContext};
pub use camera::Camera;
pub use pipeline::{BoxPipeline, InstanceData, RenderUniforms, Vertex, CLEAR_COLOR};
pub use renderable::{frame_uniforms, RenderableInstances};

// Re-export core types for convenience
pub use boxshot_core::{Entity, LightingConfig, Material, Transform, World};

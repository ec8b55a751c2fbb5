//! Rendering pipeline components
//!
//! This module contains the instanced box pipeline and the GPU data
//! types it consumes.

pub mod types;
pub mod box_pipeline;

pub use types::{InstanceData, RenderUniforms, Vertex};
pub use box_pipeline::{BoxPipeline, CLEAR_COLOR};

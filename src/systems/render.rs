//! GPU rendering system
//!
//! Manages GPU rendering including:
//! - Render context and surface
//! - The instanced box pipeline
//! - Frame rendering

use std::sync::Arc;
use winit::window::Window;

use boxshot_core::LightingConfig;
use boxshot_render::{
    frame_uniforms, BoxPipeline, Camera, ContextError, RenderContext, RenderableInstances,
};
use crate::config::RenderingConfig;

/// Render error types
#[derive(Debug)]
pub enum RenderError {
    /// Surface was lost (window resized, minimized, etc.)
    SurfaceLost,
    /// GPU out of memory
    OutOfMemory,
    /// Other surface error
    Other(String),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::SurfaceLost => write!(f, "Surface lost"),
            RenderError::OutOfMemory => write!(f, "Out of memory"),
            RenderError::Other(msg) => write!(f, "Render error: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {}

impl From<wgpu::SurfaceError> for RenderError {
    fn from(e: wgpu::SurfaceError) -> Self {
        match e {
            wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => RenderError::SurfaceLost,
            wgpu::SurfaceError::OutOfMemory => RenderError::OutOfMemory,
            other => RenderError::Other(format!("{:?}", other)),
        }
    }
}

/// Manages GPU rendering
pub struct RenderSystem {
    context: RenderContext,
    pipeline: BoxPipeline,
    render_config: RenderingConfig,
    lighting: LightingConfig,
}

impl RenderSystem {
    /// Create render system from window and config
    pub fn new(
        window: Arc<Window>,
        render_config: RenderingConfig,
        lighting: LightingConfig,
        vsync: bool,
    ) -> Result<Self, ContextError> {
        let context = pollster::block_on(RenderContext::new(window, vsync))?;

        let mut pipeline = BoxPipeline::new(&context.device, context.config.format);
        pipeline.ensure_depth_texture(
            &context.device,
            context.config.width,
            context.config.height,
        );

        Ok(Self {
            context,
            pipeline,
            render_config,
            lighting,
        })
    }

    /// Handle window resize
    pub fn resize(&mut self, width: u32, height: u32) {
        self.context
            .resize(winit::dpi::PhysicalSize::new(width, height));
        self.pipeline.ensure_depth_texture(
            &self.context.device,
            self.context.config.width,
            self.context.config.height,
        );
    }

    /// Reconfigure the surface at its current size (after `SurfaceLost`)
    pub fn reconfigure(&mut self) {
        let size = self.context.size;
        self.resize(size.width, size.height);
    }

    /// Upload instances to the GPU
    pub fn upload_instances(&mut self, instances: &RenderableInstances) {
        self.pipeline.update_instances(
            &self.context.device,
            &self.context.queue,
            &instances.instances,
        );
        log::debug!("Uploaded {} box instances", instances.instance_count());
    }

    /// Render a single frame
    pub fn render_frame(&mut self, camera: &Camera) -> Result<(), RenderError> {
        let uniforms = frame_uniforms(camera, self.context.aspect_ratio(), &self.lighting);
        self.pipeline.update_uniforms(&self.context.queue, &uniforms);

        let output = self.context.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        self.pipeline
            .render(&mut encoder, &view, self.render_config.clear_color());

        self.context.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    /// Get current surface size
    pub fn size(&self) -> (u32, u32) {
        (self.context.size.width, self.context.size.height)
    }
}

//! Renderable instances - bridges World/Entity to GPU buffers
//!
//! Every entity is drawn as the shared unit cube, so collecting a frame
//! means turning each entity's transform and material into one
//! [`InstanceData`].

use boxshot_core::{Entity, LightingConfig, World};

use crate::camera::Camera;
use crate::pipeline::{InstanceData, RenderUniforms};

/// GPU-ready instances collected from entities
#[derive(Debug, Default)]
pub struct RenderableInstances {
    pub instances: Vec<InstanceData>,
}

impl RenderableInstances {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
        }
    }

    /// Collect an instance for every entity in the world
    pub fn from_world(world: &World) -> Self {
        let mut result = Self::with_capacity(world.entity_count());
        for entity in world.iter() {
            result.add_entity(entity);
        }
        result
    }

    pub fn add_entity(&mut self, entity: &Entity) {
        self.instances.push(InstanceData::new(
            entity.transform.to_matrix(),
            entity.material.base_color,
        ));
    }

    /// Rebuild from the world, reusing the allocation
    pub fn rebuild(&mut self, world: &World) {
        self.instances.clear();
        for entity in world.iter() {
            self.add_entity(entity);
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

/// Build the frame uniforms from the camera and scene lighting
pub fn frame_uniforms(camera: &Camera, aspect: f32, lighting: &LightingConfig) -> RenderUniforms {
    RenderUniforms::new(
        camera.view_projection(aspect),
        lighting.direction().to_array(),
        lighting.directional_color,
        lighting.ambient_color,
    )
}

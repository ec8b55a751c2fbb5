//! SceneBuilder - Declarative scene construction
//!
//! Provides a fluent API for building worlds with physics, either piece by
//! piece or straight from a loaded [`Scene`].

use boxshot_core::{
    Entity, GroundConfig, Material, PhysicsBoxConfig, PhysicsConfig, PlayerConfig, Scene,
    StaticCollider, StepConfig, Transform, World,
};
use boxshot_math::Vec3;
use boxshot_physics::{player_body, CollisionFilter, PhysicsMaterial, RigidBody};

/// Color of the player's visual box
pub const PLAYER_COLOR: Material = Material {
    base_color: [0.2, 0.5, 0.9, 1.0],
};

/// Builder for constructing scenes with physics
///
/// # Example
/// ```ignore
/// let world = SceneBuilder::new()
///     .with_physics(PhysicsConfig::new(Vec3::new(0.0, 0.0, -9.81)))
///     .add_ground(&GroundConfig::default())
///     .add_player(&PlayerConfig::default())
///     .add_box(&PhysicsBoxConfig::new(Vec3::new(5.0, 0.0, 2.0), Vec3::splat(0.5), 1.0, 0.5), "box_0")
///     .build();
/// ```
pub struct SceneBuilder {
    world: World,
    player_start: Option<Vec3>,
}

impl SceneBuilder {
    /// Create a new scene builder
    pub fn new() -> Self {
        Self {
            world: World::new(),
            player_start: None,
        }
    }

    /// Create a scene builder with a pre-allocated world capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            world: World::with_capacity(capacity),
            player_start: None,
        }
    }

    /// Build everything a scene describes: ground, player and boxes
    pub fn from_scene(scene: &Scene, step: StepConfig) -> Self {
        let mut builder = Self::with_capacity(scene.boxes.len() + 2)
            .with_physics(PhysicsConfig::new(scene.physics.gravity).with_step(step))
            .add_ground(&scene.ground)
            .add_player(&scene.player);

        for (i, config) in scene.boxes.iter().enumerate() {
            builder = builder.add_box(config, &format!("box_{}", i));
        }

        builder
    }

    /// Enable physics
    pub fn with_physics(mut self, config: PhysicsConfig) -> Self {
        self.world = self.world.with_physics(config);
        self
    }

    /// Add the ground slab
    ///
    /// This adds both a static collider and a visual ground entity.
    pub fn add_ground(mut self, config: &GroundConfig) -> Self {
        if let Some(physics) = self.world.physics_mut() {
            physics.add_static_collider(StaticCollider::new_box(
                config.position,
                config.half_extents,
                PhysicsMaterial::with_friction(config.friction),
            ));
        }

        let transform = Transform::from_position(config.position).with_scale(config.half_extents * 2.0);
        self.world.add_entity(
            Entity::new(transform, config.material)
                .with_name("ground")
                .with_tag("static"),
        );

        self
    }

    /// Add the player body and its visual box
    ///
    /// The body is registered as the physics world's player body.
    pub fn add_player(mut self, config: &PlayerConfig) -> Self {
        self.player_start = Some(config.position);

        let body_key = self
            .world
            .physics_mut()
            .map(|physics| {
                let key = physics.add_body(player_body(config.position, config.mass, config.friction));
                physics.set_player_body(key);
                key
            });

        let transform = Transform::from_position(config.position).with_scale(Vec3::splat(config.scale));
        let mut entity = Entity::new(transform, PLAYER_COLOR)
            .with_name("player")
            .with_tag("player");
        if let Some(key) = body_key {
            entity = entity.with_physics_body(key);
        }
        self.world.add_entity(entity);

        self
    }

    /// Add a dynamic box
    ///
    /// `size` in the config is the half extent, so the visual cube is scaled to twice that.
    pub fn add_box(mut self, config: &PhysicsBoxConfig, name: &str) -> Self {
        let body_key = self.world.physics_mut().map(|physics| {
            physics.add_body(
                RigidBody::new_box(config.position, config.size)
                    .with_mass(config.mass)
                    .with_friction(config.friction)
                    .with_filter(CollisionFilter::prop()),
            )
        });

        let transform = Transform::from_position(config.position).with_scale(config.size * 2.0);
        let mut entity = Entity::new(transform, config.material)
            .with_name(name)
            .with_tag("dynamic");
        if let Some(key) = body_key {
            entity = entity.with_physics_body(key);
        }
        self.world.add_entity(entity);

        self
    }

    /// Add a custom entity to the scene
    ///
    /// For entities that don't fit the standard patterns.
    pub fn add_entity(mut self, entity: Entity) -> Self {
        self.world.add_entity(entity);
        self
    }

    /// Build the scene and return the configured World
    pub fn build(self) -> World {
        self.world
    }

    /// Get the player's starting position (if a player was added)
    pub fn player_start(&self) -> Option<Vec3> {
        self.player_start
    }
}

impl Default for SceneBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gravity() -> PhysicsConfig {
        PhysicsConfig::new(Vec3::new(0.0, 0.0, -9.81))
    }

    #[test]
    fn test_empty_scene() {
        let world = SceneBuilder::new().build();
        assert_eq!(world.entity_count(), 0);
        assert!(world.physics().is_none());
    }

    #[test]
    fn test_scene_with_physics() {
        let world = SceneBuilder::new().with_physics(gravity()).build();

        let physics = world.physics().unwrap();
        assert_eq!(physics.config.gravity, Vec3::new(0.0, 0.0, -9.81));
    }

    #[test]
    fn test_scene_with_ground() {
        let world = SceneBuilder::new()
            .with_physics(gravity())
            .add_ground(&GroundConfig::default())
            .build();

        assert_eq!(world.entity_count(), 1);
        let physics = world.physics().unwrap();
        assert_eq!(physics.static_colliders().len(), 1);
        // top face at z = 0
        assert!(physics.static_colliders()[0].aabb.max.z.abs() < 1e-6);

        let (_, ground) = world.get_by_name("ground").unwrap();
        assert!(ground.has_tag("static"));
        assert_eq!(ground.transform.scale, Vec3::new(100.0, 100.0, 0.2));
        assert_eq!(ground.material, Material::GRAY);
    }

    #[test]
    fn test_scene_with_player() {
        let config = PlayerConfig::default();
        let world = SceneBuilder::new()
            .with_physics(gravity())
            .add_player(&config)
            .build();

        let physics = world.physics().unwrap();
        let key = physics.player_body().unwrap();
        let body = physics.get_body(key).unwrap();
        assert_eq!(body.position, config.position);
        assert_eq!(body.half_extents, Vec3::splat(0.5));
        assert_eq!(body.filter, CollisionFilter::player());

        let (_, player) = world.get_by_name("player").unwrap();
        assert!(player.has_tag("player"));
        assert_eq!(player.physics_body, Some(key));
        assert_eq!(player.transform.scale, Vec3::splat(0.5));
    }

    #[test]
    fn test_scene_with_box() {
        let config = PhysicsBoxConfig::new(Vec3::new(5.0, 0.0, 2.0), Vec3::splat(0.5), 2.0, 0.3);
        let world = SceneBuilder::new()
            .with_physics(gravity())
            .add_box(&config, "crate")
            .build();

        let (_, entity) = world.get_by_name("crate").unwrap();
        assert!(entity.has_tag("dynamic"));
        assert_eq!(entity.transform.scale, Vec3::ONE);

        let body = world.physics().unwrap().get_body(entity.physics_body.unwrap()).unwrap();
        assert_eq!(body.mass, 2.0);
        assert_eq!(body.filter, CollisionFilter::prop());
    }

    #[test]
    fn test_visual_only_without_physics() {
        let world = SceneBuilder::new()
            .add_box(&PhysicsBoxConfig::new(Vec3::ZERO, Vec3::ONE, 1.0, 0.5), "ghost")
            .build();
        let (_, entity) = world.get_by_name("ghost").unwrap();
        assert!(entity.physics_body.is_none());
    }

    #[test]
    fn test_from_default_scene() {
        let builder = SceneBuilder::from_scene(&Scene::default(), StepConfig::damped());
        assert_eq!(builder.player_start(), Some(Vec3::new(0.0, 0.0, 2.0)));

        let world = builder.build();
        // ground + player + 2 boxes
        assert_eq!(world.entity_count(), 4);
        assert_eq!(world.get_by_tag("dynamic").count(), 2);

        let physics = world.physics().unwrap();
        assert_eq!(physics.static_colliders().len(), 1);
        assert_eq!(physics.body_count(), 3);
        assert_eq!(physics.config.step, StepConfig::damped());
    }
}

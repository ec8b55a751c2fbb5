//! World container for entities
//!
//! The World manages all entities in the simulation and owns the physics world.

use crate::Entity;
use boxshot_physics::{PhysicsConfig, PhysicsWorld};
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Generational key to an entity in the world
    pub struct EntityKey;
}

/// The world containing all entities
///
/// The World is the central container for all game objects.
/// It manages entities and integrates with physics simulation.
pub struct World {
    /// All entities in the world (using generational keys)
    entities: SlotMap<EntityKey, Entity>,
    /// Optional physics simulation (None = no physics)
    physics_world: Option<PhysicsWorld>,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// Create a new empty world
    pub fn new() -> Self {
        Self {
            entities: SlotMap::with_key(),
            physics_world: None,
        }
    }

    /// Create a world with pre-allocated capacity for entities
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entities: SlotMap::with_capacity_and_key(capacity),
            physics_world: None,
        }
    }

    /// Enable physics for this world
    pub fn with_physics(mut self, config: PhysicsConfig) -> Self {
        self.physics_world = Some(PhysicsWorld::with_config(config));
        self
    }

    /// Get the physics world (if enabled)
    pub fn physics(&self) -> Option<&PhysicsWorld> {
        self.physics_world.as_ref()
    }

    /// Get mutable physics world (if enabled)
    pub fn physics_mut(&mut self) -> Option<&mut PhysicsWorld> {
        self.physics_world.as_mut()
    }

    /// Add an entity to the world, returning its key
    pub fn add_entity(&mut self, entity: Entity) -> EntityKey {
        self.entities.insert(entity)
    }

    /// Remove an entity (and its physics body, if any)
    pub fn remove_entity(&mut self, key: EntityKey) -> Option<Entity> {
        let entity = self.entities.remove(key)?;
        if let (Some(body), Some(physics)) = (entity.physics_body, self.physics_world.as_mut()) {
            physics.remove_body(body);
        }
        Some(entity)
    }

    /// Get a reference to an entity by key
    pub fn get_entity(&self, key: EntityKey) -> Option<&Entity> {
        self.entities.get(key)
    }

    /// Get a mutable reference to an entity by key
    pub fn get_entity_mut(&mut self, key: EntityKey) -> Option<&mut Entity> {
        self.entities.get_mut(key)
    }

    /// Find the first entity with the given name
    pub fn get_by_name(&self, name: &str) -> Option<(EntityKey, &Entity)> {
        self.entities
            .iter()
            .find(|(_, entity)| entity.name.as_deref() == Some(name))
    }

    /// Iterate over entities carrying a tag
    pub fn get_by_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = (EntityKey, &'a Entity)> + 'a {
        self.entities.iter().filter(move |(_, entity)| entity.has_tag(tag))
    }

    /// Get the number of entities
    #[inline]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Check if the world is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Update the world by stepping physics and syncing entity transforms
    pub fn update(&mut self, dt: f32) {
        self.step_physics(dt);
        self.sync_from_physics();
    }

    /// Step the physics simulation (if enabled)
    pub fn step_physics(&mut self, dt: f32) {
        if let Some(ref mut physics) = self.physics_world {
            physics.step(dt);
        }
    }

    /// Copy each dynamic body's position and orientation onto its entity
    ///
    /// Entities whose pose actually changed are marked dirty.
    pub fn sync_from_physics(&mut self) {
        let Some(ref physics) = self.physics_world else {
            return;
        };
        for entity in self.entities.values_mut() {
            let Some(body_key) = entity.physics_body else {
                continue;
            };
            if let Some(body) = physics.get_body(body_key) {
                if !body.is_static() {
                    entity.set_pose(body.position, body.orientation);
                }
            }
        }
    }

    /// Check if any entity needs re-uploading
    pub fn has_dirty_entities(&self) -> bool {
        self.entities.values().any(Entity::is_dirty)
    }

    /// Clear dirty flags on all entities
    pub fn clear_all_dirty(&mut self) {
        for entity in self.entities.values_mut() {
            entity.clear_dirty();
        }
    }

    /// Clear all entities from the world
    pub fn clear(&mut self) {
        self.entities.clear();
    }

    /// Iterate over all entities
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    /// Iterate over all entities mutably
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.values_mut()
    }

    /// Iterate over keys and entities
    pub fn iter_with_keys(&self) -> impl Iterator<Item = (EntityKey, &Entity)> {
        self.entities.iter()
    }
}

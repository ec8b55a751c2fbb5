//! Core types for the Boxshot demo
//!
//! This crate provides the gameplay-level types built on top of the math
//! and physics crates:
//!
//! - [`Transform`] - Position, rotation, and scale
//! - [`Material`] - Visual properties of an entity
//! - [`Entity`] - A visible box with transform, material and optional physics body
//! - [`World`] - Container for all entities plus the physics world
//! - [`EntityKey`] - Generational key to an entity in the world
//! - [`Weapon`] - Clip/reserve ammo state machine with timed reloads
//! - [`Scene`] - Loadable/saveable level description

mod transform;
mod entity;
mod world;
mod weapon;
mod scene;

pub use transform::Transform;
pub use entity::{Material, Entity, DirtyFlags};
pub use world::{World, EntityKey};
pub use weapon::{Weapon, WeaponConfig, FireOutcome, ReloadOutcome, ReloadComplete};
pub use scene::{
    Scene, SceneError, PlayerConfig, PhysicsWorldConfig, PhysicsBoxConfig, GroundConfig,
    LightingConfig,
};

// Re-export commonly used types from boxshot_math for convenience
pub use boxshot_math::{Quat, Vec3};

// Re-export physics types for convenient access through boxshot_core
pub use boxshot_physics::{BodyKey, PhysicsConfig, PhysicsWorld, RigidBody, StaticCollider, StepConfig};

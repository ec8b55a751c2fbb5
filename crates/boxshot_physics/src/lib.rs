//! Rigid-body physics for Boxshot
//!
//! This crate provides a small box-only physics simulation, including:
//! - Collision shapes (AABBs, rays)
//! - Collision detection and layer filtering
//! - Rigid body dynamics with gravity, forces, friction and damping
//! - Raycast queries
//! - Player helpers for force-based FPS movement

pub mod body;
pub mod collision;
pub mod material;
pub mod player;
pub mod shapes;
pub mod world;

// Re-export commonly used types
pub use body::{BodyKey, BodyType, RigidBody, StaticCollider};
pub use collision::{aabb_vs_aabb, ray_vs_aabb, CollisionFilter, CollisionLayer, Contact};
pub use material::PhysicsMaterial;
pub use player::{can_jump, player_body, DEFAULT_JUMP_FORCE, DEFAULT_MOVE_FORCE, DEFAULT_PLAYER_HALF_EXTENT};
pub use shapes::{Aabb, Ray};
pub use world::{HitTarget, PhysicsConfig, PhysicsWorld, RayHit, StepConfig, FIXED_TIMESTEP};

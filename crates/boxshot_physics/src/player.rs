//! Player body helpers for force-based FPS movement
//!
//! The player is an ordinary dynamic box in the physics world. Movement and
//! jumping are forces accumulated for the next step; this module holds the
//! defaults and the "near the ground" heuristic that gates jumping.

use crate::body::RigidBody;
use crate::collision::CollisionFilter;
use boxshot_math::Vec3;

/// Default half extent of the player's collision box
pub const DEFAULT_PLAYER_HALF_EXTENT: f32 = 0.5;

/// Default horizontal force per held movement key (newtons)
pub const DEFAULT_MOVE_FORCE: f32 = 20.0;

/// Default upward force applied by a jump (newtons, for one step)
pub const DEFAULT_JUMP_FORCE: f32 = 300.0;

/// Jumping is allowed only below this height
pub const JUMP_MAX_HEIGHT: f32 = 1.5;

/// Jumping is allowed only while vertical speed is below this
pub const JUMP_MAX_VERTICAL_SPEED: f32 = 0.5;

/// Build the player's dynamic body
pub fn player_body(position: Vec3, mass: f32, friction: f32) -> RigidBody {
    RigidBody::new_box(position, Vec3::splat(DEFAULT_PLAYER_HALF_EXTENT))
        .with_mass(mass)
        .with_friction(friction)
        .with_filter(CollisionFilter::player())
}

/// Whether a body is close enough to the ground to jump
///
/// This is a height/speed heuristic, not a contact query: the body must be
/// below [`JUMP_MAX_HEIGHT`] and nearly still vertically.
pub fn can_jump(body: &RigidBody) -> bool {
    body.position.z < JUMP_MAX_HEIGHT && body.velocity.z.abs() < JUMP_MAX_VERTICAL_SPEED
}

//! Rigid body types for the physics simulation

use crate::collision::CollisionFilter;
use crate::material::PhysicsMaterial;
use crate::shapes::Aabb;
use boxshot_math::{Quat, Vec3};
use slotmap::new_key_type;

// Define generational key type for rigid bodies
new_key_type! {
    /// Key to a rigid body in the physics world
    ///
    /// Uses generational indexing to prevent the ABA problem where a handle
    /// could point to a reused slot. If a body is removed and its slot reused,
    /// old keys will return None instead of pointing to the wrong body.
    pub struct BodyKey;
}

/// How a body participates in the simulation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BodyType {
    /// Affected by gravity, forces and contacts
    #[default]
    Dynamic,
    /// Never moves; infinite mass in collision response
    Static,
}

/// A box-shaped rigid body
///
/// Collision uses the axis-aligned box `position ± half_extents`. The
/// orientation is integrated from the angular velocity and reported to the
/// renderer, but does not rotate the collision box.
#[derive(Clone, Debug)]
pub struct RigidBody {
    /// Center of the body in world coordinates
    pub position: Vec3,
    /// Orientation
    pub orientation: Quat,
    /// Linear velocity (units per second)
    pub velocity: Vec3,
    /// Angular velocity (radians per second, world axis)
    pub angular_velocity: Vec3,
    /// Half extents of the collision box
    pub half_extents: Vec3,
    /// Mass in kilograms
    pub mass: f32,
    /// Surface properties
    pub material: PhysicsMaterial,
    /// Dynamic or static
    pub body_type: BodyType,
    /// Collision layer membership and mask
    pub filter: CollisionFilter,
    /// Forces accumulated since the last step
    force: Vec3,
}

impl RigidBody {
    /// Create a dynamic box body with unit mass and default material
    pub fn new_box(position: Vec3, half_extents: Vec3) -> Self {
        Self {
            position,
            orientation: Quat::IDENTITY,
            velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            half_extents,
            mass: 1.0,
            material: PhysicsMaterial::default(),
            body_type: BodyType::Dynamic,
            filter: CollisionFilter::default(),
            force: Vec3::ZERO,
        }
    }

    /// Create a static box body
    pub fn new_static_box(position: Vec3, half_extents: Vec3) -> Self {
        Self::new_box(position, half_extents).with_body_type(BodyType::Static)
    }

    /// Set the velocity of this body
    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    /// Set the angular velocity of this body
    pub fn with_angular_velocity(mut self, angular_velocity: Vec3) -> Self {
        self.angular_velocity = angular_velocity;
        self
    }

    /// Set the mass of this body
    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    /// Set the surface material
    pub fn with_material(mut self, material: PhysicsMaterial) -> Self {
        self.material = material;
        self
    }

    /// Set the friction coefficient, keeping the current restitution
    pub fn with_friction(mut self, friction: f32) -> Self {
        self.material = PhysicsMaterial::new(friction, self.material.restitution);
        self
    }

    /// Set the body type
    pub fn with_body_type(mut self, body_type: BodyType) -> Self {
        self.body_type = body_type;
        self
    }

    /// Set the collision filter
    pub fn with_filter(mut self, filter: CollisionFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Whether this body never moves
    pub fn is_static(&self) -> bool {
        self.body_type == BodyType::Static
    }

    /// Inverse mass (zero for static or massless bodies)
    pub fn inverse_mass(&self) -> f32 {
        if self.is_static() || self.mass <= 0.0 {
            0.0
        } else {
            1.0 / self.mass
        }
    }

    /// World-space collision box
    pub fn aabb(&self) -> Aabb {
        Aabb::from_center_half_extents(self.position, self.half_extents)
    }

    /// Add a force to be applied during the next step
    pub fn apply_force(&mut self, force: Vec3) {
        if !self.is_static() {
            self.force += force;
        }
    }

    /// Forces accumulated since the last step
    pub fn accumulated_force(&self) -> Vec3 {
        self.force
    }

    /// Reset the force accumulator
    pub fn clear_forces(&mut self) {
        self.force = Vec3::ZERO;
    }

    /// Apply a positional correction (e.g., from collision resolution)
    pub fn apply_correction(&mut self, correction: Vec3) {
        self.position += correction;
    }
}

/// Immovable collision geometry with no body state
///
/// Used for the ground. Static colliders never move and are never
/// checked against each other.
#[derive(Clone, Debug)]
pub struct StaticCollider {
    /// World-space box
    pub aabb: Aabb,
    /// Surface properties
    pub material: PhysicsMaterial,
    /// Collision layer membership and mask
    pub filter: CollisionFilter,
}

impl StaticCollider {
    /// Create a static box collider centered at `center`
    pub fn new_box(center: Vec3, half_extents: Vec3, material: PhysicsMaterial) -> Self {
        Self {
            aabb: Aabb::from_center_half_extents(center, half_extents),
            material,
            filter: CollisionFilter::static_world(),
        }
    }

    /// Set the collision filter
    pub fn with_filter(mut self, filter: CollisionFilter) -> Self {
        self.filter = filter;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_box_body() {
        let pos = Vec3::new(1.0, 2.0, 3.0);
        let body = RigidBody::new_box(pos, Vec3::splat(0.5));

        assert_eq!(body.position, pos);
        assert_eq!(body.velocity, Vec3::ZERO);
        assert_eq!(body.orientation, Quat::IDENTITY);
        assert_eq!(body.mass, 1.0);
        assert!(!body.is_static());
        assert_eq!(body.aabb().center(), pos);
    }

    #[test]
    fn test_static_body() {
        let body = RigidBody::new_static_box(Vec3::ZERO, Vec3::ONE);
        assert!(body.is_static());
        assert_eq!(body.inverse_mass(), 0.0);
    }

    #[test]
    fn test_builder_methods() {
        let body = RigidBody::new_box(Vec3::ZERO, Vec3::ONE)
            .with_velocity(Vec3::new(1.0, 2.0, 0.0))
            .with_mass(4.0)
            .with_friction(0.3)
            .with_filter(CollisionFilter::prop());

        assert_eq!(body.velocity, Vec3::new(1.0, 2.0, 0.0));
        assert_eq!(body.mass, 4.0);
        assert_eq!(body.inverse_mass(), 0.25);
        assert_eq!(body.material.friction, 0.3);
        assert_eq!(body.filter, CollisionFilter::prop());
    }

    #[test]
    fn test_force_accumulates_and_clears() {
        let mut body = RigidBody::new_box(Vec3::ZERO, Vec3::ONE);
        body.apply_force(Vec3::X);
        body.apply_force(Vec3::Y * 2.0);
        assert_eq!(body.accumulated_force(), Vec3::new(1.0, 2.0, 0.0));

        body.clear_forces();
        assert_eq!(body.accumulated_force(), Vec3::ZERO);
    }

    #[test]
    fn test_static_body_ignores_forces() {
        let mut body = RigidBody::new_static_box(Vec3::ZERO, Vec3::ONE);
        body.apply_force(Vec3::X * 100.0);
        assert_eq!(body.accumulated_force(), Vec3::ZERO);
    }

    #[test]
    fn test_apply_correction() {
        let mut body = RigidBody::new_box(Vec3::new(1.0, 0.0, 0.0), Vec3::ONE);
        body.apply_correction(Vec3::new(0.0, 0.5, 0.0));
        assert_eq!(body.position, Vec3::new(1.0, 0.5, 0.0));
        assert_eq!(body.aabb().center(), Vec3::new(1.0, 0.5, 0.0));
    }

    #[test]
    fn test_static_collider_defaults_to_static_layer() {
        let ground = StaticCollider::new_box(Vec3::ZERO, Vec3::ONE, PhysicsMaterial::default());
        assert_eq!(ground.filter, CollisionFilter::static_world());
        assert_eq!(ground.aabb.max, Vec3::ONE);
    }
}

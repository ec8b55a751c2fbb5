//! Physics world and simulation

use crate::body::{BodyKey, RigidBody, StaticCollider};
use crate::collision::{aabb_vs_aabb, ray_vs_aabb, CollisionFilter, Contact};
use crate::material::PhysicsMaterial;
use crate::player;
use crate::shapes::Ray;
use boxshot_math::Vec3;
use serde::{Deserialize, Serialize};
use slotmap::SlotMap;

/// Longest single step the undamped profile takes (one 60 Hz tick)
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;

/// How a single call to [`PhysicsWorld::step`] advances the simulation
///
/// Two profiles exist: [`StepConfig::damped`] clamps and substeps the frame
/// delta and stabilises bodies with speed caps and damping;
/// [`StepConfig::undamped`] integrates once, at most one fixed tick.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepConfig {
    /// Frame deltas are clamped to this before stepping
    pub max_dt: Option<f32>,
    /// Number of equal substeps per step (at least 1)
    pub substeps: u32,
    /// Linear speed cap applied after substepping
    pub max_linear_speed: Option<f32>,
    /// Angular speed cap applied after substepping
    pub max_angular_speed: Option<f32>,
    /// Fraction of linear velocity removed after each step
    pub linear_damping: f32,
    /// Fraction of angular velocity removed after each step
    pub angular_damping: f32,
}

impl Default for StepConfig {
    fn default() -> Self {
        Self::damped()
    }
}

impl StepConfig {
    /// Clamped, substepped, capped and damped stepping
    pub fn damped() -> Self {
        Self {
            max_dt: Some(0.05),
            substeps: 4,
            max_linear_speed: Some(15.0),
            max_angular_speed: Some(3.0),
            linear_damping: 0.05,
            angular_damping: 0.2,
        }
    }

    /// One step of at most [`FIXED_TIMESTEP`], no caps and no damping
    pub fn undamped() -> Self {
        Self {
            max_dt: Some(FIXED_TIMESTEP),
            substeps: 1,
            max_linear_speed: None,
            max_angular_speed: None,
            linear_damping: 0.0,
            angular_damping: 0.0,
        }
    }
}

/// Configuration for the physics simulation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhysicsConfig {
    /// Gravity acceleration (Z-up world, so normally negative Z)
    pub gravity: Vec3,
    /// Stepping profile
    pub step: StepConfig,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vec3::new(0.0, 0.0, -9.81),
            step: StepConfig::default(),
        }
    }
}

impl PhysicsConfig {
    /// Create a new physics config with the given gravity and the default step profile
    pub fn new(gravity: Vec3) -> Self {
        Self {
            gravity,
            ..Default::default()
        }
    }

    /// Replace the step profile
    pub fn with_step(mut self, step: StepConfig) -> Self {
        self.step = step;
        self
    }
}

/// What a ray hit
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitTarget {
    /// A rigid body
    Body(BodyKey),
    /// A static collider, by index
    Static(usize),
}

/// Result of a raycast
#[derive(Clone, Copy, Debug)]
pub struct RayHit {
    /// World-space hit point
    pub point: Vec3,
    /// Surface normal at the hit point
    pub normal: Vec3,
    /// Distance from the ray origin
    pub distance: f32,
    /// The object that was hit
    pub target: HitTarget,
}

/// The physics world containing all rigid bodies
pub struct PhysicsWorld {
    /// All rigid bodies in the world (using generational keys)
    bodies: SlotMap<BodyKey, RigidBody>,
    /// Static colliders (the ground)
    static_colliders: Vec<StaticCollider>,
    /// The body driven by player input, if any
    player_body: Option<BodyKey>,
    /// Physics configuration
    pub config: PhysicsConfig,
}

impl PhysicsWorld {
    /// Create a new physics world with default configuration
    pub fn new() -> Self {
        Self::with_config(PhysicsConfig::default())
    }

    /// Create a new physics world with custom configuration
    pub fn with_config(config: PhysicsConfig) -> Self {
        Self {
            bodies: SlotMap::with_key(),
            static_colliders: Vec::new(),
            player_body: None,
            config,
        }
    }

    /// Add a static collider to the world and return its index
    pub fn add_static_collider(&mut self, collider: StaticCollider) -> usize {
        self.static_colliders.push(collider);
        self.static_colliders.len() - 1
    }

    /// Get immutable access to static colliders
    pub fn static_colliders(&self) -> &[StaticCollider] {
        &self.static_colliders
    }

    /// Add a body to the world and return its key
    pub fn add_body(&mut self, body: RigidBody) -> BodyKey {
        self.bodies.insert(body)
    }

    /// Remove a body from the world and return it
    pub fn remove_body(&mut self, key: BodyKey) -> Option<RigidBody> {
        if self.player_body == Some(key) {
            self.player_body = None;
        }
        self.bodies.remove(key)
    }

    /// Get an immutable reference to a body by key
    pub fn get_body(&self, key: BodyKey) -> Option<&RigidBody> {
        self.bodies.get(key)
    }

    /// Get a mutable reference to a body by key
    pub fn get_body_mut(&mut self, key: BodyKey) -> Option<&mut RigidBody> {
        self.bodies.get_mut(key)
    }

    /// Get the number of bodies in the world
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Add a force to a body for the next step
    ///
    /// Returns false if the key is stale.
    pub fn apply_force(&mut self, key: BodyKey, force: Vec3) -> bool {
        match self.bodies.get_mut(key) {
            Some(body) => {
                body.apply_force(force);
                true
            }
            None => false,
        }
    }

    // --- Player ---

    /// Mark a body as the player body
    pub fn set_player_body(&mut self, key: BodyKey) {
        self.player_body = Some(key);
    }

    /// The player body key, if one is registered and still alive
    pub fn player_body(&self) -> Option<BodyKey> {
        self.player_body.filter(|key| self.bodies.contains_key(*key))
    }

    /// Current player position
    pub fn player_position(&self) -> Option<Vec3> {
        self.player_body.and_then(|key| self.bodies.get(key)).map(|body| body.position)
    }

    /// Current player velocity
    pub fn player_velocity(&self) -> Option<Vec3> {
        self.player_body.and_then(|key| self.bodies.get(key)).map(|body| body.velocity)
    }

    /// Add a force to the player body for the next step
    pub fn apply_player_force(&mut self, force: Vec3) -> bool {
        match self.player_body {
            Some(key) => self.apply_force(key, force),
            None => false,
        }
    }

    /// Push the player upward if it is near the ground
    ///
    /// Returns true if the jump force was applied.
    pub fn player_jump(&mut self, jump_force: f32) -> bool {
        let Some(body) = self.player_body.and_then(|key| self.bodies.get_mut(key)) else {
            return false;
        };
        if !player::can_jump(body) {
            return false;
        }
        body.apply_force(Vec3::Z * jump_force);
        true
    }

    // --- Simulation ---

    /// Step the physics simulation forward by dt seconds
    ///
    /// This performs, per substep:
    /// 1. Gravity and accumulated forces into velocity
    /// 2. Velocity integration into position and orientation
    /// 3. Static collider collision detection and resolution
    /// 4. Body-body collision detection and resolution
    ///
    /// Then speed caps and damping from the step profile, and finally
    /// clears all accumulated forces.
    pub fn step(&mut self, dt: f32) {
        let step = self.config.step;
        let dt = match step.max_dt {
            Some(max_dt) => dt.min(max_dt),
            None => dt,
        };

        if dt > 0.0 {
            let substeps = step.substeps.max(1);
            let h = dt / substeps as f32;
            for _ in 0..substeps {
                self.integrate(h);
                self.resolve_static_collisions();
                self.resolve_body_collisions();
            }
        }

        for body in self.bodies.values_mut() {
            if !body.is_static() {
                if let Some(max) = step.max_linear_speed {
                    body.velocity = body.velocity.clamp_length(max);
                }
                if let Some(max) = step.max_angular_speed {
                    body.angular_velocity = body.angular_velocity.clamp_length(max);
                }
                body.velocity *= 1.0 - step.linear_damping;
                body.angular_velocity *= 1.0 - step.angular_damping;
            }
            body.clear_forces();
        }
    }

    fn integrate(&mut self, h: f32) {
        let gravity = self.config.gravity;
        for body in self.bodies.values_mut() {
            if body.is_static() {
                continue;
            }
            let acceleration = gravity + body.accumulated_force() * body.inverse_mass();
            body.velocity += acceleration * h;
            body.position += body.velocity * h;
            body.orientation = body.orientation.integrate(body.angular_velocity, h);
        }
    }

    /// Resolve collisions between bodies and static colliders
    fn resolve_static_collisions(&mut self) {
        for body in self.bodies.values_mut() {
            if body.is_static() {
                continue;
            }

            for static_col in &self.static_colliders {
                if !body.filter.collides_with(&static_col.filter) {
                    continue;
                }
                let Some(contact) = aabb_vs_aabb(&body.aabb(), &static_col.aabb) else {
                    continue;
                };
                if !contact.is_colliding() {
                    continue;
                }

                // Push the body out of the static collider
                body.apply_correction(contact.normal * contact.penetration);

                let combined = body.material.combine(&static_col.material);
                let mut ground_velocity = Vec3::ZERO;
                let inv_mass = body.inverse_mass();
                apply_contact_impulse(
                    &mut body.velocity,
                    inv_mass,
                    &mut ground_velocity,
                    0.0,
                    contact.normal,
                    &combined,
                );
            }
        }
    }

    /// Resolve collisions between bodies
    fn resolve_body_collisions(&mut self) {
        // Collect all keys first (needed because we can't iterate and mutate)
        let keys: Vec<BodyKey> = self.bodies.keys().collect();

        for i in 0..keys.len() {
            for j in (i + 1)..keys.len() {
                let Some([a, b]) = self.bodies.get_disjoint_mut([keys[i], keys[j]]) else {
                    continue;
                };
                if a.is_static() && b.is_static() {
                    continue;
                }
                if !a.filter.collides_with(&b.filter) {
                    continue;
                }

                // Normal points from b toward a
                if let Some(contact) = aabb_vs_aabb(&a.aabb(), &b.aabb()) {
                    if contact.is_colliding() {
                        resolve_body_pair(a, b, &contact);
                    }
                }
            }
        }
    }

    // --- Queries ---

    /// Find the nearest object hit by a ray within `max_distance`
    ///
    /// Only objects whose filter collides with `filter` are considered.
    pub fn raycast(&self, ray: &Ray, max_distance: f32, filter: &CollisionFilter) -> Option<RayHit> {
        self.raycast_all(ray, max_distance, filter).into_iter().next()
    }

    /// All objects hit by a ray, nearest first
    pub fn raycast_all(&self, ray: &Ray, max_distance: f32, filter: &CollisionFilter) -> Vec<RayHit> {
        let mut hits = Vec::new();

        for (key, body) in &self.bodies {
            if !filter.collides_with(&body.filter) {
                continue;
            }
            if let Some((distance, normal)) = ray_vs_aabb(ray, &body.aabb(), max_distance) {
                hits.push(RayHit {
                    point: ray.at(distance),
                    normal,
                    distance,
                    target: HitTarget::Body(key),
                });
            }
        }

        for (index, collider) in self.static_colliders.iter().enumerate() {
            if !filter.collides_with(&collider.filter) {
                continue;
            }
            if let Some((distance, normal)) = ray_vs_aabb(ray, &collider.aabb, max_distance) {
                hits.push(RayHit {
                    point: ray.at(distance),
                    normal,
                    distance,
                    target: HitTarget::Static(index),
                });
            }
        }

        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Separate an overlapping pair and exchange impulses
///
/// The contact normal points from `b` toward `a`.
fn resolve_body_pair(a: &mut RigidBody, b: &mut RigidBody, contact: &Contact) {
    let inv_a = a.inverse_mass();
    let inv_b = b.inverse_mass();
    let inv_sum = inv_a + inv_b;
    if inv_sum <= 0.0 {
        return;
    }

    // Split the correction by inverse mass
    let correction = contact.normal * (contact.penetration / inv_sum);
    a.apply_correction(correction * inv_a);
    b.apply_correction(-correction * inv_b);

    let combined = a.material.combine(&b.material);
    apply_contact_impulse(&mut a.velocity, inv_a, &mut b.velocity, inv_b, contact.normal, &combined);
}

/// Normal impulse with restitution, then Coulomb friction bounded by it
///
/// `normal` points from the second body toward the first. A static partner
/// is passed with zero inverse mass.
fn apply_contact_impulse(
    velocity_a: &mut Vec3,
    inv_a: f32,
    velocity_b: &mut Vec3,
    inv_b: f32,
    normal: Vec3,
    material: &PhysicsMaterial,
) {
    let inv_sum = inv_a + inv_b;
    if inv_sum <= 0.0 {
        return;
    }

    let relative = *velocity_a - *velocity_b;
    let approach = relative.dot(normal);
    if approach >= 0.0 {
        return;
    }

    let j = -(1.0 + material.restitution) * approach / inv_sum;
    *velocity_a += normal * (j * inv_a);
    *velocity_b -= normal * (j * inv_b);

    let relative = *velocity_a - *velocity_b;
    let tangent = relative - normal * relative.dot(normal);
    let tangent_speed = tangent.length();
    if tangent_speed < 1e-6 {
        return;
    }

    let direction = tangent / tangent_speed;
    let jt = (tangent_speed / inv_sum).min(material.friction * j);
    *velocity_a -= direction * (jt * inv_a);
    *velocity_b += direction * (jt * inv_b);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::player_body;

    const EPSILON: f32 = 0.0001;

    fn ground() -> StaticCollider {
        StaticCollider::new_box(
            Vec3::new(0.0, 0.0, -0.1),
            Vec3::new(50.0, 50.0, 0.1),
            PhysicsMaterial::default(),
        )
    }

    /// World with a ground whose top face is at z = 0
    fn world_with_ground(step: StepConfig) -> PhysicsWorld {
        let mut world = PhysicsWorld::with_config(PhysicsConfig::default().with_step(step));
        world.add_static_collider(ground());
        world
    }

    fn prop(position: Vec3) -> RigidBody {
        RigidBody::new_box(position, Vec3::splat(0.5)).with_filter(CollisionFilter::prop())
    }

    fn settle(world: &mut PhysicsWorld, frames: usize) {
        for _ in 0..frames {
            world.step(1.0 / 60.0);
        }
    }

    #[test]
    fn test_physics_config_default() {
        let config = PhysicsConfig::default();
        assert_eq!(config.gravity, Vec3::new(0.0, 0.0, -9.81));
        assert_eq!(config.step, StepConfig::damped());
    }

    #[test]
    fn test_world_add_and_get_body() {
        let mut world = PhysicsWorld::new();
        assert_eq!(world.body_count(), 0);

        let key = world.add_body(prop(Vec3::new(0.0, 0.0, 5.0)));
        let retrieved = world.get_body(key).expect("Body should exist");
        assert_eq!(retrieved.position, Vec3::new(0.0, 0.0, 5.0));
        assert_eq!(world.body_count(), 1);
    }

    #[test]
    fn test_stale_key_returns_none() {
        let mut world = PhysicsWorld::new();
        let key = world.add_body(prop(Vec3::ZERO));
        assert!(world.remove_body(key).is_some());
        assert!(world.get_body(key).is_none());

        let new_key = world.add_body(prop(Vec3::X));
        // Old key still returns None (generational safety)
        assert!(world.get_body(key).is_none());
        assert!(world.get_body(new_key).is_some());
    }

    #[test]
    fn test_undamped_step_limits_dt_to_one_tick() {
        let mut world = PhysicsWorld::with_config(PhysicsConfig::default().with_step(StepConfig::undamped()));
        let key = world.add_body(prop(Vec3::new(0.0, 0.0, 100.0)));

        world.step(1.0);

        let body = world.get_body(key).unwrap();
        assert!((body.velocity.z + 9.81 * FIXED_TIMESTEP).abs() < EPSILON, "got {}", body.velocity.z);
        assert!(body.position.z > 99.99);
    }

    #[test]
    fn test_undamped_short_step_is_not_stretched() {
        let mut world = PhysicsWorld::with_config(PhysicsConfig::default().with_step(StepConfig::undamped()));
        let key = world.add_body(prop(Vec3::new(0.0, 0.0, 100.0)));

        world.step(0.005);

        assert!((world.get_body(key).unwrap().velocity.z + 9.81 * 0.005).abs() < EPSILON);
    }

    #[test]
    fn test_resting_box_survives_long_step() {
        for step in [StepConfig::damped(), StepConfig::undamped()] {
            let mut world = world_with_ground(step);
            let key = world.add_body(prop(Vec3::new(0.0, 0.0, 0.5)));
            settle(&mut world, 60);

            world.step(1.0);
            settle(&mut world, 60);

            let z = world.get_body(key).unwrap().position.z;
            assert!((z - 0.5).abs() < 0.01, "{:?}: got {}", step, z);
        }
    }

    #[test]
    fn test_damped_step_clamps_dt_and_damps() {
        let mut world = PhysicsWorld::new();
        let key = world.add_body(prop(Vec3::new(0.0, 0.0, 100.0)));

        world.step(1.0);

        // dt clamped to 0.05, then 5% of the velocity removed
        let body = world.get_body(key).unwrap();
        let expected = -9.81 * 0.05 * 0.95;
        assert!((body.velocity.z - expected).abs() < EPSILON, "got {}", body.velocity.z);
    }

    #[test]
    fn test_damped_step_caps_speeds() {
        let mut config = PhysicsConfig::new(Vec3::ZERO);
        config.step = StepConfig::damped();
        let mut world = PhysicsWorld::with_config(config);
        let key = world.add_body(
            prop(Vec3::ZERO)
                .with_velocity(Vec3::new(100.0, 0.0, 0.0))
                .with_angular_velocity(Vec3::new(0.0, 0.0, 10.0)),
        );

        world.step(0.01);

        let body = world.get_body(key).unwrap();
        assert!((body.velocity.length() - 15.0 * 0.95).abs() < EPSILON);
        assert!((body.angular_velocity.length() - 3.0 * 0.8).abs() < EPSILON);
    }

    #[test]
    fn test_undamped_step_keeps_speed() {
        let mut world = PhysicsWorld::with_config(PhysicsConfig::new(Vec3::ZERO).with_step(StepConfig::undamped()));
        let key = world.add_body(prop(Vec3::ZERO).with_velocity(Vec3::new(100.0, 0.0, 0.0)));

        world.step(0.01);

        assert_eq!(world.get_body(key).unwrap().velocity, Vec3::new(100.0, 0.0, 0.0));
    }

    #[test]
    fn test_angular_velocity_rotates_orientation() {
        let step = StepConfig {
            max_dt: None,
            ..StepConfig::undamped()
        };
        let mut world = PhysicsWorld::with_config(PhysicsConfig::new(Vec3::ZERO).with_step(step));
        let key = world.add_body(prop(Vec3::ZERO).with_angular_velocity(Vec3::new(0.0, 0.0, 1.0)));

        world.step(std::f32::consts::FRAC_PI_2);

        let rotated = world.get_body(key).unwrap().orientation.rotate(Vec3::X);
        assert!((rotated - Vec3::Y).length() < 0.001, "got {:?}", rotated);
    }

    #[test]
    fn test_box_comes_to_rest_on_ground() {
        for step in [StepConfig::damped(), StepConfig::undamped()] {
            let mut world = world_with_ground(step);
            let key = world.add_body(prop(Vec3::new(5.0, 0.0, 2.0)));

            settle(&mut world, 180);

            let body = world.get_body(key).unwrap();
            assert!((body.position.z - 0.5).abs() < 0.01, "got {}", body.position.z);
            assert!(body.velocity.z.abs() < 0.2);
        }
    }

    #[test]
    fn test_boxes_stack() {
        let mut world = world_with_ground(StepConfig::damped());
        let lower = world.add_body(prop(Vec3::new(0.0, 0.0, 0.5)));
        let upper = world.add_body(prop(Vec3::new(0.0, 0.0, 1.6)));

        settle(&mut world, 180);

        let lower_z = world.get_body(lower).unwrap().position.z;
        let upper_z = world.get_body(upper).unwrap().position.z;
        assert!((lower_z - 0.5).abs() < 0.05, "lower at {}", lower_z);
        assert!((upper_z - 1.5).abs() < 0.1, "upper at {}", upper_z);
    }

    #[test]
    fn test_friction_stops_sliding_box() {
        let mut world = world_with_ground(StepConfig::undamped());
        let key = world.add_body(prop(Vec3::new(0.0, 0.0, 0.5)).with_velocity(Vec3::new(3.0, 0.0, 0.0)));

        settle(&mut world, 120);

        let body = world.get_body(key).unwrap();
        assert!(body.velocity.x.abs() < EPSILON, "got {}", body.velocity.x);
        // mu_combined = 0.5 → decel 4.905 m/s², so it slides about 0.92 m
        assert!(body.position.x > 0.5 && body.position.x < 1.5);
    }

    #[test]
    fn test_frictionless_box_keeps_sliding() {
        let mut world = PhysicsWorld::with_config(PhysicsConfig::default().with_step(StepConfig::undamped()));
        world.add_static_collider(StaticCollider::new_box(
            Vec3::new(0.0, 0.0, -0.1),
            Vec3::new(50.0, 50.0, 0.1),
            PhysicsMaterial::FRICTIONLESS,
        ));
        let key = world.add_body(prop(Vec3::new(0.0, 0.0, 0.5)).with_velocity(Vec3::new(3.0, 0.0, 0.0)));

        settle(&mut world, 30);

        assert!((world.get_body(key).unwrap().velocity.x - 3.0).abs() < EPSILON);
    }

    #[test]
    fn test_forces_are_cleared_after_step() {
        let mut world = PhysicsWorld::with_config(PhysicsConfig::new(Vec3::ZERO).with_step(StepConfig::undamped()));
        let key = world.add_body(prop(Vec3::ZERO));

        assert!(world.apply_force(key, Vec3::new(10.0, 0.0, 0.0)));
        world.step(0.01);
        let after_first = world.get_body(key).unwrap().velocity;
        assert!((after_first.x - 0.1).abs() < EPSILON);

        world.step(0.01);
        assert_eq!(world.get_body(key).unwrap().velocity, after_first);
        assert_eq!(world.get_body(key).unwrap().accumulated_force(), Vec3::ZERO);
    }

    #[test]
    fn test_apply_force_stale_key() {
        let mut world = PhysicsWorld::new();
        let key = world.add_body(prop(Vec3::ZERO));
        world.remove_body(key);
        assert!(!world.apply_force(key, Vec3::X));
    }

    #[test]
    fn test_player_pushes_box() {
        let mut world = world_with_ground(StepConfig::damped());
        let player = world.add_body(player_body(Vec3::new(0.0, 0.0, 0.5), 1.0, 0.5));
        world.set_player_body(player);
        let crate_key = world.add_body(prop(Vec3::new(1.05, 0.0, 0.5)));

        for _ in 0..60 {
            world.apply_player_force(Vec3::new(20.0, 0.0, 0.0));
            world.step(1.0 / 60.0);
        }

        let crate_body = world.get_body(crate_key).unwrap();
        assert!(crate_body.position.x > 1.1, "box did not move: {}", crate_body.position.x);
        let player_x = world.player_position().unwrap().x;
        assert!(crate_body.position.x - player_x >= 1.0 - 0.01);
    }

    #[test]
    fn test_player_registration() {
        let mut world = PhysicsWorld::new();
        assert!(world.player_body().is_none());
        assert!(!world.apply_player_force(Vec3::X));

        let key = world.add_body(player_body(Vec3::new(0.0, 0.0, 2.0), 1.0, 0.5));
        world.set_player_body(key);
        assert_eq!(world.player_body(), Some(key));
        assert_eq!(world.player_position(), Some(Vec3::new(0.0, 0.0, 2.0)));

        world.remove_body(key);
        assert!(world.player_body().is_none());
        assert!(world.player_position().is_none());
    }

    #[test]
    fn test_player_jump_only_near_ground() {
        let mut world = world_with_ground(StepConfig::damped());
        let key = world.add_body(player_body(Vec3::new(0.0, 0.0, 2.0), 1.0, 0.5));
        world.set_player_body(key);

        // Spawned above the jump height
        assert!(!world.player_jump(300.0));

        settle(&mut world, 120);
        assert!(world.player_jump(300.0));
        world.step(1.0 / 60.0);

        let velocity = world.player_velocity().unwrap();
        assert!(velocity.z > 1.0, "got {}", velocity.z);
        // Moving up fast now, so a second jump is refused
        assert!(!world.player_jump(300.0));
    }

    #[test]
    fn test_raycast_hits_nearest_box() {
        let mut world = world_with_ground(StepConfig::damped());
        let near = world.add_body(prop(Vec3::new(0.0, 5.0, 1.0)));
        let _far = world.add_body(prop(Vec3::new(0.0, 10.0, 1.0)));

        let ray = Ray::new(Vec3::new(0.0, 0.0, 1.0), Vec3::Y);
        let hit = world
            .raycast(&ray, f32::INFINITY, &CollisionFilter::projectile())
            .expect("Should hit");

        assert_eq!(hit.target, HitTarget::Body(near));
        assert!((hit.distance - 4.5).abs() < EPSILON);
        assert!((hit.point - Vec3::new(0.0, 4.5, 1.0)).length() < EPSILON);
        assert_eq!(hit.normal, -Vec3::Y);
    }

    #[test]
    fn test_raycast_skips_player() {
        let mut world = world_with_ground(StepConfig::damped());
        let player = world.add_body(player_body(Vec3::new(0.0, 2.0, 1.0), 1.0, 0.5));
        world.set_player_body(player);
        let target = world.add_body(prop(Vec3::new(0.0, 5.0, 1.0)));

        let ray = Ray::new(Vec3::new(0.0, 0.0, 1.0), Vec3::Y);
        let hits = world.raycast_all(&ray, f32::INFINITY, &CollisionFilter::projectile());

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].target, HitTarget::Body(target));
    }

    #[test]
    fn test_raycast_hits_ground() {
        let world = world_with_ground(StepConfig::damped());
        let ray = Ray::new(Vec3::new(0.0, 0.0, 1.0), Vec3::new(0.0, 1.0, -1.0));

        let hit = world
            .raycast(&ray, f32::INFINITY, &CollisionFilter::projectile())
            .expect("Should hit ground");
        assert_eq!(hit.target, HitTarget::Static(0));
        assert!(hit.point.z.abs() < EPSILON);
        assert_eq!(hit.normal, Vec3::Z);
    }

    #[test]
    fn test_raycast_miss() {
        let world = world_with_ground(StepConfig::damped());
        let ray = Ray::new(Vec3::new(0.0, 0.0, 1.0), Vec3::Y);
        assert!(world.raycast(&ray, f32::INFINITY, &CollisionFilter::projectile()).is_none());
    }

    #[test]
    fn test_raycast_all_sorted() {
        let mut world = PhysicsWorld::new();
        world.add_body(prop(Vec3::new(0.0, 9.0, 0.0)));
        world.add_body(prop(Vec3::new(0.0, 3.0, 0.0)));
        world.add_body(prop(Vec3::new(0.0, 6.0, 0.0)));

        let ray = Ray::new(Vec3::ZERO, Vec3::Y);
        let hits = world.raycast_all(&ray, f32::INFINITY, &CollisionFilter::projectile());

        assert_eq!(hits.len(), 3);
        assert!(hits.windows(2).all(|pair| pair[0].distance <= pair[1].distance));
    }
}

//! Game simulation system
//!
//! Owns the game clock and runs one frame in a fixed order:
//! 1. Advance game time and finish a due reload
//! 2. Step physics
//! 3. Held keys → player forces (for the next step)
//! 4. Sync entity poses from physics
//! 5. Mouse look
//! 6. Camera follows the player
//!
//! Shooting and manual reloads are event driven and go through [`SimulationSystem::fire`]
//! and [`SimulationSystem::reload`].

use std::time::Instant;

use boxshot_core::{FireOutcome, ReloadComplete, ReloadOutcome, Weapon, World};
use boxshot_input::{CameraControl, PlayerController};
use boxshot_math::Vec3;
use boxshot_physics::{CollisionFilter, Ray, RayHit, DEFAULT_JUMP_FORCE, DEFAULT_MOVE_FORCE};

/// Shots have unlimited range
pub const MAX_SHOT_DISTANCE: f32 = f32::INFINITY;

/// Longest frame delta fed to the simulation
pub const MAX_FRAME_DT: f32 = 0.25;

/// Default camera height above the player body center
pub const DEFAULT_EYE_HEIGHT: f32 = 1.0;

/// Result of a simulation update
#[derive(Debug, Default)]
pub struct SimulationResult {
    /// Whether any entity moved and instances need re-uploading
    pub geometry_dirty: bool,
    /// Set on the frame a reload finished
    pub reload_complete: Option<ReloadComplete>,
    /// Whether the jump force was applied this frame
    pub jumped: bool,
}

/// Result of a fire request
#[derive(Debug)]
pub struct ShotResult {
    pub outcome: FireOutcome,
    /// Nearest hit, only when a round was actually fired
    pub hit: Option<RayHit>,
}

/// Manages the game simulation loop
pub struct SimulationSystem {
    last_frame: Instant,
    game_time: f64,
    move_force: f32,
    jump_force: f32,
    eye_height: f32,
}

impl SimulationSystem {
    /// Create a new simulation system
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            game_time: 0.0,
            move_force: DEFAULT_MOVE_FORCE,
            jump_force: DEFAULT_JUMP_FORCE,
            eye_height: DEFAULT_EYE_HEIGHT,
        }
    }

    /// Set movement and jump forces
    pub fn with_forces(mut self, move_force: f32, jump_force: f32) -> Self {
        self.move_force = move_force;
        self.jump_force = jump_force;
        self
    }

    /// Set the camera height above the player body
    pub fn with_eye_height(mut self, eye_height: f32) -> Self {
        self.eye_height = eye_height;
        self
    }

    /// Seconds of simulated time since start
    pub fn game_time(&self) -> f64 {
        self.game_time
    }

    /// Restart the frame clock so setup time is not simulated
    pub fn reset_clock(&mut self) {
        self.last_frame = Instant::now();
    }

    /// Run one frame using the wall-clock delta since the previous call
    ///
    /// The delta is capped at [`MAX_FRAME_DT`] so stalls and window drags
    /// don't turn into one huge step.
    pub fn update<C: CameraControl>(
        &mut self,
        world: &mut World,
        camera: &mut C,
        controller: &mut PlayerController,
        weapon: &mut Weapon,
        cursor_captured: bool,
    ) -> SimulationResult {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32().min(MAX_FRAME_DT);
        self.last_frame = now;

        self.tick(dt, world, camera, controller, weapon, cursor_captured)
    }

    /// Run one frame with an explicit delta
    pub fn tick<C: CameraControl>(
        &mut self,
        dt: f32,
        world: &mut World,
        camera: &mut C,
        controller: &mut PlayerController,
        weapon: &mut Weapon,
        cursor_captured: bool,
    ) -> SimulationResult {
        // 1. Game time and reload timer
        self.game_time += dt as f64;
        let reload_complete = weapon.update(self.game_time);

        // 2. Physics (the step profile decides clamping, substeps and damping)
        world.step_physics(dt);

        // 3. Held keys become forces for the next step
        let mut jumped = false;
        if let Some(physics) = world.physics_mut() {
            if controller.is_moving() {
                physics.apply_player_force(controller.movement_force(&*camera, self.move_force));
            }
            if controller.jump_held() {
                jumped = physics.player_jump(self.jump_force);
            }
        }

        // 4. Visual entities follow their bodies
        world.sync_from_physics();
        let geometry_dirty = world.has_dirty_entities();

        // 5. Mouse look
        controller.apply_look(camera, cursor_captured);

        // 6. Camera follows the player
        if let Some(pos) = world.physics().and_then(|p| p.player_position()) {
            camera.set_position(pos + Vec3::Z * self.eye_height);
        }

        SimulationResult {
            geometry_dirty,
            reload_complete,
            jumped,
        }
    }

    /// Shoot along the camera's heading
    ///
    /// The ray starts at the camera and ignores pitch. It is cast only when
    /// the weapon can fire; the weapon then consumes the round.
    pub fn fire<C: CameraControl>(&self, world: &World, camera: &C, weapon: &mut Weapon) -> ShotResult {
        let hit = if weapon.can_fire() {
            let ray = shot_ray(camera);
            let hit = world
                .physics()
                .and_then(|p| p.raycast(&ray, MAX_SHOT_DISTANCE, &CollisionFilter::projectile()));
            if let Some(hit) = &hit {
                log::info!("Hit point: {}", hit.point);
                hit_effect(hit);
            }
            hit
        } else {
            None
        };

        let outcome = weapon.fire(self.game_time);
        ShotResult { outcome, hit }
    }

    /// Start a manual reload
    pub fn reload(&self, weapon: &mut Weapon) -> ReloadOutcome {
        weapon.reload(self.game_time)
    }
}

impl Default for SimulationSystem {
    fn default() -> Self {
        Self::new()
    }
}

/// Ray from the camera along its flat heading
pub fn shot_ray<C: CameraControl>(camera: &C) -> Ray {
    Ray::new(camera.position(), camera.forward_flat())
}

/// Placeholder for impact visuals
fn hit_effect(hit: &RayHit) {
    log::info!("Hit effect at: {}", hit.point);
}

//! Player controller for FPS-style input handling
//!
//! Controls:
//! - W/S: Forward/backward along the camera heading
//! - A/D: Strafe left/right
//! - Space: Jump (held, evaluated every frame)
//! - Mouse motion: Yaw and pitch while the cursor is captured
//!
//! Keys are tracked as held state and evaluated once per frame by the game
//! loop. Mouse motion accumulates between frames.

use boxshot_math::Vec3;
use winit::event::ElementState;
use winit::keyboard::KeyCode;

/// Default mouse sensitivity (radians per pixel)
pub const DEFAULT_MOUSE_SENSITIVITY: f32 = 0.002;

/// Held-key and mouse-delta state for the player
#[derive(Clone, Debug)]
pub struct PlayerController {
    // Held movement keys
    forward: bool,
    backward: bool,
    left: bool,
    right: bool,
    jump: bool,

    // Mouse deltas since the last frame
    pending_yaw: f32,
    pending_pitch: f32,

    // Configuration
    pub mouse_sensitivity: f32,
}

impl Default for PlayerController {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerController {
    pub fn new() -> Self {
        Self {
            forward: false,
            backward: false,
            left: false,
            right: false,
            jump: false,

            pending_yaw: 0.0,
            pending_pitch: 0.0,

            mouse_sensitivity: DEFAULT_MOUSE_SENSITIVITY,
        }
    }

    /// Process keyboard input
    ///
    /// Returns true if the key is one of the movement keys.
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) -> bool {
        let pressed = state == ElementState::Pressed;

        match key {
            KeyCode::KeyW => { self.forward = pressed; true }
            KeyCode::KeyS => { self.backward = pressed; true }
            KeyCode::KeyA => { self.left = pressed; true }
            KeyCode::KeyD => { self.right = pressed; true }
            KeyCode::Space => { self.jump = pressed; true }
            _ => false,
        }
    }

    /// Process raw mouse movement (pixels)
    pub fn process_mouse_motion(&mut self, delta_x: f64, delta_y: f64) {
        self.pending_yaw += delta_x as f32;
        self.pending_pitch += delta_y as f32;
    }

    /// Release all held keys (e.g. when the window loses focus)
    pub fn release_all(&mut self) {
        self.forward = false;
        self.backward = false;
        self.left = false;
        self.right = false;
        self.jump = false;
    }

    /// Apply accumulated mouse motion to the camera
    ///
    /// Mouse right turns right, mouse up looks up. Motion is discarded
    /// when the cursor is not captured.
    pub fn apply_look<C: CameraControl>(&mut self, camera: &mut C, cursor_captured: bool) {
        if cursor_captured {
            camera.rotate(
                self.pending_yaw * self.mouse_sensitivity,
                -self.pending_pitch * self.mouse_sensitivity,
            );
        }

        // Reset pending mouse movement
        self.pending_yaw = 0.0;
        self.pending_pitch = 0.0;
    }

    /// Sum of the horizontal forces for the held movement keys
    ///
    /// Each held key contributes `move_force` along the camera's flattened
    /// forward or right direction, so opposite keys cancel.
    pub fn movement_force<C: CameraControl>(&self, camera: &C, move_force: f32) -> Vec3 {
        let forward = camera.forward_flat();
        let right = camera.right_flat();
        let mut force = Vec3::ZERO;

        if self.forward {
            force += forward * move_force;
        }
        if self.backward {
            force -= forward * move_force;
        }
        if self.right {
            force += right * move_force;
        }
        if self.left {
            force -= right * move_force;
        }
        force
    }

    /// Whether the jump key is held
    pub fn jump_held(&self) -> bool {
        self.jump
    }

    /// Check if any movement keys are pressed
    pub fn is_moving(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }

    /// Builder: set mouse sensitivity
    pub fn with_mouse_sensitivity(mut self, sensitivity: f32) -> Self {
        self.mouse_sensitivity = sensitivity;
        self
    }
}

/// Trait for camera control
/// Allows the controller to work with different camera implementations
pub trait CameraControl {
    /// Turn by the given angles (radians); pitch is clamped by the camera
    fn rotate(&mut self, delta_yaw: f32, delta_pitch: f32);
    fn set_position(&mut self, position: Vec3);
    fn position(&self) -> Vec3;
    /// Heading in radians; 0 faces +Y and increasing yaw turns right
    fn yaw(&self) -> f32;
    fn pitch(&self) -> f32;

    /// Heading direction on the ground plane
    fn forward_flat(&self) -> Vec3 {
        let yaw = self.yaw();
        Vec3::new(yaw.sin(), yaw.cos(), 0.0)
    }

    /// Right-hand direction on the ground plane
    fn right_flat(&self) -> Vec3 {
        let yaw = self.yaw();
        Vec3::new(yaw.cos(), -yaw.sin(), 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    const EPSILON: f32 = 0.0001;

    #[derive(Default)]
    struct TestCamera {
        position: Vec3,
        yaw: f32,
        pitch: f32,
    }

    impl CameraControl for TestCamera {
        fn rotate(&mut self, delta_yaw: f32, delta_pitch: f32) {
            self.yaw += delta_yaw;
            self.pitch += delta_pitch;
        }
        fn set_position(&mut self, position: Vec3) {
            self.position = position;
        }
        fn position(&self) -> Vec3 {
            self.position
        }
        fn yaw(&self) -> f32 {
            self.yaw
        }
        fn pitch(&self) -> f32 {
            self.pitch
        }
    }

    #[test]
    fn test_keys_are_held_until_released() {
        let mut controller = PlayerController::new();
        assert!(controller.process_keyboard(KeyCode::KeyW, ElementState::Pressed));
        assert!(controller.is_moving());

        controller.process_keyboard(KeyCode::KeyW, ElementState::Released);
        assert!(!controller.is_moving());
    }

    #[test]
    fn test_unrelated_key_is_ignored() {
        let mut controller = PlayerController::new();
        assert!(!controller.process_keyboard(KeyCode::KeyR, ElementState::Pressed));
        assert!(!controller.is_moving());
    }

    #[test]
    fn test_jump_is_held_state() {
        let mut controller = PlayerController::new();
        controller.process_keyboard(KeyCode::Space, ElementState::Pressed);
        assert!(controller.jump_held());
        assert!(controller.jump_held());
        controller.process_keyboard(KeyCode::Space, ElementState::Released);
        assert!(!controller.jump_held());
    }

    #[test]
    fn test_forward_force_follows_yaw() {
        let mut controller = PlayerController::new();
        controller.process_keyboard(KeyCode::KeyW, ElementState::Pressed);

        let camera = TestCamera::default();
        let force = controller.movement_force(&camera, 20.0);
        assert!((force - Vec3::new(0.0, 20.0, 0.0)).length() < EPSILON);

        let turned = TestCamera { yaw: FRAC_PI_2, ..Default::default() };
        let force = controller.movement_force(&turned, 20.0);
        assert!((force - Vec3::new(20.0, 0.0, 0.0)).length() < EPSILON);
    }

    #[test]
    fn test_strafe_force() {
        let mut controller = PlayerController::new();
        controller.process_keyboard(KeyCode::KeyD, ElementState::Pressed);
        let force = controller.movement_force(&TestCamera::default(), 10.0);
        assert!((force - Vec3::new(10.0, 0.0, 0.0)).length() < EPSILON);

        controller.process_keyboard(KeyCode::KeyD, ElementState::Released);
        controller.process_keyboard(KeyCode::KeyA, ElementState::Pressed);
        let force = controller.movement_force(&TestCamera::default(), 10.0);
        assert!((force - Vec3::new(-10.0, 0.0, 0.0)).length() < EPSILON);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let mut controller = PlayerController::new();
        controller.process_keyboard(KeyCode::KeyW, ElementState::Pressed);
        controller.process_keyboard(KeyCode::KeyS, ElementState::Pressed);
        let force = controller.movement_force(&TestCamera::default(), 20.0);
        assert!(force.length() < EPSILON);
    }

    #[test]
    fn test_look_applies_sensitivity_and_resets() {
        let mut controller = PlayerController::new().with_mouse_sensitivity(0.01);
        let mut camera = TestCamera::default();

        controller.process_mouse_motion(10.0, 5.0);
        controller.process_mouse_motion(10.0, 5.0);
        controller.apply_look(&mut camera, true);

        assert!((camera.yaw - 0.2).abs() < EPSILON);
        // Mouse down looks down
        assert!((camera.pitch + 0.1).abs() < EPSILON);

        controller.apply_look(&mut camera, true);
        assert!((camera.yaw - 0.2).abs() < EPSILON);
    }

    #[test]
    fn test_look_ignored_when_not_captured() {
        let mut controller = PlayerController::new();
        let mut camera = TestCamera::default();

        controller.process_mouse_motion(100.0, 100.0);
        controller.apply_look(&mut camera, false);
        assert_eq!(camera.yaw, 0.0);

        // Discarded, not deferred
        controller.apply_look(&mut camera, true);
        assert_eq!(camera.yaw, 0.0);
    }

    #[test]
    fn test_release_all() {
        let mut controller = PlayerController::new();
        controller.process_keyboard(KeyCode::KeyA, ElementState::Pressed);
        controller.process_keyboard(KeyCode::Space, ElementState::Pressed);
        controller.release_all();
        assert!(!controller.is_moving());
        assert!(!controller.jump_held());
    }
}

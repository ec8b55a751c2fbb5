//! First-person camera
//!
//! The camera sits at a world position and looks along a yaw/pitch heading.
//! Yaw 0 faces +Y and increases when turning right; positive pitch looks up.
//! Z is up.

use boxshot_input::CameraControl;
use boxshot_math::{mat4, Mat4, Vec3};

/// Default pitch clamp (80 degrees)
pub const DEFAULT_PITCH_LIMIT: f32 = 80.0 * std::f32::consts::PI / 180.0;

/// First-person perspective camera
#[derive(Clone, Debug)]
pub struct Camera {
    pub position: Vec3,
    yaw: f32,
    pitch: f32,
    /// Largest allowed |pitch| in radians
    pub pitch_limit: f32,
    /// Vertical field of view in radians
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

impl Camera {
    pub fn new() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 1.5),
            yaw: 0.0,
            pitch: 0.0,
            pitch_limit: DEFAULT_PITCH_LIMIT,
            fov: std::f32::consts::FRAC_PI_4,
            near: 0.1,
            far: 1000.0,
        }
    }

    /// Set the projection parameters (fov in degrees)
    pub fn with_projection(mut self, fov_degrees: f32, near: f32, far: f32) -> Self {
        self.fov = fov_degrees.to_radians();
        self.near = near;
        self.far = far;
        self
    }

    /// Set the pitch clamp (degrees)
    pub fn with_pitch_limit(mut self, degrees: f32) -> Self {
        self.pitch_limit = degrees.to_radians();
        self.pitch = self.pitch.clamp(-self.pitch_limit, self.pitch_limit);
        self
    }

    /// Full view direction including pitch
    pub fn forward(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        Vec3::new(sin_yaw * cos_pitch, cos_yaw * cos_pitch, sin_pitch)
    }

    pub fn view_matrix(&self) -> Mat4 {
        mat4::look_at(self.position, self.position + self.forward(), Vec3::Z)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        mat4::perspective(self.fov, aspect, self.near, self.far)
    }

    /// Projection times view, ready for upload
    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        mat4::mul(self.projection_matrix(aspect), self.view_matrix())
    }
}

impl CameraControl for Camera {
    fn rotate(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw += delta_yaw;
        self.pitch = (self.pitch + delta_pitch).clamp(-self.pitch_limit, self.pitch_limit);
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

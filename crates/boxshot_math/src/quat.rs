//! Unit quaternion for representing rotations in 3D space
//!
//! A quaternion has 4 components:
//! - 1 scalar (`w`)
//! - 3 vector components (`x`, `y`, `z`)
//!
//! Rotating a vector v by q is `q * v * q⁻¹`.

use bytemuck::{Pod, Zeroable};
use serde::{Serialize, Deserialize};
use crate::Vec3;

/// Rotation quaternion
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Quat {
    /// Scalar component
    pub w: f32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quat {
    /// Identity quaternion (no rotation)
    pub const IDENTITY: Self = Self {
        w: 1.0,
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Create a quaternion for a rotation of `angle` radians around `axis`
    ///
    /// The axis does not need to be normalized.
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        let axis = axis.normalized();
        let half = angle * 0.5;
        let s = half.sin();
        Self {
            w: half.cos(),
            x: axis.x * s,
            y: axis.y * s,
            z: axis.z * s,
        }
    }

    /// Squared magnitude
    #[inline]
    pub fn magnitude_squared(&self) -> f32 {
        self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Magnitude
    #[inline]
    pub fn magnitude(&self) -> f32 {
        self.magnitude_squared().sqrt()
    }

    /// Normalize to unit length (identity if degenerate)
    pub fn normalize(&self) -> Self {
        let mag = self.magnitude();
        if mag < 1e-10 {
            return Self::IDENTITY;
        }
        Self {
            w: self.w / mag,
            x: self.x / mag,
            y: self.y / mag,
            z: self.z / mag,
        }
    }

    /// Conjugate (the inverse rotation for unit quaternions)
    pub fn reverse(&self) -> Self {
        Self {
            w: self.w,
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }

    /// Rotate a vector by this quaternion
    pub fn rotate(&self, v: Vec3) -> Vec3 {
        // v' = v + 2w(q × v) + 2 q × (q × v)
        let q = Vec3::new(self.x, self.y, self.z);
        let t = q.cross(v) * 2.0;
        v + t * self.w + q.cross(t)
    }

    /// Compose two rotations: the result applies `other` first, then `self`
    pub fn compose(&self, other: &Self) -> Self {
        let a = self;
        let b = other;
        Self {
            w: a.w * b.w - a.x * b.x - a.y * b.y - a.z * b.z,
            x: a.w * b.x + a.x * b.w + a.y * b.z - a.z * b.y,
            y: a.w * b.y - a.x * b.z + a.y * b.w + a.z * b.x,
            z: a.w * b.z + a.x * b.y - a.y * b.x + a.z * b.w,
        }
    }

    /// Advance this orientation by a world-space angular velocity over `dt`
    ///
    /// Uses the exact exponential map for the step, so large angular
    /// velocities do not denormalize the result.
    pub fn integrate(&self, angular_velocity: Vec3, dt: f32) -> Self {
        let angle = angular_velocity.length() * dt;
        if angle.abs() < 1e-9 {
            return *self;
        }
        let delta = Self::from_axis_angle(angular_velocity, angle);
        delta.compose(self).normalize()
    }

    /// Convert to a 4x4 rotation matrix (column-major)
    pub fn to_matrix(&self) -> [[f32; 4]; 4] {
        let x_col = self.rotate(Vec3::X);
        let y_col = self.rotate(Vec3::Y);
        let z_col = self.rotate(Vec3::Z);

        [
            [x_col.x, x_col.y, x_col.z, 0.0],
            [y_col.x, y_col.y, y_col.z, 0.0],
            [z_col.x, z_col.y, z_col.z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]
    }
}

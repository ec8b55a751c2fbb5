//! 4x4 Matrix utilities for rendering transforms
//!
//! Matrices are column-major (`m[column][row]`), matching WGSL's `mat4x4<f32>`
//! layout, so they can be uploaded to the GPU as-is.

use crate::{Quat, Vec3};

/// 4x4 matrix type (column-major)
pub type Mat4 = [[f32; 4]; 4];

/// Identity matrix
pub const IDENTITY: Mat4 = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// Multiply two matrices (`a * b`, so `b` is applied first)
pub fn mul(a: Mat4, b: Mat4) -> Mat4 {
    let mut result = [[0.0f32; 4]; 4];
    for c in 0..4 {
        for r in 0..4 {
            result[c][r] = a[0][r] * b[c][0] + a[1][r] * b[c][1] + a[2][r] * b[c][2] + a[3][r] * b[c][3];
        }
    }
    result
}

/// Build a model matrix from translation, rotation and per-axis scale
///
/// Applies scale, then rotation, then translation.
pub fn from_trs(translation: Vec3, rotation: Quat, scale: Vec3) -> Mat4 {
    let r = rotation.to_matrix();
    [
        [r[0][0] * scale.x, r[0][1] * scale.x, r[0][2] * scale.x, 0.0],
        [r[1][0] * scale.y, r[1][1] * scale.y, r[1][2] * scale.y, 0.0],
        [r[2][0] * scale.z, r[2][1] * scale.z, r[2][2] * scale.z, 0.0],
        [translation.x, translation.y, translation.z, 1.0],
    ]
}

/// Transform a point (w = 1) by a matrix
pub fn transform_point(m: &Mat4, p: Vec3) -> Vec3 {
    Vec3::new(
        m[0][0] * p.x + m[1][0] * p.y + m[2][0] * p.z + m[3][0],
        m[0][1] * p.x + m[1][1] * p.y + m[2][1] * p.z + m[3][1],
        m[0][2] * p.x + m[1][2] * p.y + m[2][2] * p.z + m[3][2],
    )
}

/// Right-handed perspective projection with a 0..1 depth range (wgpu clip space)
pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    let f = 1.0 / (fov_y / 2.0).tan();
    let nf = 1.0 / (near - far);

    [
        [f / aspect, 0.0, 0.0, 0.0],
        [0.0, f, 0.0, 0.0],
        [0.0, 0.0, far * nf, -1.0],
        [0.0, 0.0, near * far * nf, 0.0],
    ]
}

/// Right-handed look-at view matrix
pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
    let f = (target - eye).normalized();
    let s = f.cross(up).normalized();
    let u = s.cross(f);

    [
        [s.x, u.x, -f.x, 0.0],
        [s.y, u.y, -f.y, 0.0],
        [s.z, u.z, -f.z, 0.0],
        [-s.dot(eye), -u.dot(eye), f.dot(eye), 1.0],
    ]
}

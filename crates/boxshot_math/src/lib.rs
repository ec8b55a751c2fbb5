//! 3D Mathematics Library
//!
//! This crate provides the vector, rotation, and matrix types for the Boxshot demo.
//!
//! ## Core Types
//!
//! - [`Vec3`] - 3D vector with x, y, z components (Z-up world)
//! - [`Quat`] - Unit quaternion rotation
//! - [`Mat4`] - Column-major 4x4 matrix for rendering transforms

mod vec3;
mod quat;
pub mod mat4;

pub use vec3::Vec3;
pub use quat::Quat;
pub use mat4::Mat4;

//! Collision shapes
//!
//! Lightweight primitives used for collision detection and queries,
//! separate from the render meshes in boxshot_render.

use boxshot_math::Vec3;

/// An axis-aligned bounding box
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    /// Minimum corner (all components are minimums)
    pub min: Vec3,
    /// Maximum corner (all components are maximums)
    pub max: Vec3,
}

impl Aabb {
    /// Create a new AABB from min and max corners
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create an AABB centered at a position with given half-extents
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Get the center of the AABB
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get the half-extents of the AABB
    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Check if a point is inside or on the AABB
    pub fn contains(&self, point: Vec3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// Get the closest point on or in the AABB to a given point
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        point.max_components(self.min).min_components(self.max)
    }

    /// Return a copy moved by `offset`
    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }
}

/// A half-line used for scene queries
#[derive(Clone, Copy, Debug)]
pub struct Ray {
    /// Start point
    pub origin: Vec3,
    /// Unit direction
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray; the direction is normalized
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalized(),
        }
    }

    /// Point at distance `t` along the ray
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_from_center() {
        let aabb = Aabb::from_center_half_extents(Vec3::new(1.0, 2.0, 3.0), Vec3::splat(0.5));
        assert_eq!(aabb.min, Vec3::new(0.5, 1.5, 2.5));
        assert_eq!(aabb.max, Vec3::new(1.5, 2.5, 3.5));
        assert_eq!(aabb.center(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(aabb.half_extents(), Vec3::splat(0.5));
    }

    #[test]
    fn test_aabb_contains() {
        let aabb = Aabb::from_center_half_extents(Vec3::ZERO, Vec3::ONE);
        assert!(aabb.contains(Vec3::ZERO));
        assert!(aabb.contains(Vec3::new(1.0, 1.0, 1.0)));
        assert!(!aabb.contains(Vec3::new(1.1, 0.0, 0.0)));
    }

    #[test]
    fn test_aabb_closest_point() {
        let aabb = Aabb::from_center_half_extents(Vec3::ZERO, Vec3::ONE);
        assert_eq!(aabb.closest_point(Vec3::new(5.0, 0.5, -3.0)), Vec3::new(1.0, 0.5, -1.0));
    }

    #[test]
    fn test_aabb_translated() {
        let aabb = Aabb::from_center_half_extents(Vec3::ZERO, Vec3::ONE).translated(Vec3::Z);
        assert_eq!(aabb.center(), Vec3::Z);
    }

    #[test]
    fn test_ray_normalizes_direction() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 3.0, 0.0));
        assert_eq!(ray.direction, Vec3::Y);
        assert_eq!(ray.at(2.0), Vec3::new(0.0, 2.0, 0.0));
    }
}

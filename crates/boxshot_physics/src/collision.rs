//! Collision detection
//!
//! Provides box-box contact generation, ray-box intersection, and collision
//! filtering via layer masks.

use bitflags::bitflags;

use crate::shapes::{Aabb, Ray};
use boxshot_math::Vec3;

bitflags! {
    /// Collision layers for filtering which objects can collide
    ///
    /// Each layer is a bit in a 32-bit mask. Objects can belong to multiple layers
    /// and can define which layers they collide with via a collision mask.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct CollisionLayer: u32 {
        /// Default layer for most objects
        const DEFAULT = 1 << 0;
        /// Player character layer
        const PLAYER = 1 << 1;
        /// Static world geometry (ground)
        const STATIC = 1 << 2;
        /// Dynamic props (the boxes)
        const PROP = 1 << 3;
        /// Shot rays
        const PROJECTILE = 1 << 4;
        /// All layers (collide with everything)
        const ALL = 0xFFFFFFFF;
    }
}

/// Collision filter determining what an object collides with
///
/// Two objects A and B collide if:
/// - (A.layer & B.mask) != 0, AND
/// - (B.layer & A.mask) != 0
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CollisionFilter {
    /// Which layer(s) this object belongs to
    pub layer: CollisionLayer,
    /// Which layer(s) this object can collide with
    pub mask: CollisionLayer,
}

impl Default for CollisionFilter {
    fn default() -> Self {
        Self {
            layer: CollisionLayer::DEFAULT,
            mask: CollisionLayer::ALL,
        }
    }
}

impl CollisionFilter {
    /// Create a new collision filter with specified layer and mask
    pub fn new(layer: CollisionLayer, mask: CollisionLayer) -> Self {
        Self { layer, mask }
    }

    /// Check if this filter allows collision with another filter
    pub fn collides_with(&self, other: &Self) -> bool {
        self.layer.intersects(other.mask) && other.layer.intersects(self.mask)
    }

    /// Filter for the player body
    ///
    /// The player is solid against the world and props but is never hit by its own shots.
    pub fn player() -> Self {
        Self {
            layer: CollisionLayer::PLAYER,
            mask: CollisionLayer::ALL & !CollisionLayer::PLAYER & !CollisionLayer::PROJECTILE,
        }
    }

    /// Filter for dynamic props
    pub fn prop() -> Self {
        Self {
            layer: CollisionLayer::PROP,
            mask: CollisionLayer::ALL,
        }
    }

    /// Filter for static world geometry
    pub fn static_world() -> Self {
        Self {
            layer: CollisionLayer::STATIC,
            mask: CollisionLayer::ALL,
        }
    }

    /// Filter for shot rays: hits props, static geometry and default objects
    pub fn projectile() -> Self {
        Self {
            layer: CollisionLayer::PROJECTILE,
            mask: CollisionLayer::DEFAULT | CollisionLayer::STATIC | CollisionLayer::PROP,
        }
    }
}

/// Contact information from a collision
#[derive(Clone, Copy, Debug)]
pub struct Contact {
    /// Point of contact (center of the overlap region)
    pub point: Vec3,
    /// Normal pointing from the second shape toward the first
    pub normal: Vec3,
    /// Penetration depth (positive means overlapping)
    pub penetration: f32,
}

impl Contact {
    /// Create a new contact
    pub fn new(point: Vec3, normal: Vec3, penetration: f32) -> Self {
        Self {
            point,
            normal,
            penetration,
        }
    }

    /// Check if this represents an actual collision (positive penetration)
    pub fn is_colliding(&self) -> bool {
        self.penetration > 0.0
    }
}

/// Test AABB vs AABB collision
///
/// Returns a contact if the boxes overlap. The normal points from `b` toward `a`
/// along the axis of least overlap, so moving `a` by `normal * penetration`
/// separates them.
pub fn aabb_vs_aabb(a: &Aabb, b: &Aabb) -> Option<Contact> {
    if a.max.x < b.min.x || a.min.x > b.max.x {
        return None;
    }
    if a.max.y < b.min.y || a.min.y > b.max.y {
        return None;
    }
    if a.max.z < b.min.z || a.min.z > b.max.z {
        return None;
    }

    let overlap_x = (a.max.x.min(b.max.x) - a.min.x.max(b.min.x)).max(0.0);
    let overlap_y = (a.max.y.min(b.max.y) - a.min.y.max(b.min.y)).max(0.0);
    let overlap_z = (a.max.z.min(b.max.z) - a.min.z.max(b.min.z)).max(0.0);

    let a_center = a.center();
    let b_center = b.center();

    let mut min_overlap = overlap_x;
    let mut normal = if a_center.x < b_center.x { -Vec3::X } else { Vec3::X };

    if overlap_y < min_overlap {
        min_overlap = overlap_y;
        normal = if a_center.y < b_center.y { -Vec3::Y } else { Vec3::Y };
    }
    if overlap_z < min_overlap {
        min_overlap = overlap_z;
        normal = if a_center.z < b_center.z { -Vec3::Z } else { Vec3::Z };
    }

    let overlap_min = a.min.max_components(b.min);
    let overlap_max = a.max.min_components(b.max);
    let point = (overlap_min + overlap_max) * 0.5;

    Some(Contact::new(point, normal, min_overlap))
}

/// Intersect a ray with an AABB (slab method)
///
/// Returns the distance along the ray and the surface normal at the hit.
/// A ray starting inside the box reports the exit point.
pub fn ray_vs_aabb(ray: &Ray, aabb: &Aabb, max_distance: f32) -> Option<(f32, Vec3)> {
    let mut t_enter = f32::NEG_INFINITY;
    let mut t_exit = f32::INFINITY;
    let mut enter_axis = 0;
    let mut exit_axis = 0;

    for axis in 0..3 {
        let origin = ray.origin.axis(axis);
        let dir = ray.direction.axis(axis);
        let min = aabb.min.axis(axis);
        let max = aabb.max.axis(axis);

        if dir.abs() < 1e-8 {
            // Parallel to this slab: must already be inside it
            if origin < min || origin > max {
                return None;
            }
            continue;
        }

        let inv = 1.0 / dir;
        let t1 = (min - origin) * inv;
        let t2 = (max - origin) * inv;
        let (near, far) = if t1 < t2 { (t1, t2) } else { (t2, t1) };

        if near > t_enter {
            t_enter = near;
            enter_axis = axis;
        }
        if far < t_exit {
            t_exit = far;
            exit_axis = axis;
        }
        if t_enter > t_exit {
            return None;
        }
    }

    if t_exit < 0.0 {
        return None;
    }

    let (t, axis, facing) = if t_enter >= 0.0 {
        (t_enter, enter_axis, -1.0)
    } else {
        (t_exit, exit_axis, 1.0)
    };
    if t > max_distance {
        return None;
    }

    let sign = if ray.direction.axis(axis) > 0.0 { facing } else { -facing };
    let normal = match axis {
        0 => Vec3::X * sign,
        1 => Vec3::Y * sign,
        _ => Vec3::Z * sign,
    };

    Some((t, normal))
}

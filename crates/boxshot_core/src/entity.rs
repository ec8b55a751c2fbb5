//! Entity and Material types
//!
//! An Entity is a visible box in the world with a transform and material,
//! optionally driven by a physics body.

use std::collections::HashSet;
use bitflags::bitflags;
use boxshot_math::{Quat, Vec3};
use boxshot_physics::BodyKey;
use serde::{Serialize, Deserialize};
use crate::Transform;

bitflags! {
    /// Flags indicating which parts of an entity have changed and need updating
    ///
    /// Used for dirty tracking so the renderer only re-uploads instances
    /// when something moved or changed color.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct DirtyFlags: u8 {
        /// No changes
        const NONE = 0;
        /// Transform (position, rotation, scale) has changed
        const TRANSFORM = 1 << 0;
        /// Material has changed
        const MATERIAL = 1 << 1;
        /// All flags set - entity needs full rebuild
        const ALL = Self::TRANSFORM.bits() | Self::MATERIAL.bits();
    }
}

/// A simple material with just a base color
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Base color as RGBA (each component 0.0-1.0)
    pub base_color: [f32; 4],
}

impl Default for Material {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Material {
    /// Create a new material with the given RGBA color
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            base_color: [r, g, b, a],
        }
    }

    /// Create a new opaque material with the given RGB color
    pub fn from_rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// White material
    pub const WHITE: Self = Self { base_color: [1.0, 1.0, 1.0, 1.0] };

    /// Gray material
    pub const GRAY: Self = Self { base_color: [0.5, 0.5, 0.5, 1.0] };
}

/// An entity in the world
///
/// Each entity is drawn as a unit cube centered on its position and scaled
/// by its transform. It has:
/// - An optional name (for lookup by name)
/// - Tags (for categorization and filtering)
/// - A transform (position, rotation, scale)
/// - A material (visual properties)
/// - An optional physics body key (links to PhysicsWorld)
/// - Dirty flags (for change tracking)
#[derive(Clone, Debug)]
pub struct Entity {
    /// Optional name for this entity (for lookup)
    pub name: Option<String>,
    /// Tags for categorization (e.g., "dynamic", "static", "player")
    pub tags: HashSet<String>,
    /// The entity's transform in world space
    pub transform: Transform,
    /// The entity's material
    pub material: Material,
    /// Optional physics body key (links to PhysicsWorld)
    pub physics_body: Option<BodyKey>,
    /// Dirty flags for change tracking (what needs rebuilding)
    dirty: DirtyFlags,
}

impl Entity {
    /// Create a new entity with the given transform and material
    pub fn new(transform: Transform, material: Material) -> Self {
        Self {
            name: None,
            tags: HashSet::new(),
            transform,
            material,
            physics_body: None,
            dirty: DirtyFlags::ALL, // New entities are dirty
        }
    }

    /// Set the name of this entity (for lookup)
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Add a tag to this entity
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    /// Add multiple tags to this entity
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        for tag in tags {
            self.tags.insert(tag.into());
        }
        self
    }

    /// Check if this entity has a specific tag
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Attach a physics body to this entity
    pub fn with_physics_body(mut self, key: BodyKey) -> Self {
        self.physics_body = Some(key);
        self
    }

    // --- Dirty tracking methods ---

    /// Check if this entity has any dirty flags set
    #[inline]
    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Get the current dirty flags
    #[inline]
    pub fn dirty_flags(&self) -> DirtyFlags {
        self.dirty
    }

    /// Mark this entity as dirty with the given flags
    #[inline]
    pub fn mark_dirty(&mut self, flags: DirtyFlags) {
        self.dirty |= flags;
    }

    /// Clear all dirty flags
    #[inline]
    pub fn clear_dirty(&mut self) {
        self.dirty = DirtyFlags::NONE;
    }

    /// Set the position and mark the transform as dirty
    pub fn set_position(&mut self, position: Vec3) {
        self.transform.position = position;
        self.mark_dirty(DirtyFlags::TRANSFORM);
    }

    /// Set position and rotation together, marking the transform dirty if either changed
    pub fn set_pose(&mut self, position: Vec3, rotation: Quat) {
        if self.transform.position != position || self.transform.rotation != rotation {
            self.transform.position = position;
            self.transform.rotation = rotation;
            self.mark_dirty(DirtyFlags::TRANSFORM);
        }
    }

    /// Set the transform and mark it as dirty
    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
        self.mark_dirty(DirtyFlags::TRANSFORM);
    }

    /// Set the material and mark it as dirty
    pub fn set_material(&mut self, material: Material) {
        self.material = material;
        self.mark_dirty(DirtyFlags::MATERIAL);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_entity() -> Entity {
        Entity::new(Transform::identity(), Material::default())
    }

    #[test]
    fn test_material_default() {
        let m = Material::default();
        assert_eq!(m.base_color, [1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_material_from_rgb() {
        let m = Material::from_rgb(0.5, 0.25, 0.0);
        assert_eq!(m.base_color, [0.5, 0.25, 0.0, 1.0]);
    }

    #[test]
    fn test_entity_new() {
        let entity = Entity::new(Transform::from_position(Vec3::new(1.0, 2.0, 3.0)), Material::GRAY);
        assert_eq!(entity.transform.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(entity.material, Material::GRAY);
        assert!(entity.name.is_none());
        assert!(entity.physics_body.is_none());
    }

    #[test]
    fn test_entity_name_and_tags() {
        let entity = make_entity()
            .with_name("player")
            .with_tag("player")
            .with_tags(["dynamic", "visible"]);

        assert_eq!(entity.name.as_deref(), Some("player"));
        assert!(entity.has_tag("player"));
        assert!(entity.has_tag("dynamic"));
        assert!(entity.has_tag("visible"));
        assert!(!entity.has_tag("static"));
    }

    #[test]
    fn test_dirty_flags_all() {
        assert!(DirtyFlags::ALL.contains(DirtyFlags::TRANSFORM));
        assert!(DirtyFlags::ALL.contains(DirtyFlags::MATERIAL));
        assert!(DirtyFlags::default().is_empty());
    }

    #[test]
    fn test_new_entity_is_dirty() {
        let entity = make_entity();
        assert!(entity.is_dirty());
        assert_eq!(entity.dirty_flags(), DirtyFlags::ALL);
    }

    #[test]
    fn test_entity_clear_dirty() {
        let mut entity = make_entity();
        entity.clear_dirty();
        assert!(!entity.is_dirty());
    }

    #[test]
    fn test_set_position_marks_dirty() {
        let mut entity = make_entity();
        entity.clear_dirty();
        entity.set_position(Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(entity.dirty_flags(), DirtyFlags::TRANSFORM);
    }

    #[test]
    fn test_set_pose_only_marks_on_change() {
        let mut entity = make_entity();
        entity.clear_dirty();

        entity.set_pose(Vec3::ZERO, Quat::IDENTITY);
        assert!(!entity.is_dirty());

        let spun = Quat::from_axis_angle(Vec3::Z, 0.5);
        entity.set_pose(Vec3::ZERO, spun);
        assert_eq!(entity.dirty_flags(), DirtyFlags::TRANSFORM);
        assert_eq!(entity.transform.rotation, spun);
    }

    #[test]
    fn test_set_material_marks_dirty() {
        let mut entity = make_entity();
        entity.clear_dirty();
        entity.set_material(Material::GRAY);
        assert_eq!(entity.dirty_flags(), DirtyFlags::MATERIAL);
    }

    #[test]
    fn test_mark_dirty_combines_flags() {
        let mut entity = make_entity();
        entity.clear_dirty();
        entity.mark_dirty(DirtyFlags::TRANSFORM);
        entity.mark_dirty(DirtyFlags::MATERIAL);
        assert_eq!(entity.dirty_flags(), DirtyFlags::ALL);
    }
}

//! Scene serialization
//!
//! A Scene is the static description of a level: the player, gravity, the
//! ground, the dynamic boxes and the lights. Scenes load from and save to
//! RON files; [`Scene::default`] is the built-in arena.

use serde::{Serialize, Deserialize};
use std::path::Path;
use std::fs;
use std::io;

use boxshot_math::Vec3;
use crate::entity::Material;
use crate::weapon::WeaponConfig;

/// Player spawn, body and weapon settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Spawn position
    pub position: Vec3,
    /// Visual scale of the player model
    pub scale: f32,
    /// Body mass
    pub mass: f32,
    /// Body friction
    pub friction: f32,
    /// Rounds in the reserve at start
    pub max_ammo: u32,
    /// Clip capacity
    pub ammo_per_reload: u32,
    /// Reload duration in seconds
    pub reload_time: f64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 2.0),
            scale: 0.5,
            mass: 1.0,
            friction: 0.5,
            max_ammo: 1000,
            ammo_per_reload: 20,
            reload_time: 2.0,
        }
    }
}

impl PlayerConfig {
    /// Weapon settings carried by this player
    pub fn weapon(&self) -> WeaponConfig {
        WeaponConfig {
            max_ammo: self.max_ammo,
            ammo_per_reload: self.ammo_per_reload,
            reload_time: self.reload_time,
        }
    }
}

/// World-wide physics settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsWorldConfig {
    /// Gravity acceleration (Z-up)
    pub gravity: Vec3,
}

impl Default for PhysicsWorldConfig {
    fn default() -> Self {
        Self {
            gravity: Vec3::new(0.0, 0.0, -9.81),
        }
    }
}

/// One dynamic box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicsBoxConfig {
    /// Spawn position
    pub position: Vec3,
    /// Half extents of the box
    pub size: Vec3,
    pub mass: f32,
    pub friction: f32,
    #[serde(default)]
    pub material: Material,
}

impl PhysicsBoxConfig {
    pub fn new(position: Vec3, size: Vec3, mass: f32, friction: f32) -> Self {
        Self {
            position,
            size,
            mass,
            friction,
            material: Material::default(),
        }
    }
}

/// Static ground slab
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundConfig {
    /// Center of the slab
    pub position: Vec3,
    /// Half extents of the slab
    pub half_extents: Vec3,
    pub friction: f32,
    pub material: Material,
}

impl Default for GroundConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, -0.1),
            half_extents: Vec3::new(50.0, 50.0, 0.1),
            friction: 0.5,
            material: Material::GRAY,
        }
    }
}

/// One directional light plus ambient light
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    /// Directional light color (RGB)
    pub directional_color: [f32; 3],
    /// Light heading in degrees, counterclockwise from +Y seen from above
    pub heading: f32,
    /// Light pitch in degrees (negative aims down)
    pub pitch: f32,
    /// Ambient light color (RGB)
    pub ambient_color: [f32; 3],
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            directional_color: [0.8, 0.8, 0.8],
            heading: 45.0,
            pitch: -45.0,
            ambient_color: [0.2, 0.2, 0.2],
        }
    }
}

impl LightingConfig {
    /// Unit vector the directional light travels along
    pub fn direction(&self) -> Vec3 {
        let heading = self.heading.to_radians();
        let pitch = self.pitch.to_radians();
        Vec3::new(
            -heading.sin() * pitch.cos(),
            heading.cos() * pitch.cos(),
            pitch.sin(),
        )
    }
}

/// A serializable scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Scene name (for display/debugging)
    pub name: String,
    #[serde(default)]
    pub player: PlayerConfig,
    #[serde(default)]
    pub physics: PhysicsWorldConfig,
    #[serde(default)]
    pub ground: GroundConfig,
    #[serde(default)]
    pub lighting: LightingConfig,
    /// Dynamic boxes
    #[serde(default)]
    pub boxes: Vec<PhysicsBoxConfig>,
}

impl Default for Scene {
    /// The built-in arena: two boxes in front of the player
    fn default() -> Self {
        Self::new("Arena")
            .with_box(PhysicsBoxConfig::new(Vec3::new(5.0, 0.0, 2.0), Vec3::splat(0.5), 1.0, 0.5))
            .with_box(PhysicsBoxConfig::new(Vec3::new(5.0, 5.0, 2.0), Vec3::splat(0.5), 1.0, 0.5))
    }
}

impl Scene {
    /// Create a scene with default player, physics, ground and lighting and no boxes
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            player: PlayerConfig::default(),
            physics: PhysicsWorldConfig::default(),
            ground: GroundConfig::default(),
            lighting: LightingConfig::default(),
            boxes: Vec::new(),
        }
    }

    /// Load a scene from a RON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SceneError> {
        let contents = fs::read_to_string(path)?;
        let scene = ron::from_str(&contents)?;
        Ok(scene)
    }

    /// Load a scene, falling back to the built-in one on any error
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(scene) => {
                log::info!("Loaded scene '{}' from {}", scene.name, path.display());
                scene
            }
            Err(e) => {
                log::warn!("Failed to load scene {}: {}. Using built-in scene.", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save a scene to a RON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SceneError> {
        let contents = self.to_ron()?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Serialize to pretty RON
    pub fn to_ron(&self) -> Result<String, SceneError> {
        let pretty = ron::ser::PrettyConfig::new()
            .struct_names(true)
            .enumerate_arrays(false);
        Ok(ron::ser::to_string_pretty(self, pretty)?)
    }

    /// Add a dynamic box
    pub fn with_box(mut self, config: PhysicsBoxConfig) -> Self {
        self.boxes.push(config);
        self
    }

    /// Set the gravity for this scene
    pub fn with_gravity(mut self, gravity: Vec3) -> Self {
        self.physics.gravity = gravity;
        self
    }

    /// Set the player spawn position
    pub fn with_player_spawn(mut self, position: Vec3) -> Self {
        self.player.position = position;
        self
    }
}

/// Error loading or saving a scene
#[derive(Debug)]
pub enum SceneError {
    /// IO error (file not found, permission denied, etc.)
    Io(io::Error),
    /// Parse error (invalid RON syntax)
    Parse(ron::error::SpannedError),
    /// Serialization error
    Serialize(ron::Error),
}

impl From<io::Error> for SceneError {
    fn from(e: io::Error) -> Self {
        SceneError::Io(e)
    }
}

impl From<ron::error::SpannedError> for SceneError {
    fn from(e: ron::error::SpannedError) -> Self {
        SceneError::Parse(e)
    }
}

impl From<ron::Error> for SceneError {
    fn from(e: ron::Error) -> Self {
        SceneError::Serialize(e)
    }
}

impl std::fmt::Display for SceneError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneError::Io(e) => write!(f, "IO error: {}", e),
            SceneError::Parse(e) => write!(f, "Parse error: {}", e),
            SceneError::Serialize(e) => write!(f, "Serialize error: {}", e),
        }
    }
}

impl std::error::Error for SceneError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scene_matches_arena() {
        let scene = Scene::default();
        assert_eq!(scene.name, "Arena");
        assert_eq!(scene.player.position, Vec3::new(0.0, 0.0, 2.0));
        assert_eq!(scene.player.scale, 0.5);
        assert_eq!(scene.physics.gravity, Vec3::new(0.0, 0.0, -9.81));
        assert_eq!(scene.boxes.len(), 2);
        assert_eq!(scene.boxes[0].position, Vec3::new(5.0, 0.0, 2.0));
        assert_eq!(scene.boxes[1].position, Vec3::new(5.0, 5.0, 2.0));
        assert_eq!(scene.boxes[0].size, Vec3::splat(0.5));
        assert_eq!(scene.ground.half_extents, Vec3::new(50.0, 50.0, 0.1));
        assert_eq!(scene.ground.material, Material::GRAY);
    }

    #[test]
    fn test_player_weapon_config() {
        let weapon = PlayerConfig::default().weapon();
        assert_eq!(weapon.max_ammo, 1000);
        assert_eq!(weapon.ammo_per_reload, 20);
        assert_eq!(weapon.reload_time, 2.0);
    }

    #[test]
    fn test_default_light_direction() {
        let dir = LightingConfig::default().direction();
        let half = std::f32::consts::FRAC_1_SQRT_2;
        assert!((dir - Vec3::new(-0.5, 0.5, -half)).length() < 0.0001, "got {:?}", dir);
        assert!((dir.length() - 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_scene_builders() {
        let scene = Scene::new("Test")
            .with_gravity(Vec3::new(0.0, 0.0, -20.0))
            .with_player_spawn(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(scene.physics.gravity.z, -20.0);
        assert_eq!(scene.player.position, Vec3::new(1.0, 2.0, 3.0));
        assert!(scene.boxes.is_empty());
    }

    #[test]
    fn test_scene_ron_round_trip() {
        let scene = Scene::default().with_box(PhysicsBoxConfig {
            material: Material::from_rgb(1.0, 0.0, 0.0),
            ..PhysicsBoxConfig::new(Vec3::new(0.0, 8.0, 3.0), Vec3::new(1.0, 0.5, 0.5), 2.0, 0.3)
        });

        let serialized = scene.to_ron().unwrap();
        assert!(serialized.contains("Arena"));

        let deserialized: Scene = ron::from_str(&serialized).unwrap();
        assert_eq!(deserialized, scene);
    }

    #[test]
    fn test_parse_minimal_scene_uses_defaults() {
        let scene_ron = r#"
Scene(
    name: "Sparse",
    boxes: [
        (
            position: (x: 1.0, y: 2.0, z: 3.0),
            size: (x: 0.5, y: 0.5, z: 0.5),
            mass: 2.0,
            friction: 0.1,
        ),
    ],
    player: (reload_time: 1.5),
)
"#;
        let scene: Scene = ron::from_str(scene_ron).unwrap();
        assert_eq!(scene.name, "Sparse");
        assert_eq!(scene.boxes.len(), 1);
        assert_eq!(scene.boxes[0].mass, 2.0);
        assert_eq!(scene.boxes[0].material, Material::default());
        assert_eq!(scene.player.reload_time, 1.5);
        assert_eq!(scene.player.max_ammo, 1000);
        assert_eq!(scene.ground, GroundConfig::default());
    }

    #[test]
    fn test_save_and_load_file() {
        let path = std::env::temp_dir().join(format!("boxshot_scene_{}.ron", std::process::id()));
        let scene = Scene::default();
        scene.save(&path).unwrap();

        let loaded = Scene::load(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(loaded, scene);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let result = Scene::load("/nonexistent/boxshot/scene.ron");
        assert!(matches!(result, Err(SceneError::Io(_))));
    }

    #[test]
    fn test_load_or_default_falls_back() {
        let scene = Scene::load_or_default("/nonexistent/boxshot/scene.ron");
        assert_eq!(scene, Scene::default());
    }

    #[test]
    fn test_parse_error_display() {
        let err = ron::from_str::<Scene>("Scene(name: ").unwrap_err();
        let err = SceneError::from(err);
        assert!(err.to_string().starts_with("Parse error"));
    }
}

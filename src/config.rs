//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`BOXSHOT_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::Path;

use boxshot_physics::{StepConfig, DEFAULT_JUMP_FORCE, DEFAULT_MOVE_FORCE};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Window configuration
    #[serde(default)]
    pub window: WindowConfig,
    /// Camera configuration
    #[serde(default)]
    pub camera: CameraConfig,
    /// Input configuration
    #[serde(default)]
    pub input: InputConfig,
    /// Player movement configuration
    #[serde(default)]
    pub player: PlayerConfig,
    /// Physics stepping configuration
    #[serde(default)]
    pub physics: PhysicsConfig,
    /// Rendering configuration
    #[serde(default)]
    pub rendering: RenderingConfig,
    /// Scene configuration
    #[serde(default)]
    pub scene: SceneConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`BOXSHOT_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        // Optional
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // BOXSHOT_WINDOW__TITLE=Test -> window.title = "Test"
        figment = figment.merge(Env::prefixed("BOXSHOT_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
    /// Start in fullscreen mode
    pub fullscreen: bool,
    /// Enable VSync
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Boxshot".to_string(),
            width: 1280,
            height: 720,
            fullscreen: false,
            vsync: true,
        }
    }
}

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Field of view in degrees
    pub fov: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
    /// Maximum pitch angle in degrees
    pub pitch_limit: f32,
    /// Camera height above the player body center
    pub eye_height: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov: 70.0,
            near: 0.1,
            far: 1000.0,
            pitch_limit: 80.0,
            eye_height: 1.0,
        }
    }
}

/// Input configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Radians of turn per pixel of mouse motion
    pub mouse_sensitivity: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            mouse_sensitivity: boxshot_input::DEFAULT_MOUSE_SENSITIVITY,
        }
    }
}

/// Player movement configuration
///
/// Spawn, body and weapon settings live in the scene file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Horizontal force per held movement key
    pub move_force: f32,
    /// Upward force while jump is held near the ground
    pub jump_force: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            move_force: DEFAULT_MOVE_FORCE,
            jump_force: DEFAULT_JUMP_FORCE,
        }
    }
}

/// Named physics stepping profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepProfile {
    /// Clamped, substepped, capped and damped
    #[default]
    Damped,
    /// Raw delta, single step
    Undamped,
}

/// Physics configuration
///
/// `profile` picks the preset; any other key set here overrides that preset's value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub profile: StepProfile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_dt: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub substeps: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_linear_speed: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_angular_speed: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linear_damping: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub angular_damping: Option<f32>,
}

impl PhysicsConfig {
    /// Resolve the preset plus overrides into the engine's step settings
    pub fn to_step_config(&self) -> StepConfig {
        let mut step = match self.profile {
            StepProfile::Damped => StepConfig::damped(),
            StepProfile::Undamped => StepConfig::undamped(),
        };
        if let Some(max_dt) = self.max_dt {
            step.max_dt = Some(max_dt);
        }
        if let Some(substeps) = self.substeps {
            step.substeps = substeps.max(1);
        }
        if let Some(speed) = self.max_linear_speed {
            step.max_linear_speed = Some(speed);
        }
        if let Some(speed) = self.max_angular_speed {
            step.max_angular_speed = Some(speed);
        }
        if let Some(damping) = self.linear_damping {
            step.linear_damping = damping.clamp(0.0, 1.0);
        }
        if let Some(damping) = self.angular_damping {
            step.angular_damping = damping.clamp(0.0, 1.0);
        }
        step
    }
}

/// Rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderingConfig {
    /// Background color [r, g, b, a]
    pub background_color: [f32; 4],
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            background_color: [0.53, 0.71, 0.92, 1.0],
        }
    }
}

impl RenderingConfig {
    pub fn clear_color(&self) -> wgpu::Color {
        let bg = &self.background_color;
        wgpu::Color {
            r: bg[0] as f64,
            g: bg[1] as f64,
            b: bg[2] as f64,
            a: bg[3] as f64,
        }
    }
}

/// Scene configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// RON scene file; the built-in arena is used if it fails to load
    pub path: String,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            path: "scenes/arena.ron".to_string(),
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

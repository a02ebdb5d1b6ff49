//! Configuration structs with sensible defaults and RON persistence.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Directory name used under the platform config/data roots.
const APP_DIR: &str = "wildlens";

/// Top-level game configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Viewport settings.
    pub window: WindowConfig,
    /// Input settings.
    pub input: InputConfig,
    /// Camera rig settings (zoom, fade, clipping).
    pub camera: CameraConfig,
    /// Photo capture and scoring settings.
    pub capture: CaptureConfig,
    /// Waypoint route settings for moving animals.
    pub route: RouteConfig,
    /// Scene selection.
    pub scene: SceneConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Viewport configuration. Only the aspect ratio matters for the headless
/// simulation; it shapes both viewpoints' frusta.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Viewport width in logical pixels.
    pub width: u32,
    /// Viewport height in logical pixels.
    pub height: u32,
    /// Window title.
    pub title: String,
}

/// Input configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InputConfig {
    /// Degrees of rotation per unit of pointer delta per second.
    pub mouse_sensitivity: f32,
    /// Invert Y axis for camera.
    pub invert_y: bool,
    /// Keybinding overrides (action name -> key or button name).
    pub keybindings: HashMap<String, String>,
}

/// Camera rig configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Field-of-view change (degrees) per unit of scroll.
    pub zoom_speed: f32,
    /// Narrowest photography field of view in degrees.
    pub min_fov: f32,
    /// Widest photography field of view in degrees.
    pub max_fov: f32,
    /// Field of view both viewpoints start with, in degrees.
    pub start_fov: f32,
    /// Rate factor for easing the live field of view toward the zoom target.
    pub zoom_smoothing: f32,
    /// Duration of each half of the black fade when switching viewpoints.
    pub fade_duration: f32,
    /// Height of the eye above the rig origin.
    pub eye_height: f32,
    /// Near clip distance.
    pub near: f32,
    /// Far clip distance.
    pub far: f32,
}

/// Photo capture configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CaptureConfig {
    /// Radius around the photography viewpoint searched for animals.
    pub detection_range: f32,
    /// Seconds after each capture attempt before the next one may start.
    pub cooldown_seconds: f32,
    /// Seconds the first detected animal's description stays on screen.
    pub description_seconds: f32,
    /// Saved photo width in pixels.
    pub width: u32,
    /// Saved photo height in pixels.
    pub height: u32,
    /// Name of the photo folder under the data directory.
    pub folder_name: String,
    /// Overrides the data directory the photo folder is created in.
    pub output_root: Option<PathBuf>,
    /// Seconds for each flash ramp (in and out).
    pub flash_ramp_seconds: f32,
    /// Seconds the flash holds at full opacity.
    pub flash_hold_seconds: f32,
    /// Collider layer index animals are placed on.
    pub animal_layer: u32,
}

/// Waypoint route configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RouteConfig {
    /// Default route speed in units per second.
    pub speed: f32,
    /// Distance at which a waypoint counts as reached.
    pub arrival_tolerance: f32,
    /// Emit start/end audio cues for routes.
    pub audio_cues: bool,
}

/// Scene selection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    /// Scene loaded at startup.
    pub start_scene: String,
    /// Scene requested by "change scene".
    pub next_scene: String,
    /// Directory searched for `<name>.ron` scene files before the built-ins.
    pub scenes_dir: Option<PathBuf>,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Directory for JSON log files in debug builds.
    pub log_dir: Option<PathBuf>,
}

// --- Default implementations ---

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            title: "WildLens".to_string(),
        }
    }
}

impl WindowConfig {
    /// Width over height, guarding against a zero height.
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            mouse_sensitivity: 100.0,
            invert_y: false,
            keybindings: HashMap::new(),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            zoom_speed: 5.0,
            min_fov: 20.0,
            max_fov: 60.0,
            start_fov: 60.0,
            zoom_smoothing: 10.0,
            fade_duration: 0.5,
            eye_height: 1.6,
            near: 0.3,
            far: 1000.0,
        }
    }
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            detection_range: 20.0,
            cooldown_seconds: 0.5,
            description_seconds: 3.0,
            width: 1920,
            height: 1080,
            folder_name: "Fotos".to_string(),
            output_root: None,
            flash_ramp_seconds: 0.2,
            flash_hold_seconds: 0.1,
            animal_layer: 3,
        }
    }
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            speed: 5.0,
            arrival_tolerance: 0.1,
            audio_cues: false,
        }
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            start_scene: "meadow".to_string(),
            next_scene: "meadow".to_string(),
            scenes_dir: None,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_dir: None,
        }
    }
}

/// Platform config directory for WildLens (`~/.config/wildlens` on Linux).
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// Platform data directory for WildLens (`~/.local/share/wildlens` on Linux).
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

impl CaptureConfig {
    /// Directory saved photos are written to.
    pub fn photo_dir(&self) -> PathBuf {
        self.output_root
            .clone()
            .unwrap_or_else(default_data_dir)
            .join(&self.folder_name)
    }
}

// --- Load / Save ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("detection_range: 20.0"));
        assert!(ron_str.contains("folder_name: \"Fotos\""));
    }

    #[test]
    fn test_defaults_match_gameplay_tuning() {
        let config = Config::default();
        assert_eq!(config.camera.min_fov, 20.0);
        assert_eq!(config.camera.max_fov, 60.0);
        assert_eq!(config.camera.fade_duration, 0.5);
        assert_eq!(config.capture.cooldown_seconds, 0.5);
        assert_eq!(config.capture.description_seconds, 3.0);
        assert_eq!((config.capture.width, config.capture.height), (1920, 1080));
        assert_eq!(config.route.arrival_tolerance, 0.1);
    }

    #[test]
    fn test_missing_section_uses_default() {
        let ron_str = "(window: (), input: (), camera: ())";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.capture, CaptureConfig::default());
        assert_eq!(config.route, RouteConfig::default());
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.capture.detection_range = 35.0;
        config.scene.next_scene = "wetlands".to_string();
        config
            .input
            .keybindings
            .insert("Pause".to_string(), "KeyP".to_string());

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_create_writes_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(dir.path().join("config.ron").exists());
    }

    #[test]
    fn test_invalid_file_produces_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.ron"), "{{not valid}}").unwrap();
        let result = Config::load_or_create(dir.path());
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_photo_dir_uses_output_root() {
        let mut capture = CaptureConfig::default();
        capture.output_root = Some(PathBuf::from("/tmp/wildlens-test"));
        assert_eq!(
            capture.photo_dir(),
            PathBuf::from("/tmp/wildlens-test").join("Fotos")
        );
    }

    #[test]
    fn test_aspect_ratio_guards_zero_height() {
        let window = WindowConfig {
            width: 800,
            height: 0,
            title: String::new(),
        };
        assert_eq!(window.aspect_ratio(), 800.0);
    }
}

//! Command-line argument parsing for WildLens.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// WildLens command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug)]
#[command(name = "wildlens", about = "Headless wildlife photography session")]
pub struct CliArgs {
    /// Scene to start in.
    #[arg(long)]
    pub scene: Option<String>,

    /// Number of frames to simulate.
    #[arg(long, default_value_t = 900)]
    pub frames: u32,

    /// Seconds per simulated frame.
    #[arg(long, default_value_t = 1.0 / 60.0)]
    pub dt: f32,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Directory saved photos are written under.
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Look sensitivity in degrees per unit of pointer delta per second.
    #[arg(long)]
    pub sensitivity: Option<f32>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(ref scene) = args.scene {
            self.scene.start_scene = scene.clone();
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
        if let Some(ref dir) = args.output_dir {
            self.capture.output_root = Some(dir.clone());
        }
        if let Some(sensitivity) = args.sensitivity {
            self.input.mouse_sensitivity = sensitivity;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_args() -> CliArgs {
        CliArgs {
            scene: None,
            frames: 900,
            dt: 1.0 / 60.0,
            log_level: None,
            output_dir: None,
            sensitivity: None,
            config: None,
        }
    }

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            scene: Some("wetlands".to_string()),
            output_dir: Some(PathBuf::from("/tmp/photos")),
            ..empty_args()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.scene.start_scene, "wetlands");
        assert_eq!(config.capture.output_root, Some(PathBuf::from("/tmp/photos")));
        // Non-overridden fields retain defaults
        assert_eq!(config.input.mouse_sensitivity, 100.0);
        assert_eq!(config.debug.log_level, "info");
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&empty_args());
        assert_eq!(config, original);
    }

    #[test]
    fn test_cli_parses_flags() {
        let args = CliArgs::parse_from(["wildlens", "--frames", "120", "--log-level", "debug"]);
        assert_eq!(args.frames, 120);
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert!(args.scene.is_none());
    }
}

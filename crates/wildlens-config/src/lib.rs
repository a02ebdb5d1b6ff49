//! Configuration system for WildLens.
//!
//! Provides runtime-configurable settings that persist to disk as RON files.
//! Supports CLI overrides via clap and forward/backward compatible
//! serialization: missing sections fall back to defaults, unknown fields are
//! ignored.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CameraConfig, CaptureConfig, Config, DebugConfig, InputConfig, RouteConfig, SceneConfig,
    WindowConfig, default_config_dir, default_data_dir,
};
pub use error::ConfigError;

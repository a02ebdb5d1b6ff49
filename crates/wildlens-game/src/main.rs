//! WildLens headless session.
//!
//! Loads the configuration, starts the configured scene, and drives a
//! scripted player for a fixed number of frames: switch to the camera,
//! sweep the view, zoom, and take photos that are saved as PNG files.
//!
//! Run with: `cargo run -p wildlens-game -- --frames 900`

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, warn};
use wildlens_config::{CliArgs, Config, default_config_dir};
use wildlens_ecs::{CursorMode, InputState};
use wildlens_game::{Autopilot, Game};
use wildlens_input::{ActionResolver, InputMap, KeyboardState, MouseState};

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let config_dir = args.config.clone().unwrap_or_else(default_config_dir);
    let (mut config, config_error) = match Config::load_or_create(&config_dir) {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    config.apply_cli_overrides(&args);

    wildlens_log::init_logging(
        config.debug.log_dir.as_deref(),
        cfg!(debug_assertions),
        Some(&config),
    );
    if let Some(e) = config_error {
        warn!("Using default config, {} unreadable: {e}", config_dir.display());
    }

    info!("WildLens");
    info!(
        "Scene: {} | Frames: {} | Photos: {}",
        config.scene.start_scene,
        args.frames,
        config.capture.photo_dir().display()
    );

    let input_map = InputMap::with_overrides(&config.input.keybindings, config.input.invert_y);
    let mut game = match Game::new(config) {
        Ok(game) => game,
        Err(e) => {
            error!("Failed to start: {e}");
            return ExitCode::FAILURE;
        }
    };

    let autopilot = Autopilot::default();
    let mut keyboard = KeyboardState::new();
    let mut mouse = MouseState::new();
    let mut input = InputState::default();
    let mut photos_saved = 0usize;

    for frame in 0..u64::from(args.frames) {
        mouse.set_captured(game.session().cursor_mode == CursorMode::Captured);
        autopilot.feed(frame, &mut keyboard, &mut mouse);
        ActionResolver::resolve(&input_map, &keyboard, &mouse, &mut input);
        keyboard.clear_transients();
        mouse.clear_transients();

        let report = match game.step(args.dt, &input) {
            Ok(report) => report,
            Err(e) => {
                error!("Frame {frame} failed: {e}");
                return ExitCode::FAILURE;
            }
        };
        for path in &report.saved_photos {
            info!("Saved {}", path.display());
        }
        photos_saved += report.saved_photos.len();
        if report.quit_requested {
            info!("Quit requested at frame {}", report.frame);
            break;
        }
    }

    info!(
        "Session over: score {} from {} saved photos ({} scored captures)",
        game.scorer().score(),
        photos_saved,
        game.scorer().photos_taken()
    );
    ExitCode::SUCCESS
}

//! WildLens game glue: scenes, pause menu, HUD, audio cues, and the
//! frame-stepped [`Game`] that ties the player rig, photo capture and
//! moving animals together.

pub mod audio;
pub mod autopilot;
pub mod capture;
pub mod error;
pub mod game;
pub mod hud;
pub mod pause;
pub mod scene;

pub use audio::{AudioCue, AudioQueue};
pub use autopilot::Autopilot;
pub use error::{GameError, SceneError};
pub use game::{FrameReport, Game};
pub use hud::HudState;
pub use pause::PauseController;
pub use scene::{
    AnimalDef, BUILTIN_SCENES, ObstacleDef, PlayerStart, RouteDef, SceneDef, SceneDirector,
    SceneLibrary, SceneRequest, SceneTransition,
};

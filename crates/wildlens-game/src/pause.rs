//! Pause menu: freezes scaled time and frees the cursor.

use bevy_ecs::prelude::*;
use wildlens_ecs::{Action, CursorMode, InputState, SessionState};

use crate::scene::{SceneDirector, SceneRequest};

/// Pause state and the pause panel's visibility.
#[derive(Resource, Clone, Debug, Default)]
pub struct PauseController {
    paused: bool,
}

impl PauseController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip between paused and running.
    pub fn toggle(&mut self, session: &mut SessionState) {
        if self.paused {
            self.resume(session);
        } else {
            self.pause(session);
        }
    }

    fn pause(&mut self, session: &mut SessionState) {
        self.paused = true;
        session.time_scale = 0.0;
        session.cursor_mode = CursorMode::Free;
        tracing::info!("Game paused");
    }

    /// Force the running state, whatever the current state.
    pub fn resume(&mut self, session: &mut SessionState) {
        if self.paused {
            tracing::info!("Game resumed");
        }
        self.paused = false;
        session.time_scale = 1.0;
        session.cursor_mode = CursorMode::Captured;
    }

    /// Restore normal time and ask the game loop to exit.
    pub fn quit(&mut self, session: &mut SessionState, director: &mut SceneDirector) {
        session.time_scale = 1.0;
        director.request(SceneRequest::Quit);
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// The pause panel is shown exactly while paused.
    pub fn panel_visible(&self) -> bool {
        self.paused
    }
}

/// Toggles pause on the pause action.
pub fn pause_system(
    input: Res<InputState>,
    mut session: ResMut<SessionState>,
    mut pause: ResMut<PauseController>,
) {
    if input.just_pressed(Action::Pause) {
        pause.toggle(&mut session);
    }
}

//! Process-wide session state: global time scale and cursor mode.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

/// Whether the cursor is captured (first-person look) or free (menus).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CursorMode {
    /// Hidden, locked, raw motion drives the camera.
    Captured,
    /// Visible, normal cursor for menus.
    Free,
}

/// Global state the host engine used to own. Passed explicitly to every
/// collaborator that reads or writes it.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct SessionState {
    /// Multiplier on frame time. `0.0` means paused.
    pub time_scale: f32,
    /// Current cursor mode.
    pub cursor_mode: CursorMode,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            cursor_mode: CursorMode::Captured,
        }
    }
}

impl SessionState {
    /// True while the time scale is zero.
    pub fn is_paused(&self) -> bool {
        self.time_scale == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_session_runs_with_captured_cursor() {
        let session = SessionState::default();
        assert!(!session.is_paused());
        assert_eq!(session.cursor_mode, CursorMode::Captured);
    }
}

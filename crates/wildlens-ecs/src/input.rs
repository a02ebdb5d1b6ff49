//! Aggregated input state resource for the current frame.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

/// Semantic game actions that can be bound to physical inputs.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Take a photo through the photography viewpoint.
    Capture,
    /// Switch between the navigation and photography viewpoints.
    SwitchView,
    /// Toggle the pause menu.
    Pause,
}

impl Action {
    /// Every action, in declaration order.
    pub const ALL: [Action; 3] = [Action::Capture, Action::SwitchView, Action::Pause];

    /// Stable name used in config files.
    pub fn name(self) -> &'static str {
        match self {
            Action::Capture => "Capture",
            Action::SwitchView => "SwitchView",
            Action::Pause => "Pause",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|action| action.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown action: {s}"))
    }
}

/// Aggregated input state for the current frame. Written in PreUpdate by the
/// input resolver (or by a scripted driver), read by gameplay systems.
#[derive(Resource, Clone, Debug, Default)]
pub struct InputState {
    /// Actions that are currently held down.
    pub active_actions: HashSet<Action>,
    /// Actions that were first pressed this frame.
    pub just_pressed: HashSet<Action>,
    /// Actions that were released this frame.
    pub just_released: HashSet<Action>,
    /// Pointer movement since last frame, screen convention (+y is down).
    pub mouse_delta: (f32, f32),
    /// Scroll delta (horizontal, vertical), positive vertical is away from the user.
    pub scroll_delta: (f32, f32),
}

impl InputState {
    /// Returns true if the action is currently held down.
    pub fn is_active(&self, action: Action) -> bool {
        self.active_actions.contains(&action)
    }

    /// Returns true if the action was first pressed this frame.
    pub fn just_pressed(&self, action: Action) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Returns true if the action was released this frame.
    pub fn just_released(&self, action: Action) -> bool {
        self.just_released.contains(&action)
    }

    /// Record a press of `action` this frame.
    pub fn press(&mut self, action: Action) {
        if self.active_actions.insert(action) {
            self.just_pressed.insert(action);
        }
    }

    /// Record a release of `action` this frame.
    pub fn release(&mut self, action: Action) {
        if self.active_actions.remove(&action) {
            self.just_released.insert(action);
        }
    }

    /// Clear per-frame transient state. Called before new input is applied.
    pub fn clear_transients(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
        self.mouse_delta = (0.0, 0.0);
        self.scroll_delta = (0.0, 0.0);
    }
}

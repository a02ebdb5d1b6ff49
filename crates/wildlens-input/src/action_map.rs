//! Action mapping: which physical inputs trigger which [`Action`]s, and the
//! per-frame resolution of those bindings into [`InputState`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use winit::event::MouseButton;
use winit::keyboard::{KeyCode, PhysicalKey};

use wildlens_ecs::{Action, InputState};

use crate::keyboard::KeyboardState;
use crate::mouse::MouseState;

/// Serde helper for [`KeyCode`], which has no serde support of its own.
mod keycode_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use winit::keyboard::KeyCode;

    pub fn serialize<S: Serializer>(code: &KeyCode, s: S) -> Result<S::Ok, S::Error> {
        format!("{code:?}").serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<KeyCode, D::Error> {
        let name = String::deserialize(d)?;
        super::keycode_from_name(&name)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown key: {name}")))
    }
}

/// Parses the `Debug` name of a [`KeyCode`] (`"KeyP"`, `"Digit1"`, `"Escape"`).
fn keycode_from_name(s: &str) -> Option<KeyCode> {
    const LETTERS: [KeyCode; 26] = [
        KeyCode::KeyA, KeyCode::KeyB, KeyCode::KeyC, KeyCode::KeyD, KeyCode::KeyE,
        KeyCode::KeyF, KeyCode::KeyG, KeyCode::KeyH, KeyCode::KeyI, KeyCode::KeyJ,
        KeyCode::KeyK, KeyCode::KeyL, KeyCode::KeyM, KeyCode::KeyN, KeyCode::KeyO,
        KeyCode::KeyP, KeyCode::KeyQ, KeyCode::KeyR, KeyCode::KeyS, KeyCode::KeyT,
        KeyCode::KeyU, KeyCode::KeyV, KeyCode::KeyW, KeyCode::KeyX, KeyCode::KeyY,
        KeyCode::KeyZ,
    ];
    const DIGITS: [KeyCode; 10] = [
        KeyCode::Digit0, KeyCode::Digit1, KeyCode::Digit2, KeyCode::Digit3, KeyCode::Digit4,
        KeyCode::Digit5, KeyCode::Digit6, KeyCode::Digit7, KeyCode::Digit8, KeyCode::Digit9,
    ];

    if let Some(letter) = s.strip_prefix("Key") {
        let mut chars = letter.chars();
        if let (Some(c @ 'A'..='Z'), None) = (chars.next(), chars.next()) {
            return Some(LETTERS[(c as u8 - b'A') as usize]);
        }
        return None;
    }
    if let Some(digit) = s.strip_prefix("Digit") {
        let mut chars = digit.chars();
        if let (Some(c @ '0'..='9'), None) = (chars.next(), chars.next()) {
            return Some(DIGITS[(c as u8 - b'0') as usize]);
        }
        return None;
    }
    Some(match s {
        "Space" => KeyCode::Space,
        "Enter" => KeyCode::Enter,
        "Escape" => KeyCode::Escape,
        "Tab" => KeyCode::Tab,
        "Backspace" => KeyCode::Backspace,
        "ShiftLeft" => KeyCode::ShiftLeft,
        "ShiftRight" => KeyCode::ShiftRight,
        "ControlLeft" => KeyCode::ControlLeft,
        "ControlRight" => KeyCode::ControlRight,
        "AltLeft" => KeyCode::AltLeft,
        "AltRight" => KeyCode::AltRight,
        "F1" => KeyCode::F1,
        "F2" => KeyCode::F2,
        "F12" => KeyCode::F12,
        _ => return None,
    })
}

/// Serde-friendly mirror of the mouse buttons that can be bound.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum MouseButtonBinding {
    Left,
    Right,
    Middle,
}

impl MouseButtonBinding {
    /// Convert to the winit [`MouseButton`] type.
    #[must_use]
    pub fn to_winit(self) -> MouseButton {
        match self {
            Self::Left => MouseButton::Left,
            Self::Right => MouseButton::Right,
            Self::Middle => MouseButton::Middle,
        }
    }
}

/// A physical input source that can be bound to an action.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputBinding {
    /// A keyboard key (physical scan code).
    Key(#[serde(with = "keycode_serde")] KeyCode),
    /// A mouse button.
    MouseButton(MouseButtonBinding),
}

impl InputBinding {
    /// Parses a binding name as written in the config's keybinding table:
    /// `MouseLeft`, `MouseRight`, `MouseMiddle`, or a key code name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "MouseLeft" => Some(Self::MouseButton(MouseButtonBinding::Left)),
            "MouseRight" => Some(Self::MouseButton(MouseButtonBinding::Right)),
            "MouseMiddle" => Some(Self::MouseButton(MouseButtonBinding::Middle)),
            other => keycode_from_name(other).map(Self::Key),
        }
    }

    fn is_held(&self, keyboard: &KeyboardState, mouse: &MouseState) -> bool {
        match self {
            Self::Key(code) => keyboard.is_pressed(PhysicalKey::Code(*code)),
            Self::MouseButton(button) => mouse.is_button_pressed(button.to_winit()),
        }
    }

    fn was_just_pressed(&self, keyboard: &KeyboardState, mouse: &MouseState) -> bool {
        match self {
            Self::Key(code) => keyboard.just_pressed(PhysicalKey::Code(*code)),
            Self::MouseButton(button) => mouse.just_button_pressed(button.to_winit()),
        }
    }
}

/// Maps [`Action`]s to lists of [`InputBinding`]s. Any bound input triggers
/// the action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputMap {
    /// The binding table.
    pub bindings: HashMap<Action, Vec<InputBinding>>,
    /// Flip vertical pointer movement before it reaches the look controls.
    #[serde(default)]
    pub invert_y: bool,
}

impl Default for InputMap {
    /// Left click captures, right click switches viewpoint, Escape pauses.
    fn default() -> Self {
        let mut bindings = HashMap::new();
        bindings.insert(
            Action::Capture,
            vec![InputBinding::MouseButton(MouseButtonBinding::Left)],
        );
        bindings.insert(
            Action::SwitchView,
            vec![InputBinding::MouseButton(MouseButtonBinding::Right)],
        );
        bindings.insert(Action::Pause, vec![InputBinding::Key(KeyCode::Escape)]);
        Self {
            bindings,
            invert_y: false,
        }
    }
}

impl InputMap {
    /// Default bindings with the config's overrides applied. Each override
    /// replaces all bindings of its action; unknown names are skipped with a
    /// warning.
    pub fn with_overrides(overrides: &HashMap<String, String>, invert_y: bool) -> Self {
        let mut map = Self {
            invert_y,
            ..Self::default()
        };
        for (action_name, binding_name) in overrides {
            let Ok(action) = action_name.parse::<Action>() else {
                tracing::warn!("Ignoring keybinding for unknown action '{action_name}'");
                continue;
            };
            match InputBinding::from_name(binding_name) {
                Some(binding) => map.set_bindings(action, vec![binding]),
                None => {
                    tracing::warn!("Ignoring unknown input '{binding_name}' for {action}");
                }
            }
        }
        map
    }

    /// Set the bindings for an action, replacing any existing ones.
    pub fn set_bindings(&mut self, action: Action, bindings: Vec<InputBinding>) {
        self.bindings.insert(action, bindings);
    }

    #[must_use]
    pub fn get_bindings(&self, action: Action) -> &[InputBinding] {
        self.bindings.get(&action).map_or(&[], |v| v.as_slice())
    }

    /// Serialize to a RON string.
    pub fn to_ron(&self) -> Result<String, ron::Error> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
    }

    /// Deserialize from a RON string.
    pub fn from_ron(s: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(s)
    }
}

/// Turns raw keyboard and mouse state into the frame's [`InputState`].
pub struct ActionResolver;

impl ActionResolver {
    /// Resolve all actions and pointer axes. Call once per frame after the
    /// device states have received their events and before they are cleared.
    pub fn resolve(
        input_map: &InputMap,
        keyboard: &KeyboardState,
        mouse: &MouseState,
        state: &mut InputState,
    ) {
        state.clear_transients();

        for action in Action::ALL {
            let bindings = input_map.get_bindings(action);
            let held = bindings.iter().any(|b| b.is_held(keyboard, mouse));
            let tapped = bindings.iter().any(|b| b.was_just_pressed(keyboard, mouse));
            let was_active = state.is_active(action);

            // A press and release inside one frame still counts as a press.
            if tapped || (held && !was_active) {
                state.just_pressed.insert(action);
            }
            if held {
                state.active_actions.insert(action);
            } else if state.active_actions.remove(&action) {
                state.just_released.insert(action);
            }
        }

        let delta = mouse.delta();
        let dy = if input_map.invert_y { -delta.y } else { delta.y };
        state.mouse_delta = (delta.x, dy);
        let scroll = mouse.scroll();
        state.scroll_delta = (scroll.x, scroll.y);
    }
}

//! Frame-coherent mouse state tracker.
//!
//! [`MouseState`] accumulates winit mouse events during a frame and exposes
//! position, delta, button and scroll queries.

use glam::Vec2;
use winit::event::{ElementState, MouseButton, MouseScrollDelta};

/// Pixels of a precise scroll device treated as one wheel notch.
const PIXELS_PER_LINE: f64 = 40.0;

#[derive(Debug, Clone, Copy, Default)]
struct ButtonFrame {
    pressed: bool,
    just_pressed: bool,
    just_released: bool,
}

fn button_index(button: MouseButton) -> usize {
    match button {
        MouseButton::Left => 0,
        MouseButton::Right => 1,
        MouseButton::Middle => 2,
        MouseButton::Back | MouseButton::Forward | MouseButton::Other(_) => 3,
    }
}

/// Frame-coherent mouse state.
///
/// Forward winit events through the `on_*` methods, query, then call
/// [`clear_transients`](Self::clear_transients) at the end of the frame.
#[derive(Debug, Clone, Default)]
pub struct MouseState {
    position: Vec2,
    delta: Vec2,
    buttons: [ButtonFrame; 4],
    scroll: Vec2,
    captured: bool,
}

impl MouseState {
    /// Creates a new `MouseState` with nothing pressed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a `CursorMoved` event. Ignored for look while captured.
    pub fn on_cursor_moved(&mut self, x: f64, y: f64) {
        let new_pos = Vec2::new(x as f32, y as f32);
        if !self.captured {
            self.delta += new_pos - self.position;
        }
        self.position = new_pos;
    }

    /// Process a raw `DeviceEvent::MouseMotion` delta (used while captured).
    pub fn on_raw_motion(&mut self, dx: f64, dy: f64) {
        if self.captured {
            self.delta += Vec2::new(dx as f32, dy as f32);
        }
    }

    /// Process a `MouseInput` event.
    pub fn on_button(&mut self, button: MouseButton, state: ElementState) {
        let frame = &mut self.buttons[button_index(button)];
        match state {
            ElementState::Pressed => {
                if !frame.pressed {
                    frame.just_pressed = true;
                }
                frame.pressed = true;
            }
            ElementState::Released => {
                if frame.pressed {
                    frame.just_released = true;
                }
                frame.pressed = false;
            }
        }
    }

    /// Process a `MouseWheel` event.
    pub fn on_scroll(&mut self, delta: MouseScrollDelta) {
        match delta {
            MouseScrollDelta::LineDelta(x, y) => {
                self.scroll += Vec2::new(x, y);
            }
            MouseScrollDelta::PixelDelta(pos) => {
                self.scroll += Vec2::new(
                    (pos.x / PIXELS_PER_LINE) as f32,
                    (pos.y / PIXELS_PER_LINE) as f32,
                );
            }
        }
    }

    /// Follows the session's cursor mode. The host applies the actual
    /// window grab; this only switches which motion source feeds the delta.
    pub fn set_captured(&mut self, captured: bool) {
        self.captured = captured;
    }

    /// Clears delta, scroll and button edges.
    pub fn clear_transients(&mut self) {
        self.delta = Vec2::ZERO;
        self.scroll = Vec2::ZERO;
        for b in &mut self.buttons {
            b.just_pressed = false;
            b.just_released = false;
        }
    }

    /// Current cursor position in window-logical coordinates.
    #[must_use]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Movement accumulated since the last clear, +y is down.
    #[must_use]
    pub fn delta(&self) -> Vec2 {
        self.delta
    }

    #[must_use]
    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.buttons[button_index(button)].pressed
    }

    #[must_use]
    pub fn just_button_pressed(&self, button: MouseButton) -> bool {
        self.buttons[button_index(button)].just_pressed
    }

    #[must_use]
    pub fn just_button_released(&self, button: MouseButton) -> bool {
        self.buttons[button_index(button)].just_released
    }

    /// Scroll accumulated this frame in wheel notches (positive y = away from the user).
    #[must_use]
    pub fn scroll(&self) -> Vec2 {
        self.scroll
    }

    #[must_use]
    pub fn is_captured(&self) -> bool {
        self.captured
    }
}

//! Scripted input for headless sessions.
//!
//! Feeds winit-style device events into [`KeyboardState`] and
//! [`MouseState`] as a player would: switch to the photography viewpoint,
//! sweep the view from side to side, zoom in, snap photos at a fixed
//! interval, and briefly open the pause menu.

use winit::event::{ElementState, MouseButton, MouseScrollDelta};
use winit::keyboard::{KeyCode, PhysicalKey};
use wildlens_input::{KeyboardState, MouseState, RawKeyEvent};

/// Frame timings for the scripted session.
#[derive(Clone, Debug, PartialEq)]
pub struct Autopilot {
    /// Frame the viewpoint switch is clicked.
    pub switch_frame: u64,
    /// First capture click.
    pub first_capture: u64,
    /// Frames between capture clicks.
    pub capture_interval: u64,
    /// Frame a zoom scroll is sent.
    pub zoom_frame: u64,
    /// Wheel notches scrolled at `zoom_frame`.
    pub zoom_lines: f32,
    /// Pause opened and closed on these frames.
    pub pause_frames: Option<(u64, u64)>,
    /// Peak pointer delta per frame of the view sweep.
    pub sweep_amplitude: f64,
    /// Radians of sweep phase per frame.
    pub sweep_rate: f64,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            switch_frame: 10,
            first_capture: 90,
            capture_interval: 75,
            zoom_frame: 150,
            zoom_lines: 2.0,
            pause_frames: Some((600, 660)),
            sweep_amplitude: 0.3,
            sweep_rate: 0.02,
        }
    }
}

impl Autopilot {
    /// Feed this frame's events. Clicks are released on the following frame.
    pub fn feed(&self, frame: u64, keyboard: &mut KeyboardState, mouse: &mut MouseState) {
        click(mouse, MouseButton::Right, frame, self.switch_frame);

        if frame >= self.first_capture && self.capture_interval > 0 {
            let since = frame - self.first_capture;
            let phase = since % self.capture_interval;
            if phase == 0 {
                mouse.on_button(MouseButton::Left, ElementState::Pressed);
            } else if phase == 1 {
                mouse.on_button(MouseButton::Left, ElementState::Released);
            }
        }

        if frame == self.zoom_frame {
            mouse.on_scroll(MouseScrollDelta::LineDelta(0.0, self.zoom_lines));
        }

        if let Some((open, close)) = self.pause_frames {
            for pause_frame in [open, close] {
                if frame == pause_frame {
                    escape(keyboard, ElementState::Pressed);
                } else if frame == pause_frame + 1 {
                    escape(keyboard, ElementState::Released);
                }
            }
        }

        let dx = self.sweep_amplitude * (frame as f64 * self.sweep_rate).cos();
        mouse.on_raw_motion(dx, 0.0);
    }
}

fn click(mouse: &mut MouseState, button: MouseButton, frame: u64, at: u64) {
    if frame == at {
        mouse.on_button(button, ElementState::Pressed);
    } else if frame == at + 1 {
        mouse.on_button(button, ElementState::Released);
    }
}

fn escape(keyboard: &mut KeyboardState, state: ElementState) {
    keyboard.process_raw(RawKeyEvent {
        key: PhysicalKey::Code(KeyCode::Escape),
        state,
        repeat: false,
    });
}

//! Short-lived capture feedback: the white flash and the animal description.

use wildlens_ecs::{Timer, Tween};

#[derive(Clone, Copy, Debug, PartialEq)]
enum FlashPhase {
    Idle,
    Rising(Tween),
    Holding(Timer),
    Falling(Tween),
}

/// White flash overlay: ramps up, holds at full opacity, ramps down. Each
/// ramp ends on its exact target.
#[derive(Clone, Debug, PartialEq)]
pub struct CaptureFlash {
    ramp_seconds: f32,
    hold_seconds: f32,
    phase: FlashPhase,
    opacity: f32,
}

impl CaptureFlash {
    pub fn new(ramp_seconds: f32, hold_seconds: f32) -> Self {
        Self {
            ramp_seconds,
            hold_seconds,
            phase: FlashPhase::Idle,
            opacity: 0.0,
        }
    }

    /// Restart the flash from transparent.
    pub fn trigger(&mut self) {
        self.opacity = 0.0;
        self.phase = FlashPhase::Rising(Tween::new(0.0, 1.0, self.ramp_seconds));
    }

    pub fn tick(&mut self, dt: f32) {
        self.phase = match self.phase {
            FlashPhase::Idle => FlashPhase::Idle,
            FlashPhase::Rising(mut tween) => {
                self.opacity = tween.tick(dt);
                if tween.is_finished() {
                    FlashPhase::Holding(Timer::new(self.hold_seconds))
                } else {
                    FlashPhase::Rising(tween)
                }
            }
            FlashPhase::Holding(mut timer) => {
                if timer.tick(dt) {
                    FlashPhase::Falling(Tween::new(1.0, 0.0, self.ramp_seconds))
                } else {
                    FlashPhase::Holding(timer)
                }
            }
            FlashPhase::Falling(mut tween) => {
                self.opacity = tween.tick(dt);
                if tween.is_finished() {
                    FlashPhase::Idle
                } else {
                    FlashPhase::Falling(tween)
                }
            }
        };
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// True while any part of the flash is running.
    pub fn is_active(&self) -> bool {
        self.phase != FlashPhase::Idle
    }
}

/// Description text shown for a fixed time after a photo. Showing a new
/// text restarts the timer.
#[derive(Clone, Debug, Default)]
pub struct DescriptionDisplay {
    text: Option<String>,
    timer: Option<Timer>,
}

impl DescriptionDisplay {
    pub fn show(&mut self, text: impl Into<String>, seconds: f32) {
        self.text = Some(text.into());
        self.timer = Some(Timer::new(seconds));
    }

    pub fn tick(&mut self, dt: f32) {
        if let Some(timer) = self.timer.as_mut()
            && timer.tick(dt)
        {
            self.timer = None;
            self.text = None;
        }
    }

    /// The text on screen, if any.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

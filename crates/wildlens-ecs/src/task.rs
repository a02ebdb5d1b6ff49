//! Frame-stepped replacements for wait-for-seconds and ramp coroutines.
//!
//! Both types are advanced by the owner with the scaled frame delta and
//! never run on their own.

/// Counts down a fixed duration of scaled time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Timer {
    duration: f32,
    elapsed: f32,
}

impl Timer {
    /// A timer that finishes after `duration` seconds. Non-positive durations
    /// are finished immediately.
    pub fn new(duration: f32) -> Self {
        Self {
            duration: duration.max(0.0),
            elapsed: 0.0,
        }
    }

    /// Advance by `dt` seconds. Returns true once the timer has finished.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration);
        self.finished()
    }

    /// True when the full duration has elapsed.
    pub fn finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Seconds left before the timer finishes.
    pub fn remaining(&self) -> f32 {
        self.duration - self.elapsed
    }
}

/// Linear ramp of a value from `from` to `to` over a duration.
///
/// When the elapsed time reaches the duration the value is assigned `to`
/// exactly, whatever the frame timing was.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    from: f32,
    to: f32,
    duration: f32,
    elapsed: f32,
    value: f32,
}

impl Tween {
    /// A ramp starting at `from`.
    pub fn new(from: f32, to: f32, duration: f32) -> Self {
        Self {
            from,
            to,
            duration: duration.max(0.0),
            elapsed: 0.0,
            value: from,
        }
    }

    /// Advance by `dt` seconds and return the new value.
    pub fn tick(&mut self, dt: f32) -> f32 {
        self.elapsed += dt.max(0.0);
        self.value = if self.elapsed >= self.duration {
            self.to
        } else {
            self.from + (self.to - self.from) * (self.elapsed / self.duration)
        };
        self.value
    }

    /// Current value.
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Target value.
    pub fn target(&self) -> f32 {
        self.to
    }

    /// True once the value has been assigned its target.
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

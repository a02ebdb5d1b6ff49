//! Time resource for the ECS world.

use bevy_ecs::prelude::*;

/// Frame timing, written once at the start of every frame.
///
/// `delta` is already multiplied by the session time scale, so a paused
/// session sees `delta == 0.0` and every timer or ramp stands still.
#[derive(Resource, Debug, Clone, Default)]
pub struct TimeRes {
    /// Scaled seconds elapsed since the previous frame.
    pub delta: f32,
    /// Real seconds elapsed since the previous frame.
    pub unscaled_delta: f32,
    /// Time scale applied to this frame.
    pub time_scale: f32,
    /// Scaled seconds since the world was created.
    pub elapsed: f64,
    /// Number of frames advanced.
    pub frame: u64,
}

impl TimeRes {
    /// Advance by one frame of `frame_dt` real seconds at `time_scale`.
    pub fn advance(&mut self, frame_dt: f32, time_scale: f32) {
        let frame_dt = frame_dt.max(0.0);
        self.unscaled_delta = frame_dt;
        self.time_scale = time_scale;
        self.delta = frame_dt * time_scale;
        self.elapsed += f64::from(self.delta);
        self.frame += 1;
    }
}

//! The player rig: pointer look, photography zoom, and the fade-gated
//! switch between the navigation and photography viewpoints.

use bevy_ecs::prelude::*;
use glam::{Quat, Vec3};
use wildlens_config::Config;
use wildlens_ecs::{Action, InputState, TimeRes};
use wildlens_spatial::CameraView;

use crate::fade::FadeOverlay;
use crate::viewpoint::{Viewpoint, ViewpointKind};

/// Pitch limit in degrees, both directions.
const PITCH_LIMIT: f32 = 90.0;

/// Steady or switching state of the rig.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RigState {
    Navigation,
    Photography,
    /// A fade-out/switch/fade-in sequence is running.
    Transitioning,
}

/// Tuning for look, zoom and the switch fade.
#[derive(Clone, Debug, PartialEq)]
pub struct RigSettings {
    /// Degrees per unit of pointer delta per second.
    pub sensitivity: f32,
    /// Degrees of field of view per unit of scroll.
    pub zoom_speed: f32,
    pub min_fov: f32,
    pub max_fov: f32,
    /// Rate factor for easing the live field of view toward the target.
    pub zoom_smoothing: f32,
    /// Seconds for each half of the switch fade.
    pub fade_duration: f32,
}

impl Default for RigSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl RigSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            sensitivity: config.input.mouse_sensitivity,
            zoom_speed: config.camera.zoom_speed,
            min_fov: config.camera.min_fov,
            max_fov: config.camera.max_fov,
            zoom_smoothing: config.camera.zoom_smoothing,
            fade_duration: config.camera.fade_duration,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SwitchPhase {
    /// Overlay ramping up to black.
    Darkening,
    /// Viewpoints flipped, overlay ramping back to clear.
    Revealing,
}

/// The player rig. Yaw turns the whole rig; pitch is shared by both
/// viewpoints. Exactly one viewpoint is active at any time; the switch
/// flips them while the overlay is fully opaque.
#[derive(Resource, Clone, Debug)]
pub struct CameraRig {
    settings: RigSettings,
    position: Vec3,
    /// Degrees, positive turns right.
    yaw: f32,
    /// Degrees, positive looks down.
    pitch: f32,
    navigation: Viewpoint,
    photography: Viewpoint,
    target_fov: f32,
    fade: FadeOverlay,
    switch: Option<SwitchPhase>,
    hud_visible: bool,
}

impl CameraRig {
    /// A rig standing at `position` facing `yaw_degrees`, looking through
    /// the navigation viewpoint with the camera HUD hidden.
    pub fn new(config: &Config, position: Vec3, yaw_degrees: f32) -> Self {
        let camera = &config.camera;
        let lens = |active: bool| Viewpoint {
            fov_range: (camera.min_fov, camera.max_fov),
            fov: camera.start_fov,
            active,
            local_offset: Vec3::new(0.0, camera.eye_height, 0.0),
            local_rotation: Quat::IDENTITY,
            aspect_ratio: config.window.aspect_ratio(),
            near: camera.near,
            far: camera.far,
        };
        let settings = RigSettings::from_config(config);
        let target_fov = camera.start_fov.clamp(settings.min_fov, settings.max_fov);
        Self {
            settings,
            position,
            yaw: yaw_degrees,
            pitch: 0.0,
            navigation: lens(true),
            photography: lens(false),
            target_fov,
            fade: FadeOverlay::new(),
            switch: None,
            hud_visible: false,
        }
    }

    /// One frame of rig behaviour: look, zoom, then the switch trigger and
    /// the running switch sequence. `dt` is the scaled frame delta.
    pub fn update(&mut self, input: &InputState, dt: f32) {
        let (dx, dy) = input.mouse_delta;
        self.rotate_view(dx, dy, dt);
        self.handle_zoom(input.scroll_delta.1, dt);
        if input.just_pressed(Action::SwitchView) {
            self.begin_switch();
        }
        self.tick_switch(dt);
    }

    /// Apply pointer movement (screen convention, +y down) as yaw on the rig
    /// and clamped pitch on both viewpoints.
    pub fn rotate_view(&mut self, dx: f32, dy: f32, dt: f32) {
        let scale = self.settings.sensitivity * dt;
        self.yaw = (self.yaw + dx * scale).rem_euclid(360.0);
        self.pitch = (self.pitch + dy * scale).clamp(-PITCH_LIMIT, PITCH_LIMIT);

        let local = Quat::from_rotation_x(-self.pitch.to_radians());
        self.navigation.local_rotation = local;
        self.photography.local_rotation = local;
    }

    /// Scroll zoom. Ignored unless the rig is steadily in photography.
    pub fn handle_zoom(&mut self, scroll: f32, dt: f32) {
        if self.state() != RigState::Photography {
            return;
        }
        let (min, max) = self.photography.fov_range;
        self.target_fov = (self.target_fov - scroll * self.settings.zoom_speed).clamp(min, max);

        let t = (dt * self.settings.zoom_smoothing).clamp(0.0, 1.0);
        let fov = self.photography.fov;
        self.photography.fov = fov + (self.target_fov - fov) * t;
    }

    /// Start the fade-gated viewpoint switch. Returns false (and does
    /// nothing) when a switch is already running.
    pub fn begin_switch(&mut self) -> bool {
        if self.switch.is_some() {
            return false;
        }
        tracing::debug!(
            "Switching from {:?} to {:?} viewpoint",
            self.active_viewpoint(),
            self.active_viewpoint().other()
        );
        self.switch = Some(SwitchPhase::Darkening);
        self.fade.start(1.0, self.settings.fade_duration);
        true
    }

    fn tick_switch(&mut self, dt: f32) {
        let Some(phase) = self.switch else {
            return;
        };
        if !self.fade.tick(dt) {
            return;
        }
        match phase {
            SwitchPhase::Darkening => {
                let photo_mode = !self.photography.active;
                self.photography.active = photo_mode;
                self.navigation.active = !photo_mode;
                self.hud_visible = photo_mode;
                self.switch = Some(SwitchPhase::Revealing);
                self.fade.start(0.0, self.settings.fade_duration);
            }
            SwitchPhase::Revealing => {
                self.switch = None;
                tracing::debug!("Now looking through {:?} viewpoint", self.active_viewpoint());
            }
        }
    }

    pub fn state(&self) -> RigState {
        match (self.switch, self.photography.active) {
            (Some(_), _) => RigState::Transitioning,
            (None, true) => RigState::Photography,
            (None, false) => RigState::Navigation,
        }
    }

    /// The viewpoint currently being looked through. Flips halfway through
    /// a switch, while the screen is black.
    pub fn active_viewpoint(&self) -> ViewpointKind {
        if self.photography.active {
            ViewpointKind::Photography
        } else {
            ViewpointKind::Navigation
        }
    }

    pub fn viewpoint(&self, kind: ViewpointKind) -> &Viewpoint {
        match kind {
            ViewpointKind::Navigation => &self.navigation,
            ViewpointKind::Photography => &self.photography,
        }
    }

    /// The photography view, if the photography viewpoint is active.
    pub fn photography_view(&self) -> Option<CameraView> {
        self.photography
            .active
            .then(|| self.photography.camera_view(self.position, self.rotation()))
    }

    /// The view through whichever viewpoint is active.
    pub fn active_view(&self) -> CameraView {
        self.viewpoint(self.active_viewpoint())
            .camera_view(self.position, self.rotation())
    }

    pub fn fade_opacity(&self) -> f32 {
        self.fade.opacity()
    }

    /// Whether the camera HUD (viewfinder frame) is shown.
    pub fn hud_visible(&self) -> bool {
        self.hud_visible
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Field of view the photography zoom is easing toward.
    pub fn target_fov(&self) -> f32 {
        self.target_fov
    }

    /// Rig orientation (yaw only).
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(-self.yaw.to_radians())
    }
}

/// Runs the rig for one frame from the resolved input and scaled delta.
pub fn camera_rig_system(input: Res<InputState>, time: Res<TimeRes>, mut rig: ResMut<CameraRig>) {
    rig.update(&input, time.delta);
}

//! On-screen state derived from gameplay once per frame.

use bevy_ecs::prelude::*;
use wildlens_photo::PhotoScorer;
use wildlens_player::CameraRig;

use crate::pause::PauseController;

/// Everything a UI layer would draw.
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct HudState {
    /// `"Score: N"`.
    pub score_text: String,
    /// Animal description while it is displayed.
    pub description: Option<String>,
    /// White capture flash, 0 to 1.
    pub flash_opacity: f32,
    /// Black viewpoint-switch overlay, 0 to 1.
    pub fade_opacity: f32,
    /// Viewfinder frame shown in photography mode.
    pub camera_hud_visible: bool,
    pub pause_panel_visible: bool,
    /// Live field of view of the active viewpoint, in degrees.
    pub fov: f32,
}

impl Default for HudState {
    fn default() -> Self {
        Self {
            score_text: score_text(0),
            description: None,
            flash_opacity: 0.0,
            fade_opacity: 0.0,
            camera_hud_visible: false,
            pause_panel_visible: false,
            fov: 60.0,
        }
    }
}

pub fn score_text(score: u64) -> String {
    format!("Score: {score}")
}

/// Copies rig, scorer and pause state into [`HudState`].
pub fn hud_sync_system(
    rig: Res<CameraRig>,
    scorer: Res<PhotoScorer>,
    pause: Res<PauseController>,
    mut hud: ResMut<HudState>,
) {
    let text = score_text(scorer.score());
    if hud.score_text != text {
        hud.score_text = text;
    }
    if hud.description.as_deref() != scorer.description() {
        hud.description = scorer.description().map(str::to_owned);
    }
    hud.flash_opacity = scorer.flash_opacity();
    hud.fade_opacity = rig.fade_opacity();
    hud.camera_hud_visible = rig.hud_visible();
    hud.pause_panel_visible = pause.panel_visible();
    hud.fov = rig.viewpoint(rig.active_viewpoint()).fov;
}

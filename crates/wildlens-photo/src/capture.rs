//! The capture sequence and the running score.

use bevy_ecs::prelude::*;
use wildlens_config::CaptureConfig;
use wildlens_ecs::{SessionState, Timer};
use wildlens_spatial::{CameraView, LayerMask, SpatialQuery};

use crate::detection::{CaptureResult, DetectionSettings, detect};
use crate::flash::{CaptureFlash, DescriptionDisplay};
use crate::scorable::Scorables;

/// Capture tuning.
#[derive(Clone, Debug, PartialEq)]
pub struct CaptureSettings {
    pub detection: DetectionSettings,
    /// Scaled seconds after each attempt before another may start.
    pub cooldown_seconds: f32,
    pub description_seconds: f32,
    pub flash_ramp_seconds: f32,
    pub flash_hold_seconds: f32,
    /// Saved photo size in pixels.
    pub width: u32,
    pub height: u32,
}

impl CaptureSettings {
    pub fn from_config(config: &CaptureConfig) -> Self {
        Self {
            detection: DetectionSettings {
                range: config.detection_range,
                animal_mask: LayerMask::layer(config.animal_layer),
            },
            cooldown_seconds: config.cooldown_seconds,
            description_seconds: config.description_seconds,
            flash_ramp_seconds: config.flash_ramp_seconds,
            flash_hold_seconds: config.flash_hold_seconds,
            width: config.width,
            height: config.height,
        }
    }
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self::from_config(&CaptureConfig::default())
    }
}

/// Why a capture trigger did nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The session time scale is zero.
    Paused,
    /// The photography viewpoint is not the active one.
    NotPhotographing,
    /// A capture is in progress or cooling down.
    Busy,
}

/// What a capture trigger led to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CaptureOutcome {
    Ignored(IgnoreReason),
    /// The capture ran but no animal was visible. Nothing was scored or saved.
    Empty,
    /// Animals were photographed; a picture is waiting to be rendered.
    Captured(CaptureResult),
}

/// A photo waiting for its end-of-frame render.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingPhoto {
    /// The photography view at the moment of capture.
    pub view: CameraView,
    pub width: u32,
    pub height: u32,
    /// Points this photo earned.
    pub score: u64,
    /// Names of the animals in the shot.
    pub animals: Vec<String>,
}

/// Total points earned this session. Only [`PhotoScorer`] can add to it.
#[derive(Clone, Copy, Debug, Default)]
struct RunningScore(u64);

impl RunningScore {
    fn add(&mut self, points: u64) {
        self.0 = self.0.saturating_add(points);
    }
}

/// Drives the capture sequence: trigger, detection, scoring, feedback, and
/// the cool-down that keeps captures exclusive.
#[derive(Resource, Clone, Debug)]
pub struct PhotoScorer {
    settings: CaptureSettings,
    score: RunningScore,
    cooldown: Option<Timer>,
    flash: CaptureFlash,
    description: DescriptionDisplay,
    pending: Option<PendingPhoto>,
    photos_taken: u32,
}

impl PhotoScorer {
    pub fn new(settings: CaptureSettings) -> Self {
        let flash = CaptureFlash::new(settings.flash_ramp_seconds, settings.flash_hold_seconds);
        Self {
            settings,
            score: RunningScore::default(),
            cooldown: None,
            flash,
            description: DescriptionDisplay::default(),
            pending: None,
            photos_taken: 0,
        }
    }

    /// Handle a capture trigger.
    ///
    /// `photography_view` is the photography viewpoint's view when that
    /// viewpoint is active, `None` otherwise. Ignored triggers have no
    /// effect at all. Any capture that runs, even an empty one, starts the
    /// cool-down.
    pub fn try_capture(
        &mut self,
        session: &SessionState,
        photography_view: Option<&CameraView>,
        world: &impl SpatialQuery,
        scorables: &Scorables,
    ) -> CaptureOutcome {
        if session.is_paused() {
            return CaptureOutcome::Ignored(IgnoreReason::Paused);
        }
        let Some(view) = photography_view else {
            return CaptureOutcome::Ignored(IgnoreReason::NotPhotographing);
        };
        if self.is_capturing() {
            return CaptureOutcome::Ignored(IgnoreReason::Busy);
        }

        self.cooldown = Some(Timer::new(self.settings.cooldown_seconds));

        let result = detect(view, world, scorables, &self.settings.detection);
        if result.is_empty() {
            tracing::debug!("No animals in the photo, nothing will be saved");
            return CaptureOutcome::Empty;
        }

        self.score.add(result.score);
        self.photos_taken += 1;
        self.flash.trigger();
        if let Some(first) = result.first() {
            self.description
                .show(first.description.clone(), self.settings.description_seconds);
        }
        self.pending = Some(PendingPhoto {
            view: *view,
            width: self.settings.width,
            height: self.settings.height,
            score: result.score,
            animals: result.detected.iter().map(|e| e.name.clone()).collect(),
        });
        tracing::info!(
            "Photographed {} animal(s) for {} points, total {}",
            result.detected.len(),
            result.score,
            self.score.0
        );
        CaptureOutcome::Captured(result)
    }

    /// Advance the cool-down, flash and description by the scaled delta.
    pub fn tick(&mut self, dt: f32) {
        if let Some(cooldown) = self.cooldown.as_mut()
            && cooldown.tick(dt)
        {
            self.cooldown = None;
        }
        self.flash.tick(dt);
        self.description.tick(dt);
    }

    /// The photo captured this frame, if any. Taking it clears it.
    pub fn take_pending_photo(&mut self) -> Option<PendingPhoto> {
        self.pending.take()
    }

    /// Running score.
    pub fn score(&self) -> u64 {
        self.score.0
    }

    /// True from a capture until its cool-down has elapsed.
    pub fn is_capturing(&self) -> bool {
        self.cooldown.is_some()
    }

    pub fn flash_opacity(&self) -> f32 {
        self.flash.opacity()
    }

    /// Description of the last photo's first animal while it is displayed.
    pub fn description(&self) -> Option<&str> {
        self.description.text()
    }

    /// Number of non-empty captures.
    pub fn photos_taken(&self) -> u32 {
        self.photos_taken
    }

    pub fn settings(&self) -> &CaptureSettings {
        &self.settings
    }
}

impl Default for PhotoScorer {
    fn default() -> Self {
        Self::new(CaptureSettings::default())
    }
}

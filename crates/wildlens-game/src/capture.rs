//! Wires the capture trigger to the scorer and queues the photo's sounds.

use bevy_ecs::prelude::*;
use wildlens_ecs::{Action, InputState, SessionState, TimeRes};
use wildlens_photo::{CaptureOutcome, PhotoScorer, Scorables};
use wildlens_player::CameraRig;
use wildlens_spatial::PhysicsWorld;

use crate::audio::{AudioCue, AudioQueue};

/// Outcomes of this frame's capture triggers.
#[derive(Resource, Clone, Debug, Default)]
pub struct CaptureLog(pub Vec<CaptureOutcome>);

/// Advances the scorer's timers, then handles a capture trigger against the
/// rig's photography view.
#[allow(clippy::too_many_arguments)]
pub fn photo_capture_system(
    input: Res<InputState>,
    time: Res<TimeRes>,
    session: Res<SessionState>,
    rig: Res<CameraRig>,
    physics: Res<PhysicsWorld>,
    scorables: Res<Scorables>,
    mut scorer: ResMut<PhotoScorer>,
    mut audio: ResMut<AudioQueue>,
    mut log: ResMut<CaptureLog>,
) {
    scorer.tick(time.delta);

    if !input.just_pressed(Action::Capture) {
        return;
    }
    let view = rig.photography_view();
    let outcome = scorer.try_capture(&session, view.as_ref(), &*physics, &scorables);

    if let CaptureOutcome::Captured(result) = &outcome {
        audio.push(AudioCue::Shutter);
        if let Some(call) = result.first().and_then(|animal| animal.call_sound.clone()) {
            audio.push(AudioCue::AnimalCall(call));
        }
    }
    log.0.push(outcome);
}

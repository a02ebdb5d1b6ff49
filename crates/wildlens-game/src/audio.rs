//! Sound cues queued by gameplay for the host to play.

use bevy_ecs::prelude::*;
use wildlens_ecs::Name;
use wildlens_player::RouteEvents;

/// A sound the host should play.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AudioCue {
    /// Camera shutter for a successful photo.
    Shutter,
    /// Call of the first animal in a photo.
    AnimalCall(String),
    /// A moving animal set off on its route.
    RouteStarted(String),
    /// A moving animal reached the end of its route.
    RouteFinished(String),
}

/// Cues queued this frame, drained by the game loop.
#[derive(Resource, Clone, Debug, Default)]
pub struct AudioQueue {
    cues: Vec<AudioCue>,
}

impl AudioQueue {
    pub fn push(&mut self, cue: AudioCue) {
        tracing::trace!("Queued {cue:?}");
        self.cues.push(cue);
    }

    pub fn drain(&mut self) -> Vec<AudioCue> {
        std::mem::take(&mut self.cues)
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }
}

/// Turns route start/end events into audio cues named after the mover.
pub fn route_audio_system(
    mut events: ResMut<RouteEvents>,
    mut audio: ResMut<AudioQueue>,
    names: Query<&Name>,
) {
    for event in events.0.drain(..) {
        let name = names
            .get(event.entity)
            .map_or_else(|_| format!("{:?}", event.entity), |n| n.0.clone());
        if event.cues.started {
            audio.push(AudioCue::RouteStarted(name.clone()));
        }
        if event.cues.finished {
            audio.push(AudioCue::RouteFinished(name));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wildlens_player::{MoverCues, RouteEvent};

    #[test]
    fn test_route_events_become_named_cues() {
        let mut world = World::new();
        world.insert_resource(AudioQueue::default());
        let heron = world.spawn(Name::new("grey heron")).id();
        world.insert_resource(RouteEvents(vec![RouteEvent {
            entity: heron,
            cues: MoverCues {
                started: true,
                finished: true,
            },
        }]));

        let mut schedule = Schedule::default();
        schedule.add_systems(route_audio_system);
        schedule.run(&mut world);

        assert_eq!(
            world.resource_mut::<AudioQueue>().drain(),
            vec![
                AudioCue::RouteStarted("grey heron".to_string()),
                AudioCue::RouteFinished("grey heron".to_string()),
            ]
        );
        assert!(world.resource::<RouteEvents>().0.is_empty());
    }
}

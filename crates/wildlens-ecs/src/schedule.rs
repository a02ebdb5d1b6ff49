//! Frame schedule labels and the ordered schedule runner.

use bevy_ecs::prelude::*;
use bevy_ecs::schedule::{IntoSystemConfigs, ScheduleLabel};

use crate::{SessionState, TimeRes};

/// Labels for each frame stage.
///
/// Stages run in the order listed, top to bottom, every frame.
#[derive(ScheduleLabel, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameSchedule {
    /// Menu-level input that changes the session (pause).
    PreUpdate,
    /// Gameplay: camera rig, photo capture, route movement.
    Update,
    /// Derived presentation state (HUD text, overlays).
    PostUpdate,
}

/// Ordered collection of [`Schedule`]s that drives one frame.
///
/// Each call to [`run`](Self::run) is one host tick: it advances
/// [`TimeRes`] with the session time scale, then runs every stage once.
pub struct GameSchedules {
    schedules: Vec<(GameSchedule, Schedule)>,
}

impl GameSchedules {
    /// Create the three empty stages.
    pub fn new() -> Self {
        let schedules = [
            GameSchedule::PreUpdate,
            GameSchedule::Update,
            GameSchedule::PostUpdate,
        ]
        .into_iter()
        .map(|label| (label, Schedule::default()))
        .collect();

        Self { schedules }
    }

    /// Register a system (or system tuple) into a specific stage.
    pub fn add_system<M>(&mut self, stage: GameSchedule, system: impl IntoSystemConfigs<M>) {
        if let Some(schedule) = self.get_schedule_mut(&stage) {
            schedule.add_systems(system);
        }
    }

    /// Run one frame of `frame_dt` real seconds.
    ///
    /// Requires [`TimeRes`] and [`SessionState`] in the world (see
    /// [`create_world`](crate::create_world)).
    pub fn run(&mut self, world: &mut World, frame_dt: f32) {
        let time_scale = world.resource::<SessionState>().time_scale;
        world
            .resource_mut::<TimeRes>()
            .advance(frame_dt, time_scale);

        for (_label, schedule) in &mut self.schedules {
            schedule.run(world);
        }
    }

    /// Returns a mutable reference to the schedule for a given stage.
    pub fn get_schedule_mut(&mut self, stage: &GameSchedule) -> Option<&mut Schedule> {
        self.schedules
            .iter_mut()
            .find(|(label, _)| label == stage)
            .map(|(_, schedule)| schedule)
    }
}

impl Default for GameSchedules {
    fn default() -> Self {
        Self::new()
    }
}

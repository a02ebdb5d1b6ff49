//! Waypoint routes for moving animals.

use bevy_ecs::prelude::*;
use glam::Vec3;
use wildlens_ecs::{Position, TimeRes};
use wildlens_spatial::{ColliderHandle, PhysicsWorld};

/// Start/end notifications produced by one mover update. Only set for
/// movers created with cues enabled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoverCues {
    /// The route just began.
    pub started: bool,
    /// The final waypoint was just reached.
    pub finished: bool,
}

impl MoverCues {
    pub fn is_empty(&self) -> bool {
        !self.started && !self.finished
    }
}

/// Moves an entity along an ordered list of positions at constant speed.
///
/// The first update snaps to the first waypoint. The target index only
/// ever increases and stops at the last waypoint, where the mover halts
/// for good. An empty route never moves anything.
#[derive(Component, Clone, Debug)]
pub struct WaypointMover {
    waypoints: Vec<Vec3>,
    speed: f32,
    tolerance: f32,
    cues: bool,
    index: usize,
    activated: bool,
    halted: bool,
}

impl WaypointMover {
    pub fn new(waypoints: Vec<Vec3>, speed: f32, tolerance: f32) -> Self {
        Self {
            waypoints,
            speed: speed.max(0.0),
            tolerance: tolerance.max(0.0),
            cues: false,
            index: 0,
            activated: false,
            halted: false,
        }
    }

    /// Report route start and end through [`MoverCues`].
    pub fn with_cues(mut self, cues: bool) -> Self {
        self.cues = cues;
        self
    }

    /// Advance one frame, moving `position` at most `speed * dt`.
    pub fn tick(&mut self, position: &mut Vec3, dt: f32) -> MoverCues {
        let mut cues = MoverCues::default();
        if self.waypoints.is_empty() || self.halted {
            return cues;
        }
        if !self.activated {
            self.activated = true;
            *position = self.waypoints[0];
            cues.started = self.cues;
        }

        let target = self.waypoints[self.index];
        *position = move_towards(*position, target, self.speed * dt);

        if position.distance(target) < self.tolerance || *position == target {
            if self.index + 1 < self.waypoints.len() {
                self.index += 1;
            } else {
                self.halted = true;
                cues.finished = self.cues;
            }
        }
        cues
    }

    /// Index of the waypoint currently being approached.
    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn waypoints(&self) -> &[Vec3] {
        &self.waypoints
    }
}

/// Step from `current` toward `target` by at most `max_delta`, never
/// overshooting.
fn move_towards(current: Vec3, target: Vec3, max_delta: f32) -> Vec3 {
    let to_target = target - current;
    let distance = to_target.length();
    if distance <= max_delta || distance == 0.0 {
        target
    } else {
        current + to_target / distance * max_delta
    }
}

/// Collider carried along by a mover, re-centred on its position.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoverCollider(pub ColliderHandle);

/// A cue emitted by a mover this frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteEvent {
    pub entity: Entity,
    pub cues: MoverCues,
}

/// Route cues collected during the frame, drained by the audio glue.
#[derive(Resource, Clone, Debug, Default)]
pub struct RouteEvents(pub Vec<RouteEvent>);

/// Moves every mover by the scaled frame delta, keeps attached colliders in
/// step, and records route cues.
pub fn waypoint_mover_system(
    time: Res<TimeRes>,
    mut physics: ResMut<PhysicsWorld>,
    mut events: ResMut<RouteEvents>,
    mut movers: Query<(Entity, &mut Position, &mut WaypointMover, Option<&MoverCollider>)>,
) {
    for (entity, mut position, mut mover, collider) in movers.iter_mut() {
        if mover.is_halted() {
            continue;
        }
        let cues = mover.tick(&mut position.0, time.delta);
        if let Some(MoverCollider(handle)) = collider {
            physics.set_translation(*handle, position.0);
        }
        if !cues.is_empty() {
            events.0.push(RouteEvent { entity, cues });
        }
    }
}

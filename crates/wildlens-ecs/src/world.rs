//! World factory function and core resource registration.

use bevy_ecs::prelude::*;

use crate::{InputState, SessionState, TimeRes};

/// Registers the core resources ([`TimeRes`], [`SessionState`],
/// [`InputState`]) with default values.
pub fn register_core_resources(world: &mut World) {
    world.insert_resource(TimeRes::default());
    world.insert_resource(SessionState::default());
    world.insert_resource(InputState::default());
}

/// Creates a world with all core resources pre-inserted.
pub fn create_world() -> World {
    let mut world = World::new();
    register_core_resources(&mut world);
    world
}

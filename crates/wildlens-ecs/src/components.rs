//! Core ECS components shared across game crates.

use bevy_ecs::prelude::*;
use glam::Vec3;

/// World-space position of an entity.
#[derive(Component, Clone, Copy, Debug, PartialEq, Default)]
pub struct Position(pub Vec3);

impl Position {
    /// Creates a new [`Position`] from coordinates.
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self(Vec3::new(x, y, z))
    }
}

/// Human-readable name for debugging and logs.
#[derive(Component, Clone, Debug, PartialEq, Eq, Default)]
pub struct Name(pub String);

impl Name {
    /// Creates a new [`Name`].
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

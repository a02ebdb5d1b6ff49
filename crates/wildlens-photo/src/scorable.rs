//! Animals worth points when photographed.

use bevy_ecs::prelude::*;
use rustc_hash::FxHashMap;
use wildlens_spatial::ColliderHandle;

/// A placed animal. Immutable once the scene is loaded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScorableEntity {
    pub name: String,
    /// Text shown when this is the first animal in a photo.
    pub description: String,
    pub point_value: u32,
    /// Collider standing in for the animal's body.
    pub collider: ColliderHandle,
    /// Sound queued when this is the first animal in a photo.
    pub call_sound: Option<String>,
}

impl ScorableEntity {
    /// Points awarded when nothing else is configured.
    pub const DEFAULT_POINTS: u32 = 100;
}

/// Every scorable entity in the scene, keyed by collider.
#[derive(Resource, Clone, Debug, Default)]
pub struct Scorables {
    by_collider: FxHashMap<ColliderHandle, ScorableEntity>,
}

impl Scorables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entity. A second entity on the same collider replaces
    /// the first.
    pub fn insert(&mut self, entity: ScorableEntity) {
        self.by_collider.insert(entity.collider, entity);
    }

    pub fn get(&self, collider: ColliderHandle) -> Option<&ScorableEntity> {
        self.by_collider.get(&collider)
    }

    pub fn len(&self) -> usize {
        self.by_collider.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_collider.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScorableEntity> {
        self.by_collider.values()
    }
}

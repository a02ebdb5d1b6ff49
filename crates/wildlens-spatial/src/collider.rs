//! Box colliders in a Rapier world, answering the two queries the capture
//! pipeline needs: "what overlaps this sphere" and "what does this ray hit
//! first".
//!
//! Colliders are parentless Rapier cuboids. Each one carries its index in
//! `user_data`, which is the [`ColliderHandle`] handed out to callers, and
//! its layer as the membership of its [`InteractionGroups`].

use std::fmt;

use bevy_ecs::prelude::*;
use glam::Vec3;
use rapier3d::math::Pose;
use rapier3d::prelude::{
    Ball, BroadPhaseBvh, CCDSolver, Collider as RapierCollider, ColliderBuilder,
    ColliderHandle as RapierHandle, ColliderSet, Group, ImpulseJointSet, IntegrationParameters,
    InteractionGroups, IslandManager, MultibodyJointSet, NarrowPhase, PhysicsPipeline,
    QueryFilter, Ray as PhysicsRay, RigidBodySet, Vector,
};
use serde::{Deserialize, Serialize};

use crate::{Aabb, Ray};

/// Handle to a collider stored in a [`PhysicsWorld`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColliderHandle(pub u32);

/// Bit set of collider layers (0..32).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerMask(pub u32);

impl LayerMask {
    /// Matches every layer.
    pub const ALL: Self = Self(u32::MAX);
    /// Matches no layer.
    pub const NONE: Self = Self(0);

    /// A mask containing a single layer. Layers above 31 match nothing.
    pub fn layer(index: u32) -> Self {
        Self(1_u32.checked_shl(index).unwrap_or(0))
    }

    /// Returns true if `layer` is part of this mask.
    pub fn contains(self, layer: u32) -> bool {
        self.0 & Self::layer(layer).0 != 0
    }

    /// Groups for a query that sees colliders on these layers.
    pub fn query_groups(self) -> InteractionGroups {
        InteractionGroups::all().with_filter(Group::from_bits_truncate(self.0))
    }

    /// Groups for a collider living on `layer`.
    pub fn collider_groups(layer: u32) -> InteractionGroups {
        InteractionGroups::all().with_memberships(Group::from_bits_truncate(Self::layer(layer).0))
    }
}

/// A static or kinematic box in the world.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Collider {
    /// World-space bounds.
    pub bounds: Aabb,
    /// Layer index used by masked queries.
    pub layer: u32,
}

/// Nearest hit reported by [`SpatialQuery::cast_ray`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// Collider that was hit.
    pub handle: ColliderHandle,
    /// Distance from the ray origin to the entry point.
    pub distance: f32,
    /// World-space entry point.
    pub point: Vec3,
}

/// Spatial queries over a collection of colliders.
pub trait SpatialQuery {
    /// Colliders on `mask` layers whose bounds touch the sphere, in
    /// insertion order.
    fn overlap_sphere(&self, center: Vec3, radius: f32, mask: LayerMask) -> Vec<ColliderHandle>;

    /// The closest collider on `mask` layers entered by `ray` within
    /// `max_distance`. Colliders containing the ray origin are skipped.
    fn cast_ray(&self, ray: &Ray, max_distance: f32, mask: LayerMask) -> Option<RayHit>;

    /// Current bounds of a collider.
    fn bounds(&self, handle: ColliderHandle) -> Option<Aabb>;

    /// Layer a collider lives on.
    fn layer(&self, handle: ColliderHandle) -> Option<u32>;
}

struct Entry {
    collider: Collider,
    rapier: RapierHandle,
}

/// Rapier state for the scene's colliders.
///
/// Nothing is simulated: the pipeline is stepped only to bring the broad
/// phase up to date after colliders are added or moved, so queries always
/// see the current layout. Handles stay valid for the lifetime of the
/// world; a scene reload builds a fresh one.
#[derive(Resource)]
pub struct PhysicsWorld {
    entries: Vec<Entry>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: BroadPhaseBvh,
    narrow_phase: NarrowPhase,
    rigid_body_set: RigidBodySet,
    collider_set: ColliderSet,
    impulse_joint_set: ImpulseJointSet,
    multibody_joint_set: MultibodyJointSet,
    ccd_solver: CCDSolver,
}

impl PhysicsWorld {
    /// Create an empty world.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: BroadPhaseBvh::new(),
            narrow_phase: NarrowPhase::new(),
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
        }
    }

    /// Add a collider and return its handle.
    pub fn insert(&mut self, collider: Collider) -> ColliderHandle {
        let handle = ColliderHandle(self.entries.len() as u32);
        let half = collider.bounds.extents();
        let center = collider.bounds.center();
        let rapier = ColliderBuilder::cuboid(half.x, half.y, half.z)
            .translation(to_vector(center))
            .collision_groups(LayerMask::collider_groups(collider.layer))
            .user_data(u128::from(handle.0))
            .build();
        let rapier = self.collider_set.insert(rapier);
        self.entries.push(Entry { collider, rapier });
        self.refresh();
        handle
    }

    /// Look up a collider.
    pub fn get(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.entries.get(handle.0 as usize).map(|e| &e.collider)
    }

    /// Move a collider so its bounds are centered on `center`.
    pub fn set_translation(&mut self, handle: ColliderHandle, center: Vec3) {
        let Some(entry) = self.entries.get_mut(handle.0 as usize) else {
            return;
        };
        entry.collider.bounds = entry.collider.bounds.recentered(center);
        if let Some(collider) = self.collider_set.get_mut(entry.rapier) {
            collider.set_translation(to_vector(center));
        }
        self.refresh();
    }

    /// Number of colliders.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the world holds no colliders.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(handle, collider)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (ColliderHandle, &Collider)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, e)| (ColliderHandle(i as u32), &e.collider))
    }

    /// Step once with no bodies so added or moved colliders reach the broad
    /// phase.
    fn refresh(&mut self) {
        self.physics_pipeline.step(
            Vector::new(0.0, 0.0, 0.0),
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            &(),
            &(),
        );
    }

    fn handle_of(collider: &RapierCollider) -> ColliderHandle {
        ColliderHandle(collider.user_data as u32)
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PhysicsWorld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhysicsWorld")
            .field("colliders", &self.entries.len())
            .finish_non_exhaustive()
    }
}

impl SpatialQuery for PhysicsWorld {
    fn overlap_sphere(&self, center: Vec3, radius: f32, mask: LayerMask) -> Vec<ColliderHandle> {
        let filter = QueryFilter::new().groups(mask.query_groups());
        let query_pipeline = self.broad_phase.as_query_pipeline(
            self.narrow_phase.query_dispatcher(),
            &self.rigid_body_set,
            &self.collider_set,
            filter,
        );
        let ball = Ball::new(radius);
        let mut found: Vec<ColliderHandle> = query_pipeline
            .intersect_shape(Pose::from_translation(to_vector(center)), &ball)
            .map(|(_, collider)| Self::handle_of(collider))
            .collect();
        found.sort_unstable();
        found
    }

    fn cast_ray(&self, ray: &Ray, max_distance: f32, mask: LayerMask) -> Option<RayHit> {
        let origin = ray.origin;
        let outside = |_: RapierHandle, collider: &RapierCollider| {
            self.get(Self::handle_of(collider))
                .is_none_or(|c| !c.bounds.contains_point(origin))
        };
        let filter = QueryFilter::new()
            .groups(mask.query_groups())
            .predicate(&outside);
        let query_pipeline = self.broad_phase.as_query_pipeline(
            self.narrow_phase.query_dispatcher(),
            &self.rigid_body_set,
            &self.collider_set,
            filter,
        );

        let physics_ray = PhysicsRay::new(to_vector(ray.origin), to_vector(ray.direction));
        let (hit, distance) = query_pipeline.cast_ray(&physics_ray, max_distance, true)?;
        let collider = self.collider_set.get(hit)?;
        Some(RayHit {
            handle: Self::handle_of(collider),
            distance,
            point: ray.at(distance),
        })
    }

    fn bounds(&self, handle: ColliderHandle) -> Option<Aabb> {
        self.get(handle).map(|c| c.bounds)
    }

    fn layer(&self, handle: ColliderHandle) -> Option<u32> {
        self.get(handle).map(|c| c.layer)
    }
}

/// Rapier may link a different glam than the workspace; go through
/// components.
fn to_vector(v: Vec3) -> Vector {
    Vector::new(v.x, v.y, v.z)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boxed(center: Vec3, layer: u32) -> Collider {
        Collider {
            bounds: Aabb::from_center_half_extents(center, Vec3::splat(0.5)),
            layer,
        }
    }

    #[test]
    fn test_layer_mask_bits() {
        let mask = LayerMask::layer(3);
        assert!(mask.contains(3));
        assert!(!mask.contains(0));
        assert!(LayerMask::ALL.contains(31));
        assert!(!LayerMask::NONE.contains(0));
        assert_eq!(LayerMask::layer(40), LayerMask::NONE);
    }

    #[test]
    fn test_overlap_sphere_filters_by_radius_and_layer() {
        let mut world = PhysicsWorld::new();
        let near = world.insert(boxed(Vec3::new(0.0, 0.0, -5.0), 3));
        let _far = world.insert(boxed(Vec3::new(0.0, 0.0, -50.0), 3));
        let _other_layer = world.insert(boxed(Vec3::new(0.0, 0.0, -4.0), 0));

        let found = world.overlap_sphere(Vec3::ZERO, 20.0, LayerMask::layer(3));
        assert_eq!(found, vec![near]);
    }

    #[test]
    fn test_overlap_sphere_counts_touching_box() {
        let mut world = PhysicsWorld::new();
        // Nearest face at 19.5, centre beyond the radius.
        let edge = world.insert(boxed(Vec3::new(0.0, 0.0, -20.0), 3));
        let found = world.overlap_sphere(Vec3::ZERO, 19.8, LayerMask::ALL);
        assert_eq!(found, vec![edge]);
    }

    #[test]
    fn test_overlap_sphere_reports_insertion_order() {
        let mut world = PhysicsWorld::new();
        let handles: Vec<_> = (0..5)
            .map(|i| world.insert(boxed(Vec3::new(i as f32 * 2.0, 0.0, -3.0), 3)))
            .collect();
        assert_eq!(world.overlap_sphere(Vec3::ZERO, 20.0, LayerMask::ALL), handles);
    }

    #[test]
    fn test_cast_ray_returns_nearest() {
        let mut world = PhysicsWorld::new();
        let far = world.insert(boxed(Vec3::new(0.0, 0.0, -10.0), 0));
        let near = world.insert(boxed(Vec3::new(0.0, 0.0, -5.0), 1));

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let hit = world.cast_ray(&ray, 100.0, LayerMask::ALL).unwrap();
        assert_eq!(hit.handle, near);
        assert!((hit.distance - 4.5).abs() < 1e-4);
        assert!((hit.point - Vec3::new(0.0, 0.0, -4.5)).length() < 1e-4);

        let masked = world.cast_ray(&ray, 100.0, LayerMask::layer(0)).unwrap();
        assert_eq!(masked.handle, far);
    }

    #[test]
    fn test_cast_ray_respects_max_distance() {
        let mut world = PhysicsWorld::new();
        world.insert(boxed(Vec3::new(0.0, 0.0, -10.0), 0));
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert!(world.cast_ray(&ray, 5.0, LayerMask::ALL).is_none());
    }

    #[test]
    fn test_cast_ray_ignores_collider_around_origin() {
        let mut world = PhysicsWorld::new();
        let _shell = world.insert(Collider {
            bounds: Aabb::from_center_half_extents(Vec3::ZERO, Vec3::splat(2.0)),
            layer: 0,
        });
        let target = world.insert(boxed(Vec3::new(0.0, 0.0, -10.0), 0));

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert_eq!(world.cast_ray(&ray, 100.0, LayerMask::ALL).unwrap().handle, target);
    }

    #[test]
    fn test_set_translation_moves_bounds_and_queries() {
        let mut world = PhysicsWorld::new();
        let handle = world.insert(boxed(Vec3::new(0.0, 0.0, -5.0), 0));
        world.set_translation(handle, Vec3::new(3.0, 0.0, -5.0));

        let bounds = world.bounds(handle).unwrap();
        assert_eq!(bounds.center(), Vec3::new(3.0, 0.0, -5.0));
        assert_eq!(bounds.extents(), Vec3::splat(0.5));

        let straight = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert!(world.cast_ray(&straight, 100.0, LayerMask::ALL).is_none());
        let (aimed, distance) = Ray::toward(Vec3::ZERO, Vec3::new(3.0, 0.0, -5.0));
        assert_eq!(
            world.cast_ray(&aimed, distance, LayerMask::ALL).unwrap().handle,
            handle
        );
    }
}

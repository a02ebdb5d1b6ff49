//! Spatial queries for the photo pipeline: bounding boxes, rays, view
//! frusta, camera views, and a Rapier-backed [`PhysicsWorld`] of box
//! colliders answering radius-overlap and nearest-hit ray queries.

mod aabb;
mod camera;
mod collider;
mod frustum;
mod ray;

pub use aabb::Aabb;
pub use camera::CameraView;
pub use collider::{Collider, ColliderHandle, LayerMask, PhysicsWorld, RayHit, SpatialQuery};
pub use frustum::Frustum;
pub use ray::Ray;

//! The player rig and moving actors: two switchable viewpoints behind a
//! fade overlay, pointer look and zoom, and waypoint-following movers.

pub mod camera_rig;
pub mod fade;
pub mod viewpoint;
pub mod waypoint;

pub use camera_rig::{CameraRig, RigSettings, RigState, camera_rig_system};
pub use fade::FadeOverlay;
pub use viewpoint::{Viewpoint, ViewpointKind};
pub use waypoint::{
    MoverCollider, MoverCues, RouteEvent, RouteEvents, WaypointMover, waypoint_mover_system,
};

//! A virtual camera mounted on the player rig.

use glam::{Quat, Vec3};
use wildlens_spatial::CameraView;

/// Which of the rig's two viewpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViewpointKind {
    /// Wide view used while walking around.
    Navigation,
    /// Zoomable view used to take photos.
    Photography,
}

impl ViewpointKind {
    /// The other viewpoint.
    pub fn other(self) -> Self {
        match self {
            Self::Navigation => Self::Photography,
            Self::Photography => Self::Navigation,
        }
    }
}

/// A viewpoint's lens and mount. The world transform is derived from the
/// rig each frame: `rig position + rig rotation * offset`, oriented by the
/// rig yaw followed by the local pitch.
#[derive(Clone, Debug, PartialEq)]
pub struct Viewpoint {
    /// Allowed field of view in degrees, `(min, max)`.
    pub fov_range: (f32, f32),
    /// Live vertical field of view in degrees.
    pub fov: f32,
    /// Whether this viewpoint is the one being looked through.
    pub active: bool,
    /// Mount point relative to the rig origin.
    pub local_offset: Vec3,
    /// Local orientation (pitch only).
    pub local_rotation: Quat,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
}

impl Viewpoint {
    /// World-space position and orientation given the rig's transform.
    pub fn world_transform(&self, rig_position: Vec3, rig_rotation: Quat) -> (Vec3, Quat) {
        (
            rig_position + rig_rotation * self.local_offset,
            (rig_rotation * self.local_rotation).normalize(),
        )
    }

    /// Everything needed to look through this viewpoint.
    pub fn camera_view(&self, rig_position: Vec3, rig_rotation: Quat) -> CameraView {
        let (position, rotation) = self.world_transform(rig_position, rig_rotation);
        CameraView {
            position,
            rotation,
            fov_y_degrees: self.fov,
            aspect_ratio: self.aspect_ratio,
            near: self.near,
            far: self.far,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewpoint() -> Viewpoint {
        Viewpoint {
            fov_range: (20.0, 60.0),
            fov: 60.0,
            active: true,
            local_offset: Vec3::new(0.0, 1.6, 0.0),
            local_rotation: Quat::IDENTITY,
            aspect_ratio: 16.0 / 9.0,
            near: 0.3,
            far: 1000.0,
        }
    }

    #[test]
    fn test_offset_follows_rig_rotation() {
        let mut vp = viewpoint();
        vp.local_offset = Vec3::new(0.0, 0.0, -1.0);
        let rig_rot = Quat::from_rotation_y(std::f32::consts::FRAC_PI_2);
        let (pos, _) = vp.world_transform(Vec3::new(5.0, 0.0, 0.0), rig_rot);
        assert!((pos - Vec3::new(4.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_camera_view_copies_lens() {
        let view = viewpoint().camera_view(Vec3::ZERO, Quat::IDENTITY);
        assert_eq!(view.position, Vec3::new(0.0, 1.6, 0.0));
        assert_eq!(view.fov_y_degrees, 60.0);
        assert!((view.forward() - Vec3::NEG_Z).length() < 1e-6);
    }

    #[test]
    fn test_other_kind() {
        assert_eq!(ViewpointKind::Navigation.other(), ViewpointKind::Photography);
        assert_eq!(ViewpointKind::Photography.other(), ViewpointKind::Navigation);
    }
}

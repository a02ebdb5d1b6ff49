//! Which scorable animals a viewpoint can see right now.

use wildlens_spatial::{CameraView, LayerMask, Ray, SpatialQuery};

use crate::scorable::{ScorableEntity, Scorables};

/// Where to look for animals.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DetectionSettings {
    /// Radius around the viewpoint searched for candidates.
    pub range: f32,
    /// Layers animal colliders live on.
    pub animal_mask: LayerMask,
}

impl Default for DetectionSettings {
    fn default() -> Self {
        Self {
            range: 20.0,
            animal_mask: LayerMask::layer(3),
        }
    }
}

/// Animals detected by one capture, in query order, and what they are worth.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CaptureResult {
    pub detected: Vec<ScorableEntity>,
    pub score: u64,
}

impl CaptureResult {
    pub fn is_empty(&self) -> bool {
        self.detected.is_empty()
    }

    /// The animal whose description and call are used for this photo.
    pub fn first(&self) -> Option<&ScorableEntity> {
        self.detected.first()
    }
}

/// Detect every scorable entity that is within range of the view, inside
/// its frustum, and not hidden behind another collider.
///
/// Line of sight is a ray from the eye to the candidate's centre, limited
/// to that distance and tested against every layer. The candidate is
/// visible when nothing is hit or the nearest hit is the candidate itself.
pub fn detect(
    view: &CameraView,
    world: &impl SpatialQuery,
    scorables: &Scorables,
    settings: &DetectionSettings,
) -> CaptureResult {
    let frustum = view.frustum();
    let mut result = CaptureResult::default();

    for handle in world.overlap_sphere(view.position, settings.range, settings.animal_mask) {
        let Some(entity) = scorables.get(handle) else {
            continue;
        };
        let Some(bounds) = world.bounds(handle) else {
            continue;
        };
        if !frustum.intersects_aabb(&bounds) {
            continue;
        }

        let (ray, distance) = Ray::toward(view.position, bounds.center());
        if let Some(hit) = world.cast_ray(&ray, distance, LayerMask::ALL)
            && hit.handle != handle
        {
            tracing::trace!("{} is blocked by collider {:?}", entity.name, hit.handle);
            continue;
        }

        result.score += u64::from(entity.point_value);
        result.detected.push(entity.clone());
    }

    result
}

//! Offscreen rendering of a photo.

use glam::Vec3;
use image::{Rgb, RgbImage};
use wildlens_spatial::{Aabb, CameraView, LayerMask, SpatialQuery};

/// Produces the picture seen through a view.
pub trait PhotoRenderer {
    fn render(&self, view: &CameraView, world: &dyn SpatialQuery, width: u32, height: u32)
    -> RgbImage;
}

/// Casts one ray per pixel against the collider set. Boxes are flat-shaded
/// by face with distance fog, misses show a sky gradient.
#[derive(Clone, Debug)]
pub struct RaycastRenderer {
    /// Layer drawn in the animal colour.
    pub animal_layer: u32,
    pub animal_color: Vec3,
    pub obstacle_color: Vec3,
    pub sky_zenith: Vec3,
    pub sky_horizon: Vec3,
    /// Direction toward the sun.
    pub light_dir: Vec3,
    /// Distance at which surfaces fully fade into the horizon colour.
    pub fog_distance: f32,
}

impl Default for RaycastRenderer {
    fn default() -> Self {
        Self {
            animal_layer: 3,
            animal_color: Vec3::new(0.62, 0.38, 0.18),
            obstacle_color: Vec3::new(0.30, 0.45, 0.25),
            sky_zenith: Vec3::new(0.25, 0.45, 0.85),
            sky_horizon: Vec3::new(0.80, 0.88, 0.95),
            light_dir: Vec3::new(0.4, 1.0, 0.3).normalize(),
            fog_distance: 250.0,
        }
    }
}

impl RaycastRenderer {
    fn sky(&self, direction: Vec3) -> Vec3 {
        let t = direction.y.clamp(0.0, 1.0);
        self.sky_horizon.lerp(self.sky_zenith, t)
    }
}

impl PhotoRenderer for RaycastRenderer {
    fn render(
        &self,
        view: &CameraView,
        world: &dyn SpatialQuery,
        width: u32,
        height: u32,
    ) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            let ray = view.pixel_ray(x, y, width, height);
            let color = match world.cast_ray(&ray, view.far, LayerMask::ALL) {
                Some(hit) => {
                    let base = if world.layer(hit.handle) == Some(self.animal_layer) {
                        self.animal_color
                    } else {
                        self.obstacle_color
                    };
                    let normal = world
                        .bounds(hit.handle)
                        .map_or(Vec3::Y, |bounds| face_normal(&bounds, hit.point));
                    let shade = 0.35 + 0.65 * normal.dot(self.light_dir).max(0.0);
                    let fog = (hit.distance / self.fog_distance).clamp(0.0, 1.0);
                    (base * shade).lerp(self.sky_horizon, fog)
                }
                None => self.sky(ray.direction),
            };
            to_rgb(color)
        })
    }
}

/// Outward normal of the box face closest to `point`.
fn face_normal(bounds: &Aabb, point: Vec3) -> Vec3 {
    let half = bounds.extents().max(Vec3::splat(f32::EPSILON));
    let local = (point - bounds.center()) / half;
    let abs = local.abs();
    if abs.x >= abs.y && abs.x >= abs.z {
        Vec3::X * local.x.signum()
    } else if abs.y >= abs.z {
        Vec3::Y * local.y.signum()
    } else {
        Vec3::Z * local.z.signum()
    }
}

fn to_rgb(color: Vec3) -> Rgb<u8> {
    let c = (color.clamp(Vec3::ZERO, Vec3::ONE) * 255.0).round();
    Rgb([c.x as u8, c.y as u8, c.z as u8])
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Quat;
    use wildlens_spatial::{Collider, PhysicsWorld};

    fn view() -> CameraView {
        CameraView {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            fov_y_degrees: 60.0,
            aspect_ratio: 1.0,
            near: 0.3,
            far: 1000.0,
        }
    }

    #[test]
    fn test_image_has_requested_size() {
        let image = RaycastRenderer::default().render(&view(), &PhysicsWorld::new(), 32, 18);
        assert_eq!(image.dimensions(), (32, 18));
    }

    #[test]
    fn test_animal_in_center_is_drawn() {
        let renderer = RaycastRenderer::default();
        let mut colliders = PhysicsWorld::new();
        colliders.insert(Collider {
            bounds: Aabb::from_center_half_extents(Vec3::new(0.0, 0.0, -5.0), Vec3::splat(1.0)),
            layer: renderer.animal_layer,
        });

        let image = renderer.render(&view(), &colliders, 16, 16);
        let center = image.get_pixel(8, 8);
        let corner = image.get_pixel(0, 0);
        assert_ne!(center, corner);
        // Warm animal tone: more red than blue.
        assert!(center.0[0] > center.0[2]);
    }

    #[test]
    fn test_face_normal_picks_dominant_axis() {
        let bounds = Aabb::from_center_half_extents(Vec3::ZERO, Vec3::new(1.0, 2.0, 1.0));
        assert_eq!(face_normal(&bounds, Vec3::new(0.2, 2.0, 0.1)), Vec3::Y);
        assert_eq!(face_normal(&bounds, Vec3::new(0.2, 0.0, -1.0)), Vec3::NEG_Z);
    }
}

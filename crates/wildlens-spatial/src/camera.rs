//! Camera view parameters: view/projection matrices, frustum extraction,
//! and per-pixel primary rays.

use glam::{Mat4, Quat, Vec3};

use crate::{Frustum, Ray};

/// Everything needed to look through a viewpoint for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraView {
    /// Eye position in world space.
    pub position: Vec3,
    /// Orientation as a unit quaternion. Forward is -Z.
    pub rotation: Quat,
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    /// Width / height.
    pub aspect_ratio: f32,
    /// Near clip plane distance (always positive).
    pub near: f32,
    /// Far clip plane distance (always positive, > near).
    pub far: f32,
}

impl CameraView {
    /// Compute the view matrix (inverse of the camera transform).
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.forward(), self.up())
    }

    /// Compute the projection matrix with reverse-Z.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fov_y_degrees.to_radians(),
            self.aspect_ratio,
            self.far,  // swapped: far as "near" parameter
            self.near, // swapped: near as "far" parameter
        )
    }

    /// Compute the combined view-projection matrix.
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// The view frustum of this camera.
    pub fn frustum(&self) -> Frustum {
        Frustum::from_view_projection(&self.view_projection_matrix())
    }

    /// The forward direction vector (-Z in camera space).
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    /// The up direction vector (+Y in camera space).
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// The right direction vector (+X in camera space).
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Primary ray through the center of pixel `(x, y)` of a `width`×`height`
    /// image, row 0 at the top. The image aspect overrides `aspect_ratio`.
    pub fn pixel_ray(&self, x: u32, y: u32, width: u32, height: u32) -> Ray {
        let width = width.max(1) as f32;
        let height = height.max(1) as f32;
        let ndc_x = (x as f32 + 0.5) / width * 2.0 - 1.0;
        let ndc_y = 1.0 - (y as f32 + 0.5) / height * 2.0;

        let tan_half = (self.fov_y_degrees.to_radians() * 0.5).tan();
        let aspect = width / height;
        let dir = self.forward()
            + self.right() * (ndc_x * tan_half * aspect)
            + self.up() * (ndc_y * tan_half);
        Ray::new(self.position, dir)
    }
}

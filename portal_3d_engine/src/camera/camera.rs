/// Camera — perspective camera with a cached world matrix and its inverse.
///
/// Pose (position + orientation) and lens (fov, aspect, near, far) are the
/// inputs. `update_matrix_world()` turns the pose into `world` and
/// `world_inverse` while `matrix_auto_update` is set; the portal pipeline
/// clears the flag and writes the matrices directly while it renders a
/// portal view, then restores everything from a `CameraSnapshot`.
///
/// Projection uses the OpenGL clip convention (z in [-w, w]).

use glam::{Mat4, Quat, Vec3};
use crate::error::Result;
use crate::math::try_invert;
use super::frustum::Frustum;

#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec3,
    orientation: Quat,
    fov_y_degrees: f32,
    aspect: f32,
    near: f32,
    far: f32,
    world: Mat4,
    world_inverse: Mat4,
    projection: Mat4,
    matrix_auto_update: bool,
}

impl Camera {
    /// Create a perspective camera at the origin looking down -Z.
    ///
    /// # Arguments
    ///
    /// * `fov_y_degrees` - Vertical field of view, in degrees
    /// * `aspect` - Width / height
    /// * `near` - Near clip distance (> 0)
    /// * `far` - Far clip distance (> near)
    pub fn perspective(fov_y_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            fov_y_degrees,
            aspect,
            near,
            far,
            world: Mat4::IDENTITY,
            world_inverse: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
            matrix_auto_update: true,
        };
        camera.update_projection_matrix();
        camera
    }

    // ===== POSE =====

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    /// Set the position. Takes effect on the next `update_matrix_world()`.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Set the orientation. Takes effect on the next `update_matrix_world()`.
    pub fn set_orientation(&mut self, orientation: Quat) {
        self.orientation = orientation.normalize();
    }

    /// Orient the camera so that -Z points at `target`.
    pub fn look_at(&mut self, target: Vec3, up: Vec3) {
        let view = Mat4::look_at_rh(self.position, target, up);
        let (_, rotation, _) = view.inverse().to_scale_rotation_translation();
        self.orientation = rotation.normalize();
    }

    // ===== LENS =====

    pub fn fov_y_degrees(&self) -> f32 {
        self.fov_y_degrees
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn far(&self) -> f32 {
        self.far
    }

    /// Set the aspect ratio and rebuild the projection.
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
        self.update_projection_matrix();
    }

    /// Set the vertical field of view and rebuild the projection.
    pub fn set_fov_y_degrees(&mut self, fov_y_degrees: f32) {
        self.fov_y_degrees = fov_y_degrees;
        self.update_projection_matrix();
    }

    /// Rebuild the projection from the lens parameters.
    pub fn update_projection_matrix(&mut self) {
        self.projection = Mat4::perspective_rh_gl(
            self.fov_y_degrees.to_radians(),
            self.aspect,
            self.near,
            self.far,
        );
    }

    // ===== MATRICES =====

    /// Camera-to-world transform.
    pub fn world(&self) -> &Mat4 {
        &self.world
    }

    /// World-to-camera transform (the view matrix).
    pub fn world_inverse(&self) -> &Mat4 {
        &self.world_inverse
    }

    pub fn projection(&self) -> &Mat4 {
        &self.projection
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.world_inverse
    }

    /// Frustum of the current matrices.
    pub fn frustum(&self) -> Frustum {
        Frustum::from_view_projection(&self.view_projection())
    }

    pub fn matrix_auto_update(&self) -> bool {
        self.matrix_auto_update
    }

    pub fn set_matrix_auto_update(&mut self, enabled: bool) {
        self.matrix_auto_update = enabled;
    }

    /// Recompute `world` and `world_inverse` from the pose.
    ///
    /// Does nothing while `matrix_auto_update` is off.
    pub fn update_matrix_world(&mut self) {
        if !self.matrix_auto_update {
            return;
        }
        self.world = Mat4::from_rotation_translation(self.orientation, self.position);
        self.world_inverse = self.world.inverse();
    }

    /// Write the world matrix directly; the inverse is derived.
    ///
    /// # Errors
    ///
    /// Returns `Error::SingularMatrix` if `world` cannot be inverted. The
    /// camera is left unchanged in that case.
    pub fn set_world(&mut self, world: Mat4) -> Result<()> {
        let world_inverse = try_invert(&world)?;
        self.world = world;
        self.world_inverse = world_inverse;
        Ok(())
    }

    /// Write both world matrices directly. The caller guarantees they are
    /// inverses of each other.
    pub fn set_world_matrices(&mut self, world: Mat4, world_inverse: Mat4) {
        self.world = world;
        self.world_inverse = world_inverse;
    }

    /// Replace the projection without touching the lens parameters.
    pub fn set_projection(&mut self, projection: Mat4) {
        self.projection = projection;
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;

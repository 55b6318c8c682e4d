/// CameraSnapshot — the camera state a portal pass is allowed to disturb.

use glam::Mat4;
use super::camera::Camera;

/// World matrix, world inverse, projection and auto-update flag, captured
/// once per frame and restored after each portal view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSnapshot {
    pub world: Mat4,
    pub world_inverse: Mat4,
    pub projection: Mat4,
    pub matrix_auto_update: bool,
}

impl CameraSnapshot {
    pub fn capture(camera: &Camera) -> Self {
        Self {
            world: *camera.world(),
            world_inverse: *camera.world_inverse(),
            projection: *camera.projection(),
            matrix_auto_update: camera.matrix_auto_update(),
        }
    }

    /// Put every captured field back, bit for bit.
    pub fn restore(&self, camera: &mut Camera) {
        camera.set_world_matrices(self.world, self.world_inverse);
        camera.set_projection(self.projection);
        camera.set_matrix_auto_update(self.matrix_auto_update);
    }

    /// True if `camera` holds exactly the captured state.
    pub fn matches(&self, camera: &Camera) -> bool {
        *self == Self::capture(camera)
    }
}

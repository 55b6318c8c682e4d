//! Camera module — perspective camera, snapshot, frustum and the manager
//! that feeds host notifications into a shared camera.
//!
//! The engine does NOT own cameras. They are values owned and driven by
//! the caller; the renderer borrows one per frame.

mod camera;
mod camera_snapshot;
mod camera_manager;
mod frustum;

pub use camera::Camera;
pub use camera_snapshot::CameraSnapshot;
pub use camera_manager::CameraManager;
pub use frustum::{
    Frustum,
    PLANE_LEFT, PLANE_RIGHT, PLANE_BOTTOM, PLANE_TOP, PLANE_NEAR, PLANE_FAR,
};

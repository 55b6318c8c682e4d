use glam::{Mat4, Quat, Vec3, Vec4};
use super::*;
use crate::camera::CameraSnapshot;
use crate::error::Error;
use crate::math::approx_eq_mat4;

fn camera() -> Camera {
    Camera::perspective(90.0, 1.0, 0.1, 100.0)
}

// ============================================================================
// Construction / lens
// ============================================================================

#[test]
fn test_perspective_defaults() {
    let cam = camera();
    assert_eq!(cam.position(), Vec3::ZERO);
    assert_eq!(cam.orientation(), Quat::IDENTITY);
    assert!(cam.matrix_auto_update());
    assert_eq!(*cam.world(), Mat4::IDENTITY);
    assert_eq!(*cam.world_inverse(), Mat4::IDENTITY);
    assert_eq!(
        *cam.projection(),
        Mat4::perspective_rh_gl(90f32.to_radians(), 1.0, 0.1, 100.0)
    );
}

#[test]
fn test_projection_is_gl_convention() {
    let cam = camera();
    // A point on the near plane maps to z_ndc = -1, on the far plane to +1
    let near = *cam.projection() * Vec4::new(0.0, 0.0, -0.1, 1.0);
    let far = *cam.projection() * Vec4::new(0.0, 0.0, -100.0, 1.0);
    assert!((near.z / near.w + 1.0).abs() < 1e-4);
    assert!((far.z / far.w - 1.0).abs() < 1e-4);
}

#[test]
fn test_set_aspect_rebuilds_projection() {
    let mut cam = camera();
    cam.set_aspect(2.0);
    assert_eq!(cam.aspect(), 2.0);
    assert_eq!(
        *cam.projection(),
        Mat4::perspective_rh_gl(90f32.to_radians(), 2.0, 0.1, 100.0)
    );
}

#[test]
fn test_set_fov_rebuilds_projection() {
    let mut cam = camera();
    let before = *cam.projection();
    cam.set_fov_y_degrees(45.0);
    assert_eq!(cam.fov_y_degrees(), 45.0);
    assert_ne!(*cam.projection(), before);
}

// ============================================================================
// World matrices
// ============================================================================

#[test]
fn test_update_matrix_world_from_pose() {
    let mut cam = camera();
    cam.set_position(Vec3::new(1.0, 2.0, 3.0));
    cam.set_orientation(Quat::from_rotation_y(0.5));
    cam.update_matrix_world();

    let expected = Mat4::from_rotation_translation(Quat::from_rotation_y(0.5), Vec3::new(1.0, 2.0, 3.0));
    assert!(approx_eq_mat4(cam.world(), &expected, 1e-6));
    assert!(approx_eq_mat4(&(*cam.world() * *cam.world_inverse()), &Mat4::IDENTITY, 1e-5));
}

#[test]
fn test_update_matrix_world_respects_auto_update_flag() {
    let mut cam = camera();
    cam.set_matrix_auto_update(false);
    cam.set_position(Vec3::new(5.0, 0.0, 0.0));
    cam.update_matrix_world();
    assert_eq!(*cam.world(), Mat4::IDENTITY);
}

#[test]
fn test_set_world_derives_inverse() {
    let mut cam = camera();
    let world = Mat4::from_translation(Vec3::new(0.0, 0.0, 4.0));
    cam.set_world(world).unwrap();
    assert_eq!(*cam.world(), world);
    assert!(approx_eq_mat4(cam.world_inverse(), &Mat4::from_translation(Vec3::new(0.0, 0.0, -4.0)), 1e-6));
}

#[test]
fn test_set_world_singular_leaves_camera_untouched() {
    let mut cam = camera();
    let result = cam.set_world(Mat4::from_scale(Vec3::new(0.0, 1.0, 1.0)));
    assert!(matches!(result, Err(Error::SingularMatrix)));
    assert_eq!(*cam.world(), Mat4::IDENTITY);
}

#[test]
fn test_look_at() {
    let mut cam = camera();
    cam.set_position(Vec3::new(0.0, 0.0, 5.0));
    cam.look_at(Vec3::new(5.0, 0.0, 5.0), Vec3::Y);
    cam.update_matrix_world();

    // The camera looks down its local -Z
    let forward = cam.world().transform_vector3(Vec3::NEG_Z);
    assert!((forward - Vec3::X).length() < 1e-5);
}

#[test]
fn test_frustum_follows_camera() {
    let mut cam = camera();
    assert!(cam.frustum().contains_point(Vec3::new(0.0, 0.0, -5.0)));

    cam.set_orientation(Quat::from_rotation_y(std::f32::consts::PI));
    cam.update_matrix_world();
    assert!(!cam.frustum().contains_point(Vec3::new(0.0, 0.0, -5.0)));
    assert!(cam.frustum().contains_point(Vec3::new(0.0, 0.0, 5.0)));
}

// ============================================================================
// CameraSnapshot
// ============================================================================

#[test]
fn test_snapshot_restores_bit_identical_state() {
    let mut cam = camera();
    cam.set_position(Vec3::new(0.3, -1.7, 2.9));
    cam.set_orientation(Quat::from_euler(glam::EulerRot::YXZ, 0.3, -0.2, 0.1));
    cam.update_matrix_world();
    let snapshot = CameraSnapshot::capture(&cam);

    cam.set_matrix_auto_update(false);
    cam.set_world(Mat4::from_translation(Vec3::splat(9.0))).unwrap();
    cam.set_projection(Mat4::IDENTITY);
    assert!(!snapshot.matches(&cam));

    snapshot.restore(&mut cam);
    assert!(snapshot.matches(&cam));
    assert_eq!(cam.world().to_cols_array(), snapshot.world.to_cols_array());
    assert_eq!(cam.world_inverse().to_cols_array(), snapshot.world_inverse.to_cols_array());
    assert_eq!(cam.projection().to_cols_array(), snapshot.projection.to_cols_array());
    assert!(cam.matrix_auto_update());
}

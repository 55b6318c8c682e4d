use std::cell::RefCell;
use std::rc::Rc;
use glam::{Quat, Vec3};
use winit::dpi::LogicalSize;
use super::*;
use crate::events::{OrientationEvent, PositionEvent};

fn setup() -> (Notifications, CameraManager) {
    let notifications = Notifications::new();
    let camera = Rc::new(RefCell::new(Camera::perspective(75.0, 1.0, 0.1, 100.0)));
    let manager = CameraManager::new(camera, &notifications);
    (notifications, manager)
}

#[test]
fn test_resize_sets_aspect() {
    let (notifications, manager) = setup();
    notifications.resize.publish(&LogicalSize::new(800, 400));
    assert_eq!(manager.camera().borrow().aspect(), 2.0);
}

#[test]
fn test_zero_height_resize_is_ignored() {
    let (notifications, manager) = setup();
    notifications.resize.publish(&LogicalSize::new(800, 0));
    assert_eq!(manager.camera().borrow().aspect(), 1.0);
}

#[test]
fn test_orientation_and_position_update_pose() {
    let (notifications, manager) = setup();
    let q = Quat::from_rotation_y(0.25);
    notifications.orientation.publish(&OrientationEvent { orientation: q });
    notifications.position.publish(&PositionEvent { position: Vec3::new(1.0, 2.0, 3.0) });

    let camera = manager.camera();
    let camera = camera.borrow();
    assert!(camera.orientation().abs_diff_eq(q, 1e-6));
    assert_eq!(camera.position(), Vec3::new(1.0, 2.0, 3.0));
}

#[test]
fn test_detach_on_drop() {
    let (notifications, manager) = setup();
    assert_eq!(notifications.resize.subscriber_count(), 1);
    drop(manager);
    assert_eq!(notifications.resize.subscriber_count(), 0);
    assert_eq!(notifications.orientation.subscriber_count(), 0);
    assert_eq!(notifications.position.subscriber_count(), 0);
}

#[test]
fn test_busy_camera_drops_notification() {
    let (notifications, manager) = setup();
    let camera = manager.camera();
    let _guard = camera.borrow_mut();
    // Must not panic
    assert_eq!(notifications.resize.publish(&LogicalSize::new(10, 5)), 1);
}

/// CameraManager — keeps a shared camera in sync with host notifications.
///
/// Resize updates the aspect ratio, orientation and position events update
/// the pose. The world matrix itself is recomputed by the renderer at the
/// start of each frame.

use std::cell::RefCell;
use std::rc::Rc;
use crate::engine_warn;
use crate::events::{Notifications, Signal, SubscriptionId};
use super::camera::Camera;

pub struct CameraManager {
    camera: Rc<RefCell<Camera>>,
    notifications: Notifications,
    subscriptions: Option<[SubscriptionId; 3]>,
}

/// Subscribe `apply` to `signal`, applying it to the camera if it is not
/// already borrowed.
fn forward<T: 'static>(
    signal: &Signal<T>,
    camera: &Rc<RefCell<Camera>>,
    mut apply: impl FnMut(&mut Camera, &T) + 'static,
) -> SubscriptionId {
    let camera = Rc::clone(camera);
    signal.subscribe(move |event| match camera.try_borrow_mut() {
        Ok(mut camera) => apply(&mut camera, event),
        Err(_) => engine_warn!("portal3d::CameraManager", "Camera busy, notification dropped"),
    })
}

impl CameraManager {
    /// Wire `camera` to the resize, orientation and position signals.
    pub fn new(camera: Rc<RefCell<Camera>>, notifications: &Notifications) -> Self {
        let subscriptions = [
            forward(&notifications.resize, &camera, |camera, size| {
                if size.width > 0 && size.height > 0 {
                    camera.set_aspect(size.width as f32 / size.height as f32);
                }
            }),
            forward(&notifications.orientation, &camera, |camera, event| {
                camera.set_orientation(event.orientation);
            }),
            forward(&notifications.position, &camera, |camera, event| {
                camera.set_position(event.position);
            }),
        ];

        Self {
            camera,
            notifications: notifications.clone(),
            subscriptions: Some(subscriptions),
        }
    }

    /// Shared handle to the managed camera
    pub fn camera(&self) -> Rc<RefCell<Camera>> {
        Rc::clone(&self.camera)
    }

    /// Stop listening. Called automatically on drop.
    pub fn detach(&mut self) {
        if let Some([resize, orientation, position]) = self.subscriptions.take() {
            self.notifications.resize.unsubscribe(resize);
            self.notifications.orientation.unsubscribe(orientation);
            self.notifications.position.unsubscribe(position);
        }
    }
}

impl Drop for CameraManager {
    fn drop(&mut self) {
        self.detach();
    }
}

#[cfg(test)]
#[path = "camera_manager_tests.rs"]
mod tests;

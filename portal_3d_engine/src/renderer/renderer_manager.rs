/// RendererManager — drives a PortalRenderer from host notifications.
///
/// Resize events resize the render target (never draw). Frame ticks render
/// the current scene with the shared camera and keep the outcome of the
/// last frame for inspection.

use std::cell::RefCell;
use std::rc::Rc;
use crate::camera::Camera;
use crate::error::Error;
use crate::events::{Notifications, SubscriptionId};
use crate::graphics_device::GraphicsDevice;
use crate::scene::WorldRegistry;
use crate::{engine_error, engine_warn};
use super::portal_renderer::PortalRenderer;
use super::renderer_config::FrameStatus;

/// Everything a frame reads, shared with the rest of the host.
#[derive(Clone)]
pub struct FrameInputs {
    pub registry: Rc<RefCell<WorldRegistry>>,
    pub camera: Rc<RefCell<Camera>>,
    pub current_scene: Rc<RefCell<String>>,
}

impl FrameInputs {
    pub fn new(registry: WorldRegistry, camera: Camera, current_scene: &str) -> Self {
        Self {
            registry: Rc::new(RefCell::new(registry)),
            camera: Rc::new(RefCell::new(camera)),
            current_scene: Rc::new(RefCell::new(current_scene.to_string())),
        }
    }

    /// Switch the scene rendered by the next frame.
    pub fn set_current_scene(&self, name: &str) {
        *self.current_scene.borrow_mut() = name.to_string();
    }
}

#[derive(Default)]
struct FrameOutcome {
    frames: u64,
    last_status: Option<FrameStatus>,
    last_error: Option<Error>,
}

pub struct RendererManager<D: GraphicsDevice + 'static> {
    renderer: Rc<RefCell<PortalRenderer<D>>>,
    inputs: FrameInputs,
    outcome: Rc<RefCell<FrameOutcome>>,
    notifications: Notifications,
    subscriptions: Option<[SubscriptionId; 2]>,
}

fn render_frame<D: GraphicsDevice>(
    renderer: &RefCell<PortalRenderer<D>>,
    inputs: &FrameInputs,
    outcome: &RefCell<FrameOutcome>,
) {
    let (Ok(mut renderer), Ok(registry), Ok(mut camera), Ok(scene)) = (
        renderer.try_borrow_mut(),
        inputs.registry.try_borrow(),
        inputs.camera.try_borrow_mut(),
        inputs.current_scene.try_borrow(),
    ) else {
        engine_warn!("portal3d::RendererManager", "Frame inputs busy, frame dropped");
        return;
    };

    let result = renderer.render(&registry, &scene, &mut camera);
    let mut outcome = outcome.borrow_mut();
    outcome.frames += 1;
    match result {
        Ok(status) => {
            outcome.last_status = Some(status);
            outcome.last_error = None;
        }
        Err(e) => {
            engine_error!("portal3d::RendererManager", "Frame failed: {}", e);
            outcome.last_status = None;
            outcome.last_error = Some(e);
        }
    }
}

impl<D: GraphicsDevice + 'static> RendererManager<D> {
    /// Subscribe `renderer` to the resize and frame-tick signals.
    pub fn new(
        renderer: PortalRenderer<D>,
        inputs: FrameInputs,
        notifications: &Notifications,
    ) -> Self {
        let renderer = Rc::new(RefCell::new(renderer));
        let outcome = Rc::new(RefCell::new(FrameOutcome::default()));

        let on_resize = {
            let renderer = Rc::clone(&renderer);
            notifications.resize.subscribe(move |size| match renderer.try_borrow_mut() {
                Ok(mut renderer) => {
                    if let Err(e) = renderer.set_size(size.width, size.height) {
                        engine_error!("portal3d::RendererManager", "Resize failed: {}", e);
                    }
                }
                Err(_) => engine_warn!("portal3d::RendererManager", "Renderer busy, resize dropped"),
            })
        };

        let on_tick = {
            let renderer = Rc::clone(&renderer);
            let inputs = inputs.clone();
            let outcome = Rc::clone(&outcome);
            notifications.frame_tick.subscribe(move |_| render_frame(&renderer, &inputs, &outcome))
        };

        Self {
            renderer,
            inputs,
            outcome,
            notifications: notifications.clone(),
            subscriptions: Some([on_resize, on_tick]),
        }
    }

    pub fn renderer(&self) -> Rc<RefCell<PortalRenderer<D>>> {
        Rc::clone(&self.renderer)
    }

    pub fn inputs(&self) -> &FrameInputs {
        &self.inputs
    }

    /// Render one frame immediately, outside of the frame-tick signal.
    pub fn render_now(&self) {
        render_frame(&self.renderer, &self.inputs, &self.outcome);
    }

    /// Frames attempted so far
    pub fn frame_count(&self) -> u64 {
        self.outcome.borrow().frames
    }

    /// Status of the last successful frame (`None` after a failure)
    pub fn last_status(&self) -> Option<FrameStatus> {
        self.outcome.borrow().last_status
    }

    /// Take the error of the last frame, if it failed.
    pub fn take_last_error(&self) -> Option<Error> {
        self.outcome.borrow_mut().last_error.take()
    }

    /// Stop listening. Called automatically on drop.
    pub fn detach(&mut self) {
        if let Some([resize, tick]) = self.subscriptions.take() {
            self.notifications.resize.unsubscribe(resize);
            self.notifications.frame_tick.unsubscribe(tick);
        }
    }
}

impl<D: GraphicsDevice + 'static> Drop for RendererManager<D> {
    fn drop(&mut self) {
        self.detach();
    }
}

#[cfg(test)]
#[path = "renderer_manager_tests.rs"]
mod tests;

/// Portal view composer — renders one portal's destination into its
/// silhouette.
///
/// Per portal: mask the silhouette, move the camera to the virtual viewpoint
/// behind the destination portal, skew its near plane onto the destination
/// plane, draw the destination scene where the stencil matches, then clear
/// the stencil and put the camera back.

use glam::Mat4;
use crate::camera::{Camera, CameraSnapshot};
use crate::error::{Error, Result};
use crate::graphics_device::{GraphicsDevice, ClearFlags, CompareOp, StencilOp};
use crate::math::{compose_all, try_invert};
use crate::scene::{DrawItem, Scene};
use crate::engine_trace;
use super::oblique_projection::oblique_projection;
use super::portal_surface::PortalSurface;
use super::stencil_mask::{draw_stencil_mask, STENCIL_MASK_ALL};

/// Where the composer is in its per-portal sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortalViewStage {
    Idle,
    /// Silhouette written to the stencil buffer
    Masking,
    /// Camera moved to the virtual viewpoint, projection skewed
    ViewComputed,
    /// Destination scene drawn inside the silhouette
    Rendered,
    /// Stencil cleared and camera restored
    Restored,
}

/// Callback receiving `(source portal name, stage)` as the composer advances.
pub type StageObserver = Box<dyn FnMut(&str, PortalViewStage)>;

/// Camera matrices of the virtual viewpoint seen through `source`.
///
/// Returns `(world, world_inverse)` where
/// `world_inverse = camera_world_inverse * source * inverse(destination)`.
///
/// # Errors
///
/// Returns `Error::SingularMatrix` if `destination` or the composite cannot
/// be inverted.
pub fn portal_view_matrices(
    camera_world_inverse: &Mat4,
    source: &Mat4,
    destination: &Mat4,
) -> Result<(Mat4, Mat4)> {
    let destination_inverse = try_invert(destination)?;
    let world_inverse = compose_all(&[*camera_world_inverse, *source, destination_inverse]);
    let world = try_invert(&world_inverse)?;
    Ok((world, world_inverse))
}

pub struct PortalViewComposer {
    reference: u8,
    stage: PortalViewStage,
    observer: Option<StageObserver>,
}

impl PortalViewComposer {
    /// # Arguments
    ///
    /// * `reference` - Stencil value marking the silhouette
    pub fn new(reference: u8) -> Self {
        Self {
            reference,
            stage: PortalViewStage::Idle,
            observer: None,
        }
    }

    pub fn reference(&self) -> u8 {
        self.reference
    }

    /// Last stage reached
    pub fn stage(&self) -> PortalViewStage {
        self.stage
    }

    pub fn set_stage_observer(&mut self, observer: Option<StageObserver>) {
        self.observer = observer;
    }

    fn advance(&mut self, portal: &str, stage: PortalViewStage) {
        self.stage = stage;
        if let Some(observer) = self.observer.as_mut() {
            observer(portal, stage);
        }
    }

    /// Render the view through `source` into its silhouette.
    ///
    /// `shape` is the source shape in world space; the destination is the
    /// pair returned by `WorldRegistry::resolve`. The camera always ends up
    /// equal to `snapshot`, including when a device call fails.
    ///
    /// # Errors
    ///
    /// `Error::SingularMatrix` if the view cannot be computed and
    /// `Error::DegenerateProjection` if it is not finite (the camera lies on
    /// the destination plane); nothing has been drawn in either case.
    /// Device errors are returned after cleanup.
    pub fn compose<D: GraphicsDevice + ?Sized>(
        &mut self,
        device: &mut D,
        camera: &mut Camera,
        snapshot: &CameraSnapshot,
        source: &PortalSurface,
        shape: &[DrawItem],
        (destination_scene, destination): (&Scene, &PortalSurface),
    ) -> Result<()> {
        self.stage = PortalViewStage::Idle;
        let (world, world_inverse) = portal_view_matrices(
            &snapshot.world_inverse,
            source.matrix(),
            destination.matrix(),
        )?;
        let projection = oblique_projection(destination.matrix(), &world_inverse, &snapshot.projection);
        if !(world.is_finite() && world_inverse.is_finite() && projection.is_finite()) {
            return Err(Error::DegenerateProjection);
        }

        let result = self.render_view(
            device,
            camera,
            source.name(),
            shape,
            (world, world_inverse, projection),
            destination_scene,
        );

        let cleared = device.clear(ClearFlags::STENCIL);
        snapshot.restore(camera);
        self.advance(source.name(), PortalViewStage::Restored);

        engine_trace!("portal3d::PortalViewComposer",
            "Portal '{}' -> '{}' composed", source.name(), destination_scene.name());
        result.and(cleared)
    }

    fn render_view<D: GraphicsDevice + ?Sized>(
        &mut self,
        device: &mut D,
        camera: &mut Camera,
        portal: &str,
        shape: &[DrawItem],
        (world, world_inverse, projection): (Mat4, Mat4, Mat4),
        destination_scene: &Scene,
    ) -> Result<()> {
        draw_stencil_mask(device, shape, camera, self.reference)?;
        self.advance(portal, PortalViewStage::Masking);

        device.set_color_write(true)?;
        device.set_depth_write(true)?;
        device.set_stencil_func(CompareOp::Equal, self.reference, STENCIL_MASK_ALL)?;
        device.set_stencil_op(StencilOp::Keep, StencilOp::Keep, StencilOp::Keep)?;

        camera.set_matrix_auto_update(false);
        camera.set_world_matrices(world, world_inverse);
        camera.set_projection(projection);
        self.advance(portal, PortalViewStage::ViewComputed);

        device.draw(destination_scene.content().items(), camera.world_inverse(), camera.projection())?;
        self.advance(portal, PortalViewStage::Rendered);
        Ok(())
    }
}

#[cfg(test)]
#[path = "portal_view_tests.rs"]
mod tests;

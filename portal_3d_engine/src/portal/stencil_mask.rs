/// Stencil mask pass: write a portal's silhouette into the stencil buffer.
///
/// Color and depth are left untouched. Every fragment of the shape fails the
/// stencil test (`Never`) and the fail operation replaces the stored value
/// with the reference, so after the pass the stencil holds `reference`
/// exactly where the shape covers the screen.

use crate::camera::Camera;
use crate::error::Result;
use crate::graphics_device::{GraphicsDevice, CompareOp, StencilOp};
use crate::scene::DrawItem;

/// Read/compare mask used by every portal stencil operation.
pub const STENCIL_MASK_ALL: u8 = 0xFF;

/// Draw `shape` (world space) into the stencil buffer only.
///
/// Leaves color and depth writes disabled; the caller re-enables them.
/// The stencil test must already be enabled.
pub fn draw_stencil_mask<D: GraphicsDevice + ?Sized>(
    device: &mut D,
    shape: &[DrawItem],
    camera: &Camera,
    reference: u8,
) -> Result<()> {
    device.set_color_write(false)?;
    device.set_depth_write(false)?;

    device.set_stencil_func(CompareOp::Never, reference, STENCIL_MASK_ALL)?;
    device.set_stencil_op(StencilOp::Replace, StencilOp::Keep, StencilOp::Keep)?;

    device.draw(shape, camera.world_inverse(), camera.projection())
}

#[cfg(test)]
#[path = "stencil_mask_tests.rs"]
mod tests;

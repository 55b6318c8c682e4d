/// SoftwareDevice — CPU implementation of `GraphicsDevice`.
///
/// Per-fragment order follows GL: stencil test, then depth test
/// (`LessOrEqual`, always on), then the stencil operation selected by the
/// outcome, then depth and color writes if their masks allow it. Clears honor
/// the color, depth and stencil write masks.

use glam::{Mat4, Vec4};
use portal_3d_engine::portal3d::{Error, Result};
use portal_3d_engine::portal3d::device::{
    GraphicsDevice, ClearFlags, CompareOp, StencilOp, StencilState,
};
use portal_3d_engine::portal3d::scene::DrawItem;
use portal_3d_engine::{engine_bail, engine_debug};
use crate::software_frame_buffer::{SoftwareFrameBuffer, Rgba8, to_rgba8};
use crate::software_rasterizer::Rasterizer;

/// Initial target configuration
#[derive(Debug, Clone)]
pub struct SoftwareDeviceConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for SoftwareDeviceConfig {
    fn default() -> Self {
        Self { width: 640, height: 480 }
    }
}

pub struct SoftwareDevice {
    frame_buffer: SoftwareFrameBuffer,
    rasterizer: Rasterizer,
    clear_color: Rgba8,
    color_write: bool,
    depth_write: bool,
    stencil: StencilState,
}

impl SoftwareDevice {
    /// # Errors
    ///
    /// Returns an error if either dimension is zero.
    pub fn new(config: SoftwareDeviceConfig) -> Result<Self> {
        if config.width == 0 || config.height == 0 {
            return Err(Error::InitializationFailed(format!(
                "Invalid software target size {}x{}", config.width, config.height)));
        }
        Ok(Self {
            frame_buffer: SoftwareFrameBuffer::new(config.width, config.height),
            rasterizer: Rasterizer::new(),
            clear_color: [0, 0, 0, 255],
            color_write: true,
            depth_write: true,
            stencil: StencilState::default(),
        })
    }

    pub fn frame_buffer(&self) -> &SoftwareFrameBuffer {
        &self.frame_buffer
    }

    pub fn stencil_state(&self) -> &StencilState {
        &self.stencil
    }

    pub fn color_write(&self) -> bool {
        self.color_write
    }

    pub fn depth_write(&self) -> bool {
        self.depth_write
    }

    /// Update the stored stencil value through the write mask.
    #[inline]
    fn write_stencil(stored: &mut u8, op: StencilOp, state: &StencilState) {
        let updated = op.apply(*stored, state.reference);
        *stored = (*stored & !state.write_mask) | (updated & state.write_mask);
    }

    fn draw_item(&mut self, item: &DrawItem, view_projection: &Mat4) {
        let mvp = *view_projection * item.model;
        let color = to_rgba8(item.mesh.color());
        let (width, height) = (self.frame_buffer.width(), self.frame_buffer.height());
        let state = self.stencil;
        let (color_write, depth_write) = (self.color_write, self.depth_write);
        let frame_buffer = &mut self.frame_buffer;

        let mut fragment = |x: u32, y: u32, depth: f32| {
            let Some(index) = frame_buffer.index(x, y) else {
                return;
            };

            let stencil = frame_buffer.stencil_mut(index);
            if state.test_enabled {
                let passed = state.compare_op.passes(
                    state.reference & state.compare_mask,
                    *stencil & state.compare_mask,
                );
                if !passed {
                    Self::write_stencil(stencil, state.fail_op, &state);
                    return;
                }
            }

            let stored_depth = frame_buffer.depth_mut(index);
            if depth > *stored_depth {
                if state.test_enabled {
                    Self::write_stencil(frame_buffer.stencil_mut(index), state.depth_fail_op, &state);
                }
                return;
            }
            if depth_write {
                *stored_depth = depth;
            }
            if state.test_enabled {
                Self::write_stencil(frame_buffer.stencil_mut(index), state.pass_op, &state);
            }
            if color_write {
                *frame_buffer.color_mut(index) = color;
            }
        };

        for triangle in item.mesh.triangles() {
            let clip = triangle.map(|p| mvp * Vec4::new(p.x, p.y, p.z, 1.0));
            self.rasterizer.draw_triangle(clip, width, height, &mut fragment);
        }
    }
}

impl GraphicsDevice for SoftwareDevice {
    fn size(&self) -> (u32, u32) {
        (self.frame_buffer.width(), self.frame_buffer.height())
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        if width == 0 || height == 0 {
            engine_bail!("portal3d::software", "Cannot resize to {}x{}", width, height);
        }
        self.frame_buffer.resize(width, height);
        engine_debug!("portal3d::software", "Target resized to {}x{}", width, height);
        Ok(())
    }

    fn set_clear_color(&mut self, color: [f32; 4]) -> Result<()> {
        self.clear_color = to_rgba8(color);
        Ok(())
    }

    fn clear(&mut self, flags: ClearFlags) -> Result<()> {
        if flags.contains(ClearFlags::COLOR) && self.color_write {
            self.frame_buffer.fill_color(self.clear_color);
        }
        if flags.contains(ClearFlags::DEPTH) && self.depth_write {
            self.frame_buffer.fill_depth(1.0);
        }
        if flags.contains(ClearFlags::STENCIL) {
            self.frame_buffer.clear_stencil(self.stencil.write_mask);
        }
        Ok(())
    }

    fn set_color_write(&mut self, enabled: bool) -> Result<()> {
        self.color_write = enabled;
        Ok(())
    }

    fn set_depth_write(&mut self, enabled: bool) -> Result<()> {
        self.depth_write = enabled;
        Ok(())
    }

    fn set_stencil_test(&mut self, enabled: bool) -> Result<()> {
        self.stencil.test_enabled = enabled;
        Ok(())
    }

    fn set_stencil_write_mask(&mut self, mask: u8) -> Result<()> {
        self.stencil.write_mask = mask;
        Ok(())
    }

    fn set_stencil_func(&mut self, compare_op: CompareOp, reference: u8, mask: u8) -> Result<()> {
        self.stencil.compare_op = compare_op;
        self.stencil.reference = reference;
        self.stencil.compare_mask = mask;
        Ok(())
    }

    fn set_stencil_op(&mut self, fail: StencilOp, depth_fail: StencilOp, pass: StencilOp) -> Result<()> {
        self.stencil.fail_op = fail;
        self.stencil.depth_fail_op = depth_fail;
        self.stencil.pass_op = pass;
        Ok(())
    }

    fn draw(&mut self, items: &[DrawItem], view: &Mat4, projection: &Mat4) -> Result<()> {
        let view_projection = *projection * *view;
        if !view_projection.is_finite() {
            engine_bail!("portal3d::software", "Non-finite view/projection matrix");
        }
        for item in items {
            self.draw_item(item, &view_projection);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "software_device_tests.rs"]
mod tests;

/// Mock GraphicsDevice for unit tests (no rasterizer required)
///
/// Records every call as a `DeviceCommand` so tests can assert on the exact
/// sequence the portal pipeline issues. A draw can be made to fail to
/// exercise error paths.

use glam::Mat4;
use crate::error::Result;
use crate::engine_bail;
use crate::scene::DrawItem;
use super::{GraphicsDevice, ClearFlags, CompareOp, StencilOp};

// ============================================================================
// Recorded commands
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum DeviceCommand {
    Resize(u32, u32),
    SetClearColor([f32; 4]),
    Clear(ClearFlags),
    ColorWrite(bool),
    DepthWrite(bool),
    StencilTest(bool),
    StencilWriteMask(u8),
    StencilFunc(CompareOp, u8, u8),
    StencilOps(StencilOp, StencilOp, StencilOp),
    Draw {
        meshes: Vec<String>,
        view: Mat4,
        projection: Mat4,
    },
}

impl DeviceCommand {
    pub fn is_draw(&self) -> bool {
        matches!(self, DeviceCommand::Draw { .. })
    }
}

// ============================================================================
// Mock device
// ============================================================================

pub struct MockGraphicsDevice {
    pub width: u32,
    pub height: u32,
    pub commands: Vec<DeviceCommand>,
    /// Zero-based index of the draw call that should fail, if any
    pub fail_on_draw: Option<usize>,
    draws: usize,
}

impl MockGraphicsDevice {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
            fail_on_draw: None,
            draws: 0,
        }
    }

    /// All draw commands, in order
    pub fn draws(&self) -> Vec<&DeviceCommand> {
        self.commands.iter().filter(|c| c.is_draw()).collect()
    }

    /// Mesh names of the n-th draw call
    pub fn draw_meshes(&self, n: usize) -> Vec<String> {
        match self.draws().get(n) {
            Some(DeviceCommand::Draw { meshes, .. }) => meshes.clone(),
            _ => Vec::new(),
        }
    }

    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }
}

impl GraphicsDevice for MockGraphicsDevice {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        self.width = width;
        self.height = height;
        self.commands.push(DeviceCommand::Resize(width, height));
        Ok(())
    }

    fn set_clear_color(&mut self, color: [f32; 4]) -> Result<()> {
        self.commands.push(DeviceCommand::SetClearColor(color));
        Ok(())
    }

    fn clear(&mut self, flags: ClearFlags) -> Result<()> {
        self.commands.push(DeviceCommand::Clear(flags));
        Ok(())
    }

    fn set_color_write(&mut self, enabled: bool) -> Result<()> {
        self.commands.push(DeviceCommand::ColorWrite(enabled));
        Ok(())
    }

    fn set_depth_write(&mut self, enabled: bool) -> Result<()> {
        self.commands.push(DeviceCommand::DepthWrite(enabled));
        Ok(())
    }

    fn set_stencil_test(&mut self, enabled: bool) -> Result<()> {
        self.commands.push(DeviceCommand::StencilTest(enabled));
        Ok(())
    }

    fn set_stencil_write_mask(&mut self, mask: u8) -> Result<()> {
        self.commands.push(DeviceCommand::StencilWriteMask(mask));
        Ok(())
    }

    fn set_stencil_func(&mut self, compare_op: CompareOp, reference: u8, mask: u8) -> Result<()> {
        self.commands.push(DeviceCommand::StencilFunc(compare_op, reference, mask));
        Ok(())
    }

    fn set_stencil_op(&mut self, fail: StencilOp, depth_fail: StencilOp, pass: StencilOp) -> Result<()> {
        self.commands.push(DeviceCommand::StencilOps(fail, depth_fail, pass));
        Ok(())
    }

    fn draw(&mut self, items: &[DrawItem], view: &Mat4, projection: &Mat4) -> Result<()> {
        let index = self.draws;
        self.draws += 1;
        if self.fail_on_draw == Some(index) {
            engine_bail!("portal3d::mock", "draw #{} failed (injected)", index);
        }
        self.commands.push(DeviceCommand::Draw {
            meshes: items.iter().map(|item| item.mesh.name().to_string()).collect(),
            view: *view,
            projection: *projection,
        });
        Ok(())
    }
}

/// GraphicsDevice trait - the render target seam
///
/// Everything the portal pipeline needs from a backend: buffer clears,
/// write masks, the stencil function/operation state and a draw call taking
/// explicit view and projection matrices. Depth testing is always on with a
/// `LessOrEqual` comparison; faces are never culled.

use bitflags::bitflags;
use glam::Mat4;
use crate::error::Result;
use crate::scene::DrawItem;

// ===== CLEAR FLAGS =====

bitflags! {
    /// Buffers affected by `GraphicsDevice::clear`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ClearFlags: u32 {
        /// Color buffer (to the device clear color)
        const COLOR = 1 << 0;
        /// Depth buffer (to 1.0)
        const DEPTH = 1 << 1;
        /// Stencil buffer (to 0)
        const STENCIL = 1 << 2;
    }
}

// ===== STENCIL ENUMS =====

/// Comparison operator for the stencil test
///
/// The test compares `reference & mask` against `stored & mask`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// Never pass
    Never,
    /// Pass if reference < stored
    Less,
    /// Pass if reference == stored
    Equal,
    /// Pass if reference <= stored
    LessOrEqual,
    /// Pass if reference > stored
    Greater,
    /// Pass if reference != stored
    NotEqual,
    /// Pass if reference >= stored
    GreaterOrEqual,
    /// Always pass
    Always,
}

impl CompareOp {
    /// Evaluate the comparison on already-masked values.
    pub fn passes(&self, reference: u8, stored: u8) -> bool {
        match self {
            CompareOp::Never => false,
            CompareOp::Less => reference < stored,
            CompareOp::Equal => reference == stored,
            CompareOp::LessOrEqual => reference <= stored,
            CompareOp::Greater => reference > stored,
            CompareOp::NotEqual => reference != stored,
            CompareOp::GreaterOrEqual => reference >= stored,
            CompareOp::Always => true,
        }
    }
}

/// Stencil operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StencilOp {
    /// Keep current value
    Keep,
    /// Set to zero
    Zero,
    /// Replace with reference value
    Replace,
    /// Increment and clamp to max
    IncrementAndClamp,
    /// Decrement and clamp to zero
    DecrementAndClamp,
    /// Bitwise invert
    Invert,
    /// Increment and wrap around
    IncrementAndWrap,
    /// Decrement and wrap around
    DecrementAndWrap,
}

impl StencilOp {
    /// New stored value, before the write mask is applied.
    pub fn apply(&self, stored: u8, reference: u8) -> u8 {
        match self {
            StencilOp::Keep => stored,
            StencilOp::Zero => 0,
            StencilOp::Replace => reference,
            StencilOp::IncrementAndClamp => stored.saturating_add(1),
            StencilOp::DecrementAndClamp => stored.saturating_sub(1),
            StencilOp::Invert => !stored,
            StencilOp::IncrementAndWrap => stored.wrapping_add(1),
            StencilOp::DecrementAndWrap => stored.wrapping_sub(1),
        }
    }
}

/// Stencil function and operations, as last set on a device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StencilState {
    /// Stencil test enabled
    pub test_enabled: bool,
    /// Comparison operator
    pub compare_op: CompareOp,
    /// Reference value for compare/replace
    pub reference: u8,
    /// Bits of stencil buffer read for compare
    pub compare_mask: u8,
    /// Bits of stencil buffer written
    pub write_mask: u8,
    /// Action on stencil test fail
    pub fail_op: StencilOp,
    /// Action on stencil pass + depth fail
    pub depth_fail_op: StencilOp,
    /// Action on stencil pass + depth pass
    pub pass_op: StencilOp,
}

impl Default for StencilState {
    fn default() -> Self {
        Self {
            test_enabled: false,
            compare_op: CompareOp::Always,
            reference: 0,
            compare_mask: 0xFF,
            write_mask: 0xFF,
            fail_op: StencilOp::Keep,
            depth_fail_op: StencilOp::Keep,
            pass_op: StencilOp::Keep,
        }
    }
}

// ===== GRAPHICS DEVICE TRAIT =====

/// Render target seam implemented by every backend
///
/// State set through this trait persists until changed. Every toggle a
/// render pass makes is undone by that pass (or by the frame orchestrator)
/// before the next independent draw.
pub trait GraphicsDevice {
    /// Drawable size in device pixels
    fn size(&self) -> (u32, u32);

    /// Resize the drawable. Contents become undefined; nothing is drawn.
    fn resize(&mut self, width: u32, height: u32) -> Result<()>;

    /// Color used by `clear(ClearFlags::COLOR)`
    fn set_clear_color(&mut self, color: [f32; 4]) -> Result<()>;

    /// Clear the selected buffers
    ///
    /// Color and stencil clears honor the current write masks.
    fn clear(&mut self, flags: ClearFlags) -> Result<()>;

    /// Enable or disable color writes
    fn set_color_write(&mut self, enabled: bool) -> Result<()>;

    /// Enable or disable depth writes (the depth test stays on)
    fn set_depth_write(&mut self, enabled: bool) -> Result<()>;

    /// Enable or disable the stencil test
    fn set_stencil_test(&mut self, enabled: bool) -> Result<()>;

    /// Bits of the stencil buffer that writes and clears may change
    fn set_stencil_write_mask(&mut self, mask: u8) -> Result<()>;

    /// Stencil comparison, reference value and read mask
    fn set_stencil_func(&mut self, compare_op: CompareOp, reference: u8, mask: u8) -> Result<()>;

    /// Stencil operations for (stencil fail, depth fail, both pass)
    fn set_stencil_op(&mut self, fail: StencilOp, depth_fail: StencilOp, pass: StencilOp) -> Result<()>;

    /// Draw a batch of mesh instances
    ///
    /// # Arguments
    ///
    /// * `items` - Meshes with their model matrices
    /// * `view` - World-to-view matrix (camera world inverse)
    /// * `projection` - View-to-clip matrix (OpenGL clip convention)
    fn draw(&mut self, items: &[DrawItem], view: &Mat4, projection: &Mat4) -> Result<()>;
}

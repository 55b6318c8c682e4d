/// Renderer configuration and per-frame results.

/// Portal renderer configuration
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Device pixels per logical pixel applied by `set_size`
    pub pixel_ratio: f32,
    /// Color the frame is cleared to
    pub clear_color: [f32; 4],
    /// Stencil value marking a portal silhouette (non-zero)
    pub stencil_reference: u8,
    /// Skip the mask and view passes of portals whose bounds are entirely
    /// outside the camera frustum
    pub cull_offscreen_portals: bool,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            pixel_ratio: 1.0,
            clear_color: [0.0, 0.0, 0.0, 1.0],
            stencil_reference: 1,
            cull_offscreen_portals: true,
        }
    }
}

impl RendererConfig {
    /// Device size for a logical size: `round(logical * pixel_ratio)`,
    /// never below 1.
    pub fn physical_size(&self, width: u32, height: u32) -> (u32, u32) {
        let scale = |v: u32| ((v as f32 * self.pixel_ratio).round() as u32).max(1);
        (scale(width), scale(height))
    }
}

/// Renderer statistics for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Portals in the current scene
    pub portals_in_scene: u32,
    /// Portals whose destination was drawn into their silhouette
    pub portals_rendered: u32,
    /// Portals without a resolvable destination (drawn opaque)
    pub portals_unresolved: u32,
    /// Resolved portals skipped because they were off-screen
    pub portals_culled: u32,
    /// Resolved portals skipped because their transform is singular
    pub portals_singular: u32,
    /// Resolved portals skipped because their view is not finite
    pub portals_degenerate: u32,
    /// Number of draw calls this frame
    pub draw_calls: u32,
}

/// Outcome of `PortalRenderer::render`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    /// No device yet; nothing was drawn
    NotReady,
    /// A frame was produced
    Rendered(FrameStats),
}

impl FrameStatus {
    pub fn stats(&self) -> Option<&FrameStats> {
        match self {
            FrameStatus::Rendered(stats) => Some(stats),
            FrameStatus::NotReady => None,
        }
    }
}

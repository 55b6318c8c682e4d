/// Notification payloads exchanged between the host and the engine.

use glam::{Quat, Vec3};
use winit::dpi::LogicalSize;
use super::Signal;

/// New drawable size in logical pixels. The renderer scales it by
/// `RendererConfig::pixel_ratio` to get the device size.
pub type ResizeEvent = LogicalSize<u32>;

/// New camera orientation from the input layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientationEvent {
    pub orientation: Quat,
}

/// New camera position from the input / movement layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionEvent {
    pub position: Vec3,
}

/// One display refresh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTick {
    /// Monotonic frame counter
    pub frame: u64,
    /// Seconds since the previous tick
    pub delta_seconds: f32,
}

/// The signals a host owns and publishes on.
#[derive(Clone, Default)]
pub struct Notifications {
    pub resize: Signal<ResizeEvent>,
    pub orientation: Signal<OrientationEvent>,
    pub position: Signal<PositionEvent>,
    pub frame_tick: Signal<FrameTick>,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }
}

//! Renderer module
//!
//! The frame orchestrator (`PortalRenderer`), its configuration and
//! per-frame statistics, and the manager that drives it from host
//! notifications.

mod renderer_config;
mod portal_renderer;
mod renderer_manager;

pub use renderer_config::{RendererConfig, FrameStats, FrameStatus};
pub use portal_renderer::{PortalRenderer, FrameContext};
pub use renderer_manager::{RendererManager, FrameInputs};

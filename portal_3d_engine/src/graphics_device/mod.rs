/// Graphics device module - the backend seam and its state types

pub mod graphics_device;

pub use graphics_device::*;

// Mock graphics device for tests (no rasterizer required)
#[cfg(test)]
pub mod mock_graphics_device;

#[cfg(test)]
#[path = "graphics_device_tests.rs"]
mod tests;

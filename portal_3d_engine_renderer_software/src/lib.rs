/*!
# Portal 3D Engine - Software Renderer Backend

CPU implementation of the portal_3d_engine `GraphicsDevice` trait.

Color, depth and 8-bit stencil planes live in host memory, so every
pixel-level property of the portal pipeline can be checked without a GPU.
The color plane can be read back as RGBA8 bytes for presentation.
*/

mod software_frame_buffer;
mod software_rasterizer;
mod software_device;

pub use software_device::{SoftwareDevice, SoftwareDeviceConfig};
pub use software_frame_buffer::{SoftwareFrameBuffer, Rgba8, to_rgba8};
pub use software_rasterizer::Rasterizer;

/// Backend types under the engine's namespace convention
pub mod portal3d {
    pub use crate::software_device::{SoftwareDevice, SoftwareDeviceConfig};
    pub use crate::software_frame_buffer::SoftwareFrameBuffer;
}

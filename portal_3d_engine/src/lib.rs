/*!
# Portal 3D Engine

Core types for rendering scenes that contain portals: surfaces showing a
live, perspective-correct view into another scene.

This crate is platform-agnostic. Drawing goes through the `GraphicsDevice`
trait; backends (e.g. `portal_3d_engine_renderer_software`) implement it.

## Architecture

- **PortalRenderer**: per-frame orchestrator (clear, portal views, depth
  pre-pass, final scene)
- **PortalViewComposer**: stencil mask, virtual camera, oblique near plane
  and restoration for one portal
- **WorldRegistry / Scene / PortalSurface**: named scenes and the portal
  links between them
- **Camera / CameraSnapshot**: camera provider and its per-frame snapshot
- **Signal / Notifications**: single-threaded host notifications consumed
  by `CameraManager` and `RendererManager`
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod math;
pub mod scene;
pub mod portal;
pub mod camera;
pub mod graphics_device;
pub mod renderer;
pub mod events;

// Main portal3d namespace module
pub mod portal3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Logging facade
    pub use crate::engine::Engine;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    pub mod math {
        pub use crate::math::*;
    }

    pub mod scene {
        pub use crate::scene::*;
    }

    pub mod portal {
        pub use crate::portal::*;
    }

    pub mod camera {
        pub use crate::camera::*;
    }

    pub mod device {
        pub use crate::graphics_device::*;
    }

    pub mod render {
        pub use crate::renderer::*;
    }

    pub mod events {
        pub use crate::events::*;
    }
}

// Re-export math library at crate root
pub use glam;

//! Scene module
//!
//! Drawable content, named scenes and the world registry that owns them.

mod drawable;
mod scene;
mod world_registry;

pub use drawable::{AABB, Mesh, DrawItem, DrawGroup};
pub use scene::Scene;
pub use world_registry::{WorldRegistry, SceneKey};

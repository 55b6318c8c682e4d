//! Portal module
//!
//! Portal surfaces and the per-portal render passes: stencil mask, oblique
//! projection and the view composer.

mod portal_surface;
mod stencil_mask;
mod oblique_projection;
mod portal_view;

pub use portal_surface::{PortalSurface, PortalLink, PortalRef};
pub use stencil_mask::{draw_stencil_mask, STENCIL_MASK_ALL};
pub use oblique_projection::{apply_oblique_clip, clip_plane, oblique_projection};
pub use portal_view::{
    PortalViewComposer, PortalViewStage, StageObserver, portal_view_matrices,
};

/// PortalSurface — a drawable, placed surface linked to a destination portal.
///
/// The link is a key into the `WorldRegistry`, never an owning pointer: the
/// destination belongs to its own scene. Links are one-directional; a pair of
/// portals that look into each other is two independent links.

use glam::{Mat4, Vec3};
use crate::scene::{AABB, DrawGroup, SceneKey};

/// Location of a portal inside the registry: its scene and its position in
/// that scene's ordered portal list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PortalRef {
    pub scene: SceneKey,
    pub index: usize,
}

/// Destination link of a portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PortalLink {
    /// Not wired yet (destination scene not loaded, or no pairing step ran).
    #[default]
    Unresolved,
    /// Wired to a portal in some scene.
    Resolved(PortalRef),
}

impl PortalLink {
    pub fn is_resolved(&self) -> bool {
        matches!(self, PortalLink::Resolved(_))
    }

    /// The wired reference, if any.
    pub fn resolved(&self) -> Option<PortalRef> {
        match self {
            PortalLink::Resolved(portal_ref) => Some(*portal_ref),
            PortalLink::Unresolved => None,
        }
    }
}

/// A portal surface placed in a scene.
#[derive(Debug, Clone)]
pub struct PortalSurface {
    name: String,
    destination_scene_name: String,
    destination_portal_name: String,
    teleport_enabled: bool,
    matrix: Mat4,
    shape: DrawGroup,
    destination: PortalLink,
}

impl PortalSurface {
    /// Create an unlinked portal.
    ///
    /// # Arguments
    ///
    /// * `name` - Unique name within the owning scene
    /// * `destination_scene_name` - Scene holding the destination portal
    /// * `destination_portal_name` - Name of the destination portal in that scene
    /// * `teleport_enabled` - Whether walking through teleports (read by gameplay, not rendering)
    /// * `matrix` - World transform; local +Z points into the space seen through the portal
    /// * `shape` - Visible shape in local space
    pub fn new(
        name: &str,
        destination_scene_name: &str,
        destination_portal_name: &str,
        teleport_enabled: bool,
        matrix: Mat4,
        shape: DrawGroup,
    ) -> Self {
        Self {
            name: name.to_string(),
            destination_scene_name: destination_scene_name.to_string(),
            destination_portal_name: destination_portal_name.to_string(),
            teleport_enabled,
            matrix,
            shape,
            destination: PortalLink::Unresolved,
        }
    }

    // ===== IDENTITY =====

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn destination_scene_name(&self) -> &str {
        &self.destination_scene_name
    }

    pub fn destination_portal_name(&self) -> &str {
        &self.destination_portal_name
    }

    pub fn is_teleport_enabled(&self) -> bool {
        self.teleport_enabled
    }

    // ===== LINK =====

    pub fn destination(&self) -> &PortalLink {
        &self.destination
    }

    /// Destination reference, or `None` while unresolved.
    pub fn destination_ref(&self) -> Option<PortalRef> {
        self.destination.resolved()
    }

    /// Wire the destination. Setting the same reference twice is a no-op.
    pub fn set_destination(&mut self, destination: PortalRef) {
        self.destination = PortalLink::Resolved(destination);
    }

    /// Drop the link (destination scene unloaded).
    pub fn clear_destination(&mut self) {
        self.destination = PortalLink::Unresolved;
    }

    // ===== PLACEMENT =====

    /// World transform of this surface (never the destination's).
    pub fn matrix(&self) -> &Mat4 {
        &self.matrix
    }

    /// World position (translation of `matrix()`).
    pub fn position(&self) -> Vec3 {
        self.matrix.w_axis.truncate()
    }

    pub fn set_matrix(&mut self, matrix: Mat4) {
        self.matrix = matrix;
    }

    /// Shape in local space.
    pub fn shape(&self) -> &DrawGroup {
        &self.shape
    }

    /// Shape placed in world space.
    pub fn world_shape(&self) -> DrawGroup {
        self.shape.transformed(&self.matrix)
    }

    /// World-space bounds of the shape.
    pub fn world_bounds(&self) -> AABB {
        self.shape.bounds().transformed(&self.matrix)
    }
}

#[cfg(test)]
#[path = "portal_surface_tests.rs"]
mod tests;

/// Scene — a named world region: static content plus its portal surfaces.
///
/// Scenes are owned by the `WorldRegistry`. The renderer only reads them.

use crate::error::Result;
use crate::engine_bail;
use crate::portal::PortalSurface;
use super::drawable::DrawGroup;

/// A named scene.
#[derive(Debug, Clone)]
pub struct Scene {
    name: String,
    content: DrawGroup,
    portals: Vec<PortalSurface>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            content: DrawGroup::new(),
            portals: Vec::new(),
        }
    }

    /// Create a scene with its content already built.
    pub fn with_content(name: &str, content: DrawGroup) -> Self {
        Self {
            name: name.to_string(),
            content,
            portals: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    // ===== CONTENT =====

    /// Everything drawn in this scene except portal shapes.
    pub fn content(&self) -> &DrawGroup {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut DrawGroup {
        &mut self.content
    }

    // ===== PORTALS =====

    /// Add a portal surface, returning its index in scene order.
    ///
    /// # Errors
    ///
    /// Returns an error if a portal with the same name already exists in
    /// this scene.
    pub fn add_portal(&mut self, portal: PortalSurface) -> Result<usize> {
        if self.portal_index(portal.name()).is_some() {
            engine_bail!("portal3d::Scene",
                "Portal '{}' already exists in scene '{}'", portal.name(), self.name);
        }
        self.portals.push(portal);
        Ok(self.portals.len() - 1)
    }

    /// Portals in the order they are processed each frame.
    pub fn portals(&self) -> &[PortalSurface] {
        &self.portals
    }

    pub fn portal(&self, index: usize) -> Option<&PortalSurface> {
        self.portals.get(index)
    }

    pub fn portal_mut(&mut self, index: usize) -> Option<&mut PortalSurface> {
        self.portals.get_mut(index)
    }

    pub fn portal_by_name(&self, name: &str) -> Option<&PortalSurface> {
        self.portals.iter().find(|p| p.name() == name)
    }

    pub fn portal_index(&self, name: &str) -> Option<usize> {
        self.portals.iter().position(|p| p.name() == name)
    }

    pub fn portal_count(&self) -> usize {
        self.portals.len()
    }

    pub(crate) fn portals_mut(&mut self) -> &mut [PortalSurface] {
        &mut self.portals
    }
}

#[cfg(test)]
#[path = "scene_tests.rs"]
mod tests;

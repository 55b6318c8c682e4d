/// WorldRegistry — every loaded scene, addressed by name or by stable key.
///
/// Portal links are stored as `PortalRef { scene: SceneKey, index }`. Keys are
/// generational: once a scene is removed, refs into it stop resolving and the
/// renderer falls back to drawing those portals as plain surfaces.

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use crate::error::Result;
use crate::{engine_bail, engine_debug, engine_warn};
use crate::portal::{PortalRef, PortalSurface};
use super::scene::Scene;

new_key_type! {
    /// Stable key for a Scene within the WorldRegistry.
    ///
    /// Keys remain valid after other scenes are removed; a key to a
    /// removed scene never aliases a newer one.
    pub struct SceneKey;
}

/// Named scene storage plus the scene-assembly (link) step.
pub struct WorldRegistry {
    scenes: SlotMap<SceneKey, Scene>,
    names: FxHashMap<String, SceneKey>,
}

impl WorldRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            scenes: SlotMap::with_key(),
            names: FxHashMap::default(),
        }
    }

    /// Add a scene, returning its key.
    ///
    /// Portal links are not touched; call `link_portals()` once the scenes
    /// that should see each other are loaded.
    ///
    /// # Errors
    ///
    /// Returns an error if a scene with the same name already exists.
    pub fn add_scene(&mut self, scene: Scene) -> Result<SceneKey> {
        if self.names.contains_key(scene.name()) {
            engine_bail!("portal3d::WorldRegistry",
                "Scene '{}' already exists", scene.name());
        }

        let name = scene.name().to_string();
        let key = self.scenes.insert(scene);
        self.names.insert(name, key);
        Ok(key)
    }

    /// Get a scene by name
    pub fn scene(&self, name: &str) -> Option<&Scene> {
        self.names.get(name).and_then(|key| self.scenes.get(*key))
    }

    /// Get a mutable scene by name
    pub fn scene_mut(&mut self, name: &str) -> Option<&mut Scene> {
        let key = *self.names.get(name)?;
        self.scenes.get_mut(key)
    }

    pub fn scene_by_key(&self, key: SceneKey) -> Option<&Scene> {
        self.scenes.get(key)
    }

    pub fn scene_key(&self, name: &str) -> Option<SceneKey> {
        self.names.get(name).copied()
    }

    /// Remove a scene by name
    ///
    /// Returns the removed scene, or None if not found. Links pointing into
    /// it are left dangling and simply stop resolving.
    pub fn remove_scene(&mut self, name: &str) -> Option<Scene> {
        let key = self.names.remove(name)?;
        self.scenes.remove(key)
    }

    pub fn scene_count(&self) -> usize {
        self.scenes.len()
    }

    /// Get all scene names
    pub fn scene_names(&self) -> Vec<&str> {
        self.names.keys().map(|k| k.as_str()).collect()
    }

    /// Remove all scenes
    pub fn clear(&mut self) {
        self.scenes.clear();
        self.names.clear();
    }

    // ===== LINKING =====

    /// Resolve every portal's `(destination scene, destination portal)` names
    /// into a `PortalRef`.
    ///
    /// Idempotent. Portals whose destination is not loaded are set back to
    /// unresolved and logged at WARN. Returns the number of resolved links.
    pub fn link_portals(&mut self) -> usize {
        let mut resolved = Vec::new();
        for (key, scene) in self.scenes.iter() {
            for (index, portal) in scene.portals().iter().enumerate() {
                resolved.push((key, index, self.find_destination(portal)));
            }
        }

        let mut linked = 0;
        for (key, index, destination) in resolved {
            let Some(portal) = self.scenes.get_mut(key)
                .and_then(|s| s.portals_mut().get_mut(index)) else {
                continue;
            };
            match destination {
                Some(target) => {
                    portal.set_destination(target);
                    linked += 1;
                }
                None => {
                    engine_warn!("portal3d::WorldRegistry",
                        "Portal '{}' has no destination '{}'/'{}' loaded",
                        portal.name(),
                        portal.destination_scene_name(),
                        portal.destination_portal_name());
                    portal.clear_destination();
                }
            }
        }

        engine_debug!("portal3d::WorldRegistry", "Linked {} portal(s)", linked);
        linked
    }

    fn find_destination(&self, portal: &PortalSurface) -> Option<PortalRef> {
        let scene_key = self.scene_key(portal.destination_scene_name())?;
        let index = self.scenes.get(scene_key)?
            .portal_index(portal.destination_portal_name())?;
        Some(PortalRef { scene: scene_key, index })
    }

    /// Dereference a portal link.
    ///
    /// Returns `None` if the scene was removed or the index is stale.
    pub fn resolve(&self, portal_ref: &PortalRef) -> Option<(&Scene, &PortalSurface)> {
        let scene = self.scenes.get(portal_ref.scene)?;
        let portal = scene.portal(portal_ref.index)?;
        Some((scene, portal))
    }
}

impl Default for WorldRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "world_registry_tests.rs"]
mod tests;

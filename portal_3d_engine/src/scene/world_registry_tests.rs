/// Tests for WorldRegistry
///
/// These tests validate scene storage by name and key, removal, and the
/// portal link step.

use std::sync::Arc;
use glam::{Mat4, Vec3};
use super::*;
use crate::scene::{DrawGroup, Mesh};

fn portal(name: &str, dest_scene: &str, dest_portal: &str) -> PortalSurface {
    PortalSurface::new(
        name,
        dest_scene,
        dest_portal,
        true,
        Mat4::IDENTITY,
        DrawGroup::from_mesh(Arc::new(Mesh::quad(name, 2.0, 2.0, [1.0; 4]))),
    )
}

fn scene_with(name: &str, portals: Vec<PortalSurface>) -> Scene {
    let mut scene = Scene::new(name);
    for p in portals {
        scene.add_portal(p).unwrap();
    }
    scene
}

/// Hall <-> Vault pair, each side linking to the other.
fn hall_and_vault() -> WorldRegistry {
    let mut registry = WorldRegistry::new();
    registry.add_scene(scene_with("Hall", vec![portal("to_vault", "Vault", "to_hall")])).unwrap();
    registry.add_scene(scene_with("Vault", vec![portal("to_hall", "Hall", "to_vault")])).unwrap();
    registry
}

// ============================================================================
// Tests: Scene Storage
// ============================================================================

#[test]
fn test_registry_new() {
    let registry = WorldRegistry::new();
    assert_eq!(registry.scene_count(), 0);
    assert!(registry.scene("Hall").is_none());
}

#[test]
fn test_add_scene() {
    let mut registry = WorldRegistry::new();
    let key = registry.add_scene(Scene::new("Hall")).unwrap();

    assert_eq!(registry.scene_count(), 1);
    assert_eq!(registry.scene_key("Hall"), Some(key));
    assert_eq!(registry.scene_by_key(key).unwrap().name(), "Hall");
    assert_eq!(registry.scene("Hall").unwrap().name(), "Hall");
}

#[test]
fn test_add_duplicate_scene_fails() {
    let mut registry = WorldRegistry::new();
    registry.add_scene(Scene::new("Hall")).unwrap();
    assert!(registry.add_scene(Scene::new("Hall")).is_err());
    assert_eq!(registry.scene_count(), 1);
}

#[test]
fn test_scene_names() {
    let registry = hall_and_vault();
    let mut names = registry.scene_names();
    names.sort();
    assert_eq!(names, vec!["Hall", "Vault"]);
}

#[test]
fn test_scene_mut() {
    let mut registry = WorldRegistry::new();
    registry.add_scene(Scene::new("Hall")).unwrap();
    let mesh = Arc::new(Mesh::quad("floor", 1.0, 1.0, [1.0; 4]));
    registry.scene_mut("Hall").unwrap().content_mut().push(mesh, Mat4::IDENTITY);
    assert_eq!(registry.scene("Hall").unwrap().content().len(), 1);
}

#[test]
fn test_remove_scene() {
    let mut registry = hall_and_vault();
    let removed = registry.remove_scene("Vault");
    assert!(removed.is_some());
    assert_eq!(registry.scene_count(), 1);
    assert!(registry.scene("Vault").is_none());
    assert!(registry.remove_scene("Vault").is_none());
}

#[test]
fn test_clear() {
    let mut registry = hall_and_vault();
    registry.clear();
    assert_eq!(registry.scene_count(), 0);
    assert!(registry.scene_key("Hall").is_none());
}

// ============================================================================
// Tests: Linking
// ============================================================================

#[test]
fn test_link_portals_resolves_both_directions() {
    let mut registry = hall_and_vault();
    assert_eq!(registry.link_portals(), 2);

    let hall_door = &registry.scene("Hall").unwrap().portals()[0];
    let target = hall_door.destination_ref().unwrap();
    assert_eq!(target.scene, registry.scene_key("Vault").unwrap());
    assert_eq!(target.index, 0);

    let (scene, dest) = registry.resolve(&target).unwrap();
    assert_eq!(scene.name(), "Vault");
    assert_eq!(dest.name(), "to_hall");
}

#[test]
fn test_link_portals_is_idempotent() {
    let mut registry = hall_and_vault();
    registry.link_portals();
    let first = registry.scene("Hall").unwrap().portals()[0].destination_ref();
    assert_eq!(registry.link_portals(), 2);
    let second = registry.scene("Hall").unwrap().portals()[0].destination_ref();
    assert_eq!(first, second);
}

#[test]
fn test_link_portals_missing_scene_stays_unresolved() {
    let mut registry = WorldRegistry::new();
    registry.add_scene(scene_with("Hall", vec![portal("to_attic", "Attic", "hatch")])).unwrap();

    assert_eq!(registry.link_portals(), 0);
    assert!(registry.scene("Hall").unwrap().portals()[0].destination_ref().is_none());
}

#[test]
fn test_link_portals_missing_portal_stays_unresolved() {
    let mut registry = WorldRegistry::new();
    registry.add_scene(scene_with("Hall", vec![portal("to_vault", "Vault", "nope")])).unwrap();
    registry.add_scene(scene_with("Vault", vec![portal("to_hall", "Hall", "to_vault")])).unwrap();

    assert_eq!(registry.link_portals(), 1);
    assert!(registry.scene("Hall").unwrap().portals()[0].destination_ref().is_none());
    assert!(registry.scene("Vault").unwrap().portals()[0].destination_ref().is_some());
}

#[test]
fn test_link_within_same_scene() {
    let mut registry = WorldRegistry::new();
    let mut a = portal("a", "Hall", "b");
    a.set_matrix(Mat4::from_translation(Vec3::X));
    registry.add_scene(scene_with("Hall", vec![a, portal("b", "Hall", "a")])).unwrap();

    assert_eq!(registry.link_portals(), 2);
    let target = registry.scene("Hall").unwrap().portals()[0].destination_ref().unwrap();
    assert_eq!(registry.resolve(&target).unwrap().1.name(), "b");
}

#[test]
fn test_removed_scene_no_longer_resolves() {
    let mut registry = hall_and_vault();
    registry.link_portals();
    let target = registry.scene("Hall").unwrap().portals()[0].destination_ref().unwrap();

    registry.remove_scene("Vault");
    assert!(registry.resolve(&target).is_none());

    // Re-adding a scene with the same name gets a fresh key
    registry.add_scene(scene_with("Vault", vec![portal("to_hall", "Hall", "to_vault")])).unwrap();
    assert!(registry.resolve(&target).is_none());

    registry.link_portals();
    let relinked = registry.scene("Hall").unwrap().portals()[0].destination_ref().unwrap();
    assert_ne!(relinked, target);
    assert!(registry.resolve(&relinked).is_some());
}

#[test]
fn test_relink_after_removal_clears_link() {
    let mut registry = hall_and_vault();
    registry.link_portals();
    registry.remove_scene("Vault");
    assert_eq!(registry.link_portals(), 0);
    assert!(registry.scene("Hall").unwrap().portals()[0].destination_ref().is_none());
}

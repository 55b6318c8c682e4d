use std::sync::Arc;
use glam::{Mat4, Vec3};
use super::*;

const RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];

// ============================================================================
// AABB
// ============================================================================

#[test]
fn test_aabb_from_points() {
    let aabb = AABB::from_points(&[
        Vec3::new(1.0, -2.0, 0.0),
        Vec3::new(-1.0, 3.0, 5.0),
    ]);
    assert_eq!(aabb.min, Vec3::new(-1.0, -2.0, 0.0));
    assert_eq!(aabb.max, Vec3::new(1.0, 3.0, 5.0));
}

#[test]
fn test_aabb_empty() {
    assert!(AABB::from_points(&[]).is_empty());
    assert!(AABB::EMPTY.transformed(&Mat4::from_scale(Vec3::splat(2.0))).is_empty());
}

#[test]
fn test_aabb_union_with_empty() {
    let a = AABB { min: Vec3::ZERO, max: Vec3::ONE };
    assert_eq!(AABB::EMPTY.union(&a), a);
}

#[test]
fn test_aabb_transformed_translation() {
    let a = AABB { min: Vec3::splat(-1.0), max: Vec3::splat(1.0) };
    let moved = a.transformed(&Mat4::from_translation(Vec3::new(10.0, 0.0, 0.0)));
    assert_eq!(moved.min, Vec3::new(9.0, -1.0, -1.0));
    assert_eq!(moved.max, Vec3::new(11.0, 1.0, 1.0));
}

// ============================================================================
// Mesh
// ============================================================================

#[test]
fn test_quad_mesh() {
    let quad = Mesh::quad("portal", 2.0, 4.0, RED);
    assert_eq!(quad.triangle_count(), 2);
    assert_eq!(quad.bounds().min, Vec3::new(-1.0, -2.0, 0.0));
    assert_eq!(quad.bounds().max, Vec3::new(1.0, 2.0, 0.0));
    assert_eq!(quad.color(), RED);
    assert_eq!(quad.triangles().count(), 2);
}

#[test]
fn test_mesh_new_rejects_partial_triangle() {
    let result = Mesh::new("bad", vec![Vec3::ZERO; 3], vec![0, 1], RED);
    assert!(result.is_err());
}

#[test]
fn test_mesh_new_rejects_out_of_range_index() {
    let result = Mesh::new("bad", vec![Vec3::ZERO; 3], vec![0, 1, 3], RED);
    assert!(result.is_err());
}

#[test]
fn test_mesh_new_valid() {
    let mesh = Mesh::new(
        "tri",
        vec![Vec3::ZERO, Vec3::X, Vec3::Y],
        vec![0, 1, 2],
        RED,
    ).unwrap();
    assert_eq!(mesh.name(), "tri");
    assert_eq!(mesh.triangles().next().unwrap(), [Vec3::ZERO, Vec3::X, Vec3::Y]);
}

// ============================================================================
// DrawGroup
// ============================================================================

#[test]
fn test_draw_group_transformed_premultiplies() {
    let mesh = Arc::new(Mesh::quad("q", 1.0, 1.0, RED));
    let mut group = DrawGroup::new();
    group.push(mesh, Mat4::from_translation(Vec3::X));

    let parent = Mat4::from_translation(Vec3::new(0.0, 0.0, -5.0));
    let moved = group.transformed(&parent);

    assert_eq!(moved.len(), 1);
    assert_eq!(moved.items()[0].model, parent * Mat4::from_translation(Vec3::X));
    assert_eq!(moved.bounds().min.z, -5.0);
}

#[test]
fn test_draw_group_extend_into_batch_shares_meshes() {
    let mesh = Arc::new(Mesh::quad("q", 1.0, 1.0, RED));
    let group = DrawGroup::from_mesh(Arc::clone(&mesh));

    let mut batch = Vec::new();
    group.extend_transformed_into(&Mat4::IDENTITY, &mut batch);
    group.extend_transformed_into(&Mat4::from_translation(Vec3::Y), &mut batch);

    assert_eq!(batch.len(), 2);
    assert!(Arc::ptr_eq(&batch[0].mesh, &mesh));
    assert!(Arc::ptr_eq(&batch[1].mesh, &mesh));
}

#[test]
fn test_empty_group_bounds() {
    assert!(DrawGroup::new().bounds().is_empty());
    assert!(DrawGroup::new().is_empty());
}

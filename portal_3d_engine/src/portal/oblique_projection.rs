/// Oblique near-plane projection.
///
/// Moves the near clipping plane of a perspective projection onto an
/// arbitrary camera-space plane (Lengyel, "Oblique View Frustum Depth
/// Projection and Clipping"). Geometry between the virtual camera and the
/// destination portal is clipped away; far-plane precision degrades as the
/// plane tilts away from the view axis.
///
/// Works on the OpenGL clip convention (z in [-w, w]). Element indices below
/// are column-major, as in `Mat4::to_cols_array`.

use glam::{Mat4, Vec4};
use crate::math::{extract_rotation, Plane, FORWARD_AXIS};

/// Sign with `sign(±0) = 0` (unlike `f32::signum`).
fn sign(value: f32) -> f32 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Plane of `destination_matrix` (through its origin, facing its forward
/// axis) in the camera space given by `world_inverse`, as `(n.xyz, constant)`.
pub fn clip_plane(destination_matrix: &Mat4, world_inverse: &Mat4) -> Vec4 {
    let normal = extract_rotation(destination_matrix).transform_vector3(FORWARD_AXIS);
    let position = destination_matrix.w_axis.truncate();
    Plane::from_normal_and_coplanar_point(normal, position)
        .apply_matrix(world_inverse)
        .to_vec4()
}

/// Replace the near plane of `projection` with `clip` (camera space).
///
/// `projection` must be a perspective projection; the camera must lie on the
/// negative side of `clip`. A `clip` for which `dot(clip, q)` is zero yields
/// non-finite elements.
pub fn apply_oblique_clip(projection: &Mat4, clip: Vec4) -> Mat4 {
    let mut m = projection.to_cols_array();

    let q = Vec4::new(
        (sign(clip.x) + m[8]) / m[0],
        (sign(clip.y) + m[9]) / m[5],
        -1.0,
        (1.0 + m[10]) / m[14],
    );

    let c = clip * (2.0 / clip.dot(q));

    m[2] = c.x;
    m[6] = c.y;
    m[10] = c.z + 1.0;
    m[14] = c.w;

    Mat4::from_cols_array(&m)
}

/// Projection whose near plane lies on the destination portal's plane, as
/// seen from a camera whose view matrix is `world_inverse`.
pub fn oblique_projection(destination_matrix: &Mat4, world_inverse: &Mat4, projection: &Mat4) -> Mat4 {
    apply_oblique_clip(projection, clip_plane(destination_matrix, world_inverse))
}

#[cfg(test)]
#[path = "oblique_projection_tests.rs"]
mod tests;

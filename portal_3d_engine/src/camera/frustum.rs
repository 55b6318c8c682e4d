/// Frustum — six clipping planes, used to skip portals that are off-screen.
///
/// Each plane is represented as a Vec4 (A, B, C, D) where:
/// - (A, B, C) is the inward-pointing normal
/// - D is the signed distance
/// - A point P is inside the frustum if dot(plane, P_homogeneous) >= 0 for all planes
///
/// Planes are extracted for the OpenGL clip convention (-w <= z <= w).

use glam::{Mat4, Vec3, Vec4};
use crate::scene::AABB;

/// Frustum plane indices
pub const PLANE_LEFT: usize = 0;
pub const PLANE_RIGHT: usize = 1;
pub const PLANE_BOTTOM: usize = 2;
pub const PLANE_TOP: usize = 3;
pub const PLANE_NEAR: usize = 4;
pub const PLANE_FAR: usize = 5;

#[derive(Debug, Clone, Copy)]
pub struct Frustum {
    /// Frustum planes: left, right, bottom, top, near, far
    pub planes: [Vec4; 6],
}

impl Frustum {
    /// Extract frustum planes from a view-projection matrix.
    ///
    /// Gribb & Hartmann. Each plane is normalized so that (A, B, C) is a
    /// unit vector.
    pub fn from_view_projection(vp: &Mat4) -> Self {
        let row0 = vp.row(0);
        let row1 = vp.row(1);
        let row2 = vp.row(2);
        let row3 = vp.row(3);

        let mut planes = [
            row3 + row0, // left
            row3 - row0, // right
            row3 + row1, // bottom
            row3 - row1, // top
            row3 + row2, // near
            row3 - row2, // far
        ];

        for plane in &mut planes {
            let normal_len = plane.truncate().length();
            if normal_len > 0.0 {
                *plane /= normal_len;
            }
        }

        Self { planes }
    }

    /// Signed distance of a point to one plane (positive = inside).
    pub fn distance(&self, plane: usize, point: Vec3) -> f32 {
        self.planes[plane].dot(point.extend(1.0))
    }

    pub fn contains_point(&self, point: Vec3) -> bool {
        (0..6).all(|i| self.distance(i, point) >= 0.0)
    }

    /// Test if an AABB intersects this frustum.
    ///
    /// "Positive vertex" test: for each plane, the corner most aligned with
    /// the normal decides. Conservative: may return false positives, never
    /// false negatives. An empty box never intersects.
    pub fn intersects_aabb(&self, aabb: &AABB) -> bool {
        if aabb.is_empty() {
            return false;
        }

        self.planes.iter().all(|plane| {
            let p_vertex = Vec3::new(
                if plane.x >= 0.0 { aabb.max.x } else { aabb.min.x },
                if plane.y >= 0.0 { aabb.max.y } else { aabb.min.y },
                if plane.z >= 0.0 { aabb.max.z } else { aabb.min.z },
            );
            plane.dot(p_vertex.extend(1.0)) >= 0.0
        })
    }
}

#[cfg(test)]
#[path = "frustum_tests.rs"]
mod tests;

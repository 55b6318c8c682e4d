/// Plane — unit normal and signed constant.
///
/// Points `p` on the plane satisfy `normal · p + constant = 0`. The signed
/// distance of any point is `normal · p + constant`; points on the side the
/// normal faces have a positive distance.

use glam::{Mat3, Mat4, Vec3, Vec4};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub normal: Vec3,
    pub constant: f32,
}

impl Plane {
    pub fn new(normal: Vec3, constant: f32) -> Self {
        Self { normal, constant }
    }

    /// Build a plane from a normal and any point lying on it.
    ///
    /// The normal is used as given; callers pass a unit vector.
    pub fn from_normal_and_coplanar_point(normal: Vec3, point: Vec3) -> Self {
        Self {
            normal,
            constant: -point.dot(normal),
        }
    }

    /// Signed distance from `point` to the plane.
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.constant
    }

    /// The point of the plane closest to the origin.
    pub fn coplanar_point(&self) -> Vec3 {
        self.normal * -self.constant
    }

    /// Transform the plane by `m`.
    ///
    /// The normal goes through the inverse-transpose of the upper 3x3 and is
    /// renormalised; the constant is recomputed from the transformed
    /// coplanar point. `m` must be invertible.
    pub fn apply_matrix(&self, m: &Mat4) -> Self {
        let normal_matrix = Mat3::from_mat4(*m).inverse().transpose();
        let reference_point = m.transform_point3(self.coplanar_point());
        let normal = (normal_matrix * self.normal).normalize();
        Self {
            normal,
            constant: -reference_point.dot(normal),
        }
    }

    /// Pack as `(normal.x, normal.y, normal.z, constant)`.
    pub fn to_vec4(&self) -> Vec4 {
        self.normal.extend(self.constant)
    }
}

#[cfg(test)]
#[path = "plane_tests.rs"]
mod tests;

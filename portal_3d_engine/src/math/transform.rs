/// Matrix composition, inversion and rotation extraction.
///
/// `compose(a, b)` is `a * b`: applied to a point, `b` runs first.
/// Composition is associative but not commutative; callers track
/// the left-to-right order themselves.

use glam::{Mat4, Vec3, Vec4};
use crate::error::{Error, Result};

/// Canonical forward axis of a portal surface, in its local space.
///
/// The portal's local +Z points into the space that is seen through it.
pub const FORWARD_AXIS: Vec3 = Vec3::Z;

/// Determinants at or below this magnitude are treated as singular.
pub const MIN_DETERMINANT: f32 = 1e-12;

/// Compose two transforms (`a * b`).
#[inline]
pub fn compose(a: &Mat4, b: &Mat4) -> Mat4 {
    *a * *b
}

/// Compose a chain left to right (`m[0] * m[1] * ... * m[n-1]`).
///
/// An empty chain yields the identity.
pub fn compose_all(chain: &[Mat4]) -> Mat4 {
    chain.iter().fold(Mat4::IDENTITY, |acc, m| acc * *m)
}

/// Invert a transform.
///
/// Inputs are expected to be rigid or near-rigid transforms. A matrix whose
/// determinant is not finite or has magnitude `<= MIN_DETERMINANT` is
/// rejected with `Error::SingularMatrix` instead of producing garbage.
pub fn try_invert(m: &Mat4) -> Result<Mat4> {
    let det = m.determinant();
    if !det.is_finite() || det.abs() <= MIN_DETERMINANT {
        return Err(Error::SingularMatrix);
    }
    Ok(m.inverse())
}

/// Rotation-only part of a transform.
///
/// Each basis column is normalised (scale removed) and the translation is
/// dropped. A zero-length column stays zero.
pub fn extract_rotation(m: &Mat4) -> Mat4 {
    let x = m.x_axis.truncate().normalize_or_zero();
    let y = m.y_axis.truncate().normalize_or_zero();
    let z = m.z_axis.truncate().normalize_or_zero();
    Mat4::from_cols(
        x.extend(0.0),
        y.extend(0.0),
        z.extend(0.0),
        Vec4::W,
    )
}

/// Element-wise comparison with an absolute tolerance.
pub fn approx_eq_mat4(a: &Mat4, b: &Mat4, epsilon: f32) -> bool {
    a.to_cols_array()
        .iter()
        .zip(b.to_cols_array().iter())
        .all(|(x, y)| (x - y).abs() <= epsilon)
}

#[cfg(test)]
#[path = "transform_tests.rs"]
mod tests;

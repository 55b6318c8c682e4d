//! Transform utilities — pure matrix, vector and plane helpers.
//!
//! Every function is stateless and re-entrant. Matrices are glam `Mat4`
//! (column-major, 16-element layout identical to the OpenGL convention).

mod transform;
mod plane;

pub use transform::{
    compose, compose_all, try_invert, extract_rotation, approx_eq_mat4,
    FORWARD_AXIS, MIN_DETERMINANT,
};
pub use plane::Plane;

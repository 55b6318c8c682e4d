//! Error types for the Portal3D engine
//!
//! This module defines the error types used throughout the engine,
//! including device, transform and scene resolution failures.

use std::fmt;

/// Result type for Portal3D engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Portal3D engine errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Backend-specific error (software rasterizer, GPU device, etc.)
    BackendError(String),

    /// Invalid resource (unknown scene, unknown portal, bad mesh, etc.)
    InvalidResource(String),

    /// Initialization failed (engine, renderer, subsystems)
    InitializationFailed(String),

    /// Matrix could not be inverted (determinant is zero or not finite)
    SingularMatrix,

    /// Portal view or projection has non-finite elements (camera on the
    /// destination plane)
    DegenerateProjection,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::SingularMatrix => write!(f, "Singular matrix cannot be inverted"),
            Error::DegenerateProjection => write!(f, "Degenerate portal projection"),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;

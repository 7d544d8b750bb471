//! Spatial-subsystem error type.

use thiserror::Error;

use patrol_core::ColliderId;

/// Errors produced by `patrol-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("collider {0} not found in world")]
    ColliderNotFound(ColliderId),

    #[error("ray direction must be finite and non-zero")]
    DegenerateRay,

    #[error("collider bounds must have positive, finite extents")]
    DegenerateBounds,
}

pub type SpatialResult<T> = Result<T, SpatialError>;

//! Spatial-subsystem error type.

use thiserror::Error;

use rt_behavior::BehaviorError;

/// Errors produced by `rt-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("scene has no BoundsIndex resource")]
    MissingIndex,
}

impl From<SpatialError> for BehaviorError {
    fn from(e: SpatialError) -> Self {
        BehaviorError::Config(e.to_string())
    }
}

pub type SpatialResult<T> = Result<T, SpatialError>;

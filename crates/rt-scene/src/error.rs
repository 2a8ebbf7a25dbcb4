use rt_behavior::BehaviorError;
use rt_core::{CoreError, EntityId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("entity {0} not found")]
    EntityNotFound(EntityId),

    #[error("behavior `{behavior}` not found on {entity}")]
    BehaviorNotFound {
        entity:   EntityId,
        behavior: String,
    },

    #[error("object `{object}` declares behavior `{behavior}` more than once")]
    DuplicateBehavior {
        object:   String,
        behavior: String,
    },

    #[error("scene data parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("scene data I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("behavior error: {0}")]
    Behavior(#[from] BehaviorError),

    #[error("scene configuration error: {0}")]
    Core(#[from] CoreError),
}

pub type SceneResult<T> = Result<T, SceneError>;

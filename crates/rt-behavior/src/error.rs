use thiserror::Error;

#[derive(Debug, Error)]
pub enum BehaviorError {
    #[error("behavior `{behavior}` failed: {message}")]
    Hook { behavior: String, message: String },

    #[error("behavior configuration error: {0}")]
    Config(String),
}

impl BehaviorError {
    pub fn hook(behavior: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Hook { behavior: behavior.into(), message: message.into() }
    }
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;

//! Runtime error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one variant
//! where they surface it.

use thiserror::Error;

use crate::NameId;

/// The error type for `rt-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("name {0} was never interned")]
    UnknownName(NameId),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `rt-core`.
pub type CoreResult<T> = Result<T, CoreError>;

use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid key {input:?}: {reason}")]
    InvalidKey { input: String, reason: String },

    #[error("empty type tag")]
    EmptyTypeTag,
}

use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("unknown entity kind: {0}")]
    UnknownEntityKind(String),

    #[error("unknown registration status: {0}")]
    UnknownStatus(String),
}

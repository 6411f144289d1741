use thiserror::Error;

/// Errors produced at the anchoring boundary.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnchorError {
    /// A reference string does not match the required shape.
    #[error("invalid {kind} reference {reference:?}: {reason}")]
    InvalidReference {
        kind: &'static str,
        reference: String,
        reason: String,
    },

    /// The collaborator refused the operation.
    #[error("anchoring rejected: {0}")]
    Rejected(String),
}

impl AnchorError {
    pub(crate) fn ledger_ref(reference: &str, reason: impl Into<String>) -> Self {
        Self::InvalidReference {
            kind: "ledger",
            reference: reference.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn content_ref(reference: &str, reason: impl Into<String>) -> Self {
        Self::InvalidReference {
            kind: "content",
            reference: reference.to_string(),
            reason: reason.into(),
        }
    }
}

pub type AnchorResult<T> = Result<T, AnchorError>;

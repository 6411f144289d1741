use thiserror::Error;

/// Errors produced by the onboarding workflow.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// The referenced registration does not exist.
    #[error("registration not found")]
    NotFound,

    /// The tax ID already belongs to a registration or an active
    /// organization.
    #[error("tax ID already registered")]
    DuplicateTaxId,

    /// The stored checksum validation failed; carries the validator's
    /// message.
    #[error("{0}")]
    InvalidTaxId(String),

    /// A workflow invariant is not yet satisfied.
    #[error("{0}")]
    PreconditionFailed(String),

    /// The external anchoring boundary refused an operation.
    #[error("anchoring failed: {0}")]
    Anchor(#[from] clara_anchor::AnchorError),

    /// The audit trail refused an append.
    #[error("audit trail failed: {0}")]
    Audit(#[from] clara_audit::AuditError),
}

pub type RegistryResult<T> = Result<T, RegistryError>;

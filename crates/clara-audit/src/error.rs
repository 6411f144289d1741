use clara_types::EntityKind;
use thiserror::Error;

/// Errors produced by the audit trail and verification engine.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuditError {
    /// The entity named in a verification request does not exist.
    #[error("{kind} {id} not found")]
    EntityNotFound { kind: EntityKind, id: u64 },
}

pub type AuditResult<T> = Result<T, AuditError>;

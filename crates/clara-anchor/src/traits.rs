use crate::error::AnchorResult;

/// Distributed-ledger collaborator.
///
/// The ledger is opaque: the only contract is that a successful mint
/// returns a reference matching the shape checked by
/// [`validate_ledger_ref`](crate::validate_ledger_ref). Implementations
/// must be safe to share across concurrent callers.
pub trait LedgerAnchor: Send + Sync {
    /// Record a new entry on the ledger and return its reference.
    fn mint_reference(&self) -> AnchorResult<String>;
}

/// Content-addressed file-store collaborator.
///
/// Stores opaque document bytes and returns a reference matching the shape
/// checked by [`validate_content_ref`](crate::validate_content_ref).
pub trait ContentStore: Send + Sync {
    /// Store the given bytes and return their content reference.
    fn store(&self, bytes: &[u8]) -> AnchorResult<String>;
}

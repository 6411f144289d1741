use crate::entry::{AuditLogEntry, AuditTargetKind, NewAuditEntry};
use crate::error::AuditResult;

/// Filter for audit trail queries. Populated fields compose with AND.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AuditFilter {
    pub target_kind: Option<AuditTargetKind>,
    pub target_id: Option<u64>,
}

impl AuditFilter {
    /// Match every entry.
    pub fn all() -> Self {
        Self::default()
    }

    /// Match entries targeting one kind of entity.
    pub fn by_kind(kind: AuditTargetKind) -> Self {
        Self {
            target_kind: Some(kind),
            target_id: None,
        }
    }

    /// Match entries targeting one identifier, across all kinds.
    pub fn by_id(id: u64) -> Self {
        Self {
            target_kind: None,
            target_id: Some(id),
        }
    }

    /// Match entries targeting one specific entity.
    pub fn by_entity(kind: AuditTargetKind, id: u64) -> Self {
        Self {
            target_kind: Some(kind),
            target_id: Some(id),
        }
    }

    /// Returns `true` if the entry satisfies every populated field.
    pub fn matches(&self, entry: &AuditLogEntry) -> bool {
        self.target_kind.map_or(true, |k| entry.target_kind == k)
            && self.target_id.map_or(true, |id| entry.target_id == id)
    }
}

/// Append-only audit trail.
///
/// Implementations must uphold:
/// - Entries are immutable once appended; nothing is ever edited or
///   removed.
/// - `entries` returns matches in insertion order — that order *is* the
///   audit trail.
/// - Appends from concurrent callers serialize; sequence numbers are
///   assigned gaplessly from 1.
pub trait AuditTrail: Send + Sync {
    /// Append an entry, assigning its sequence number and timestamp.
    fn append(&self, entry: NewAuditEntry) -> AuditResult<AuditLogEntry>;

    /// Entries matching the filter, in insertion order.
    fn entries(&self, filter: &AuditFilter) -> AuditResult<Vec<AuditLogEntry>>;

    /// Total number of entries in the trail.
    fn len(&self) -> AuditResult<u64>;

    /// Returns `true` if the trail has no entries.
    fn is_empty(&self) -> AuditResult<bool> {
        Ok(self.len()? == 0)
    }
}

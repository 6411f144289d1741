//! Append-only audit trail and cross-reference verification.
//!
//! Every compliance-relevant action in Clara — workflow transitions,
//! document uploads, approvals, rejections, and verifications themselves —
//! produces exactly one [`AuditLogEntry`]. Entries are immutable once
//! appended and their insertion order is the canonical audit trail.
//!
//! The [`AuditEngine`] independently re-verifies the ledger and
//! content-store references attached to any tracked entity, resolving them
//! through a [`ReferenceDirectory`] capability so the engine never touches
//! entity storage directly.

pub mod directory;
pub mod engine;
pub mod entry;
pub mod error;
pub mod memory;
pub mod trail;

pub use directory::{EntityRefs, ReferenceDirectory};
pub use engine::{AuditEngine, VerificationResult};
pub use entry::{AuditAction, AuditLogEntry, AuditTargetKind, NewAuditEntry};
pub use error::{AuditError, AuditResult};
pub use memory::{InMemoryAuditTrail, InMemoryDirectory};
pub use trail::{AuditFilter, AuditTrail};

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::Utc;

use clara_types::EntityKind;

use crate::directory::{EntityRefs, ReferenceDirectory};
use crate::entry::{AuditLogEntry, NewAuditEntry};
use crate::error::AuditResult;
use crate::trail::{AuditFilter, AuditTrail};

/// In-memory, append-only audit trail.
///
/// Entries live in a `Vec` behind a `RwLock`: appends take the write lock
/// for the whole assign-and-push sequence, queries take the read lock.
/// Nothing is ever removed.
pub struct InMemoryAuditTrail {
    entries: RwLock<Vec<AuditLogEntry>>,
}

impl InMemoryAuditTrail {
    /// Create an empty trail.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryAuditTrail {
    fn default() -> Self {
        Self::new()
    }
}

impl AuditTrail for InMemoryAuditTrail {
    fn append(&self, entry: NewAuditEntry) -> AuditResult<AuditLogEntry> {
        let mut entries = self.entries.write().expect("lock poisoned");
        let appended = AuditLogEntry {
            seq: entries.len() as u64 + 1,
            actor: entry.actor,
            action: entry.action,
            target_kind: entry.target_kind,
            target_id: entry.target_id,
            previous_state: entry.previous_state,
            new_state: entry.new_state,
            comment: entry.comment,
            ledger_valid: entry.ledger_valid,
            store_valid: entry.store_valid,
            validation_errors: entry.validation_errors,
            created_at: Utc::now(),
        };
        entries.push(appended.clone());
        Ok(appended)
    }

    fn entries(&self, filter: &AuditFilter) -> AuditResult<Vec<AuditLogEntry>> {
        let entries = self.entries.read().expect("lock poisoned");
        Ok(entries
            .iter()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect())
    }

    fn len(&self) -> AuditResult<u64> {
        Ok(self.entries.read().expect("lock poisoned").len() as u64)
    }
}

/// In-memory reference directory.
///
/// Holds seeded `(kind, id) -> references` pairs. Used in tests and as the
/// stand-in directory for donation and expense records, whose owning
/// subsystems are external to the compliance core.
pub struct InMemoryDirectory {
    refs: RwLock<HashMap<(EntityKind, u64), EntityRefs>>,
}

impl InMemoryDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self {
            refs: RwLock::new(HashMap::new()),
        }
    }

    /// Seed or replace the references of one entity.
    pub fn insert(&self, kind: EntityKind, id: u64, refs: EntityRefs) {
        self.refs
            .write()
            .expect("lock poisoned")
            .insert((kind, id), refs);
    }
}

impl Default for InMemoryDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl ReferenceDirectory for InMemoryDirectory {
    fn lookup(&self, kind: EntityKind, id: u64) -> AuditResult<Option<EntityRefs>> {
        let refs = self.refs.read().expect("lock poisoned");
        Ok(refs.get(&(kind, id)).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::{AuditAction, AuditTargetKind};
    use clara_types::ActorId;

    fn entry(action: AuditAction, kind: AuditTargetKind, id: u64) -> NewAuditEntry {
        NewAuditEntry::action(ActorId::SYSTEM, action, kind, id)
    }

    // -----------------------------------------------------------------------
    // Appending
    // -----------------------------------------------------------------------

    #[test]
    fn append_assigns_gapless_sequence() {
        let trail = InMemoryAuditTrail::new();
        for i in 1..=3 {
            let appended = trail
                .append(entry(
                    AuditAction::RegistrationSubmitted,
                    AuditTargetKind::Registration,
                    i,
                ))
                .unwrap();
            assert_eq!(appended.seq, i);
        }
        assert_eq!(trail.len().unwrap(), 3);
    }

    #[test]
    fn concurrent_appends_serialize() {
        use std::sync::Arc;
        use std::thread;

        let trail = Arc::new(InMemoryAuditTrail::new());
        let handles: Vec<_> = (0..16)
            .map(|i| {
                let trail = Arc::clone(&trail);
                thread::spawn(move || {
                    trail
                        .append(entry(
                            AuditAction::VerificationPerformed,
                            AuditTargetKind::Donation,
                            i,
                        ))
                        .unwrap()
                })
            })
            .collect();
        for h in handles {
            h.join().expect("thread should not panic");
        }

        let all = trail.entries(&AuditFilter::all()).unwrap();
        assert_eq!(all.len(), 16);
        // Sequence numbers are gapless and in insertion order.
        for (i, e) in all.iter().enumerate() {
            assert_eq!(e.seq, i as u64 + 1);
        }
    }

    // -----------------------------------------------------------------------
    // Querying
    // -----------------------------------------------------------------------

    #[test]
    fn unfiltered_query_preserves_insertion_order() {
        let trail = InMemoryAuditTrail::new();
        trail
            .append(entry(
                AuditAction::RegistrationSubmitted,
                AuditTargetKind::Registration,
                1,
            ))
            .unwrap();
        trail
            .append(entry(
                AuditAction::TaxIdValidated,
                AuditTargetKind::Registration,
                1,
            ))
            .unwrap();
        trail
            .append(entry(
                AuditAction::VerificationPerformed,
                AuditTargetKind::Organization,
                1,
            ))
            .unwrap();

        let all = trail.entries(&AuditFilter::all()).unwrap();
        let actions: Vec<_> = all.iter().map(|e| e.action).collect();
        assert_eq!(
            actions,
            vec![
                AuditAction::RegistrationSubmitted,
                AuditAction::TaxIdValidated,
                AuditAction::VerificationPerformed,
            ]
        );
    }

    #[test]
    fn filters_compose_with_and() {
        let trail = InMemoryAuditTrail::new();
        trail
            .append(entry(
                AuditAction::RegistrationSubmitted,
                AuditTargetKind::Registration,
                1,
            ))
            .unwrap();
        trail
            .append(entry(
                AuditAction::RegistrationSubmitted,
                AuditTargetKind::Registration,
                2,
            ))
            .unwrap();
        trail
            .append(entry(
                AuditAction::VerificationPerformed,
                AuditTargetKind::Donation,
                2,
            ))
            .unwrap();

        let by_kind = trail
            .entries(&AuditFilter::by_kind(AuditTargetKind::Registration))
            .unwrap();
        assert_eq!(by_kind.len(), 2);

        let by_entity = trail
            .entries(&AuditFilter::by_entity(AuditTargetKind::Registration, 2))
            .unwrap();
        assert_eq!(by_entity.len(), 1);
        assert_eq!(by_entity[0].target_id, 2);

        // Identifier-only filtering spans kinds.
        let by_id = trail.entries(&AuditFilter::by_id(2)).unwrap();
        assert_eq!(by_id.len(), 2);
        assert!(by_id.iter().all(|e| e.target_id == 2));
    }

    // -----------------------------------------------------------------------
    // Directory
    // -----------------------------------------------------------------------

    #[test]
    fn directory_lookup() {
        let dir = InMemoryDirectory::new();
        assert_eq!(dir.lookup(EntityKind::Donation, 1).unwrap(), None);

        dir.insert(
            EntityKind::Donation,
            1,
            EntityRefs::new(Some(format!("0x{}", "ab".repeat(32))), None),
        );
        let refs = dir.lookup(EntityKind::Donation, 1).unwrap().unwrap();
        assert!(refs.ledger_ref.is_some());
        assert!(refs.content_ref.is_none());
    }
}

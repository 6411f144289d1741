//! The verification engine.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use clara_anchor::{validate_content_ref, validate_ledger_ref};
use clara_types::{ActorId, EntityKind};

use crate::directory::ReferenceDirectory;
use crate::entry::{AuditAction, NewAuditEntry};
use crate::error::{AuditError, AuditResult};
use crate::trail::AuditTrail;

/// Outcome of verifying one entity's external references.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub entity_kind: EntityKind,
    pub entity_id: u64,
    pub ledger_valid: bool,
    pub store_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ledger_ref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_ref: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub validation_errors: Vec<String>,
    pub verified_at: DateTime<Utc>,
}

impl VerificationResult {
    /// Returns `true` if both references passed their format checks.
    pub fn is_clean(&self) -> bool {
        self.ledger_valid && self.store_valid
    }
}

/// Verifies cross-references into the distributed ledger and the
/// content-addressed store, and records every verification in the audit
/// trail.
///
/// Verification never mutates the entity being verified; formats are
/// checked textually, exactly as the anchoring boundary defines them.
pub struct AuditEngine {
    trail: Arc<dyn AuditTrail>,
    directory: Arc<dyn ReferenceDirectory>,
}

impl AuditEngine {
    pub fn new(trail: Arc<dyn AuditTrail>, directory: Arc<dyn ReferenceDirectory>) -> Self {
        Self { trail, directory }
    }

    /// Verify the references of the given entity.
    ///
    /// Fails with [`AuditError::EntityNotFound`] if the entity itself does
    /// not exist. Otherwise the verification always completes and appends
    /// exactly one audit entry, successful or not — a failed check is a
    /// finding, not an error.
    pub fn verify(
        &self,
        kind: EntityKind,
        id: u64,
        actor: ActorId,
    ) -> AuditResult<VerificationResult> {
        let refs = self
            .directory
            .lookup(kind, id)?
            .ok_or(AuditError::EntityNotFound { kind, id })?;

        let mut errors = Vec::new();

        let ledger_ref = refs.ledger_ref.unwrap_or_default();
        let ledger_valid = match validate_ledger_ref(&ledger_ref) {
            Ok(()) => true,
            Err(err) => {
                errors.push(format!("ledger reference invalid: {err}"));
                false
            }
        };

        let store_ref = refs.content_ref.unwrap_or_default();
        let store_valid = match validate_content_ref(&store_ref) {
            Ok(()) => true,
            Err(err) => {
                errors.push(format!("content reference invalid: {err}"));
                false
            }
        };

        let comment = if errors.is_empty() {
            "verification completed without findings".to_string()
        } else {
            format!("verification found {} issue(s)", errors.len())
        };

        if !errors.is_empty() {
            tracing::warn!(kind = %kind, id, issues = errors.len(), "verification found issues");
        }

        let mut entry =
            NewAuditEntry::action(actor, AuditAction::VerificationPerformed, kind.into(), id)
                .comment(comment);
        entry.ledger_valid = Some(ledger_valid);
        entry.store_valid = Some(store_valid);
        entry.validation_errors = errors.clone();
        let appended = self.trail.append(entry)?;

        Ok(VerificationResult {
            entity_kind: kind,
            entity_id: id,
            ledger_valid,
            store_valid,
            ledger_ref: (!ledger_ref.is_empty()).then_some(ledger_ref),
            store_ref: (!store_ref.is_empty()).then_some(store_ref),
            validation_errors: appended.validation_errors,
            verified_at: appended.created_at,
        })
    }
}

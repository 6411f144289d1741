//! Audit log entries.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use clara_types::{ActorId, EntityKind, TypeError};

/// Compliance-relevant action recorded in the audit trail.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// A registration was submitted.
    RegistrationSubmitted,
    /// A registration's tax ID passed online validation.
    TaxIdValidated,
    /// Onboarding documents were stored.
    DocumentsUploaded,
    /// A registration was approved and an organization minted.
    RegistrationApproved,
    /// A registration was rejected.
    RegistrationRejected,
    /// The audit engine verified an entity's references.
    VerificationPerformed,
}

impl AuditAction {
    /// Stable wire name of this action.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RegistrationSubmitted => "registration_submitted",
            Self::TaxIdValidated => "tax_id_validated",
            Self::DocumentsUploaded => "documents_uploaded",
            Self::RegistrationApproved => "registration_approved",
            Self::RegistrationRejected => "registration_rejected",
            Self::VerificationPerformed => "verification_performed",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of entity an audit entry targets.
///
/// A superset of [`EntityKind`]: onboarding actions target registrations,
/// which are not themselves verifiable entities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditTargetKind {
    Registration,
    Organization,
    Donation,
    Expense,
}

impl AuditTargetKind {
    /// Stable wire name of this target kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Registration => "registration",
            Self::Organization => "organization",
            Self::Donation => "donation",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for AuditTargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuditTargetKind {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "registration" => Ok(Self::Registration),
            "organization" => Ok(Self::Organization),
            "donation" => Ok(Self::Donation),
            "expense" => Ok(Self::Expense),
            other => Err(TypeError::UnknownEntityKind(other.to_string())),
        }
    }
}

impl From<EntityKind> for AuditTargetKind {
    fn from(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Organization => Self::Organization,
            EntityKind::Donation => Self::Donation,
            EntityKind::Expense => Self::Expense,
        }
    }
}

/// The caller-supplied part of an audit entry; the trail assigns the
/// sequence number and timestamp on append.
#[derive(Clone, Debug, PartialEq)]
pub struct NewAuditEntry {
    pub actor: ActorId,
    pub action: AuditAction,
    pub target_kind: AuditTargetKind,
    pub target_id: u64,
    pub previous_state: Option<String>,
    pub new_state: Option<String>,
    pub comment: Option<String>,
    /// Verification outcomes; only set by the audit engine.
    pub ledger_valid: Option<bool>,
    pub store_valid: Option<bool>,
    pub validation_errors: Vec<String>,
}

impl NewAuditEntry {
    /// An entry with only the mandatory fields set.
    pub fn action(
        actor: ActorId,
        action: AuditAction,
        target_kind: AuditTargetKind,
        target_id: u64,
    ) -> Self {
        Self {
            actor,
            action,
            target_kind,
            target_id,
            previous_state: None,
            new_state: None,
            comment: None,
            ledger_valid: None,
            store_valid: None,
            validation_errors: Vec::new(),
        }
    }

    /// Record a state transition on this entry.
    pub fn transition(mut self, previous: impl Into<String>, new: impl Into<String>) -> Self {
        self.previous_state = Some(previous.into());
        self.new_state = Some(new.into());
        self
    }

    /// Attach a free-text comment.
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// A single immutable entry in the audit trail.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    /// 1-based position in the trail; insertion order is canonical.
    pub seq: u64,
    /// Actor that performed the action. `ActorId(0)` is the system actor.
    pub actor: ActorId,
    pub action: AuditAction,
    pub target_kind: AuditTargetKind,
    pub target_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ledger_valid: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_valid: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub validation_errors: Vec<String>,
    pub created_at: DateTime<Utc>,
}

//! Organization onboarding records.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::id::{ActorId, RegistrationId};

/// Lifecycle state of an onboarding attempt.
///
/// Transitions: `Pending → Validating → Approved`, with `Rejected`
/// reachable from both `Pending` and `Validating`. `Approved` and
/// `Rejected` are terminal; no state ever re-opens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStatus {
    /// Submitted, awaiting tax-ID validation.
    Pending,
    /// Tax ID confirmed against the external registry.
    Validating,
    /// Approved and minted as an active organization (terminal).
    Approved,
    /// Rejected by an administrator (terminal).
    Rejected,
}

impl RegistrationStatus {
    /// Stable wire name of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Validating => "validating",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Returns `true` if no further transition is possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }
}

impl fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RegistrationStatus {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "validating" => Ok(Self::Validating),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(TypeError::UnknownStatus(other.to_string())),
        }
    }
}

/// A request to register a new organization.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegistrationRequest {
    pub name: String,
    pub description: String,
    pub category: String,
    pub tax_id: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub responsible_id: ActorId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
}

/// One organization onboarding attempt.
///
/// Created on submission and mutated in place by the workflow's validate,
/// upload, approve, and reject operations. Registrations are never
/// deleted: rejected and approved records are retained for audit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Registration {
    pub id: RegistrationId,
    pub name: String,
    pub description: String,
    pub category: String,
    pub tax_id: String,
    /// Outcome of the checksum validation run at submission time.
    pub tax_id_valid: bool,
    /// Human-readable message from the checksum validator.
    pub tax_id_message: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub responsible_id: ActorId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    /// Content-store reference of uploaded documents. Populated by the
    /// upload operation; must be present before approval.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documents_ref: Option<String>,
    /// Ledger reference. Populated if and only if status is `Approved`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ledger_ref: Option<String>,
    pub status: RegistrationStatus,
    /// Free-text administrator comments (approval notes or rejection
    /// reason).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_comments: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Registration {
    /// Returns `true` if documents were uploaded for this registration.
    pub fn has_documents(&self) -> bool {
        self.documents_ref.as_deref().is_some_and(|r| !r.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_terminality() {
        assert!(!RegistrationStatus::Pending.is_terminal());
        assert!(!RegistrationStatus::Validating.is_terminal());
        assert!(RegistrationStatus::Approved.is_terminal());
        assert!(RegistrationStatus::Rejected.is_terminal());
    }

    #[test]
    fn status_round_trips_through_str() {
        for status in [
            RegistrationStatus::Pending,
            RegistrationStatus::Validating,
            RegistrationStatus::Approved,
            RegistrationStatus::Rejected,
        ] {
            assert_eq!(
                status.as_str().parse::<RegistrationStatus>().unwrap(),
                status
            );
        }
        assert!("archived".parse::<RegistrationStatus>().is_err());
    }

    #[test]
    fn has_documents_requires_non_empty_ref() {
        let mut reg = Registration {
            id: RegistrationId::new(1),
            name: "Instituto Esperança".into(),
            description: "Community education".into(),
            category: "education".into(),
            tax_id: "11222333000181".into(),
            tax_id_valid: true,
            tax_id_message: "tax ID valid".into(),
            email: "contact@esperanca.org".into(),
            phone: "+55 11 99999-0000".into(),
            address: "São Paulo".into(),
            responsible_id: ActorId::new(3),
            logo_url: None,
            documents_ref: None,
            ledger_ref: None,
            status: RegistrationStatus::Pending,
            admin_comments: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(!reg.has_documents());
        reg.documents_ref = Some(String::new());
        assert!(!reg.has_documents());
        reg.documents_ref = Some("QmAbc".into());
        assert!(reg.has_documents());
    }
}

//! Auditable entities.
//!
//! Donations and expenses are owned by their own subsystems; here they
//! exist only as [`EntityKind`] variants so the audit engine can verify
//! their external references.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::id::{ActorId, OrganizationId};

/// Closed enumeration of entity kinds the audit engine can verify.
///
/// Dispatch over entity kinds is exhaustive at compile time; an unknown
/// kind can only occur while parsing untrusted input at the HTTP boundary,
/// where it surfaces as [`TypeError::UnknownEntityKind`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// An approved nonprofit organization.
    Organization,
    /// An incoming donation.
    Donation,
    /// Downstream spending of donated funds.
    Expense,
}

impl EntityKind {
    /// Stable wire name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Organization => "organization",
            Self::Donation => "donation",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "organization" => Ok(Self::Organization),
            "donation" => Ok(Self::Donation),
            "expense" => Ok(Self::Expense),
            other => Err(TypeError::UnknownEntityKind(other.to_string())),
        }
    }
}

/// An approved, active organization.
///
/// Minted exclusively by a successful approval transition; identity fields
/// are copied from the originating [`Registration`](crate::Registration)
/// along with the freshly assigned ledger reference.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub id: OrganizationId,
    pub name: String,
    pub description: String,
    pub category: String,
    pub tax_id: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    /// Content-store reference of the onboarding documents.
    pub documents_ref: String,
    /// Ledger reference recorded at approval time.
    pub ledger_ref: String,
    pub responsible_id: ActorId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_kind_round_trips_through_str() {
        for kind in [
            EntityKind::Organization,
            EntityKind::Donation,
            EntityKind::Expense,
        ] {
            assert_eq!(kind.as_str().parse::<EntityKind>().unwrap(), kind);
        }
    }

    #[test]
    fn unknown_entity_kind_is_an_error() {
        let err = "ngo".parse::<EntityKind>().unwrap_err();
        assert_eq!(err, TypeError::UnknownEntityKind("ngo".to_string()));
    }

    #[test]
    fn entity_kind_serde_uses_snake_case() {
        let json = serde_json::to_string(&EntityKind::Organization).unwrap();
        assert_eq!(json, "\"organization\"");
    }
}

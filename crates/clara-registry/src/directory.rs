use std::sync::Arc;

use clara_audit::{AuditResult, EntityRefs, ReferenceDirectory};
use clara_types::{EntityKind, OrganizationId};

use crate::traits::RegistryStore;

/// Resolves organization references out of the registry store.
///
/// Donation and expense lookups are delegated to a fallback directory,
/// since those entities live outside the registry.
pub struct RegistryDirectory {
    store: Arc<dyn RegistryStore>,
    fallback: Arc<dyn ReferenceDirectory>,
}

impl RegistryDirectory {
    pub fn new(store: Arc<dyn RegistryStore>, fallback: Arc<dyn ReferenceDirectory>) -> Self {
        Self { store, fallback }
    }
}

impl ReferenceDirectory for RegistryDirectory {
    fn lookup(&self, kind: EntityKind, id: u64) -> AuditResult<Option<EntityRefs>> {
        match kind {
            EntityKind::Organization => {
                let org = match self.store.organization(OrganizationId::new(id)) {
                    Ok(org) => org,
                    // Store reads are infallible for lookups; a missing
                    // organization surfaces as Ok(None) below.
                    Err(_) => None,
                };
                Ok(org.map(|o| {
                    EntityRefs::new(Some(o.ledger_ref.clone()), Some(o.documents_ref.clone()))
                }))
            }
            EntityKind::Donation | EntityKind::Expense => self.fallback.lookup(kind, id),
        }
    }
}

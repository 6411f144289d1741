use std::sync::RwLock;

use clara_taxid::normalize;
use clara_types::{Organization, OrganizationId, Registration, RegistrationId};

use crate::error::{RegistryError, RegistryResult};
use crate::traits::RegistryStore;

/// In-memory registry store.
///
/// Both collections live behind one `RwLock`, so approval's combined
/// registration-update + organization-insert is a single write-lock scope
/// and readers can never observe one without the other.
pub struct InMemoryRegistry {
    inner: RwLock<RegistryState>,
}

#[derive(Default)]
struct RegistryState {
    registrations: Vec<Registration>,
    organizations: Vec<Organization>,
}

impl InMemoryRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(RegistryState::default()),
        }
    }
}

impl Default for InMemoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Compare two stored tax IDs in normalized (bare-digit) form.
fn same_tax_id(a: &str, b: &str) -> bool {
    match (normalize(a), normalize(b)) {
        (Some(a), Some(b)) => a == b,
        // Malformed identifiers fall back to literal comparison.
        _ => a == b,
    }
}

impl RegistryStore for InMemoryRegistry {
    fn insert_registration(
        &self,
        tax_id: &str,
        build: &dyn Fn(RegistrationId) -> Registration,
    ) -> RegistryResult<Registration> {
        let mut state = self.inner.write().expect("lock poisoned");

        let taken = state
            .registrations
            .iter()
            .map(|r| r.tax_id.as_str())
            .chain(state.organizations.iter().map(|o| o.tax_id.as_str()))
            .any(|existing| same_tax_id(existing, tax_id));
        if taken {
            return Err(RegistryError::DuplicateTaxId);
        }

        let id = RegistrationId::new(state.registrations.len() as u64 + 1);
        let registration = build(id);
        state.registrations.push(registration.clone());
        Ok(registration)
    }

    fn mutate_registration(
        &self,
        id: RegistrationId,
        mutate: &mut dyn FnMut(&mut Registration) -> RegistryResult<()>,
    ) -> RegistryResult<Registration> {
        let mut state = self.inner.write().expect("lock poisoned");
        let slot = state
            .registrations
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(RegistryError::NotFound)?;

        // Mutate a scratch copy; commit only when the closure succeeds.
        let mut scratch = slot.clone();
        mutate(&mut scratch)?;
        *slot = scratch.clone();
        Ok(scratch)
    }

    fn commit_approval(
        &self,
        id: RegistrationId,
        approve: &mut dyn FnMut(
            &mut Registration,
            OrganizationId,
        ) -> RegistryResult<Organization>,
    ) -> RegistryResult<(Registration, Organization)> {
        let mut state = self.inner.write().expect("lock poisoned");
        let org_id = OrganizationId::new(state.organizations.len() as u64 + 1);

        let slot_index = state
            .registrations
            .iter()
            .position(|r| r.id == id)
            .ok_or(RegistryError::NotFound)?;

        let mut scratch = state.registrations[slot_index].clone();
        let organization = approve(&mut scratch, org_id)?;

        state.registrations[slot_index] = scratch.clone();
        state.organizations.push(organization.clone());
        Ok((scratch, organization))
    }

    fn registration(&self, id: RegistrationId) -> RegistryResult<Option<Registration>> {
        let state = self.inner.read().expect("lock poisoned");
        Ok(state.registrations.iter().find(|r| r.id == id).cloned())
    }

    fn registrations_by_tax_id(&self, tax_id: &str) -> RegistryResult<Vec<Registration>> {
        let state = self.inner.read().expect("lock poisoned");
        Ok(state
            .registrations
            .iter()
            .filter(|r| same_tax_id(&r.tax_id, tax_id))
            .cloned()
            .collect())
    }

    fn registrations(&self) -> RegistryResult<Vec<Registration>> {
        let state = self.inner.read().expect("lock poisoned");
        Ok(state.registrations.clone())
    }

    fn organization(&self, id: OrganizationId) -> RegistryResult<Option<Organization>> {
        let state = self.inner.read().expect("lock poisoned");
        Ok(state.organizations.iter().find(|o| o.id == id).cloned())
    }

    fn organizations(&self) -> RegistryResult<Vec<Organization>> {
        let state = self.inner.read().expect("lock poisoned");
        Ok(state.organizations.clone())
    }
}

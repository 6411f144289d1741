use clara_types::{Organization, OrganizationId, Registration, RegistrationId};

use crate::error::RegistryResult;

/// Storage capability for the onboarding registry.
///
/// One store owns both collections — registrations and the organizations
/// minted from them — because approval must commit a registration update
/// and an organization insert as a single atomic step: any reader sees
/// both or neither.
///
/// Implementations must uphold:
/// - Registrations are never deleted; rejected and approved records are
///   retained for audit.
/// - Identifiers are assigned sequentially (1-based) in insertion order.
/// - Each closure-taking method runs its closure inside the store's write
///   lock; when the closure fails nothing is committed.
pub trait RegistryStore: Send + Sync {
    /// Insert a new registration built by `build` from the assigned
    /// identifier.
    ///
    /// Fails with `DuplicateTaxId` if the normalized tax ID already
    /// belongs to any registration or active organization. The uniqueness
    /// check and the insert are one critical section.
    fn insert_registration(
        &self,
        tax_id: &str,
        build: &dyn Fn(RegistrationId) -> Registration,
    ) -> RegistryResult<Registration>;

    /// Run a fallible read-modify-write on one registration.
    ///
    /// Returns `NotFound` if absent. The closure receives a scratch copy;
    /// the store commits it only when the closure returns `Ok`.
    fn mutate_registration(
        &self,
        id: RegistrationId,
        mutate: &mut dyn FnMut(&mut Registration) -> RegistryResult<()>,
    ) -> RegistryResult<Registration>;

    /// Approve a registration and mint its organization in one atomic
    /// commit.
    ///
    /// The closure receives the scratch registration and the organization
    /// identifier the store will assign, and returns the organization to
    /// mint. On `Ok` the store persists the updated registration and the
    /// new organization together; on `Err` neither.
    fn commit_approval(
        &self,
        id: RegistrationId,
        approve: &mut dyn FnMut(
            &mut Registration,
            OrganizationId,
        ) -> RegistryResult<Organization>,
    ) -> RegistryResult<(Registration, Organization)>;

    /// Fetch a registration by identifier.
    fn registration(&self, id: RegistrationId) -> RegistryResult<Option<Registration>>;

    /// All registrations holding the given normalized tax ID.
    fn registrations_by_tax_id(&self, tax_id: &str) -> RegistryResult<Vec<Registration>>;

    /// All registrations in insertion order.
    fn registrations(&self) -> RegistryResult<Vec<Registration>>;

    /// Fetch an organization by identifier.
    fn organization(&self, id: OrganizationId) -> RegistryResult<Option<Organization>>;

    /// All organizations in insertion order.
    fn organizations(&self) -> RegistryResult<Vec<Organization>>;
}

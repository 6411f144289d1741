//! The onboarding workflow service.

use std::sync::Arc;

use chrono::Utc;

use clara_anchor::{ContentStore, LedgerAnchor};
use clara_audit::{AuditAction, AuditTargetKind, AuditTrail, NewAuditEntry};
use clara_taxid::validate;
use clara_types::{
    ActorId, Organization, OrganizationId, Registration, RegistrationId, RegistrationRequest,
    RegistrationStatus,
};

use crate::error::{RegistryError, RegistryResult};
use crate::traits::RegistryStore;

/// Approval preconditions: non-terminal status, valid tax ID, documents
/// present.
fn ensure_approvable(registration: &Registration) -> RegistryResult<()> {
    if registration.status.is_terminal() {
        return Err(RegistryError::PreconditionFailed(format!(
            "registration already {}",
            registration.status
        )));
    }
    if !registration.tax_id_valid {
        return Err(RegistryError::PreconditionFailed(
            "tax ID has not been validated".to_string(),
        ));
    }
    if !registration.has_documents() {
        return Err(RegistryError::PreconditionFailed(
            "documents have not been uploaded".to_string(),
        ));
    }
    Ok(())
}

/// Drives registrations through the onboarding state machine.
///
/// All state lives in the [`RegistryStore`]; the workflow itself is
/// stateless and safe to share across concurrent callers.
pub struct RegistrationWorkflow {
    store: Arc<dyn RegistryStore>,
    trail: Arc<dyn AuditTrail>,
    ledger: Arc<dyn LedgerAnchor>,
    documents: Arc<dyn ContentStore>,
}

impl RegistrationWorkflow {
    pub fn new(
        store: Arc<dyn RegistryStore>,
        trail: Arc<dyn AuditTrail>,
        ledger: Arc<dyn LedgerAnchor>,
        documents: Arc<dyn ContentStore>,
    ) -> Self {
        Self {
            store,
            trail,
            ledger,
            documents,
        }
    }

    /// Submit a new registration.
    ///
    /// The tax-ID checksum runs immediately but a failed checksum does not
    /// block submission: the registration is stored as `Pending` with the
    /// validator's verdict recorded, and the checksum becomes a hard
    /// precondition later in the workflow. Fails with `DuplicateTaxId` if
    /// the tax ID is already taken.
    pub fn register(&self, request: RegistrationRequest) -> RegistryResult<Registration> {
        let check = validate(&request.tax_id);
        let now = Utc::now();

        let registration = self.store.insert_registration(&request.tax_id, &|id| {
            Registration {
                id,
                name: request.name.clone(),
                description: request.description.clone(),
                category: request.category.clone(),
                tax_id: request.tax_id.clone(),
                tax_id_valid: check.valid,
                tax_id_message: check.message.clone(),
                email: request.email.clone(),
                phone: request.phone.clone(),
                address: request.address.clone(),
                responsible_id: request.responsible_id,
                logo_url: request.logo_url.clone(),
                documents_ref: None,
                ledger_ref: None,
                status: RegistrationStatus::Pending,
                admin_comments: None,
                created_at: now,
                updated_at: now,
            }
        })?;

        tracing::info!(
            id = %registration.id,
            name = %registration.name,
            tax_id_valid = registration.tax_id_valid,
            "registration submitted"
        );
        self.trail.append(
            NewAuditEntry::action(
                ActorId::SYSTEM,
                AuditAction::RegistrationSubmitted,
                AuditTargetKind::Registration,
                registration.id.value(),
            )
            .transition("", RegistrationStatus::Pending.as_str())
            .comment(format!(
                "registration submitted: {} (tax ID {})",
                registration.name, registration.tax_id
            )),
        )?;

        Ok(registration)
    }

    /// Confirm the registration's tax ID against the national registry.
    ///
    /// No external service is wired in; the check re-affirms the stored
    /// checksum verdict, failing with `InvalidTaxId` (carrying the stored
    /// message) when the checksum failed at submission. On success the
    /// registration transitions `Pending → Validating`.
    pub fn validate_tax_id(&self, id: RegistrationId) -> RegistryResult<Registration> {
        let mut previous = RegistrationStatus::Pending;
        let registration = self.store.mutate_registration(id, &mut |r| {
            if r.status.is_terminal() {
                return Err(RegistryError::PreconditionFailed(format!(
                    "registration already {}",
                    r.status
                )));
            }
            if !r.tax_id_valid {
                return Err(RegistryError::InvalidTaxId(r.tax_id_message.clone()));
            }
            previous = r.status;
            r.status = RegistrationStatus::Validating;
            r.tax_id_message = "tax ID verified online and valid".to_string();
            r.updated_at = Utc::now();
            Ok(())
        })?;

        tracing::info!(id = %id, "tax ID validated");
        self.trail.append(
            NewAuditEntry::action(
                ActorId::SYSTEM,
                AuditAction::TaxIdValidated,
                AuditTargetKind::Registration,
                id.value(),
            )
            .transition(previous.as_str(), registration.status.as_str()),
        )?;

        Ok(registration)
    }

    /// Store onboarding documents and attach their content reference.
    ///
    /// Requires a valid tax ID; does not change the lifecycle status.
    pub fn upload_documents(
        &self,
        id: RegistrationId,
        file_bytes: &[u8],
    ) -> RegistryResult<Registration> {
        // Cheap existence/precondition probe before paying for storage.
        let current = self
            .store
            .registration(id)?
            .ok_or(RegistryError::NotFound)?;
        if !current.tax_id_valid {
            return Err(RegistryError::PreconditionFailed(
                "tax ID must be validated first".to_string(),
            ));
        }

        let reference = self.documents.store(file_bytes)?;

        let registration = self.store.mutate_registration(id, &mut |r| {
            if !r.tax_id_valid {
                return Err(RegistryError::PreconditionFailed(
                    "tax ID must be validated first".to_string(),
                ));
            }
            r.documents_ref = Some(reference.clone());
            r.updated_at = Utc::now();
            Ok(())
        })?;

        tracing::info!(id = %id, reference = %reference, "documents stored");
        self.trail.append(
            NewAuditEntry::action(
                ActorId::SYSTEM,
                AuditAction::DocumentsUploaded,
                AuditTargetKind::Registration,
                id.value(),
            )
            .comment(format!("documents stored: {reference}")),
        )?;

        Ok(registration)
    }

    /// Approve a registration, minting its organization.
    ///
    /// Preconditions: valid tax ID and uploaded documents; terminal
    /// registrations cannot be approved. Assigns a fresh ledger reference,
    /// sets the registration to `Approved`, and publishes the organization
    /// — one atomic commit.
    pub fn approve(
        &self,
        id: RegistrationId,
        actor: ActorId,
        comments: &str,
    ) -> RegistryResult<Organization> {
        // Preconditions first, so a doomed approval never records anything
        // on the external ledger.
        let current = self
            .store
            .registration(id)?
            .ok_or(RegistryError::NotFound)?;
        ensure_approvable(&current)?;

        let ledger_ref = self.ledger.mint_reference()?;
        let mut previous = RegistrationStatus::Validating;

        let (registration, organization) =
            self.store.commit_approval(id, &mut |r, org_id| {
                // Re-checked under the store's write lock.
                ensure_approvable(r)?;

                previous = r.status;
                let now = Utc::now();
                r.status = RegistrationStatus::Approved;
                r.ledger_ref = Some(ledger_ref.clone());
                r.admin_comments = (!comments.is_empty()).then(|| comments.to_string());
                r.updated_at = now;

                Ok(Organization {
                    id: org_id,
                    name: r.name.clone(),
                    description: r.description.clone(),
                    category: r.category.clone(),
                    tax_id: r.tax_id.clone(),
                    email: r.email.clone(),
                    phone: r.phone.clone(),
                    address: r.address.clone(),
                    logo_url: r.logo_url.clone(),
                    documents_ref: r.documents_ref.clone().unwrap_or_default(),
                    ledger_ref: ledger_ref.clone(),
                    responsible_id: r.responsible_id,
                    created_at: now,
                    updated_at: now,
                })
            })?;

        tracing::info!(
            registration = %registration.id,
            organization = %organization.id,
            ledger_ref = %organization.ledger_ref,
            "registration approved"
        );
        self.trail.append(
            NewAuditEntry::action(
                actor,
                AuditAction::RegistrationApproved,
                AuditTargetKind::Organization,
                organization.id.value(),
            )
            .transition(previous.as_str(), RegistrationStatus::Approved.as_str())
            .comment(format!(
                "registration {} approved, ledger reference {}",
                registration.id, organization.ledger_ref
            )),
        )?;

        Ok(organization)
    }

    /// Reject a registration, recording the reason.
    ///
    /// Allowed from `Pending` or `Validating`; terminal registrations stay
    /// as they are.
    pub fn reject(
        &self,
        id: RegistrationId,
        actor: ActorId,
        reason: &str,
    ) -> RegistryResult<Registration> {
        let mut previous = RegistrationStatus::Pending;
        let registration = self.store.mutate_registration(id, &mut |r| {
            if r.status.is_terminal() {
                return Err(RegistryError::PreconditionFailed(format!(
                    "registration already {}",
                    r.status
                )));
            }
            previous = r.status;
            r.status = RegistrationStatus::Rejected;
            r.admin_comments = Some(reason.to_string());
            r.updated_at = Utc::now();
            Ok(())
        })?;

        tracing::info!(id = %id, reason, "registration rejected");
        self.trail.append(
            NewAuditEntry::action(
                actor,
                AuditAction::RegistrationRejected,
                AuditTargetKind::Registration,
                id.value(),
            )
            .transition(previous.as_str(), RegistrationStatus::Rejected.as_str())
            .comment(reason),
        )?;

        Ok(registration)
    }

    // -- Read operations ----------------------------------------------------

    /// Fetch a registration; fails with `NotFound` when absent.
    pub fn get(&self, id: RegistrationId) -> RegistryResult<Registration> {
        self.store.registration(id)?.ok_or(RegistryError::NotFound)
    }

    /// All registrations holding the given tax ID.
    pub fn get_by_tax_id(&self, tax_id: &str) -> RegistryResult<Vec<Registration>> {
        self.store.registrations_by_tax_id(tax_id)
    }

    /// All registrations in insertion order.
    pub fn list(&self) -> RegistryResult<Vec<Registration>> {
        self.store.registrations()
    }

    /// Fetch an approved organization; fails with `NotFound` when absent.
    pub fn organization(&self, id: OrganizationId) -> RegistryResult<Organization> {
        self.store.organization(id)?.ok_or(RegistryError::NotFound)
    }

    /// All approved organizations in insertion order.
    pub fn organizations(&self) -> RegistryResult<Vec<Organization>> {
        self.store.organizations()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clara_audit::{AuditFilter, InMemoryAuditTrail};
    use clara_anchor::{SimulatedContentStore, SimulatedLedger};
    use clara_anchor::{validate_content_ref, validate_ledger_ref};

    use crate::memory::InMemoryRegistry;

    const VALID_TAX_ID: &str = "11222333000181";
    const INVALID_TAX_ID: &str = "11222333000199";

    fn workflow() -> (RegistrationWorkflow, Arc<InMemoryAuditTrail>) {
        let trail = Arc::new(InMemoryAuditTrail::new());
        let workflow = RegistrationWorkflow::new(
            Arc::new(InMemoryRegistry::new()),
            trail.clone(),
            Arc::new(SimulatedLedger::new()),
            Arc::new(SimulatedContentStore::new()),
        );
        (workflow, trail)
    }

    fn request(tax_id: &str) -> RegistrationRequest {
        RegistrationRequest {
            name: "Instituto Esperança".into(),
            description: "Community education programs".into(),
            category: "education".into(),
            tax_id: tax_id.to_string(),
            email: "contact@esperanca.org".into(),
            phone: "+55 11 99999-0000".into(),
            address: "Rua das Flores 100, São Paulo".into(),
            responsible_id: ActorId::new(3),
            logo_url: None,
        }
    }

    // -----------------------------------------------------------------------
    // Registration
    // -----------------------------------------------------------------------

    #[test]
    fn register_stores_pending_with_checksum_verdict() {
        let (wf, _) = workflow();
        let reg = wf.register(request(VALID_TAX_ID)).unwrap();
        assert_eq!(reg.status, RegistrationStatus::Pending);
        assert!(reg.tax_id_valid);
        assert_eq!(reg.tax_id_message, "tax ID valid");
    }

    #[test]
    fn invalid_checksum_does_not_block_submission() {
        let (wf, _) = workflow();
        let reg = wf.register(request(INVALID_TAX_ID)).unwrap();
        assert_eq!(reg.status, RegistrationStatus::Pending);
        assert!(!reg.tax_id_valid);
    }

    #[test]
    fn duplicate_tax_id_rejected() {
        let (wf, _) = workflow();
        wf.register(request(VALID_TAX_ID)).unwrap();
        let err = wf.register(request(VALID_TAX_ID)).unwrap_err();
        assert_eq!(err, RegistryError::DuplicateTaxId);
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    #[test]
    fn validate_transitions_to_validating() {
        let (wf, _) = workflow();
        let reg = wf.register(request(VALID_TAX_ID)).unwrap();
        let validated = wf.validate_tax_id(reg.id).unwrap();
        assert_eq!(validated.status, RegistrationStatus::Validating);
    }

    #[test]
    fn validate_surfaces_stored_checksum_message() {
        let (wf, _) = workflow();
        let reg = wf.register(request(INVALID_TAX_ID)).unwrap();
        let err = wf.validate_tax_id(reg.id).unwrap_err();
        match err {
            RegistryError::InvalidTaxId(msg) => {
                assert_eq!(msg, "tax ID invalid: second check digit incorrect")
            }
            other => panic!("expected InvalidTaxId, got {other:?}"),
        }
        // Status unchanged.
        assert_eq!(wf.get(reg.id).unwrap().status, RegistrationStatus::Pending);
    }

    #[test]
    fn validate_missing_registration_is_not_found() {
        let (wf, _) = workflow();
        let err = wf.validate_tax_id(RegistrationId::new(404)).unwrap_err();
        assert_eq!(err, RegistryError::NotFound);
    }

    // -----------------------------------------------------------------------
    // Documents
    // -----------------------------------------------------------------------

    #[test]
    fn upload_assigns_content_reference() {
        let (wf, _) = workflow();
        let reg = wf.register(request(VALID_TAX_ID)).unwrap();
        let uploaded = wf.upload_documents(reg.id, b"articles of incorporation").unwrap();
        let reference = uploaded.documents_ref.expect("reference assigned");
        validate_content_ref(&reference).unwrap();
        // Upload does not advance the state machine.
        assert_eq!(uploaded.status, RegistrationStatus::Pending);
    }

    #[test]
    fn upload_requires_valid_tax_id() {
        let (wf, _) = workflow();
        let reg = wf.register(request(INVALID_TAX_ID)).unwrap();
        let err = wf.upload_documents(reg.id, b"docs").unwrap_err();
        assert_eq!(
            err,
            RegistryError::PreconditionFailed("tax ID must be validated first".into())
        );
    }

    // -----------------------------------------------------------------------
    // Approval
    // -----------------------------------------------------------------------

    fn advance_to_approvable(wf: &RegistrationWorkflow) -> RegistrationId {
        let reg = wf.register(request(VALID_TAX_ID)).unwrap();
        wf.validate_tax_id(reg.id).unwrap();
        wf.upload_documents(reg.id, b"documents").unwrap();
        reg.id
    }

    #[test]
    fn approve_mints_organization_with_ledger_reference() {
        let (wf, _) = workflow();
        let id = advance_to_approvable(&wf);

        let org = wf.approve(id, ActorId::new(2), "all in order").unwrap();
        validate_ledger_ref(&org.ledger_ref).unwrap();
        assert_eq!(org.id, OrganizationId::new(1));
        assert_eq!(org.tax_id, VALID_TAX_ID);

        // Both sides of the commit are visible.
        let reg = wf.get(id).unwrap();
        assert_eq!(reg.status, RegistrationStatus::Approved);
        assert_eq!(reg.ledger_ref.as_deref(), Some(org.ledger_ref.as_str()));
        assert_eq!(wf.organizations().unwrap().len(), 1);
    }

    #[test]
    fn approve_before_upload_fails() {
        let (wf, _) = workflow();
        let reg = wf.register(request(VALID_TAX_ID)).unwrap();
        wf.validate_tax_id(reg.id).unwrap();

        let err = wf.approve(reg.id, ActorId::new(2), "").unwrap_err();
        assert_eq!(
            err,
            RegistryError::PreconditionFailed("documents have not been uploaded".into())
        );
        assert!(wf.organizations().unwrap().is_empty());
    }

    #[test]
    fn approve_is_terminal() {
        let (wf, _) = workflow();
        let id = advance_to_approvable(&wf);
        wf.approve(id, ActorId::new(2), "").unwrap();

        let err = wf.approve(id, ActorId::new(2), "").unwrap_err();
        assert!(matches!(err, RegistryError::PreconditionFailed(_)));
        // No second organization minted.
        assert_eq!(wf.organizations().unwrap().len(), 1);
    }

    // -----------------------------------------------------------------------
    // Rejection
    // -----------------------------------------------------------------------

    #[test]
    fn reject_from_pending_records_reason() {
        let (wf, _) = workflow();
        let reg = wf.register(request(VALID_TAX_ID)).unwrap();
        let rejected = wf
            .reject(reg.id, ActorId::new(2), "incomplete filing")
            .unwrap();
        assert_eq!(rejected.status, RegistrationStatus::Rejected);
        assert_eq!(rejected.admin_comments.as_deref(), Some("incomplete filing"));
    }

    #[test]
    fn rejected_registration_is_retained() {
        let (wf, _) = workflow();
        let reg = wf.register(request(VALID_TAX_ID)).unwrap();
        wf.reject(reg.id, ActorId::new(2), "fraud suspicion").unwrap();
        assert_eq!(wf.list().unwrap().len(), 1);
    }

    #[test]
    fn failed_approvals_mint_nothing() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        use clara_anchor::AnchorResult;

        struct CountingLedger {
            mints: AtomicUsize,
        }

        impl LedgerAnchor for CountingLedger {
            fn mint_reference(&self) -> AnchorResult<String> {
                self.mints.fetch_add(1, Ordering::SeqCst);
                SimulatedLedger::new().mint_reference()
            }
        }

        let ledger = Arc::new(CountingLedger {
            mints: AtomicUsize::new(0),
        });
        let wf = RegistrationWorkflow::new(
            Arc::new(InMemoryRegistry::new()),
            Arc::new(InMemoryAuditTrail::new()),
            ledger.clone(),
            Arc::new(SimulatedContentStore::new()),
        );

        // Missing registration.
        assert_eq!(
            wf.approve(RegistrationId::new(404), ActorId::new(2), "")
                .unwrap_err(),
            RegistryError::NotFound
        );
        assert_eq!(ledger.mints.load(Ordering::SeqCst), 0);

        // Documents not uploaded.
        let reg = wf.register(request(VALID_TAX_ID)).unwrap();
        wf.validate_tax_id(reg.id).unwrap();
        assert!(matches!(
            wf.approve(reg.id, ActorId::new(2), "").unwrap_err(),
            RegistryError::PreconditionFailed(_)
        ));
        assert_eq!(ledger.mints.load(Ordering::SeqCst), 0);

        // Only a passing approval reaches the ledger.
        wf.upload_documents(reg.id, b"documents").unwrap();
        wf.approve(reg.id, ActorId::new(2), "").unwrap();
        assert_eq!(ledger.mints.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn rejected_registration_cannot_be_approved() {
        let (wf, _) = workflow();
        let id = advance_to_approvable(&wf);
        wf.reject(id, ActorId::new(2), "changed our mind").unwrap();
        let err = wf.approve(id, ActorId::new(2), "").unwrap_err();
        assert!(matches!(err, RegistryError::PreconditionFailed(_)));
    }

    // -----------------------------------------------------------------------
    // Lookups
    // -----------------------------------------------------------------------

    #[test]
    fn lookup_by_tax_id_ignores_formatting() {
        let (wf, _) = workflow();
        let reg = wf.register(request(VALID_TAX_ID)).unwrap();

        let bare = wf.get_by_tax_id(VALID_TAX_ID).unwrap();
        let formatted = wf.get_by_tax_id("11.222.333/0001-81").unwrap();
        assert_eq!(bare.len(), 1);
        assert_eq!(formatted.len(), 1);
        assert_eq!(bare[0].id, reg.id);
        assert_eq!(formatted[0].id, reg.id);

        assert!(wf.get_by_tax_id("99888777000166").unwrap().is_empty());
    }

    // -----------------------------------------------------------------------
    // Audit trail ordering
    // -----------------------------------------------------------------------

    #[test]
    fn workflow_actions_appear_in_order() {
        let (wf, trail) = workflow();
        let id = advance_to_approvable(&wf);
        wf.approve(id, ActorId::new(2), "").unwrap();

        let all = trail.entries(&AuditFilter::all()).unwrap();
        let actions: Vec<_> = all.iter().map(|e| e.action).collect();
        assert_eq!(
            actions,
            vec![
                AuditAction::RegistrationSubmitted,
                AuditAction::TaxIdValidated,
                AuditAction::DocumentsUploaded,
                AuditAction::RegistrationApproved,
            ]
        );

        // Filtering narrows to a strict subset preserving relative order.
        let registration_entries = trail
            .entries(&AuditFilter::by_kind(AuditTargetKind::Registration))
            .unwrap();
        assert_eq!(registration_entries.len(), 3);
        assert!(registration_entries
            .windows(2)
            .all(|w| w[0].seq < w[1].seq));
    }
}

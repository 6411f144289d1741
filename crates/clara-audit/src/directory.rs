use clara_types::EntityKind;

use crate::error::AuditResult;

/// The ledger and content-store references attached to one entity.
///
/// Either reference may be absent: a donation without a receipt, or an
/// expense never anchored on the ledger. Absence is not an error at this
/// level — the verification engine reports it as a failed format check.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EntityRefs {
    pub ledger_ref: Option<String>,
    pub content_ref: Option<String>,
}

impl EntityRefs {
    pub fn new(
        ledger_ref: impl Into<Option<String>>,
        content_ref: impl Into<Option<String>>,
    ) -> Self {
        Self {
            ledger_ref: ledger_ref.into(),
            content_ref: content_ref.into(),
        }
    }
}

/// Read-only resolution of an entity's external references.
///
/// The verification engine dispatches on the closed [`EntityKind`] enum
/// and never touches entity storage directly; callers compose a directory
/// over whatever repositories own the entities.
pub trait ReferenceDirectory: Send + Sync {
    /// Resolve the references of the given entity.
    ///
    /// Returns `Ok(None)` if the entity itself does not exist.
    fn lookup(&self, kind: EntityKind, id: u64) -> AuditResult<Option<EntityRefs>>;
}

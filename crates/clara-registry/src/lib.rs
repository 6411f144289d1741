//! Organization onboarding workflow.
//!
//! A registration moves through a small state machine:
//!
//! ```text
//! Pending ──► Validating ──► Approved
//!    │             │
//!    └─────────────┴───────► Rejected
//! ```
//!
//! `Approved` and `Rejected` are terminal. Approval is the only path that
//! mints an [`Organization`](clara_types::Organization): it assigns a
//! ledger reference and publishes the organization atomically with the
//! registration update. Every transition appends an entry to the audit
//! trail.
//!
//! Storage sits behind the [`RegistryStore`] capability so a persistent
//! engine can replace the in-memory implementation without touching
//! workflow logic.

pub mod directory;
pub mod error;
pub mod memory;
pub mod traits;
pub mod workflow;

pub use directory::RegistryDirectory;
pub use error::{RegistryError, RegistryResult};
pub use memory::InMemoryRegistry;
pub use traits::RegistryStore;
pub use workflow::RegistrationWorkflow;

//! External anchoring boundary for the Clara platform.
//!
//! Clara records compliance-relevant facts against two external systems it
//! does not implement: a distributed ledger and a content-addressed file
//! store. Both are opaque collaborators — the only contract this crate
//! assumes is the textual shape of the references they hand back.
//!
//! - [`LedgerAnchor`] mints ledger references (`0x` + 64 hex characters).
//! - [`ContentStore`] stores document bytes and returns content-addressed
//!   references (`Qm` + at least 44 characters).
//! - [`refs`] validates those shapes without touching either system.
//!
//! The simulated implementations ([`SimulatedLedger`],
//! [`SimulatedContentStore`]) are the production stand-ins: the real
//! clients plug in behind the same traits.

pub mod error;
pub mod refs;
pub mod simulated;
pub mod traits;

pub use error::{AnchorError, AnchorResult};
pub use refs::{validate_content_ref, validate_ledger_ref, CONTENT_PREFIX, LEDGER_PREFIX};
pub use simulated::{SimulatedContentStore, SimulatedLedger};
pub use traits::{ContentStore, LedgerAnchor};

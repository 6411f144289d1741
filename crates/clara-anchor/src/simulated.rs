//! Simulated collaborator implementations.
//!
//! Stand-ins for the real ledger and content-store clients. They produce
//! references of the correct shape without any network I/O, which is all
//! the compliance core needs.

use rand::RngCore;

use crate::error::AnchorResult;
use crate::refs::{CONTENT_PREFIX, LEDGER_PREFIX};
use crate::traits::{ContentStore, LedgerAnchor};

/// Simulated distributed ledger.
///
/// Mints references as `0x` + 64 lowercase hex characters from 32 random
/// bytes. Two mints are independent; collisions are as unlikely as for a
/// real transaction hash.
#[derive(Clone, Copy, Debug, Default)]
pub struct SimulatedLedger;

impl SimulatedLedger {
    pub fn new() -> Self {
        Self
    }
}

impl LedgerAnchor for SimulatedLedger {
    fn mint_reference(&self) -> AnchorResult<String> {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        Ok(format!("{LEDGER_PREFIX}{}", hex::encode(bytes)))
    }
}

/// Simulated content-addressed store.
///
/// Derives the reference from the BLAKE3 hash of the content, so the same
/// bytes always yield the same reference — the defining property of a
/// content-addressed store. The reference is `Qm` + the first 44 hex
/// characters of the digest (46 characters total).
#[derive(Clone, Copy, Debug, Default)]
pub struct SimulatedContentStore;

impl SimulatedContentStore {
    pub fn new() -> Self {
        Self
    }
}

impl ContentStore for SimulatedContentStore {
    fn store(&self, bytes: &[u8]) -> AnchorResult<String> {
        let digest = blake3::hash(bytes);
        let hex_digest = digest.to_hex();
        Ok(format!("{CONTENT_PREFIX}{}", &hex_digest.as_str()[..44]))
    }
}

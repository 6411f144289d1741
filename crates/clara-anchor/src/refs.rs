//! Reference-format validation.
//!
//! Valid ledger references:
//! - Must be non-empty
//! - Must start with the `0x` prefix
//! - Must be exactly 66 characters (`0x` + 64 hex digits)
//! - Every character after the prefix must be hexadecimal
//!
//! Valid content-store references:
//! - Must be non-empty
//! - Must start with the `Qm` prefix
//! - Must be at least 46 characters overall (`Qm` + 44-character digest)
//!
//! Validation is purely textual. Whether a reference actually resolves on
//! the ledger or in the content store is the collaborator's business.

use crate::error::{AnchorError, AnchorResult};

/// Prefix of every distributed-ledger transaction reference.
pub const LEDGER_PREFIX: &str = "0x";

/// Prefix of every content-addressed store reference.
pub const CONTENT_PREFIX: &str = "Qm";

/// Total length of a ledger reference: prefix + 64 hex characters.
pub const LEDGER_REF_LEN: usize = 66;

/// Minimum total length of a content-store reference.
pub const CONTENT_REF_MIN_LEN: usize = 46;

/// Validate a ledger reference, returning `Ok(())` if well formed.
///
/// # Examples
///
/// ```
/// use clara_anchor::validate_ledger_ref;
///
/// let good = format!("0x{}", "ab".repeat(32));
/// assert!(validate_ledger_ref(&good).is_ok());
/// assert!(validate_ledger_ref("").is_err());
/// assert!(validate_ledger_ref("0x1234").is_err());
/// ```
pub fn validate_ledger_ref(reference: &str) -> AnchorResult<()> {
    if reference.is_empty() {
        return Err(AnchorError::ledger_ref(reference, "reference is empty"));
    }

    if !reference.starts_with(LEDGER_PREFIX) {
        return Err(AnchorError::ledger_ref(
            reference,
            format!("must start with {LEDGER_PREFIX:?}"),
        ));
    }

    if reference.len() != LEDGER_REF_LEN {
        return Err(AnchorError::ledger_ref(
            reference,
            format!(
                "must be exactly {LEDGER_REF_LEN} characters, got {}",
                reference.len()
            ),
        ));
    }

    if !reference[LEDGER_PREFIX.len()..]
        .chars()
        .all(|c| c.is_ascii_hexdigit())
    {
        return Err(AnchorError::ledger_ref(
            reference,
            "must contain only hexadecimal characters after the prefix",
        ));
    }

    Ok(())
}

/// Validate a content-store reference, returning `Ok(())` if well formed.
///
/// # Examples
///
/// ```
/// use clara_anchor::validate_content_ref;
///
/// let good = format!("Qm{}", "a".repeat(44));
/// assert!(validate_content_ref(&good).is_ok());
/// assert!(validate_content_ref("Qmshort").is_err());
/// ```
pub fn validate_content_ref(reference: &str) -> AnchorResult<()> {
    if reference.is_empty() {
        return Err(AnchorError::content_ref(reference, "reference is empty"));
    }

    if !reference.starts_with(CONTENT_PREFIX) {
        return Err(AnchorError::content_ref(
            reference,
            format!("must start with {CONTENT_PREFIX:?}"),
        ));
    }

    if reference.len() < CONTENT_REF_MIN_LEN {
        return Err(AnchorError::content_ref(
            reference,
            format!(
                "must be at least {CONTENT_REF_MIN_LEN} characters, got {}",
                reference.len()
            ),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger_ref() -> String {
        format!("0x{}", "4f".repeat(32))
    }

    fn content_ref() -> String {
        format!("Qm{}", "x".repeat(44))
    }

    // -----------------------------------------------------------------------
    // Ledger references
    // -----------------------------------------------------------------------

    #[test]
    fn canonical_ledger_ref_accepted() {
        assert!(validate_ledger_ref(&ledger_ref()).is_ok());
    }

    #[test]
    fn uppercase_hex_accepted() {
        let reference = format!("0x{}", "AB".repeat(32));
        assert!(validate_ledger_ref(&reference).is_ok());
    }

    #[test]
    fn empty_ledger_ref_rejected() {
        assert!(validate_ledger_ref("").is_err());
    }

    #[test]
    fn missing_ledger_prefix_rejected() {
        let reference = "4f".repeat(33);
        assert!(validate_ledger_ref(&reference).is_err());
    }

    #[test]
    fn wrong_ledger_length_rejected() {
        assert!(validate_ledger_ref("0x1234").is_err());
        let too_long = format!("{}ff", ledger_ref());
        assert!(validate_ledger_ref(&too_long).is_err());
    }

    #[test]
    fn non_hex_payload_rejected() {
        let reference = format!("0x{}", "zz".repeat(32));
        let err = validate_ledger_ref(&reference).unwrap_err();
        assert!(err.to_string().contains("hexadecimal"));
    }

    // -----------------------------------------------------------------------
    // Content references
    // -----------------------------------------------------------------------

    #[test]
    fn canonical_content_ref_accepted() {
        assert!(validate_content_ref(&content_ref()).is_ok());
    }

    #[test]
    fn longer_content_ref_accepted() {
        let reference = format!("Qm{}", "x".repeat(60));
        assert!(validate_content_ref(&reference).is_ok());
    }

    #[test]
    fn empty_content_ref_rejected() {
        assert!(validate_content_ref("").is_err());
    }

    #[test]
    fn missing_content_prefix_rejected() {
        let reference = "x".repeat(46);
        assert!(validate_content_ref(&reference).is_err());
    }

    #[test]
    fn short_content_ref_rejected() {
        assert!(validate_content_ref("Qmshort").is_err());
    }
}

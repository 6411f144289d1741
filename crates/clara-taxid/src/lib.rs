//! National tax-ID checksum validation.
//!
//! Organizations register with a 14-digit national tax identifier carrying
//! two check digits (CNPJ-style). [`validate`] is a pure, total function:
//! it never fails, it only reports whether the identifier is well formed
//! and what is wrong with it when it is not.
//!
//! # Algorithm
//!
//! After stripping formatting characters, the first check digit (position
//! 12) is the weighted sum of digits 0–11 under weights
//! `[5,4,3,2,9,8,7,6,5,4,3,2]`, reduced mod 11: a remainder below 2 yields
//! check digit 0, otherwise `11 - remainder`. The second check digit
//! (position 13) repeats the scheme over digits 0–12 with weights
//! `[6,5,4,3,2,9,8,7,6,5,4,3,2]`.

use serde::{Deserialize, Serialize};

/// Weights for the first check digit (over digits 0–11).
const FIRST_WEIGHTS: [u32; 12] = [5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

/// Weights for the second check digit (over digits 0–12).
const SECOND_WEIGHTS: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

/// Outcome of validating a tax identifier.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxIdCheck {
    /// Whether the identifier passed all checks.
    pub valid: bool,
    /// Human-readable reason, or `"tax ID valid"` on success.
    pub message: String,
}

impl TaxIdCheck {
    fn invalid(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: message.into(),
        }
    }

    fn valid() -> Self {
        Self {
            valid: true,
            message: "tax ID valid".to_string(),
        }
    }
}

/// Validate the format and checksum of a national tax identifier.
///
/// Accepts formatted input (`"11.222.333/0001-81"`) or bare digits; all
/// non-digit characters are stripped before checking.
///
/// # Examples
///
/// ```
/// use clara_taxid::validate;
///
/// assert!(validate("11.222.333/0001-81").valid);
/// assert!(!validate("11111111111111").valid);
/// assert!(!validate("123").valid);
/// ```
pub fn validate(tax_id: &str) -> TaxIdCheck {
    let digits: Vec<u32> = tax_id.chars().filter_map(|c| c.to_digit(10)).collect();

    if digits.len() != 14 {
        return TaxIdCheck::invalid("tax ID must contain 14 digits");
    }

    // A repeated single digit passes the checksum but is never issued.
    if digits.iter().all(|&d| d == digits[0]) {
        return TaxIdCheck::invalid("tax ID invalid: all digits equal");
    }

    if check_digit(&digits[..12], &FIRST_WEIGHTS) != digits[12] {
        return TaxIdCheck::invalid("tax ID invalid: first check digit incorrect");
    }

    if check_digit(&digits[..13], &SECOND_WEIGHTS) != digits[13] {
        return TaxIdCheck::invalid("tax ID invalid: second check digit incorrect");
    }

    TaxIdCheck::valid()
}

/// Compute a check digit as the weighted digit sum reduced mod 11.
fn check_digit(digits: &[u32], weights: &[u32]) -> u32 {
    let sum: u32 = digits.iter().zip(weights).map(|(d, w)| d * w).sum();
    let remainder = sum % 11;
    if remainder < 2 {
        0
    } else {
        11 - remainder
    }
}

/// Strip formatting and return the bare 14-digit form, if the input has
/// exactly 14 digits.
pub fn normalize(tax_id: &str) -> Option<String> {
    let digits: String = tax_id.chars().filter(|c| c.is_ascii_digit()).collect();
    (digits.len() == 14).then_some(digits)
}

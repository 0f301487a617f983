//! # Checksum Library
//!
//! Check digit algorithms for the barcode families in use.
//!
//! ## Algorithm Selection
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Which checksum for which code?                       │
//! │                                                                         │
//! │  EAN-13 barcode ─────────► ean13_check_digit      (mandated by GS1)    │
//! │                                                                         │
//! │  CODE128 barcode ──┬─────► luhn_style_check_digit (digit payloads)     │
//! │                    └─────► weighted_sum_checksum  (any ASCII payload)  │
//! │                                                                         │
//! │  CODE128 has no mandated checksum convention here, so the caller       │
//! │  picks the family explicitly. Nothing in this module guesses.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All functions are pure and stateless.

use crate::error::ValidationError;

/// Number of payload digits an EAN-13 check digit is computed over.
pub const EAN13_PAYLOAD_LEN: usize = 12;

/// Converts a digit-only payload into digit values, reporting the first
/// offending character.
fn digit_values(field: &str, payload: &str) -> Result<Vec<u32>, ValidationError> {
    payload
        .chars()
        .enumerate()
        .map(|(position, c)| {
            c.to_digit(10).ok_or(ValidationError::NonDigit {
                field: field.to_string(),
                position,
                found: c,
            })
        })
        .collect()
}

#[inline]
fn complement_mod10(sum: u32) -> u8 {
    ((10 - sum % 10) % 10) as u8
}

/// Computes the EAN-13 check digit for the first 12 digits.
///
/// Digits at even positions (0-indexed from the left) count once, digits
/// at odd positions count three times.
///
/// ## Example
/// ```rust
/// use karat_core::checksum::ean13_check_digit;
///
/// assert_eq!(ean13_check_digit("400638133393").unwrap(), 1);
/// assert!(ean13_check_digit("40063813339").is_err()); // 11 digits
/// ```
pub fn ean13_check_digit(first12_digits: &str) -> Result<u8, ValidationError> {
    let len = first12_digits.chars().count();
    if len != EAN13_PAYLOAD_LEN {
        return Err(ValidationError::InvalidLength {
            field: "ean13 payload".to_string(),
            expected: EAN13_PAYLOAD_LEN,
            actual: len,
        });
    }

    let sum: u32 = digit_values("ean13 payload", first12_digits)?
        .into_iter()
        .enumerate()
        .map(|(i, d)| if i % 2 == 0 { d } else { d * 3 })
        .sum();

    Ok(complement_mod10(sum))
}

/// Computes a Luhn-style check digit.
///
/// Every digit at an odd position (0-indexed from the left) is doubled,
/// with 9 subtracted when the doubled value exceeds 9. Note the positions
/// count from the left, unlike card-number Luhn which counts from the
/// right.
///
/// ## Example
/// ```rust
/// use karat_core::checksum::luhn_style_check_digit;
///
/// assert_eq!(luhn_style_check_digit("7992739871").unwrap(), 3);
/// ```
pub fn luhn_style_check_digit(payload: &str) -> Result<u8, ValidationError> {
    if payload.is_empty() {
        return Err(ValidationError::required("luhn payload"));
    }

    let sum: u32 = digit_values("luhn payload", payload)?
        .into_iter()
        .enumerate()
        .map(|(i, d)| {
            if i % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                d
            }
        })
        .sum();

    Ok(complement_mod10(sum))
}

/// Lightweight checksum for free-form identifiers.
///
/// `sum(char_code(payload[i]) * (i + 1)) mod 10`. Accepts any characters;
/// an empty payload yields 0.
///
/// ## Example
/// ```rust
/// use karat_core::checksum::weighted_sum_checksum;
///
/// assert_eq!(weighted_sum_checksum("ABC"), 8);
/// ```
pub fn weighted_sum_checksum(payload: &str) -> u8 {
    let sum: u64 = payload
        .chars()
        .enumerate()
        .map(|(i, c)| u64::from(c as u32) * (i as u64 + 1))
        .sum();

    (sum % 10) as u8
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Validation Module
//!
//! Input checks applied before values reach the generators.
//!
//! ## Usage
//! ```rust
//! use karat_core::validation::{validate_prefix, validate_scan};
//! use karat_core::BarcodeKind;
//!
//! validate_prefix("EST-").unwrap();
//! assert!(validate_scan("4006381333932", BarcodeKind::Ean13).is_err());
//! ```

use crate::error::ValidationError;
use crate::identifier::{validate_barcode, BarcodeKind};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Widest zero-padding accepted for document numbers.
pub const MAX_MIN_DIGITS: usize = 12;

/// Longest document prefix accepted.
pub const MAX_PREFIX_LEN: usize = 10;

/// Validates a document number prefix.
///
/// ## Rules
/// - Must not be empty
/// - At most 10 characters, no whitespace
/// - Must not end in a digit, otherwise `INV1` + `001` reads as suffix `1001`
pub fn validate_prefix(prefix: &str) -> ValidationResult<()> {
    if prefix.is_empty() {
        return Err(ValidationError::required("prefix"));
    }

    if prefix.len() > MAX_PREFIX_LEN || prefix.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidFormat {
            field: "prefix".to_string(),
            reason: format!("must be 1-{} characters without spaces", MAX_PREFIX_LEN),
        });
    }

    if prefix.ends_with(|c: char| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "prefix".to_string(),
            reason: "must not end with a digit".to_string(),
        });
    }

    Ok(())
}

/// Validates the zero-padding width of document numbers.
pub fn validate_min_digits(min_digits: usize) -> ValidationResult<()> {
    if min_digits == 0 || min_digits > MAX_MIN_DIGITS {
        return Err(ValidationError::InvalidFormat {
            field: "min_digits".to_string(),
            reason: format!("must be between 1 and {}", MAX_MIN_DIGITS),
        });
    }
    Ok(())
}

/// Rejects a scanned code whose check digit does not match.
///
/// ## User Workflow
/// ```text
/// Scanner reads "4006381333932"
///      │
///      ▼
/// validate_scan(code, Ean13) ← THIS FUNCTION
///      │
///      ├── check digit wrong → "code has invalid format: check digit ..."
///      │                        UI asks for a rescan
///      └── OK → item lookup by code
/// ```
pub fn validate_scan(code: &str, kind: BarcodeKind) -> ValidationResult<()> {
    if code.trim().is_empty() {
        return Err(ValidationError::required("code"));
    }

    if !validate_barcode(code, kind) {
        return Err(ValidationError::InvalidFormat {
            field: "code".to_string(),
            reason: format!("check digit does not match for {}", kind),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

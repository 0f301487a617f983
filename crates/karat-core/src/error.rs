//! # Error Types
//!
//! Domain-specific error types for karat-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  karat-core errors (this file)                                         │
//! │  ├── CoreError        - General domain errors                          │
//! │  ├── ValidationError  - Malformed checksum / SKU input                 │
//! │  └── EncodingError    - Barcode seed cannot fit the symbology          │
//! │                                                                         │
//! │  karat-store errors (separate crate)                                   │
//! │  └── StoreError       - Record-store request failures                  │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → Presentation layer   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Checksum and encoding errors are local and recoverable: the caller
//! rejects the specific input and asks for a correction. A value is never
//! substituted silently.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Malformed checksum or identifier input.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Barcode seed could not be shaped into the requested symbology.
    #[error("Encoding error: {0}")]
    Encoding(#[from] EncodingError),

    /// The allocator fell back to a non-sequential emergency number.
    ///
    /// ## When This Occurs
    /// - The existing-document lookup failed (network / store error)
    ///
    /// Not fatal: the document can still be created, but the user must be
    /// told the number may need review.
    #[error("Document number {number} may need review: {reason}")]
    NumberingDegraded { number: String, reason: String },

    /// More than one sale line could explain a single tray item.
    ///
    /// ## When This Occurs
    /// Two sale lines on the report date share the item's product name,
    /// touch and weight, so the reconciliation cannot tell which one sold it.
    #[error("Tray {tray_number}: item {item_id} matched {candidates} sale lines")]
    AmbiguousMatch {
        tray_number: String,
        item_id: String,
        candidates: usize,
    },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field has the wrong number of characters.
    #[error("{field} must be exactly {expected} characters, got {actual}")]
    InvalidLength {
        field: String,
        expected: usize,
        actual: usize,
    },

    /// A digit-only field contains something else.
    #[error("{field} has non-digit character '{found}' at position {position}")]
    NonDigit {
        field: String,
        position: usize,
        found: char,
    },

    /// Invalid format.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    pub(crate) fn required(field: &str) -> Self {
        ValidationError::Required {
            field: field.to_string(),
        }
    }
}

// =============================================================================
// Encoding Error
// =============================================================================

/// Barcode seed shaping errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    /// Nothing to encode.
    #[error("Barcode seed is empty")]
    EmptySeed,

    /// EAN-13 segments must be digits only.
    #[error("EAN-13 seed '{seed}' must contain digits only")]
    NonNumericSeed { seed: String },

    /// The seed does not fit in the digits left after the prefix.
    #[error("EAN-13 seed '{seed}' needs {len} digits but only {max} are available")]
    SeedTooLong { seed: String, len: usize, max: usize },

    /// Country prefix plus company code leave no room for a product segment.
    #[error("EAN-13 prefix '{prefix}' must be 1 to 11 digits")]
    InvalidPrefix { prefix: String },

    /// CODE128 payloads are restricted to ASCII letters and digits.
    #[error("CODE128 seed '{seed}' contains characters outside ASCII letters and digits")]
    UnsupportedCharacter { seed: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

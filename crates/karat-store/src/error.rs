//! # Store Error Types
//!
//! Error types for record-store requests and the services built on them.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  Record store failure (network, timeout, rejected create)              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds context and categorization            │
//! │       │                                                                 │
//! │       ├── Duplicate          → numbering retries with a fresh number   │
//! │       ├── ReportUnavailable  → "report unavailable for this date"      │
//! │       └── everything else    → shown to the user as-is                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use karat_core::{CoreError, DocumentKind};
use thiserror::Error;

/// Record-store and service errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Unique constraint violation.
    ///
    /// ## When This Occurs
    /// - Two clerks allocated the same document number from the same
    ///   snapshot and the other create landed first
    #[error("Duplicate {field}: '{value}' already exists")]
    Duplicate { field: String, value: String },

    /// The record store could not be reached or answered with an error.
    #[error("Record store unavailable: {0}")]
    Unavailable(String),

    /// One of the fetches behind a tray report failed.
    #[error("Report unavailable for {date}: {reason}")]
    ReportUnavailable { date: NaiveDate, reason: String },

    /// Every create attempt hit a duplicate number.
    #[error("Could not allocate a unique {kind} number after {attempts} attempts")]
    NumberingExhausted { kind: DocumentKind, attempts: u32 },

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Domain error from karat-core.
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// Creates a Duplicate error.
    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        StoreError::Duplicate {
            field: field.into(),
            value: value.into(),
        }
    }
}

impl From<toml::de::Error> for StoreError {
    fn from(err: toml::de::Error) -> Self {
        StoreError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for StoreError {
    fn from(err: toml::ser::Error) -> Self {
        StoreError::Config(err.to_string())
    }
}

impl From<karat_core::ValidationError> for StoreError {
    fn from(err: karat_core::ValidationError) -> Self {
        StoreError::Core(err.into())
    }
}

impl From<karat_core::EncodingError> for StoreError {
    fn from(err: karat_core::EncodingError) -> Self {
        StoreError::Core(err.into())
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

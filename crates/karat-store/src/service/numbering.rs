//! # Numbering Service
//!
//! Allocates estimation and invoice numbers against the record store and
//! creates the document master.
//!
//! ## Create Loop
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  attempt 1..=max_create_attempts                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  list_document_numbers(kind, prefix)   ← re-fetched on every attempt   │
//! │       │                                                                 │
//! │       ├── Ok  → next_number(..)        EST-008                         │
//! │       └── Err → emergency number       EST-TMP2026... (degraded)       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  create_document(kind, number)                                         │
//! │       │                                                                 │
//! │       ├── Ok         → done                                            │
//! │       ├── Duplicate  → another clerk won the race, next attempt        │
//! │       └── other      → error                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use karat_core::numbering::allocate;
use karat_core::{DocumentKind, DocumentMaster, NumberAllocation};
use tracing::{debug, info, warn};

use crate::config::NumberingSettings;
use crate::error::{StoreError, StoreResult};
use crate::repository::RecordStore;

/// A created document and how its number was obtained.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedDocument {
    pub document: DocumentMaster,
    pub allocation: NumberAllocation,
}

impl CreatedDocument {
    /// True when the number must be reviewed by the user.
    pub fn needs_review(&self) -> bool {
        self.allocation.is_degraded()
    }
}

/// Allocates document numbers.
#[derive(Debug, Clone)]
pub struct NumberingService<S> {
    store: S,
    settings: NumberingSettings,
}

impl<S: RecordStore> NumberingService<S> {
    pub fn new(store: S, settings: NumberingSettings) -> Self {
        NumberingService { store, settings }
    }

    /// Computes the next number for `kind` from the latest store contents.
    ///
    /// Never fails: a failed lookup gives a degraded allocation.
    pub async fn allocate(&self, kind: DocumentKind) -> NumberAllocation {
        let prefix = self.settings.prefix(kind);
        let lookup = self.store.list_document_numbers(kind, prefix).await;
        let allocation = allocate(lookup, prefix, self.settings.min_digits, Utc::now());

        if let Some(warning) = allocation.warning() {
            warn!(%kind, error = %warning, "Document numbering degraded");
        }

        allocation
    }

    /// Allocates a number and creates the document, retrying with a fresh
    /// number when the store reports the number as taken.
    pub async fn create_document(&self, kind: DocumentKind) -> StoreResult<CreatedDocument> {
        let attempts = self.settings.max_create_attempts;

        for attempt in 1..=attempts {
            let allocation = self.allocate(kind).await;

            match self.store.create_document(kind, allocation.number()).await {
                Ok(document) => {
                    info!(%kind, number = %document.number, attempt, "Document created");
                    return Ok(CreatedDocument {
                        document,
                        allocation,
                    });
                }
                Err(StoreError::Duplicate { value, .. }) => {
                    debug!(%kind, number = %value, attempt, "Document number taken, retrying");
                }
                Err(e) => return Err(e),
            }
        }

        Err(StoreError::NumberingExhausted { kind, attempts })
    }
}

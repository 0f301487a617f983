//! # Repository Module
//!
//! The record-store contract consumed by the services.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ReportService / NumberingService                                      │
//! │       │                                                                 │
//! │       │  store.list_trays()                                            │
//! │       ▼                                                                 │
//! │  RecordStore (trait)                                                   │
//! │  ├── list_trays()                                                      │
//! │  ├── list_tray_items()                                                 │
//! │  ├── list_sale_lines(date)                                             │
//! │  ├── list_document_numbers(kind, prefix)                               │
//! │  └── create_document(kind, number)                                     │
//! │       │                                                                 │
//! │       ├──► MemoryStore (tests, snapshot files)                         │
//! │       └──► remote REST client (presentation app)                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Pagination and date-range filtering are the implementor's job: each list
//! call returns the complete result.

pub mod memory;

use async_trait::async_trait;
use chrono::NaiveDate;
use karat_core::{DocumentKind, DocumentMaster, SaleLine, Tray, TrayItem};

use crate::error::StoreResult;

/// Read and create operations against the record store.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// All trays.
    async fn list_trays(&self) -> StoreResult<Vec<Tray>>;

    /// All tray items.
    async fn list_tray_items(&self) -> StoreResult<Vec<TrayItem>>;

    /// Sale lines whose parent invoice is dated `date`.
    async fn list_sale_lines(&self, date: NaiveDate) -> StoreResult<Vec<SaleLine>>;

    /// Numbers of existing documents of `kind` starting with `prefix`.
    async fn list_document_numbers(
        &self,
        kind: DocumentKind,
        prefix: &str,
    ) -> StoreResult<Vec<String>>;

    /// Creates a document master.
    ///
    /// Must fail with `StoreError::Duplicate` when `number` is taken.
    async fn create_document(&self, kind: DocumentKind, number: &str)
        -> StoreResult<DocumentMaster>;
}

pub use memory::{MemoryStore, Snapshot};

//! # In-Memory Record Store
//!
//! A [`RecordStore`] over a snapshot held in memory. Used by the
//! `tray-report` binary and by tests.
//!
//! ## Snapshot File
//! ```json
//! {
//!   "trays":     [{ "trayNumber": "T1", "createdAt": "2026-01-01T09:00:00Z" }],
//!   "items":     [{ "_id": "a1", "product": "Ring", "touch": "22K",
//!                   "weight": "5", "quantity": 2, "trayNumber": "T1" }],
//!   "sales":     [{ "product": "Ring", "touch": "22K", "weight": 5,
//!                   "quantity": 2, "amount": "52000", "invoiceDate": "2026-10-19" }],
//!   "documents": [{ "kind": "estimation", "number": "EST-007",
//!                   "createdAt": "2026-10-18T11:00:00Z" }]
//! }
//! ```

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use karat_core::{DocumentKind, DocumentMaster, SaleLine, Tray, TrayItem};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::RecordStore;
use crate::error::{StoreError, StoreResult};

/// Everything the store holds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub trays: Vec<Tray>,
    #[serde(default, alias = "trayItems")]
    pub items: Vec<TrayItem>,
    #[serde(default, alias = "saleLines")]
    pub sales: Vec<SaleLine>,
    #[serde(default)]
    pub documents: Vec<DocumentMaster>,
}

/// In-memory record store. Cheap to clone; clones share the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Snapshot>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        MemoryStore {
            inner: Arc::new(RwLock::new(snapshot)),
        }
    }

    /// Parses a JSON snapshot.
    pub fn from_json(json: &str) -> StoreResult<Self> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        Ok(Self::from_snapshot(snapshot))
    }

    /// Loads a JSON snapshot file.
    pub fn from_file(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        debug!(?path, "Loading store snapshot");
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub async fn insert_tray(&self, tray: Tray) {
        self.inner.write().await.trays.push(tray);
    }

    pub async fn insert_item(&self, item: TrayItem) {
        self.inner.write().await.items.push(item);
    }

    pub async fn insert_sale(&self, sale: SaleLine) {
        self.inner.write().await.sales.push(sale);
    }

    /// Copy of the current contents.
    pub async fn snapshot(&self) -> Snapshot {
        self.inner.read().await.clone()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn list_trays(&self) -> StoreResult<Vec<Tray>> {
        Ok(self.inner.read().await.trays.clone())
    }

    async fn list_tray_items(&self) -> StoreResult<Vec<TrayItem>> {
        Ok(self.inner.read().await.items.clone())
    }

    async fn list_sale_lines(&self, date: NaiveDate) -> StoreResult<Vec<SaleLine>> {
        Ok(self
            .inner
            .read()
            .await
            .sales
            .iter()
            .filter(|s| s.invoice_date == date)
            .cloned()
            .collect())
    }

    async fn list_document_numbers(
        &self,
        kind: DocumentKind,
        prefix: &str,
    ) -> StoreResult<Vec<String>> {
        Ok(self
            .inner
            .read()
            .await
            .documents
            .iter()
            .filter(|d| d.kind == kind && d.number.starts_with(prefix))
            .map(|d| d.number.clone())
            .collect())
    }

    async fn create_document(
        &self,
        kind: DocumentKind,
        number: &str,
    ) -> StoreResult<DocumentMaster> {
        let mut data = self.inner.write().await;

        if data
            .documents
            .iter()
            .any(|d| d.kind == kind && d.number == number)
        {
            return Err(StoreError::duplicate("number", number));
        }

        let document = DocumentMaster {
            id: Uuid::new_v4().to_string(),
            kind,
            number: number.to_string(),
            created_at: Utc::now(),
        };
        data.documents.push(document.clone());

        debug!(id = %document.id, number = %document.number, "Created document");
        Ok(document)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # karat-store: Record-Store Boundary for Karat
//!
//! Fetches trays, items, sale lines and document numbers from the record
//! store and runs the pure logic in karat-core over them.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Karat Data Flow                                  │
//! │                                                                         │
//! │  Presentation (inventory screens, billing, tray-report binary)         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   karat-store (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐    ┌──────────────┐  │   │
//! │  │   │   Services    │    │  RecordStore   │    │    Config    │  │   │
//! │  │   │               │    │                │    │              │  │   │
//! │  │   │ ReportService │───►│ MemoryStore    │    │ karat.toml   │  │   │
//! │  │   │ Numbering     │    │ remote client  │    │ KARAT_* env  │  │   │
//! │  │   │ Identifier    │    │                │    │              │  │   │
//! │  │   └───────┬───────┘    └────────────────┘    └──────────────┘  │   │
//! │  └───────────┼─────────────────────────────────────────────────────┘   │
//! │              ▼                                                          │
//! │  karat-core (reconciliation, numbering, checksums)                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`config`] - Layered configuration
//! - [`error`] - Store error types
//! - [`repository`] - Record-store trait and in-memory store
//! - [`service`] - Report, numbering and identifier services
//!
//! ## Usage
//!
//! ```rust,ignore
//! use karat_store::{KaratConfig, MemoryStore, ReportService};
//!
//! let config = KaratConfig::load_or_default(None);
//! let store = MemoryStore::from_file("snapshot.json")?;
//! let report = ReportService::new(store, config.report.offset()?)
//!     .tray_report(date)
//!     .await?;
//! ```

use tracing_subscriber::EnvFilter;

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod repository;
pub mod service;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{BarcodeSettings, KaratConfig, NumberingSettings, ReportSettings};
pub use error::{StoreError, StoreResult};
pub use repository::{MemoryStore, RecordStore, Snapshot};
pub use service::{
    CreatedDocument, IdentifierService, LabelFormat, NumberingService, ReportService,
};

/// Default log filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,karat=debug";

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=karat_store=trace` - Show trace for this crate only
/// - Default: [`DEFAULT_LOG_FILTER`]
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    // A second call (tests, embedding apps) keeps the first subscriber
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

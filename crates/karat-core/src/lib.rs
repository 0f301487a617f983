//! # karat-core: Inventory Identity & Reconciliation Logic
//!
//! Pure business logic for the jewelry shop: check digits, SKUs and
//! barcodes, document numbering, and the daily tray stock report. No I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Karat Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Presentation layer (forms, tables)             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │        karat-store (record-store fetches, services)             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ snapshots in, records out              │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ karat-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌────────────┐ ┌───────────┐ ┌───────────────┐  │   │
//! │  │   │ checksum │ │ identifier │ │ numbering │ │  reconcile    │  │   │
//! │  │   │ EAN-13   │ │ SKU        │ │ EST-008   │ │  per tray     │  │   │
//! │  │   │ Luhn     │ │ barcodes   │ │ fail-open │ │  ──► report   │  │   │
//! │  │   └──────────┘ └────────────┘ └───────────┘ └───────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK • NO RANDOMNESS • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`checksum`] - EAN-13, Luhn-style and weighted-sum check digits
//! - [`identifier`] - SKU and barcode generation, scan validation
//! - [`numbering`] - Sequential document numbers
//! - [`reconcile`] - Tray stock reconciliation for a day
//! - [`report`] - Totals and weight formatting
//! - [`types`] - Domain types (Tray, TrayItem, SaleLine, ...)
//! - [`validation`] - Input checks
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input, same output; the caller passes the
//!    clock and any randomness in
//! 2. **Exact Weights**: grams are `Decimal`, compared without tolerance
//! 3. **Explicit Errors**: typed errors, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checksum;
pub mod error;
pub mod identifier;
pub mod numbering;
pub mod reconcile;
pub mod report;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, EncodingError, ValidationError};
pub use identifier::{validate_barcode, BarcodeGenerator, BarcodeKind, Code128Check};
pub use numbering::{next_number, NumberAllocation};
pub use reconcile::{reconcile_tray, reconcile_trays, AmbiguousMatch, Reconciliation, ReportDay};
pub use report::{aggregate, format_weight, TrayReport};
pub use types::*;

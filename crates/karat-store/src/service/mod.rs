//! # Services
//!
//! Workflows that combine record-store calls with karat-core logic.
//!
//! - [`report`] - Tray report for a day
//! - [`numbering`] - Estimation and invoice numbers
//! - [`identifier`] - SKUs, barcodes and scan checks

pub mod identifier;
pub mod numbering;
pub mod report;

pub use identifier::{IdentifierService, LabelFormat};
pub use numbering::{CreatedDocument, NumberingService};
pub use report::ReportService;

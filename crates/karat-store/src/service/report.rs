//! # Tray Report Service
//!
//! Fetches trays, tray items and the day's sale lines, then runs the
//! reconciliation in karat-core.
//!
//! ## Flow
//! ```text
//! tray_report(date)
//!      │
//!      ├── list_trays() ─────────┐
//!      ├── list_tray_items() ────┼── fetched concurrently
//!      └── list_sale_lines(date) ┘
//!      │
//!      ▼  any fetch failed? → ReportUnavailable { date }
//! reconcile_trays(..) → TrayReport
//!      │
//!      └── ambiguous matches logged, kept on the report
//! ```

use chrono::{FixedOffset, NaiveDate};
use karat_core::{reconcile_trays, ReportDay, TrayReport};
use tracing::{info, warn};

use crate::error::{StoreError, StoreResult};
use crate::repository::RecordStore;

/// Builds tray reports from a record store.
#[derive(Debug, Clone)]
pub struct ReportService<S> {
    store: S,
    offset: FixedOffset,
}

impl<S: RecordStore> ReportService<S> {
    /// `offset` is the shop's time zone used to date trays and items.
    pub fn new(store: S, offset: FixedOffset) -> Self {
        ReportService { store, offset }
    }

    /// Builds the tray report for `date`.
    ///
    /// ## Errors
    /// `StoreError::ReportUnavailable` when any of the underlying fetches
    /// fails. The caller retries or tells the user the report is not
    /// available for this date.
    pub async fn tray_report(&self, date: NaiveDate) -> StoreResult<TrayReport> {
        let (trays, items, sales) = tokio::try_join!(
            self.store.list_trays(),
            self.store.list_tray_items(),
            self.store.list_sale_lines(date),
        )
        .map_err(|e| {
            warn!(%date, error = %e, "Tray report fetch failed");
            StoreError::ReportUnavailable {
                date,
                reason: e.to_string(),
            }
        })?;

        let day = ReportDay::new(date, self.offset);
        let reconciliation = reconcile_trays(&trays, &items, &sales, &day);

        for m in &reconciliation.ambiguities {
            warn!(
                tray = %m.tray_number,
                item = %m.item_id,
                candidates = m.candidates,
                "Ambiguous sale match"
            );
        }

        let report = TrayReport::from(reconciliation);
        info!(
            %date,
            trays = report.trays.len(),
            sales = sales.len(),
            sold_qty = report.totals.sold_qty,
            "Tray report built"
        );

        Ok(report)
    }
}

//! # Report Aggregator
//!
//! Totals tray reconciliations and formats weights the way the printed
//! tray report shows them.
//!
//! ## Weight Display
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │   grams < 1000   →   one decimal in grams       845.25  → "845.3 g"    │
//! │   grams ≥ 1000   →   two decimals in kilograms  1234.5  → "1.23 kg"    │
//! │   (compared after rounding to one decimal)      999.96  → "1.00 kg"    │
//! │                                                                         │
//! │   Midpoints round away from zero, so the printout and the physical     │
//! │   count round the same way.                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::reconcile::{AmbiguousMatch, Reconciliation};
use crate::types::{StockFigures, TrayStock};

/// Label of the totals row.
pub const TOTAL_LABEL: &str = "Total";

/// Element-wise sum of stock figures. Empty input gives all zeros.
///
/// ## Example
/// ```rust
/// use karat_core::report::aggregate;
/// use karat_core::StockFigures;
///
/// let none: [StockFigures; 0] = [];
/// assert_eq!(aggregate(&none), StockFigures::zero());
/// ```
pub fn aggregate<'a, I>(figures: I) -> StockFigures
where
    I: IntoIterator<Item = &'a StockFigures>,
{
    figures.into_iter().sum()
}

/// Formats a gram weight for display.
///
/// The unit is chosen on the gram value as it would print, so `999.96`
/// shows as `1.00 kg` rather than `1000.0 g`.
pub fn format_weight(grams: Decimal) -> String {
    let g = grams.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    if g >= Decimal::ONE_THOUSAND {
        let kg = (grams / Decimal::ONE_THOUSAND)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        format!("{:.2} kg", kg)
    } else {
        format!("{:.1} g", g)
    }
}

// =============================================================================
// Tray Report
// =============================================================================

/// One printable line of the tray report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReportRow {
    pub label: String,
    pub opening_qty: i64,
    pub opening_weight: String,
    pub sold_qty: i64,
    pub sold_weight: String,
    pub current_qty: i64,
    pub current_weight: String,
}

impl ReportRow {
    fn new(label: &str, f: &StockFigures) -> Self {
        ReportRow {
            label: label.to_string(),
            opening_qty: f.opening_qty,
            opening_weight: format_weight(f.opening_weight),
            sold_qty: f.sold_qty,
            sold_weight: format_weight(f.sold_weight),
            current_qty: f.current_qty,
            current_weight: format_weight(f.current_weight),
        }
    }
}

/// Tray report for one day: per-tray figures plus totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TrayReport {
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub trays: Vec<TrayStock>,
    pub totals: StockFigures,
    /// Items whose sold status rests on an ambiguous match.
    pub ambiguities: Vec<AmbiguousMatch>,
}

impl From<Reconciliation> for TrayReport {
    fn from(r: Reconciliation) -> Self {
        let totals = r.totals();
        TrayReport {
            date: r.date,
            trays: r.trays,
            totals,
            ambiguities: r.ambiguities,
        }
    }
}

impl TrayReport {
    /// Whether any figure rests on an ambiguous match.
    pub fn needs_review(&self) -> bool {
        !self.ambiguities.is_empty()
    }

    /// Printable rows: one per tray, then the totals row.
    pub fn rows(&self) -> Vec<ReportRow> {
        self.trays
            .iter()
            .map(|t| ReportRow::new(&t.tray_number, &t.figures))
            .chain(std::iter::once(ReportRow::new(TOTAL_LABEL, &self.totals)))
            .collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

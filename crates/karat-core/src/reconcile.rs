//! # Stock Reconciliation Engine
//!
//! Computes, for one calendar day, how much stock each tray opened with,
//! how much of it sold, and what remains.
//!
//! ## Phases
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  reconcile_trays(trays, items, sales, day)              │
//! │                                                                         │
//! │  A. Scope     trays created after the day are dropped                  │
//! │       │       (items created after the day are dropped too)            │
//! │       ▼                                                                 │
//! │  B. Opening   items partitioned by tray_number                         │
//! │       │       opening_qty = Σ quantity                                 │
//! │       │       opening_weight = Σ quantity × weight                     │
//! │       ▼                                                                 │
//! │  C. Sold      each item, in identity order, is marked sold once if     │
//! │       │       ANY sale line of the day matches it:                     │
//! │       │         trim(touch) ==  ·  product ==  ·  weight ==            │
//! │       │         static items: product == ignoring case, no weight      │
//! │       ▼                                                                 │
//! │  D. Current   current = max(0, opening − sold)                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Matching Is Not a Join
//! A sale line carries no reference to the tray item it came from, only the
//! item's name, touch and weight. When two sale lines could explain the same
//! item the engine still counts the item once, and records an
//! [`AmbiguousMatch`] so the report can show that the figure is uncertain.
//!
//! Everything here is a pure function over in-memory snapshots. Running it
//! twice on the same input yields the same output.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::report::aggregate;
use crate::types::{SaleLine, StockFigures, Tray, TrayItem, TrayStock};

// =============================================================================
// Report Day
// =============================================================================

/// The calendar day a report covers, in the shop's time zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportDay {
    pub date: NaiveDate,
    pub offset: FixedOffset,
}

impl ReportDay {
    pub fn new(date: NaiveDate, offset: FixedOffset) -> Self {
        ReportDay { date, offset }
    }

    /// Report day with timestamps read as UTC.
    pub fn utc(date: NaiveDate) -> Self {
        ReportDay {
            date,
            offset: Utc.fix(),
        }
    }

    /// Calendar date of a timestamp in the shop's time zone.
    pub fn date_of(&self, timestamp: DateTime<Utc>) -> NaiveDate {
        timestamp.with_timezone(&self.offset).date_naive()
    }

    /// Whether something created at `created_at` existed on this day.
    /// Records without a creation time always existed.
    pub fn includes(&self, created_at: Option<DateTime<Utc>>) -> bool {
        created_at.map_or(true, |ts| self.date_of(ts) <= self.date)
    }
}

// =============================================================================
// Diagnostics
// =============================================================================

/// A tray item that more than one sale line of the day could explain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AmbiguousMatch {
    pub tray_number: String,
    pub item_id: String,
    /// Number of sale lines that matched the item.
    pub candidates: usize,
}

impl From<AmbiguousMatch> for CoreError {
    fn from(m: AmbiguousMatch) -> Self {
        CoreError::AmbiguousMatch {
            tray_number: m.tray_number,
            item_id: m.item_id,
            candidates: m.candidates,
        }
    }
}

// =============================================================================
// Results
// =============================================================================

/// Reconciliation of a single tray.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrayReconciliation {
    pub stock: TrayStock,
    pub ambiguities: Vec<AmbiguousMatch>,
}

/// Reconciliation of every in-scope tray for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Reconciliation {
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub trays: Vec<TrayStock>,
    pub ambiguities: Vec<AmbiguousMatch>,
}

impl Reconciliation {
    /// Totals across all trays.
    pub fn totals(&self) -> StockFigures {
        aggregate(self.trays.iter().map(|t| &t.figures))
    }

    /// Fails on the first ambiguous match, for callers that refuse
    /// uncertain figures.
    pub fn ensure_unambiguous(&self) -> CoreResult<()> {
        match self.ambiguities.first() {
            Some(m) => Err(m.clone().into()),
            None => Ok(()),
        }
    }
}

// =============================================================================
// Matching
// =============================================================================

/// Whether a sale line describes a tray item.
///
/// - touch must be equal after trimming
/// - weighed items: product names equal as written, weight exactly equal
/// - static items (weight 0): product names equal ignoring case and
///   surrounding whitespace, weight ignored
pub fn sale_matches_item(sale: &SaleLine, item: &TrayItem) -> bool {
    if sale.touch.trim() != item.touch.trim() {
        return false;
    }

    if item.is_static() {
        sale.product.trim().to_lowercase() == item.product.trim().to_lowercase()
    } else {
        sale.product == item.product && sale.weight == item.weight
    }
}

/// Identity of an item for ordering and the matched set.
///
/// Ids, scan codes and input positions are separate key spaces: an item
/// whose id reads like a code or a position never collides with one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
enum ItemKey {
    Id(String),
    Code(String),
    Position(usize),
}

impl ItemKey {
    fn of(item: &TrayItem, position: usize) -> Self {
        if !item.id.is_empty() {
            ItemKey::Id(item.id.clone())
        } else if !item.code.is_empty() {
            ItemKey::Code(item.code.clone())
        } else {
            ItemKey::Position(position)
        }
    }

    /// Label used in diagnostics.
    fn label(&self) -> String {
        match self {
            ItemKey::Id(id) => id.clone(),
            ItemKey::Code(code) => format!("code:{}", code),
            ItemKey::Position(position) => format!("position:{}", position),
        }
    }
}

/// Opening minus sold quantity, floored at zero.
fn remaining_qty(opening: i64, sold: i64) -> i64 {
    opening.saturating_sub(sold).max(0)
}

/// Opening minus sold weight, floored at zero.
fn remaining_weight(opening: Decimal, sold: Decimal) -> Decimal {
    opening.saturating_sub(sold).max(Decimal::ZERO)
}

/// Reconciles one tray's items against the day's sale lines.
///
/// `sales` must already be restricted to the report day.
pub fn reconcile_tray(
    tray_number: &str,
    items: &[&TrayItem],
    sales: &[&SaleLine],
) -> TrayReconciliation {
    let mut figures = StockFigures::zero();

    // Phase B
    for item in items {
        figures.opening_qty = figures.opening_qty.saturating_add(item.quantity);
        figures.opening_weight = figures.opening_weight.saturating_add(item.line_weight());
    }

    // Phase C
    let mut ordered: Vec<(ItemKey, &TrayItem)> = items
        .iter()
        .enumerate()
        .map(|(position, item)| (ItemKey::of(item, position), *item))
        .collect();
    ordered.sort_by(|a, b| a.0.cmp(&b.0));

    let mut matched: HashSet<ItemKey> = HashSet::new();
    let mut ambiguities = Vec::new();

    for (key, item) in ordered {
        let candidates = sales.iter().filter(|s| sale_matches_item(s, item)).count();
        if candidates == 0 || matched.contains(&key) {
            continue;
        }

        if candidates > 1 {
            ambiguities.push(AmbiguousMatch {
                tray_number: tray_number.to_string(),
                item_id: key.label(),
                candidates,
            });
        }

        figures.sold_qty = figures.sold_qty.saturating_add(item.quantity);
        figures.sold_weight = figures.sold_weight.saturating_add(item.line_weight());
        matched.insert(key);
    }

    // Phase D
    figures.current_qty = remaining_qty(figures.opening_qty, figures.sold_qty);
    figures.current_weight = remaining_weight(figures.opening_weight, figures.sold_weight);

    TrayReconciliation {
        stock: TrayStock {
            tray_number: tray_number.to_string(),
            figures,
        },
        ambiguities,
    }
}

/// Reconciles every tray in scope for `day`.
///
/// Trays are reported in input order; a repeated tray number is reported
/// once. Items whose tray is out of scope or unknown are ignored.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use karat_core::reconcile::{reconcile_trays, ReportDay};
/// use karat_core::{SaleLine, Tray, TrayItem};
/// use rust_decimal::Decimal;
///
/// let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
/// let tray = Tray { tray_number: "T1".into(), created_at: None };
/// let item = TrayItem {
///     id: "a".into(), product: "Ring".into(), touch: "22K".into(),
///     weight: Decimal::from(5), quantity: 2, tray_number: "T1".into(),
///     created_at: None, code: String::new(), making_charge_or_wastage: Decimal::ZERO,
/// };
/// let sale = SaleLine {
///     product: "Ring".into(), touch: "22K".into(), weight: Decimal::from(5),
///     quantity: 2, amount: Decimal::ZERO, invoice_date: date,
/// };
///
/// let result = reconcile_trays(&[tray], &[item], &[sale], &ReportDay::utc(date));
/// assert_eq!(result.trays[0].figures.sold_qty, 2);
/// assert_eq!(result.trays[0].figures.current_qty, 0);
/// ```
pub fn reconcile_trays(
    trays: &[Tray],
    items: &[TrayItem],
    sales: &[SaleLine],
    day: &ReportDay,
) -> Reconciliation {
    // Phase A
    let mut seen: HashSet<&str> = HashSet::new();
    let in_scope: Vec<&Tray> = trays
        .iter()
        .filter(|t| day.includes(t.created_at))
        .filter(|t| seen.insert(t.tray_number.as_str()))
        .collect();

    let mut by_tray: HashMap<&str, Vec<&TrayItem>> = HashMap::new();
    for item in items.iter().filter(|i| day.includes(i.created_at)) {
        by_tray.entry(item.tray_number.as_str()).or_default().push(item);
    }

    let day_sales: Vec<&SaleLine> = sales
        .iter()
        .filter(|s| s.invoice_date == day.date)
        .collect();

    let mut result = Reconciliation {
        date: day.date,
        trays: Vec::with_capacity(in_scope.len()),
        ambiguities: Vec::new(),
    };

    for tray in in_scope {
        let tray_items = by_tray
            .get(tray.tray_number.as_str())
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        let tray_result = reconcile_tray(&tray.tray_number, tray_items, &day_sales);
        result.trays.push(tray_result.stock);
        result.ambiguities.extend(tray_result.ambiguities);
    }

    result
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn tray(number: &str) -> Tray {
        Tray {
            tray_number: number.to_string(),
            created_at: Some(Utc.with_ymd_and_hms(2026, 1, 1, 9, 0, 0).unwrap()),
        }
    }

    fn item(id: &str, tray: &str, product: &str, touch: &str, weight: Decimal, qty: i64) -> TrayItem {
        TrayItem {
            id: id.to_string(),
            product: product.to_string(),
            touch: touch.to_string(),
            weight,
            quantity: qty,
            tray_number: tray.to_string(),
            created_at: None,
            code: String::new(),
            making_charge_or_wastage: Decimal::ZERO,
        }
    }

    fn sale(product: &str, touch: &str, weight: Decimal, qty: i64, date: NaiveDate) -> SaleLine {
        SaleLine {
            product: product.to_string(),
            touch: touch.to_string(),
            weight,
            quantity: qty,
            amount: dec!(25000),
            invoice_date: date,
        }
    }

    fn run(trays: &[Tray], items: &[TrayItem], sales: &[SaleLine]) -> Reconciliation {
        reconcile_trays(trays, items, sales, &ReportDay::utc(day()))
    }

    #[test]
    fn test_matching_sale_sells_whole_item() {
        let result = run(
            &[tray("T1")],
            &[item("a", "T1", "Ring", "22K", dec!(5), 2)],
            &[sale("Ring", "22K", dec!(5), 2, day())],
        );

        let f = result.trays[0].figures;
        assert_eq!(f.opening_qty, 2);
        assert_eq!(f.opening_weight, dec!(10));
        assert_eq!(f.sold_qty, 2);
        assert_eq!(f.sold_weight, dec!(10));
        assert_eq!(f.current_qty, 0);
        assert_eq!(f.current_weight, dec!(0));
        assert!(result.ambiguities.is_empty());
    }

    #[test]
    fn test_static_item_matches_on_trimmed_touch() {
        let result = run(
            &[tray("T1")],
            &[item("a", "T1", "Coin", " 22K ", Decimal::ZERO, 1)],
            &[sale("Coin", "22K", dec!(8), 1, day())],
        );

        let f = result.trays[0].figures;
        assert_eq!(f.sold_qty, 1);
        assert_eq!(f.current_qty, 0);
        assert_eq!(f.opening_weight, Decimal::ZERO);
    }

    #[test]
    fn test_weight_must_match_exactly() {
        let items = [item("a", "T1", "Chain", "916", dec!(5), 1)];

        let off_by_a_hair = run(&[tray("T1")], &items, &[sale("Chain", "916", dec!(5.01), 1, day())]);
        assert_eq!(off_by_a_hair.trays[0].figures.sold_qty, 0);

        let same_value = run(&[tray("T1")], &items, &[sale("Chain", "916", dec!(5.000), 1, day())]);
        assert_eq!(same_value.trays[0].figures.sold_qty, 1);
    }

    #[test]
    fn test_product_name_is_exact() {
        let result = run(
            &[tray("T1")],
            &[item("a", "T1", "Ring", "22K", dec!(5), 1)],
            &[sale("ring", "22K", dec!(5), 1, day())],
        );
        assert_eq!(result.trays[0].figures.sold_qty, 0);
        assert_eq!(result.trays[0].figures.current_qty, 1);
    }

    #[test]
    fn test_sales_from_other_days_are_ignored() {
        let yesterday = day().pred_opt().unwrap();
        let result = run(
            &[tray("T1")],
            &[item("a", "T1", "Ring", "22K", dec!(5), 1)],
            &[sale("Ring", "22K", dec!(5), 1, yesterday)],
        );
        assert_eq!(result.trays[0].figures.sold_qty, 0);
    }

    #[test]
    fn test_trays_created_later_are_out_of_scope() {
        let mut late = tray("T2");
        late.created_at = Some(Utc.with_ymd_and_hms(2026, 10, 20, 0, 30, 0).unwrap());
        let legacy = Tray {
            tray_number: "T0".to_string(),
            created_at: None,
        };

        let result = run(
            &[tray("T1"), late, legacy],
            &[
                item("a", "T1", "Ring", "22K", dec!(5), 1),
                item("b", "T2", "Ring", "22K", dec!(5), 1),
            ],
            &[],
        );

        let numbers: Vec<&str> = result.trays.iter().map(|t| t.tray_number.as_str()).collect();
        assert_eq!(numbers, vec!["T1", "T0"]);
        assert_eq!(result.trays[1].figures, StockFigures::zero());
    }

    #[test]
    fn test_items_added_after_the_day_are_excluded() {
        let mut later = item("b", "T1", "Bangle", "22K", dec!(12), 2);
        later.created_at = Some(Utc.with_ymd_and_hms(2026, 10, 21, 8, 0, 0).unwrap());

        let result = run(
            &[tray("T1")],
            &[item("a", "T1", "Ring", "22K", dec!(5), 1), later],
            &[],
        );
        assert_eq!(result.trays[0].figures.opening_qty, 1);
        assert_eq!(result.trays[0].figures.opening_weight, dec!(5));
    }

    #[test]
    fn test_shop_time_zone_moves_the_date() {
        let mut evening = tray("T1");
        // 20:00 UTC is 01:30 next day in +05:30
        evening.created_at = Some(Utc.with_ymd_and_hms(2026, 10, 19, 20, 0, 0).unwrap());
        let ist = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();

        let utc = reconcile_trays(&[evening.clone()], &[], &[], &ReportDay::utc(day()));
        assert_eq!(utc.trays.len(), 1);

        let local = reconcile_trays(&[evening], &[], &[], &ReportDay::new(day(), ist));
        assert!(local.trays.is_empty());
    }

    #[test]
    fn test_item_counted_once_for_many_sale_lines() {
        let result = run(
            &[tray("T1")],
            &[item("a", "T1", "Ring", "22K", dec!(5), 1)],
            &[
                sale("Ring", "22K", dec!(5), 1, day()),
                sale("Ring", " 22K", dec!(5), 1, day()),
            ],
        );

        assert_eq!(result.trays[0].figures.sold_qty, 1);
        assert_eq!(
            result.ambiguities,
            vec![AmbiguousMatch {
                tray_number: "T1".to_string(),
                item_id: "a".to_string(),
                candidates: 2,
            }]
        );
        assert!(matches!(
            result.ensure_unambiguous(),
            Err(CoreError::AmbiguousMatch { candidates: 2, .. })
        ));
    }

    #[test]
    fn test_duplicate_records_are_sold_once() {
        let a = item("a", "T1", "Ring", "22K", dec!(5), 1);
        let result = run(
            &[tray("T1")],
            &[a.clone(), a],
            &[sale("Ring", "22K", dec!(5), 1, day())],
        );

        let f = result.trays[0].figures;
        assert_eq!(f.opening_qty, 2);
        assert_eq!(f.sold_qty, 1);
        assert_eq!(f.current_qty, 1);
    }

    #[test]
    fn test_items_without_id_are_still_distinct() {
        let result = run(
            &[tray("T1")],
            &[
                item("", "T1", "Ring", "22K", dec!(5), 1),
                item("", "T1", "Stud", "22K", dec!(2), 1),
            ],
            &[
                sale("Ring", "22K", dec!(5), 1, day()),
                sale("Stud", "22K", dec!(2), 1, day()),
            ],
        );
        assert_eq!(result.trays[0].figures.sold_qty, 2);
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let trays = [tray("T1"), tray("T2")];
        let items = [
            item("c", "T2", "Ring", "22K", dec!(5), 1),
            item("a", "T1", "Ring", "22K", dec!(5), 2),
            item("b", "T1", "Chain", "916", dec!(10.5), 1),
        ];
        let sales = [
            sale("Ring", "22K", dec!(5), 1, day()),
            sale("Ring", "22K", dec!(5), 1, day()),
        ];

        let first = run(&trays, &items, &sales);
        let second = run(&trays, &items, &sales);
        assert_eq!(first, second);
    }

    fn assert_sold_within_opening(f: &StockFigures) {
        assert!(f.sold_qty <= f.opening_qty, "{:?}", f);
        assert!(f.sold_weight <= f.opening_weight, "{:?}", f);
        assert!(f.current_qty >= 0);
        assert!(f.current_weight >= Decimal::ZERO);
    }

    #[test]
    fn test_current_stock_never_negative() {
        assert_eq!(remaining_qty(3, 5), 0);
        assert_eq!(remaining_qty(5, 3), 2);
        assert_eq!(remaining_qty(i64::MIN, i64::MAX), 0);
        assert_eq!(remaining_weight(dec!(1.5), dec!(2)), Decimal::ZERO);
        assert_eq!(remaining_weight(Decimal::MIN, Decimal::MAX), Decimal::ZERO);

        let weights = [Decimal::ZERO, dec!(1), dec!(2.5), dec!(-3)];
        for (i, w) in weights.iter().enumerate() {
            for qty in 0..3 {
                let items = [
                    item("a", "T1", "Ring", "22K", *w, qty),
                    item("b", "T1", "Ring", "22K", *w, qty + i as i64),
                ];
                let sales = [sale("Ring", "22K", *w, 1, day())];
                let f = run(&[tray("T1")], &items, &sales).trays[0].figures;
                assert!(f.current_qty >= 0);
                assert!(f.current_weight >= Decimal::ZERO);
                assert!(f.sold_qty <= f.opening_qty);
            }
        }
    }

    #[test]
    fn test_sold_never_exceeds_opening() {
        let a = item("a", "T1", "Ring", "22K", dec!(5), 2);
        let static_coin = item("s", "T1", "Coin", "22K", Decimal::ZERO, 3);
        let day_sales = [
            sale("Ring", "22K", dec!(5), 1, day()),
            sale("Ring", "22K", dec!(5), 1, day()),
            sale("coin", "22K", Decimal::ZERO, 1, day()),
            sale("Coin", "22K", Decimal::ZERO, 1, day()),
        ];

        let cases: Vec<Vec<TrayItem>> = vec![
            // Duplicate records of one item
            vec![a.clone(), a.clone(), a.clone()],
            // Ambiguous matches on every item
            vec![a.clone(), static_coin.clone()],
            // Id-less twins
            vec![
                item("", "T1", "Ring", "22K", dec!(5), 1),
                item("", "T1", "Ring", "22K", dec!(5), 1),
            ],
            vec![static_coin],
        ];

        for items in cases {
            let result = run(&[tray("T1")], &items, &day_sales);
            assert_sold_within_opening(&result.trays[0].figures);
            assert_sold_within_opening(&result.totals());
        }
    }

    #[test]
    fn test_huge_quantities_saturate() {
        let items = [
            item("a", "T1", "Ring", "22K", dec!(5), i64::MAX),
            item("b", "T1", "Ring", "22K", dec!(5), i64::MAX),
        ];
        let result = run(
            &[tray("T1")],
            &items,
            &[sale("Ring", "22K", dec!(5), 1, day())],
        );

        let f = result.trays[0].figures;
        assert_eq!(f.opening_qty, i64::MAX);
        assert_eq!(f.sold_qty, i64::MAX);
        assert_eq!(f.current_qty, 0);
        assert_sold_within_opening(&f);
    }

    #[test]
    fn test_huge_weights_saturate() {
        let grams = dec!(100000000000000000000);
        let items = [item("a", "T1", "Ring", "22K", grams, 10_000_000_000)];
        let result = run(
            &[tray("T1"), tray("T2")],
            &items,
            &[sale("Ring", "22K", grams, 1, day())],
        );

        let f = result.trays[0].figures;
        assert_eq!(f.opening_weight, Decimal::MAX);
        assert_eq!(f.sold_weight, Decimal::MAX);
        assert_eq!(f.current_weight, Decimal::ZERO);
        assert_eq!(result.totals().opening_weight, Decimal::MAX);
    }

    #[test]
    fn test_id_that_looks_like_a_position_stays_distinct() {
        let result = run(
            &[tray("T1")],
            &[
                item("#1", "T1", "Ring", "22K", dec!(5), 1),
                item("", "T1", "Stud", "22K", dec!(2), 1),
            ],
            &[
                sale("Ring", "22K", dec!(5), 1, day()),
                sale("Stud", "22K", dec!(2), 1, day()),
            ],
        );
        assert_eq!(result.trays[0].figures.sold_qty, 2);
        assert_eq!(result.trays[0].figures.current_qty, 0);
    }

    #[test]
    fn test_id_that_looks_like_a_code_stays_distinct() {
        let mut coded = item("", "T1", "Stud", "22K", dec!(2), 1);
        coded.code = "8901234000427".to_string();

        let result = run(
            &[tray("T1")],
            &[item("8901234000427", "T1", "Ring", "22K", dec!(5), 1), coded],
            &[
                sale("Ring", "22K", dec!(5), 1, day()),
                sale("Stud", "22K", dec!(2), 1, day()),
            ],
        );
        assert_eq!(result.trays[0].figures.sold_qty, 2);
    }

    #[test]
    fn test_static_item_ignores_product_casing() {
        let result = run(
            &[tray("T1")],
            &[item("a", "T1", "Gold Coin", "22K", Decimal::ZERO, 1)],
            &[sale(" gold coin", "22K ", Decimal::ZERO, 1, day())],
        );
        assert_eq!(result.trays[0].figures.sold_qty, 1);
        assert_eq!(result.trays[0].figures.current_qty, 0);

        // Touch still has to agree
        let other_touch = run(
            &[tray("T1")],
            &[item("a", "T1", "Gold Coin", "22K", Decimal::ZERO, 1)],
            &[sale("Gold Coin", "18K", Decimal::ZERO, 1, day())],
        );
        assert_eq!(other_touch.trays[0].figures.sold_qty, 0);
    }

    #[test]
    fn test_ambiguity_labels_code_and_position_identities() {
        let mut coded = item("", "T1", "Ring", "22K", dec!(5), 1);
        coded.code = "C-7".to_string();
        let result = run(
            &[tray("T1")],
            &[coded, item("", "T1", "Chain", "916", dec!(8), 1)],
            &[
                sale("Ring", "22K", dec!(5), 1, day()),
                sale("Ring", "22K", dec!(5), 1, day()),
                sale("Chain", "916", dec!(8), 1, day()),
                sale("Chain", "916", dec!(8), 1, day()),
            ],
        );

        let labels: Vec<&str> = result.ambiguities.iter().map(|m| m.item_id.as_str()).collect();
        assert_eq!(labels, vec!["code:C-7", "position:1"]);
    }

    #[test]
    fn test_totals_match_sum_of_trays() {
        let result = run(
            &[tray("T1"), tray("T2")],
            &[
                item("a", "T1", "Ring", "22K", dec!(5), 2),
                item("b", "T2", "Chain", "916", dec!(10), 1),
            ],
            &[sale("Chain", "916", dec!(10), 1, day())],
        );
        let totals = result.totals();
        assert_eq!(totals.opening_qty, 3);
        assert_eq!(totals.opening_weight, dec!(20));
        assert_eq!(totals.sold_weight, dec!(10));
        assert_eq!(totals.current_qty, 2);
    }
}

//! # Domain Types
//!
//! Core domain types used throughout Karat.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Tray       │   │    TrayItem     │   │    SaleLine     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  tray_number    │◄──│  tray_number    │   │  product        │       │
//! │  │  created_at     │   │  product/touch  │   │  touch/weight   │       │
//! │  └─────────────────┘   │  weight/qty     │   │  quantity       │       │
//! │                        │  code           │   │  invoice_date   │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  DocumentKind   │   │  StockFigures   │   │   TrayStock     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  Estimation     │   │  opening/sold/  │   │  tray_number    │       │
//! │  │  Invoice        │   │  current × qty, │   │  + figures      │       │
//! │  └─────────────────┘   │  weight         │   └─────────────────┘       │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Loose Record-Store Payloads
//! The record store is schemaless. Weights arrive as numbers, numeric
//! strings, `null` or not at all; touch may be missing. Input records never
//! fail to deserialize for those reasons: weights default to `0`, touch to
//! the empty string, quantities to `0`.

use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

// =============================================================================
// Lenient Parsing
// =============================================================================

/// Parses a decimal the way the record store writes it.
///
/// Accepts plain (`"5.250"`) and scientific (`"1e3"`) notation, ignoring
/// surrounding whitespace. Returns `None` for anything else.
pub fn parse_decimal(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

fn decimal_from_value(value: &serde_json::Value) -> Option<Decimal> {
    match value {
        serde_json::Value::Number(n) => parse_decimal(&n.to_string()),
        serde_json::Value::String(s) => parse_decimal(s),
        _ => None,
    }
}

fn lenient_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(decimal_from_value)
        .unwrap_or(Decimal::ZERO))
}

fn lenient_quantity<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    let qty = match value {
        Some(serde_json::Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .unwrap_or(0),
        Some(serde_json::Value::String(s)) => s.trim().parse::<i64>().unwrap_or(0),
        _ => 0,
    };
    Ok(qty.max(0))
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

// =============================================================================
// Tray
// =============================================================================

/// A physical container of inventory items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Tray {
    /// Unique tray number.
    pub tray_number: String,

    /// When the tray was set up. `None` for legacy trays, which count as
    /// always existing.
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub created_at: Option<DateTime<Utc>>,
}

// =============================================================================
// Tray Item
// =============================================================================

/// A product placed in a tray.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TrayItem {
    /// Record identity. Orders the matching pass and keys the matched set.
    #[serde(default, alias = "_id")]
    pub id: String,

    /// Product name.
    #[serde(default, deserialize_with = "lenient_string")]
    pub product: String,

    /// Purity grade ("22K", "925"). Compared after trimming.
    #[serde(default, deserialize_with = "lenient_string")]
    pub touch: String,

    /// Unit weight in grams. `0` marks a static (non-weighed) item.
    #[serde(default, deserialize_with = "lenient_decimal")]
    #[ts(as = "String")]
    pub weight: Decimal,

    #[serde(default, deserialize_with = "lenient_quantity")]
    pub quantity: i64,

    /// Tray this item sits in.
    #[serde(default, deserialize_with = "lenient_string")]
    pub tray_number: String,

    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub created_at: Option<DateTime<Utc>>,

    /// Scan identifier (SKU or barcode).
    #[serde(default, alias = "barcode", deserialize_with = "lenient_string")]
    pub code: String,

    #[serde(default, deserialize_with = "lenient_decimal")]
    #[ts(as = "String")]
    pub making_charge_or_wastage: Decimal,
}

impl TrayItem {
    /// Static items carry no weight and are matched on name and touch.
    #[inline]
    pub fn is_static(&self) -> bool {
        self.weight.is_zero()
    }

    /// Total weight of this line: `quantity × weight`, saturating at the
    /// decimal range.
    #[inline]
    pub fn line_weight(&self) -> Decimal {
        Decimal::from(self.quantity).saturating_mul(self.weight)
    }
}

// =============================================================================
// Sale Line
// =============================================================================

/// One product entry of a sales invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SaleLine {
    #[serde(default, deserialize_with = "lenient_string")]
    pub product: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub touch: String,

    #[serde(default, deserialize_with = "lenient_decimal")]
    #[ts(as = "String")]
    pub weight: Decimal,

    #[serde(default, deserialize_with = "lenient_quantity")]
    pub quantity: i64,

    #[serde(default, deserialize_with = "lenient_decimal")]
    #[ts(as = "String")]
    pub amount: Decimal,

    /// Date of the parent invoice.
    #[ts(as = "String")]
    pub invoice_date: NaiveDate,
}

// =============================================================================
// Documents
// =============================================================================

/// Kinds of numbered documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Price estimation handed to a customer.
    Estimation,
    /// Sales invoice.
    Invoice,
}

impl DocumentKind {
    /// Prefix used when none is configured.
    pub const fn default_prefix(&self) -> &'static str {
        match self {
            DocumentKind::Estimation => "EST-",
            DocumentKind::Invoice => "INV-",
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentKind::Estimation => write!(f, "estimation"),
            DocumentKind::Invoice => write!(f, "invoice"),
        }
    }
}

/// A numbered document master as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMaster {
    #[serde(default, alias = "_id")]
    pub id: String,
    pub kind: DocumentKind,
    /// Human-readable number, e.g. `EST-008`.
    pub number: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Stock Figures
// =============================================================================

/// Opening, sold and current stock for one tray or a whole report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StockFigures {
    pub opening_qty: i64,
    #[ts(as = "String")]
    pub opening_weight: Decimal,
    pub sold_qty: i64,
    #[ts(as = "String")]
    pub sold_weight: Decimal,
    pub current_qty: i64,
    #[ts(as = "String")]
    pub current_weight: Decimal,
}

impl StockFigures {
    /// All-zero figures.
    pub const fn zero() -> Self {
        StockFigures {
            opening_qty: 0,
            opening_weight: Decimal::ZERO,
            sold_qty: 0,
            sold_weight: Decimal::ZERO,
            current_qty: 0,
            current_weight: Decimal::ZERO,
        }
    }
}

/// Field-wise sum, saturating at the numeric range.
impl Add for StockFigures {
    type Output = StockFigures;

    fn add(self, rhs: StockFigures) -> StockFigures {
        StockFigures {
            opening_qty: self.opening_qty.saturating_add(rhs.opening_qty),
            opening_weight: self.opening_weight.saturating_add(rhs.opening_weight),
            sold_qty: self.sold_qty.saturating_add(rhs.sold_qty),
            sold_weight: self.sold_weight.saturating_add(rhs.sold_weight),
            current_qty: self.current_qty.saturating_add(rhs.current_qty),
            current_weight: self.current_weight.saturating_add(rhs.current_weight),
        }
    }
}

impl AddAssign for StockFigures {
    fn add_assign(&mut self, rhs: StockFigures) {
        *self = *self + rhs;
    }
}

impl Sum for StockFigures {
    fn sum<I: Iterator<Item = StockFigures>>(iter: I) -> Self {
        iter.fold(StockFigures::zero(), Add::add)
    }
}

impl<'a> Sum<&'a StockFigures> for StockFigures {
    fn sum<I: Iterator<Item = &'a StockFigures>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Reconciled stock of one tray for one report day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TrayStock {
    pub tray_number: String,
    #[serde(flatten)]
    pub figures: StockFigures,
}

// =============================================================================
// Unit Tests
// =============================================================================

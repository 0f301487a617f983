//! # Sequential Number Allocator
//!
//! Derives the next human-readable document number (`EST-008`, `INV-1042`)
//! from the numbers already issued.
//!
//! ## Allocation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  existing: EST-007, EST-003, INV-010, EST-TMP2026...                   │
//! │       │                                                                 │
//! │       ▼  keep numbers starting with prefix "EST-"                      │
//! │  EST-007, EST-003, EST-TMP2026...                                      │
//! │       │                                                                 │
//! │       ▼  parse suffix, drop what is not an integer                     │
//! │  7, 3                                                                   │
//! │       │                                                                 │
//! │       ▼  max + 1, zero-padded to min_digits                            │
//! │  EST-008                                                                │
//! │                                                                         │
//! │  Lookup failed? ──► emergency number EST-TMP20261019101500123          │
//! │                     (degraded: surfaced to the user for review)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency
//! The allocator holds no lock. Two callers working from the same snapshot
//! compute the same number; the record store's unique constraint decides
//! the winner and the loser re-fetches and allocates again.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// Minimum width of the numeric suffix.
pub const DEFAULT_MIN_DIGITS: usize = 3;

/// Marker placed between prefix and timestamp in emergency numbers.
///
/// Emergency suffixes never parse as integers, so a degraded number cannot
/// push later sequential numbers into the timestamp range.
pub const EMERGENCY_MARKER: &str = "TMP";

/// Largest numeric suffix among `existing` numbers carrying `prefix`.
///
/// Numbers with another prefix or a non-integer suffix are ignored.
pub fn max_suffix<I, S>(existing: I, prefix: &str) -> Option<u64>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    existing
        .into_iter()
        .filter_map(|number| {
            number
                .as_ref()
                .strip_prefix(prefix)
                .and_then(|suffix| suffix.trim().parse::<u64>().ok())
        })
        .max()
}

/// Formats `prefix` + `value` zero-padded to at least `min_digits`.
pub fn format_number(prefix: &str, value: u64, min_digits: usize) -> String {
    format!("{}{:0width$}", prefix, value, width = min_digits)
}

/// Computes the next document number for `prefix`.
///
/// ## Example
/// ```rust
/// use karat_core::numbering::next_number;
///
/// let none: [&str; 0] = [];
/// assert_eq!(next_number(none, "EST-", 3), "EST-001");
/// assert_eq!(next_number(["EST-007", "EST-003"], "EST-", 3), "EST-008");
/// ```
pub fn next_number<I, S>(existing: I, prefix: &str, min_digits: usize) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let next = max_suffix(existing, prefix).unwrap_or(0).saturating_add(1);
    format_number(prefix, next, min_digits)
}

/// Non-sequential number derived from the clock, used when the existing
/// numbers cannot be read.
pub fn emergency_number(prefix: &str, now: DateTime<Utc>) -> String {
    format!(
        "{}{}{}",
        prefix,
        EMERGENCY_MARKER,
        now.format("%Y%m%d%H%M%S%3f")
    )
}

// =============================================================================
// Allocation
// =============================================================================

/// Outcome of an allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum NumberAllocation {
    /// `max + 1` from a successful lookup.
    Sequential { number: String },
    /// Lookup failed; the number is an emergency identifier.
    Degraded { number: String, reason: String },
}

impl NumberAllocation {
    /// The allocated number, whatever the mode.
    pub fn number(&self) -> &str {
        match self {
            NumberAllocation::Sequential { number } => number,
            NumberAllocation::Degraded { number, .. } => number,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, NumberAllocation::Degraded { .. })
    }

    /// Warning to surface to the user, if any.
    pub fn warning(&self) -> Option<CoreError> {
        match self {
            NumberAllocation::Sequential { .. } => None,
            NumberAllocation::Degraded { number, reason } => Some(CoreError::NumberingDegraded {
                number: number.clone(),
                reason: reason.clone(),
            }),
        }
    }
}

/// Allocates a number from the outcome of the existing-number lookup.
///
/// Fails open: a failed lookup yields a degraded emergency number instead
/// of an error.
pub fn allocate<S, E>(
    lookup: Result<Vec<S>, E>,
    prefix: &str,
    min_digits: usize,
    now: DateTime<Utc>,
) -> NumberAllocation
where
    S: AsRef<str>,
    E: std::fmt::Display,
{
    match lookup {
        Ok(existing) => NumberAllocation::Sequential {
            number: next_number(existing, prefix, min_digits),
        },
        Err(e) => NumberAllocation::Degraded {
            number: emergency_number(prefix, now),
            reason: e.to_string(),
        },
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

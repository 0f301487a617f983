//! # Identifier Generator
//!
//! Builds SKUs and scannable barcodes from product attributes.
//!
//! ## Identifier Shapes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  SKU       GOL RIN 482913                                              │
//! │            ─┬─ ─┬─ ───┬──                                              │
//! │             │   │     └── disambiguator (timestamp tail)               │
//! │             │   └──────── first 3 of name, uppercased                  │
//! │             └──────────── first 3 of category, uppercased              │
//! │                                                                         │
//! │  EAN-13    890 1234 00042 7                                            │
//! │            ─┬─ ──┬─ ──┬── ┬                                            │
//! │             │    │    │   └── ean13_check_digit                        │
//! │             │    │    └────── product segment, zero-padded             │
//! │             │    └─────────── company code                             │
//! │             └──────────────── country prefix                           │
//! │                                                                         │
//! │  CODE128   1760868900123 07 [9]                                        │
//! │            ──────┬────── ┬─  ┬                                         │
//! │                  │       │   └── optional checksum digit               │
//! │                  │       └────── small random nonce                    │
//! │                  └────────────── timestamp (ms)                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! SKU uniqueness is probabilistic: nothing here looks up existing SKUs, so
//! two calls in the same millisecond tail with the same attributes collide.
//! The record store's unique constraint is the real guard.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::checksum::{
    ean13_check_digit, luhn_style_check_digit, weighted_sum_checksum, EAN13_PAYLOAD_LEN,
};
use crate::error::{EncodingError, ValidationError};

/// Characters taken from each of category and name.
const SKU_SEGMENT_LEN: usize = 3;

/// Digits of the millisecond timestamp used as SKU disambiguator.
pub const SKU_DISAMBIGUATOR_DIGITS: u32 = 6;

// =============================================================================
// Barcode Kinds
// =============================================================================

/// Checksum appended to a CODE128 payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Code128Check {
    /// Payload is used as-is.
    None,
    /// Append `weighted_sum_checksum(payload)`.
    #[default]
    WeightedSum,
    /// Append `luhn_style_check_digit(payload)`. Digit payloads only.
    LuhnStyle,
}

/// Barcode symbology to generate or validate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BarcodeKind {
    Ean13,
    Code128 { check: Code128Check },
}

impl std::fmt::Display for BarcodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BarcodeKind::Ean13 => write!(f, "EAN13"),
            BarcodeKind::Code128 { .. } => write!(f, "CODE128"),
        }
    }
}

// =============================================================================
// SKU
// =============================================================================

fn sku_segment(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .take(SKU_SEGMENT_LEN)
        .collect::<String>()
        .to_ascii_uppercase()
}

/// Generates a SKU from category, name and a disambiguator.
///
/// Only ASCII letters and digits are kept from category and name so the
/// result stays scannable.
///
/// ## Example
/// ```rust
/// use karat_core::identifier::generate_sku;
///
/// let sku = generate_sku("Gold", "Ring", "482913").unwrap();
/// assert_eq!(sku, "GOLRIN482913");
/// ```
pub fn generate_sku(
    category: &str,
    name: &str,
    disambiguator: &str,
) -> Result<String, ValidationError> {
    let category_part = sku_segment(category);
    let name_part = sku_segment(name);

    if category_part.is_empty() && name_part.is_empty() {
        return Err(ValidationError::required("category or name"));
    }

    let disambiguator = disambiguator.trim();
    if disambiguator.is_empty() {
        return Err(ValidationError::required("disambiguator"));
    }
    if !disambiguator.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ValidationError::InvalidFormat {
            field: "disambiguator".to_string(),
            reason: "must contain only ASCII letters and digits".to_string(),
        });
    }

    Ok(format!("{}{}{}", category_part, name_part, disambiguator))
}

/// Returns the last `digits` digits of the millisecond timestamp.
pub fn timestamp_tail(now: DateTime<Utc>, digits: u32) -> String {
    let modulus = 10_i64.pow(digits.min(18));
    format!(
        "{:0width$}",
        now.timestamp_millis().rem_euclid(modulus),
        width = digits as usize
    )
}

/// Default SKU disambiguator: the six-digit millisecond tail.
pub fn sku_disambiguator(now: DateTime<Utc>) -> String {
    timestamp_tail(now, SKU_DISAMBIGUATOR_DIGITS)
}

/// CODE128 seed: millisecond timestamp followed by a two-digit nonce.
pub fn code128_seed(now: DateTime<Utc>, nonce: u16) -> String {
    format!("{}{:02}", now.timestamp_millis(), nonce % 100)
}

// =============================================================================
// Barcode Generator
// =============================================================================

/// Barcode generator holding the fixed EAN-13 prefix.
///
/// Holds no mutable state; share one instance or build one per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarcodeGenerator {
    ean_prefix: String,
}

impl BarcodeGenerator {
    /// Creates a generator from a GS1 country prefix and company code.
    ///
    /// Both must be digits and together leave at least one digit for the
    /// product segment.
    pub fn new(country_prefix: &str, company_code: &str) -> Result<Self, EncodingError> {
        let prefix = format!("{}{}", country_prefix.trim(), company_code.trim());
        if prefix.is_empty()
            || prefix.len() >= EAN13_PAYLOAD_LEN
            || !prefix.chars().all(|c| c.is_ascii_digit())
        {
            return Err(EncodingError::InvalidPrefix { prefix });
        }
        Ok(BarcodeGenerator { ean_prefix: prefix })
    }

    /// Digits available for the EAN-13 product segment.
    pub fn product_segment_len(&self) -> usize {
        EAN13_PAYLOAD_LEN - self.ean_prefix.len()
    }

    /// Generates a barcode of the given kind from a seed.
    ///
    /// ## Errors
    /// - `EmptySeed` for a blank seed
    /// - `NonNumericSeed` / `SeedTooLong` when an EAN-13 seed cannot be
    ///   zero-padded into the product segment
    /// - `UnsupportedCharacter` for CODE128 seeds outside `[A-Za-z0-9]`
    pub fn generate(&self, kind: BarcodeKind, seed: &str) -> Result<String, EncodingError> {
        let seed = seed.trim();
        if seed.is_empty() {
            return Err(EncodingError::EmptySeed);
        }

        match kind {
            BarcodeKind::Ean13 => self.ean13(seed),
            BarcodeKind::Code128 { check } => code128(seed, check),
        }
    }

    fn ean13(&self, seed: &str) -> Result<String, EncodingError> {
        if !seed.chars().all(|c| c.is_ascii_digit()) {
            return Err(EncodingError::NonNumericSeed {
                seed: seed.to_string(),
            });
        }

        let max = self.product_segment_len();
        if seed.len() > max {
            return Err(EncodingError::SeedTooLong {
                seed: seed.to_string(),
                len: seed.len(),
                max,
            });
        }

        let payload = format!("{}{:0>width$}", self.ean_prefix, seed, width = max);
        let check = ean13_check_digit(&payload).map_err(|_| EncodingError::NonNumericSeed {
            seed: seed.to_string(),
        })?;

        Ok(format!("{}{}", payload, check))
    }
}

fn code128(seed: &str, check: Code128Check) -> Result<String, EncodingError> {
    if !seed.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(EncodingError::UnsupportedCharacter {
            seed: seed.to_string(),
        });
    }

    match check {
        Code128Check::None => Ok(seed.to_string()),
        Code128Check::WeightedSum => Ok(format!("{}{}", seed, weighted_sum_checksum(seed))),
        Code128Check::LuhnStyle => {
            let digit =
                luhn_style_check_digit(seed).map_err(|_| EncodingError::NonNumericSeed {
                    seed: seed.to_string(),
                })?;
            Ok(format!("{}{}", seed, digit))
        }
    }
}

// =============================================================================
// Validation
// =============================================================================

/// Splits `value` into payload and trailing check digit.
fn split_check_digit(value: &str) -> Option<(&str, u8)> {
    if value.len() < 2 || !value.is_ascii() {
        return None;
    }
    let (payload, last) = value.split_at(value.len() - 1);
    let digit = last.chars().next()?.to_digit(10)?;
    Some((payload, digit as u8))
}

/// Recomputes the checksum of a scanned value and compares it with the
/// trailing check digit.
///
/// Used to reject corrupted or mistyped codes before accepting a scan.
///
/// ## Example
/// ```rust
/// use karat_core::identifier::{validate_barcode, BarcodeKind};
///
/// assert!(validate_barcode("4006381333931", BarcodeKind::Ean13));
/// assert!(!validate_barcode("4006381333932", BarcodeKind::Ean13));
/// ```
pub fn validate_barcode(value: &str, kind: BarcodeKind) -> bool {
    let value = value.trim();

    match kind {
        BarcodeKind::Ean13 => {
            if value.len() != EAN13_PAYLOAD_LEN + 1 {
                return false;
            }
            match split_check_digit(value) {
                Some((payload, digit)) => ean13_check_digit(payload) == Ok(digit),
                None => false,
            }
        }
        BarcodeKind::Code128 { check } => {
            if value.is_empty() || !value.chars().all(|c| c.is_ascii_alphanumeric()) {
                return false;
            }
            match check {
                Code128Check::None => true,
                Code128Check::WeightedSum => split_check_digit(value)
                    .is_some_and(|(payload, digit)| weighted_sum_checksum(payload) == digit),
                Code128Check::LuhnStyle => split_check_digit(value)
                    .is_some_and(|(payload, digit)| luhn_style_check_digit(payload) == Ok(digit)),
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn generator() -> BarcodeGenerator {
        BarcodeGenerator::new("890", "1234").unwrap()
    }

    #[test]
    fn test_generate_sku() {
        assert_eq!(generate_sku("Gold", "Ring", "482913").unwrap(), "GOLRIN482913");
        assert_eq!(generate_sku("silver", "anklet", "7").unwrap(), "SILANK7");
        // Short and spaced inputs
        assert_eq!(generate_sku("Au", "Nose pin", "1").unwrap(), "AUNOS1");
        // Non-ASCII letters are skipped
        assert_eq!(generate_sku("Gold", "Ñapa", "1").unwrap(), "GOLAPA1");
    }

    #[test]
    fn test_generate_sku_rejects_blank_input() {
        assert!(generate_sku("", "  ", "123").is_err());
        assert!(generate_sku("Gold", "Ring", "").is_err());
        assert!(generate_sku("Gold", "Ring", "12-3").is_err());
    }

    #[test]
    fn test_distinct_disambiguators_give_distinct_skus() {
        let t1 = Utc.timestamp_millis_opt(1_760_868_900_123).unwrap();
        let t2 = Utc.timestamp_millis_opt(1_760_868_900_124).unwrap();
        let a = generate_sku("Gold", "Ring", &sku_disambiguator(t1)).unwrap();
        let b = generate_sku("Gold", "Ring", &sku_disambiguator(t2)).unwrap();
        assert_eq!(a, "GOLRIN900123");
        assert_ne!(a, b);
    }

    #[test]
    fn test_timestamp_tail_is_zero_padded() {
        let t = Utc.timestamp_millis_opt(1_000_000_000_042).unwrap();
        assert_eq!(timestamp_tail(t, 6), "000042");
    }

    #[test]
    fn test_code128_seed() {
        let t = Utc.timestamp_millis_opt(1_760_868_900_123).unwrap();
        assert_eq!(code128_seed(t, 7), "176086890012307");
        assert_eq!(code128_seed(t, 142), "176086890012342");
    }

    #[test]
    fn test_ean13_generation() {
        let barcode = generator().generate(BarcodeKind::Ean13, "42").unwrap();
        assert_eq!(barcode, "8901234000427");
        assert!(validate_barcode(&barcode, BarcodeKind::Ean13));
    }

    #[test]
    fn test_ean13_seed_errors() {
        let gen = generator();
        assert_eq!(gen.product_segment_len(), 5);
        assert!(matches!(
            gen.generate(BarcodeKind::Ean13, "123456"),
            Err(EncodingError::SeedTooLong { len: 6, max: 5, .. })
        ));
        assert!(matches!(
            gen.generate(BarcodeKind::Ean13, "12a"),
            Err(EncodingError::NonNumericSeed { .. })
        ));
        assert_eq!(
            gen.generate(BarcodeKind::Ean13, "   "),
            Err(EncodingError::EmptySeed)
        );
    }

    #[test]
    fn test_invalid_prefix() {
        assert!(BarcodeGenerator::new("", "").is_err());
        assert!(BarcodeGenerator::new("890", "123456789").is_err());
        assert!(BarcodeGenerator::new("89O", "1").is_err());
    }

    #[test]
    fn test_code128_generation() {
        let gen = generator();
        let weighted = BarcodeKind::Code128 {
            check: Code128Check::WeightedSum,
        };
        assert_eq!(gen.generate(weighted, "123456").unwrap(), "1234569");

        let plain = BarcodeKind::Code128 {
            check: Code128Check::None,
        };
        assert_eq!(gen.generate(plain, "RING22K").unwrap(), "RING22K");

        let luhn = BarcodeKind::Code128 {
            check: Code128Check::LuhnStyle,
        };
        assert_eq!(gen.generate(luhn, "7992739871").unwrap(), "79927398713");
        assert!(gen.generate(luhn, "RING").is_err());

        assert!(matches!(
            gen.generate(plain, "RING 22K"),
            Err(EncodingError::UnsupportedCharacter { .. })
        ));
    }

    #[test]
    fn test_generated_codes_validate() {
        let gen = generator();
        let t = Utc.timestamp_millis_opt(1_760_868_900_123).unwrap();
        for nonce in 0..100u16 {
            let seed = code128_seed(t, nonce);
            for check in [Code128Check::WeightedSum, Code128Check::LuhnStyle] {
                let kind = BarcodeKind::Code128 { check };
                let code = gen.generate(kind, &seed).unwrap();
                assert!(validate_barcode(&code, kind), "{} failed {:?}", code, check);
            }
        }
    }

    #[test]
    fn test_validate_detects_mistyped_codes() {
        assert!(validate_barcode("4006381333931", BarcodeKind::Ean13));
        assert!(!validate_barcode("4006381333913", BarcodeKind::Ean13));
        assert!(!validate_barcode("400638133393", BarcodeKind::Ean13));
        assert!(!validate_barcode("40063813339X1", BarcodeKind::Ean13));

        let weighted = BarcodeKind::Code128 {
            check: Code128Check::WeightedSum,
        };
        assert!(validate_barcode("1234569", weighted));
        assert!(!validate_barcode("1234568", weighted));
        assert!(!validate_barcode("9", weighted));
        assert!(!validate_barcode("", weighted));
    }
}

//! # Karat Configuration
//!
//! Numbering, barcode and report settings.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     KARAT_ESTIMATION_PREFIX=EST-                                       │
//! │     KARAT_UTC_OFFSET_MINUTES=330                                       │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/karat/karat.toml (Linux)                                 │
//! │     ~/Library/Application Support/com.karat.karat/karat.toml (macOS)   │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [numbering]
//! estimation_prefix = "EST-"
//! invoice_prefix = "INV-"
//! min_digits = 3
//! max_create_attempts = 3
//!
//! [barcode]
//! country_prefix = "890"
//! company_code = "0001"
//! code128_check = "weighted_sum"   # none | weighted_sum | luhn_style
//!
//! [report]
//! utc_offset_minutes = 330
//! ```

use std::path::PathBuf;

use chrono::FixedOffset;
use karat_core::numbering::DEFAULT_MIN_DIGITS;
use karat_core::validation::{validate_min_digits, validate_prefix};
use karat_core::{BarcodeGenerator, Code128Check, DocumentKind};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};

// =============================================================================
// Numbering Settings
// =============================================================================

/// Document numbering settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberingSettings {
    #[serde(default = "default_estimation_prefix")]
    pub estimation_prefix: String,

    #[serde(default = "default_invoice_prefix")]
    pub invoice_prefix: String,

    /// Minimum width of the zero-padded suffix.
    #[serde(default = "default_min_digits")]
    pub min_digits: usize,

    /// Creates attempted before giving up on duplicate numbers.
    #[serde(default = "default_max_create_attempts")]
    pub max_create_attempts: u32,
}

fn default_estimation_prefix() -> String {
    DocumentKind::Estimation.default_prefix().to_string()
}

fn default_invoice_prefix() -> String {
    DocumentKind::Invoice.default_prefix().to_string()
}

fn default_min_digits() -> usize {
    DEFAULT_MIN_DIGITS
}

fn default_max_create_attempts() -> u32 {
    3
}

impl Default for NumberingSettings {
    fn default() -> Self {
        NumberingSettings {
            estimation_prefix: default_estimation_prefix(),
            invoice_prefix: default_invoice_prefix(),
            min_digits: default_min_digits(),
            max_create_attempts: default_max_create_attempts(),
        }
    }
}

impl NumberingSettings {
    /// Prefix configured for a document kind.
    pub fn prefix(&self, kind: DocumentKind) -> &str {
        match kind {
            DocumentKind::Estimation => &self.estimation_prefix,
            DocumentKind::Invoice => &self.invoice_prefix,
        }
    }
}

// =============================================================================
// Barcode Settings
// =============================================================================

/// Barcode generation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarcodeSettings {
    /// GS1 country prefix for EAN-13 codes.
    #[serde(default = "default_country_prefix")]
    pub country_prefix: String,

    /// Company segment following the country prefix.
    #[serde(default = "default_company_code")]
    pub company_code: String,

    /// Checksum appended to CODE128 labels.
    #[serde(default)]
    pub code128_check: Code128Check,
}

fn default_country_prefix() -> String {
    "890".to_string()
}

fn default_company_code() -> String {
    "0001".to_string()
}

impl Default for BarcodeSettings {
    fn default() -> Self {
        BarcodeSettings {
            country_prefix: default_country_prefix(),
            company_code: default_company_code(),
            code128_check: Code128Check::default(),
        }
    }
}

impl BarcodeSettings {
    /// Builds the generator for these settings.
    pub fn generator(&self) -> StoreResult<BarcodeGenerator> {
        Ok(BarcodeGenerator::new(
            &self.country_prefix,
            &self.company_code,
        )?)
    }
}

fn parse_code128_check(s: &str) -> Option<Code128Check> {
    match s.to_lowercase().as_str() {
        "none" => Some(Code128Check::None),
        "weighted_sum" | "weighted" => Some(Code128Check::WeightedSum),
        "luhn_style" | "luhn" => Some(Code128Check::LuhnStyle),
        _ => None,
    }
}

// =============================================================================
// Report Settings
// =============================================================================

/// Tray report settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSettings {
    /// Shop time zone as minutes east of UTC. Timestamps are turned into
    /// calendar dates in this zone.
    #[serde(default = "default_utc_offset_minutes")]
    pub utc_offset_minutes: i32,
}

fn default_utc_offset_minutes() -> i32 {
    330
}

impl Default for ReportSettings {
    fn default() -> Self {
        ReportSettings {
            utc_offset_minutes: default_utc_offset_minutes(),
        }
    }
}

impl ReportSettings {
    pub fn offset(&self) -> StoreResult<FixedOffset> {
        FixedOffset::east_opt(self.utc_offset_minutes * 60).ok_or_else(|| {
            StoreError::Config(format!(
                "utc_offset_minutes out of range: {}",
                self.utc_offset_minutes
            ))
        })
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete Karat configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KaratConfig {
    #[serde(default)]
    pub numbering: NumberingSettings,

    #[serde(default)]
    pub barcode: BarcodeSettings,

    #[serde(default)]
    pub report: ReportSettings,
}

impl KaratConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (karat.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> StoreResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> StoreResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| StoreError::Config("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> StoreResult<()> {
        let numbering = &self.numbering;
        validate_prefix(&numbering.estimation_prefix)?;
        validate_prefix(&numbering.invoice_prefix)?;
        validate_min_digits(numbering.min_digits)?;

        if numbering.estimation_prefix == numbering.invoice_prefix {
            return Err(StoreError::Config(
                "estimation and invoice prefixes must differ".into(),
            ));
        }

        if numbering.max_create_attempts == 0 {
            return Err(StoreError::Config(
                "max_create_attempts must be greater than 0".into(),
            ));
        }

        self.barcode.generator()?;
        self.report.offset()?;

        Ok(())
    }

    /// Applies `KARAT_*` overrides read through `var`.
    fn apply_overrides<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(prefix) = var("KARAT_ESTIMATION_PREFIX") {
            debug!(prefix = %prefix, "Overriding estimation prefix from environment");
            self.numbering.estimation_prefix = prefix;
        }

        if let Some(prefix) = var("KARAT_INVOICE_PREFIX") {
            debug!(prefix = %prefix, "Overriding invoice prefix from environment");
            self.numbering.invoice_prefix = prefix;
        }

        if let Some(digits) = var("KARAT_MIN_DIGITS") {
            match digits.parse::<usize>() {
                Ok(d) => self.numbering.min_digits = d,
                Err(_) => warn!(value = %digits, "Ignoring non-numeric KARAT_MIN_DIGITS"),
            }
        }

        if let Some(attempts) = var("KARAT_MAX_CREATE_ATTEMPTS") {
            match attempts.parse::<u32>() {
                Ok(a) => self.numbering.max_create_attempts = a,
                Err(_) => {
                    warn!(value = %attempts, "Ignoring non-numeric KARAT_MAX_CREATE_ATTEMPTS")
                }
            }
        }

        if let Some(prefix) = var("KARAT_EAN_COUNTRY_PREFIX") {
            self.barcode.country_prefix = prefix;
        }

        if let Some(code) = var("KARAT_EAN_COMPANY_CODE") {
            self.barcode.company_code = code;
        }

        if let Some(check) = var("KARAT_CODE128_CHECK") {
            match parse_code128_check(&check) {
                Some(c) => self.barcode.code128_check = c,
                None => warn!(value = %check, "Unknown CODE128 checksum in environment"),
            }
        }

        if let Some(offset) = var("KARAT_UTC_OFFSET_MINUTES") {
            match offset.parse::<i32>() {
                Ok(o) => {
                    debug!(minutes = o, "Overriding UTC offset from environment");
                    self.report.utc_offset_minutes = o;
                }
                Err(_) => warn!(value = %offset, "Ignoring non-numeric KARAT_UTC_OFFSET_MINUTES"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "karat", "karat")
            .map(|dirs| dirs.config_dir().join("karat.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = KaratConfig::default();
        assert_eq!(config.numbering.prefix(DocumentKind::Estimation), "EST-");
        assert_eq!(config.numbering.prefix(DocumentKind::Invoice), "INV-");
        assert_eq!(config.numbering.min_digits, 3);
        assert_eq!(config.barcode.code128_check, Code128Check::WeightedSum);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = KaratConfig::default();

        config.numbering.invoice_prefix = "EST-".to_string();
        assert!(config.validate().is_err());

        config.numbering.invoice_prefix = "INV1".to_string();
        assert!(config.validate().is_err());

        config.numbering.invoice_prefix = "INV-".to_string();
        config.numbering.max_create_attempts = 0;
        assert!(config.validate().is_err());

        config.numbering.max_create_attempts = 1;
        config.barcode.company_code = "123456789".to_string();
        assert!(config.validate().is_err());

        config.barcode.company_code = "0001".to_string();
        config.report.utc_offset_minutes = 24 * 60;
        assert!(config.validate().is_err());

        config.report.utc_offset_minutes = -300;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("KARAT_ESTIMATION_PREFIX", "QT-"),
            ("KARAT_MIN_DIGITS", "5"),
            ("KARAT_CODE128_CHECK", "luhn"),
            ("KARAT_UTC_OFFSET_MINUTES", "0"),
            ("KARAT_MAX_CREATE_ATTEMPTS", "not-a-number"),
        ]
        .into_iter()
        .collect();

        let mut config = KaratConfig::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.numbering.estimation_prefix, "QT-");
        assert_eq!(config.numbering.min_digits, 5);
        assert_eq!(config.barcode.code128_check, Code128Check::LuhnStyle);
        assert_eq!(config.report.utc_offset_minutes, 0);
        assert_eq!(config.numbering.max_create_attempts, 3);
    }

    #[test]
    fn test_bad_numeric_env_values_keep_current_settings() {
        let vars: HashMap<&str, &str> = [
            ("KARAT_MIN_DIGITS", "three"),
            ("KARAT_MAX_CREATE_ATTEMPTS", "-1"),
            ("KARAT_UTC_OFFSET_MINUTES", "+05:30"),
            ("KARAT_CODE128_CHECK", "crc32"),
        ]
        .into_iter()
        .collect();

        let mut config = KaratConfig::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config, KaratConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_partial_file() {
        let config: KaratConfig = toml::from_str(
            r#"
            [numbering]
            invoice_prefix = "BILL-"

            [barcode]
            code128_check = "none"
            "#,
        )
        .unwrap();

        assert_eq!(config.numbering.invoice_prefix, "BILL-");
        assert_eq!(config.numbering.estimation_prefix, "EST-");
        assert_eq!(config.barcode.code128_check, Code128Check::None);
        assert_eq!(config.report.utc_offset_minutes, 330);
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir()
            .join(format!("karat-config-{}", std::process::id()))
            .join("karat.toml");

        let mut config = KaratConfig::default();
        config.numbering.invoice_prefix = "BILL-".to_string();
        config.barcode.code128_check = Code128Check::LuhnStyle;
        config.save(Some(path.clone())).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let loaded: KaratConfig = toml::from_str(&contents).unwrap();
        assert_eq!(loaded, config);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_load_from_explicit_missing_path_uses_defaults() {
        let path = std::env::temp_dir().join("karat-config-that-does-not-exist.toml");
        let config = KaratConfig::load(Some(path)).unwrap();
        assert_eq!(config.numbering.min_digits, DEFAULT_MIN_DIGITS);
    }
}

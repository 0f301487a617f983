//! # Identifier Service
//!
//! Issues SKUs and barcodes for new items and checks scanned codes.
//! Supplies the clock and the random nonce that the pure generators in
//! karat-core take as inputs.

use chrono::Utc;
use karat_core::identifier::{code128_seed, generate_sku, sku_disambiguator, timestamp_tail};
use karat_core::validation::validate_scan;
use karat_core::{BarcodeGenerator, BarcodeKind, Code128Check};
use rand::Rng;
use tracing::debug;

use crate::config::BarcodeSettings;
use crate::error::StoreResult;

/// Which symbology a new label uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelFormat {
    Ean13,
    Code128,
}

/// Issues identifiers for new items.
#[derive(Debug, Clone)]
pub struct IdentifierService {
    generator: BarcodeGenerator,
    code128_check: Code128Check,
}

impl IdentifierService {
    pub fn from_settings(settings: &BarcodeSettings) -> StoreResult<Self> {
        Ok(IdentifierService {
            generator: settings.generator()?,
            code128_check: settings.code128_check,
        })
    }

    /// The barcode kind produced for `format` under the current settings.
    pub fn kind(&self, format: LabelFormat) -> BarcodeKind {
        match format {
            LabelFormat::Ean13 => BarcodeKind::Ean13,
            LabelFormat::Code128 => BarcodeKind::Code128 {
                check: self.code128_check,
            },
        }
    }

    /// New SKU for an item, e.g. `GOLRIN482913`.
    pub fn new_sku(&self, category: &str, name: &str) -> StoreResult<String> {
        let sku = generate_sku(category, name, &sku_disambiguator(Utc::now()))?;
        debug!(%sku, "Generated SKU");
        Ok(sku)
    }

    /// New barcode value for a label.
    pub fn new_barcode(&self, format: LabelFormat) -> StoreResult<String> {
        let now = Utc::now();
        let kind = self.kind(format);

        let seed = match format {
            LabelFormat::Ean13 => {
                timestamp_tail(now, self.generator.product_segment_len() as u32)
            }
            LabelFormat::Code128 => code128_seed(now, rand::thread_rng().gen_range(0..100)),
        };

        let code = self.generator.generate(kind, &seed)?;
        debug!(%code, %kind, "Generated barcode");
        Ok(code)
    }

    /// Checks a scanned code against the label format.
    pub fn check_scan(&self, code: &str, format: LabelFormat) -> StoreResult<()> {
        Ok(validate_scan(code, self.kind(format))?)
    }
}

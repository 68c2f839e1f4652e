//! On-disk catalog format.
//!
//! The current document is versioned (`schemaVersion`); the unversioned
//! layout written by the first storefront is still readable and is migrated
//! on load.

mod document;
mod legacy;

pub use document::{
    CURRENT_SCHEMA_VERSION, CatalogDocument, StoredCategory, StoredCombination, StoredProduct,
    StoredSlide, StoredVariants,
};
pub use legacy::{LegacyProduct, migrate_legacy_products};

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use thiserror::Error;

use storefront_catalog::{Product, SliderLineup};

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("malformed catalog document: {0}")]
    Malformed(String),

    #[error("unsupported schema version {0}")]
    UnsupportedVersion(u64),

    #[error("stored catalog is inconsistent: {0}")]
    Inconsistent(String),
}

impl From<serde_json::Error> for SchemaError {
    fn from(value: serde_json::Error) -> Self {
        SchemaError::Malformed(value.to_string())
    }
}

/// Outcome of reading a catalog document.
#[derive(Debug, Clone)]
pub struct DecodedCatalog {
    pub products: Vec<Product>,
    pub lineup: SliderLineup,
    /// Version the data was migrated from, if it was not current.
    pub migrated_from: Option<u64>,
    /// Legacy combination names that matched no generated combination.
    pub dropped_combinations: Vec<String>,
}

/// Read any supported catalog document.
///
/// A top-level array is the unversioned first layout; an object must carry a
/// `schemaVersion` this build understands. `now` stamps legacy products that
/// never recorded a creation time.
pub fn decode_catalog(json: &str, now: DateTime<Utc>) -> Result<DecodedCatalog, SchemaError> {
    let raw: JsonValue = serde_json::from_str(json)?;

    if raw.is_array() {
        let legacy: Vec<LegacyProduct> = serde_json::from_value(raw)?;
        let migration = migrate_legacy_products(legacy, now);
        return Ok(DecodedCatalog {
            products: migration.products,
            lineup: SliderLineup::default(),
            migrated_from: Some(1),
            dropped_combinations: migration.dropped_combinations,
        });
    }

    if !raw.is_object() {
        return Err(SchemaError::Malformed(
            "expected a product array or a catalog object".to_string(),
        ));
    }
    let version = raw
        .get("schemaVersion")
        .and_then(JsonValue::as_u64)
        .ok_or_else(|| SchemaError::Malformed("missing schemaVersion".to_string()))?;
    if version != CURRENT_SCHEMA_VERSION {
        return Err(SchemaError::UnsupportedVersion(version));
    }

    let document: CatalogDocument = serde_json::from_value(raw)?;
    let (products, lineup) = document.into_domain()?;
    Ok(DecodedCatalog {
        products,
        lineup,
        migrated_from: None,
        dropped_combinations: Vec::new(),
    })
}

/// Serialize the catalog in the current layout.
pub fn encode_catalog<'a>(
    products: impl IntoIterator<Item = &'a Product>,
    lineup: &SliderLineup,
) -> Result<String, SchemaError> {
    let document = CatalogDocument::from_domain(products, lineup);
    Ok(serde_json::to_string_pretty(&document)?)
}

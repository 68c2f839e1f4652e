//! Unversioned first layout: a bare JSON array of products.
//!
//! Numbers may arrive as floats or numeric strings, combinations may be a
//! list or a name-keyed object, and per-combination stock may sit under
//! `stock` or the older `quantity`.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value as JsonValue;
use uuid::Uuid;

use storefront_catalog::{
    Product, ProductCreated, ProductDetails, ProductEvent, ProductId, ProductStatus,
    VariantCategory, VariantCombination, VariantConfig, generate_combinations,
};
use storefront_core::{Aggregate, AggregateId};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyProduct {
    pub id: JsonValue,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub price: Option<JsonValue>,
    #[serde(default)]
    pub quantity: Option<JsonValue>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub variants: Option<LegacyVariants>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyVariants {
    #[serde(default)]
    pub use_custom_price: bool,
    #[serde(default)]
    pub categories: Vec<LegacyCategory>,
    #[serde(default)]
    pub combinations: Option<LegacyCombinations>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LegacyCategory {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub options: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LegacyCombinations {
    List(Vec<LegacyCombination>),
    ByName(BTreeMap<String, LegacyPricing>),
}

#[derive(Debug, Clone, Deserialize)]
pub struct LegacyCombination {
    pub name: String,
    #[serde(flatten)]
    pub pricing: LegacyPricing,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LegacyPricing {
    #[serde(default)]
    pub price: Option<JsonValue>,
    #[serde(default)]
    pub stock: Option<JsonValue>,
    #[serde(default)]
    pub quantity: Option<JsonValue>,
}

impl LegacyPricing {
    fn price(&self) -> u64 {
        self.price.as_ref().and_then(as_count).unwrap_or(0)
    }

    /// `stock` wins; `quantity` is only read when `stock` is absent.
    fn stock(&self) -> u32 {
        self.stock
            .as_ref()
            .or(self.quantity.as_ref())
            .and_then(as_count)
            .map(saturate_u32)
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct LegacyMigration {
    pub products: Vec<Product>,
    /// `"<product name>: <combination name>"` for each entry that matched nothing.
    pub dropped_combinations: Vec<String>,
}

/// Convert legacy products into current ones.
///
/// Combinations are regenerated from the categories and pricing is carried
/// over by display name; entries whose name matches no generated combination
/// are dropped and reported.
pub fn migrate_legacy_products(legacy: Vec<LegacyProduct>, now: DateTime<Utc>) -> LegacyMigration {
    let mut migration = LegacyMigration::default();

    for item in legacy {
        let product_id = legacy_product_id(&item.id);
        let (variants, dropped) = migrate_variants(item.variants.unwrap_or_default());
        migration
            .dropped_combinations
            .extend(dropped.into_iter().map(|name| format!("{}: {name}", item.name)));

        let status = match item.status.as_deref().map(str::parse::<ProductStatus>) {
            Some(Ok(status)) => status,
            Some(Err(_)) => ProductStatus::Private,
            None => ProductStatus::Visible,
        };
        let created_at = item
            .created_at
            .as_deref()
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|at| at.with_timezone(&Utc))
            .unwrap_or(now);

        let mut product = Product::empty(product_id);
        product.apply(&ProductEvent::ProductCreated(ProductCreated {
            product_id,
            details: ProductDetails {
                name: item.name,
                description: item.description,
                image_url: item.image_url,
                images: item.images,
                base_price: item.price.as_ref().and_then(as_count).unwrap_or(0),
                base_stock: item
                    .quantity
                    .as_ref()
                    .and_then(as_count)
                    .map(saturate_u32)
                    .unwrap_or(0),
            },
            status,
            variants,
            occurred_at: created_at,
        }));
        migration.products.push(product);
    }

    migration
}

fn migrate_variants(legacy: LegacyVariants) -> (VariantConfig, Vec<String>) {
    let categories: Vec<VariantCategory> = legacy
        .categories
        .into_iter()
        .map(|c| VariantCategory::new(c.name, c.options))
        .collect();

    let mut by_name: HashMap<String, LegacyPricing> = match legacy.combinations {
        Some(LegacyCombinations::List(list)) => {
            list.into_iter().map(|c| (c.name, c.pricing)).collect()
        }
        Some(LegacyCombinations::ByName(map)) => map.into_iter().collect(),
        None => HashMap::new(),
    };

    let combinations = generate_combinations(&categories)
        .into_iter()
        .map(|combo| match by_name.remove(&combo.name()) {
            Some(pricing) => {
                VariantCombination::with_pricing(combo.key, pricing.price(), pricing.stock())
            }
            None => combo,
        })
        .collect();

    let mut dropped: Vec<String> = by_name.into_keys().collect();
    dropped.sort();

    let variants = VariantConfig {
        use_custom_pricing: legacy.use_custom_price,
        categories,
        combinations,
    };
    (variants, dropped)
}

/// UUID ids are kept; anything else (`"p-1"`, `1700000000`) maps to a
/// stable name-based UUID so re-running the migration yields the same ids.
fn legacy_product_id(raw: &JsonValue) -> ProductId {
    let text = match raw {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    };
    let uuid = Uuid::parse_str(&text).unwrap_or_else(|_| {
        Uuid::new_v5(
            &Uuid::NAMESPACE_OID,
            format!("storefront:product:{text}").as_bytes(),
        )
    });
    ProductId::new(AggregateId::from_uuid(uuid))
}

/// Non-negative integer from a JSON number or numeric string; fractions round.
fn as_count(value: &JsonValue) -> Option<u64> {
    match value {
        JsonValue::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite() && *f >= 0.0).map(|f| f.round() as u64)),
        JsonValue::String(s) => {
            let s = s.trim();
            s.parse::<u64>().ok().or_else(|| {
                s.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite() && *f >= 0.0)
                    .map(|f| f.round() as u64)
            })
        }
        _ => None,
    }
}

fn saturate_u32(value: u64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

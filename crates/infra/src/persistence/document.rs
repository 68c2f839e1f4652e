use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storefront_catalog::{
    ComboKey, MAX_SLIDES, Product, ProductCreated, ProductDetails, ProductEvent, ProductId,
    ProductStatus, Slide, SlideAdded, SlideId, SliderEvent, SliderLineup, VariantCategory,
    VariantCombination, VariantConfig,
};
use storefront_core::{Aggregate, AggregateRoot};

use super::SchemaError;

pub const CURRENT_SCHEMA_VERSION: u64 = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogDocument {
    pub schema_version: u64,
    pub products: Vec<StoredProduct>,
    #[serde(default)]
    pub sliders: Vec<StoredSlide>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredProduct {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub images: Vec<String>,
    pub status: ProductStatus,
    pub created_at: DateTime<Utc>,
    pub price: u64,
    pub stock: u32,
    #[serde(default)]
    pub variants: StoredVariants,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredVariants {
    pub use_custom_price: bool,
    pub categories: Vec<StoredCategory>,
    pub combinations: Vec<StoredCombination>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCategory {
    pub name: String,
    pub options: Vec<String>,
}

/// `name` is written for readability; `options` is what identifies the combination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCombination {
    pub options: Vec<String>,
    pub name: String,
    pub price: u64,
    pub stock: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSlide {
    pub id: SlideId,
    pub image_url: String,
    pub title: String,
    pub order: usize,
    pub created_at: DateTime<Utc>,
}

impl CatalogDocument {
    pub fn from_domain<'a>(
        products: impl IntoIterator<Item = &'a Product>,
        lineup: &SliderLineup,
    ) -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            products: products.into_iter().map(StoredProduct::from_product).collect(),
            sliders: lineup.slides().iter().map(StoredSlide::from_slide).collect(),
        }
    }

    pub fn into_domain(self) -> Result<(Vec<Product>, SliderLineup), SchemaError> {
        let mut seen = HashSet::new();
        let mut products = Vec::with_capacity(self.products.len());
        for stored in self.products {
            if !seen.insert(stored.id) {
                return Err(SchemaError::Inconsistent(format!(
                    "duplicate product id {}",
                    stored.id
                )));
            }
            products.push(stored.into_product());
        }

        Ok((products, restore_lineup(self.sliders)?))
    }
}

impl StoredProduct {
    pub fn from_product(product: &Product) -> Self {
        let details = product.details();
        let variants = product.variants();
        Self {
            id: product.id_typed(),
            name: details.name.clone(),
            description: details.description.clone(),
            image_url: details.image_url.clone(),
            images: details.images.clone(),
            status: product.status(),
            created_at: product.created_at().unwrap_or_default(),
            price: details.base_price,
            stock: details.base_stock,
            variants: StoredVariants {
                use_custom_price: variants.use_custom_pricing,
                categories: variants
                    .categories
                    .iter()
                    .map(|c| StoredCategory {
                        name: c.name.clone(),
                        options: c.options.clone(),
                    })
                    .collect(),
                combinations: variants
                    .combinations
                    .iter()
                    .map(|c| StoredCombination {
                        options: c.key.options().to_vec(),
                        name: c.name(),
                        price: c.price,
                        stock: c.stock,
                    })
                    .collect(),
            },
        }
    }

    /// Rehydrate as a freshly created product (version 1).
    ///
    /// Combinations are re-aligned with the stored categories, so a
    /// hand-edited file cannot smuggle in orphaned entries.
    pub fn into_product(self) -> Product {
        let variants = VariantConfig {
            use_custom_pricing: self.variants.use_custom_price,
            categories: self
                .variants
                .categories
                .into_iter()
                .map(|c| VariantCategory::new(c.name, c.options))
                .collect(),
            combinations: self
                .variants
                .combinations
                .into_iter()
                .map(|c| VariantCombination::with_pricing(ComboKey::new(c.options), c.price, c.stock))
                .collect(),
        }
        .normalized();

        let mut product = Product::empty(self.id);
        product.apply(&ProductEvent::ProductCreated(ProductCreated {
            product_id: self.id,
            details: ProductDetails {
                name: self.name,
                description: self.description,
                image_url: self.image_url,
                images: self.images,
                base_price: self.price,
                base_stock: self.stock,
            },
            status: self.status,
            variants,
            occurred_at: self.created_at,
        }));
        product
    }
}

impl StoredSlide {
    pub fn from_slide(slide: &Slide) -> Self {
        Self {
            id: slide.id,
            image_url: slide.image_url.clone(),
            title: slide.title.clone(),
            order: slide.order,
            created_at: slide.created_at,
        }
    }
}

fn restore_lineup(slides: Vec<StoredSlide>) -> Result<SliderLineup, SchemaError> {
    if slides.len() > MAX_SLIDES {
        return Err(SchemaError::Inconsistent(format!(
            "{} slides stored, at most {MAX_SLIDES} allowed",
            slides.len()
        )));
    }

    let mut lineup = SliderLineup::default();
    let mut slots = HashSet::new();
    for stored in slides {
        if stored.order >= MAX_SLIDES || !slots.insert(stored.order) {
            return Err(SchemaError::Inconsistent(format!(
                "slide {} has an invalid or duplicate slot {}",
                stored.id, stored.order
            )));
        }
        if lineup.slide(stored.id).is_some() {
            return Err(SchemaError::Inconsistent(format!(
                "duplicate slide id {}",
                stored.id
            )));
        }
        lineup.apply(&SliderEvent::SlideAdded(SlideAdded {
            slide: Slide {
                id: stored.id,
                image_url: stored.image_url,
                title: stored.title,
                order: stored.order,
                created_at: stored.created_at,
            },
        }));
    }

    debug_assert_eq!(lineup.version(), lineup.len() as u64);
    Ok(lineup)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use storefront_catalog::Selection;

    use super::*;

    fn sample_product() -> Product {
        let mut variants = VariantConfig::new(
            true,
            vec![
                VariantCategory::new("Color", ["Red", "Blue"]),
                VariantCategory::new("Size", ["S"]),
            ],
        );
        variants
            .set_combination(&ComboKey::new(["Blue", "S"]), 900, 3)
            .unwrap();

        let id = ProductId::generate();
        let mut product = Product::empty(id);
        product.apply(&ProductEvent::ProductCreated(ProductCreated {
            product_id: id,
            details: ProductDetails {
                name: "Shirt".to_string(),
                description: "Cotton".to_string(),
                image_url: "https://img/shirt.png".to_string(),
                images: vec![],
                base_price: 1000,
                base_stock: 4,
            },
            status: ProductStatus::Visible,
            variants,
            occurred_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
        }));
        product
    }

    #[test]
    fn writes_camel_case_with_schema_version() {
        let product = sample_product();
        let document = CatalogDocument::from_domain([&product], &SliderLineup::default());
        let json = serde_json::to_value(&document).unwrap();

        assert_eq!(json["schemaVersion"], 2);
        let stored = &json["products"][0];
        assert_eq!(stored["imageUrl"], "https://img/shirt.png");
        assert_eq!(stored["variants"]["useCustomPrice"], true);
        assert_eq!(stored["variants"]["combinations"][1]["name"], "Blue / S");
        assert_eq!(
            stored["variants"]["combinations"][1]["options"],
            serde_json::json!(["Blue", "S"])
        );
    }

    #[test]
    fn restored_product_resolves_like_the_original() {
        let product = sample_product();
        let document = CatalogDocument::from_domain([&product], &SliderLineup::default());
        let (products, lineup) = document.into_domain().unwrap();

        let restored = &products[0];
        assert_eq!(restored.version(), 1);
        assert!(lineup.is_empty());
        let blue = Selection::new().with("Color", "Blue").with("Size", "S");
        assert_eq!(restored.active_price(&blue), 900);
        assert_eq!(restored.max_stock(&blue), 3);
        assert_eq!(restored.created_at(), product.created_at());
    }

    #[test]
    fn stray_stored_combinations_are_dropped_on_restore() {
        let product = sample_product();
        let mut document = CatalogDocument::from_domain([&product], &SliderLineup::default());
        document.products[0].variants.combinations.push(StoredCombination {
            options: vec!["Green".to_string(), "S".to_string()],
            name: "Green / S".to_string(),
            price: 1,
            stock: 1,
        });

        let (products, _) = document.into_domain().unwrap();
        assert_eq!(products[0].variants().combinations.len(), 2);
    }

    #[test]
    fn rejects_duplicate_products_and_slots() {
        let product = sample_product();
        let mut document =
            CatalogDocument::from_domain([&product, &product], &SliderLineup::default());
        assert!(matches!(
            document.clone().into_domain(),
            Err(SchemaError::Inconsistent(_))
        ));

        document.products.truncate(1);
        let slide = |order| StoredSlide {
            id: SlideId::generate(),
            image_url: "https://img/banner.png".to_string(),
            title: "Banner".to_string(),
            order,
            created_at: Utc::now(),
        };
        document.sliders = vec![slide(0), slide(0)];
        assert!(matches!(
            document.clone().into_domain(),
            Err(SchemaError::Inconsistent(_))
        ));

        document.sliders = vec![slide(1), slide(0)];
        let (_, lineup) = document.into_domain().unwrap();
        assert_eq!(lineup.slides()[0].order, 0);
        assert_eq!(lineup.len(), 2);
    }
}

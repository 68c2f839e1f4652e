//! Product detail view model for the public storefront.
//!
//! Recomputed on every option click: price, stock cap for the quantity
//! stepper, and which option buttons are selectable.

use serde::{Deserialize, Serialize};

use crate::product::{Product, ProductId};
use crate::variants::{Selection, VariantCategory};

/// First option of every category that has options.
///
/// The detail page seeds this on load so a complete selection always exists.
pub fn default_selection(categories: &[VariantCategory]) -> Selection {
    categories
        .iter()
        .filter_map(|c| c.options.first().map(|first| (c.name.clone(), first.clone())))
        .collect()
}

/// Gallery images, falling back to the single cover image.
pub fn gallery_images(product: &Product) -> Vec<String> {
    let details = product.details();
    let gallery: Vec<String> = details
        .images
        .iter()
        .filter(|url| !url.trim().is_empty())
        .cloned()
        .collect();
    if !gallery.is_empty() {
        return gallery;
    }
    if details.image_url.trim().is_empty() {
        Vec::new()
    } else {
        vec![details.image_url.clone()]
    }
}

/// Quantity never drops below 1 and, while stock is known, never exceeds it.
pub fn clamp_quantity(quantity: u32, max_stock: u32) -> u32 {
    let quantity = quantity.max(1);
    if max_stock > 0 {
        quantity.min(max_stock)
    } else {
        quantity
    }
}

pub fn subtotal(price: u64, quantity: u32) -> u64 {
    price.saturating_mul(u64::from(quantity))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionState {
    pub option: String,
    pub selected: bool,
    /// `false` greys the button out.
    pub available: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryView {
    pub name: String,
    pub options: Vec<OptionState>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductView {
    pub product_id: ProductId,
    pub name: String,
    pub description: String,
    pub images: Vec<String>,
    pub selection: Selection,
    pub price: u64,
    pub max_stock: u32,
    /// Stepper and add-to-cart are disabled when `false`.
    pub purchasable: bool,
    pub categories: Vec<CategoryView>,
}

impl ProductView {
    pub fn build(product: &Product, selection: &Selection) -> Self {
        let max_stock = product.max_stock(selection);
        let categories = product
            .variants()
            .categories
            .iter()
            .filter(|c| !c.options.is_empty())
            .map(|category| CategoryView {
                name: category.name.clone(),
                options: category
                    .options
                    .iter()
                    .map(|option| OptionState {
                        option: option.clone(),
                        selected: selection.get(&category.name) == Some(option.as_str()),
                        available: product.is_option_available(&category.name, option, selection),
                    })
                    .collect(),
            })
            .collect();

        Self {
            product_id: product.id_typed(),
            name: product.name().to_string(),
            description: product.description().to_string(),
            images: gallery_images(product),
            selection: selection.clone(),
            price: product.active_price(selection),
            max_stock,
            purchasable: max_stock > 0,
            categories,
        }
    }

    /// View with every category seeded to its first option.
    pub fn initial(product: &Product) -> Self {
        Self::build(product, &default_selection(&product.variants().categories))
    }

    pub fn clamp_quantity(&self, quantity: u32) -> u32 {
        clamp_quantity(quantity, self.max_stock)
    }

    pub fn subtotal(&self, quantity: u32) -> u64 {
        subtotal(self.price, self.clamp_quantity(quantity))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use storefront_core::Aggregate;

    use super::*;
    use crate::product::{CreateProduct, ProductCommand, ProductDetails, ProductStatus};
    use crate::variants::{ComboKey, VariantCombination, VariantConfig};

    fn product_with(details: ProductDetails, variants: VariantConfig) -> Product {
        let product_id = ProductId::generate();
        let mut product = Product::empty(product_id);
        let events = product
            .handle(&ProductCommand::CreateProduct(CreateProduct {
                product_id,
                details,
                status: ProductStatus::Visible,
                variants,
                occurred_at: Utc::now(),
            }))
            .unwrap();
        product.apply(&events[0]);
        product
    }

    fn red_blue_product() -> Product {
        product_with(
            ProductDetails {
                name: "Wireless Gaming Mouse".to_string(),
                base_price: 1000,
                base_stock: 10,
                ..ProductDetails::default()
            },
            VariantConfig {
                use_custom_pricing: true,
                categories: vec![VariantCategory::new("Color", ["Red", "Blue"])],
                combinations: vec![
                    VariantCombination::with_pricing(ComboKey::new(["Red"]), 1200, 0),
                    VariantCombination::with_pricing(ComboKey::new(["Blue"]), 900, 3),
                ],
            },
        )
    }

    #[test]
    fn default_selection_skips_empty_categories() {
        let selection = default_selection(&[
            VariantCategory::new("Color", ["Red", "Blue"]),
            VariantCategory::new("Size", Vec::<String>::new()),
        ]);
        assert_eq!(selection.get("Color"), Some("Red"));
        assert_eq!(selection.get("Size"), None);
    }

    #[test]
    fn red_is_selected_but_not_purchasable() {
        let view = ProductView::initial(&red_blue_product());

        assert_eq!(view.price, 1200);
        assert_eq!(view.max_stock, 0);
        assert!(!view.purchasable);

        let red = &view.categories[0].options[0];
        assert!(red.selected);
        assert!(!red.available);
        let blue = &view.categories[0].options[1];
        assert!(!blue.selected);
        assert!(blue.available);
    }

    #[test]
    fn switching_to_blue_updates_price_and_stock() {
        let product = red_blue_product();
        let view = ProductView::build(&product, &Selection::new().with("Color", "Blue"));

        assert_eq!(view.price, 900);
        assert_eq!(view.max_stock, 3);
        assert!(view.purchasable);
        assert_eq!(view.clamp_quantity(5), 3);
        assert_eq!(view.subtotal(2), 1800);
    }

    #[test]
    fn gallery_falls_back_to_cover_image() {
        let product = product_with(
            ProductDetails {
                name: "4K Monitor".to_string(),
                image_url: "https://cdn.example/cover.jpg".to_string(),
                images: vec!["  ".to_string()],
                ..ProductDetails::default()
            },
            VariantConfig::default(),
        );
        assert_eq!(gallery_images(&product), vec!["https://cdn.example/cover.jpg"]);
    }

    #[test]
    fn quantity_clamps() {
        assert_eq!(clamp_quantity(0, 5), 1);
        assert_eq!(clamp_quantity(9, 5), 5);
        assert_eq!(clamp_quantity(9, 0), 9);
        assert_eq!(subtotal(u64::MAX, 2), u64::MAX);
    }
}

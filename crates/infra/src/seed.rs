//! Demo catalog used on first run.

use chrono::{DateTime, Duration, Utc};

use storefront_catalog::{
    AddSlide, ComboKey, CreateProduct, ProductDetails, ProductId, ProductStatus, SlideId,
    VariantCategory, VariantCombination, VariantConfig,
};

struct DemoProduct {
    name: &'static str,
    description: &'static str,
    image_url: &'static str,
    status: ProductStatus,
    age_secs: i64,
    base_price: u64,
    base_stock: u32,
}

const DEMO_PRODUCTS: [DemoProduct; 4] = [
    DemoProduct {
        name: "Classic Mechanical Keyboard",
        description: "High quality mechanical keyboard with tactile switches for the best typing experience.",
        image_url: "https://images.unsplash.com/photo-1595225476474-87563907a212?auto=format&fit=crop&w=800&q=80",
        status: ProductStatus::Visible,
        age_secs: 0,
        base_price: 1_250_000,
        base_stock: 12,
    },
    DemoProduct {
        name: "Wireless Gaming Mouse",
        description: "Ultra-low latency wireless mouse with 20000 DPI sensor.",
        image_url: "https://images.unsplash.com/photo-1527814050087-3793815479db?auto=format&fit=crop&w=800&q=80",
        status: ProductStatus::Visible,
        age_secs: 86_400,
        base_price: 650_000,
        base_stock: 25,
    },
    DemoProduct {
        name: "Noise Cancelling Headphones",
        description: "Premium sound quality with active noise cancellation technology.",
        image_url: "https://images.unsplash.com/photo-1505740420928-5e560c06d30e?auto=format&fit=crop&w=800&q=80",
        status: ProductStatus::Private,
        age_secs: 172_800,
        base_price: 2_100_000,
        base_stock: 5,
    },
    DemoProduct {
        name: "4K Monitor 27-inch",
        description: "Crystal clear display for creative professionals.",
        image_url: "https://images.unsplash.com/photo-1527443224154-c4a3942d3acf?auto=format&fit=crop&w=800&q=80",
        status: ProductStatus::Visible,
        age_secs: 200_000,
        base_price: 4_500_000,
        base_stock: 3,
    },
];

const DEMO_SLIDES: [(&str, &str); 2] = [
    (
        "https://images.unsplash.com/photo-1550745165-9bc0b252726f?auto=format&fit=crop&w=1200&q=80",
        "Welcome to SERVER48",
    ),
    (
        "https://images.unsplash.com/photo-1527443224154-c4a3942d3acf?auto=format&fit=crop&w=1200&q=80",
        "Premium Tech Gear",
    ),
];

/// Switch variants for the keyboard; one switch type is sold out.
fn keyboard_variants() -> VariantConfig {
    VariantConfig {
        use_custom_pricing: true,
        categories: vec![VariantCategory::new("Switch", ["Red", "Blue", "Brown"])],
        combinations: vec![
            VariantCombination::with_pricing(ComboKey::new(["Red"]), 1_250_000, 8),
            VariantCombination::with_pricing(ComboKey::new(["Blue"]), 1_300_000, 4),
            VariantCombination::with_pricing(ComboKey::new(["Brown"]), 1_275_000, 0),
        ],
    }
}

pub fn demo_products(now: DateTime<Utc>) -> Vec<CreateProduct> {
    DEMO_PRODUCTS
        .iter()
        .enumerate()
        .map(|(index, demo)| CreateProduct {
            product_id: ProductId::generate(),
            details: ProductDetails {
                name: demo.name.to_string(),
                description: demo.description.to_string(),
                image_url: demo.image_url.to_string(),
                images: Vec::new(),
                base_price: demo.base_price,
                base_stock: demo.base_stock,
            },
            status: demo.status,
            variants: if index == 0 {
                keyboard_variants()
            } else {
                VariantConfig::default()
            },
            occurred_at: now - Duration::seconds(demo.age_secs),
        })
        .collect()
}

pub fn demo_slides(now: DateTime<Utc>) -> Vec<AddSlide> {
    DEMO_SLIDES
        .iter()
        .enumerate()
        .map(|(order, (image_url, title))| AddSlide {
            slide_id: SlideId::generate(),
            image_url: image_url.to_string(),
            title: Some(title.to_string()),
            order: Some(order),
            occurred_at: now,
        })
        .collect()
}

//! Catalog domain: products with variant pricing, the homepage slider lineup,
//! listing filters and the storefront product view.
//!
//! Pure, deterministic domain logic (no IO, no storage). The infra crate
//! loads aggregates, runs their commands and persists the result.

pub mod listing;
pub mod product;
pub mod slider;
pub mod storefront;
pub mod variants;

pub use listing::{DashboardStats, ProductFilter, SearchField, StatusFilter};
pub use product::{
    ChangeVisibility, ConfigureVariants, CreateProduct, DeleteProduct, Product, ProductCommand,
    ProductCreated, ProductDeleted, ProductDetails, ProductDetailsUpdated, ProductEvent, ProductId,
    ProductStatus, ProductVariantsConfigured, ProductVisibilityChanged, UpdateProductDetails,
};
pub use slider::{
    AddSlide, DEFAULT_SLIDE_TITLE, LineupId, MAX_SLIDES, MIN_SLIDES, RemoveSlide, ReorderSlides,
    Slide, SlideAdded, SlideId, SlideRemoved, SlideUpdated, SliderCommand, SliderEvent,
    SliderLineup, SlidesReordered, UpdateSlide,
};
pub use storefront::{
    CategoryView, OptionState, ProductView, clamp_quantity, default_selection, gallery_images,
    subtotal,
};
pub use variants::{
    ComboKey, Selection, VariantCategory, VariantCombination, VariantConfig, VariantError,
    generate_combinations, regenerate_combinations, resolve_combo_key, resolve_combo_name,
};

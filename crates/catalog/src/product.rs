use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storefront_core::{Aggregate, AggregateId, AggregateRoot, DomainError, Event};

use crate::variants::{Selection, VariantConfig};

/// Product identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub AggregateId);

impl ProductId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }

    pub fn generate() -> Self {
        Self(AggregateId::new())
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Whether shoppers can see the product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    Visible,
    Private,
}

impl ProductStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Visible => "visible",
            ProductStatus::Private => "private",
        }
    }
}

impl core::str::FromStr for ProductStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "visible" => Ok(ProductStatus::Visible),
            "private" => Ok(ProductStatus::Private),
            other => Err(DomainError::validation(format!("unknown product status `{other}`"))),
        }
    }
}

/// Admin-edited descriptive fields plus base price/stock.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDetails {
    pub name: String,
    pub description: String,
    /// Cover image, used when `images` is empty.
    pub image_url: String,
    /// Ordered gallery.
    pub images: Vec<String>,
    /// Price in the smallest currency unit, used when no combination applies.
    pub base_price: u64,
    pub base_stock: u32,
}

impl ProductDetails {
    fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        Ok(())
    }
}

/// Aggregate root: Product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    id: ProductId,
    details: ProductDetails,
    status: ProductStatus,
    variants: VariantConfig,
    created_at: Option<DateTime<Utc>>,
    version: u64,
    created: bool,
    deleted: bool,
}

impl Product {
    /// Not-yet-created instance; feed it `ProductCreated` to bring it to life.
    pub fn empty(id: ProductId) -> Self {
        Self {
            id,
            details: ProductDetails::default(),
            status: ProductStatus::Visible,
            variants: VariantConfig::default(),
            created_at: None,
            version: 0,
            created: false,
            deleted: false,
        }
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn details(&self) -> &ProductDetails {
        &self.details
    }

    pub fn name(&self) -> &str {
        &self.details.name
    }

    pub fn description(&self) -> &str {
        &self.details.description
    }

    pub fn status(&self) -> ProductStatus {
        self.status
    }

    pub fn variants(&self) -> &VariantConfig {
        &self.variants
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    pub fn base_price(&self) -> u64 {
        self.details.base_price
    }

    pub fn base_stock(&self) -> u32 {
        self.details.base_stock
    }

    /// Created and not deleted.
    pub fn exists(&self) -> bool {
        self.created && !self.deleted
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    /// Shown on the public storefront.
    pub fn is_listed(&self) -> bool {
        self.exists() && self.status == ProductStatus::Visible
    }

    pub fn active_price(&self, selection: &Selection) -> u64 {
        self.variants.active_price(self.details.base_price, selection)
    }

    pub fn max_stock(&self, selection: &Selection) -> u32 {
        self.variants.max_stock(self.details.base_stock, selection)
    }

    pub fn is_option_available(&self, category: &str, option: &str, selection: &Selection) -> bool {
        self.variants.is_option_available(category, option, selection)
    }
}

impl AggregateRoot for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: CreateProduct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateProduct {
    pub product_id: ProductId,
    pub details: ProductDetails,
    pub status: ProductStatus,
    pub variants: VariantConfig,
    pub occurred_at: DateTime<Utc>,
}

/// Command: UpdateProductDetails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateProductDetails {
    pub product_id: ProductId,
    pub details: ProductDetails,
    pub occurred_at: DateTime<Utc>,
}

/// Command: ChangeVisibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeVisibility {
    pub product_id: ProductId,
    pub status: ProductStatus,
    pub occurred_at: DateTime<Utc>,
}

/// Command: ConfigureVariants.
///
/// Carries the whole edited `variants` block; combinations are regenerated
/// against the submitted categories before anything is emitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigureVariants {
    pub product_id: ProductId,
    pub variants: VariantConfig,
    pub occurred_at: DateTime<Utc>,
}

/// Command: DeleteProduct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteProduct {
    pub product_id: ProductId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductCommand {
    CreateProduct(CreateProduct),
    UpdateProductDetails(UpdateProductDetails),
    ChangeVisibility(ChangeVisibility),
    ConfigureVariants(ConfigureVariants),
    DeleteProduct(DeleteProduct),
}

impl ProductCommand {
    pub fn product_id(&self) -> ProductId {
        match self {
            ProductCommand::CreateProduct(c) => c.product_id,
            ProductCommand::UpdateProductDetails(c) => c.product_id,
            ProductCommand::ChangeVisibility(c) => c.product_id,
            ProductCommand::ConfigureVariants(c) => c.product_id,
            ProductCommand::DeleteProduct(c) => c.product_id,
        }
    }
}

/// Event: ProductCreated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductCreated {
    pub product_id: ProductId,
    pub details: ProductDetails,
    pub status: ProductStatus,
    pub variants: VariantConfig,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ProductDetailsUpdated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDetailsUpdated {
    pub product_id: ProductId,
    pub details: ProductDetails,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ProductVisibilityChanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductVisibilityChanged {
    pub product_id: ProductId,
    pub status: ProductStatus,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ProductVariantsConfigured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductVariantsConfigured {
    pub product_id: ProductId,
    pub variants: VariantConfig,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ProductDeleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDeleted {
    pub product_id: ProductId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductEvent {
    ProductCreated(ProductCreated),
    ProductDetailsUpdated(ProductDetailsUpdated),
    ProductVisibilityChanged(ProductVisibilityChanged),
    ProductVariantsConfigured(ProductVariantsConfigured),
    ProductDeleted(ProductDeleted),
}

impl Event for ProductEvent {
    fn event_type(&self) -> &'static str {
        match self {
            ProductEvent::ProductCreated(_) => "catalog.product.created",
            ProductEvent::ProductDetailsUpdated(_) => "catalog.product.details_updated",
            ProductEvent::ProductVisibilityChanged(_) => "catalog.product.visibility_changed",
            ProductEvent::ProductVariantsConfigured(_) => "catalog.product.variants_configured",
            ProductEvent::ProductDeleted(_) => "catalog.product.deleted",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            ProductEvent::ProductCreated(e) => e.occurred_at,
            ProductEvent::ProductDetailsUpdated(e) => e.occurred_at,
            ProductEvent::ProductVisibilityChanged(e) => e.occurred_at,
            ProductEvent::ProductVariantsConfigured(e) => e.occurred_at,
            ProductEvent::ProductDeleted(e) => e.occurred_at,
        }
    }
}

impl Aggregate for Product {
    type Command = ProductCommand;
    type Event = ProductEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            ProductEvent::ProductCreated(e) => {
                self.id = e.product_id;
                self.details = e.details.clone();
                self.status = e.status;
                self.variants = e.variants.clone();
                self.created_at = Some(e.occurred_at);
                self.created = true;
            }
            ProductEvent::ProductDetailsUpdated(e) => {
                self.details = e.details.clone();
            }
            ProductEvent::ProductVisibilityChanged(e) => {
                self.status = e.status;
            }
            ProductEvent::ProductVariantsConfigured(e) => {
                self.variants = e.variants.clone();
            }
            ProductEvent::ProductDeleted(_) => {
                self.deleted = true;
            }
        }

        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            ProductCommand::CreateProduct(cmd) => self.handle_create(cmd),
            ProductCommand::UpdateProductDetails(cmd) => self.handle_update_details(cmd),
            ProductCommand::ChangeVisibility(cmd) => self.handle_change_visibility(cmd),
            ProductCommand::ConfigureVariants(cmd) => self.handle_configure_variants(cmd),
            ProductCommand::DeleteProduct(cmd) => self.handle_delete(cmd),
        }
    }
}

impl Product {
    fn ensure_exists(&self, product_id: ProductId) -> Result<(), DomainError> {
        if !self.exists() {
            return Err(DomainError::not_found());
        }
        if self.id != product_id {
            return Err(DomainError::invariant("product_id mismatch"));
        }
        Ok(())
    }

    fn handle_create(&self, cmd: &CreateProduct) -> Result<Vec<ProductEvent>, DomainError> {
        if self.created {
            return Err(DomainError::conflict("product already exists"));
        }
        cmd.details.validate()?;
        cmd.variants.validate()?;

        Ok(vec![ProductEvent::ProductCreated(ProductCreated {
            product_id: cmd.product_id,
            details: cmd.details.clone(),
            status: cmd.status,
            variants: cmd.variants.clone().normalized(),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_update_details(
        &self,
        cmd: &UpdateProductDetails,
    ) -> Result<Vec<ProductEvent>, DomainError> {
        self.ensure_exists(cmd.product_id)?;
        cmd.details.validate()?;

        Ok(vec![ProductEvent::ProductDetailsUpdated(ProductDetailsUpdated {
            product_id: cmd.product_id,
            details: cmd.details.clone(),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_change_visibility(
        &self,
        cmd: &ChangeVisibility,
    ) -> Result<Vec<ProductEvent>, DomainError> {
        self.ensure_exists(cmd.product_id)?;

        if self.status == cmd.status {
            return Err(DomainError::conflict(format!(
                "product is already {}",
                cmd.status.as_str()
            )));
        }

        Ok(vec![ProductEvent::ProductVisibilityChanged(ProductVisibilityChanged {
            product_id: cmd.product_id,
            status: cmd.status,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_configure_variants(
        &self,
        cmd: &ConfigureVariants,
    ) -> Result<Vec<ProductEvent>, DomainError> {
        self.ensure_exists(cmd.product_id)?;
        cmd.variants.validate()?;

        Ok(vec![ProductEvent::ProductVariantsConfigured(ProductVariantsConfigured {
            product_id: cmd.product_id,
            variants: cmd.variants.clone().normalized(),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_delete(&self, cmd: &DeleteProduct) -> Result<Vec<ProductEvent>, DomainError> {
        self.ensure_exists(cmd.product_id)?;

        Ok(vec![ProductEvent::ProductDeleted(ProductDeleted {
            product_id: cmd.product_id,
            occurred_at: cmd.occurred_at,
        })])
    }
}

use chrono::{DateTime, Utc};

use storefront_catalog::{
    ChangeVisibility, ConfigureVariants, CreateProduct, DashboardStats, DeleteProduct, Product,
    ProductCommand, ProductDetails, ProductFilter, ProductId, ProductStatus, ProductView,
    Selection, UpdateProductDetails, VariantConfig,
};
use storefront_core::{Aggregate, AggregateRoot, DomainError, DomainResult, Event, ExpectedVersion};

use super::ServiceError;
use crate::repository::ProductRepository;

/// Admin and storefront operations over products.
#[derive(Debug)]
pub struct CatalogService<R> {
    repo: R,
}

impl<R> CatalogService<R>
where
    R: ProductRepository,
{
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn create_product(
        &self,
        details: ProductDetails,
        status: ProductStatus,
        variants: VariantConfig,
    ) -> Result<Product, ServiceError> {
        self.create(CreateProduct {
            product_id: ProductId::generate(),
            details,
            status,
            variants,
            occurred_at: Utc::now(),
        })
    }

    pub fn create(&self, command: CreateProduct) -> Result<Product, ServiceError> {
        let product_id = command.product_id;
        let mut product = Product::empty(product_id);
        run(&mut product, &ProductCommand::CreateProduct(command))?;
        self.repo.insert(product.clone())?;
        Ok(product)
    }

    pub fn update_details(
        &self,
        product_id: ProductId,
        details: ProductDetails,
    ) -> Result<Product, ServiceError> {
        self.execute(ProductCommand::UpdateProductDetails(UpdateProductDetails {
            product_id,
            details,
            occurred_at: Utc::now(),
        }))
    }

    pub fn change_visibility(
        &self,
        product_id: ProductId,
        status: ProductStatus,
    ) -> Result<Product, ServiceError> {
        self.execute(ProductCommand::ChangeVisibility(ChangeVisibility {
            product_id,
            status,
            occurred_at: Utc::now(),
        }))
    }

    /// Replace the whole variants block; combinations are regenerated against it.
    pub fn configure_variants(
        &self,
        product_id: ProductId,
        variants: VariantConfig,
    ) -> Result<Product, ServiceError> {
        self.execute(ProductCommand::ConfigureVariants(ConfigureVariants {
            product_id,
            variants,
            occurred_at: Utc::now(),
        }))
    }

    /// Run editor operations against the product's current variants and save
    /// the result as one configuration change.
    ///
    /// The save is checked against the version the edit started from, so a
    /// change stored in the meantime fails the edit with a conflict.
    pub fn edit_variants<F>(&self, product_id: ProductId, edit: F) -> Result<Product, ServiceError>
    where
        F: FnOnce(&mut VariantConfig) -> DomainResult<()>,
    {
        let product = self.load(product_id)?;
        let mut variants = product.variants().clone();
        edit(&mut variants)?;
        self.execute_on(
            product,
            ProductCommand::ConfigureVariants(ConfigureVariants {
                product_id,
                variants,
                occurred_at: Utc::now(),
            }),
        )
    }

    pub fn delete_product(&self, product_id: ProductId) -> Result<(), ServiceError> {
        self.execute(ProductCommand::DeleteProduct(DeleteProduct {
            product_id,
            occurred_at: Utc::now(),
        }))?;
        Ok(())
    }

    pub fn get(&self, product_id: ProductId) -> Result<Option<Product>, ServiceError> {
        Ok(self.repo.get(product_id)?)
    }

    /// Filtered listing, newest first.
    pub fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>, ServiceError> {
        Ok(filter.apply(self.repo.list()?))
    }

    pub fn dashboard(&self) -> Result<DashboardStats, ServiceError> {
        let products = self.repo.list()?;
        Ok(DashboardStats::from_products(&products))
    }

    /// Shopper-facing view; private products are reported as not found.
    ///
    /// Without a selection every category starts on its first option.
    pub fn product_view(
        &self,
        product_id: ProductId,
        selection: Option<&Selection>,
    ) -> Result<ProductView, ServiceError> {
        let product = self
            .repo
            .get(product_id)?
            .filter(Product::is_listed)
            .ok_or(DomainError::NotFound)?;

        let view = match selection {
            Some(selection) => ProductView::build(&product, selection),
            None => ProductView::initial(&product),
        };

        let variants = product.variants();
        if variants.use_custom_pricing
            && !variants.combinations.is_empty()
            && variants.matched_combination(&view.selection).is_none()
        {
            tracing::debug!(
                product_id = %product_id,
                "selection matches no combination, using base price and stock"
            );
        }

        Ok(view)
    }

    /// Insert `products` when the catalog is empty; returns how many were added.
    pub fn seed_if_empty(&self, products: Vec<CreateProduct>) -> Result<usize, ServiceError> {
        if !self.repo.list()?.is_empty() {
            return Ok(0);
        }
        let count = products.len();
        for command in products {
            self.create(command)?;
        }
        tracing::info!(count, "seeded demo products");
        Ok(count)
    }

    fn load(&self, product_id: ProductId) -> Result<Product, ServiceError> {
        self.repo
            .get(product_id)?
            .ok_or_else(|| ServiceError::Domain(DomainError::NotFound))
    }

    fn execute(&self, command: ProductCommand) -> Result<Product, ServiceError> {
        let product = self.load(command.product_id())?;
        self.execute_on(product, command)
    }

    /// Run `command` on an already loaded `product`; the save expects the
    /// stored copy to still be at the version it was loaded with.
    fn execute_on(&self, mut product: Product, command: ProductCommand) -> Result<Product, ServiceError> {
        let product_id = command.product_id();
        let expected = ExpectedVersion::Exact(product.version());

        run(&mut product, &command)?;

        if product.is_deleted() {
            self.repo.delete(product_id, expected)?;
        } else {
            self.repo.update(product.clone(), expected)?;
        }
        Ok(product)
    }
}

fn run(product: &mut Product, command: &ProductCommand) -> Result<(), ServiceError> {
    let events = product.handle(command).inspect_err(|err| {
        tracing::info!(product_id = %command.product_id(), error = %err, "product command rejected");
    })?;

    for event in &events {
        product.apply(event);
        log_applied(product.id_typed(), event.event_type(), event.occurred_at());
    }
    Ok(())
}

fn log_applied(product_id: ProductId, event_type: &str, occurred_at: DateTime<Utc>) {
    tracing::info!(
        product_id = %product_id,
        event_type,
        occurred_at = %occurred_at,
        "product event applied"
    );
}

//! Wiring: configuration -> repositories -> services.

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;

use storefront_auth::{AdminAccount, AdminCredentials, Authenticator};

use crate::config::{AppConfig, ConfigError, load_app_config};
use crate::repository::{
    InMemoryProductRepository, InMemorySessionStore, InMemorySliderRepository, JsonFileStore,
    ProductRepository, SessionStore, SliderRepository,
};
use crate::seed::{demo_products, demo_slides};
use crate::service::{AuthService, CatalogService, ServiceError, SliderService};

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Service(#[from] ServiceError),
}

/// The assembled storefront backend.
pub struct Storefront {
    pub catalog: CatalogService<Arc<dyn ProductRepository>>,
    pub sliders: SliderService<Arc<dyn SliderRepository>>,
    pub auth: AuthService<Arc<dyn SessionStore>>,
}

impl Storefront {
    /// Build services for `config`: file-backed when a catalog path is set,
    /// in memory otherwise, seeded with demo data if enabled.
    pub fn from_config(config: &AppConfig) -> Result<Self, ServiceError> {
        let products: Arc<dyn ProductRepository>;
        let sliders: Arc<dyn SliderRepository>;
        match &config.catalog_path {
            Some(path) => {
                let store = Arc::new(JsonFileStore::open(path, Utc::now())?);
                tracing::info!(path = %store.path().display(), "using file-backed catalog");
                products = store.clone();
                sliders = store;
            }
            None => {
                tracing::info!("using in-memory catalog");
                products = Arc::new(InMemoryProductRepository::new());
                sliders = Arc::new(InMemorySliderRepository::new());
            }
        }

        let authenticator = Authenticator::new(
            AdminCredentials::new(&config.admin_email, &config.admin_password),
            AdminAccount::admin(&config.admin_name, &config.admin_email),
            config.session_ttl(),
        );
        let sessions: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());

        let storefront = Self {
            catalog: CatalogService::new(products),
            sliders: SliderService::new(sliders),
            auth: AuthService::new(authenticator, sessions),
        };

        if config.seed_demo_data {
            let now = Utc::now();
            storefront.catalog.seed_if_empty(demo_products(now))?;
            storefront.sliders.seed_if_empty(demo_slides(now))?;
        }

        Ok(storefront)
    }
}

/// Load configuration, install logging and assemble the services.
pub fn bootstrap() -> Result<Storefront, BootstrapError> {
    let config = load_app_config()?;
    storefront_observability::init_with(&config.log_settings());
    tracing::info!(env = ?config.env, "starting storefront");
    Ok(Storefront::from_config(&config)?)
}

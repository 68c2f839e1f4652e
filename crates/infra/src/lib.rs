//! Infrastructure for the storefront: configuration, storage, the persisted
//! catalog format and the application services that drive the domain.

pub mod app;
pub mod config;
pub mod persistence;
pub mod repository;
pub mod seed;
pub mod service;

pub use app::{BootstrapError, Storefront, bootstrap};
pub use config::{AppConfig, ConfigError, Environment, load_app_config};
pub use repository::{
    InMemoryProductRepository, InMemorySessionStore, InMemorySliderRepository, JsonFileStore,
    ProductRepository, RepositoryError, SessionStore, SliderRepository,
};
pub use service::{AuthService, CatalogService, ServiceError, SliderService};

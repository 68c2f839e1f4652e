//! Storage seams for aggregates and sessions.
//!
//! Repositories hold current snapshots. Writes carry the version the caller
//! loaded so a concurrent edit is rejected instead of silently overwritten.

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::{InMemoryProductRepository, InMemorySessionStore, InMemorySliderRepository};

use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;

use storefront_auth::AdminSession;
use storefront_catalog::{Product, ProductId, SliderLineup};
use storefront_core::{ExpectedVersion, SessionId};

use crate::persistence::SchemaError;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,

    #[error("record already exists")]
    AlreadyExists,

    #[error("concurrency conflict: expected {expected:?}, found version {actual}")]
    Concurrency { expected: ExpectedVersion, actual: u64 },

    #[error("storage failure: {0}")]
    Storage(String),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl From<std::io::Error> for RepositoryError {
    fn from(value: std::io::Error) -> Self {
        RepositoryError::Storage(value.to_string())
    }
}

pub(crate) fn check_version(expected: ExpectedVersion, actual: u64) -> Result<(), RepositoryError> {
    if expected.matches(actual) {
        Ok(())
    } else {
        Err(RepositoryError::Concurrency { expected, actual })
    }
}

pub trait ProductRepository: Send + Sync {
    fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError>;

    /// Every stored product, in no particular order.
    fn list(&self) -> Result<Vec<Product>, RepositoryError>;

    fn insert(&self, product: Product) -> Result<(), RepositoryError>;

    /// Replace a product; `expected` is the version it had when loaded.
    fn update(&self, product: Product, expected: ExpectedVersion) -> Result<(), RepositoryError>;

    fn delete(&self, id: ProductId, expected: ExpectedVersion) -> Result<(), RepositoryError>;
}

pub trait SliderRepository: Send + Sync {
    /// The homepage lineup; empty if nothing was ever saved.
    fn load(&self) -> Result<SliderLineup, RepositoryError>;

    fn save(&self, lineup: SliderLineup, expected: ExpectedVersion) -> Result<(), RepositoryError>;
}

/// Issued admin sessions, keyed by id.
pub trait SessionStore: Send + Sync {
    fn get(&self, id: SessionId) -> Result<Option<AdminSession>, RepositoryError>;
    fn put(&self, session: AdminSession) -> Result<(), RepositoryError>;
    fn remove(&self, id: SessionId) -> Result<Option<AdminSession>, RepositoryError>;
    /// Drop sessions expired at `now`; returns how many were removed.
    fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, RepositoryError>;
}

impl<S> ProductRepository for Arc<S>
where
    S: ProductRepository + ?Sized,
{
    fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        (**self).get(id)
    }

    fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        (**self).list()
    }

    fn insert(&self, product: Product) -> Result<(), RepositoryError> {
        (**self).insert(product)
    }

    fn update(&self, product: Product, expected: ExpectedVersion) -> Result<(), RepositoryError> {
        (**self).update(product, expected)
    }

    fn delete(&self, id: ProductId, expected: ExpectedVersion) -> Result<(), RepositoryError> {
        (**self).delete(id, expected)
    }
}

impl<S> SliderRepository for Arc<S>
where
    S: SliderRepository + ?Sized,
{
    fn load(&self) -> Result<SliderLineup, RepositoryError> {
        (**self).load()
    }

    fn save(&self, lineup: SliderLineup, expected: ExpectedVersion) -> Result<(), RepositoryError> {
        (**self).save(lineup, expected)
    }
}

impl<S> SessionStore for Arc<S>
where
    S: SessionStore + ?Sized,
{
    fn get(&self, id: SessionId) -> Result<Option<AdminSession>, RepositoryError> {
        (**self).get(id)
    }

    fn put(&self, session: AdminSession) -> Result<(), RepositoryError> {
        (**self).put(session)
    }

    fn remove(&self, id: SessionId) -> Result<Option<AdminSession>, RepositoryError> {
        (**self).remove(id)
    }

    fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, RepositoryError> {
        (**self).purge_expired(now)
    }
}

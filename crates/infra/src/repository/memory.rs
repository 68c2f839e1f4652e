use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};

use storefront_auth::AdminSession;
use storefront_catalog::{Product, ProductId, SliderLineup};
use storefront_core::{AggregateRoot, ExpectedVersion, SessionId};

use super::{
    ProductRepository, RepositoryError, SessionStore, SliderRepository, check_version,
};

fn poisoned() -> RepositoryError {
    RepositoryError::Storage("lock poisoned".to_string())
}

/// Process-local product store, also the working set behind [`super::JsonFileStore`].
#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    inner: RwLock<HashMap<ProductId, Product>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        let map = products.into_iter().map(|p| (p.id_typed(), p)).collect();
        Self {
            inner: RwLock::new(map),
        }
    }
}

impl ProductRepository for InMemoryProductRepository {
    fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let map = self.inner.read().map_err(|_| poisoned())?;
        Ok(map.get(&id).cloned())
    }

    fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        let map = self.inner.read().map_err(|_| poisoned())?;
        Ok(map.values().cloned().collect())
    }

    fn insert(&self, product: Product) -> Result<(), RepositoryError> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        let id = product.id_typed();
        if map.contains_key(&id) {
            return Err(RepositoryError::AlreadyExists);
        }
        map.insert(id, product);
        Ok(())
    }

    fn update(&self, product: Product, expected: ExpectedVersion) -> Result<(), RepositoryError> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        let stored = map
            .get_mut(&product.id_typed())
            .ok_or(RepositoryError::NotFound)?;
        check_version(expected, stored.version())?;
        *stored = product;
        Ok(())
    }

    fn delete(&self, id: ProductId, expected: ExpectedVersion) -> Result<(), RepositoryError> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        let stored = map.get(&id).ok_or(RepositoryError::NotFound)?;
        check_version(expected, stored.version())?;
        map.remove(&id);
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct InMemorySliderRepository {
    inner: RwLock<SliderLineup>,
}

impl InMemorySliderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lineup(lineup: SliderLineup) -> Self {
        Self {
            inner: RwLock::new(lineup),
        }
    }
}

impl SliderRepository for InMemorySliderRepository {
    fn load(&self) -> Result<SliderLineup, RepositoryError> {
        let lineup = self.inner.read().map_err(|_| poisoned())?;
        Ok(lineup.clone())
    }

    fn save(&self, lineup: SliderLineup, expected: ExpectedVersion) -> Result<(), RepositoryError> {
        let mut stored = self.inner.write().map_err(|_| poisoned())?;
        check_version(expected, stored.version())?;
        *stored = lineup;
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    inner: RwLock<HashMap<SessionId, AdminSession>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySessionStore {
    fn get(&self, id: SessionId) -> Result<Option<AdminSession>, RepositoryError> {
        let map = self.inner.read().map_err(|_| poisoned())?;
        Ok(map.get(&id).cloned())
    }

    fn put(&self, session: AdminSession) -> Result<(), RepositoryError> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        map.insert(session.session_id, session);
        Ok(())
    }

    fn remove(&self, id: SessionId) -> Result<Option<AdminSession>, RepositoryError> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        Ok(map.remove(&id))
    }

    fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, RepositoryError> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        let before = map.len();
        map.retain(|_, session| !session.is_expired(now));
        Ok(before - map.len())
    }
}

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Utc};

use storefront_catalog::{Product, ProductId, SliderLineup};
use storefront_core::ExpectedVersion;

use super::{
    InMemoryProductRepository, InMemorySliderRepository, ProductRepository, RepositoryError,
    SliderRepository,
};
use crate::persistence::{DecodedCatalog, decode_catalog, encode_catalog};

/// Products and the slider lineup kept in one JSON document on disk.
///
/// Reads are served from memory; every successful write rewrites the whole
/// file (temp file + rename).
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    products: InMemoryProductRepository,
    sliders: InMemorySliderRepository,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Open `path`, migrating legacy content. A missing file starts empty.
    pub fn open(path: impl Into<PathBuf>, now: DateTime<Utc>) -> Result<Self, RepositoryError> {
        let path = path.into();

        let decoded = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            decode_catalog(&raw, now)?
        } else {
            tracing::info!(path = %path.display(), "catalog file not found, starting empty");
            DecodedCatalog {
                products: Vec::new(),
                lineup: SliderLineup::default(),
                migrated_from: None,
                dropped_combinations: Vec::new(),
            }
        };

        for dropped in &decoded.dropped_combinations {
            tracing::warn!(combination = %dropped, "dropping legacy combination with no matching options");
        }

        let store = Self {
            path,
            products: InMemoryProductRepository::with_products(decoded.products),
            sliders: InMemorySliderRepository::with_lineup(decoded.lineup),
            write_lock: Mutex::new(()),
        };

        if let Some(from) = decoded.migrated_from {
            store.flush()?;
            tracing::info!(
                path = %store.path.display(),
                from_version = from,
                "migrated catalog file to current schema"
            );
        }

        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), RepositoryError> {
        let _guard = self.lock_writes()?;
        self.write_document()
    }

    fn lock_writes(&self) -> Result<std::sync::MutexGuard<'_, ()>, RepositoryError> {
        self.write_lock
            .lock()
            .map_err(|_| RepositoryError::Storage("lock poisoned".to_string()))
    }

    /// Apply `change` to the working set, then write the document. When the
    /// write fails, `undo` gets back what `change` returned and restores the
    /// working set, so memory never runs ahead of the file.
    fn commit<S>(
        &self,
        change: impl FnOnce() -> Result<S, RepositoryError>,
        undo: impl FnOnce(S) -> Result<(), RepositoryError>,
    ) -> Result<(), RepositoryError> {
        let _guard = self.lock_writes()?;
        let previous = change()?;

        if let Err(err) = self.write_document() {
            if let Err(undo_err) = undo(previous) {
                tracing::error!(error = %undo_err, "failed to roll back catalog change");
            }
            tracing::warn!(path = %self.path.display(), error = %err, "catalog write failed, change rolled back");
            return Err(err);
        }
        Ok(())
    }

    /// Caller holds `write_lock`.
    fn write_document(&self) -> Result<(), RepositoryError> {
        let mut products = self.products.list()?;
        products.sort_by_key(|p| (p.created_at(), p.id_typed()));
        let lineup = self.sliders.load()?;
        let json = encode_catalog(&products, &lineup)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;

        tracing::debug!(path = %self.path.display(), products = products.len(), "catalog written");
        Ok(())
    }
}

impl ProductRepository for JsonFileStore {
    fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        self.products.get(id)
    }

    fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        self.products.list()
    }

    fn insert(&self, product: Product) -> Result<(), RepositoryError> {
        let id = product.id_typed();
        self.commit(
            || self.products.insert(product),
            |()| self.products.delete(id, ExpectedVersion::Any),
        )
    }

    fn update(&self, product: Product, expected: ExpectedVersion) -> Result<(), RepositoryError> {
        let id = product.id_typed();
        self.commit(
            || {
                let previous = self.products.get(id)?;
                self.products.update(product, expected)?;
                Ok(previous)
            },
            |previous| match previous {
                Some(previous) => self.products.update(previous, ExpectedVersion::Any),
                None => Ok(()),
            },
        )
    }

    fn delete(&self, id: ProductId, expected: ExpectedVersion) -> Result<(), RepositoryError> {
        self.commit(
            || {
                let previous = self.products.get(id)?;
                self.products.delete(id, expected)?;
                Ok(previous)
            },
            |previous| match previous {
                Some(previous) => self.products.insert(previous),
                None => Ok(()),
            },
        )
    }
}

impl SliderRepository for JsonFileStore {
    fn load(&self) -> Result<SliderLineup, RepositoryError> {
        self.sliders.load()
    }

    fn save(&self, lineup: SliderLineup, expected: ExpectedVersion) -> Result<(), RepositoryError> {
        self.commit(
            || {
                let previous = self.sliders.load()?;
                self.sliders.save(lineup, expected)?;
                Ok(previous)
            },
            |previous| self.sliders.save(previous, ExpectedVersion::Any),
        )
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tempfile::tempdir;

    use storefront_catalog::{
        AddSlide, CreateProduct, ProductCommand, ProductDetails, ProductStatus, Selection,
        SlideId, SliderCommand, VariantConfig,
    };
    use storefront_core::{Aggregate, AggregateRoot};

    use super::*;

    fn created(name: &str) -> Product {
        let id = ProductId::generate();
        let mut product = Product::empty(id);
        let events = product
            .handle(&ProductCommand::CreateProduct(CreateProduct {
                product_id: id,
                details: ProductDetails {
                    name: name.to_string(),
                    base_price: 250,
                    base_stock: 7,
                    ..ProductDetails::default()
                },
                status: ProductStatus::Private,
                variants: VariantConfig::default(),
                occurred_at: Utc::now(),
            }))
            .unwrap();
        for event in &events {
            product.apply(event);
        }
        product
    }

    #[test]
    fn missing_file_starts_empty_and_writes_on_first_change() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/catalog.json");
        let store = JsonFileStore::open(&path, Utc::now()).unwrap();
        assert!(store.list().unwrap().is_empty());
        assert!(!path.exists());

        let mouse = created("Mouse");
        store.insert(mouse.clone()).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["schemaVersion"], 2);
        assert_eq!(written["products"][0]["name"], "Mouse");
        assert_eq!(written["products"][0]["status"], "private");
    }

    #[test]
    fn reopening_restores_products_and_slides() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        let mouse = created("Mouse");

        {
            let store = JsonFileStore::open(&path, Utc::now()).unwrap();
            store.insert(mouse.clone()).unwrap();

            let mut lineup = store.load().unwrap();
            let events = lineup
                .handle(&SliderCommand::AddSlide(AddSlide {
                    slide_id: SlideId::generate(),
                    image_url: "https://img/banner.png".to_string(),
                    title: None,
                    order: None,
                    occurred_at: Utc::now(),
                }))
                .unwrap();
            for event in &events {
                lineup.apply(event);
            }
            store.save(lineup, ExpectedVersion::Exact(0)).unwrap();
        }

        let store = JsonFileStore::open(&path, Utc::now()).unwrap();
        let restored = store.get(mouse.id_typed()).unwrap().unwrap();
        assert_eq!(restored.name(), "Mouse");
        assert_eq!(restored.active_price(&Selection::new()), 250);
        assert_eq!(restored.max_stock(&Selection::new()), 7);

        let lineup = store.load().unwrap();
        assert_eq!(lineup.len(), 1);
        assert_eq!(lineup.version(), 1);
        assert_eq!(lineup.slides()[0].title, "No Title");
    }

    #[test]
    fn legacy_file_is_migrated_in_place() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        let legacy = json!([{
            "id": "p-1",
            "name": "Keyboard",
            "price": 100,
            "quantity": 2,
            "status": "visible",
            "variants": {
                "useCustomPrice": true,
                "categories": [{ "name": "Switch", "options": ["Red"] }],
                "combinations": [
                    { "name": "Red", "price": 120, "quantity": 1 },
                    { "name": "Green", "price": 130, "stock": 4 }
                ]
            }
        }]);
        fs::write(&path, legacy.to_string()).unwrap();

        let store = JsonFileStore::open(&path, Utc::now()).unwrap();
        let products = store.list().unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(
            products[0].active_price(&Selection::new().with("Switch", "Red")),
            120
        );

        let rewritten: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(rewritten["schemaVersion"], 2);
        let combos = rewritten["products"][0]["variants"]["combinations"]
            .as_array()
            .unwrap();
        assert_eq!(combos.len(), 1);
        assert_eq!(combos[0]["stock"], 1);
    }

    fn with_slide(mut lineup: SliderLineup) -> SliderLineup {
        let events = lineup
            .handle(&SliderCommand::AddSlide(AddSlide {
                slide_id: SlideId::generate(),
                image_url: "https://img/banner.png".to_string(),
                title: None,
                order: None,
                occurred_at: Utc::now(),
            }))
            .unwrap();
        for event in &events {
            lineup.apply(event);
        }
        lineup
    }

    #[test]
    fn failed_write_rolls_back_the_working_set() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        let store = JsonFileStore::open(&path, Utc::now()).unwrap();
        let keyboard = created("Keyboard");
        store.insert(keyboard.clone()).unwrap();

        // A directory where the temp file should go makes every write fail.
        let blocker = path.with_extension("json.tmp");
        fs::create_dir(&blocker).unwrap();

        let mouse = created("Mouse");
        assert!(matches!(
            store.insert(mouse.clone()),
            Err(RepositoryError::Storage(_))
        ));
        assert_eq!(store.get(mouse.id_typed()).unwrap(), None);

        assert!(store.delete(keyboard.id_typed(), ExpectedVersion::Exact(1)).is_err());
        assert_eq!(store.get(keyboard.id_typed()).unwrap(), Some(keyboard.clone()));

        assert!(store.save(with_slide(store.load().unwrap()), ExpectedVersion::Exact(0)).is_err());
        assert!(store.load().unwrap().is_empty());

        fs::remove_dir(&blocker).unwrap();
        store.insert(mouse.clone()).unwrap();
        store
            .save(with_slide(store.load().unwrap()), ExpectedVersion::Exact(0))
            .unwrap();

        let reopened = JsonFileStore::open(&path, Utc::now()).unwrap();
        assert_eq!(reopened.list().unwrap().len(), 2);
        assert_eq!(reopened.load().unwrap().len(), 1);
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            JsonFileStore::open(&path, Utc::now()),
            Err(RepositoryError::Schema(_))
        ));
    }
}

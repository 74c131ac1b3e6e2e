//! Persistence contract for [`StoreRecord`]s.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Mutex, PoisonError};

use crate::StoreRecord;

/// Storage for extracted store records, keyed by normalized origin.
///
/// `save` has full-replace semantics: any record previously stored under the
/// same origin is removed together with all of its children before the new
/// one is written. Nothing is merged.
pub trait StoreRepository {
    type Error: std::error::Error + Send + Sync + 'static;

    fn save(&self, record: &StoreRecord) -> impl Future<Output = Result<(), Self::Error>> + Send;

    fn load(
        &self,
        origin: &str,
    ) -> impl Future<Output = Result<Option<StoreRecord>, Self::Error>> + Send;
}

/// Process-local repository. Used by tests and `--dry-run` style callers.
#[derive(Debug, Default)]
pub struct InMemoryStoreRepository {
    records: Mutex<HashMap<String, StoreRecord>>,
}

impl InMemoryStoreRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl StoreRepository for InMemoryStoreRepository {
    type Error = std::convert::Infallible;

    async fn save(&self, record: &StoreRecord) -> Result<(), Self::Error> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(record.origin.clone(), record.clone());
        Ok(())
    }

    async fn load(&self, origin: &str) -> Result<Option<StoreRecord>, Self::Error> {
        Ok(self
            .records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(origin)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::{ProductListing, StoreRecordBuilder};

    #[tokio::test]
    async fn load_missing_origin_returns_none() {
        let repo = InMemoryStoreRepository::new();
        let loaded = repo.load("https://shop.example/").await.unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn save_replaces_prior_record_for_same_origin() {
        let repo = InMemoryStoreRepository::new();

        let mut first = StoreRecordBuilder::new("https://shop.example/");
        first.catalog(vec![ProductListing::titled("Old"), ProductListing::titled("Older")]);
        repo.save(&first.build(Utc::now())).await.unwrap();

        let mut second = StoreRecordBuilder::new("https://shop.example/");
        second.hero_products(vec![ProductListing::titled("New")]);
        repo.save(&second.build(Utc::now())).await.unwrap();

        assert_eq!(repo.len(), 1);
        let loaded = repo.load("https://shop.example/").await.unwrap().unwrap();
        assert!(loaded.catalog.is_empty(), "catalog must not be merged");
        assert_eq!(loaded.hero_products.len(), 1);
        assert_eq!(loaded.hero_products[0].title, "New");
    }

    #[tokio::test]
    async fn records_are_keyed_by_origin() {
        let repo = InMemoryStoreRepository::new();
        repo.save(&StoreRecordBuilder::new("https://a.example/").build(Utc::now()))
            .await
            .unwrap();
        repo.save(&StoreRecordBuilder::new("https://b.example/").build(Utc::now()))
            .await
            .unwrap();
        assert_eq!(repo.len(), 2);
        assert!(repo.load("https://c.example/").await.unwrap().is_none());
    }
}

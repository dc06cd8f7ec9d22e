//! In-process content store

use std::collections::HashMap;

use async_trait::async_trait;
use bson::oid::ObjectId;
use tokio::sync::RwLock;

use super::ContentStore;
use crate::error::{ContentError, ContentResult};
use crate::models::{now_millis, Collection, Fields, Record};

/// Keeps every collection in memory for the lifetime of the process
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<Collection, Vec<Record>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn list_all(&self, collection: Collection) -> ContentResult<Vec<Record>> {
        let collections = self.collections.read().await;
        let mut records = collections.get(&collection).cloned().unwrap_or_default();
        records.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(records)
    }

    async fn insert(&self, collection: Collection, fields: Fields) -> ContentResult<Record> {
        let record = Record::new(ObjectId::new().to_hex(), fields, now_millis());
        self.collections
            .write()
            .await
            .entry(collection)
            .or_default()
            .push(record.clone());
        Ok(record)
    }

    async fn exists(&self, collection: Collection, id: &str) -> ContentResult<bool> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .is_some_and(|records| records.iter().any(|r| r.id == id)))
    }

    async fn update_by_id(
        &self,
        collection: Collection,
        id: &str,
        fields: Fields,
    ) -> ContentResult<Record> {
        let mut collections = self.collections.write().await;
        let record = collections
            .get_mut(&collection)
            .and_then(|records| records.iter_mut().find(|r| r.id == id))
            .ok_or(ContentError::NotFound)?;
        record.merge(fields, now_millis());
        Ok(record.clone())
    }

    async fn delete_by_id(&self, collection: Collection, id: &str) -> ContentResult<()> {
        let mut collections = self.collections.write().await;
        let records = collections
            .get_mut(&collection)
            .ok_or(ContentError::NotFound)?;
        let index = records
            .iter()
            .position(|r| r.id == id)
            .ok_or(ContentError::NotFound)?;
        records.remove(index);
        Ok(())
    }
}

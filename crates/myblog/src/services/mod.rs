//! Services module - store adapter and content operations
//!
//! `ContentStore` is the persistence seam: `MongoStore` talks to MongoDB,
//! `MemoryStore` keeps everything in process. `ContentService` sits on top
//! and applies the collection schemas before anything reaches a store.

mod content_service;
mod memory_store;
mod mongo_store;

pub use content_service::ContentService;
pub use memory_store::MemoryStore;
pub use mongo_store::MongoStore;

use async_trait::async_trait;

use crate::error::ContentResult;
use crate::models::{Collection, Fields, Record};

/// Per-collection persistence operations.
///
/// Implementations receive fields that have already been cast and validated
/// against the collection schema.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// All records, newest first
    async fn list_all(&self, collection: Collection) -> ContentResult<Vec<Record>>;

    /// Assign an id and timestamps and persist
    async fn insert(&self, collection: Collection, fields: Fields) -> ContentResult<Record>;

    /// Whether a record with this id exists; a malformed id never does
    async fn exists(&self, collection: Collection, id: &str) -> ContentResult<bool>;

    /// Merge `fields` into the record and refresh `updatedAt`
    async fn update_by_id(
        &self,
        collection: Collection,
        id: &str,
        fields: Fields,
    ) -> ContentResult<Record>;

    async fn delete_by_id(&self, collection: Collection, id: &str) -> ContentResult<()>;
}

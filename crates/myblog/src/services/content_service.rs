//! Content service - schema validation in front of a `ContentStore`

use std::sync::Arc;

use crate::error::{ContentError, ContentResult};
use crate::models::{prepare_insert, prepare_update, Collection, Fields, Materials, OverviewData, Record};

use super::ContentStore;

#[derive(Clone)]
pub struct ContentService {
    store: Arc<dyn ContentStore>,
}

impl ContentService {
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self { store }
    }

    /// List every record of a collection, newest first
    pub async fn list(&self, collection: Collection) -> ContentResult<Vec<Record>> {
        self.store.list_all(collection).await
    }

    /// Validate and insert a new record
    pub async fn create(&self, collection: Collection, raw: Fields) -> ContentResult<Record> {
        let fields = prepare_insert(collection, raw)?;
        let record = self.store.insert(collection, fields).await?;
        tracing::debug!("Created {} record {}", collection, record.id);
        Ok(record)
    }

    /// Cast and merge a partial update.
    ///
    /// Every failure is a 404: a missing id is `NotFound` whatever the body,
    /// and a bad value on an existing record is `UpdateRejected`.
    pub async fn update(&self, collection: Collection, id: &str, raw: Fields) -> ContentResult<Record> {
        let fields = match prepare_update(collection, raw) {
            Ok(fields) => fields,
            Err(e) => {
                if !self.store.exists(collection, id).await? {
                    return Err(ContentError::NotFound);
                }
                return Err(ContentError::UpdateRejected(e.to_string()));
            }
        };
        let record = self.store.update_by_id(collection, id, fields).await?;
        tracing::debug!("Updated {} record {}", collection, id);
        Ok(record)
    }

    pub async fn delete(&self, collection: Collection, id: &str) -> ContentResult<()> {
        self.store.delete_by_id(collection, id).await?;
        tracing::debug!("Deleted {} record {}", collection, id);
        Ok(())
    }

    /// Read every collection concurrently. Any failing read fails the whole overview.
    pub async fn overview(&self) -> ContentResult<OverviewData> {
        let (news, videos, video, surat, audio, matn, admin, comments) = tokio::try_join!(
            self.list(Collection::News),
            self.list(Collection::Videos),
            self.list(Collection::MaterialsVideo),
            self.list(Collection::MaterialsSurat),
            self.list(Collection::MaterialsAudio),
            self.list(Collection::MaterialsMatn),
            self.list(Collection::Admin),
            self.list(Collection::Comments),
        )?;

        Ok(OverviewData {
            news,
            videos,
            materials: Materials {
                video,
                surat,
                audio,
                matn,
            },
            admin,
            comments,
        })
    }
}

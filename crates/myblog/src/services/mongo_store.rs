//! Content store backed by MongoDB

use async_trait::async_trait;
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Bson, Document as BsonDoc};
use mongodb::options::{FindOneAndUpdateOptions, FindOptions, ReturnDocument};
use serde_json::Value;

use super::ContentStore;
use crate::db::MongoDb;
use crate::error::{ContentError, ContentResult};
use crate::models::{is_integral_i64, Collection, FieldKind, Fields, Record};

pub struct MongoStore {
    db: MongoDb,
}

impl MongoStore {
    pub fn new(db: MongoDb) -> Self {
        Self { db }
    }

    fn collection(&self, collection: Collection) -> mongodb::Collection<BsonDoc> {
        self.db.collection(collection.store_name())
    }
}

#[async_trait]
impl ContentStore for MongoStore {
    async fn list_all(&self, collection: Collection) -> ContentResult<Vec<Record>> {
        let options = FindOptions::builder()
            .sort(doc! { "createdAt": -1, "_id": -1 })
            .build();

        let cursor = self.collection(collection).find(doc! {}, options).await?;
        let docs: Vec<BsonDoc> = cursor.try_collect().await?;

        Ok(docs.iter().map(|d| doc_to_record(collection, d)).collect())
    }

    async fn insert(&self, collection: Collection, fields: Fields) -> ContentResult<Record> {
        let now = bson::DateTime::now();
        let mut doc = fields_to_doc(&fields)?;
        doc.insert("createdAt", now);
        doc.insert("updatedAt", now);

        let result = self.collection(collection).insert_one(doc, None).await?;
        let id = result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| ContentError::Internal("Failed to get inserted id".to_string()))?;

        Ok(Record::new(id.to_hex(), fields, now.to_chrono()))
    }

    async fn exists(&self, collection: Collection, id: &str) -> ContentResult<bool> {
        let Ok(oid) = ObjectId::parse_str(id) else {
            return Ok(false);
        };
        let found = self
            .collection(collection)
            .find_one(doc! { "_id": oid }, None)
            .await?;
        Ok(found.is_some())
    }

    async fn update_by_id(
        &self,
        collection: Collection,
        id: &str,
        fields: Fields,
    ) -> ContentResult<Record> {
        let oid = parse_id(id)?;
        let mut set = fields_to_doc(&fields)?;
        set.insert("updatedAt", bson::DateTime::now());

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let updated = self
            .collection(collection)
            .find_one_and_update(doc! { "_id": oid }, doc! { "$set": set }, options)
            .await?;

        updated
            .map(|d| doc_to_record(collection, &d))
            .ok_or(ContentError::NotFound)
    }

    async fn delete_by_id(&self, collection: Collection, id: &str) -> ContentResult<()> {
        let oid = parse_id(id)?;
        let result = self
            .collection(collection)
            .delete_one(doc! { "_id": oid }, None)
            .await?;

        if result.deleted_count == 0 {
            return Err(ContentError::NotFound);
        }
        Ok(())
    }
}

/// A malformed id cannot name any stored record
fn parse_id(id: &str) -> ContentResult<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| ContentError::NotFound)
}

fn fields_to_doc(fields: &Fields) -> ContentResult<BsonDoc> {
    let mut doc = BsonDoc::new();
    for (name, value) in fields {
        doc.insert(name.as_str(), bson::to_bson(value)?);
    }
    Ok(doc)
}

/// Convert a stored BSON document to a record, reading only schema fields
fn doc_to_record(collection: Collection, d: &BsonDoc) -> Record {
    let mut fields = Fields::new();
    for spec in collection.schema() {
        if let Some(value) = d.get(spec.name) {
            fields.insert(spec.name.to_string(), bson_to_json(spec.kind, value));
        }
    }

    Record {
        id: d
            .get_object_id("_id")
            .map(|o| o.to_hex())
            .unwrap_or_default(),
        fields,
        created_at: d
            .get_datetime("createdAt")
            .map(|dt| dt.to_chrono())
            .unwrap_or_else(|_| Utc::now()),
        updated_at: d
            .get_datetime("updatedAt")
            .map(|dt| dt.to_chrono())
            .unwrap_or_else(|_| Utc::now()),
    }
}

fn bson_to_json(kind: FieldKind, value: &Bson) -> Value {
    match (kind, value) {
        (_, Bson::Null) => Value::Null,
        (_, Bson::String(s)) => Value::String(s.clone()),
        (_, Bson::Boolean(b)) => Value::Bool(*b),
        (_, Bson::Int32(i)) => Value::from(*i),
        (_, Bson::Int64(i)) => Value::from(*i),
        // Documents written by other clients may store counters as doubles
        (FieldKind::Counter, Bson::Double(f)) if is_integral_i64(*f) => Value::from(*f as i64),
        (_, Bson::Double(f)) => Value::from(*f),
        (_, other) => other.clone().into_relaxed_extjson(),
    }
}

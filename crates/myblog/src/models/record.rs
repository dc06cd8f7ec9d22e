//! Stored content record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Fields;

/// One persisted document of any collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(flatten)]
    pub fields: Fields,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl Record {
    /// Build a freshly inserted record; both timestamps are `now`
    pub fn new(id: impl Into<String>, fields: Fields, now: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            fields,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite the supplied fields and refresh `updated_at`
    pub fn merge(&mut self, fields: Fields, now: DateTime<Utc>) {
        self.fields.extend(fields);
        self.updated_at = now;
    }
}

/// Current time truncated to the store's millisecond precision
pub fn now_millis() -> DateTime<Utc> {
    bson::DateTime::now().to_chrono()
}

//! Application state construction

use anyhow::Result;
use myblog::{AppState, ContentStore, MemoryStore, MongoDb, MongoStore};
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::{Config, StoreType};

/// Open the configured store and wrap it in the shared route state
pub async fn build_state(config: &Config) -> Result<Arc<AppState>> {
    let store: Arc<dyn ContentStore> = match config.store_type {
        StoreType::MongoDB => {
            info!("Connecting to MongoDB: {}", redact(&config.database_url));
            Arc::new(MongoStore::new(open_mongodb(config).await?))
        }
        StoreType::Memory => {
            warn!("Using in-memory store; content is lost on restart");
            Arc::new(MemoryStore::new())
        }
    };

    Ok(Arc::new(AppState::new(store)))
}

/// An unreachable server is logged, not fatal: the driver reconnects on the
/// next request and requests fail with 500 until then.
async fn open_mongodb(config: &Config) -> Result<MongoDb> {
    let db_name = config.database_name.as_deref();
    match MongoDb::connect(&config.database_url, db_name).await {
        Ok(db) => Ok(db),
        Err(e) => {
            warn!("MongoDB connection failed: {}", e);
            MongoDb::open(&config.database_url, db_name).await
        }
    }
}

/// Hide credentials in a connection string before logging it
fn redact(uri: &str) -> String {
    match uri.split_once("://") {
        Some((scheme, rest)) => match rest.rsplit_once('@') {
            Some((_, host)) => format!("{}://***@{}", scheme, host),
            None => uri.to_string(),
        },
        None => uri.to_string(),
    }
}

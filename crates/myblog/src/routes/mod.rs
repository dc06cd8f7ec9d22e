//! HTTP routes for the content collections

pub mod content;
pub mod overview;

use axum::Router;
use std::sync::Arc;

use crate::error::ContentError;
use crate::services::{ContentService, ContentStore};

/// App state shared by every route
#[derive(Clone)]
pub struct AppState {
    pub content: ContentService,
}

impl AppState {
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self {
            content: ContentService::new(store),
        }
    }
}

/// Configure all content routes.
///
/// Unmatched paths and unsupported methods both answer with the
/// `Endpoint not found` envelope.
pub fn configure(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(overview::overview_routes())
        .merge(content::content_routes())
        .fallback(endpoint_not_found)
        .method_not_allowed_fallback(endpoint_not_found)
        .with_state(state)
}

async fn endpoint_not_found() -> ContentError {
    ContentError::EndpointNotFound
}

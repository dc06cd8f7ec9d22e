//! Aggregate overview of every collection

use axum::{extract::State, routing::get, Json, Router};
use std::sync::Arc;

use super::AppState;
use crate::error::ContentResult;
use crate::models::OverviewResponse;

pub fn overview_routes() -> Router<Arc<AppState>> {
    Router::new().route("/", get(overview))
}

async fn overview(State(state): State<Arc<AppState>>) -> ContentResult<Json<OverviewResponse>> {
    let data = state.content.overview().await?;
    Ok(Json(OverviewResponse::from(data)))
}

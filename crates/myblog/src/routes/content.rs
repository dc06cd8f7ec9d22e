//! Generic CRUD routes, registered once per collection

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde_json::Value;
use std::sync::Arc;

use super::AppState;
use crate::error::{ContentError, ContentResult};
use crate::models::{ApiResponse, Collection, Fields, Record};

type JsonBody = Result<Json<Value>, JsonRejection>;

/// `GET|POST /api/<slug>` and `PUT|DELETE /api/<slug>/{id}` for every collection
pub fn content_routes() -> Router<Arc<AppState>> {
    Collection::ALL
        .into_iter()
        .fold(Router::new(), |router, collection| {
            router
                .route(
                    &format!("/api/{}", collection.slug()),
                    get(move |state: State<Arc<AppState>>| list(state, collection)).post(
                        move |state: State<Arc<AppState>>, body: JsonBody| {
                            create(state, collection, body)
                        },
                    ),
                )
                .route(
                    &format!("/api/{}/{{id}}", collection.slug()),
                    put(
                        move |state: State<Arc<AppState>>, path: Path<String>, body: JsonBody| {
                            update(state, collection, path, body)
                        },
                    )
                    .delete(move |state: State<Arc<AppState>>, path: Path<String>| {
                        delete(state, collection, path)
                    }),
                )
        })
}

async fn list(
    State(state): State<Arc<AppState>>,
    collection: Collection,
) -> ContentResult<Json<ApiResponse<Vec<Record>>>> {
    let records = state.content.list(collection).await?;
    Ok(Json(ApiResponse::data(records)))
}

async fn create(
    State(state): State<Arc<AppState>>,
    collection: Collection,
    body: JsonBody,
) -> ContentResult<(StatusCode, Json<ApiResponse<Record>>)> {
    let record = state.content.create(collection, into_fields(body)?).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::data(record))))
}

async fn update(
    State(state): State<Arc<AppState>>,
    collection: Collection,
    Path(id): Path<String>,
    body: JsonBody,
) -> ContentResult<Json<ApiResponse<Record>>> {
    let record = state
        .content
        .update(collection, &id, into_fields(body)?)
        .await?;
    Ok(Json(ApiResponse::data(record)))
}

async fn delete(
    State(state): State<Arc<AppState>>,
    collection: Collection,
    Path(id): Path<String>,
) -> ContentResult<Json<ApiResponse<()>>> {
    state.content.delete(collection, &id).await?;
    Ok(Json(ApiResponse::message("Deleted")))
}

/// Requests without a JSON content type carry no fields
fn into_fields(body: JsonBody) -> ContentResult<Fields> {
    match body {
        Ok(Json(Value::Object(fields))) => Ok(fields),
        Ok(Json(_)) => Err(ContentError::InvalidBody(
            "Request body must be a JSON object".to_string(),
        )),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(Fields::new()),
        Err(rejection) => Err(ContentError::InvalidBody(rejection.body_text())),
    }
}

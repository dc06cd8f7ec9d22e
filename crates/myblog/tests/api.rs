//! HTTP-level tests for the content routes, backed by the in-memory store

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use async_trait::async_trait;
use myblog::models::Fields;
use myblog::{
    routes, AppState, Collection, ContentError, ContentResult, ContentStore, MemoryStore, Record,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> Router {
    routes::configure(Arc::new(AppState::new(Arc::new(MemoryStore::new()))))
}

/// Store whose reads of one collection always fail
struct FailingStore {
    broken: Collection,
    inner: MemoryStore,
}

#[async_trait]
impl ContentStore for FailingStore {
    async fn list_all(&self, collection: Collection) -> ContentResult<Vec<Record>> {
        if collection == self.broken {
            return Err(ContentError::Store("down".to_string()));
        }
        self.inner.list_all(collection).await
    }

    async fn insert(&self, collection: Collection, fields: Fields) -> ContentResult<Record> {
        self.inner.insert(collection, fields).await
    }

    async fn exists(&self, collection: Collection, id: &str) -> ContentResult<bool> {
        self.inner.exists(collection, id).await
    }

    async fn update_by_id(
        &self,
        collection: Collection,
        id: &str,
        fields: Fields,
    ) -> ContentResult<Record> {
        self.inner.update_by_id(collection, id, fields).await
    }

    async fn delete_by_id(&self, collection: Collection, id: &str) -> ContentResult<()> {
        self.inner.delete_by_id(collection, id).await
    }
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

/// A body with every required field of `collection`
fn valid_body(collection: Collection) -> Value {
    let mut body = serde_json::Map::new();
    for spec in collection.schema().iter().filter(|f| f.required) {
        body.insert(spec.name.to_string(), json!(format!("{} value", spec.name)));
    }
    Value::Object(body)
}

#[tokio::test]
async fn test_news_scenario() {
    let app = app();

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/newsPageCardData",
        Some(json!({"title": "A", "text": "B"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["success"], true);
    assert_eq!(created["data"]["likes"], 0);
    assert_eq!(created["data"]["title"], "A");
    let id = created["data"]["_id"].as_str().unwrap().to_string();

    let (status, listed) = send(&app, Method::GET, "/api/newsPageCardData", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed["data"].as_array().unwrap().len(), 1);
    assert_eq!(listed["data"][0], created["data"]);

    let uri = format!("/api/newsPageCardData/{}", id);
    let (status, updated) = send(&app, Method::PUT, &uri, Some(json!({"likes": 5}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["data"]["likes"], 5);
    assert_eq!(updated["data"]["title"], "A");
    assert_eq!(updated["data"]["text"], "B");

    let (status, deleted) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted, json!({"success": true, "message": "Deleted"}));

    let (status, listed) = send(&app, Method::GET, "/api/newsPageCardData", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed, json!({"success": true, "data": []}));
}

#[tokio::test]
async fn test_every_collection_round_trip() {
    let app = app();

    for collection in Collection::ALL {
        let base = format!("/api/{}", collection.slug());

        let (status, created) = send(&app, Method::POST, &base, Some(valid_body(collection))).await;
        assert_eq!(status, StatusCode::CREATED, "{}", collection);
        let id = created["data"]["_id"].as_str().unwrap().to_string();
        assert_eq!(id.len(), 24);
        assert!(created["data"]["createdAt"].is_string());

        let (status, listed) = send(&app, Method::GET, &base, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed["data"].as_array().unwrap().len(), 1, "{}", collection);

        let item = format!("{}/{}", base, id);
        let (status, _) = send(&app, Method::DELETE, &item, None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, again) = send(&app, Method::DELETE, &item, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(again, json!({"success": false, "error": "Not found"}));
    }
}

#[tokio::test]
async fn test_missing_required_field_is_rejected() {
    let app = app();

    for collection in Collection::ALL {
        let base = format!("/api/{}", collection.slug());
        let (status, body) = send(&app, Method::POST, &base, Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", collection);
        assert_eq!(body["success"], false);
        assert!(body["error"]
            .as_str()
            .unwrap()
            .starts_with(collection.model_name()));

        let (_, listed) = send(&app, Method::GET, &base, None).await;
        assert!(listed["data"].as_array().unwrap().is_empty());
    }

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/materialsSuratPageCardData",
        Some(json!({"title": "pic", "downloadUrl": "http://x"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "MaterialsSuratPageCardData validation failed: image: Path `image` is required."
    );
}

#[tokio::test]
async fn test_list_is_newest_first() {
    let app = app();
    for n in 0..3 {
        send(
            &app,
            Method::POST,
            "/api/profilPageCommentData",
            Some(json!({"message": format!("m{}", n), "itemType": "general"})),
        )
        .await;
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
    }

    let (_, listed) = send(&app, Method::GET, "/api/profilPageCommentData", None).await;
    let messages: Vec<_> = listed["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["message"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(messages, vec!["m2", "m1", "m0"]);
    assert_eq!(listed["data"][0]["itemId"], "");
}

#[tokio::test]
async fn test_update_missing_id_is_not_found() {
    let app = app();

    for collection in Collection::ALL {
        for id in ["65f000000000000000000001", "not-an-object-id"] {
            let uri = format!("/api/{}/{}", collection.slug(), id);
            let (status, body) = send(&app, Method::PUT, &uri, Some(json!({"title": "x"}))).await;
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(body, json!({"success": false, "error": "Not found"}));
        }
    }
}

#[tokio::test]
async fn test_update_missing_id_with_invalid_body_is_not_found() {
    let app = app();
    let uri = "/api/newsPageCardData/65f000000000000000000001";

    for body in [json!({"title": ""}), json!({"likes": "many"}), json!({"likes": -1})] {
        let (status, response) = send(&app, Method::PUT, uri, Some(body)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(response, json!({"success": false, "error": "Not found"}));
    }
}

#[tokio::test]
async fn test_bad_update_of_existing_record_is_not_found() {
    let app = app();
    let (_, created) = send(
        &app,
        Method::POST,
        "/api/newsPageCardData",
        Some(json!({"title": "A", "text": "B"})),
    )
    .await;
    let uri = format!("/api/newsPageCardData/{}", created["data"]["_id"].as_str().unwrap());

    let (status, response) = send(&app, Method::PUT, &uri, Some(json!({"likes": "many"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(response["success"], false);
    assert!(response["error"]
        .as_str()
        .unwrap()
        .contains("Cast to Number failed"));

    let (status, updated) = send(&app, Method::PUT, &uri, Some(json!({"title": ""}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["data"]["title"], "");
    assert_eq!(updated["data"]["likes"], 0);
}

#[tokio::test]
async fn test_update_refreshes_timestamp_only_for_supplied_fields() {
    let app = app();
    let (_, created) = send(
        &app,
        Method::POST,
        "/api/adminPageCardData",
        Some(json!({"title": "Card", "url": "https://t.me/x", "handle": "@x"})),
    )
    .await;
    assert_eq!(created["data"]["highlight"], false);
    let id = created["data"]["_id"].as_str().unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/api/adminPageCardData/{}", id),
        Some(json!({"highlight": true, "_id": "ignored"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let data = &updated["data"];
    assert_eq!(data["_id"], created["data"]["_id"]);
    assert_eq!(data["highlight"], true);
    assert_eq!(data["url"], "https://t.me/x");
    assert_eq!(data["handle"], "@x");
    assert_eq!(data["createdAt"], created["data"]["createdAt"]);
    assert_ne!(data["updatedAt"], created["data"]["updatedAt"]);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/videosPageCardData")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"title\":"))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["success"], false);

    let (status, _) = send(&app, Method::POST, "/api/videosPageCardData", Some(json!([1, 2]))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_overview_summary() {
    let app = app();
    let creates = [
        (Collection::News, 2),
        (Collection::Videos, 1),
        (Collection::MaterialsVideo, 1),
        (Collection::MaterialsSurat, 2),
        (Collection::MaterialsMatn, 1),
        (Collection::Comments, 3),
    ];
    for (collection, count) in creates {
        for _ in 0..count {
            send(
                &app,
                Method::POST,
                &format!("/api/{}", collection.slug()),
                Some(valid_body(collection)),
            )
            .await;
        }
    }

    let (status, body) = send(&app, Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let materials = &body["data"]["materials"];
    let material_total: usize = ["video", "surat", "audio", "matn"]
        .iter()
        .map(|k| materials[*k].as_array().unwrap().len())
        .sum();
    assert_eq!(material_total, 4);
    assert_eq!(
        body["summary"],
        json!({
            "totalNews": 2,
            "totalVideos": 1,
            "totalMaterials": 4,
            "totalAdmin": 0,
            "totalComments": 3
        })
    );
    assert_eq!(body["data"]["admin"], json!([]));
}

#[tokio::test]
async fn test_unknown_endpoints() {
    let app = app();
    let expected = json!({"success": false, "error": "Endpoint not found"});

    let cases = [
        (Method::GET, "/api/unknownPageCardData"),
        (Method::GET, "/nope"),
        (Method::POST, "/"),
        (Method::DELETE, "/api/newsPageCardData"),
        (Method::GET, "/api/newsPageCardData/65f000000000000000000001"),
        (Method::PATCH, "/api/newsPageCardData/65f000000000000000000001"),
    ];
    for (method, uri) in cases {
        let (status, body) = send(&app, method.clone(), uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{} {}", method, uri);
        assert_eq!(body, expected);
    }
}

#[tokio::test]
async fn test_store_failure_is_server_error() {
    let store = FailingStore {
        broken: Collection::Comments,
        inner: MemoryStore::new(),
    };
    let app = routes::configure(Arc::new(AppState::new(Arc::new(store))));
    let expected = json!({"success": false, "error": "down"});

    let (status, body) = send(&app, Method::GET, "/api/profilPageCommentData", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, expected);

    let (status, body) = send(&app, Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, expected);

    let (status, _) = send(&app, Method::GET, "/api/newsPageCardData", None).await;
    assert_eq!(status, StatusCode::OK);
}

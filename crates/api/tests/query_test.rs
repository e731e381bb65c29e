//! Catalog query gateway through the full router.

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, StatusCode};
use common::{ADMIN, bearer, gate, json_body, state};
use serde_json::{Value, json};
use toonshelf_api::create_router;
use toonshelf_core::query::{CatalogStore, QueryAction, QueryError, QueryGateway};
use tower::ServiceExt;

/// Answers every read with the action name and rate-limits view recording.
struct FakeCatalog;

#[async_trait]
impl CatalogStore for FakeCatalog {
    async fn execute(&self, action: QueryAction) -> Result<Value, QueryError> {
        match action {
            QueryAction::RecordChapterView(_) => Err(QueryError::RateLimited),
            other => Ok(json!([{ "action": other.kind().as_str() }])),
        }
    }
}

fn app() -> axum::Router {
    let gateway = QueryGateway::new(gate(), Arc::new(FakeCatalog));
    create_router(state(None, Some(Arc::new(gateway))))
}

fn query(authorization: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri("/db")
        .header(CONTENT_TYPE, "application/json");
    if let Some(value) = authorization {
        builder = builder.header(AUTHORIZATION, value);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

#[tokio::test]
async fn read_returns_data_envelope() {
    let response = app()
        .oneshot(query(None, r#"{"action": "get_all_series"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({ "data": [{ "action": "get_all_series" }] })
    );
}

#[tokio::test]
async fn write_without_credential_is_401() {
    let response = app()
        .oneshot(query(None, r#"{"action": "delete_series", "params": {}}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(response).await, json!({ "error": "Unauthorized" }));
}

#[tokio::test]
async fn write_by_admin_runs() {
    let body = r#"{"action": "create_genre", "params": {"name": "Action", "slug": "action"}}"#;
    let response = app()
        .oneshot(query(Some(&bearer(ADMIN)), body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({ "data": [{ "action": "create_genre" }] })
    );
}

#[tokio::test]
async fn unknown_action_is_400() {
    let response = app()
        .oneshot(query(None, r#"{"action": "drop_everything"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await,
        json!({ "error": "Unknown action: drop_everything" })
    );
}

#[tokio::test]
async fn rate_limit_is_400() {
    let body = json!({
        "action": "record_chapter_view",
        "params": {
            "chapter_id": "7c9e6679-7425-40de-944b-e07fc1f90ae7",
            "series_id": "16fd2706-8baf-433b-82eb-8c7fada847da",
            "viewer_hash": "viewer-1"
        }
    });
    let response = app()
        .oneshot(query(None, &body.to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await,
        json!({ "error": "Rate limit exceeded" })
    );
}

#[tokio::test]
async fn malformed_json_is_400() {
    let response = app().oneshot(query(None, "{not json")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(json_body(response).await["error"].is_string());
}

#[tokio::test]
async fn without_database_every_action_is_400() {
    let app = create_router(state(None, None));

    let response = app
        .oneshot(query(None, r#"{"action": "get_genres"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await,
        json!({ "error": "Database not configured" })
    );
}

//! Catalog query gateway.
//!
//! `POST /db` with `{"action": ..., "params": {...}}`. Answers `{"data": ...}`
//! or `{"error": message}` with 401 for authorization failures and 400 for
//! everything else.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::json;
use toonshelf_core::query::{QueryError, QueryRequest};

use crate::AppState;

/// Creates query routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/db", post(run_query))
}

async fn run_query(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<QueryRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match body {
        Ok(body) => body,
        Err(rejection) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": rejection.body_text() })),
            )
                .into_response();
        }
    };

    let Some(gateway) = state.queries.as_ref() else {
        return query_error(&QueryError::NotConfigured);
    };

    let authorization = headers.get(AUTHORIZATION).and_then(|h| h.to_str().ok());
    match gateway.dispatch(request, authorization).await {
        Ok(data) => Json(json!({ "data": data })).into_response(),
        Err(err) => query_error(&err),
    }
}

fn query_error(err: &QueryError) -> Response {
    let status = StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::BAD_REQUEST);
    (status, Json(json!({ "error": err.to_string() }))).into_response()
}

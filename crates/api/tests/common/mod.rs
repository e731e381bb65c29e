//! Router fixtures shared by the gateway tests.

#![allow(dead_code, missing_docs)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::Response;
use bytes::Bytes;
use chrono::Duration;
use http_body_util::BodyExt;
use serde_json::Value;
use toonshelf_api::{AppState, create_router};
use toonshelf_core::query::QueryGateway;
use toonshelf_core::storage::{
    BackendResponse, ObjectTarget, StorageBackend, StorageConfig, StorageService, TransportError,
};
use toonshelf_core::upload::UploadValidator;
use toonshelf_shared::{AdminAllowList, AdminGate, JwtService};

pub const SECRET: &str = "api-test-secret";
pub const ADMIN: &str = "admin@toonshelf.test";
pub const CDN: &str = "cdn.toonshelf.test";

/// Storage backend that records every call and answers from a per-host
/// script, falling back to a default status.
pub struct SpyBackend {
    default_status: u16,
    script: HashMap<String, BackendResponse>,
    calls: Mutex<Vec<String>>,
}

impl SpyBackend {
    pub fn answering(status: u16) -> Self {
        Self {
            default_status: status,
            script: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_host(mut self, host: &str, status: u16, body: &str) -> Self {
        self.script
            .insert(host.to_string(), BackendResponse::new(status, body));
        self
    }

    /// `METHOD url` of every call, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn answer(&self, method: &str, target: ObjectTarget<'_>) -> BackendResponse {
        self.calls
            .lock()
            .unwrap()
            .push(format!("{method} {}", target.url().unwrap()));
        self.script
            .get(target.host)
            .cloned()
            .unwrap_or_else(|| BackendResponse::new(self.default_status, ""))
    }
}

#[async_trait]
impl StorageBackend for SpyBackend {
    async fn put_object(
        &self,
        target: ObjectTarget<'_>,
        _content_type: &str,
        _body: Bytes,
    ) -> Result<BackendResponse, TransportError> {
        Ok(self.answer("PUT", target))
    }

    async fn delete_object(
        &self,
        target: ObjectTarget<'_>,
    ) -> Result<BackendResponse, TransportError> {
        Ok(self.answer("DELETE", target))
    }
}

pub fn gate() -> Arc<AdminGate> {
    Arc::new(AdminGate::new(
        Some(JwtService::new(SECRET)),
        AdminAllowList::new([ADMIN]),
    ))
}

pub fn state(spy: Option<Arc<SpyBackend>>, queries: Option<Arc<QueryGateway>>) -> AppState {
    let storage = spy.map(|backend| {
        Arc::new(StorageService::new(
            StorageConfig::new("toon-media", "zone-password", CDN),
            backend,
        ))
    });
    AppState {
        gate: gate(),
        validator: Arc::new(UploadValidator::default()),
        storage,
        queries,
        body_limit: 128 * 1024 * 1024,
    }
}

pub fn router(spy: &Arc<SpyBackend>) -> Router {
    create_router(state(Some(spy.clone()), None))
}

pub fn bearer(email: &str) -> String {
    let token = JwtService::new(SECRET)
        .generate_token(email, Duration::hours(1))
        .unwrap();
    format!("Bearer {token}")
}

pub async fn json_body(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub const BOUNDARY: &str = "toonshelf-test-boundary";

/// Hand-built `multipart/form-data` body.
#[derive(Default)]
pub struct Form(Vec<u8>);

impl Form {
    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.0.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, filename: &str, content_type: &str, data: &[u8]) -> Self {
        self.0.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; \
                 filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        self.0.extend_from_slice(data);
        self.0.extend_from_slice(b"\r\n");
        self
    }

    pub fn into_body(mut self) -> Body {
        self.0
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        Body::from(self.0)
    }
}

/// `signature` followed by zero padding up to `len` bytes.
pub fn content(signature: &[u8], len: usize) -> Vec<u8> {
    let mut data = vec![0_u8; len.max(signature.len())];
    data[..signature.len()].copy_from_slice(signature);
    data
}

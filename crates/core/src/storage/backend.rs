//! HTTP transport to a single storage host.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Url;

/// An object addressed on one storage host.
#[derive(Debug, Clone, Copy)]
pub struct ObjectTarget<'a> {
    /// Storage hostname.
    pub host: &'a str,
    /// Storage zone name.
    pub zone: &'a str,
    /// Object path inside the zone.
    pub path: &'a str,
    /// Zone password.
    pub access_key: &'a str,
}

impl ObjectTarget<'_> {
    /// `https://{host}/{zone}/{path}` with every path segment percent-encoded,
    /// so the object written is exactly the one named by `path`.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if `host` is not a valid hostname.
    pub fn url(&self) -> Result<Url, TransportError> {
        let mut url = Url::parse(&format!("https://{}/", self.host))
            .map_err(|e| TransportError(format!("invalid storage host {}: {e}", self.host)))?;
        url.path_segments_mut()
            .map_err(|()| TransportError(format!("invalid storage host {}", self.host)))?
            .clear()
            .push(self.zone)
            .extend(self.path.split('/'));
        Ok(url)
    }
}

/// Status and body of a storage response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

impl BackendResponse {
    /// Creates a response.
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 2xx.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Transport failure: the host never produced a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError(pub String);

/// Performs one storage call against one host.
///
/// Implementations never retry; failover across hosts is the caller's job.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// PUT the object body.
    async fn put_object(
        &self,
        target: ObjectTarget<'_>,
        content_type: &str,
        body: Bytes,
    ) -> Result<BackendResponse, TransportError>;

    /// DELETE the object.
    async fn delete_object(
        &self,
        target: ObjectTarget<'_>,
    ) -> Result<BackendResponse, TransportError>;
}

/// `reqwest` implementation. No request timeout is set.
#[derive(Debug, Clone, Default)]
pub struct HttpStorageBackend {
    client: reqwest::Client,
}

impl HttpStorageBackend {
    /// Creates a backend with a fresh client.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend sharing an existing client.
    #[must_use]
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn into_response(
        result: Result<reqwest::Response, reqwest::Error>,
    ) -> Result<BackendResponse, TransportError> {
        let response = result.map_err(|e| TransportError(e.to_string()))?;
        let status = response.status().as_u16();
        let body = readable_body(response.text().await);
        Ok(BackendResponse { status, body })
    }
}

/// The response text, or the read failure in its place.
fn readable_body<E: std::fmt::Display>(text: Result<String, E>) -> String {
    text.unwrap_or_else(|e| format!("<unreadable body: {e}>"))
}

#[async_trait]
impl StorageBackend for HttpStorageBackend {
    async fn put_object(
        &self,
        target: ObjectTarget<'_>,
        content_type: &str,
        body: Bytes,
    ) -> Result<BackendResponse, TransportError> {
        let result = self
            .client
            .put(target.url()?)
            .header("AccessKey", target.access_key)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(body)
            .send()
            .await;
        Self::into_response(result).await
    }

    async fn delete_object(
        &self,
        target: ObjectTarget<'_>,
    ) -> Result<BackendResponse, TransportError> {
        let result = self
            .client
            .delete(target.url()?)
            .header("AccessKey", target.access_key)
            .send()
            .await;
        Self::into_response(result).await
    }
}

//! Storage writer with regional failover.
//!
//! A storage zone answers on exactly one regional host; the others reject the
//! zone password with 401. Callers do not need to know which region owns the
//! zone: every write walks the candidate list in order and treats a 401 as
//! "wrong endpoint, try the next one". Any other non-success status is final.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{info, warn};

use super::backend::{BackendResponse, HttpStorageBackend, ObjectTarget, StorageBackend};
use super::config::StorageConfig;
use super::error::{StorageError, StorageOperation};
use super::hosts::{StorageHost, host_candidates};
use super::url::public_url;

const STATUS_UNAUTHORIZED: u16 = 401;
const STATUS_NOT_FOUND: u16 = 404;

/// Result of a successful store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// Public CDN URL of the object.
    pub url: String,
    /// Storage host that accepted the PUT.
    pub host_used: String,
    /// Region inferred from that host.
    pub detected_region: String,
}

/// Result of a successful remove.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedObject {
    /// Storage host that answered.
    pub host_used: String,
    /// Whether the object existed (false when the host answered 404).
    pub existed: bool,
}

enum Request<'a> {
    Put { content_type: &'a str, body: Bytes },
    Delete,
}

impl Request<'_> {
    const fn operation(&self) -> StorageOperation {
        match self {
            Self::Put { .. } => StorageOperation::Upload,
            Self::Delete => StorageOperation::Delete,
        }
    }

    fn is_terminal_success(&self, response: &BackendResponse) -> bool {
        match self {
            Self::Put { .. } => response.is_success(),
            Self::Delete => response.is_success() || response.status == STATUS_NOT_FOUND,
        }
    }
}

/// Storage service for media objects.
#[derive(Clone)]
pub struct StorageService {
    config: StorageConfig,
    backend: Arc<dyn StorageBackend>,
}

impl std::fmt::Debug for StorageService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl StorageService {
    /// Create a service over the given transport.
    #[must_use]
    pub fn new(config: StorageConfig, backend: Arc<dyn StorageBackend>) -> Self {
        Self { config, backend }
    }

    /// Create a service that talks HTTP via `reqwest`.
    #[must_use]
    pub fn from_config(config: StorageConfig) -> Self {
        Self::new(config, Arc::new(HttpStorageBackend::new()))
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// Hosts attempted for every call, in order.
    #[must_use]
    pub fn candidates(&self) -> Vec<StorageHost> {
        host_candidates(self.config.preferred_region.as_deref())
    }

    /// Write `body` at `path` and return its public URL.
    ///
    /// # Errors
    ///
    /// - `AllHostsUnauthorized` if every candidate answered 401.
    /// - `Rejected` on the first other non-success status.
    /// - `Transport` if a host could not be reached.
    pub async fn store(
        &self,
        path: &str,
        content_type: &str,
        body: Bytes,
    ) -> Result<StoredObject, StorageError> {
        info!(path, size = body.len(), content_type, "Uploading object");
        let request = Request::Put { content_type, body };
        let (host, _) = self.failover(path, &request).await?;

        let url = public_url(&self.config.cdn_hostname, path);
        info!(
            host = host.hostname(),
            region = host.region_label(),
            url = %url,
            "Upload successful"
        );
        Ok(StoredObject {
            url,
            host_used: host.hostname().to_string(),
            detected_region: host.region_label().to_string(),
        })
    }

    /// Delete the object at `path`. An absent object counts as deleted.
    ///
    /// # Errors
    ///
    /// Same as [`StorageService::store`].
    pub async fn remove(&self, path: &str) -> Result<RemovedObject, StorageError> {
        info!(path, "Deleting object");
        let (host, response) = self.failover(path, &Request::Delete).await?;
        let existed = response.status != STATUS_NOT_FOUND;
        info!(host = host.hostname(), existed, "Delete successful");
        Ok(RemovedObject {
            host_used: host.hostname().to_string(),
            existed,
        })
    }

    async fn failover(
        &self,
        path: &str,
        request: &Request<'_>,
    ) -> Result<(StorageHost, BackendResponse), StorageError> {
        let operation = request.operation();
        let candidates = self.candidates();
        let mut tried = Vec::with_capacity(candidates.len());

        for (index, host) in candidates.into_iter().enumerate() {
            let response = self.send(&host, path, request).await.map_err(|message| {
                warn!(host = host.hostname(), error = %message, "Storage host unreachable");
                StorageError::Transport {
                    operation,
                    host: host.hostname().to_string(),
                    message,
                }
            })?;

            if request.is_terminal_success(&response) {
                if index > 0 {
                    self.log_region_hint(&host);
                }
                return Ok((host, response));
            }

            if response.status == STATUS_UNAUTHORIZED {
                warn!(
                    host = host.hostname(),
                    %operation,
                    "Storage host rejected credentials, trying next region"
                );
                tried.push(host.hostname().to_string());
                continue;
            }

            warn!(
                host = host.hostname(),
                status = response.status,
                body = %response.body,
                %operation,
                "Storage host returned an error"
            );
            return Err(StorageError::Rejected {
                operation,
                host: host.hostname().to_string(),
                status: response.status,
                body: response.body,
            });
        }

        warn!(hosts = ?tried, %operation, "Every storage host rejected credentials");
        Err(StorageError::AllHostsUnauthorized {
            operation,
            hosts: tried,
        })
    }

    async fn send(
        &self,
        host: &StorageHost,
        path: &str,
        request: &Request<'_>,
    ) -> Result<BackendResponse, String> {
        let target = ObjectTarget {
            host: host.hostname(),
            zone: &self.config.zone,
            path,
            access_key: &self.config.access_key,
        };
        let result = match request {
            Request::Put { content_type, body } => {
                self.backend
                    .put_object(target, content_type, body.clone())
                    .await
            }
            Request::Delete => self.backend.delete_object(target).await,
        };
        result.map_err(|e| e.0)
    }

    fn log_region_hint(&self, host: &StorageHost) {
        if self.config.preferred_region.as_deref() != Some(host.region()) {
            info!(
                detected_region = host.region_label(),
                configured_region = self.config.preferred_region.as_deref().unwrap_or(""),
                "Storage zone answered on a different region; set storage.region to skip failover"
            );
        }
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;

//! Storage zone configuration.

use toonshelf_shared::StorageSettings;
use tracing::error;

use super::error::StorageError;

/// Resolved storage zone configuration. All required fields are present.
#[derive(Clone)]
pub struct StorageConfig {
    /// Storage zone name (first path segment on the storage host).
    pub zone: String,
    /// Storage zone password sent as the `AccessKey` header.
    pub access_key: String,
    /// Public CDN hostname.
    pub cdn_hostname: String,
    /// Region tried first, if any.
    pub preferred_region: Option<String>,
}

impl std::fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageConfig")
            .field("zone", &self.zone)
            .field("access_key", &"[hidden]")
            .field("cdn_hostname", &self.cdn_hostname)
            .field("preferred_region", &self.preferred_region)
            .finish()
    }
}

impl StorageConfig {
    /// Create a config directly.
    #[must_use]
    pub fn new(
        zone: impl Into<String>,
        access_key: impl Into<String>,
        cdn_hostname: impl Into<String>,
    ) -> Self {
        Self {
            zone: zone.into(),
            access_key: access_key.into(),
            cdn_hostname: cdn_hostname.into(),
            preferred_region: None,
        }
    }

    /// Set the preferred region. Blank clears it.
    #[must_use]
    pub fn with_region(mut self, region: impl AsRef<str>) -> Self {
        let region = region.as_ref().trim().to_ascii_lowercase();
        self.preferred_region = (!region.is_empty()).then_some(region);
        self
    }

    /// Build from loaded settings.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotConfigured` if zone, access key, or CDN hostname is missing.
    pub fn from_settings(settings: &StorageSettings) -> Result<Self, StorageError> {
        fn present(value: Option<&String>) -> Option<&str> {
            value.map(|s| s.trim()).filter(|s| !s.is_empty())
        }

        match (
            present(settings.zone.as_ref()),
            present(settings.access_key.as_ref()),
            present(settings.cdn_hostname.as_ref()),
        ) {
            (Some(zone), Some(access_key), Some(cdn_hostname)) => {
                Ok(Self::new(zone, access_key, cdn_hostname).with_region(&settings.region))
            }
            (zone, access_key, cdn_hostname) => {
                error!(
                    has_storage_zone = zone.is_some(),
                    has_access_key = access_key.is_some(),
                    has_cdn_hostname = cdn_hostname.is_some(),
                    "Missing storage configuration"
                );
                Err(StorageError::NotConfigured)
            }
        }
    }
}

//! Regional storage host candidates.

/// Base domain of the storage API.
pub const STORAGE_DOMAIN: &str = "storage.bunnycdn.com";

/// Known region codes. The empty code is the region-less default host.
pub const KNOWN_REGIONS: &[&str] = &["", "de", "uk", "ny", "la", "sg", "syd", "br"];

/// Label reported for the region-less default host.
pub const DEFAULT_REGION_LABEL: &str = "default";

/// One storage endpoint to attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageHost {
    region: String,
    hostname: String,
}

impl StorageHost {
    /// Host for a region code. Empty means the default host.
    #[must_use]
    pub fn for_region(region: &str) -> Self {
        let region = region.trim().to_ascii_lowercase();
        let hostname = if region.is_empty() {
            STORAGE_DOMAIN.to_string()
        } else {
            format!("{region}.{STORAGE_DOMAIN}")
        };
        Self { region, hostname }
    }

    /// Fully-qualified hostname.
    #[must_use]
    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    /// Region code, empty for the default host.
    #[must_use]
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Region label for logs and responses.
    #[must_use]
    pub fn region_label(&self) -> &str {
        if self.region.is_empty() {
            DEFAULT_REGION_LABEL
        } else {
            &self.region
        }
    }
}

/// Ordered, deduplicated hosts: the preferred region first, then every known region.
#[must_use]
pub fn host_candidates(preferred_region: Option<&str>) -> Vec<StorageHost> {
    let mut hosts: Vec<StorageHost> = Vec::with_capacity(KNOWN_REGIONS.len() + 1);
    for region in preferred_region.into_iter().chain(KNOWN_REGIONS.iter().copied()) {
        let host = StorageHost::for_region(region);
        if !hosts.iter().any(|h| h.hostname == host.hostname) {
            hosts.push(host);
        }
    }
    hosts
}

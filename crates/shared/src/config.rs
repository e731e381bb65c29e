//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration. The query gateway is disabled without it.
    #[serde(default)]
    pub database: Option<DatabaseConfig>,
    /// Admin authentication configuration.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Storage zone configuration.
    #[serde(default)]
    pub storage: StorageSettings,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Largest request body accepted, in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_body_bytes() -> usize {
    // Above the document ceiling so oversize files reach the validator and get a 400.
    128 * 1024 * 1024
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Admin bearer credential configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfig {
    /// HS256 secret the session tokens are signed with.
    #[serde(default)]
    pub jwt_secret: Option<String>,
    /// Email addresses allowed to perform admin operations.
    #[serde(default)]
    pub admin_emails: Vec<String>,
}

/// Storage zone settings as loaded. Every field is optional here; the
/// upload gateway reports a configuration error when a required one is missing.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// Storage zone name.
    #[serde(default)]
    pub zone: Option<String>,
    /// Storage zone password sent as the `AccessKey` header.
    #[serde(default)]
    pub access_key: Option<String>,
    /// Public CDN hostname serving the zone.
    #[serde(default)]
    pub cdn_hostname: Option<String>,
    /// Preferred region code tried first (`ny`, `la`, `sg`, ...). Empty means none.
    #[serde(default)]
    pub region: String,
    /// Largest accepted raster image, in bytes.
    #[serde(default = "default_max_image_bytes")]
    pub max_image_bytes: u64,
    /// Largest accepted PDF document, in bytes.
    #[serde(default = "default_max_document_bytes")]
    pub max_document_bytes: u64,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            zone: None,
            access_key: None,
            cdn_hostname: None,
            region: String::new(),
            max_image_bytes: default_max_image_bytes(),
            max_document_bytes: default_max_document_bytes(),
        }
    }
}

fn default_max_image_bytes() -> u64 {
    10 * 1024 * 1024
}

fn default_max_document_bytes() -> u64 {
    50 * 1024 * 1024
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("TOONSHELF")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("auth.admin_emails")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_defaults_without_sources() {
        temp_env::with_vars_unset(
            [
                "TOONSHELF__SERVER__PORT",
                "TOONSHELF__AUTH__JWT_SECRET",
                "TOONSHELF__STORAGE__ZONE",
            ],
            || {
                let config = AppConfig::load().expect("config should load");
                assert_eq!(config.server.port, 8080);
                assert_eq!(config.server.host, "0.0.0.0");
                assert!(config.database.is_none());
                assert_eq!(config.storage.max_document_bytes, 50 * 1024 * 1024);
                assert_eq!(config.storage.max_image_bytes, 10 * 1024 * 1024);
            },
        );
    }

    #[test]
    fn test_load_from_environment() {
        temp_env::with_vars(
            [
                ("TOONSHELF__SERVER__PORT", Some("9090")),
                ("TOONSHELF__AUTH__JWT_SECRET", Some("env-secret")),
                (
                    "TOONSHELF__AUTH__ADMIN_EMAILS",
                    Some("admin@example.com,ops@example.com"),
                ),
                ("TOONSHELF__STORAGE__ZONE", Some("toon-media")),
                ("TOONSHELF__STORAGE__REGION", Some("ny")),
            ],
            || {
                let config = AppConfig::load().expect("config should load");
                assert_eq!(config.server.port, 9090);
                assert_eq!(config.auth.jwt_secret.as_deref(), Some("env-secret"));
                assert_eq!(
                    config.auth.admin_emails,
                    vec!["admin@example.com", "ops@example.com"]
                );
                assert_eq!(config.storage.zone.as_deref(), Some("toon-media"));
                assert_eq!(config.storage.region, "ny");
            },
        );
    }
}

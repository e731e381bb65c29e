//! Toonshelf API Server
//!
//! Serves the media upload gateway and the catalog query gateway.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use toonshelf_api::{AppState, create_router};
use toonshelf_core::query::QueryGateway;
use toonshelf_core::storage::{StorageConfig, StorageService};
use toonshelf_core::upload::{UploadPolicy, UploadValidator};
use toonshelf_db::{CatalogRepository, connect};
use toonshelf_shared::{AdminAllowList, AdminGate, AppConfig, JwtService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "toonshelf=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let allow_list = AdminAllowList::new(&config.auth.admin_emails);
    if allow_list.is_empty() {
        warn!("No admin emails configured, every admin request will be rejected");
    }
    let jwt = config.auth.jwt_secret.as_deref().map(JwtService::new);
    if jwt.is_none() {
        warn!("No JWT secret configured, every admin request will be rejected");
    }
    let gate = Arc::new(AdminGate::new(jwt, allow_list));

    // Missing storage settings surface per request as a configuration error.
    let storage = match StorageConfig::from_settings(&config.storage) {
        Ok(storage) => {
            info!(
                zone = %storage.zone,
                cdn = %storage.cdn_hostname,
                region = storage.preferred_region.as_deref().unwrap_or("auto"),
                "Storage zone configured"
            );
            Some(Arc::new(StorageService::from_config(storage)))
        }
        Err(e) => {
            warn!(error = %e, "Upload gateway disabled");
            None
        }
    };

    let queries = match &config.database {
        Some(database) => {
            let db = connect(database).await?;
            let catalog = Arc::new(CatalogRepository::new(db));
            Some(Arc::new(QueryGateway::new(gate.clone(), catalog)))
        }
        None => {
            warn!("No database configured, query gateway disabled");
            None
        }
    };

    let state = AppState {
        gate,
        validator: Arc::new(UploadValidator::new(UploadPolicy::from_settings(
            &config.storage,
        ))),
        storage,
        queries,
        body_limit: config.server.max_body_bytes,
    };

    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

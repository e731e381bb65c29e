//! Catalog database layer.
//!
//! This crate provides:
//! - The catalog schema as `SeaORM` migrations
//! - [`CatalogRepository`], which executes Query Gateway actions

pub mod migration;
pub mod repositories;

pub use repositories::{CatalogError, CatalogRepository};

use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use toonshelf_shared::DatabaseConfig;
use tracing::info;

/// Establishes a pooled connection to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);

    let db = Database::connect(options).await?;
    info!(
        max_connections = config.max_connections,
        "Connected to catalog database"
    );
    Ok(db)
}

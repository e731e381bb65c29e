//! Catalog schema migration runner.
//!
//! Reads `DATABASE_URL` (or `-u <url>`). Usage:
//!   migrator up      - Create the catalog tables
//!   migrator down    - Drop the catalog tables
//!   migrator status  - Show migration status
//!   migrator fresh   - Drop everything and re-run migrations

use sea_orm_migration::prelude::*;
use toonshelf_db::migration::Migrator;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // The migrator CLI sets up its own tracing
    cli::run_cli(Migrator).await;
}

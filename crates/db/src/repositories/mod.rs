//! Repository abstractions for data access.
//!
//! Repositories hide the `SeaORM` statements from the rest of the application.

pub mod catalog;
mod catalog_sql;

pub use catalog::{CatalogError, CatalogRepository};

//! Core logic for Toonshelf.
//!
//! No web framework or database code lives here.
//!
//! # Modules
//!
//! - `upload` - Upload request validation and content signatures
//! - `storage` - Storage zone failover writer and public URLs
//! - `query` - Catalog query actions and their authorization

pub mod query;
pub mod storage;
pub mod upload;

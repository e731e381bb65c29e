//! Media storage on a regional object-storage zone.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      StorageService                          │
//! │   store(path, type, bytes)        remove(path)               │
//! ├──────────────────────────────────────────────────────────────┤
//! │  host_candidates(): preferred region, then every known one   │
//! │  401 → next host   2xx (or 404 on delete) → done   else fail │
//! ├──────────────────────────────────────────────────────────────┤
//! │            StorageBackend (reqwest / test fakes)             │
//! └──────────────────────────────────────────────────────────────┘
//! ```

mod backend;
mod config;
mod error;
mod hosts;
mod service;
mod url;

pub use backend::{
    BackendResponse, HttpStorageBackend, ObjectTarget, StorageBackend, TransportError,
};
pub use config::StorageConfig;
pub use error::{StorageError, StorageOperation};
pub use hosts::{DEFAULT_REGION_LABEL, KNOWN_REGIONS, STORAGE_DOMAIN, StorageHost, host_candidates};
pub use service::{RemovedObject, StorageService, StoredObject};
pub use url::public_url;

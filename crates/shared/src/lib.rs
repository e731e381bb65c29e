//! Shared types, errors, and configuration for Toonshelf.
//!
//! This crate provides what both gateways need:
//! - Application-wide error types
//! - Configuration management
//! - Admin session tokens and the admin allow-list

pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;

pub use auth::{AdminAllowList, AdminGate, AdminIdentity, Claims};
pub use config::{AppConfig, AuthConfig, DatabaseConfig, ServerConfig, StorageSettings};
pub use error::{AppError, AppResult};
pub use jwt::{JwtError, JwtService};

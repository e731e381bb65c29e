//! Request extractors shared by the routes.

pub mod auth;

pub use auth::AdminUser;

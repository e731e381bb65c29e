//! Catalog Query Gateway.
//!
//! Requests arrive as `{action, params}`. The action name resolves to an
//! [`ActionKind`]; writes pass the admin gate; params deserialize into the
//! typed [`QueryAction`]; a [`CatalogStore`] executes it and returns JSON.

mod action;
mod error;
mod gateway;
mod kind;
pub mod params;

pub use action::QueryAction;
pub use error::QueryError;
pub use gateway::{CatalogStore, QueryGateway, QueryRequest};
pub use kind::ActionKind;

//! Application-wide error types.
//!
//! Every variant carries the message shown to the admin operator verbatim, so
//! `Display` is the bare message with no prefix.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing, malformed, or unverifiable bearer credential.
    #[error("{0}")]
    Unauthorized(String),

    /// Verified identity that is not on the admin allow-list.
    #[error("{0}")]
    Forbidden(String),

    /// Request shape, size, path, extension, type, or content signature violation.
    #[error("{0}")]
    Validation(String),

    /// Required deployment configuration is absent.
    #[error("{0}")]
    StorageConfiguration(String),

    /// Every reachable storage host failed, or one returned a terminal status.
    #[error("{0}")]
    StorageOperation(String),

    /// Database error.
    #[error("{0}")]
    Database(String),

    /// Internal server error.
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    /// Creates the generic authentication failure.
    #[must_use]
    pub fn unauthorized() -> Self {
        Self::Unauthorized("Unauthorized".to_string())
    }

    /// Creates the generic authorization failure.
    #[must_use]
    pub fn forbidden() -> Self {
        Self::Forbidden("Forbidden".to_string())
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Unauthorized(_) => 401,
            Self::Forbidden(_) => 403,
            Self::Validation(_) => 400,
            Self::StorageConfiguration(_)
            | Self::StorageOperation(_)
            | Self::Database(_)
            | Self::Internal(_) => 500,
        }
    }

    /// Returns the error code used in logs.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::StorageConfiguration(_) => "STORAGE_CONFIGURATION_ERROR",
            Self::StorageOperation(_) => "STORAGE_OPERATION_ERROR",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether the failure came from the admin authentication gate.
    #[must_use]
    pub const fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Unauthorized(_) | Self::Forbidden(_))
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;

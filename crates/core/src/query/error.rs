//! Query Gateway errors.

use thiserror::Error;

use super::kind::ActionKind;

/// Errors returned to Query Gateway callers as `{error}`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QueryError {
    /// The action name is not recognized.
    #[error("Unknown action: {0}")]
    UnknownAction(String),

    /// A write action without a verified admin credential.
    #[error("Unauthorized")]
    Unauthorized,

    /// Params did not match the action's shape.
    #[error("Invalid params for {action}: {message}")]
    InvalidParams {
        /// Action being parsed.
        action: ActionKind,
        /// Deserializer message.
        message: String,
    },

    /// The viewer recorded too many views in the last minute.
    #[error("Rate limit exceeded")]
    RateLimited,

    /// The catalog is not available in this deployment.
    #[error("Database not configured")]
    NotConfigured,

    /// Statement failure, message passed through.
    #[error("{0}")]
    Database(String),
}

impl QueryError {
    /// Whether the failure is an authorization failure.
    #[must_use]
    pub const fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// HTTP status: 401 for auth failures, 400 otherwise.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        if self.is_auth_failure() { 401 } else { 400 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            QueryError::UnknownAction("nuke".into()).to_string(),
            "Unknown action: nuke"
        );
        assert_eq!(QueryError::RateLimited.to_string(), "Rate limit exceeded");
        assert_eq!(QueryError::Unauthorized.to_string(), "Unauthorized");
        assert_eq!(
            QueryError::InvalidParams {
                action: ActionKind::GetSeries,
                message: "missing field `id`".into()
            }
            .to_string(),
            "Invalid params for get_series: missing field `id`"
        );
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(QueryError::Unauthorized.status_code(), 401);
        assert_eq!(QueryError::RateLimited.status_code(), 400);
        assert_eq!(QueryError::Database("boom".into()).status_code(), 400);
        assert_eq!(QueryError::UnknownAction(String::new()).status_code(), 400);
    }
}

//! Admin authentication: session claims, the allow-list, and the gate that
//! turns an `Authorization` header into an [`AdminIdentity`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::AppError;
use crate::jwt::{JwtError, JwtService};

/// JWT claims of an admin session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user identifier).
    pub sub: String,
    /// Email of the signed-in user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Role hint carried by some issuers. Not used for authorization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Issued at timestamp.
    #[serde(default)]
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

impl Claims {
    /// Creates claims whose subject is the email itself.
    #[must_use]
    pub fn new(email: &str, expires_at: DateTime<Utc>) -> Self {
        Self {
            sub: email.to_string(),
            email: Some(email.to_string()),
            role: None,
            iat: Utc::now().timestamp(),
            exp: expires_at.timestamp(),
        }
    }
}

/// An authenticated administrator. Lives for a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminIdentity {
    /// Normalized (trimmed, lower-cased) email.
    pub email: String,
}

/// Fixed set of administrator emails.
#[derive(Debug, Clone, Default)]
pub struct AdminAllowList {
    emails: Vec<String>,
}

impl AdminAllowList {
    /// Builds the list, normalizing every entry.
    pub fn new<I, S>(emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let emails = emails
            .into_iter()
            .map(|e| normalize_email(e.as_ref()))
            .filter(|e| !e.is_empty())
            .collect();
        Self { emails }
    }

    /// Case-insensitive, whitespace-tolerant membership check.
    #[must_use]
    pub fn contains(&self, email: &str) -> bool {
        let email = normalize_email(email);
        !email.is_empty() && self.emails.iter().any(|e| *e == email)
    }

    /// Number of configured admins.
    #[must_use]
    pub fn len(&self) -> usize {
        self.emails.len()
    }

    /// Whether no admin is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Extracts the bearer token from the Authorization header.
#[must_use]
pub fn extract_bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Resolves admin identity from a bearer credential.
#[derive(Debug, Clone)]
pub struct AdminGate {
    jwt: Option<JwtService>,
    allow_list: AdminAllowList,
}

impl AdminGate {
    /// Creates a gate. Without a signing secret every credential is rejected.
    #[must_use]
    pub fn new(jwt: Option<JwtService>, allow_list: AdminAllowList) -> Self {
        Self { jwt, allow_list }
    }

    /// Authenticates the raw `Authorization` header value.
    ///
    /// # Errors
    ///
    /// - `AppError::Unauthorized` when the header is missing or malformed, or the
    ///   token fails verification (bad signature, expired, undecodable).
    /// - `AppError::Forbidden` when the token verifies but its email is absent or
    ///   not on the allow-list.
    pub fn authenticate(&self, header: Option<&str>) -> Result<AdminIdentity, AppError> {
        let Some(token) = header.and_then(extract_bearer_token) else {
            debug!("Missing or malformed Authorization header");
            return Err(AppError::unauthorized());
        };

        let Some(jwt) = &self.jwt else {
            debug!("No signing secret configured, rejecting credential");
            return Err(AppError::unauthorized());
        };

        let claims = jwt.validate_token(token).map_err(|e| {
            match &e {
                JwtError::Expired => debug!("Session token expired"),
                _ => debug!(error = %e, "Session token failed verification"),
            }
            AppError::unauthorized()
        })?;

        let Some(email) = claims.email.as_deref().filter(|e| self.allow_list.contains(e)) else {
            debug!(subject = %claims.sub, "Verified identity is not an admin");
            return Err(AppError::forbidden());
        };

        let identity = AdminIdentity {
            email: normalize_email(email),
        };
        info!(email = %identity.email, "Admin authenticated");
        Ok(identity)
    }
}

#[cfg(test)]
#[path = "auth_tests.rs"]
mod tests;

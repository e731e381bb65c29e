//! Admin authentication extractor.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use toonshelf_shared::AdminIdentity;

use crate::AppState;
use crate::error::ApiError;

/// Raw `Authorization` header value, if it is valid UTF-8.
#[must_use]
pub fn authorization_header(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
}

/// Extractor for a verified administrator.
///
/// Rejects with 401 when the credential is missing or fails verification and
/// with 403 when the verified email is not on the allow-list. Handlers taking
/// this argument never run for non-admins.
#[derive(Debug, Clone)]
pub struct AdminUser(pub AdminIdentity);

impl AdminUser {
    /// Normalized email of the administrator.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.0.email
    }
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        state
            .gate
            .authenticate(authorization_header(parts))
            .map(AdminUser)
            .map_err(ApiError)
    }
}

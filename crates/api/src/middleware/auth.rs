//! Authentication extractors.
//!
//! Provides the bearer-token extractor for routes that require an
//! authenticated user. The token is the one issued at login; verification
//! checks the signature and expiry against the process-wide secret.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, header, request::Parts},
    response::{IntoResponse, Response},
};
use serde_json::json;

use gatehouse_core::UserId;

use crate::state::AppState;

/// Extractor that requires a valid bearer token.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(user_id): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, user {user_id}!")
/// }
/// ```
pub struct RequireAuth(pub UserId);

/// Error returned when a request lacks a valid bearer token.
pub enum AuthRejection {
    /// No Authorization header, or not a bearer scheme.
    MissingToken,
    /// The token failed signature or expiry verification.
    InvalidToken,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let message = match self {
            Self::MissingToken => "missing bearer token",
            Self::InvalidToken => "invalid or expired token",
        };
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "status": "error", "message": message })),
        )
            .into_response()
    }
}

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(AuthRejection::MissingToken)?;

        let token = bearer_token(header_value).ok_or(AuthRejection::MissingToken)?;

        let user_id = state
            .tokens()
            .verify(token)
            .map_err(|_| AuthRejection::InvalidToken)?;

        Ok(Self(user_id))
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header value.
fn bearer_token(header_value: &str) -> Option<&str> {
    let rest = header_value
        .strip_prefix("Bearer ")
        .or_else(|| header_value.strip_prefix("bearer "))?;
    let token = rest.trim();
    (!token.is_empty()).then_some(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token_extracts() {
        assert_eq!(bearer_token("Bearer abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(bearer_token("bearer abc"), Some("abc"));
    }

    #[test]
    fn test_bearer_token_rejects_other_schemes() {
        assert_eq!(bearer_token("Basic dXNlcjpwYXNz"), None);
        assert_eq!(bearer_token("abc.def.ghi"), None);
    }

    #[test]
    fn test_bearer_token_rejects_empty() {
        assert_eq!(bearer_token("Bearer "), None);
        assert_eq!(bearer_token("Bearer    "), None);
    }
}

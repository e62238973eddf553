//! Authenticated principal extraction for protected routes.
//!
//! Flow Overview: read the `Authorization: Bearer` header, verify the token,
//! re-resolve the claims against the user store, and return a principal that
//! downstream handlers thread into their storage calls.

use axum::{
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use sqlx::PgPool;
use tracing::error;

use super::{storage::fetch_user, AuthState};
use crate::api::handlers::envelope::ErrorEnvelope;

/// Authenticated user context derived from the bearer token.
#[derive(Clone, Debug)]
pub struct Principal {
    pub user_id: String,
    pub email: String,
}

/// Why a request failed authentication.
#[derive(Debug)]
pub enum AuthRejection {
    NoToken,
    InvalidToken,
    Internal(sqlx::Error),
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::NoToken => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorEnvelope::unauthorized("No token provided")),
            )
                .into_response(),
            Self::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorEnvelope::unauthorized("Invalid token")),
            )
                .into_response(),
            Self::Internal(err) => {
                error!("Failed to resolve principal: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorEnvelope::server_error()),
                )
                    .into_response()
            }
        }
    }
}

/// Resolve the bearer token into a principal.
///
/// Expired tokens, malformed tokens, and tokens whose user no longer exists
/// are rejected with the same body so callers cannot probe account state.
pub async fn require_auth(
    headers: &HeaderMap,
    auth_state: &AuthState,
    pool: &PgPool,
) -> Result<Principal, AuthRejection> {
    let Some(token) = extract_bearer_token(headers) else {
        return Err(AuthRejection::NoToken);
    };

    let claims = auth_state
        .tokens()
        .verify(&token)
        .map_err(|_| AuthRejection::InvalidToken)?;

    // The token is self-contained, but the identity must still resolve to a
    // live user row.
    let user = fetch_user(pool, &claims.user_id)
        .await
        .map_err(AuthRejection::Internal)?;
    let Some(user) = user else {
        return Err(AuthRejection::InvalidToken);
    };

    Ok(Principal {
        user_id: user.user_id,
        email: user.email,
    })
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let trimmed = value.trim();
    let token = trimmed
        .strip_prefix("Bearer ")
        .or_else(|| trimmed.strip_prefix("bearer "))?
        .trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn bearer_token_is_extracted() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc.def.ghi"));
        assert_eq!(
            extract_bearer_token(&headers).as_deref(),
            Some("abc.def.ghi")
        );
    }

    #[test]
    fn lowercase_scheme_is_accepted() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("bearer abc"));
        assert_eq!(extract_bearer_token(&headers).as_deref(), Some("abc"));
    }

    #[test]
    fn missing_header_yields_none() {
        assert_eq!(extract_bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn empty_token_yields_none() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(extract_bearer_token(&headers), None);
    }

    #[test]
    fn other_scheme_yields_none() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(extract_bearer_token(&headers), None);
    }
}

//! Login flow: verify credentials, issue a token.

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{debug, error};

use super::{
    password,
    storage::lookup_credentials,
    types::{validate_login, AuthData, AuthResponse, LoginRequest},
    AuthState,
};
use crate::api::handlers::envelope::{ErrorEnvelope, FieldErrors};

#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful.", body = AuthResponse),
        (status = 401, description = "Authentication failed.", body = ErrorEnvelope),
        (status = 422, description = "Missing fields.", body = FieldErrors),
    ),
    tag = "auth"
)]
/// Verifies an email/password pair and returns a fresh bearer token. Unknown
/// email and wrong password produce the same `401` body; the two cases are
/// only told apart in server-side logs.
pub async fn login(
    pool: Extension<PgPool>,
    auth_state: Extension<Arc<AuthState>>,
    payload: Option<Json<LoginRequest>>,
) -> impl IntoResponse {
    let request = payload.map(|Json(payload)| payload).unwrap_or_default();

    let (email, password) = match validate_login(&request) {
        Ok(credentials) => credentials,
        Err(errors) => {
            return (StatusCode::UNPROCESSABLE_ENTITY, Json(FieldErrors { errors }))
                .into_response()
        }
    };

    let credentials = match lookup_credentials(&pool, &email).await {
        Ok(Some(credentials)) => credentials,
        Ok(None) => {
            debug!("Login failed: unknown email");
            return (
                StatusCode::UNAUTHORIZED,
                Json(ErrorEnvelope::authentication_failed()),
            )
                .into_response();
        }
        Err(err) => {
            error!("Failed to look up credentials: {err}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorEnvelope::server_error()),
            )
                .into_response();
        }
    };

    match password::verify_password(&password, &credentials.password_hash) {
        Ok(true) => {}
        Ok(false) => {
            debug!("Login failed: password mismatch");
            return (
                StatusCode::UNAUTHORIZED,
                Json(ErrorEnvelope::authentication_failed()),
            )
                .into_response();
        }
        Err(err) => {
            error!("Failed to verify password: {err}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorEnvelope::server_error()),
            )
                .into_response();
        }
    }

    let token = match auth_state
        .tokens()
        .issue(&credentials.user.user_id, &credentials.user.email)
    {
        Ok(token) => token,
        Err(err) => {
            error!("Failed to issue token: {err}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorEnvelope::server_error()),
            )
                .into_response();
        }
    };

    (
        StatusCode::OK,
        Json(AuthResponse::new(
            "Login successful",
            AuthData {
                access_token: token,
                user: credentials.user,
            },
        )),
    )
        .into_response()
}

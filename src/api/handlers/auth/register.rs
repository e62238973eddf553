//! Registration flow: validate, create, bootstrap the personal organisation,
//! issue a token.

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::error;

use super::{
    storage::{create_user_with_organisation, SignupError},
    types::{validate_registration, AuthData, AuthResponse, RegisterRequest},
    AuthState,
};
use crate::api::handlers::envelope::{ErrorEnvelope, FieldError, FieldErrors};

#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Registration successful.", body = AuthResponse),
        (status = 422, description = "Missing or invalid fields, or duplicate email/userId.", body = FieldErrors),
        (status = 500, description = "Registration failed.", body = ErrorEnvelope),
    ),
    tag = "auth"
)]
/// Registers a user and their personal organisation, then returns a bearer
/// token plus the public user projection. Duplicate email or userId is a
/// field-qualified `422`; the created user is rolled back if any later step
/// of the signup write fails.
pub async fn register(
    pool: Extension<PgPool>,
    auth_state: Extension<Arc<AuthState>>,
    payload: Option<Json<RegisterRequest>>,
) -> impl IntoResponse {
    // A missing or undecodable body validates like an empty one, so the
    // response still enumerates every required field.
    let request = payload.map(|Json(payload)| payload).unwrap_or_default();

    let new_user = match validate_registration(&request) {
        Ok(new_user) => new_user,
        Err(errors) => {
            return (StatusCode::UNPROCESSABLE_ENTITY, Json(FieldErrors { errors }))
                .into_response()
        }
    };

    let user = match create_user_with_organisation(&pool, &new_user).await {
        Ok(user) => user,
        Err(SignupError::Duplicate(field)) => {
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(FieldErrors {
                    errors: vec![duplicate_error(field)],
                }),
            )
                .into_response()
        }
        Err(SignupError::Hash(err)) => {
            error!("Failed to hash password: {err}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorEnvelope::server_error()),
            )
                .into_response();
        }
        Err(SignupError::Database(err)) => {
            error!("Failed to register user: {err}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorEnvelope::server_error()),
            )
                .into_response();
        }
    };

    let token = match auth_state.tokens().issue(&user.user_id, &user.email) {
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
        StatusCode::CREATED,
        Json(AuthResponse::new(
            "Registration successful",
            AuthData {
                access_token: token,
                user,
            },
        )),
    )
        .into_response()
}

/// `"<Field> already exists"` keyed by the violated unique field.
fn duplicate_error(field: &'static str) -> FieldError {
    let message = match field {
        "userId" => "UserId already exists",
        _ => "Email already exists",
    };
    FieldError::new(field, message)
}

//! Authenticated user lookup.

use axum::{
    extract::{Extension, Path},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::error;
use utoipa::ToSchema;

use super::{
    auth::{principal::require_auth, storage::fetch_user, types::UserPayload, AuthState},
    envelope::ErrorEnvelope,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub status: String,
    pub message: String,
    pub data: UserPayload,
}

#[utoipa::path(
    get,
    path = "/users/{userId}",
    params(("userId" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "User detail.", body = UserResponse),
        (status = 401, description = "Missing or invalid bearer token.", body = ErrorEnvelope),
        (status = 404, description = "User not found.", body = ErrorEnvelope),
    ),
    tag = "users"
)]
/// Fetches the public projection of a user by id.
pub async fn get_user(
    Path(user_id): Path<String>,
    headers: HeaderMap,
    pool: Extension<PgPool>,
    auth_state: Extension<Arc<AuthState>>,
) -> impl IntoResponse {
    if let Err(rejection) = require_auth(&headers, &auth_state, &pool).await {
        return rejection.into_response();
    }

    match fetch_user(&pool, &user_id).await {
        Ok(Some(user)) => (
            StatusCode::OK,
            Json(UserResponse {
                status: "success".to_string(),
                message: "User details retrieved successfully".to_string(),
                data: user,
            }),
        )
            .into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ErrorEnvelope::not_found("User not found")),
        )
            .into_response(),
        Err(err) => {
            error!("Failed to fetch user: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorEnvelope::server_error()),
            )
                .into_response()
        }
    }
}

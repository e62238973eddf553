//! Membership addition handler.

use axum::{
    extract::{Extension, Path},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use sqlx::PgPool;
use std::sync::Arc;

use super::{
    storage::add_member as insert_member,
    types::{AddMemberRequest, MessageResponse},
};
use crate::api::handlers::{
    auth::{principal::require_auth, AuthState},
    envelope::{ErrorEnvelope, FieldError, FieldErrors},
};

#[utoipa::path(
    post,
    path = "/organisations/{orgId}/users",
    request_body = AddMemberRequest,
    params(("orgId" = String, Path, description = "Organisation id")),
    responses(
        (status = 200, description = "User added to the organisation.", body = MessageResponse),
        (status = 401, description = "Missing or invalid bearer token.", body = ErrorEnvelope),
        (status = 404, description = "Organisation or user not found.", body = ErrorEnvelope),
        (status = 422, description = "Missing userId.", body = FieldErrors),
    ),
    tag = "organisations"
)]
/// Adds a user to an organisation. Any authenticated caller holds add-rights;
/// membership of the target organisation is not checked. Re-adding an
/// existing member succeeds without creating a second row.
pub async fn add_member(
    Path(org_id): Path<String>,
    headers: HeaderMap,
    pool: Extension<PgPool>,
    auth_state: Extension<Arc<AuthState>>,
    payload: Option<Json<AddMemberRequest>>,
) -> impl IntoResponse {
    if let Err(rejection) = require_auth(&headers, &auth_state, &pool).await {
        return rejection.into_response();
    }

    let request = payload.map(|Json(payload)| payload).unwrap_or_default();

    let user_id = request
        .user_id
        .as_deref()
        .map(str::trim)
        .unwrap_or_default()
        .to_string();
    if user_id.is_empty() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(FieldErrors {
                errors: vec![FieldError::new("userId", "UserId is required")],
            }),
        )
            .into_response();
    }

    match insert_member(&pool, &org_id, &user_id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(MessageResponse::new(
                "User added to organisation successfully",
            )),
        )
            .into_response(),
        Err(err) => err.into_response(),
    }
}

//! Organisation read/create handlers.
//!
//! These endpoints delegate database access to the shared `storage` module
//! and return `404` for organisations outside the caller's membership set to
//! avoid leaking tenant existence.

use axum::{
    extract::{Extension, Path},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::error;

use super::{
    storage::{create_organisation as insert_organisation, organisation_scoped, organisations_for_user},
    types::{
        CreateOrganisationRequest, OrganisationListResponse, OrganisationResponse,
    },
};
use crate::api::handlers::{
    auth::{principal::require_auth, AuthState},
    envelope::{ErrorEnvelope, FieldError, FieldErrors},
};

#[utoipa::path(
    post,
    path = "/organisations",
    request_body = CreateOrganisationRequest,
    responses(
        (status = 201, description = "Organisation created.", body = OrganisationResponse),
        (status = 401, description = "Missing or invalid bearer token.", body = ErrorEnvelope),
        (status = 422, description = "Missing organisation name.", body = FieldErrors),
    ),
    tag = "organisations"
)]
/// Creates an organisation and enrols the caller as its first member.
pub async fn create_organisation(
    headers: HeaderMap,
    pool: Extension<PgPool>,
    auth_state: Extension<Arc<AuthState>>,
    payload: Option<Json<CreateOrganisationRequest>>,
) -> impl IntoResponse {
    let principal = match require_auth(&headers, &auth_state, &pool).await {
        Ok(principal) => principal,
        Err(rejection) => return rejection.into_response(),
    };

    let request = payload.map(|Json(payload)| payload).unwrap_or_default();

    let name = request
        .name
        .as_deref()
        .map(str::trim)
        .unwrap_or_default()
        .to_string();
    if name.is_empty() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(FieldErrors {
                errors: vec![FieldError::new("name", "Organisation name is required")],
            }),
        )
            .into_response();
    }
    let description = request.description.unwrap_or_default();

    match insert_organisation(&pool, &principal.user_id, &name, &description).await {
        Ok(organisation) => (
            StatusCode::CREATED,
            Json(OrganisationResponse::new(
                "Organisation created successfully",
                organisation,
            )),
        )
            .into_response(),
        Err(err) => err.into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/organisations",
    responses(
        (status = 200, description = "Organisations the caller belongs to.", body = OrganisationListResponse),
        (status = 401, description = "Missing or invalid bearer token.", body = ErrorEnvelope),
    ),
    tag = "organisations"
)]
/// Lists the organisations the caller is a member of, in membership
/// insertion order.
pub async fn list_organisations(
    headers: HeaderMap,
    pool: Extension<PgPool>,
    auth_state: Extension<Arc<AuthState>>,
) -> impl IntoResponse {
    let principal = match require_auth(&headers, &auth_state, &pool).await {
        Ok(principal) => principal,
        Err(rejection) => return rejection.into_response(),
    };

    match organisations_for_user(&pool, &principal.user_id).await {
        Ok(organisations) => (
            StatusCode::OK,
            Json(OrganisationListResponse::new(
                "Organisations retrieved successfully",
                organisations,
            )),
        )
            .into_response(),
        Err(err) => {
            error!("Failed to list organisations: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorEnvelope::server_error()),
            )
                .into_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/organisations/{orgId}",
    params(("orgId" = String, Path, description = "Organisation id")),
    responses(
        (status = 200, description = "Organisation detail.", body = OrganisationResponse),
        (status = 401, description = "Missing or invalid bearer token.", body = ErrorEnvelope),
        (status = 404, description = "Organisation not found.", body = ErrorEnvelope),
    ),
    tag = "organisations"
)]
/// Fetches one organisation through the caller's membership. A non-member
/// gets the same `404` as a caller asking for an id that does not exist.
pub async fn get_organisation(
    Path(org_id): Path<String>,
    headers: HeaderMap,
    pool: Extension<PgPool>,
    auth_state: Extension<Arc<AuthState>>,
) -> impl IntoResponse {
    let principal = match require_auth(&headers, &auth_state, &pool).await {
        Ok(principal) => principal,
        Err(rejection) => return rejection.into_response(),
    };

    match organisation_scoped(&pool, &org_id, &principal.user_id).await {
        Ok(Some(organisation)) => (
            StatusCode::OK,
            Json(OrganisationResponse::new(
                "Organisation details retrieved successfully",
                organisation,
            )),
        )
            .into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ErrorEnvelope::not_found("Organisation not found")),
        )
            .into_response(),
        Err(err) => {
            error!("Failed to get organisation: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorEnvelope::server_error()),
            )
                .into_response()
        }
    }
}

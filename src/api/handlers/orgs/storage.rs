//! Shared SQL storage for organisations and memberships.
//!
//! All reads here are membership-scoped: an organisation is only visible
//! through a membership row of the requesting user.

use axum::{http::StatusCode, response::IntoResponse, Json};
use sqlx::{PgPool, Row};
use tracing::{error, info_span, Instrument};
use uuid::Uuid;

use super::types::OrganisationPayload;
use crate::api::handlers::envelope::ErrorEnvelope;

#[derive(Debug)]
pub(super) enum OrgError {
    /// Referenced entity missing; carries the client-facing message.
    NotFound(&'static str),
    Database(sqlx::Error),
}

impl IntoResponse for OrgError {
    /// Maps storage-layer failures into stable HTTP responses for handlers.
    /// Database errors are logged server-side and surfaced as `500` without
    /// leaking details.
    fn into_response(self) -> axum::response::Response {
        match self {
            Self::NotFound(message) => (
                StatusCode::NOT_FOUND,
                Json(ErrorEnvelope::not_found(message)),
            )
                .into_response(),
            Self::Database(err) => {
                error!("Database error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorEnvelope::server_error()),
                )
                    .into_response()
            }
        }
    }
}

/// Insert a new organisation and enrol the owner as its first member.
/// Runs as a transaction so an organisation can never exist without its
/// owner membership.
pub(super) async fn create_organisation(
    pool: &PgPool,
    owner_user_id: &str,
    name: &str,
    description: &str,
) -> Result<OrganisationPayload, OrgError> {
    let org_id = Uuid::new_v4().to_string();

    let mut tx = pool.begin().await.map_err(OrgError::Database)?;

    let owner_key = resolve_user(&mut tx, owner_user_id).await?;

    let query = r"
        INSERT INTO organisations (org_id, name, description)
        VALUES ($1, $2, $3)
        RETURNING id
    ";
    let span = info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "INSERT",
        db.statement = query
    );
    let org_key: Uuid = sqlx::query(query)
        .bind(&org_id)
        .bind(name)
        .bind(description)
        .fetch_one(&mut *tx)
        .instrument(span)
        .await
        .map_err(OrgError::Database)?
        .get("id");

    insert_membership(&mut tx, org_key, owner_key).await?;

    tx.commit().await.map_err(OrgError::Database)?;

    Ok(OrganisationPayload {
        org_id,
        name: name.to_string(),
        description: description.to_string(),
    })
}

/// Organisations the user belongs to, in membership insertion order.
pub(super) async fn organisations_for_user(
    pool: &PgPool,
    user_id: &str,
) -> Result<Vec<OrganisationPayload>, sqlx::Error> {
    let query = r"
        SELECT o.org_id, o.name, o.description
        FROM organisations o
        JOIN organisation_members m ON m.organisation_id = o.id
        JOIN users u ON u.id = m.user_id
        WHERE u.user_id = $1
        ORDER BY m.created_at
    ";
    let span = info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );
    let rows = sqlx::query(query)
        .bind(user_id)
        .fetch_all(pool)
        .instrument(span)
        .await?;
    Ok(rows
        .into_iter()
        .map(|row| OrganisationPayload {
            org_id: row.get("org_id"),
            name: row.get("name"),
            description: row.get("description"),
        })
        .collect())
}

/// Resolve one organisation, but only through a membership of `user_id`.
/// Non-membership and non-existence both come back as `None`.
pub(super) async fn organisation_scoped(
    pool: &PgPool,
    org_id: &str,
    user_id: &str,
) -> Result<Option<OrganisationPayload>, sqlx::Error> {
    let query = r"
        SELECT o.org_id, o.name, o.description
        FROM organisations o
        JOIN organisation_members m ON m.organisation_id = o.id
        JOIN users u ON u.id = m.user_id
        WHERE o.org_id = $1 AND u.user_id = $2
        LIMIT 1
    ";
    let span = info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(org_id)
        .bind(user_id)
        .fetch_optional(pool)
        .instrument(span)
        .await?;
    Ok(row.map(|row| OrganisationPayload {
        org_id: row.get("org_id"),
        name: row.get("name"),
        description: row.get("description"),
    }))
}

/// Add `member_user_id` to the organisation. Both sides must resolve; adding
/// an existing member is a no-op.
pub(super) async fn add_member(
    pool: &PgPool,
    org_id: &str,
    member_user_id: &str,
) -> Result<(), OrgError> {
    let mut tx = pool.begin().await.map_err(OrgError::Database)?;

    let query = r"SELECT id FROM organisations WHERE org_id = $1";
    let span = info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );
    let org = sqlx::query(query)
        .bind(org_id)
        .fetch_optional(&mut *tx)
        .instrument(span)
        .await
        .map_err(OrgError::Database)?;
    let Some(org) = org else {
        return Err(OrgError::NotFound("Organisation not found"));
    };
    let org_key: Uuid = org.get("id");

    let member_key = resolve_user(&mut tx, member_user_id).await?;

    insert_membership(&mut tx, org_key, member_key).await?;

    tx.commit().await.map_err(OrgError::Database)?;

    Ok(())
}

async fn resolve_user(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    user_id: &str,
) -> Result<Uuid, OrgError> {
    let query = r"SELECT id FROM users WHERE user_id = $1";
    let span = info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(user_id)
        .fetch_optional(&mut **tx)
        .instrument(span)
        .await
        .map_err(OrgError::Database)?;
    match row {
        Some(row) => Ok(row.get("id")),
        None => Err(OrgError::NotFound("User not found")),
    }
}

async fn insert_membership(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    org_key: Uuid,
    user_key: Uuid,
) -> Result<(), OrgError> {
    let query = r"
        INSERT INTO organisation_members (organisation_id, user_id)
        VALUES ($1, $2)
        ON CONFLICT (organisation_id, user_id) DO NOTHING
    ";
    let span = info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "INSERT",
        db.statement = query
    );
    sqlx::query(query)
        .bind(org_key)
        .bind(user_key)
        .execute(&mut **tx)
        .instrument(span)
        .await
        .map_err(OrgError::Database)?;
    Ok(())
}

//! SQL storage for user records and the registration write.
//!
//! Registration's three inserts (user, personal organisation, membership)
//! run inside one transaction so a user can never be observed without their
//! organisation.

use sqlx::{PgPool, Row};
use tracing::{info_span, Instrument};
use uuid::Uuid;

use super::{
    password,
    types::{NewUser, UserPayload},
};

/// Failure modes for the registration write.
#[derive(Debug)]
pub enum SignupError {
    /// Unique constraint violated; carries the public field name
    /// (`email` or `userId`).
    Duplicate(&'static str),
    Hash(bcrypt::BcryptError),
    Database(sqlx::Error),
}

/// Row needed to verify a login attempt.
pub struct CredentialRow {
    pub user: UserPayload,
    pub password_hash: String,
}

/// Create the user, their personal organisation, and the linking membership
/// as one atomic unit.
pub(crate) async fn create_user_with_organisation(
    pool: &PgPool,
    new_user: &NewUser,
) -> Result<UserPayload, SignupError> {
    let password_hash = password::hash_password(&new_user.password).map_err(SignupError::Hash)?;
    let user_id = Uuid::new_v4().to_string();
    let org_id = Uuid::new_v4().to_string();
    let org_name = format!("{}'s Organisation", new_user.first_name);

    let mut tx = pool.begin().await.map_err(SignupError::Database)?;

    let query = r"
        INSERT INTO users (user_id, first_name, last_name, email, password_hash, phone)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id
    ";
    let span = info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "INSERT",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(&user_id)
        .bind(&new_user.first_name)
        .bind(&new_user.last_name)
        .bind(&new_user.email)
        .bind(&password_hash)
        .bind(new_user.phone.as_deref())
        .fetch_one(&mut *tx)
        .instrument(span)
        .await;

    let user_key: Uuid = match row {
        Ok(row) => row.get("id"),
        Err(err) => {
            if let Some(field) = duplicate_field(&err) {
                let _ = tx.rollback().await;
                return Err(SignupError::Duplicate(field));
            }
            return Err(SignupError::Database(err));
        }
    };

    let query = r"
        INSERT INTO organisations (org_id, name, description)
        VALUES ($1, $2, '')
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
        .bind(&org_name)
        .fetch_one(&mut *tx)
        .instrument(span)
        .await
        .map_err(SignupError::Database)?
        .get("id");

    let query = r"
        INSERT INTO organisation_members (organisation_id, user_id)
        VALUES ($1, $2)
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
        .execute(&mut *tx)
        .instrument(span)
        .await
        .map_err(SignupError::Database)?;

    tx.commit().await.map_err(SignupError::Database)?;

    Ok(UserPayload {
        user_id,
        first_name: new_user.first_name.clone(),
        last_name: new_user.last_name.clone(),
        email: new_user.email.clone(),
        phone: new_user.phone.clone(),
    })
}

/// Fetch the stored hash and public projection for an exact email match.
pub(crate) async fn lookup_credentials(
    pool: &PgPool,
    email: &str,
) -> Result<Option<CredentialRow>, sqlx::Error> {
    let query = r"
        SELECT user_id, first_name, last_name, email, password_hash, phone
        FROM users
        WHERE email = $1
    ";
    let span = info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(email)
        .fetch_optional(pool)
        .instrument(span)
        .await?;
    Ok(row.map(|row| CredentialRow {
        user: UserPayload {
            user_id: row.get("user_id"),
            first_name: row.get("first_name"),
            last_name: row.get("last_name"),
            email: row.get("email"),
            phone: row.get("phone"),
        },
        password_hash: row.get("password_hash"),
    }))
}

/// Fetch the public projection for a user id, if the user exists.
pub(crate) async fn fetch_user(
    pool: &PgPool,
    user_id: &str,
) -> Result<Option<UserPayload>, sqlx::Error> {
    let query = r"
        SELECT user_id, first_name, last_name, email, phone
        FROM users
        WHERE user_id = $1
    ";
    let span = info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(user_id)
        .fetch_optional(pool)
        .instrument(span)
        .await?;
    Ok(row.map(|row| UserPayload {
        user_id: row.get("user_id"),
        first_name: row.get("first_name"),
        last_name: row.get("last_name"),
        email: row.get("email"),
        phone: row.get("phone"),
    }))
}

/// Map a unique violation (SQLSTATE `23505`) to the public field it protects.
fn duplicate_field(err: &sqlx::Error) -> Option<&'static str> {
    match err {
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505") => {
            match db_err.constraint() {
                Some("users_email_key") => Some("email"),
                Some("users_user_id_key") => Some("userId"),
                _ => None,
            }
        }
        _ => None,
    }
}

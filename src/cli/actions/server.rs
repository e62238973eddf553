use crate::api::{self, handlers::auth::AuthState};
use anyhow::{anyhow, Result};
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;

/// Immutable server configuration assembled from the CLI.
#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub dsn: String,
    pub jwt_secret: SecretString,
    pub token_ttl_seconds: u64,
}

/// Execute the server action.
///
/// # Errors
/// Returns an error if the signing secret is unusable or the server fails to
/// start.
pub async fn execute(args: Args) -> Result<()> {
    if args.jwt_secret.expose_secret().trim().is_empty() {
        return Err(anyhow!("JWT signing secret must not be empty"));
    }

    let auth_state = Arc::new(AuthState::new(&args.jwt_secret, args.token_ttl_seconds));

    api::new(args.port, args.dsn, auth_state).await
}

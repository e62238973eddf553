//! Command-line argument dispatch and server initialization.
//!
//! This module maps validated CLI arguments to the appropriate action, such
//! as starting the API server with its full configuration state.

use crate::cli::actions::{server::Args, Action};
use anyhow::{Context, Result};
use secrecy::SecretString;

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>("port").copied().unwrap_or(8080);
    let dsn = matches
        .get_one::<String>("dsn")
        .cloned()
        .context("missing required argument: --dsn")?;
    let jwt_secret = matches
        .get_one::<String>("jwt-secret")
        .cloned()
        .context("missing required argument: --jwt-secret")?;
    let token_ttl_seconds = matches
        .get_one::<u64>("token-ttl")
        .copied()
        .unwrap_or(3600);

    Ok(Action::Server(Args {
        port,
        dsn,
        jwt_secret: SecretString::from(jwt_secret),
        token_ttl_seconds,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn handler_maps_matches_to_server_args() {
        temp_env::with_vars(
            [
                ("TESSERA_DSN", None::<&str>),
                ("TESSERA_JWT_SECRET", None::<&str>),
                ("TESSERA_PORT", None::<&str>),
                ("TESSERA_TOKEN_TTL", None::<&str>),
            ],
            || {
                let command = crate::cli::commands::new();
                let matches = command.get_matches_from(vec![
                    "tessera",
                    "--dsn",
                    "postgres://user@localhost:5432/tessera",
                    "--jwt-secret",
                    "sekret",
                    "--port",
                    "9090",
                    "--token-ttl",
                    "60",
                ]);
                let action = handler(&matches).expect("handler should succeed");
                let Action::Server(args) = action;
                assert_eq!(args.port, 9090);
                assert_eq!(args.dsn, "postgres://user@localhost:5432/tessera");
                assert_eq!(args.jwt_secret.expose_secret(), "sekret");
                assert_eq!(args.token_ttl_seconds, 60);
            },
        );
    }
}

//! Registration, login, and bearer-token authentication.
//!
//! Flow Overview:
//! 1) Registration validates input, then creates the user, their personal
//!    organisation, and the linking membership in one transaction.
//! 2) Login verifies the bcrypt hash and answers unknown email and wrong
//!    password with one indistinguishable `401` body.
//! 3) Both flows issue a signed, time-limited bearer token; protected routes
//!    resolve it back into a `Principal` via `principal::require_auth`.

pub mod login;
pub mod password;
pub mod principal;
pub mod register;
pub(crate) mod storage;
pub mod token;
pub mod types;

use secrecy::SecretString;
use self::token::TokenService;

/// Shared authentication state, constructed once at startup and read-only
/// afterwards.
pub struct AuthState {
    tokens: TokenService,
}

impl AuthState {
    #[must_use]
    pub fn new(secret: &SecretString, token_ttl_seconds: u64) -> Self {
        Self {
            tokens: TokenService::new(secret, token_ttl_seconds),
        }
    }

    #[must_use]
    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }
}

//! Stateless bearer tokens binding a user identity to an expiry.
//!
//! Tokens are HS256-signed JWTs carrying `{userId, email, iat, exp}`.
//! Verification is pure computation; there is no revocation, so a token
//! stays valid until its natural expiry.

use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Claims carried by every issued token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub email: String,
    pub iat: u64,
    pub exp: u64,
}

/// Verification failure, already stripped of signature internals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    /// Signature checks out but the token is past its expiry.
    Expired,
    /// Undecodable token or signature mismatch.
    Malformed,
}

/// Issues and verifies bearer tokens with a process-wide signing key.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_seconds: u64,
}

impl TokenService {
    #[must_use]
    pub fn new(secret: &SecretString, ttl_seconds: u64) -> Self {
        let secret = secret.expose_secret().as_bytes();
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl_seconds,
        }
    }

    /// Issue a signed token for the given identity.
    ///
    /// # Errors
    /// Returns an error if the claims cannot be serialized or signed.
    pub fn issue(&self, user_id: &str, email: &str) -> Result<String, jsonwebtoken::errors::Error> {
        let iat = jsonwebtoken::get_current_timestamp();
        let claims = Claims {
            user_id: user_id.to_string(),
            email: email.to_string(),
            iat,
            exp: iat + self.ttl_seconds,
        };
        encode(&Header::default(), &claims, &self.encoding)
    }

    /// Verify a token's signature and expiry and return its claims.
    ///
    /// # Errors
    /// Returns `TokenError::Expired` for a well-signed token past its expiry
    /// and `TokenError::Malformed` for anything else.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|err| match err.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed,
            })
    }
}

//! API handlers and shared utilities for Tessera.
//!
//! This module organizes the service's route handlers and provides common
//! helpers for input validation and response envelopes.

pub mod auth;
pub mod envelope;
pub mod health;
pub mod orgs;
pub mod root;
pub mod users;

use regex::Regex;

/// Minimum accepted password length at registration.
pub const PASSWORD_MIN_LENGTH: usize = 6;

/// Lightweight email sanity check used by auth handlers before persisting data.
pub fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|re| re.is_match(email))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_email_accepts_simple() {
        assert!(valid_email("user@example.com"));
    }

    #[test]
    fn valid_email_rejects_missing_at() {
        assert!(!valid_email("user.example.com"));
    }

    #[test]
    fn valid_email_rejects_whitespace() {
        assert!(!valid_email("us er@example.com"));
    }
}

//! Shared response envelopes.
//!
//! Success bodies use `{status: "success", message, data}`; failures are
//! either a field-qualified error list (validation, uniqueness) or a generic
//! `{status, message, statusCode}` body (auth, not-found, internal). Internal
//! detail never reaches the client through these types.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One offending field with a human-readable message.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    #[must_use]
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

/// `422` body listing every offending field, not just the first.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FieldErrors {
    pub errors: Vec<FieldError>,
}

/// Generic error body for auth, not-found, and internal failures.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorEnvelope {
    pub status: String,
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}

impl ErrorEnvelope {
    fn new(status: &str, message: &str, status_code: u16) -> Self {
        Self {
            status: status.to_string(),
            message: message.to_string(),
            status_code,
        }
    }

    /// Uniform body for both unknown email and wrong password.
    #[must_use]
    pub fn authentication_failed() -> Self {
        Self::new("Bad request", "Authentication failed", 401)
    }

    /// Missing, malformed, or expired bearer token.
    #[must_use]
    pub fn unauthorized(message: &str) -> Self {
        Self::new("Unauthorized", message, 401)
    }

    /// Resource absent, or outside the caller's membership scope.
    #[must_use]
    pub fn not_found(message: &str) -> Self {
        Self::new("Not Found", message, 404)
    }

    /// Unexpected failure; the cause is logged server-side only.
    #[must_use]
    pub fn server_error() -> Self {
        Self::new("error", "Server error", 500)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_envelope_uses_camel_case_status_code() {
        let body = serde_json::to_value(ErrorEnvelope::not_found("Organisation not found"))
            .expect("serialize");
        assert_eq!(body["status"], "Not Found");
        assert_eq!(body["message"], "Organisation not found");
        assert_eq!(body["statusCode"], 404);
    }

    #[test]
    fn authentication_failed_shape_is_fixed() {
        let body =
            serde_json::to_value(ErrorEnvelope::authentication_failed()).expect("serialize");
        assert_eq!(body["status"], "Bad request");
        assert_eq!(body["message"], "Authentication failed");
        assert_eq!(body["statusCode"], 401);
    }

    #[test]
    fn field_errors_serialize_as_list() {
        let body = serde_json::to_value(FieldErrors {
            errors: vec![
                FieldError::new("firstName", "First name is required"),
                FieldError::new("email", "Email is required"),
            ],
        })
        .expect("serialize");
        let errors = body["errors"].as_array().expect("errors array");
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0]["field"], "firstName");
        assert_eq!(errors[1]["message"], "Email is required");
    }
}

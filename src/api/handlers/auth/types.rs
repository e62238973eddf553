//! Request/response types for the auth API.
//!
//! These payloads are shared between handlers and `OpenAPI` generation.
//! Request fields are optional so a partially filled payload still reaches
//! the validators, which report every offending field at once.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::super::{envelope::FieldError, valid_email, PASSWORD_MIN_LENGTH};

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Public user projection. The password hash never appears here.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthData {
    pub access_token: String,
    pub user: UserPayload,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub status: String,
    pub message: String,
    pub data: AuthData,
}

impl AuthResponse {
    #[must_use]
    pub fn new(message: &str, data: AuthData) -> Self {
        Self {
            status: "success".to_string(),
            message: message.to_string(),
            data,
        }
    }
}

/// Checked registration input produced by `validate_registration`.
#[derive(Debug)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
}

/// Validate a registration payload, collecting every offending field.
///
/// # Errors
/// Returns one `FieldError` per missing or malformed field.
pub fn validate_registration(request: &RegisterRequest) -> Result<NewUser, Vec<FieldError>> {
    let mut errors = Vec::new();

    let first_name = required(
        &request.first_name,
        "firstName",
        "First name is required",
        &mut errors,
    );
    let last_name = required(
        &request.last_name,
        "lastName",
        "Last name is required",
        &mut errors,
    );
    let email = match required(&request.email, "email", "Email is required", &mut errors) {
        Some(email) if !valid_email(&email) => {
            errors.push(FieldError::new("email", "Valid email is required"));
            None
        }
        other => other,
    };
    // Passwords are taken verbatim; leading or trailing whitespace is significant.
    let password = match request.password.as_deref() {
        None | Some("") => {
            errors.push(FieldError::new("password", "Password is required"));
            None
        }
        Some(password) if password.chars().count() < PASSWORD_MIN_LENGTH => {
            errors.push(FieldError::new(
                "password",
                "Password must be at least 6 characters long",
            ));
            None
        }
        Some(password) => Some(password.to_string()),
    };
    let phone = request
        .phone
        .as_deref()
        .map(str::trim)
        .filter(|phone| !phone.is_empty())
        .map(str::to_string);

    match (first_name, last_name, email, password) {
        (Some(first_name), Some(last_name), Some(email), Some(password)) => Ok(NewUser {
            first_name,
            last_name,
            email,
            password,
            phone,
        }),
        _ => Err(errors),
    }
}

/// Validate a login payload.
///
/// # Errors
/// Returns one `FieldError` per missing field.
pub fn validate_login(request: &LoginRequest) -> Result<(String, String), Vec<FieldError>> {
    let mut errors = Vec::new();

    let email = required(&request.email, "email", "Email is required", &mut errors);
    let password = match request.password.as_deref() {
        None | Some("") => {
            errors.push(FieldError::new("password", "Password is required"));
            None
        }
        Some(password) => Some(password.to_string()),
    };

    match (email, password) {
        (Some(email), Some(password)) => Ok((email, password)),
        _ => Err(errors),
    }
}

fn required(
    value: &Option<String>,
    field: &str,
    message: &str,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    match value.as_deref().map(str::trim) {
        Some(trimmed) if !trimmed.is_empty() => Some(trimmed.to_string()),
        _ => {
            errors.push(FieldError::new(field, message));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_request() -> RegisterRequest {
        RegisterRequest {
            first_name: Some("John".to_string()),
            last_name: Some("Doe".to_string()),
            email: Some("john@example.com".to_string()),
            password: Some("secret1".to_string()),
            phone: Some("123456789".to_string()),
        }
    }

    #[test]
    fn full_payload_validates() {
        let new_user = validate_registration(&full_request()).expect("valid");
        assert_eq!(new_user.first_name, "John");
        assert_eq!(new_user.email, "john@example.com");
        assert_eq!(new_user.phone.as_deref(), Some("123456789"));
    }

    #[test]
    fn empty_payload_enumerates_every_missing_field() {
        let errors = validate_registration(&RegisterRequest::default())
            .expect_err("all fields missing");
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["firstName", "lastName", "email", "password"]);
    }

    #[test]
    fn partially_missing_payload_reports_only_missing_fields() {
        let request = RegisterRequest {
            first_name: Some("Jane".to_string()),
            ..RegisterRequest::default()
        };
        let errors = validate_registration(&request).expect_err("missing fields");
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["lastName", "email", "password"]);
    }

    #[test]
    fn malformed_email_is_field_qualified() {
        let request = RegisterRequest {
            email: Some("not-an-email".to_string()),
            ..full_request()
        };
        let errors = validate_registration(&request).expect_err("bad email");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "email");
        assert_eq!(errors[0].message, "Valid email is required");
    }

    #[test]
    fn short_password_is_rejected() {
        let request = RegisterRequest {
            password: Some("abc".to_string()),
            ..full_request()
        };
        let errors = validate_registration(&request).expect_err("short password");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "password");
    }

    #[test]
    fn phone_is_optional() {
        let request = RegisterRequest {
            phone: None,
            ..full_request()
        };
        let new_user = validate_registration(&request).expect("valid without phone");
        assert_eq!(new_user.phone, None);
    }

    #[test]
    fn blank_phone_collapses_to_none() {
        let request = RegisterRequest {
            phone: Some("   ".to_string()),
            ..full_request()
        };
        let new_user = validate_registration(&request).expect("valid");
        assert_eq!(new_user.phone, None);
    }

    #[test]
    fn login_requires_both_fields() {
        let errors = validate_login(&LoginRequest::default()).expect_err("missing");
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["email", "password"]);
    }

    #[test]
    fn user_payload_never_serializes_a_password_field() {
        let value = serde_json::to_value(UserPayload {
            user_id: "u".to_string(),
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            email: "john@example.com".to_string(),
            phone: None,
        })
        .expect("serialize");
        let keys: Vec<&String> = value.as_object().expect("object").keys().collect();
        assert!(keys.iter().all(|key| !key.to_lowercase().contains("password")));
        assert!(value.get("userId").is_some());
    }
}

//! Request/response types for the organisation API.
//!
//! These payloads are shared between handlers and `OpenAPI` generation.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct CreateOrganisationRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct AddMemberRequest {
    pub user_id: Option<String>,
}

/// Public organisation projection.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrganisationPayload {
    pub org_id: String,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrganisationResponse {
    pub status: String,
    pub message: String,
    pub data: OrganisationPayload,
}

impl OrganisationResponse {
    #[must_use]
    pub fn new(message: &str, data: OrganisationPayload) -> Self {
        Self {
            status: "success".to_string(),
            message: message.to_string(),
            data,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrganisationList {
    pub organisations: Vec<OrganisationPayload>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrganisationListResponse {
    pub status: String,
    pub message: String,
    pub data: OrganisationList,
}

impl OrganisationListResponse {
    #[must_use]
    pub fn new(message: &str, organisations: Vec<OrganisationPayload>) -> Self {
        Self {
            status: "success".to_string(),
            message: message.to_string(),
            data: OrganisationList { organisations },
        }
    }
}

/// Success body with no data payload.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub status: String,
    pub message: String,
}

impl MessageResponse {
    #[must_use]
    pub fn new(message: &str) -> Self {
        Self {
            status: "success".to_string(),
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn organisation_payload_uses_camel_case_org_id() {
        let value = serde_json::to_value(OrganisationPayload {
            org_id: "o".to_string(),
            name: "John's Organisation".to_string(),
            description: String::new(),
        })
        .expect("serialize");
        assert!(value.get("orgId").is_some());
        assert!(value.get("org_id").is_none());
    }
}

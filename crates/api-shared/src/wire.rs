//! Wire models for the hospital collection endpoint.
//!
//! Every response body is an envelope carrying `success` plus either `data` or
//! `error` (and, for field-level rejections, `details`). Field names are camelCase on
//! the wire.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// Mapping from field name (or dotted path) to human-readable messages.
pub type FieldDetails = BTreeMap<String, Vec<String>>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Opening times of a hospital.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OperatingHours {
    /// Opening time, `HH:MM` (24-hour).
    #[schema(example = "09:00")]
    pub from: String,
    /// Closing time, `HH:MM` (24-hour).
    #[schema(example = "17:00")]
    pub to: String,
    /// Weekday names, `Monday` through `Sunday`.
    pub days: Vec<String>,
}

/// A service offered by a hospital.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Service {
    pub name: String,
    pub description: String,
}

/// Request body for `POST /api/hospitals`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateHospitalReq {
    pub name: String,
    /// One of `Small`, `Medium`, `Large`.
    #[schema(example = "Medium")]
    pub size: String,
    pub location: String,
    pub total_beds: u32,
    pub operating_hours: OperatingHours,
    pub services: Vec<Service>,
}

/// A stored hospital record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Hospital {
    /// Store-assigned identifier, 32 lowercase hex characters.
    pub id: String,
    pub name: String,
    pub size: String,
    pub location: String,
    pub total_beds: u32,
    pub operating_hours: OperatingHours,
    pub services: Vec<Service>,
    /// RFC 3339 timestamp.
    pub created_at: String,
    /// RFC 3339 timestamp.
    pub updated_at: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ListHospitalsRes {
    pub success: bool,
    pub data: Vec<Hospital>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CreateHospitalRes {
    pub success: bool,
    pub data: Hospital,
}

/// Failure envelope. `details` is present only for field-level rejections.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub success: bool,
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<BTreeMap<String, Vec<String>>>)]
    pub details: Option<FieldDetails>,
}

impl ErrorRes {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: FieldDetails) -> Self {
        Self {
            success: false,
            error: error.into(),
            details: Some(details),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_res_omits_absent_details() {
        let body = serde_json::to_value(ErrorRes::new("Server error fetching hospitals.")).unwrap();
        assert_eq!(
            body,
            json!({ "success": false, "error": "Server error fetching hospitals." })
        );
    }

    #[test]
    fn error_res_renders_details_map() {
        let mut details = FieldDetails::new();
        details.insert("name".into(), vec!["Required".into()]);
        let body =
            serde_json::to_value(ErrorRes::with_details("Validation failed.", details)).unwrap();
        assert_eq!(body["details"]["name"], json!(["Required"]));
    }

    #[test]
    fn hospital_uses_camel_case_keys() {
        let hospital = Hospital {
            id: "550e8400e29b41d4a716446655440000".into(),
            name: "General".into(),
            size: "Large".into(),
            location: "Leeds".into(),
            total_beds: 300,
            operating_hours: OperatingHours {
                from: "08:00".into(),
                to: "20:00".into(),
                days: vec!["Monday".into()],
            },
            services: vec![Service {
                name: "A&E".into(),
                description: "Emergency care".into(),
            }],
            created_at: "2026-01-01T00:00:00Z".into(),
            updated_at: "2026-01-01T00:00:00Z".into(),
        };
        let body = serde_json::to_value(&hospital).unwrap();
        assert_eq!(body["totalBeds"], json!(300));
        assert_eq!(body["operatingHours"]["from"], json!("08:00"));
        assert!(body.get("createdAt").is_some());
        assert!(body.get("total_beds").is_none());
    }
}

// Request schemas and validation.
//
// Each endpoint has an explicit request type; handlers deserialize the raw
// JSON body with `parse_body` (structural errors -> 400) and then call
// `validate()` (semantic errors -> 400 with per-field messages). No service
// code runs until both pass.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

use crate::database::models::StreetStatus;
use crate::error::ApiError;

/// Deserialize a raw JSON body into a typed request.
pub fn parse_body<T: serde::de::DeserializeOwned>(payload: Value) -> Result<T, ApiError> {
    serde_json::from_value(payload)
        .map_err(|e| ApiError::bad_request(format!("Invalid request body: {}", e)))
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateStreetRequest {
    pub name: String,
    pub neighborhood: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub status: Option<StreetStatus>,
    pub notes: Option<String>,
}

impl CreateStreetRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut errors = HashMap::new();
        if self.name.trim().is_empty() {
            errors.insert("name".to_string(), "must not be empty".to_string());
        }
        fail_if_invalid(errors)
    }
}

/// Partial street update. Only these fields are mutable after creation;
/// identity fields (name, coordinates) are fixed by the create operation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateStreetRequest {
    pub status: Option<StreetStatus>,
    pub notes: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSuggestionRequest {
    pub street_name: String,
    pub neighborhood: Option<String>,
    pub description: Option<String>,
    pub suggested_by_name: Option<String>,
    pub suggested_by_email: Option<String>,
}

impl CreateSuggestionRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut errors = HashMap::new();
        if self.street_name.trim().is_empty() {
            errors.insert("street_name".to_string(), "must not be empty".to_string());
        }
        if let Some(email) = &self.suggested_by_email {
            if !is_valid_email(email) {
                errors.insert(
                    "suggested_by_email".to_string(),
                    "must be a valid email address".to_string(),
                );
            }
        }
        fail_if_invalid(errors)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReviewSuggestionRequest {
    pub is_approved: bool,
    pub admin_notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterAdminRequest {
    pub email: String,
}

impl RegisterAdminRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut errors = HashMap::new();
        if !is_valid_email(&self.email) {
            errors.insert(
                "email".to_string(),
                "must be a valid email address".to_string(),
            );
        }
        fail_if_invalid(errors)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSessionRequest {
    pub code: String,
}

impl CreateSessionRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut errors = HashMap::new();
        if self.code.trim().is_empty() {
            errors.insert("code".to_string(), "must not be empty".to_string());
        }
        fail_if_invalid(errors)
    }
}

fn fail_if_invalid(errors: HashMap<String, String>) -> Result<(), ApiError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::validation_error("Invalid request", errors))
    }
}

fn is_valid_email(s: &str) -> bool {
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !s.contains(char::is_whitespace)
}

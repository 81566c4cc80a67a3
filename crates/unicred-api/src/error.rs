//! # API Error Types
//!
//! Maps registry, validation and issuance failures onto HTTP responses.
//! Every error body carries a human-readable `error`; client errors may add
//! `details`. Upstream failures are logged and never described to the client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;
use unicred_canonical::HashError;
use unicred_core::validator::messages;
use unicred_core::{CoreError, DuplicateConflict, FieldErrors};
use unicred_store::{IssuanceError, RegistrationError, StoreError};

/// JSON error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Summary shown to the user.
    pub error: String,
    /// Structured context for client errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    /// Parser message for malformed bodies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// The body is not JSON of the expected shape (400).
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    /// Registration fields failed validation (400).
    #[error("validation failed: {0}")]
    Validation(FieldErrors),

    /// Domain or email already registered (409).
    #[error("duplicate registration ({})", .0.existing)]
    Duplicate(DuplicateConflict),

    /// Credential fields are blank (400).
    #[error("credential fields are missing: {}", .0.join(", "))]
    IncompleteCredential(Vec<&'static str>),

    /// Issuing wallet address is malformed (400).
    #[error("invalid wallet address")]
    InvalidWallet,

    /// Other client error (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Resource not found (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Conflict with the record's current state (409).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Upstream failure (500). Logged, not returned.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::InvalidBody(_)
            | Self::Validation(_)
            | Self::IncompleteCredential(_)
            | Self::InvalidWallet
            | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Duplicate(_) | Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> ErrorBody {
        let (error, details, message) = match self {
            Self::InvalidBody(reason) => ("Invalid request body".to_string(), None, Some(reason.clone())),
            Self::Validation(fields) => (
                "Validation failed".to_string(),
                serde_json::to_value(fields).ok(),
                None,
            ),
            Self::Duplicate(conflict) => (
                "University with this domain or email already exists".to_string(),
                Some(json!({ "existing": conflict.existing })),
                None,
            ),
            Self::IncompleteCredential(missing) => (
                "Please fill in all credential fields".to_string(),
                Some(json!({ "missing": missing })),
                None,
            ),
            Self::InvalidWallet => (
                "Validation failed".to_string(),
                Some(json!({ "wallet_address": messages::INVALID_WALLET })),
                None,
            ),
            Self::BadRequest(msg) | Self::NotFound(msg) | Self::Conflict(msg) => {
                (msg.clone(), None, None)
            }
            Self::Internal(_) => ("Internal server error".to_string(), None, None),
        };
        ErrorBody {
            error,
            details,
            message,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Self::Internal(reason) = &self {
            tracing::error!(error = %reason, "internal server error");
        }
        (self.status(), Json(self.body())).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => Self::NotFound(format!("University {id} not found")),
            StoreError::UniqueViolation(conflict) => Self::Duplicate(conflict),
            StoreError::Rule(CoreError::MissingRejectionReason) => {
                Self::BadRequest("A rejection reason is required".to_string())
            }
            StoreError::Rule(rule @ CoreError::InvalidTransition { .. }) => {
                Self::Conflict(capitalize(&rule.to_string()))
            }
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<RegistrationError> for AppError {
    fn from(err: RegistrationError) -> Self {
        match err {
            RegistrationError::Invalid(fields) => Self::Validation(fields),
            RegistrationError::Duplicate(conflict) => Self::Duplicate(conflict),
            RegistrationError::Upstream(err) => Self::Internal(err.to_string()),
        }
    }
}

impl From<IssuanceError> for AppError {
    fn from(err: IssuanceError) -> Self {
        match err {
            IssuanceError::Incomplete(missing) => Self::IncompleteCredential(missing),
            IssuanceError::InvalidWallet(_) => Self::InvalidWallet,
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<HashError> for AppError {
    fn from(err: HashError) -> Self {
        match err {
            HashError::InvalidJson(reason) => {
                Self::BadRequest(format!("raw_json is not valid JSON: {reason}"))
            }
            other => Self::BadRequest(other.to_string()),
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unicred_core::{MatchedOn, VerificationStatus};
    use uuid::Uuid;

    #[test]
    fn status_codes() {
        assert_eq!(AppError::InvalidBody("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::Conflict("x".into()).status(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::Internal("disk full".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn duplicate_body_names_existing_status() {
        let body = AppError::Duplicate(DuplicateConflict {
            existing: VerificationStatus::Approved,
            matched_on: MatchedOn::Email,
            existing_id: Uuid::nil(),
        })
        .body();
        assert_eq!(
            body.error,
            "University with this domain or email already exists"
        );
        assert_eq!(body.details, Some(json!({"existing": "APPROVED"})));
    }

    #[test]
    fn internal_body_hides_the_cause() {
        let body = serde_json::to_value(AppError::Internal("journal: disk full".into()).body())
            .unwrap();
        assert_eq!(body, json!({"error": "Internal server error"}));
    }

    #[test]
    fn store_errors_map_to_statuses() {
        let missing: AppError = StoreError::Rule(CoreError::MissingRejectionReason).into();
        assert_eq!(missing.status(), StatusCode::BAD_REQUEST);

        let transition: AppError = StoreError::Rule(CoreError::InvalidTransition {
            from: VerificationStatus::Rejected,
            action: "approve",
        })
        .into();
        assert_eq!(transition.status(), StatusCode::CONFLICT);
        assert_eq!(
            transition.body().error,
            "Cannot approve a registration that is REJECTED"
        );
    }
}

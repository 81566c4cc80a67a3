//! Typed journal records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use unicred_core::{IssuedCredential, UniversityRecord, VerificationStatus};
use unicred_journal::{record_type, RecordJson};
use uuid::Uuid;

/// Error that can occur when parsing a record.
#[derive(Error, Debug)]
pub enum ParseError {
    /// JSON deserialization error.
    #[error("deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),
}

/// One registry state change, as journaled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "record_type", rename_all = "snake_case")]
pub enum StoredRecord {
    /// A new PENDING registration.
    UniversityRegistered(UniversityRecord),
    /// An authority decision on an existing registration.
    StatusChanged {
        /// Registration id.
        id: Uuid,
        /// New status.
        verification_status: VerificationStatus,
        /// Reason, for rejections.
        #[serde(default)]
        rejection_reason: Option<String>,
        /// When the decision was taken.
        updated_at: DateTime<Utc>,
    },
    /// An issued credential.
    CredentialIssued(IssuedCredential),
}

impl StoredRecord {
    /// Tag written to `record_type`.
    pub fn kind(&self) -> &'static str {
        match self {
            StoredRecord::UniversityRegistered(_) => "university_registered",
            StoredRecord::StatusChanged { .. } => "status_changed",
            StoredRecord::CredentialIssued(_) => "credential_issued",
        }
    }
}

/// Parses a journal record.
///
/// Returns `Ok(None)` for record types this version does not know, so newer
/// journals can still be replayed.
pub fn parse_record(json: &RecordJson) -> Result<Option<StoredRecord>, ParseError> {
    match record_type(json) {
        Some("university_registered" | "status_changed" | "credential_issued") => {
            Ok(Some(serde_json::from_value(json.clone())?))
        }
        _ => Ok(None),
    }
}

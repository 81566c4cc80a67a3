use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;
use crate::registration::UnknownVariant;

/// Review state of a university registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationStatus {
    /// Submitted, awaiting an authority decision.
    Pending,
    /// Approved by an authority.
    Approved,
    /// Rejected by an authority.
    Rejected,
}

impl VerificationStatus {
    /// Wire name of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            VerificationStatus::Pending => "PENDING",
            VerificationStatus::Approved => "APPROVED",
            VerificationStatus::Rejected => "REJECTED",
        }
    }

    /// Applies an authority action.
    ///
    /// Only a pending registration can be decided; decisions are final.
    pub fn apply(self, action: &AuthorityAction) -> Result<VerificationStatus, CoreError> {
        if self != VerificationStatus::Pending {
            return Err(CoreError::InvalidTransition {
                from: self,
                action: action.name(),
            });
        }
        match action {
            AuthorityAction::Approve => Ok(VerificationStatus::Approved),
            AuthorityAction::Reject { reason } if reason.trim().is_empty() => {
                Err(CoreError::MissingRejectionReason)
            }
            AuthorityAction::Reject { .. } => Ok(VerificationStatus::Rejected),
        }
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VerificationStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PENDING" => Ok(VerificationStatus::Pending),
            "APPROVED" => Ok(VerificationStatus::Approved),
            "REJECTED" => Ok(VerificationStatus::Rejected),
            _ => Err(UnknownVariant(s.to_string())),
        }
    }
}

/// Decision taken by an administrator on a pending registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum AuthorityAction {
    /// Approve the registration.
    Approve,
    /// Reject the registration with a reason.
    Reject {
        /// Reason shown to the applicant; must not be blank.
        reason: String,
    },
}

impl AuthorityAction {
    /// Short name used in errors and logs.
    pub fn name(&self) -> &'static str {
        match self {
            AuthorityAction::Approve => "approve",
            AuthorityAction::Reject { .. } => "reject",
        }
    }

    /// Rejection reason, trimmed, if this is a rejection.
    pub fn reason(&self) -> Option<&str> {
        match self {
            AuthorityAction::Approve => None,
            AuthorityAction::Reject { reason } => Some(reason.trim()),
        }
    }
}

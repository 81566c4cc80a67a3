use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use unicred_canonical::{AisheCode, EmailAddress, WalletAddress, WebsiteDomain};
use uuid::Uuid;

use crate::errors::CoreError;
use crate::registration::{NormalizedCandidate, Region, UniversityType};
use crate::status::{AuthorityAction, VerificationStatus};

/// Persisted university registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniversityRecord {
    /// Record identifier.
    pub id: Uuid,
    /// Legal name.
    pub legal_name: String,
    /// University type.
    #[serde(rename = "type")]
    pub kind: UniversityType,
    /// State or union territory.
    pub state: Region,
    /// UGC reference.
    pub ugc_reference: Option<String>,
    /// AISHE code.
    pub aishe_code: Option<AisheCode>,
    /// Lowercased website domain; unique across records.
    pub website_domain: WebsiteDomain,
    /// Lowercased registrar email; unique across records.
    pub registrar_official_email: EmailAddress,
    /// Lowercased wallet address.
    pub wallet_address: WalletAddress,
    /// Review state.
    pub verification_status: VerificationStatus,
    /// Reason given when the registration was rejected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    /// When the registration was accepted.
    pub created_at: DateTime<Utc>,
    /// When the record last changed.
    pub updated_at: DateTime<Utc>,
}

impl UniversityRecord {
    /// Builds a new pending record from a validated candidate.
    pub fn pending(candidate: NormalizedCandidate, id: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            id,
            legal_name: candidate.legal_name,
            kind: candidate.kind,
            state: candidate.state,
            ugc_reference: candidate.ugc_reference,
            aishe_code: candidate.aishe_code,
            website_domain: candidate.website_domain,
            registrar_official_email: candidate.registrar_official_email,
            wallet_address: candidate.wallet_address,
            verification_status: VerificationStatus::Pending,
            rejection_reason: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies an authority decision in place.
    pub fn decide(&mut self, action: &AuthorityAction, now: DateTime<Utc>) -> Result<(), CoreError> {
        let next = self.verification_status.apply(action)?;
        self.verification_status = next;
        self.rejection_reason = action.reason().map(str::to_string);
        self.updated_at = now;
        Ok(())
    }
}

//! Credential issuance.
//!
//! An issued credential stores the six academic fields, the canonical JSON of
//! those fields (`raw_json`), the SHA-256 of that text, the issuing wallet and
//! a transaction id obtained from a [`TransactionSource`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::sync::atomic::{AtomicU64, Ordering};
use unicred_canonical::{
    compute_content_hash, verify_raw, Canonicalizer, ContentHash, HashError, HashVerdict,
    WalletAddress,
};
use uuid::Uuid;

use crate::errors::CoreError;

/// Academic fields that make up a credential. All are required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialData {
    /// Student's full name.
    pub student_name: String,
    /// Issuing university.
    pub university_name: String,
    /// Degree, e.g. "Bachelor of Science".
    pub degree_type: String,
    /// Major or specialization.
    pub major: String,
    /// Grade point average as printed on the transcript.
    pub gpa: String,
    /// Graduation date or year.
    pub graduation_date: String,
}

impl CredentialData {
    /// Field names in declaration order.
    pub const FIELDS: [&'static str; 6] = [
        "student_name",
        "university_name",
        "degree_type",
        "major",
        "gpa",
        "graduation_date",
    ];

    fn values(&self) -> [&str; 6] {
        [
            &self.student_name,
            &self.university_name,
            &self.degree_type,
            &self.major,
            &self.gpa,
            &self.graduation_date,
        ]
    }

    /// Names of every field that is empty after trimming.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        Self::FIELDS
            .iter()
            .zip(self.values())
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| *name)
            .collect()
    }
}

/// A credential as persisted after issuance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedCredential {
    /// Record identifier.
    pub id: Uuid,
    /// The hashed fields.
    #[serde(flatten)]
    pub data: CredentialData,
    /// `sha256(raw_json)`.
    pub credential_hash: ContentHash,
    /// Wallet that issued the credential.
    pub wallet_address: WalletAddress,
    /// Transaction id returned by the ledger.
    pub transaction_id: String,
    /// Canonical JSON of `data`.
    pub raw_json: String,
    /// Issuance time.
    pub issued_at: DateTime<Utc>,
}

/// Where a credential hash gets anchored.
pub trait TransactionSource: Send + Sync {
    /// Records `hash` and returns a transaction identifier.
    fn submit(&self, hash: &ContentHash) -> Result<String, CoreError>;
}

/// Stand-in ledger that derives a transaction id locally.
///
/// The id is `0x` followed by `sha256(hash_hex || nonce_be)`, so two
/// submissions of the same hash get different ids.
#[derive(Debug, Default)]
pub struct SimulatedLedger {
    nonce: AtomicU64,
}

impl SimulatedLedger {
    /// Creates a ledger whose nonce starts at zero.
    pub fn new() -> Self {
        Self::default()
    }
}

impl TransactionSource for SimulatedLedger {
    fn submit(&self, hash: &ContentHash) -> Result<String, CoreError> {
        let nonce = self.nonce.fetch_add(1, Ordering::Relaxed);
        let mut hasher = Sha256::new();
        hasher.update(hash.as_str().as_bytes());
        hasher.update(nonce.to_be_bytes());
        Ok(format!("0x{}", hex::encode(hasher.finalize())))
    }
}

/// Canonicalizes, hashes and anchors a credential.
///
/// Fields are hashed as given; trimming only applies to the completeness check.
pub fn issue<S: TransactionSource + ?Sized>(
    data: CredentialData,
    wallet_address: WalletAddress,
    ledger: &S,
    canonicalizer: &Canonicalizer,
) -> Result<IssuedCredential, CoreError> {
    let missing = data.missing_fields();
    if !missing.is_empty() {
        return Err(CoreError::IncompleteCredential(missing));
    }

    let payload = compute_content_hash(&data, canonicalizer)?;
    let transaction_id = ledger.submit(&payload.hash)?;

    Ok(IssuedCredential {
        id: Uuid::new_v4(),
        data,
        credential_hash: payload.hash,
        wallet_address,
        transaction_id,
        raw_json: payload.raw_json,
        issued_at: Utc::now(),
    })
}

/// Outcome of re-verifying a stored credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialVerdict {
    /// Hash, canonical form and stored fields all agree.
    Authentic,
    /// `raw_json` does not hash to `credential_hash`.
    HashMismatch,
    /// `raw_json` hashes correctly but is not canonical.
    NonCanonical,
    /// The stored fields no longer canonicalize to `raw_json`.
    FieldsMismatch,
}

impl From<HashVerdict> for CredentialVerdict {
    fn from(verdict: HashVerdict) -> Self {
        match verdict {
            HashVerdict::Authentic => CredentialVerdict::Authentic,
            HashVerdict::HashMismatch => CredentialVerdict::HashMismatch,
            HashVerdict::NonCanonical => CredentialVerdict::NonCanonical,
        }
    }
}

/// Re-checks a stored credential end to end.
pub fn verify_issued(
    credential: &IssuedCredential,
    canonicalizer: &Canonicalizer,
) -> Result<CredentialVerdict, HashError> {
    let verdict = verify_raw(
        &credential.raw_json,
        &credential.credential_hash,
        canonicalizer,
    )?;
    if verdict != HashVerdict::Authentic {
        return Ok(verdict.into());
    }

    let fields = canonicalizer.canonicalize_serialize(&credential.data)?;
    if fields != credential.raw_json {
        return Ok(CredentialVerdict::FieldsMismatch);
    }
    Ok(CredentialVerdict::Authentic)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CredentialData {
        CredentialData {
            student_name: "Alex Chen".into(),
            university_name: "Stanford University".into(),
            degree_type: "Bachelor of Science".into(),
            major: "Computer Science".into(),
            gpa: "3.9".into(),
            graduation_date: "2023".into(),
        }
    }

    fn wallet() -> WalletAddress {
        WalletAddress::parse("0x742d35Cc6634C0532925a3b844Bc454e4438f44e").unwrap()
    }

    #[test]
    fn missing_fields_lists_every_blank() {
        let mut data = sample();
        data.major = "  ".into();
        data.gpa.clear();
        assert_eq!(data.missing_fields(), vec!["major", "gpa"]);
        assert!(sample().missing_fields().is_empty());
    }

    #[test]
    fn issue_refuses_incomplete_data() {
        let err = issue(
            CredentialData::default(),
            wallet(),
            &SimulatedLedger::new(),
            &Canonicalizer::new(),
        )
        .unwrap_err();
        match err {
            CoreError::IncompleteCredential(missing) => assert_eq!(missing.len(), 6),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn issued_hash_is_sha256_of_raw_json() {
        let issued = issue(sample(), wallet(), &SimulatedLedger::new(), &Canonicalizer::new())
            .unwrap();
        assert_eq!(
            issued.credential_hash,
            ContentHash::of_bytes(issued.raw_json.as_bytes())
        );
        assert!(issued.raw_json.starts_with(r#"{"degree_type":"#));
        assert_eq!(
            issued.wallet_address.as_str(),
            "0x742d35cc6634c0532925a3b844bc454e4438f44e"
        );
    }

    #[test]
    fn simulated_ids_differ_per_submission() {
        let ledger = SimulatedLedger::new();
        let hash = ContentHash::of_bytes(b"x");
        let a = ledger.submit(&hash).unwrap();
        let b = ledger.submit(&hash).unwrap();
        assert_ne!(a, b);
        assert!(a.starts_with("0x"));
        assert_eq!(a.len(), 66);
    }

    #[test]
    fn verify_detects_edited_fields() {
        let c = Canonicalizer::new();
        let mut issued = issue(sample(), wallet(), &SimulatedLedger::new(), &c).unwrap();
        assert_eq!(verify_issued(&issued, &c).unwrap(), CredentialVerdict::Authentic);

        issued.data.gpa = "4.0".into();
        assert_eq!(
            verify_issued(&issued, &c).unwrap(),
            CredentialVerdict::FieldsMismatch
        );
    }

    #[test]
    fn verify_detects_edited_raw_json() {
        let c = Canonicalizer::new();
        let mut issued = issue(sample(), wallet(), &SimulatedLedger::new(), &c).unwrap();
        issued.raw_json = issued.raw_json.replace("3.9", "4.0");
        assert_eq!(
            verify_issued(&issued, &c).unwrap(),
            CredentialVerdict::HashMismatch
        );
    }
}

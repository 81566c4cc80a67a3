//! Domain rules for university registration and credential issuance.
//!
//! This crate provides:
//! - Registration candidate types and the shared field validator
//! - The duplicate-registration policy over a pluggable lookup
//! - Authority status transitions (PENDING to APPROVED or REJECTED)
//! - Credential issuance and verification over canonical hashes
//!
//! Core invariants:
//! - The same `validate` runs for pre-flight checks and authoritative writes
//! - A domain or email already on record blocks a new registration
//! - `credential_hash == sha256(raw_json)` and `raw_json` is canonical
//!
#![deny(missing_docs)]

/// Issued credentials and the transaction source seam.
pub mod credential;
/// Duplicate-registration check.
pub mod duplicate;
/// Error types for core operations.
pub mod errors;
/// Persisted university records.
pub mod records;
/// Registration candidate and normalized types.
pub mod registration;
/// Verification status and authority actions.
pub mod status;
/// Field validation.
pub mod validator;

pub use credential::{
    issue, verify_issued, CredentialData, CredentialVerdict, IssuedCredential, SimulatedLedger,
    TransactionSource,
};
pub use duplicate::{
    check_duplicate, DuplicateConflict, ExistingRegistration, MatchedOn, RegistryLookup,
};
pub use errors::CoreError;
pub use records::UniversityRecord;
pub use registration::{
    NormalizedCandidate, Region, RegistrationCandidate, UniversityType, UnknownVariant,
    STATES_AND_UNION_TERRITORIES,
};
pub use status::{AuthorityAction, VerificationStatus};
pub use validator::{validate, Field, FieldErrors};

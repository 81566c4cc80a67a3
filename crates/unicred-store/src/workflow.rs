//! Authoritative registration and issuance flows.
//!
//! These are the write paths every surface (HTTP, CLI) goes through, so the
//! validator, the duplicate policy and the store constraint are applied in
//! one place and in one order.

use chrono::Utc;
use thiserror::Error;
use unicred_canonical::{Canonicalizer, HashError, ValidationError, WalletAddress};
use unicred_core::{
    check_duplicate, issue, validate, CoreError, CredentialData, DuplicateConflict, FieldErrors,
    IssuedCredential, RegistrationCandidate, TransactionSource, UniversityRecord,
};
use uuid::Uuid;

use crate::error::StoreError;
use crate::traits::RegistryStore;

/// Why a registration was not accepted.
#[derive(Error, Debug)]
pub enum RegistrationError {
    /// One or more fields failed validation.
    #[error("validation failed: {0}")]
    Invalid(FieldErrors),
    /// The domain or email is already registered.
    #[error("domain or email already registered ({} record)", .0.existing)]
    Duplicate(DuplicateConflict),
    /// The store could not be read or written.
    #[error("registry unavailable: {0}")]
    Upstream(StoreError),
}

/// Validates, checks for duplicates and inserts a registration.
///
/// The duplicate check is advisory; the store re-checks uniqueness under its
/// write lock, and a hit there is reported as the same
/// [`RegistrationError::Duplicate`].
pub fn register(
    store: &dyn RegistryStore,
    candidate: &RegistrationCandidate,
) -> Result<UniversityRecord, RegistrationError> {
    let normalized = validate(candidate).map_err(RegistrationError::Invalid)?;

    if let Some(conflict) = check_duplicate(
        store,
        &normalized.website_domain,
        &normalized.registrar_official_email,
    )
    .map_err(RegistrationError::Upstream)?
    {
        tracing::info!(
            domain = %normalized.website_domain,
            existing = %conflict.existing,
            matched_on = ?conflict.matched_on,
            "duplicate registration refused"
        );
        return Err(RegistrationError::Duplicate(conflict));
    }

    let record = UniversityRecord::pending(normalized, Uuid::new_v4(), Utc::now());
    match store.insert_university(record) {
        Ok(record) => {
            tracing::info!(id = %record.id, domain = %record.website_domain, "university registered");
            Ok(record)
        }
        Err(StoreError::UniqueViolation(conflict)) => Err(RegistrationError::Duplicate(conflict)),
        Err(err) => Err(RegistrationError::Upstream(err)),
    }
}

/// Why a credential was not issued.
#[derive(Error, Debug)]
pub enum IssuanceError {
    /// Blank credential fields, all listed.
    #[error("credential fields are missing: {}", .0.join(", "))]
    Incomplete(Vec<&'static str>),
    /// The issuing wallet address is malformed.
    #[error("invalid wallet address: {0}")]
    InvalidWallet(ValidationError),
    /// Hashing failed.
    #[error("hashing failed: {0}")]
    Hash(HashError),
    /// The ledger refused the hash.
    #[error("transaction submission failed: {0}")]
    Ledger(String),
    /// The store could not be written.
    #[error("registry unavailable: {0}")]
    Upstream(StoreError),
}

impl From<CoreError> for IssuanceError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::IncompleteCredential(missing) => IssuanceError::Incomplete(missing),
            CoreError::Hash(err) => IssuanceError::Hash(err),
            other => IssuanceError::Ledger(other.to_string()),
        }
    }
}

/// Issues a credential from `wallet_address` and stores it.
pub fn issue_credential<S: TransactionSource + ?Sized>(
    store: &dyn RegistryStore,
    ledger: &S,
    canonicalizer: &Canonicalizer,
    data: CredentialData,
    wallet_address: &str,
) -> Result<IssuedCredential, IssuanceError> {
    let missing = data.missing_fields();
    if !missing.is_empty() {
        return Err(IssuanceError::Incomplete(missing));
    }
    let wallet = WalletAddress::parse(wallet_address).map_err(IssuanceError::InvalidWallet)?;

    let credential = issue(data, wallet, ledger, canonicalizer)?;
    let credential = store
        .insert_credential(credential)
        .map_err(IssuanceError::Upstream)?;
    tracing::info!(
        hash = %credential.credential_hash,
        transaction_id = %credential.transaction_id,
        "credential issued"
    );
    Ok(credential)
}

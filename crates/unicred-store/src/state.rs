//! In-memory registry state shared by every backend.
//!
//! Mutations are split in two steps: a `plan_*` method checks the change
//! against current state and returns the [`StoredRecord`] describing it, and
//! [`RegistryState::apply`] folds that record in. Durable backends persist the
//! record between the two steps; replay calls `apply` alone.

use chrono::Utc;
use unicred_canonical::{ContentHash, EmailAddress, WebsiteDomain};
use unicred_core::{
    AuthorityAction, ExistingRegistration, IssuedCredential, UniversityRecord,
};
use uuid::Uuid;

use crate::error::StoreError;
use crate::filter::RecordFilter;
use crate::typed::StoredRecord;

/// Registrations and credentials in insertion order.
#[derive(Debug, Default)]
pub struct RegistryState {
    universities: Vec<UniversityRecord>,
    credentials: Vec<IssuedCredential>,
}

impl RegistryState {
    /// First record colliding on domain or email.
    pub fn find_by_domain_or_email(
        &self,
        domain: &WebsiteDomain,
        email: &EmailAddress,
    ) -> Option<ExistingRegistration> {
        self.universities
            .iter()
            .find(|r| r.website_domain == *domain || r.registrar_official_email == *email)
            .map(|r| ExistingRegistration {
                id: r.id,
                website_domain: r.website_domain.clone(),
                registrar_official_email: r.registrar_official_email.clone(),
                verification_status: r.verification_status,
            })
    }

    /// University by id.
    pub fn university(&self, id: Uuid) -> Option<&UniversityRecord> {
        self.universities.iter().find(|r| r.id == id)
    }

    /// Matching universities, newest first.
    pub fn universities(&self, filter: &dyn RecordFilter) -> Vec<UniversityRecord> {
        self.universities
            .iter()
            .rev()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect()
    }

    /// Most recently issued credential with this hash.
    pub fn credential(&self, hash: &ContentHash) -> Option<&IssuedCredential> {
        self.credentials
            .iter()
            .rev()
            .find(|c| c.credential_hash == *hash)
    }

    /// All credentials, newest first.
    pub fn credentials(&self) -> Vec<IssuedCredential> {
        self.credentials.iter().rev().cloned().collect()
    }

    /// Uniqueness backstop for a new registration.
    pub fn plan_registration(&self, record: UniversityRecord) -> Result<StoredRecord, StoreError> {
        let existing =
            self.find_by_domain_or_email(&record.website_domain, &record.registrar_official_email);
        if let Some(conflict) = existing.and_then(|e| {
            e.conflict_with(&record.website_domain, &record.registrar_official_email)
        }) {
            return Err(StoreError::UniqueViolation(conflict));
        }
        Ok(StoredRecord::UniversityRegistered(record))
    }

    /// Checks an authority decision against the record's current status.
    pub fn plan_decision(
        &self,
        id: Uuid,
        action: &AuthorityAction,
    ) -> Result<StoredRecord, StoreError> {
        let mut decided = self
            .university(id)
            .cloned()
            .ok_or(StoreError::NotFound(id))?;
        decided.decide(action, Utc::now())?;
        Ok(StoredRecord::StatusChanged {
            id,
            verification_status: decided.verification_status,
            rejection_reason: decided.rejection_reason,
            updated_at: decided.updated_at,
        })
    }

    /// Folds a record into the state.
    pub fn apply(&mut self, record: StoredRecord) -> Result<(), StoreError> {
        match record {
            StoredRecord::UniversityRegistered(university) => {
                self.universities.push(university);
            }
            StoredRecord::StatusChanged {
                id,
                verification_status,
                rejection_reason,
                updated_at,
            } => {
                let university = self
                    .universities
                    .iter_mut()
                    .find(|r| r.id == id)
                    .ok_or(StoreError::NotFound(id))?;
                university.verification_status = verification_status;
                university.rejection_reason = rejection_reason;
                university.updated_at = updated_at;
            }
            StoredRecord::CredentialIssued(credential) => {
                self.credentials.push(credential);
            }
        }
        Ok(())
    }
}

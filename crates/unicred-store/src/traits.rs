//! Storage backend traits.

use unicred_canonical::ContentHash;
use unicred_core::{AuthorityAction, IssuedCredential, RegistryLookup, UniversityRecord};
use uuid::Uuid;

use crate::error::StoreError;
use crate::filter::RecordFilter;

/// Authoritative registry of universities and issued credentials.
///
/// Implementations serialize writers internally and re-check the
/// domain/email uniqueness constraint inside [`insert_university`], so two
/// racing registrations cannot both succeed.
///
/// [`insert_university`]: RegistryStore::insert_university
pub trait RegistryStore: RegistryLookup<Error = StoreError> + Send + Sync {
    /// Persists a new registration.
    ///
    /// Fails with [`StoreError::UniqueViolation`] when the domain or email is
    /// already on record.
    fn insert_university(&self, record: UniversityRecord) -> Result<UniversityRecord, StoreError>;

    /// Looks up a registration by id.
    fn university(&self, id: Uuid) -> Result<Option<UniversityRecord>, StoreError>;

    /// Registrations matching `filter`, newest first.
    fn universities(&self, filter: &dyn RecordFilter) -> Result<Vec<UniversityRecord>, StoreError>;

    /// Applies an authority decision and returns the updated record.
    fn decide(&self, id: Uuid, action: &AuthorityAction) -> Result<UniversityRecord, StoreError>;

    /// Persists an issued credential.
    fn insert_credential(&self, credential: IssuedCredential)
        -> Result<IssuedCredential, StoreError>;

    /// Most recent credential with this hash.
    fn credential(&self, hash: &ContentHash) -> Result<Option<IssuedCredential>, StoreError>;

    /// All credentials, newest first.
    fn credentials(&self) -> Result<Vec<IssuedCredential>, StoreError>;
}

/// Where a backend persists records before applying them.
pub trait RecordSink: Send + Sync {
    /// Makes `record` durable.
    fn persist(&mut self, record: &crate::typed::StoredRecord) -> Result<(), StoreError>;
}

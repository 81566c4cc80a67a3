//! Lock-guarded registry shared by the memory and journal backends.

use parking_lot::RwLock;
use unicred_canonical::{ContentHash, EmailAddress, WebsiteDomain};
use unicred_core::{
    AuthorityAction, ExistingRegistration, IssuedCredential, RegistryLookup, UniversityRecord,
};
use uuid::Uuid;

use crate::error::StoreError;
use crate::filter::RecordFilter;
use crate::state::RegistryState;
use crate::traits::{RecordSink, RegistryStore};
use crate::typed::StoredRecord;

/// Registry state behind a `parking_lot::RwLock`, persisting through `S`.
///
/// Every write holds the lock from the uniqueness or transition check until
/// the record is applied. The lock is never held across an `.await`.
pub struct Registry<S> {
    inner: RwLock<Inner<S>>,
}

struct Inner<S> {
    state: RegistryState,
    sink: S,
}

impl<S: RecordSink> Inner<S> {
    fn commit(&mut self, record: StoredRecord) -> Result<(), StoreError> {
        tracing::debug!(record_type = record.kind(), "committing registry record");
        self.sink.persist(&record)?;
        self.state.apply(record)
    }
}

impl<S: RecordSink> Registry<S> {
    pub(crate) fn from_parts(state: RegistryState, sink: S) -> Self {
        Self {
            inner: RwLock::new(Inner { state, sink }),
        }
    }
}

impl<S: RecordSink> RegistryLookup for Registry<S> {
    type Error = StoreError;

    fn find_by_domain_or_email(
        &self,
        domain: &WebsiteDomain,
        email: &EmailAddress,
    ) -> Result<Option<ExistingRegistration>, StoreError> {
        Ok(self.inner.read().state.find_by_domain_or_email(domain, email))
    }
}

impl<S: RecordSink> RegistryStore for Registry<S> {
    fn insert_university(&self, record: UniversityRecord) -> Result<UniversityRecord, StoreError> {
        let mut inner = self.inner.write();
        let planned = inner.state.plan_registration(record.clone())?;
        inner.commit(planned)?;
        Ok(record)
    }

    fn university(&self, id: Uuid) -> Result<Option<UniversityRecord>, StoreError> {
        Ok(self.inner.read().state.university(id).cloned())
    }

    fn universities(&self, filter: &dyn RecordFilter) -> Result<Vec<UniversityRecord>, StoreError> {
        Ok(self.inner.read().state.universities(filter))
    }

    fn decide(&self, id: Uuid, action: &AuthorityAction) -> Result<UniversityRecord, StoreError> {
        let mut inner = self.inner.write();
        let planned = inner.state.plan_decision(id, action)?;
        inner.commit(planned)?;
        inner
            .state
            .university(id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    fn insert_credential(
        &self,
        credential: IssuedCredential,
    ) -> Result<IssuedCredential, StoreError> {
        let mut inner = self.inner.write();
        inner.commit(StoredRecord::CredentialIssued(credential.clone()))?;
        Ok(credential)
    }

    fn credential(&self, hash: &ContentHash) -> Result<Option<IssuedCredential>, StoreError> {
        Ok(self.inner.read().state.credential(hash).cloned())
    }

    fn credentials(&self) -> Result<Vec<IssuedCredential>, StoreError> {
        Ok(self.inner.read().state.credentials())
    }
}

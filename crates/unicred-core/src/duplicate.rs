//! Duplicate-registration policy.
//!
//! A new registration collides with an existing record when either the
//! normalized website domain or the normalized registrar email is already
//! registered. Any existing status blocks the new submission, REJECTED
//! included; there is no resubmission path under the same domain or email.

use serde::{Deserialize, Serialize};
use unicred_canonical::{EmailAddress, WebsiteDomain};
use uuid::Uuid;

use crate::status::VerificationStatus;

/// Which of the unique columns collided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchedOn {
    /// Website domain only.
    Domain,
    /// Registrar email only.
    Email,
    /// Both columns.
    Both,
}

/// Minimal view of a stored registration used by the duplicate check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExistingRegistration {
    /// Record identifier.
    pub id: Uuid,
    /// Stored domain.
    pub website_domain: WebsiteDomain,
    /// Stored email.
    pub registrar_official_email: EmailAddress,
    /// Stored status.
    pub verification_status: VerificationStatus,
}

/// A blocking collision with an existing registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateConflict {
    /// Status of the record that blocks the submission.
    pub existing: VerificationStatus,
    /// Columns that collided.
    pub matched_on: MatchedOn,
    /// Identifier of the blocking record.
    pub existing_id: Uuid,
}

impl ExistingRegistration {
    /// Classifies the collision against a candidate domain and email.
    ///
    /// Returns `None` if neither column matches.
    pub fn conflict_with(
        &self,
        domain: &WebsiteDomain,
        email: &EmailAddress,
    ) -> Option<DuplicateConflict> {
        let matched_on = match (
            self.website_domain == *domain,
            self.registrar_official_email == *email,
        ) {
            (true, true) => MatchedOn::Both,
            (true, false) => MatchedOn::Domain,
            (false, true) => MatchedOn::Email,
            (false, false) => return None,
        };
        Some(DuplicateConflict {
            existing: self.verification_status,
            matched_on,
            existing_id: self.id,
        })
    }
}

/// Read access to persisted registrations for the duplicate check.
pub trait RegistryLookup {
    /// Error raised by the backing store.
    type Error;

    /// Returns a record whose domain equals `domain` OR whose email equals
    /// `email`, if any exists.
    fn find_by_domain_or_email(
        &self,
        domain: &WebsiteDomain,
        email: &EmailAddress,
    ) -> Result<Option<ExistingRegistration>, Self::Error>;
}

/// Checks whether a normalized domain/email pair is already registered.
///
/// Must run as close as possible to the insert it guards. The check-then-insert
/// window is not atomic; stores re-check uniqueness inside the insert.
pub fn check_duplicate<L: RegistryLookup + ?Sized>(
    lookup: &L,
    domain: &WebsiteDomain,
    email: &EmailAddress,
) -> Result<Option<DuplicateConflict>, L::Error> {
    Ok(lookup
        .find_by_domain_or_email(domain, email)?
        .and_then(|existing| existing.conflict_with(domain, email)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    struct Fixed(Vec<ExistingRegistration>);

    impl RegistryLookup for Fixed {
        type Error = Infallible;

        fn find_by_domain_or_email(
            &self,
            domain: &WebsiteDomain,
            email: &EmailAddress,
        ) -> Result<Option<ExistingRegistration>, Infallible> {
            Ok(self
                .0
                .iter()
                .find(|r| r.website_domain == *domain || r.registrar_official_email == *email)
                .cloned())
        }
    }

    fn existing(status: VerificationStatus) -> ExistingRegistration {
        ExistingRegistration {
            id: Uuid::nil(),
            website_domain: WebsiteDomain::parse("iitb.ac.in").unwrap(),
            registrar_official_email: EmailAddress::parse("registrar@iitb.ac.in").unwrap(),
            verification_status: status,
        }
    }

    fn domain(s: &str) -> WebsiteDomain {
        WebsiteDomain::parse(s).unwrap()
    }

    fn email(s: &str) -> EmailAddress {
        EmailAddress::parse(s).unwrap()
    }

    #[test]
    fn either_column_blocks() {
        let store = Fixed(vec![existing(VerificationStatus::Approved)]);
        let by_domain =
            check_duplicate(&store, &domain("iitb.ac.in"), &email("other@x.ac.in")).unwrap();
        assert_eq!(by_domain.unwrap().matched_on, MatchedOn::Domain);

        let by_email =
            check_duplicate(&store, &domain("other.ac.in"), &email("registrar@iitb.ac.in"))
                .unwrap();
        assert_eq!(by_email.unwrap().matched_on, MatchedOn::Email);

        let both =
            check_duplicate(&store, &domain("IITB.AC.IN"), &email("Registrar@IITB.ac.in"))
                .unwrap();
        assert_eq!(both.unwrap().matched_on, MatchedOn::Both);
    }

    #[test]
    fn rejected_record_still_blocks() {
        let store = Fixed(vec![existing(VerificationStatus::Rejected)]);
        let conflict = check_duplicate(&store, &domain("iitb.ac.in"), &email("a@b.ac.in"))
            .unwrap()
            .unwrap();
        assert_eq!(conflict.existing, VerificationStatus::Rejected);
    }

    #[test]
    fn unrelated_pair_is_clear() {
        let store = Fixed(vec![existing(VerificationStatus::Pending)]);
        assert!(check_duplicate(&store, &domain("du.ac.in"), &email("r@du.ac.in"))
            .unwrap()
            .is_none());
    }
}

use std::fs;

use chrono::Utc;
use tempfile::TempDir;
use unicred_canonical::{Canonicalizer, ContentHash};
use unicred_core::{
    validate, AuthorityAction, CoreError, CredentialData, CredentialVerdict, Field, MatchedOn,
    RegistrationCandidate, SimulatedLedger, UniversityRecord, UniversityType, VerificationStatus,
};
use unicred_store::{
    issue_credential, register, AndFilter, IssuanceError, JournalStore, MemoryStore, OrFilter,
    RegionFilter, RegistrationError, RegistryStore, StatusFilter, StoreError, TypeFilter,
    WriteOptions,
};
use uuid::Uuid;

fn candidate(domain: &str, email: &str) -> RegistrationCandidate {
    RegistrationCandidate {
        legal_name: format!("University at {domain}"),
        kind: "STATE".to_string(),
        state: "Karnataka".to_string(),
        ugc_reference: None,
        aishe_code: Some("U-0456".to_string()),
        website_domain: domain.to_string(),
        registrar_official_email: email.to_string(),
        wallet_address: "0x742d35Cc6634C0532925a3b844Bc454e4438f44e".to_string(),
    }
}

fn credential_data(student: &str) -> CredentialData {
    CredentialData {
        student_name: student.to_string(),
        university_name: "Bangalore University".to_string(),
        degree_type: "M.Sc".to_string(),
        major: "Physics".to_string(),
        gpa: "8.4".to_string(),
        graduation_date: "2023-07-15".to_string(),
    }
}

fn reject(reason: &str) -> AuthorityAction {
    AuthorityAction::Reject {
        reason: reason.to_string(),
    }
}

#[test]
fn register_normalizes_and_starts_pending() {
    let store = MemoryStore::new();
    let record = register(
        &store,
        &candidate("BANGALOREUNIVERSITY.ac.in", "Registrar@BangaloreUniversity.ac.in"),
    )
    .unwrap();

    assert_eq!(record.verification_status, VerificationStatus::Pending);
    assert_eq!(record.website_domain.as_str(), "bangaloreuniversity.ac.in");
    assert_eq!(
        record.registrar_official_email.as_str(),
        "registrar@bangaloreuniversity.ac.in"
    );
    assert_eq!(store.university(record.id).unwrap(), Some(record));
}

#[test]
fn register_reports_field_errors() {
    let store = MemoryStore::new();
    let mut bad = candidate("bu.ac.in", "registrar@bu.ac.in");
    bad.state = "Karnatka".to_string();

    match register(&store, &bad) {
        Err(RegistrationError::Invalid(errors)) => {
            assert_eq!(errors.len(), 1);
            assert!(errors.contains(Field::State));
        }
        other => panic!("expected validation failure, got {other:?}"),
    }
    assert!(store.universities(&unicred_store::AllRecords).unwrap().is_empty());
}

#[test]
fn duplicates_block_on_either_column_and_any_status() {
    let store = MemoryStore::new();
    let first = register(&store, &candidate("bu.ac.in", "registrar@bu.ac.in")).unwrap();
    store
        .decide(first.id, &reject("duplicate application"))
        .unwrap();

    match register(&store, &candidate("BU.AC.IN", "dean@other.ac.in")) {
        Err(RegistrationError::Duplicate(conflict)) => {
            assert_eq!(conflict.existing, VerificationStatus::Rejected);
            assert_eq!(conflict.matched_on, MatchedOn::Domain);
        }
        other => panic!("expected duplicate, got {other:?}"),
    }

    match register(&store, &candidate("other.ac.in", "REGISTRAR@bu.ac.in")) {
        Err(RegistrationError::Duplicate(conflict)) => {
            assert_eq!(conflict.matched_on, MatchedOn::Email);
        }
        other => panic!("expected duplicate, got {other:?}"),
    }
}

#[test]
fn insert_rechecks_uniqueness() {
    let store = MemoryStore::new();
    let now = Utc::now();
    let normalized = validate(&candidate("bu.ac.in", "registrar@bu.ac.in")).unwrap();

    store
        .insert_university(UniversityRecord::pending(normalized.clone(), Uuid::new_v4(), now))
        .unwrap();
    let err = store
        .insert_university(UniversityRecord::pending(normalized, Uuid::new_v4(), now))
        .unwrap_err();

    match err {
        StoreError::UniqueViolation(conflict) => {
            assert_eq!(conflict.matched_on, MatchedOn::Both);
            assert_eq!(conflict.existing, VerificationStatus::Pending);
        }
        other => panic!("expected unique violation, got {other:?}"),
    }
}

#[test]
fn decisions_follow_the_transition_table() {
    let store = MemoryStore::new();
    let record = register(&store, &candidate("bu.ac.in", "registrar@bu.ac.in")).unwrap();

    assert!(matches!(
        store.decide(record.id, &reject("  ")),
        Err(StoreError::Rule(CoreError::MissingRejectionReason))
    ));
    assert!(matches!(
        store.decide(Uuid::new_v4(), &AuthorityAction::Approve),
        Err(StoreError::NotFound(_))
    ));

    let approved = store.decide(record.id, &AuthorityAction::Approve).unwrap();
    assert_eq!(approved.verification_status, VerificationStatus::Approved);
    assert!(approved.updated_at >= approved.created_at);

    assert!(matches!(
        store.decide(record.id, &reject("second thoughts")),
        Err(StoreError::Rule(CoreError::InvalidTransition {
            from: VerificationStatus::Approved,
            ..
        }))
    ));
}

#[test]
fn listings_are_newest_first_and_filterable() {
    let store = MemoryStore::new();
    let a = register(&store, &candidate("a.ac.in", "r@a.ac.in")).unwrap();
    let mut kerala = candidate("b.ac.in", "r@b.ac.in");
    kerala.state = "Kerala".to_string();
    kerala.kind = "PRIVATE".to_string();
    let b = register(&store, &kerala).unwrap();
    let c = register(&store, &candidate("c.ac.in", "r@c.ac.in")).unwrap();
    store.decide(c.id, &AuthorityAction::Approve).unwrap();

    let ids = |records: Vec<UniversityRecord>| records.into_iter().map(|r| r.id).collect::<Vec<_>>();

    assert_eq!(
        ids(store.universities(&unicred_store::AllRecords).unwrap()),
        vec![c.id, b.id, a.id]
    );
    assert_eq!(
        ids(store
            .universities(&StatusFilter(VerificationStatus::Pending))
            .unwrap()),
        vec![b.id, a.id]
    );

    let pending_in_kerala = AndFilter::default()
        .with(StatusFilter(VerificationStatus::Pending))
        .with(RegionFilter("Kerala".parse().unwrap()));
    assert_eq!(ids(store.universities(&pending_in_kerala).unwrap()), vec![b.id]);

    let private_or_approved = OrFilter::default()
        .with(TypeFilter(UniversityType::Private))
        .with(StatusFilter(VerificationStatus::Approved));
    assert_eq!(
        ids(store.universities(&private_or_approved).unwrap()),
        vec![c.id, b.id]
    );
}

#[test]
fn issuance_stores_and_finds_by_hash() {
    let store = MemoryStore::new();
    let ledger = SimulatedLedger::new();
    let canonicalizer = Canonicalizer::new();

    let issued = issue_credential(
        &store,
        &ledger,
        &canonicalizer,
        credential_data("Meera Iyer"),
        "0xABCDEF0123456789abcdef0123456789ABCDEF01",
    )
    .unwrap();
    assert_eq!(
        issued.wallet_address.as_str(),
        "0xabcdef0123456789abcdef0123456789abcdef01"
    );
    assert_eq!(
        issued.credential_hash,
        ContentHash::of_bytes(issued.raw_json.as_bytes())
    );

    let found = store.credential(&issued.credential_hash).unwrap().unwrap();
    assert_eq!(found, issued);
    assert_eq!(
        unicred_core::verify_issued(&found, &canonicalizer).unwrap(),
        CredentialVerdict::Authentic
    );
}

#[test]
fn issuance_refuses_bad_input() {
    let store = MemoryStore::new();
    let ledger = SimulatedLedger::new();
    let canonicalizer = Canonicalizer::new();

    let mut data = credential_data("Meera Iyer");
    data.major = " ".to_string();
    data.graduation_date.clear();
    match issue_credential(&store, &ledger, &canonicalizer, data, "0x742d35cc6634c0532925a3b844bc454e4438f44e") {
        Err(IssuanceError::Incomplete(missing)) => {
            assert_eq!(missing, vec!["major", "graduation_date"])
        }
        other => panic!("expected incomplete, got {other:?}"),
    }

    assert!(matches!(
        issue_credential(&store, &ledger, &canonicalizer, credential_data("A"), "0x123"),
        Err(IssuanceError::InvalidWallet(_))
    ));
    assert!(store.credentials().unwrap().is_empty());
}

#[test]
fn journal_replay_reproduces_state() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data").join("registry.ucj");
    let canonicalizer = Canonicalizer::new();

    let (approved, rejected, credential) = {
        let store = JournalStore::open(&path, WriteOptions::default()).unwrap();
        let a = register(&store, &candidate("a.ac.in", "r@a.ac.in")).unwrap();
        let b = register(&store, &candidate("b.ac.in", "r@b.ac.in")).unwrap();
        let a = store.decide(a.id, &AuthorityAction::Approve).unwrap();
        let b = store.decide(b.id, &reject("missing AISHE proof")).unwrap();
        let credential = issue_credential(
            &store,
            &SimulatedLedger::new(),
            &canonicalizer,
            credential_data("Ravi Kumar"),
            "0x742d35cc6634c0532925a3b844bc454e4438f44e",
        )
        .unwrap();
        (a, b, credential)
    };

    let reopened = JournalStore::open(&path, WriteOptions::default()).unwrap();
    assert_eq!(reopened.university(approved.id).unwrap(), Some(approved));
    let rejected_again = reopened.university(rejected.id).unwrap().unwrap();
    assert_eq!(rejected_again.rejection_reason.as_deref(), Some("missing AISHE proof"));
    assert_eq!(rejected_again, rejected);
    assert_eq!(
        reopened.credential(&credential.credential_hash).unwrap(),
        Some(credential)
    );

    assert!(matches!(
        register(&reopened, &candidate("a.ac.in", "new@a.ac.in")),
        Err(RegistrationError::Duplicate(_))
    ));
}

#[test]
fn torn_tail_is_discarded_on_open() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("registry.ucj");

    let kept = {
        let store = JournalStore::open(&path, WriteOptions::default()).unwrap();
        register(&store, &candidate("a.ac.in", "r@a.ac.in")).unwrap()
    };
    let intact_len = fs::metadata(&path).unwrap().len();
    {
        let store = JournalStore::open(&path, WriteOptions::default()).unwrap();
        register(&store, &candidate("b.ac.in", "r@b.ac.in")).unwrap();
    }
    let file = fs::OpenOptions::new().write(true).open(&path).unwrap();
    file.set_len(intact_len + 12).unwrap();
    drop(file);

    let store = JournalStore::open(&path, WriteOptions::default()).unwrap();
    assert_eq!(fs::metadata(&path).unwrap().len(), intact_len);
    let all = store.universities(&unicred_store::AllRecords).unwrap();
    assert_eq!(all, vec![kept]);

    register(&store, &candidate("c.ac.in", "r@c.ac.in")).unwrap();
    drop(store);
    let store = JournalStore::open(&path, WriteOptions::default()).unwrap();
    assert_eq!(store.universities(&unicred_store::AllRecords).unwrap().len(), 2);
}

//! Registry storage for unicred.
//!
//! This crate provides:
//! - The `RegistryStore` trait the service and CLI write through
//! - An in-memory backend and a journal-backed backend that replays on open
//! - Record filters for listings
//! - The registration and issuance workflows
//!
//! Both backends share one `RegistryState`; they differ only in where a
//! committed record goes before it is applied.

#![deny(missing_docs)]

/// Error types for store operations.
pub mod error;
/// Record filtering API.
pub mod filter;
/// Journal-backed storage implementation.
pub mod journal;
/// In-memory storage implementation.
pub mod memory;
/// Lock-guarded registry shared by the backends.
pub mod registry;
/// Registry state and mutation planning.
pub mod state;
/// Storage backend traits.
pub mod traits;
/// Typed journal records.
pub mod typed;
/// Registration and issuance workflows.
pub mod workflow;

pub use error::StoreError;
pub use filter::{AllRecords, AndFilter, OrFilter, RecordFilter, RegionFilter, StatusFilter, TypeFilter};
pub use journal::{replay, JournalSink, JournalStore};
pub use memory::{MemoryStore, Volatile};
pub use registry::Registry;
pub use state::RegistryState;
pub use traits::{RecordSink, RegistryStore};
pub use typed::{parse_record, ParseError, StoredRecord};
pub use unicred_journal::WriteOptions;
pub use workflow::{issue_credential, register, IssuanceError, RegistrationError};

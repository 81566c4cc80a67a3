//! Error types for store operations.

use thiserror::Error;
use unicred_core::{CoreError, DuplicateConflict};
use uuid::Uuid;

/// Errors that can occur during store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// I/O error outside the journal itself.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Journal backend error.
    #[error("journal error: {0}")]
    Journal(#[from] unicred_journal::JournalError),
    /// A journal record could not be decoded.
    #[error("parse error: {0}")]
    Parse(#[from] crate::typed::ParseError),
    /// No university with this id.
    #[error("university {0} not found")]
    NotFound(Uuid),
    /// The uniqueness constraint on domain or email was hit at insert.
    #[error("domain or email already registered ({} record)", .0.existing)]
    UniqueViolation(DuplicateConflict),
    /// A domain rule refused the change.
    #[error(transparent)]
    Rule(#[from] CoreError),
}

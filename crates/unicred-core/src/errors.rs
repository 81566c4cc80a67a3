use thiserror::Error;

use crate::status::VerificationStatus;

/// Core error types.
#[derive(Error, Debug)]
pub enum CoreError {
    /// An authority action is not allowed from the current status.
    #[error("cannot {action} a registration that is {from}")]
    InvalidTransition {
        /// Status the record is in.
        from: VerificationStatus,
        /// Attempted action.
        action: &'static str,
    },
    /// A rejection was submitted without a reason.
    #[error("a rejection reason is required")]
    MissingRejectionReason,
    /// Credential data has blank fields.
    #[error("credential fields are missing: {}", .0.join(", "))]
    IncompleteCredential(Vec<&'static str>),
    /// Content hashing failed.
    #[error("hashing failed: {0}")]
    Hash(#[from] unicred_canonical::HashError),
    /// The transaction source could not record the hash.
    #[error("transaction submission failed: {0}")]
    Transaction(String),
}

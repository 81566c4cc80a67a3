use thiserror::Error;

/// Errors raised while reading or writing a journal.
#[derive(Error, Debug)]
pub enum JournalError {
    /// I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The file header is missing or malformed.
    #[error("invalid journal header: {0}")]
    InvalidHeader(String),
    /// A frame header is malformed.
    #[error("invalid frame at offset {offset}: {reason}")]
    InvalidFrame {
        /// Offset of the frame header.
        offset: u64,
        /// What was wrong.
        reason: String,
    },
    /// A payload is larger than a frame can carry.
    #[error("payload of {size} bytes exceeds maximum {max}")]
    PayloadTooLarge {
        /// Payload size.
        size: usize,
        /// Maximum payload size.
        max: u32,
    },
    /// The file ends inside a frame (strict mode only).
    #[error("truncated frame at offset {offset}")]
    TruncatedFrame {
        /// Offset of the incomplete frame.
        offset: u64,
    },
    /// A record payload is not UTF-8.
    #[error("record payload is not UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
    /// A record payload is not the expected JSON.
    #[error("record payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// A record payload lacks a string `record_type`.
    #[error("record at offset {offset} has no record_type")]
    UntaggedRecord {
        /// Offset of the frame header.
        offset: u64,
    },
    /// An earlier append failed and its partial frame could not be removed.
    #[error("journal writer is unusable after a failed append at offset {offset}")]
    Poisoned {
        /// Offset where the failed frame started.
        offset: u64,
    },
}

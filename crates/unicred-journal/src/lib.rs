//! Append-only journal for unicred registry records.
//!
//! The registry persists every state change as one framed JSON record:
//!
//! ```text
//! header  16 bytes   "UCJ1" | version u16 LE | flags u16 | reserved [8]
//! frame   8 bytes    kind u8 | reserved [3] | len u32 LE
//! payload len bytes  UTF-8 JSON object with a "record_type" tag
//! ```
//!
//! Replaying the journal front to back rebuilds the registry. A crash in the
//! middle of an append leaves a torn last frame; [`ReadMode::Permissive`]
//! treats it as end of journal and [`JournalWriter::truncate_to`] removes it.
//!
#![deny(missing_docs)]

/// Error types for journal operations.
pub mod errors;
/// File and frame headers.
pub mod frame;
/// Journal reader.
pub mod reader;
/// Record payload helpers.
pub mod record;
/// Journal writer.
pub mod writer;

pub use errors::JournalError;
pub use frame::{FrameHeader, FrameKind, JournalHeader};
pub use reader::{JournalReader, ReadMode};
pub use record::{record_type, RecordJson, RECORD_TYPE_FIELD};
pub use writer::{JournalWriter, WriteOptions};

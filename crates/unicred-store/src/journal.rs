//! Journal-backed registry.
//!
//! Every committed change is appended to a `UCJ1` journal before it is
//! applied in memory. Opening the store replays the journal; a torn final
//! frame left by a crash is cut off before new records are appended.

use std::path::Path;

use unicred_journal::{JournalReader, JournalWriter, ReadMode, WriteOptions};

use crate::error::StoreError;
use crate::registry::Registry;
use crate::state::RegistryState;
use crate::traits::RecordSink;
use crate::typed::{parse_record, StoredRecord};

/// Sink appending each record to a journal file.
pub struct JournalSink {
    writer: JournalWriter,
}

impl RecordSink for JournalSink {
    fn persist(&mut self, record: &StoredRecord) -> Result<(), StoreError> {
        self.writer.append(record)?;
        Ok(())
    }
}

/// Registry persisted to a journal file.
pub type JournalStore = Registry<JournalSink>;

impl JournalStore {
    /// Opens (creating if needed) the journal at `path` and replays it.
    pub fn open<P: AsRef<Path>>(path: P, options: WriteOptions) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let mut writer = JournalWriter::open(path, options)?;
        let (state, replayed, valid_len) = replay(path)?;

        let file_len = std::fs::metadata(path)?.len();
        if valid_len < file_len {
            tracing::warn!(
                path = %path.display(),
                discarded = file_len - valid_len,
                "discarding torn journal tail"
            );
            writer.truncate_to(valid_len)?;
        }

        tracing::info!(path = %path.display(), records = replayed, "journal replayed");
        Ok(Registry::from_parts(state, JournalSink { writer }))
    }
}

/// Rebuilds state from a journal. Returns the state, the number of records
/// applied and the offset just past the last complete frame.
pub fn replay<P: AsRef<Path>>(path: P) -> Result<(RegistryState, usize, u64), StoreError> {
    let mut reader = JournalReader::open(path, ReadMode::Permissive)?;
    let mut state = RegistryState::default();
    let mut applied = 0;

    while let Some(json) = reader.read_record()? {
        match parse_record(&json)? {
            Some(record) => {
                state.apply(record)?;
                applied += 1;
            }
            None => {
                tracing::warn!(record_type = ?json.get("record_type"), "skipping unknown record");
            }
        }
    }

    Ok((state, applied, reader.position()))
}

use crate::errors::JournalError;
use crate::frame::{FrameHeader, FrameKind, JournalHeader, FRAME_HEADER_SIZE, HEADER_SIZE};
use crate::record::{record_type, RecordJson};
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

/// Options for opening a journal for writing.
#[derive(Debug, Clone, Default)]
pub struct WriteOptions {
    /// `fsync` after every append.
    pub sync: bool,
    /// Drop every existing frame and start over.
    pub truncate: bool,
}

/// Append-only journal writer.
///
/// A new or empty file receives a header. An existing file must carry a valid
/// header; frames are appended after whatever it already holds.
///
/// ```rust,no_run
/// use serde_json::json;
/// use unicred_journal::{JournalWriter, WriteOptions};
///
/// let mut writer = JournalWriter::open("registry.ucj", WriteOptions::default())?;
/// writer.append(&json!({"record_type": "status_changed", "status": "APPROVED"}))?;
/// writer.finish()?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
/// A failed append is rolled back to the previous frame boundary, so later
/// appends never land behind a torn frame. If the rollback fails too, the
/// writer refuses every further append.
pub struct JournalWriter {
    file: File,
    sync: bool,
    poisoned_at: Option<u64>,
}

impl JournalWriter {
    /// Opens or creates a journal.
    pub fn open<P: AsRef<Path>>(path: P, options: WriteOptions) -> Result<Self, JournalError> {
        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .open(path)?;

        let len = file.metadata()?.len();
        if len == 0 {
            file.write_all(&JournalHeader::current().encode())?;
        } else {
            let mut header = Vec::with_capacity(HEADER_SIZE);
            file.seek(SeekFrom::Start(0))?;
            (&mut file).take(HEADER_SIZE as u64).read_to_end(&mut header)?;
            JournalHeader::decode(&header)?;
            if options.truncate {
                file.set_len(HEADER_SIZE as u64)?;
            }
        }
        file.seek(SeekFrom::End(0))?;

        let mut writer = Self {
            file,
            sync: options.sync,
            poisoned_at: None,
        };
        writer.flush()?;
        Ok(writer)
    }

    /// Cuts the file back to `len` bytes, discarding a torn tail.
    ///
    /// `len` is normally [`JournalReader::position`](crate::JournalReader::position)
    /// after a permissive read. It never goes below the header.
    pub fn truncate_to(&mut self, len: u64) -> Result<(), JournalError> {
        self.file.set_len(len.max(HEADER_SIZE as u64))?;
        self.file.seek(SeekFrom::End(0))?;
        self.flush()
    }

    /// Serializes `record` and appends it. The value must serialize to an
    /// object with a string `record_type`.
    pub fn append<T: Serialize>(&mut self, record: &T) -> Result<(), JournalError> {
        let value: RecordJson = serde_json::to_value(record)?;
        let offset = self.file.stream_position()?;
        if record_type(&value).is_none() {
            return Err(JournalError::UntaggedRecord { offset });
        }
        let payload = serde_json::to_vec(&value)?;
        self.append_frame(FrameKind::RecordJson, &payload)
    }

    /// Appends a raw frame.
    pub fn append_frame(&mut self, kind: FrameKind, payload: &[u8]) -> Result<(), JournalError> {
        if let Some(offset) = self.poisoned_at {
            return Err(JournalError::Poisoned { offset });
        }
        let header = FrameHeader::new(kind, payload.len())?;
        let mut frame = Vec::with_capacity(FRAME_HEADER_SIZE + payload.len());
        frame.extend_from_slice(&header.encode());
        frame.extend_from_slice(payload);

        let offset = self.file.stream_position()?;
        let written = self
            .file
            .write_all(&frame)
            .map_err(JournalError::from)
            .and_then(|()| self.flush());
        if written.is_err() {
            self.discard_from(offset);
        }
        written
    }

    /// Drops everything from `offset` on, or poisons the writer.
    fn discard_from(&mut self, offset: u64) {
        let restored = self
            .file
            .set_len(offset)
            .and_then(|()| self.file.seek(SeekFrom::Start(offset)).map(|_| ()));
        if restored.is_err() {
            self.poisoned_at = Some(offset);
        }
    }

    /// Flushes and closes the writer.
    pub fn finish(mut self) -> Result<(), JournalError> {
        self.flush()
    }

    fn flush(&mut self) -> Result<(), JournalError> {
        self.file.flush()?;
        if self.sync {
            self.file.sync_data()?;
        }
        Ok(())
    }
}

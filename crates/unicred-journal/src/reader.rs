use crate::errors::JournalError;
use crate::frame::{FrameHeader, FrameKind, JournalHeader, FRAME_HEADER_SIZE, HEADER_SIZE};
use crate::record::{record_type, RecordJson};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// How a reader treats a file that ends inside a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadMode {
    /// A torn frame is an error.
    Strict,
    /// A torn frame ends the journal.
    Permissive,
}

/// Sequential reader over journal frames.
///
/// ```rust,no_run
/// use unicred_journal::{JournalReader, ReadMode};
///
/// let mut reader = JournalReader::open("registry.ucj", ReadMode::Strict)?;
/// while let Some(record) = reader.read_record()? {
///     println!("{}", record["record_type"]);
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct JournalReader {
    inner: BufReader<File>,
    mode: ReadMode,
    position: u64,
}

impl JournalReader {
    /// Opens a journal and validates its header.
    pub fn open<P: AsRef<Path>>(path: P, mode: ReadMode) -> Result<Self, JournalError> {
        let mut inner = BufReader::new(File::open(path)?);
        let mut header = [0u8; HEADER_SIZE];
        let got = read_up_to(&mut inner, &mut header)?;
        JournalHeader::decode(&header[..got])?;
        Ok(Self {
            inner,
            mode,
            position: HEADER_SIZE as u64,
        })
    }

    /// Offset just past the last complete frame read.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Reads the next raw frame. `Ok(None)` at end of journal.
    pub fn read_frame(&mut self) -> Result<Option<(FrameKind, Vec<u8>)>, JournalError> {
        let offset = self.position;

        let mut header = [0u8; FRAME_HEADER_SIZE];
        match read_up_to(&mut self.inner, &mut header)? {
            0 => return Ok(None),
            FRAME_HEADER_SIZE => {}
            _ => return self.torn(offset),
        }
        let frame = FrameHeader::decode(&header, offset)?;

        let mut payload = vec![0u8; frame.len as usize];
        if read_up_to(&mut self.inner, &mut payload)? < payload.len() {
            return self.torn(offset);
        }

        self.position = offset + FRAME_HEADER_SIZE as u64 + u64::from(frame.len);
        Ok(Some((frame.kind, payload)))
    }

    /// Reads the next record, skipping frames of unknown kind.
    pub fn read_record(&mut self) -> Result<Option<RecordJson>, JournalError> {
        loop {
            let offset = self.position;
            match self.read_frame()? {
                None => return Ok(None),
                Some((FrameKind::Unknown(_), _)) => continue,
                Some((FrameKind::RecordJson, payload)) => {
                    let record: RecordJson = serde_json::from_str(std::str::from_utf8(&payload)?)?;
                    if record_type(&record).is_none() {
                        return Err(JournalError::UntaggedRecord { offset });
                    }
                    return Ok(Some(record));
                }
            }
        }
    }

    /// Reads the next record and deserializes it as `T`.
    pub fn read_as<T: DeserializeOwned>(&mut self) -> Result<Option<T>, JournalError> {
        match self.read_record()? {
            None => Ok(None),
            Some(record) => Ok(Some(serde_json::from_value(record)?)),
        }
    }

    fn torn<T>(&self, offset: u64) -> Result<Option<T>, JournalError> {
        match self.mode {
            ReadMode::Permissive => Ok(None),
            ReadMode::Strict => Err(JournalError::TruncatedFrame { offset }),
        }
    }
}

/// Fills `buf` until it is full or the source is exhausted.
fn read_up_to<R: Read>(source: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match source.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

use crate::errors::JournalError;

/// Journal file magic bytes.
pub const MAGIC: [u8; 4] = *b"UCJ1";

/// Current format version.
pub const VERSION: u16 = 1;

/// Size of the file header in bytes.
pub const HEADER_SIZE: usize = 16;

/// Size of a frame header in bytes.
pub const FRAME_HEADER_SIZE: usize = 8;

/// Largest payload a single frame may carry: 16 MiB.
pub const MAX_PAYLOAD_SIZE: u32 = 16 * 1024 * 1024;

const KIND_RECORD_JSON: u8 = 0x01;

/// File header: magic, version, flags, reserved.
///
/// ```text
/// 0..4   magic "UCJ1"
/// 4..6   version (u16 LE)
/// 6..8   flags (u16 LE, zero)
/// 8..16  reserved (zero)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JournalHeader {
    /// Format version.
    pub version: u16,
}

impl JournalHeader {
    /// Header for the current format version.
    pub fn current() -> Self {
        Self { version: VERSION }
    }

    /// Encodes the header.
    pub fn encode(&self) -> [u8; HEADER_SIZE] {
        let mut out = [0u8; HEADER_SIZE];
        out[..4].copy_from_slice(&MAGIC);
        out[4..6].copy_from_slice(&self.version.to_le_bytes());
        out
    }

    /// Decodes and validates a header.
    pub fn decode(bytes: &[u8]) -> Result<Self, JournalError> {
        let bytes: &[u8; HEADER_SIZE] = bytes
            .get(..HEADER_SIZE)
            .and_then(|b| b.try_into().ok())
            .ok_or_else(|| {
                JournalError::InvalidHeader(format!("expected {HEADER_SIZE} bytes, got {}", bytes.len()))
            })?;

        if bytes[..4] != MAGIC {
            return Err(JournalError::InvalidHeader(format!(
                "bad magic {:02x?}",
                &bytes[..4]
            )));
        }
        let version = u16::from_le_bytes([bytes[4], bytes[5]]);
        if version != VERSION {
            return Err(JournalError::InvalidHeader(format!(
                "unsupported version {version}"
            )));
        }
        if bytes[6..8] != [0, 0] {
            return Err(JournalError::InvalidHeader("flags must be zero".to_string()));
        }
        if bytes[8..].iter().any(|b| *b != 0) {
            return Err(JournalError::InvalidHeader(
                "reserved bytes must be zero".to_string(),
            ));
        }
        Ok(Self { version })
    }
}

impl Default for JournalHeader {
    fn default() -> Self {
        Self::current()
    }
}

/// Payload kind carried by a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    /// UTF-8 JSON object with a `record_type` tag.
    RecordJson,
    /// A kind this reader does not understand; skipped on read.
    Unknown(u8),
}

impl From<u8> for FrameKind {
    fn from(byte: u8) -> Self {
        match byte {
            KIND_RECORD_JSON => FrameKind::RecordJson,
            other => FrameKind::Unknown(other),
        }
    }
}

impl From<FrameKind> for u8 {
    fn from(kind: FrameKind) -> Self {
        match kind {
            FrameKind::RecordJson => KIND_RECORD_JSON,
            FrameKind::Unknown(byte) => byte,
        }
    }
}

/// Frame header: kind, three reserved zero bytes, payload length (u32 LE).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    /// Payload kind.
    pub kind: FrameKind,
    /// Payload length in bytes.
    pub len: u32,
}

impl FrameHeader {
    /// Builds a header for a payload of `len` bytes.
    pub fn new(kind: FrameKind, len: usize) -> Result<Self, JournalError> {
        match u32::try_from(len) {
            Ok(len) if len <= MAX_PAYLOAD_SIZE => Ok(Self { kind, len }),
            _ => Err(JournalError::PayloadTooLarge {
                size: len,
                max: MAX_PAYLOAD_SIZE,
            }),
        }
    }

    /// Encodes the header.
    pub fn encode(&self) -> [u8; FRAME_HEADER_SIZE] {
        let mut out = [0u8; FRAME_HEADER_SIZE];
        out[0] = self.kind.into();
        out[4..].copy_from_slice(&self.len.to_le_bytes());
        out
    }

    /// Decodes a header found at `offset` in the file.
    pub fn decode(bytes: &[u8; FRAME_HEADER_SIZE], offset: u64) -> Result<Self, JournalError> {
        let invalid = |reason: String| JournalError::InvalidFrame { offset, reason };

        if bytes[1..4] != [0, 0, 0] {
            return Err(invalid("reserved bytes must be zero".to_string()));
        }
        let len = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
        if len > MAX_PAYLOAD_SIZE {
            return Err(invalid(format!(
                "payload length {len} exceeds {MAX_PAYLOAD_SIZE}"
            )));
        }
        Ok(Self {
            kind: FrameKind::from(bytes[0]),
            len,
        })
    }
}

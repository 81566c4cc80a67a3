use serde_json::Value;

/// A journal record as stored: a JSON object tagged with `record_type`.
pub type RecordJson = Value;

/// Name of the tag field every record carries.
pub const RECORD_TYPE_FIELD: &str = "record_type";

/// Returns the record's `record_type` tag, if it is a tagged object.
pub fn record_type(record: &RecordJson) -> Option<&str> {
    record.get(RECORD_TYPE_FIELD)?.as_str()
}

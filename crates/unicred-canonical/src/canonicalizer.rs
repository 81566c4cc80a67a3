use canonical_json::to_string;
use serde::Serialize;
use serde_json::Value;

use std::fmt;

/// Default maximum nesting depth accepted by [`Canonicalizer::new`].
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Error returned when canonicalization fails.
#[derive(thiserror::Error, Debug)]
pub enum CanonicalizationError {
    /// The value could not be converted into a JSON tree.
    #[error("serialization failed: {0}")]
    Serialization(String),
    /// Nesting exceeds the configured depth limit.
    #[error("nesting deeper than {max} levels at {path}")]
    DepthExceeded {
        /// Path of the first value beyond the limit.
        path: String,
        /// Configured limit.
        max: usize,
    },
    /// Non-finite number (NaN/Infinity) detected.
    #[error("non-finite number detected at {0}")]
    NonFiniteNumber(String),
    /// The canonical encoder rejected the value.
    #[error("canonical encoding failed: {0}")]
    Encoding(String),
}

/// Helper for building JSON paths in error messages.
#[derive(Debug, Clone)]
struct Path {
    segments: Vec<String>,
}

impl Path {
    fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    fn depth(&self) -> usize {
        self.segments.len()
    }

    fn push_field(&self, field: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(field.to_string());
        Self { segments }
    }

    fn push_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(format!("[{}]", index));
        Self { segments }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            write!(f, "root")
        } else {
            write!(f, "{}", self.segments.join("."))
        }
    }
}

/// Canonicalizer that emits deterministic JSON text.
///
/// Output follows gibson042's Canonical JSON (the `canonical_json` crate),
/// which is not RFC 8785:
/// - object keys sorted lexicographically at every nesting level
/// - no insignificant whitespace
/// - every non-ASCII character written as a lowercase `\uXXXX` escape, with
///   surrogate pairs above the BMP (`é` is `\u00e9`)
/// - numbers in capital-E exponent form (`3.9` is `3.9E0`)
///
/// Two values that compare equal always produce byte-identical output,
/// regardless of the order their keys were inserted. Credential fields are
/// strings, so a verifier in another language can reproduce the text with a
/// sorted-key, ASCII-escaping JSON encoder.
#[derive(Debug, Clone, Copy)]
pub struct Canonicalizer {
    max_depth: usize,
}

impl Default for Canonicalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Canonicalizer {
    /// Creates a canonicalizer with the default depth limit.
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Overrides the nesting depth limit.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Produces the canonical text for a JSON value.
    pub fn canonicalize(&self, value: &Value) -> Result<String, CanonicalizationError> {
        self.check(value, Path::root())?;
        to_string(value).map_err(|err| CanonicalizationError::Encoding(err.to_string()))
    }

    /// Serializes any `Serialize` value and returns its canonical text.
    pub fn canonicalize_serialize<T: Serialize>(
        &self,
        value: &T,
    ) -> Result<String, CanonicalizationError> {
        let tree = serde_json::to_value(value)
            .map_err(|e| CanonicalizationError::Serialization(e.to_string()))?;
        self.canonicalize(&tree)
    }

    fn check(&self, value: &Value, path: Path) -> Result<(), CanonicalizationError> {
        if path.depth() > self.max_depth {
            return Err(CanonicalizationError::DepthExceeded {
                path: path.to_string(),
                max: self.max_depth,
            });
        }
        match value {
            Value::Object(map) => {
                for (key, child) in map {
                    self.check(child, path.push_field(key))?;
                }
                Ok(())
            }
            Value::Array(items) => {
                for (idx, item) in items.iter().enumerate() {
                    self.check(item, path.push_index(idx))?;
                }
                Ok(())
            }
            Value::Number(num) => match num.as_f64() {
                Some(f) if !f.is_finite() => {
                    Err(CanonicalizationError::NonFiniteNumber(path.to_string()))
                }
                _ => Ok(()),
            },
            Value::String(_) | Value::Bool(_) | Value::Null => Ok(()),
        }
    }
}

/// Canonicalizes a serializable value with the default [`Canonicalizer`].
pub fn canonicalize<T: Serialize>(value: &T) -> Result<String, CanonicalizationError> {
    Canonicalizer::new().canonicalize_serialize(value)
}

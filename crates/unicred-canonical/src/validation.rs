use thiserror::Error;

/// Validation errors for canonical primitives.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// When a value does not match the required pattern.
    #[error("{field} ('{value}') is not allowed")]
    PatternMismatch {
        /// Field name that failed validation.
        field: &'static str,
        /// Offending value.
        value: String,
    },
    /// When a value's length falls outside its bounds.
    #[error("{field} length {len} is outside {min}..={max}")]
    LengthOutOfBounds {
        /// Field name that is out of bounds.
        field: &'static str,
        /// Observed length in characters.
        len: usize,
        /// Inclusive minimum.
        min: usize,
        /// Inclusive maximum.
        max: usize,
    },
    /// When a required value is empty.
    #[error("{field} is required")]
    Empty {
        /// Field name that was empty.
        field: &'static str,
    },
}

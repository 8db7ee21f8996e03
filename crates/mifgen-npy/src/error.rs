//! Array Loading Error Types
//!
//! @version 0.1.0
//! @author AutomataNexus Development Team

use thiserror::Error;

/// Result type for array loading.
pub type NpyResult<T> = Result<T, NpyError>;

/// Errors that can occur while reading an array artifact.
#[derive(Error, Debug)]
pub enum NpyError {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Neither the contents nor the extension identify a known format.
    #[error("Unknown array format: {0}")]
    UnknownFormat(String),

    /// The NPY magic string is missing.
    #[error("Not an NPY file (bad magic)")]
    BadMagic,

    /// The NPY format version is not 1.0, 2.0 or 3.0.
    #[error("Unsupported NPY version {major}.{minor}")]
    UnsupportedVersion {
        /// Major version byte.
        major: u8,
        /// Minor version byte.
        minor: u8,
    },

    /// The NPY header dictionary could not be parsed.
    #[error("Invalid NPY header: {0}")]
    Header(String),

    /// The element type is not supported.
    #[error("Unsupported dtype: {0}")]
    UnsupportedDtype(String),

    /// The data section is shorter than the header promises.
    #[error("Truncated data: expected {expected} bytes, found {actual}")]
    Truncated {
        /// Bytes required by shape and dtype.
        expected: usize,
        /// Bytes present.
        actual: usize,
    },

    /// An unsigned element does not fit in a signed 64-bit integer.
    #[error("Value {value} at index {index} does not fit in a signed 64-bit integer")]
    ValueOverflow {
        /// Flattened element index.
        index: usize,
        /// The offending value.
        value: u64,
    },

    /// A floating-point element has a fractional part.
    #[error("Non-integral value {value} at index {index} (enable float truncation to round toward zero)")]
    NonIntegral {
        /// Flattened element index.
        index: usize,
        /// The offending value.
        value: f64,
    },

    /// A floating-point element is NaN, infinite, or beyond the 64-bit range.
    #[error("Value {value} at index {index} cannot be converted to an integer")]
    NonFinite {
        /// Flattened element index.
        index: usize,
        /// The offending value.
        value: f64,
    },

    /// JSON parse error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// JSON element that is neither a number nor an array.
    #[error("Invalid JSON element: {0}")]
    InvalidElement(String),

    /// Nested JSON arrays of inconsistent length.
    #[error("Ragged array: expected {expected} elements at depth {depth}, found {actual}")]
    Ragged {
        /// Nesting depth of the mismatch.
        depth: usize,
        /// Length implied by the first row.
        expected: usize,
        /// Length found.
        actual: usize,
    },
}

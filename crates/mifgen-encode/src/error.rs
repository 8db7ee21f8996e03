//! Encoding Error Types
//!
//! Error types for memory image encoding operations.
//!
//! @version 0.1.0
//! @author AutomataNexus Development Team

use thiserror::Error;

/// Result type for encoding operations.
pub type EncodeResult<T> = Result<T, EncodeError>;

/// Errors that can occur while encoding or writing a memory image.
#[derive(Error, Debug)]
pub enum EncodeError {
    /// The input array has no elements.
    #[error("Input array is empty")]
    EmptyInput,

    /// A value does not fit the configured word width.
    #[error(
        "Value {value} at index {index} out of range for {word_width}-bit width \
         (allowed {min}..={max})"
    )]
    OutOfRange {
        /// Flattened position of the first offending value.
        index: usize,
        /// The offending value.
        value: i64,
        /// Configured word width in bits.
        word_width: u32,
        /// Smallest accepted value.
        min: i128,
        /// Largest accepted value.
        max: i128,
    },

    /// The output base token is not `hex` or `bin`.
    #[error("Unsupported base: {0} (choose 'hex' or 'bin')")]
    UnsupportedBase(String),

    /// The word width cannot be represented with the selected base.
    #[error("Invalid word width {word_width}: {reason}")]
    InvalidWordWidth {
        /// Requested word width in bits.
        word_width: u32,
        /// Why the width was rejected.
        reason: &'static str,
    },

    /// A memory image line could not be decoded.
    #[error("Malformed word on line {line}: {reason}")]
    MalformedWord {
        /// 1-based line number.
        line: usize,
        /// What was wrong with the line.
        reason: String,
    },

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The temporary file could not be moved onto the output path.
    #[error("Failed to commit output file: {0}")]
    Persist(#[from] tempfile::PersistError),
}

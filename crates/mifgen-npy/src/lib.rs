//! Mifgen Npy - Array Artifact Loading
//!
//! Loads serialized numeric arrays fully into memory and flattens them into
//! signed 64-bit integers in C order, ready for memory image encoding.
//!
//! # Supported Formats
//!
//! - **NumPy** (.npy) - format versions 1.0, 2.0 and 3.0; bool, signed and
//!   unsigned integers up to 64 bits, float16/32/64; either byte order;
//!   C or Fortran layout
//! - **JSON** (.json) - rectangular nested arrays of numbers
//!
//! Floating-point elements must be integral unless [`FloatPolicy::Truncate`]
//! is selected.
//!
//! # Example
//!
//! ```ignore
//! use mifgen_npy::load_array;
//!
//! let array = load_array("quantized_biases_dense_5_1.npy")?;
//! println!("{} values, shape {}", array.numel(), array.shape_string());
//! ```
//!
//! @version 0.1.0
//! @author AutomataNexus Development Team

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::cast_possible_truncation)]

// =============================================================================
// Modules
// =============================================================================

mod array;
mod error;
mod format;
mod json;
mod npy;

// =============================================================================
// Re-exports
// =============================================================================

pub use array::{DType, FloatPolicy, LoadOptions, NumericArray};
pub use error::{NpyError, NpyResult};
pub use format::{detect_format, detect_format_from_bytes, Format};
pub use json::parse_json;
pub use npy::{parse_npy, read_header, NpyHeader, NPY_MAGIC};

// =============================================================================
// Imports
// =============================================================================

use std::path::Path;

use tracing::info;

// =============================================================================
// High-Level API
// =============================================================================

/// Load an array file with default options.
///
/// The format is determined from the file contents, falling back to the
/// extension.
pub fn load_array<P: AsRef<Path>>(path: P) -> NpyResult<NumericArray> {
    load_array_with(path, &LoadOptions::default())
}

/// Load an array file with explicit options.
pub fn load_array_with<P: AsRef<Path>>(path: P, options: &LoadOptions) -> NpyResult<NumericArray> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;

    let format = detect_format_from_bytes(&bytes)
        .or_else(|| detect_format(path))
        .ok_or_else(|| NpyError::UnknownFormat(path.display().to_string()))?;

    let array = load_bytes(&bytes, format, options)?;
    info!(
        path = %path.display(),
        format = %format,
        dtype = %array.dtype,
        shape = ?array.shape,
        "Loaded array"
    );
    Ok(array)
}

/// Parse an in-memory buffer of a known format.
pub fn load_bytes(bytes: &[u8], format: Format, options: &LoadOptions) -> NpyResult<NumericArray> {
    match format {
        Format::Npy => parse_npy(bytes, options),
        Format::Json => parse_json(bytes, options),
    }
}

// =============================================================================
// Tests
// =============================================================================

//! Format Detection
//!
//! Identifies array artifact formats from magic bytes or file extension.

use std::path::Path;

use crate::npy::NPY_MAGIC;

// =============================================================================
// Format Enum
// =============================================================================

/// Supported array artifact formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// NumPy binary array (.npy)
    Npy,
    /// Nested JSON number array (.json)
    Json,
}

impl Format {
    /// Get the file extension for this format.
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Npy => "npy",
            Format::Json => "json",
        }
    }

    /// Get a human-readable name for this format.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Format::Npy => "NumPy",
            Format::Json => "JSON",
        }
    }

    /// Get all supported formats.
    #[must_use]
    pub fn all() -> &'static [Format] {
        &[Format::Npy, Format::Json]
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// =============================================================================
// Format Detection
// =============================================================================

/// Detect the format from a file path based on extension.
pub fn detect_format<P: AsRef<Path>>(path: P) -> Option<Format> {
    let ext = path.as_ref().extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "npy" => Some(Format::Npy),
        "json" => Some(Format::Json),
        _ => None,
    }
}

/// Detect format from file contents (magic bytes).
#[must_use]
pub fn detect_format_from_bytes(bytes: &[u8]) -> Option<Format> {
    if bytes.starts_with(NPY_MAGIC) {
        return Some(Format::Npy);
    }

    // JSON arrays may be preceded by whitespace
    match bytes.iter().find(|b| !b.is_ascii_whitespace()) {
        Some(b'[') => Some(Format::Json),
        _ => None,
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_format_from_extension() {
        assert_eq!(detect_format("weights.npy"), Some(Format::Npy));
        assert_eq!(detect_format("weights.NPY"), Some(Format::Npy));
        assert_eq!(detect_format("bias.json"), Some(Format::Json));
        assert_eq!(detect_format("model.tflite"), None);
        assert_eq!(detect_format("no_extension"), None);
    }

    #[test]
    fn test_detect_format_from_bytes() {
        assert_eq!(
            detect_format_from_bytes(b"\x93NUMPY\x01\x00"),
            Some(Format::Npy)
        );
        assert_eq!(detect_format_from_bytes(b"  \n[1, 2, 3]"), Some(Format::Json));
        assert_eq!(detect_format_from_bytes(b"{\"a\": 1}"), None);
        assert_eq!(detect_format_from_bytes(b""), None);
    }

    #[test]
    fn test_format_display() {
        assert_eq!(format!("{}", Format::Npy), "NumPy");
        assert_eq!(Format::Json.extension(), "json");
        assert_eq!(Format::all().len(), 2);
    }
}

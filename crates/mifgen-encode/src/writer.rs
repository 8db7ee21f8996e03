//! Memory Image Writer
//!
//! Commits encoded images to disk. Output is staged in a temporary file next
//! to the destination and renamed into place, so the destination either holds
//! the complete image or is left untouched.
//!
//! @version 0.1.0
//! @author AutomataNexus Development Team

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::encode::encode;
use crate::error::EncodeResult;
use crate::types::{EncodingConfig, MemoryImage};

/// Writes `image` to `path`, replacing any existing file atomically.
pub fn write_memory_image<P: AsRef<Path>>(image: &MemoryImage, path: P) -> EncodeResult<()> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staged = NamedTempFile::new_in(dir)?;
    debug!(staging = %staged.path().display(), "Staging memory image");

    staged.write_all(image.to_text().as_bytes())?;
    staged.flush()?;
    staged.as_file().sync_all()?;
    staged.persist(path)?;

    info!(
        path = %path.display(),
        words = image.len(),
        bytes = image.byte_len(),
        "Wrote memory image"
    );
    Ok(())
}

/// Encodes `values` and writes the result to `path`.
///
/// Validation happens before the output file is touched; on any encoding
/// error the destination is not created.
pub fn convert<P: AsRef<Path>>(
    values: &[i64],
    config: &EncodingConfig,
    path: P,
) -> EncodeResult<MemoryImage> {
    let image = encode(values, config)?;
    write_memory_image(&image, path)?;
    Ok(image)
}

// =============================================================================
// Tests
// =============================================================================

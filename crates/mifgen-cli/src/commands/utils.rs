//! Utils - Common Utilities for CLI Commands
//!
//! Shared utility functions used across CLI commands.
//!
//! @version 0.1.0
//! @author `AutomataNexus` Development Team

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use colored::Colorize;

// =============================================================================
// Output Formatting
// =============================================================================

static QUIET: AtomicBool = AtomicBool::new(false);

/// Silence the status helpers below (errors are still reported)
pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

/// Print a success message
pub fn print_success(message: &str) {
    if !is_quiet() {
        println!("{} {}", "✓".green().bold(), message);
    }
}

/// Print an info message
pub fn print_info(message: &str) {
    if !is_quiet() {
        println!("{} {}", "ℹ".blue().bold(), message);
    }
}

/// Print a warning message
pub fn print_warning(message: &str) {
    if !is_quiet() {
        println!("{} {}", "⚠".yellow().bold(), message);
    }
}

/// Print a header
pub fn print_header(title: &str) {
    if !is_quiet() {
        println!();
        println!("{}", title.bold().underline());
        println!();
    }
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    if !is_quiet() {
        println!("  {}: {}", key.dimmed(), value);
    }
}

// =============================================================================
// File Operations
// =============================================================================

/// Check if a path exists
pub fn path_exists<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().exists()
}

/// Default memory image path: the input path with a `.mif` extension
pub fn default_output_path<P: AsRef<Path>>(input: P) -> PathBuf {
    input.as_ref().with_extension("mif")
}

/// True if both paths exist and resolve to the same file
pub fn is_same_file<P: AsRef<Path>, Q: AsRef<Path>>(a: P, b: Q) -> bool {
    match (a.as_ref().canonicalize(), b.as_ref().canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Human-readable byte count
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} bytes")
    }
}

// =============================================================================
// Tests
// =============================================================================

//! Inspect - Array Inspection Command
//!
//! Reports shape, element type and value range of an array file, and the
//! narrowest word width that can hold it.
//!
//! @version 0.1.0
//! @author `AutomataNexus` Development Team

use std::path::PathBuf;

use mifgen_encode::required_width;
use mifgen_npy::{detect_format, load_array_with, NumericArray};
use serde::Serialize;

use super::utils::{path_exists, print_header, print_kv};
use crate::cli::InspectArgs;
use crate::config::MifgenConfig;
use crate::error::{CliError, CliResult};

// =============================================================================
// Report
// =============================================================================

/// Summary of an array file
#[derive(Debug, Serialize, PartialEq)]
pub struct InspectReport {
    /// Input path
    pub path: String,
    /// NumPy dtype name
    pub dtype: String,
    /// Array shape
    pub shape: Vec<usize>,
    /// Number of elements
    pub elements: usize,
    /// Smallest value
    pub min: Option<i64>,
    /// Largest value
    pub max: Option<i64>,
    /// Narrowest word width in bits that holds every value
    pub min_word_width: Option<u32>,
    /// Narrowest word width usable with hex output
    pub min_hex_width: Option<u32>,
}

impl InspectReport {
    fn new(path: String, array: &NumericArray) -> Self {
        let min_word_width = required_width(&array.values);
        Self {
            path,
            dtype: array.dtype.name().to_string(),
            shape: array.shape.clone(),
            elements: array.numel(),
            min: array.min(),
            max: array.max(),
            min_word_width,
            min_hex_width: min_word_width.map(|w| w.div_ceil(4) * 4),
        }
    }
}

// =============================================================================
// Execute Command
// =============================================================================

/// Execute the `inspect` command
pub fn execute(args: InspectArgs, config: &MifgenConfig) -> CliResult<()> {
    let path = PathBuf::from(&args.input);
    if !path_exists(&path) {
        return Err(CliError::InputNotFound(args.input));
    }

    let array = load_array_with(&path, &config.load_options(args.truncate_floats))?;
    let report = InspectReport::new(args.input.clone(), &array);

    match args.format.to_lowercase().as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        "text" => {
            let format = detect_format(&path).map_or("unknown", |f| f.name());
            print_header("Array Info");
            print_kv("File", &report.path);
            print_kv("Extension format", format);
            print_kv("Dtype", &report.dtype);
            print_kv("Shape", &array.shape_string());
            print_kv("Elements", &report.elements.to_string());
            print_kv("Min", &display_opt(report.min));
            print_kv("Max", &display_opt(report.max));
            print_kv("Min word width", &display_opt(report.min_word_width));
            print_kv("Min hex width", &display_opt(report.min_hex_width));
        }
        other => {
            return Err(CliError::InvalidArgument(format!(
                "Unknown output format: {other} (use text or json)"
            )))
        }
    }

    Ok(())
}

fn display_opt<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

// =============================================================================
// Tests
// =============================================================================

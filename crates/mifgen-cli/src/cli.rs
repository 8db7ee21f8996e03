//! CLI - Command Line Interface Definitions
//!
//! Defines the CLI structure using clap derive macros.
//!
//! @version 0.1.0
//! @author `AutomataNexus` Development Team

use clap::{Parser, Subcommand};

// =============================================================================
// Main CLI Structure
// =============================================================================

/// Mifgen - Memory initialization files from numeric arrays
#[derive(Parser, Debug)]
#[command(
    name = "mifgen",
    author = "AutomataNexus Development Team",
    version,
    about = "Convert numeric arrays into memory initialization files",
    long_about = "Mifgen converts NumPy (.npy) and JSON arrays into raw memory images: one \
                  fixed-width hex or binary word per line, no header or addresses.\n\n\
                  Negative values are written as two's complement, suitable for preloading \
                  FPGA block RAM with quantized weights and biases."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to a configuration file (defaults to ./mifgen.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

// =============================================================================
// Subcommands
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert an array file into a memory image
    Convert(ConvertArgs),

    /// Show shape, type and value range of an array file
    Inspect(InspectArgs),

    /// Decode a memory image back into integers
    Decode(DecodeArgs),
}

// =============================================================================
// Convert Command
// =============================================================================

/// Arguments for the `convert` command
#[derive(Parser, Debug)]
pub struct ConvertArgs {
    /// Input array file (.npy or .json)
    pub input: String,

    /// Output memory image (defaults to the input name with a .mif extension)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Memory word width in bits
    #[arg(short = 'w', long)]
    pub word_width: Option<u32>,

    /// Output base (hex, bin)
    #[arg(short, long)]
    pub base: Option<String>,

    /// Truncate fractional float values toward zero instead of failing
    #[arg(long)]
    pub truncate_floats: bool,

    /// Overwrite an existing output file
    #[arg(short, long)]
    pub force: bool,
}

// =============================================================================
// Inspect Command
// =============================================================================

/// Arguments for the `inspect` command
#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// Input array file (.npy or .json)
    pub input: String,

    /// Truncate fractional float values toward zero instead of failing
    #[arg(long)]
    pub truncate_floats: bool,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: String,
}

// =============================================================================
// Decode Command
// =============================================================================

/// Arguments for the `decode` command
#[derive(Parser, Debug)]
pub struct DecodeArgs {
    /// Memory image file
    pub input: String,

    /// Memory word width in bits
    #[arg(short = 'w', long)]
    pub word_width: Option<u32>,

    /// Base of the memory image (hex, bin)
    #[arg(short, long)]
    pub base: Option<String>,

    /// Read words as unsigned instead of two's complement
    #[arg(long)]
    pub unsigned: bool,
}

// =============================================================================
// Tests
// =============================================================================

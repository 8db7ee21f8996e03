//! Decode - Memory Image Decoding Command
//!
//! Reads a memory image back into integers, one per line on stdout. Useful
//! for checking a generated file against its source array.
//!
//! @version 0.1.0
//! @author `AutomataNexus` Development Team

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use mifgen_encode::{decode, DecodeMode};

use super::utils::path_exists;
use crate::cli::DecodeArgs;
use crate::config::MifgenConfig;
use crate::error::{CliError, CliResult};

/// Execute the `decode` command
pub fn execute(args: DecodeArgs, config: &MifgenConfig) -> CliResult<()> {
    let encoding = config.encoding(args.word_width, args.base.as_deref())?;
    let mode = if args.unsigned {
        DecodeMode::Unsigned
    } else {
        DecodeMode::Signed
    };

    let path = PathBuf::from(&args.input);
    if !path_exists(&path) {
        return Err(CliError::InputNotFound(args.input));
    }

    let text = std::fs::read_to_string(&path)?;
    let values = decode(&text, &encoding, mode)?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for value in values {
        writeln!(out, "{value}")?;
    }
    out.flush()?;

    Ok(())
}

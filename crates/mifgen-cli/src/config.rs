//! Config - Configuration File Handling
//!
//! Loads `mifgen.toml` and merges it with command-line overrides.
//!
//! @version 0.1.0
//! @author `AutomataNexus` Development Team

use std::path::Path;

use mifgen_encode::{EncodingConfig, Radix, DEFAULT_WORD_WIDTH};
use mifgen_npy::{FloatPolicy, LoadOptions};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CliError, CliResult};

/// Configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "mifgen.toml";

// =============================================================================
// Configuration
// =============================================================================

/// Tool configuration (mifgen.toml)
#[derive(Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct MifgenConfig {
    /// Memory image encoding defaults
    #[serde(default)]
    pub encoding: EncodingSection,

    /// Input handling
    #[serde(default)]
    pub input: InputSection,
}

/// Encoding defaults
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct EncodingSection {
    /// Word width in bits
    #[serde(default = "default_word_width")]
    pub word_width: u32,

    /// Output base
    #[serde(default)]
    pub base: Radix,
}

impl Default for EncodingSection {
    fn default() -> Self {
        Self {
            word_width: default_word_width(),
            base: Radix::default(),
        }
    }
}

fn default_word_width() -> u32 {
    DEFAULT_WORD_WIDTH
}

/// Input handling
#[derive(Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct InputSection {
    /// What to do with fractional float values
    #[serde(default)]
    pub float_policy: FloatPolicy,
}

// =============================================================================
// Loading
// =============================================================================

impl MifgenConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> CliResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("Failed to read {}: {e}", path.display()))
        })?;
        let config: MifgenConfig = toml::from_str(&content)?;
        debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Load the explicit config file, else `./mifgen.toml` if it exists,
    /// else defaults.
    pub fn resolve(explicit: Option<&str>) -> CliResult<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => Self::load(DEFAULT_CONFIG_FILE),
            None => Ok(Self::default()),
        }
    }

    /// Build the encoding configuration, letting flags override the file.
    pub fn encoding(&self, word_width: Option<u32>, base: Option<&str>) -> CliResult<EncodingConfig> {
        let radix = match base {
            Some(token) => token.parse::<Radix>()?,
            None => self.encoding.base,
        };
        let width = word_width.unwrap_or(self.encoding.word_width);
        Ok(EncodingConfig::new(width, radix)?)
    }

    /// Build array load options; `truncate_floats` forces truncation.
    pub fn load_options(&self, truncate_floats: bool) -> LoadOptions {
        if truncate_floats {
            LoadOptions::with_float_policy(FloatPolicy::Truncate)
        } else {
            LoadOptions::with_float_policy(self.input.float_policy)
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

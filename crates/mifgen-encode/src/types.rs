//! Encoding Types
//!
//! Defines the encoding configuration and the memory image produced by the
//! encoder.
//!
//! @version 0.1.0
//! @author AutomataNexus Development Team

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EncodeError, EncodeResult};
use crate::DEFAULT_WORD_WIDTH;

// =============================================================================
// Radix
// =============================================================================

/// Digit base used for each memory word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Radix {
    /// Zero-padded uppercase hexadecimal, `word_width / 4` digits.
    #[default]
    #[serde(rename = "hex", alias = "HEX", alias = "hexadecimal")]
    Hex,
    /// Zero-padded binary, `word_width` digits.
    #[serde(rename = "bin", alias = "BIN", alias = "binary")]
    Binary,
}

impl Radix {
    /// Returns the token used on the command line and in config files.
    pub fn token(&self) -> &'static str {
        match self {
            Radix::Hex => "hex",
            Radix::Binary => "bin",
        }
    }

    /// Number of bits carried by one digit.
    pub fn bits_per_digit(&self) -> u32 {
        match self {
            Radix::Hex => 4,
            Radix::Binary => 1,
        }
    }

    /// Digit with every bit set, used to sign-extend wide words.
    pub fn top_digit(&self) -> char {
        match self {
            Radix::Hex => 'F',
            Radix::Binary => '1',
        }
    }

    /// Numeric base for parsing.
    pub fn base(&self) -> u32 {
        match self {
            Radix::Hex => 16,
            Radix::Binary => 2,
        }
    }
}

impl FromStr for Radix {
    type Err = EncodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hex" => Ok(Radix::Hex),
            "bin" => Ok(Radix::Binary),
            _ => Err(EncodeError::UnsupportedBase(s.to_string())),
        }
    }
}

impl fmt::Display for Radix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

// =============================================================================
// Encoding Configuration
// =============================================================================

/// Word width and base for one encoding run.
///
/// Construction validates that the width is at least one bit and, for hex,
/// that it is a whole number of nibbles. A config that exists is always
/// usable by the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodingConfig {
    word_width: u32,
    radix: Radix,
}

impl EncodingConfig {
    /// Creates a validated configuration.
    pub fn new(word_width: u32, radix: Radix) -> EncodeResult<Self> {
        if word_width == 0 {
            return Err(EncodeError::InvalidWordWidth {
                word_width,
                reason: "width must be at least 1 bit",
            });
        }
        if radix == Radix::Hex && word_width % 4 != 0 {
            return Err(EncodeError::InvalidWordWidth {
                word_width,
                reason: "hex output requires a multiple of 4 bits",
            });
        }
        Ok(Self { word_width, radix })
    }

    /// Parses the base token and builds a configuration.
    pub fn parse(word_width: u32, base: &str) -> EncodeResult<Self> {
        Self::new(word_width, base.parse()?)
    }

    /// Word width in bits.
    pub fn word_width(&self) -> u32 {
        self.word_width
    }

    /// Output digit base.
    pub fn radix(&self) -> Radix {
        self.radix
    }

    /// Number of digits in every emitted line.
    pub fn digits(&self) -> usize {
        (self.word_width / self.radix.bits_per_digit()) as usize
    }
}

impl Default for EncodingConfig {
    fn default() -> Self {
        Self {
            word_width: DEFAULT_WORD_WIDTH,
            radix: Radix::Hex,
        }
    }
}

impl fmt::Display for EncodingConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-bit {}", self.word_width, self.radix)
    }
}

// =============================================================================
// Memory Image
// =============================================================================

/// Encoded memory words, one per input value, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryImage {
    config: EncodingConfig,
    lines: Vec<String>,
}

impl MemoryImage {
    pub(crate) fn new(config: EncodingConfig, lines: Vec<String>) -> Self {
        Self { config, lines }
    }

    /// The configuration the image was encoded with.
    pub fn config(&self) -> &EncodingConfig {
        &self.config
    }

    /// Encoded words without line terminators.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns true if the image holds no words.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Size of the rendered text in bytes.
    pub fn byte_len(&self) -> usize {
        self.lines.len() * (self.config.digits() + 1)
    }

    /// Renders the image, each word followed by `\n`.
    pub fn to_text(&self) -> String {
        let mut text = String::with_capacity(self.byte_len());
        for line in &self.lines {
            text.push_str(line);
            text.push('\n');
        }
        text
    }

    /// Writes the rendered image to `writer`.
    pub fn write_to<W: Write>(&self, mut writer: W) -> EncodeResult<()> {
        writer.write_all(self.to_text().as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================

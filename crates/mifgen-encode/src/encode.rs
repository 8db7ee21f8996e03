//! Encoding Functions
//!
//! Range validation, two's-complement remapping and fixed-width formatting
//! of integer arrays, plus the inverse decoding used for verification.
//!
//! @version 0.1.0
//! @author AutomataNexus Development Team

use tracing::debug;

use crate::error::{EncodeError, EncodeResult};
use crate::types::{EncodingConfig, MemoryImage, Radix};

/// Width of the native value type; wider words are sign-extended.
const NATIVE_WIDTH: u32 = i64::BITS;

// =============================================================================
// Public API
// =============================================================================

/// Encodes `values` into one fixed-width word per value.
///
/// The whole array is validated before any word is formatted, so an error
/// means nothing was produced.
///
/// # Example
/// ```
/// use mifgen_encode::{encode, EncodingConfig, Radix};
///
/// let config = EncodingConfig::new(16, Radix::Hex)?;
/// let image = encode(&[0, -1, 255, -128], &config)?;
/// assert_eq!(image.lines(), ["0000", "FFFF", "00FF", "FF80"]);
/// # Ok::<(), mifgen_encode::EncodeError>(())
/// ```
pub fn encode(values: &[i64], config: &EncodingConfig) -> EncodeResult<MemoryImage> {
    validate(values, config.word_width())?;

    let lines = values
        .iter()
        .map(|&value| encode_word(value, config))
        .collect();

    debug!(words = values.len(), config = %config, "Encoded memory image");
    Ok(MemoryImage::new(*config, lines))
}

/// Encodes using a raw width and base token (`"hex"` or `"bin"`).
pub fn encode_with(values: &[i64], word_width: u32, base: &str) -> EncodeResult<MemoryImage> {
    let config = EncodingConfig::parse(word_width, base)?;
    encode(values, &config)
}

/// Returns the inclusive `(min, max)` range accepted for `word_width`.
///
/// The upper bound is the unsigned maximum and the lower bound the signed
/// minimum, so both `-128` and `255` are accepted at 8 bits. Bounds saturate
/// at the `i128` range from 128 bits up.
pub fn value_range(word_width: u32) -> (i128, i128) {
    let max = if word_width >= 127 {
        i128::MAX
    } else {
        (1i128 << word_width) - 1
    };
    let min = match word_width {
        0 | 1 => 0,
        2..=127 => -(1i128 << (word_width - 1)),
        _ => i128::MIN,
    };
    (min, max)
}

/// Checks that `values` is non-empty and every element is in range.
pub fn validate(values: &[i64], word_width: u32) -> EncodeResult<()> {
    if values.is_empty() {
        return Err(EncodeError::EmptyInput);
    }

    let (min, max) = value_range(word_width);
    if let Some((index, &value)) = values
        .iter()
        .enumerate()
        .find(|&(_, &v)| i128::from(v) < min || i128::from(v) > max)
    {
        return Err(EncodeError::OutOfRange {
            index,
            value,
            word_width,
            min,
            max,
        });
    }

    Ok(())
}

/// Smallest word width that accepts every value, or `None` if empty.
pub fn required_width(values: &[i64]) -> Option<u32> {
    let min = i128::from(*values.iter().min()?);
    let max = i128::from(*values.iter().max()?);
    (1..=NATIVE_WIDTH).find(|&width| {
        let (lo, hi) = value_range(width);
        lo <= min && max <= hi
    })
}

/// Maps a value to its unsigned two's-complement bit pattern.
///
/// Equivalent to `(2^word_width + value) & (2^word_width - 1)` for negative
/// values; non-negative in-range values are unchanged. Past 64 bits this is
/// the low 64 bits of the pattern.
pub fn to_unsigned(value: i64, word_width: u32) -> u64 {
    (value as u64) & word_mask(word_width)
}

/// Formats an unsigned code as a zero-padded word.
///
/// Codes are zero-extended to the full word; see [`encode`] for the sign
/// extension of negative values in words wider than 64 bits.
pub fn format_word(code: u64, config: &EncodingConfig) -> String {
    let width = config.digits();
    match config.radix() {
        Radix::Hex => format!("{code:0width$X}"),
        Radix::Binary => format!("{code:0width$b}"),
    }
}

// =============================================================================
// Decoding
// =============================================================================

/// How a decoded bit pattern is turned back into an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodeMode {
    /// Words with the top bit set are read as negative two's complement.
    #[default]
    Signed,
    /// Words are read as plain unsigned integers.
    Unsigned,
}

/// Decodes a single word back into an integer.
///
/// `line` is the 1-based line number used in error messages.
pub fn decode_word(
    word: &str,
    line: usize,
    config: &EncodingConfig,
    mode: DecodeMode,
) -> EncodeResult<i64> {
    let malformed = |reason: String| EncodeError::MalformedWord { line, reason };

    if word.len() != config.digits() {
        return Err(malformed(format!(
            "expected {} digits, found {}",
            config.digits(),
            word.len()
        )));
    }

    let radix = config.radix();
    if let Some(c) = word.chars().find(|c| !c.is_digit(radix.base())) {
        return Err(malformed(format!("invalid {radix} digit '{c}'")));
    }

    let width = config.word_width();
    if width > NATIVE_WIDTH {
        // Upper digits must be a pure sign extension of the low 64 bits.
        let (extension, low) = word.split_at(config.digits() - native_digits(radix));
        let code = u64::from_str_radix(low, radix.base()).map_err(|e| malformed(e.to_string()))?;
        let top = radix.top_digit();
        let negative = code >> (NATIVE_WIDTH - 1) == 1;
        return match mode {
            DecodeMode::Signed
                if negative && extension.chars().all(|c| c.eq_ignore_ascii_case(&top)) =>
            {
                Ok(code as i64)
            }
            _ if extension.chars().all(|c| c == '0') => i64::try_from(code).map_err(|_| {
                malformed(format!("word {word} does not fit in a signed 64-bit integer"))
            }),
            _ => Err(malformed(format!(
                "word {word} does not fit in a signed 64-bit integer"
            ))),
        };
    }

    let code = u64::from_str_radix(word, radix.base()).map_err(|e| malformed(e.to_string()))?;
    let sign_bit = 1u64 << (width - 1);
    match mode {
        // A single bit has no sign.
        DecodeMode::Signed if width > 1 && code & sign_bit != 0 => {
            Ok((i128::from(code) - (1i128 << width)) as i64)
        }
        _ => i64::try_from(code)
            .map_err(|_| malformed(format!("value {code} does not fit in a signed 64-bit integer"))),
    }
}

/// Decodes a full memory image text, one word per line.
pub fn decode(text: &str, config: &EncodingConfig, mode: DecodeMode) -> EncodeResult<Vec<i64>> {
    let values = text
        .lines()
        .enumerate()
        .map(|(i, word)| decode_word(word, i + 1, config, mode))
        .collect::<EncodeResult<Vec<_>>>()?;

    debug!(words = values.len(), config = %config, "Decoded memory image");
    Ok(values)
}

// =============================================================================
// Helpers
// =============================================================================

/// Formats one in-range value, sign-extending words wider than 64 bits.
fn encode_word(value: i64, config: &EncodingConfig) -> String {
    let word = format_word(to_unsigned(value, config.word_width()), config);
    if value >= 0 || config.word_width() <= NATIVE_WIDTH {
        return word;
    }

    let pad = config.digits() - native_digits(config.radix());
    let mut extended = config.radix().top_digit().to_string().repeat(pad);
    extended.push_str(&word[pad..]);
    extended
}

/// Digits needed for the low 64 bits.
fn native_digits(radix: Radix) -> usize {
    (NATIVE_WIDTH / radix.bits_per_digit()) as usize
}

fn word_mask(word_width: u32) -> u64 {
    if word_width >= 64 {
        u64::MAX
    } else {
        (1u64 << word_width) - 1
    }
}

// =============================================================================
// Tests
// =============================================================================

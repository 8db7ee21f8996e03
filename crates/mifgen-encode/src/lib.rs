//! Mifgen Encode - Memory Image Encoding
//!
//! Converts integer arrays into plaintext memory initialization images: one
//! fixed-width word per value, no header, no addresses. Suitable for
//! preloading FPGA block RAM.
//!
//! - **hex**: zero-padded uppercase hexadecimal, `word_width / 4` digits
//! - **bin**: zero-padded binary, `word_width` digits
//!
//! Negative values are written as their two's-complement bit pattern, sign
//! extended through words wider than 64 bits.
//!
//! # Example
//! ```ignore
//! use mifgen_encode::{convert, EncodingConfig, Radix};
//!
//! let config = EncodingConfig::new(16, Radix::Hex)?;
//! convert(&[0, -1, 255, -128], &config, "bias.mif")?;
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
#![allow(clippy::cast_sign_loss)]

pub mod encode;
pub mod error;
pub mod types;
pub mod writer;

pub use encode::{
    decode, decode_word, encode, encode_with, format_word, required_width, to_unsigned, validate,
    value_range, DecodeMode,
};
pub use error::{EncodeError, EncodeResult};
pub use types::{EncodingConfig, MemoryImage, Radix};
pub use writer::{convert, write_memory_image};

// =============================================================================
// Constants
// =============================================================================

/// Default memory word width in bits.
pub const DEFAULT_WORD_WIDTH: u32 = 16;

// =============================================================================
// Tests
// =============================================================================

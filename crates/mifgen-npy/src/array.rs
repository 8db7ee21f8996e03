//! Numeric Array Types
//!
//! The flattened integer array handed to the encoder, its source element
//! type, and the options that govern conversion of floating-point sources.
//!
//! @version 0.1.0
//! @author AutomataNexus Development Team

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{NpyError, NpyResult};

// =============================================================================
// Element Types
// =============================================================================

/// Element type of the source artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DType {
    /// Boolean (1 byte).
    Bool,
    /// Signed 8-bit integer.
    I8,
    /// Unsigned 8-bit integer.
    U8,
    /// Signed 16-bit integer.
    I16,
    /// Unsigned 16-bit integer.
    U16,
    /// Signed 32-bit integer.
    I32,
    /// Unsigned 32-bit integer.
    U32,
    /// Signed 64-bit integer.
    I64,
    /// Unsigned 64-bit integer.
    U64,
    /// Half-precision float.
    F16,
    /// Single-precision float.
    F32,
    /// Double-precision float.
    F64,
}

impl DType {
    /// Size of one element in bytes.
    pub fn itemsize(&self) -> usize {
        match self {
            DType::Bool | DType::I8 | DType::U8 => 1,
            DType::I16 | DType::U16 | DType::F16 => 2,
            DType::I32 | DType::U32 | DType::F32 => 4,
            DType::I64 | DType::U64 | DType::F64 => 8,
        }
    }

    /// Returns true for floating-point types.
    pub fn is_float(&self) -> bool {
        matches!(self, DType::F16 | DType::F32 | DType::F64)
    }

    /// NumPy name of the type.
    pub fn name(&self) -> &'static str {
        match self {
            DType::Bool => "bool",
            DType::I8 => "int8",
            DType::U8 => "uint8",
            DType::I16 => "int16",
            DType::U16 => "uint16",
            DType::I32 => "int32",
            DType::U32 => "uint32",
            DType::I64 => "int64",
            DType::U64 => "uint64",
            DType::F16 => "float16",
            DType::F32 => "float32",
            DType::F64 => "float64",
        }
    }

    /// Parses a NumPy type code such as `i2` or `f4` (byte order removed).
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "b1" | "?" => Some(DType::Bool),
            "i1" | "b" => Some(DType::I8),
            "u1" | "B" => Some(DType::U8),
            "i2" => Some(DType::I16),
            "u2" => Some(DType::U16),
            "i4" => Some(DType::I32),
            "u4" => Some(DType::U32),
            "i8" => Some(DType::I64),
            "u8" => Some(DType::U64),
            "f2" => Some(DType::F16),
            "f4" => Some(DType::F32),
            "f8" => Some(DType::F64),
            _ => None,
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// =============================================================================
// Load Options
// =============================================================================

/// What to do with floating-point elements that have a fractional part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FloatPolicy {
    /// Fail on the first fractional value.
    #[default]
    Reject,
    /// Round toward zero.
    Truncate,
}

/// Options for loading an array artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadOptions {
    /// Handling of fractional float values.
    pub float_policy: FloatPolicy,
}

impl LoadOptions {
    /// Options with the given float policy.
    pub fn with_float_policy(float_policy: FloatPolicy) -> Self {
        Self { float_policy }
    }
}

/// Converts one float element to an integer under `policy`.
pub(crate) fn float_to_int(index: usize, value: f64, policy: FloatPolicy) -> NpyResult<i64> {
    // 2^63 is exact in f64; anything at or above it overflows i64.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;

    if !value.is_finite() || value >= LIMIT || value < -LIMIT {
        return Err(NpyError::NonFinite { index, value });
    }

    let truncated = value.trunc();
    if policy == FloatPolicy::Reject && truncated != value {
        return Err(NpyError::NonIntegral { index, value });
    }

    Ok(truncated as i64)
}

// =============================================================================
// Numeric Array
// =============================================================================

/// A flattened integer array with its original shape and element type.
///
/// Values are stored in C (row-major) order regardless of the source layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumericArray {
    /// Original shape; empty for a 0-d scalar.
    pub shape: Vec<usize>,
    /// Source element type.
    pub dtype: DType,
    /// Flattened values.
    pub values: Vec<i64>,
}

impl NumericArray {
    /// Creates an array, checking that `values` matches `shape`.
    pub fn new(shape: Vec<usize>, dtype: DType, values: Vec<i64>) -> NpyResult<Self> {
        let numel = shape_numel(&shape)?;
        if numel != values.len() {
            return Err(NpyError::Header(format!(
                "shape {shape:?} holds {numel} elements but {} were provided",
                values.len()
            )));
        }
        Ok(Self {
            shape,
            dtype,
            values,
        })
    }

    /// Number of elements.
    pub fn numel(&self) -> usize {
        self.values.len()
    }

    /// Number of dimensions.
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Returns true if the array has no elements.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Smallest value, if any.
    pub fn min(&self) -> Option<i64> {
        self.values.iter().copied().min()
    }

    /// Largest value, if any.
    pub fn max(&self) -> Option<i64> {
        self.values.iter().copied().max()
    }

    /// Shape rendered like NumPy, e.g. `(3, 4)` or `(5,)`.
    pub fn shape_string(&self) -> String {
        match self.shape.as_slice() {
            [] => "()".to_string(),
            [n] => format!("({n},)"),
            dims => format!(
                "({})",
                dims.iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        }
    }
}

/// Element count of `shape`, failing instead of wrapping on overflow.
pub(crate) fn shape_numel(shape: &[usize]) -> NpyResult<usize> {
    shape
        .iter()
        .try_fold(1usize, |acc, &dim| acc.checked_mul(dim))
        .ok_or_else(|| NpyError::Header(format!("shape {shape:?} overflows")))
}

// =============================================================================
// Tests
// =============================================================================

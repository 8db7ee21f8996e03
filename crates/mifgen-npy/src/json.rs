//! JSON Array Reader
//!
//! Reads nested JSON number arrays such as `[[1, 2], [3, 4]]`. The shape is
//! inferred from the nesting and must be rectangular.

use serde_json::Value;

use crate::array::{float_to_int, DType, LoadOptions, NumericArray};
use crate::error::{NpyError, NpyResult};

/// Parses a JSON array document.
pub fn parse_json(bytes: &[u8], options: &LoadOptions) -> NpyResult<NumericArray> {
    let root: Value = serde_json::from_slice(bytes)?;
    if !root.is_array() {
        return Err(NpyError::InvalidElement(
            "top-level value must be an array".to_string(),
        ));
    }

    let shape = infer_shape(&root);
    let mut values = Vec::with_capacity(shape.iter().product());
    let mut any_float = false;
    flatten(&root, &shape, 0, options, &mut values, &mut any_float)?;

    let dtype = if any_float { DType::F64 } else { DType::I64 };
    NumericArray::new(shape, dtype, values)
}

/// Follows the first element at each level to find the expected shape.
fn infer_shape(root: &Value) -> Vec<usize> {
    let mut shape = Vec::new();
    let mut current = root;
    while let Value::Array(items) = current {
        shape.push(items.len());
        match items.first() {
            Some(first) => current = first,
            None => break,
        }
    }
    shape
}

fn flatten(
    value: &Value,
    shape: &[usize],
    depth: usize,
    options: &LoadOptions,
    out: &mut Vec<i64>,
    any_float: &mut bool,
) -> NpyResult<()> {
    match value {
        Value::Array(items) => {
            let expected = *shape.get(depth).ok_or(NpyError::Ragged {
                depth,
                expected: 0,
                actual: items.len(),
            })?;
            if items.len() != expected {
                return Err(NpyError::Ragged {
                    depth,
                    expected,
                    actual: items.len(),
                });
            }
            for item in items {
                flatten(item, shape, depth + 1, options, out, any_float)?;
            }
            Ok(())
        }
        Value::Number(n) if depth == shape.len() => {
            let index = out.len();
            let v = if let Some(v) = n.as_i64() {
                v
            } else if let Some(v) = n.as_u64() {
                return Err(NpyError::ValueOverflow { index, value: v });
            } else {
                *any_float = true;
                let f = n.as_f64().unwrap_or(f64::NAN);
                float_to_int(index, f, options.float_policy)?
            };
            out.push(v);
            Ok(())
        }
        Value::Number(_) => Err(NpyError::Ragged {
            depth,
            expected: shape.get(depth).copied().unwrap_or(0),
            actual: 0,
        }),
        Value::Bool(b) => Err(NpyError::InvalidElement(format!("boolean {b}"))),
        Value::Null => Err(NpyError::InvalidElement("null".to_string())),
        Value::String(s) => Err(NpyError::InvalidElement(format!("string {s:?}"))),
        Value::Object(_) => Err(NpyError::InvalidElement("object".to_string())),
    }
}

// =============================================================================
// Tests
// =============================================================================

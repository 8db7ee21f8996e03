//! NPY Reader
//!
//! Parses NumPy `.npy` files (format versions 1.0, 2.0 and 3.0) into a
//! flattened [`NumericArray`].
//!
//! Layout: 6-byte magic, 2 version bytes, a little-endian header length
//! (`u16` for 1.0, `u32` otherwise), a Python dict literal header with
//! `descr`, `fortran_order` and `shape`, then raw element data.
//!
//! @version 0.1.0
//! @author AutomataNexus Development Team

use half::f16;
use tracing::{debug, warn};

use crate::array::{float_to_int, shape_numel, DType, FloatPolicy, LoadOptions, NumericArray};
use crate::error::{NpyError, NpyResult};

/// Magic string at the start of every NPY file.
pub const NPY_MAGIC: &[u8] = b"\x93NUMPY";

// =============================================================================
// Header
// =============================================================================

/// Parsed NPY header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NpyHeader {
    /// Element type.
    pub dtype: DType,
    /// True if the data is stored big-endian.
    pub big_endian: bool,
    /// True if the data is stored in column-major order.
    pub fortran_order: bool,
    /// Array shape.
    pub shape: Vec<usize>,
}

impl NpyHeader {
    /// Number of elements described by the shape.
    pub fn numel(&self) -> NpyResult<usize> {
        shape_numel(&self.shape)
    }

    /// Parses the header dict literal, e.g.
    /// `{'descr': '<i2', 'fortran_order': False, 'shape': (3, 4), }`.
    pub fn parse(text: &str) -> NpyResult<Self> {
        let text = text.trim();
        if !text.starts_with('{') || !text.ends_with('}') {
            return Err(NpyError::Header(format!("not a dict literal: {text}")));
        }

        let descr = parse_quoted(dict_value(text, "descr")?)?;
        let (big_endian, dtype) = parse_descr(descr)?;
        let fortran_order = parse_bool(dict_value(text, "fortran_order")?)?;
        let shape = parse_shape(dict_value(text, "shape")?)?;

        Ok(Self {
            dtype,
            big_endian,
            fortran_order,
            shape,
        })
    }
}

/// Returns the text following `'key':` in a dict literal.
fn dict_value<'a>(text: &'a str, key: &str) -> NpyResult<&'a str> {
    for quote in ['\'', '"'] {
        let needle = format!("{quote}{key}{quote}");
        if let Some(pos) = text.find(&needle) {
            let rest = text[pos + needle.len()..].trim_start();
            let rest = rest
                .strip_prefix(':')
                .ok_or_else(|| NpyError::Header(format!("missing ':' after '{key}'")))?;
            return Ok(rest.trim_start());
        }
    }
    Err(NpyError::Header(format!("missing key '{key}'")))
}

fn parse_quoted(value: &str) -> NpyResult<&str> {
    let quote = value
        .chars()
        .next()
        .filter(|c| *c == '\'' || *c == '"')
        .ok_or_else(|| {
            NpyError::UnsupportedDtype(format!(
                "structured or non-string descr: {}",
                value.chars().take(40).collect::<String>()
            ))
        })?;
    let body = &value[1..];
    let end = body
        .find(quote)
        .ok_or_else(|| NpyError::Header("unterminated string".to_string()))?;
    Ok(&body[..end])
}

fn parse_descr(descr: &str) -> NpyResult<(bool, DType)> {
    let (big_endian, code) = match descr.chars().next() {
        Some('<') | Some('|') => (false, &descr[1..]),
        Some('>') => (true, &descr[1..]),
        Some('=') => (cfg!(target_endian = "big"), &descr[1..]),
        _ => (cfg!(target_endian = "big"), descr),
    };
    let dtype =
        DType::from_code(code).ok_or_else(|| NpyError::UnsupportedDtype(descr.to_string()))?;
    Ok((big_endian, dtype))
}

fn parse_bool(value: &str) -> NpyResult<bool> {
    if value.starts_with("True") {
        Ok(true)
    } else if value.starts_with("False") {
        Ok(false)
    } else {
        Err(NpyError::Header("fortran_order must be True or False".to_string()))
    }
}

fn parse_shape(value: &str) -> NpyResult<Vec<usize>> {
    let inner = value
        .strip_prefix('(')
        .and_then(|rest| rest.find(')').map(|end| &rest[..end]))
        .ok_or_else(|| NpyError::Header("shape must be a tuple".to_string()))?;

    inner
        .split(',')
        .map(str::trim)
        .filter(|dim| !dim.is_empty())
        // Python 2 era files may write long integers as `3L`.
        .map(|dim| dim.trim_end_matches('L'))
        .map(|dim| {
            dim.parse::<usize>()
                .map_err(|_| NpyError::Header(format!("invalid dimension '{dim}'")))
        })
        .collect()
}

// =============================================================================
// File Parsing
// =============================================================================

/// Splits an NPY byte buffer into its parsed header and data section.
pub fn read_header(bytes: &[u8]) -> NpyResult<(NpyHeader, &[u8])> {
    if !bytes.starts_with(NPY_MAGIC) {
        return Err(NpyError::BadMagic);
    }
    let too_short = || NpyError::Truncated {
        expected: 12,
        actual: bytes.len(),
    };

    let major = *bytes.get(6).ok_or_else(too_short)?;
    let minor = *bytes.get(7).ok_or_else(too_short)?;

    let (header_len, header_start) = match major {
        1 => {
            let raw = bytes.get(8..10).ok_or_else(too_short)?;
            (usize::from(u16::from_le_bytes([raw[0], raw[1]])), 10)
        }
        2 | 3 => {
            let raw = bytes.get(8..12).ok_or_else(too_short)?;
            (
                u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]) as usize,
                12,
            )
        }
        _ => return Err(NpyError::UnsupportedVersion { major, minor }),
    };

    let header_end = header_start + header_len;
    let header_bytes = bytes
        .get(header_start..header_end)
        .ok_or(NpyError::Truncated {
            expected: header_end,
            actual: bytes.len(),
        })?;

    // Version 3.0 allows UTF-8 headers; earlier versions are latin-1 but
    // only ever contain ASCII in practice.
    let header_text = std::str::from_utf8(header_bytes)
        .map_err(|e| NpyError::Header(format!("header is not valid text: {e}")))?;

    let header = NpyHeader::parse(header_text)?;
    debug!(
        version = %format!("{major}.{minor}"),
        dtype = %header.dtype,
        shape = ?header.shape,
        fortran_order = header.fortran_order,
        "Parsed NPY header"
    );

    Ok((header, &bytes[header_end..]))
}

/// Parses a complete NPY file held in memory.
pub fn parse_npy(bytes: &[u8], options: &LoadOptions) -> NpyResult<NumericArray> {
    let (header, data) = read_header(bytes)?;

    let expected = header
        .numel()?
        .checked_mul(header.dtype.itemsize())
        .ok_or_else(|| NpyError::Header(format!("shape {:?} overflows", header.shape)))?;
    if data.len() < expected {
        return Err(NpyError::Truncated {
            expected,
            actual: data.len(),
        });
    }
    if data.len() > expected {
        warn!(
            extra = data.len() - expected,
            "Ignoring trailing bytes after NPY data"
        );
    }

    let mut values = decode_elements(
        &data[..expected],
        header.dtype,
        header.big_endian,
        options.float_policy,
    )?;

    if header.fortran_order && header.shape.len() > 1 {
        values = fortran_to_c(&values, &header.shape);
    }

    NumericArray::new(header.shape, header.dtype, values)
}

// =============================================================================
// Element Decoding
// =============================================================================

fn decode_elements(
    data: &[u8],
    dtype: DType,
    big_endian: bool,
    policy: FloatPolicy,
) -> NpyResult<Vec<i64>> {
    macro_rules! ints {
        ($ty:ty, $n:expr) => {
            data.chunks_exact($n)
                .map(|chunk| {
                    let mut raw = [0u8; $n];
                    raw.copy_from_slice(chunk);
                    let v = if big_endian {
                        <$ty>::from_be_bytes(raw)
                    } else {
                        <$ty>::from_le_bytes(raw)
                    };
                    i64::from(v)
                })
                .collect()
        };
    }

    macro_rules! floats {
        ($ty:ty, $n:expr) => {
            data.chunks_exact($n)
                .enumerate()
                .map(|(index, chunk)| {
                    let mut raw = [0u8; $n];
                    raw.copy_from_slice(chunk);
                    let v = if big_endian {
                        <$ty>::from_be_bytes(raw)
                    } else {
                        <$ty>::from_le_bytes(raw)
                    };
                    float_to_int(index, f64::from(v), policy)
                })
                .collect()
        };
    }

    match dtype {
        DType::Bool => Ok(data.iter().map(|&b| i64::from(b != 0)).collect()),
        DType::I8 => Ok(data.iter().map(|&b| i64::from(b as i8)).collect()),
        DType::U8 => Ok(data.iter().map(|&b| i64::from(b)).collect()),
        DType::I16 => Ok(ints!(i16, 2)),
        DType::U16 => Ok(ints!(u16, 2)),
        DType::I32 => Ok(ints!(i32, 4)),
        DType::U32 => Ok(ints!(u32, 4)),
        DType::I64 => Ok(ints!(i64, 8)),
        DType::U64 => data
            .chunks_exact(8)
            .enumerate()
            .map(|(index, chunk)| {
                let mut raw = [0u8; 8];
                raw.copy_from_slice(chunk);
                let v = if big_endian {
                    u64::from_be_bytes(raw)
                } else {
                    u64::from_le_bytes(raw)
                };
                i64::try_from(v).map_err(|_| NpyError::ValueOverflow { index, value: v })
            })
            .collect(),
        DType::F16 => floats!(f16, 2),
        DType::F32 => floats!(f32, 4),
        DType::F64 => floats!(f64, 8),
    }
}

/// Reorders column-major values into row-major order.
fn fortran_to_c(values: &[i64], shape: &[usize]) -> Vec<i64> {
    // Column-major strides: first axis varies fastest.
    let mut strides = vec![1usize; shape.len()];
    for axis in 1..shape.len() {
        strides[axis] = strides[axis - 1] * shape[axis - 1];
    }

    let mut index = vec![0usize; shape.len()];
    let mut out = Vec::with_capacity(values.len());
    for _ in 0..values.len() {
        let offset: usize = index.iter().zip(&strides).map(|(i, s)| i * s).sum();
        out.push(values[offset]);

        // Advance the row-major counter, last axis fastest.
        for axis in (0..shape.len()).rev() {
            index[axis] += 1;
            if index[axis] < shape[axis] {
                break;
            }
            index[axis] = 0;
        }
    }
    out
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn npy_bytes(descr: &str, fortran: bool, shape: &str, data: &[u8]) -> Vec<u8> {
        let order = if fortran { "True" } else { "False" };
        let mut header =
            format!("{{'descr': '{descr}', 'fortran_order': {order}, 'shape': {shape}, }}");
        // Pad so the data section is 64-byte aligned, as NumPy does.
        while (10 + header.len() + 1) % 64 != 0 {
            header.push(' ');
        }
        header.push('\n');

        let mut bytes = NPY_MAGIC.to_vec();
        bytes.extend_from_slice(&[1, 0]);
        bytes.extend_from_slice(&(header.len() as u16).to_le_bytes());
        bytes.extend_from_slice(header.as_bytes());
        bytes.extend_from_slice(data);
        bytes
    }

    fn le_i16(values: &[i16]) -> Vec<u8> {
        values.iter().flat_map(|v| v.to_le_bytes()).collect()
    }

    #[test]
    fn test_parse_header() {
        let header =
            NpyHeader::parse("{'descr': '<i2', 'fortran_order': False, 'shape': (3, 4), }")
                .unwrap();
        assert_eq!(header.dtype, DType::I16);
        assert!(!header.big_endian);
        assert!(!header.fortran_order);
        assert_eq!(header.shape, vec![3, 4]);
        assert_eq!(header.numel().unwrap(), 12);
    }

    #[test]
    fn test_parse_header_shapes() {
        let scalar =
            NpyHeader::parse("{'descr': '|u1', 'fortran_order': False, 'shape': (), }").unwrap();
        assert!(scalar.shape.is_empty());
        assert_eq!(scalar.numel().unwrap(), 1);

        let vector =
            NpyHeader::parse("{'descr': '>f4', 'fortran_order': True, 'shape': (7,), }").unwrap();
        assert_eq!(vector.shape, vec![7]);
        assert!(vector.big_endian);
        assert!(vector.fortran_order);
    }

    #[test]
    fn test_parse_header_errors() {
        assert!(matches!(
            NpyHeader::parse("{'descr': '<c16', 'fortran_order': False, 'shape': (2,), }"),
            Err(NpyError::UnsupportedDtype(_))
        ));
        assert!(matches!(
            NpyHeader::parse("{'descr': [('a', '<i4')], 'fortran_order': False, 'shape': (2,), }"),
            Err(NpyError::UnsupportedDtype(_))
        ));
        assert!(matches!(
            NpyHeader::parse("{'descr': '<i4', 'shape': (2,), }"),
            Err(NpyError::Header(_))
        ));
        assert!(matches!(NpyHeader::parse("descr"), Err(NpyError::Header(_))));
    }

    #[test]
    fn test_parse_int16() {
        let bytes = npy_bytes("<i2", false, "(4,)", &le_i16(&[0, -1, 255, -128]));
        let array = parse_npy(&bytes, &LoadOptions::default()).unwrap();
        assert_eq!(array.dtype, DType::I16);
        assert_eq!(array.shape, vec![4]);
        assert_eq!(array.values, vec![0, -1, 255, -128]);
    }

    #[test]
    fn test_parse_big_endian() {
        let data: Vec<u8> = [1i32, -2, 70000]
            .iter()
            .flat_map(|v| v.to_be_bytes())
            .collect();
        let bytes = npy_bytes(">i4", false, "(3,)", &data);
        let array = parse_npy(&bytes, &LoadOptions::default()).unwrap();
        assert_eq!(array.values, vec![1, -2, 70000]);
    }

    #[test]
    fn test_parse_small_types() {
        let bytes = npy_bytes("|i1", false, "(3,)", &[0x00, 0xFF, 0x80]);
        let array = parse_npy(&bytes, &LoadOptions::default()).unwrap();
        assert_eq!(array.values, vec![0, -1, -128]);

        let bytes = npy_bytes("|u1", false, "(2,)", &[0xFF, 0x10]);
        let array = parse_npy(&bytes, &LoadOptions::default()).unwrap();
        assert_eq!(array.values, vec![255, 16]);

        let bytes = npy_bytes("|b1", false, "(3,)", &[1, 0, 1]);
        let array = parse_npy(&bytes, &LoadOptions::default()).unwrap();
        assert_eq!(array.dtype, DType::Bool);
        assert_eq!(array.values, vec![1, 0, 1]);
    }

    #[test]
    fn test_parse_fortran_order() {
        // 2x3 array [[1, 2, 3], [4, 5, 6]] stored column-major.
        let bytes = npy_bytes("<i2", true, "(2, 3)", &le_i16(&[1, 4, 2, 5, 3, 6]));
        let array = parse_npy(&bytes, &LoadOptions::default()).unwrap();
        assert_eq!(array.shape, vec![2, 3]);
        assert_eq!(array.values, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_fortran_to_c_3d() {
        // Shape (2, 2, 2); C value at (i, j, k) is 4i + 2j + k.
        let shape = [2, 2, 2];
        let mut fortran = vec![0i64; 8];
        for i in 0..2 {
            for j in 0..2 {
                for k in 0..2 {
                    fortran[i + 2 * j + 4 * k] = (4 * i + 2 * j + k) as i64;
                }
            }
        }
        assert_eq!(fortran_to_c(&fortran, &shape), (0..8).collect::<Vec<i64>>());
    }

    #[test]
    fn test_parse_uint64_overflow() {
        let data: Vec<u8> = [5u64, u64::MAX].iter().flat_map(|v| v.to_le_bytes()).collect();
        let bytes = npy_bytes("<u8", false, "(2,)", &data);
        assert!(matches!(
            parse_npy(&bytes, &LoadOptions::default()),
            Err(NpyError::ValueOverflow { index: 1, .. })
        ));
    }

    #[test]
    fn test_parse_floats() {
        let data: Vec<u8> = [1.0f32, -3.0, 2.75]
            .iter()
            .flat_map(|v| v.to_le_bytes())
            .collect();
        let bytes = npy_bytes("<f4", false, "(3,)", &data);

        assert!(matches!(
            parse_npy(&bytes, &LoadOptions::default()),
            Err(NpyError::NonIntegral { index: 2, .. })
        ));

        let options = LoadOptions::with_float_policy(FloatPolicy::Truncate);
        let array = parse_npy(&bytes, &options).unwrap();
        assert_eq!(array.dtype, DType::F32);
        assert_eq!(array.values, vec![1, -3, 2]);
    }

    #[test]
    fn test_parse_half_floats() {
        let data: Vec<u8> = [f16::from_f32(12.0), f16::from_f32(-0.0)]
            .iter()
            .flat_map(|v| v.to_le_bytes())
            .collect();
        let bytes = npy_bytes("<f2", false, "(2,)", &data);
        let array = parse_npy(&bytes, &LoadOptions::default()).unwrap();
        assert_eq!(array.values, vec![12, 0]);
    }

    #[test]
    fn test_parse_version_2() {
        let header = "{'descr': '<i8', 'fortran_order': False, 'shape': (1,), }\n";
        let mut bytes = NPY_MAGIC.to_vec();
        bytes.extend_from_slice(&[2, 0]);
        bytes.extend_from_slice(&(header.len() as u32).to_le_bytes());
        bytes.extend_from_slice(header.as_bytes());
        bytes.extend_from_slice(&(-42i64).to_le_bytes());

        let array = parse_npy(&bytes, &LoadOptions::default()).unwrap();
        assert_eq!(array.values, vec![-42]);
    }

    #[test]
    fn test_parse_every_dtype_in_both_byte_orders() {
        macro_rules! case {
            ($code:expr, $ty:ty, [$($v:expr),*], [$($e:expr),*]) => {{
                let raw: Vec<$ty> = vec![$($v),*];
                let le: Vec<u8> = raw.iter().flat_map(|v| v.to_le_bytes()).collect();
                let be: Vec<u8> = raw.iter().flat_map(|v| v.to_be_bytes()).collect();
                ($code, le, be, vec![$($e as i64),*])
            }};
        }

        let h = f16::from_f32;
        let cases = vec![
            case!("b1", u8, [0, 1, 1, 0], [0, 1, 1, 0]),
            case!("i1", i8, [0, -1, 127, -128], [0, -1, 127, -128]),
            case!("u1", u8, [0, 1, 200, 255], [0, 1, 200, 255]),
            case!("i2", i16, [0, -1, 32767, -32768], [0, -1, 32767, -32768]),
            case!("u2", u16, [0, 1, 40000, 65535], [0, 1, 40000, 65535]),
            case!("i4", i32, [0, -1, i32::MAX, i32::MIN], [0, -1, i32::MAX, i32::MIN]),
            case!("u4", u32, [0, 1, 3_000_000_000, u32::MAX], [0, 1, 3_000_000_000i64, 4_294_967_295i64]),
            case!("i8", i64, [0, -1, i64::MAX, i64::MIN], [0, -1, i64::MAX, i64::MIN]),
            case!("u8", u64, [0, 1, 1 << 40, i64::MAX as u64], [0, 1, 1i64 << 40, i64::MAX]),
            case!("f2", f16, [h(0.0), h(-2.0), h(2048.0), h(-7.0)], [0, -2, 2048, -7]),
            case!("f4", f32, [0.0, -2.0, 16_777_216.0, -7.0], [0, -2, 16_777_216, -7]),
            case!("f8", f64, [0.0, -2.0, 9_007_199_254_740_992.0, -7.0], [0, -2, 9_007_199_254_740_992i64, -7]),
        ];

        for (code, le, be, expected) in cases {
            for (order, data) in [('<', le), ('>', be)] {
                let descr = format!("{order}{code}");
                let bytes = npy_bytes(&descr, false, "(4,)", &data);
                let array = parse_npy(&bytes, &LoadOptions::default())
                    .unwrap_or_else(|e| panic!("{descr}: {e}"));
                assert_eq!(Some(array.dtype), DType::from_code(code), "{descr}");
                assert_eq!(array.values, expected, "{descr}");
            }
        }
    }

    #[test]
    fn test_parse_version_3() {
        let header = "{'descr': '>i2', 'fortran_order': False, 'shape': (2,), }\n";
        let mut bytes = NPY_MAGIC.to_vec();
        bytes.extend_from_slice(&[3, 0]);
        bytes.extend_from_slice(&(header.len() as u32).to_le_bytes());
        bytes.extend_from_slice(header.as_bytes());
        bytes.extend_from_slice(&(-300i16).to_be_bytes());
        bytes.extend_from_slice(&12i16.to_be_bytes());

        let array = parse_npy(&bytes, &LoadOptions::default()).unwrap();
        assert_eq!(array.dtype, DType::I16);
        assert_eq!(array.values, vec![-300, 12]);
    }

    #[test]
    fn test_parse_ignores_trailing_bytes() {
        let mut data = le_i16(&[7, -7]);
        data.extend_from_slice(&[0xAA, 0xBB, 0xCC]);
        let bytes = npy_bytes("<i2", false, "(2,)", &data);

        let array = parse_npy(&bytes, &LoadOptions::default()).unwrap();
        assert_eq!(array.shape, vec![2]);
        assert_eq!(array.values, vec![7, -7]);
    }

    #[test]
    fn test_parse_overflowing_shape() {
        // The element count wraps to 2 if multiplied unchecked.
        let data: Vec<u8> = [1i64, 2].iter().flat_map(|v| v.to_le_bytes()).collect();
        for fortran in [true, false] {
            let bytes = npy_bytes("<i8", fortran, "(9223372036854775809, 2)", &data);
            assert!(matches!(
                parse_npy(&bytes, &LoadOptions::default()),
                Err(NpyError::Header(ref msg)) if msg.contains("overflows")
            ));
        }

        // Element count fits, byte count does not.
        let bytes = npy_bytes("<i8", false, "(4611686018427387904,)", &data);
        assert!(matches!(
            parse_npy(&bytes, &LoadOptions::default()),
            Err(NpyError::Header(_))
        ));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            parse_npy(b"PK\x03\x04 not npy", &LoadOptions::default()),
            Err(NpyError::BadMagic)
        ));

        let mut bytes = npy_bytes("<i2", false, "(2,)", &[]);
        bytes[6] = 9;
        assert!(matches!(
            parse_npy(&bytes, &LoadOptions::default()),
            Err(NpyError::UnsupportedVersion { major: 9, .. })
        ));

        let bytes = npy_bytes("<i2", false, "(4,)", &le_i16(&[1, 2]));
        assert!(matches!(
            parse_npy(&bytes, &LoadOptions::default()),
            Err(NpyError::Truncated {
                expected: 8,
                actual: 4
            })
        ));
    }

    #[test]
    fn test_parse_empty_array() {
        let bytes = npy_bytes("<i2", false, "(0,)", &[]);
        let array = parse_npy(&bytes, &LoadOptions::default()).unwrap();
        assert!(array.is_empty());
    }
}

//! Fixed-offset field extraction from message payloads
//!
//! MAVLink payloads are packed little-endian structs with no alignment
//! padding, so every field is addressed by a byte range.

/// Primitive layout of a payload field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FieldType {
    /// Two consecutive `i16` values
    I16x2,
    /// Two consecutive `f32` values
    F32x2,
    /// One `f32`
    F32,
    /// One `u8`
    U8,
    /// One `u64`
    U64,
}

impl FieldType {
    /// Number of payload bytes this layout occupies
    pub const fn width(self) -> usize {
        match self {
            FieldType::I16x2 => 4,
            FieldType::F32x2 => 8,
            FieldType::F32 => 4,
            FieldType::U8 => 1,
            FieldType::U64 => 8,
        }
    }
}

/// A decoded field value
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FieldValue {
    I16x2(i16, i16),
    F32x2(f32, f32),
    F32(f32),
    U8(u8),
    U64(u64),
}

/// Errors that can occur while decoding a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// Payload ends before the field does
    PayloadTooShort { needed: usize, actual: usize },
    /// Byte range does not match the width of the field type
    WidthMismatch { expected: usize, actual: usize },
}

/// Location and layout of one field within a payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FieldSpec {
    /// Primitive layout
    pub field_type: FieldType,
    /// First byte (inclusive)
    pub lo: usize,
    /// End byte (exclusive)
    pub hi: usize,
}

impl FieldSpec {
    /// Describe a field occupying `[lo, hi)`
    pub const fn new(field_type: FieldType, lo: usize, hi: usize) -> Self {
        Self { field_type, lo, hi }
    }

    /// Decode this field from `payload`
    pub fn decode(&self, payload: &[u8]) -> Result<FieldValue, DecodeError> {
        decode(payload, self.field_type, self.lo, self.hi)
    }
}

/// Interpret `payload[lo..hi]` as `field_type`
pub fn decode(
    payload: &[u8],
    field_type: FieldType,
    lo: usize,
    hi: usize,
) -> Result<FieldValue, DecodeError> {
    let value = match field_type {
        FieldType::I16x2 => {
            let (a, b) = read_i16_pair(payload, lo, hi)?;
            FieldValue::I16x2(a, b)
        }
        FieldType::F32x2 => {
            let (a, b) = read_f32_pair(payload, lo, hi)?;
            FieldValue::F32x2(a, b)
        }
        FieldType::F32 => FieldValue::F32(read_f32(payload, lo, hi)?),
        FieldType::U8 => FieldValue::U8(field_bytes(payload, FieldType::U8, lo, hi)?[0]),
        FieldType::U64 => FieldValue::U64(read_u64(payload, lo, hi)?),
    };
    Ok(value)
}

/// Bounds-check `[lo, hi)` against the type width and the payload
fn field_bytes(
    payload: &[u8],
    field_type: FieldType,
    lo: usize,
    hi: usize,
) -> Result<&[u8], DecodeError> {
    let expected = field_type.width();
    let actual = hi.saturating_sub(lo);
    if hi < lo || actual != expected {
        return Err(DecodeError::WidthMismatch { expected, actual });
    }
    payload.get(lo..hi).ok_or(DecodeError::PayloadTooShort {
        needed: hi,
        actual: payload.len(),
    })
}

fn f32_at(bytes: &[u8], at: usize) -> f32 {
    f32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

fn i16_at(bytes: &[u8], at: usize) -> i16 {
    i16::from_le_bytes([bytes[at], bytes[at + 1]])
}

/// Read a `u64` field
pub fn read_u64(payload: &[u8], lo: usize, hi: usize) -> Result<u64, DecodeError> {
    let bytes = field_bytes(payload, FieldType::U64, lo, hi)?;
    let mut raw = [0u8; 8];
    raw.copy_from_slice(bytes);
    Ok(u64::from_le_bytes(raw))
}

/// Read an `f32` field
pub fn read_f32(payload: &[u8], lo: usize, hi: usize) -> Result<f32, DecodeError> {
    let bytes = field_bytes(payload, FieldType::F32, lo, hi)?;
    Ok(f32_at(bytes, 0))
}

/// Read a pair of `f32` fields
pub fn read_f32_pair(payload: &[u8], lo: usize, hi: usize) -> Result<(f32, f32), DecodeError> {
    let bytes = field_bytes(payload, FieldType::F32x2, lo, hi)?;
    Ok((f32_at(bytes, 0), f32_at(bytes, 4)))
}

/// Read a pair of `i16` fields
pub fn read_i16_pair(payload: &[u8], lo: usize, hi: usize) -> Result<(i16, i16), DecodeError> {
    let bytes = field_bytes(payload, FieldType::I16x2, lo, hi)?;
    Ok((i16_at(bytes, 0), i16_at(bytes, 2)))
}

/// Read a `u8` field at `offset`
pub fn read_u8(payload: &[u8], offset: usize) -> Result<u8, DecodeError> {
    let end = offset.checked_add(1).ok_or(DecodeError::PayloadTooShort {
        needed: usize::MAX,
        actual: payload.len(),
    })?;
    let bytes = field_bytes(payload, FieldType::U8, offset, end)?;
    Ok(bytes[0])
}

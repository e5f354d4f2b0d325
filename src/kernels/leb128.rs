//! This module contains the pure, stateless, and performant kernels for performing
//! LEB128 (Little-Endian Base 128) variable-length integer encoding and decoding.
//!
//! This technique is a bit-width reduction transform, ideal for streams of
//! unsigned integers where most values are small (e.g. deltas of a posting
//! list). It is fully panic-free.

use num_traits::{PrimInt, Unsigned};
use std::io::Cursor;

use crate::error::CodecError;

//==================================================================================
// 1. Public API for Single-Value Operations
//==================================================================================

/// Encodes a single unsigned integer into a LEB128 byte sequence, appending to a buffer.
pub fn encode_one<T>(value: T, buffer: &mut Vec<u8>) -> Result<(), CodecError>
where
    T: PrimInt + Unsigned,
{
    let zero = T::zero();
    let seven_bit_mask = T::from(0x7F).ok_or_else(|| {
        CodecError::InternalError("Failed to create 7-bit mask for type".to_string())
    })?;

    let mut current_value = value;
    loop {
        let payload = (current_value & seven_bit_mask).to_u8().ok_or_else(|| {
            CodecError::InternalError("Failed to convert generic integer to u8".to_string())
        })?;
        current_value = current_value >> 7;
        if current_value == zero {
            buffer.push(payload);
            return Ok(());
        }
        buffer.push(payload | 0x80);
    }
}

/// Decodes a single unsigned integer from a LEB128 byte stream cursor.
pub fn decode_one<T>(cursor: &mut Cursor<&[u8]>) -> Result<T, CodecError>
where
    T: PrimInt + Unsigned,
{
    let mut result = T::zero();
    let mut shift = 0;
    let total_bits = std::mem::size_of::<T>() * 8;

    loop {
        let pos = cursor.position() as usize;
        let byte = *cursor.get_ref().get(pos).ok_or_else(|| {
            CodecError::CorruptStream("LEB128: unexpected end of buffer".to_string())
        })?;
        cursor.set_position((pos + 1) as u64);

        if shift >= total_bits {
            return Err(CodecError::CorruptStream(
                "LEB128: integer overflow during decoding".to_string(),
            ));
        }

        let seven_bit_payload = T::from(byte & 0x7F).ok_or_else(|| {
            CodecError::InternalError("Failed to create 7-bit payload from byte".to_string())
        })?;
        result = result | (seven_bit_payload << shift);

        if byte & 0x80 == 0 {
            // The final group may not set bits beyond the type's width.
            if shift + 7 > total_bits && (byte >> (total_bits - shift)) > 0 {
                return Err(CodecError::CorruptStream(
                    "LEB128: integer overflow during decoding".to_string(),
                ));
            }
            return Ok(result);
        }

        shift += 7;
    }
}

/// Worst-case encoded size in bytes of one value of type `T`.
pub fn max_bytes_per_value<T>() -> usize {
    (std::mem::size_of::<T>() * 8).div_ceil(7)
}

//==================================================================================
// 2. Public API for Slice Operations
//==================================================================================

/// Encodes every value of `input_slice`, appending to `output_buf`.
pub fn encode<T>(input_slice: &[T], output_buf: &mut Vec<u8>) -> Result<(), CodecError>
where
    T: PrimInt + Unsigned,
{
    for &val in input_slice {
        encode_one(val, output_buf)?;
    }
    Ok(())
}

/// Decodes exactly `output.len()` values from `input_bytes`.
pub fn decode<T>(input_bytes: &[u8], output: &mut [T]) -> Result<(), CodecError>
where
    T: PrimInt + Unsigned,
{
    let mut cursor = Cursor::new(input_bytes);
    for slot in output.iter_mut() {
        *slot = decode_one::<T>(&mut cursor)?;
    }

    if (cursor.position() as usize) != input_bytes.len() {
        return Err(CodecError::CorruptStream(
            "LEB128: did not consume entire payload, trailing bytes detected".to_string(),
        ));
    }
    Ok(())
}

//! This module contains the pure, stateless kernels for fixed-width bit-packing
//! and unpacking of `u32` values into `u32` words.
//!
//! This technique is a bit-width reduction transform. When every value of a
//! block fits in `bit_width` bits, the block is stored as a dense bit vector
//! with all padding bits removed. The packed words are `Lsb0`-ordered, so the
//! first value occupies the lowest bits of the first word.

use bitvec::prelude::*;

use crate::error::CodecError;
use crate::utils::{WordReader, WordWriter};

//==================================================================================
// 1. Width Analysis
//==================================================================================

/// The number of bits needed to represent the largest value in `values`.
pub fn required_bit_width(values: &[u32]) -> u8 {
    let max = values.iter().fold(0u32, |acc, &v| acc | v);
    (32 - max.leading_zeros()) as u8
}

/// Words occupied by `count` values packed at `bit_width` bits each.
pub fn packed_words(count: usize, bit_width: u8) -> usize {
    (count * bit_width as usize).div_ceil(32)
}

//==================================================================================
// 2. Core Logic
//==================================================================================

/// Packs `values` at `bit_width` bits each and appends the words to `writer`.
pub(crate) fn pack_into(
    values: &[u32],
    bit_width: u8,
    writer: &mut WordWriter<'_>,
) -> Result<(), CodecError> {
    if bit_width > 32 {
        return Err(CodecError::InternalError(format!(
            "bit width {bit_width} exceeds 32"
        )));
    }
    if bit_width == 0 {
        return Ok(());
    }
    writer.reserve(packed_words(values.len(), bit_width))?;

    let width = bit_width as usize;
    let mut bits = BitVec::<u32, Lsb0>::with_capacity(values.len() * width);
    for &val in values {
        if width < 32 && val >> width != 0 {
            return Err(CodecError::InternalError(format!(
                "value {val} exceeds bit width {bit_width}"
            )));
        }
        bits.extend_from_bitslice(&val.view_bits::<Lsb0>()[..width]);
    }
    bits.set_uninitialized(false);
    writer.extend_from_slice(bits.as_raw_slice())
}

/// Reads `output.len()` values packed at `bit_width` bits each from `reader`.
pub(crate) fn unpack_from(
    reader: &mut WordReader<'_>,
    bit_width: u8,
    output: &mut [u32],
) -> Result<(), CodecError> {
    if bit_width > 32 {
        return Err(CodecError::CorruptStream(format!(
            "bit width {bit_width} exceeds 32"
        )));
    }
    if bit_width == 0 {
        output.fill(0);
        return Ok(());
    }

    let words = reader.take(packed_words(output.len(), bit_width), "bit-packed block")?;
    let bits = BitSlice::<u32, Lsb0>::from_slice(words);
    for (slot, chunk) in output.iter_mut().zip(bits.chunks(bit_width as usize)) {
        let mut container = 0u32;
        for (i, bit) in chunk.iter().by_vals().enumerate() {
            if bit {
                container |= 1 << i;
            }
        }
        *slot = container;
    }
    Ok(())
}

//==================================================================================
// 3. Unit Tests
//==================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn pack(values: &[u32], bit_width: u8) -> Vec<u32> {
        let mut buf = vec![0u32; packed_words(values.len(), bit_width) + 1];
        let mut writer = WordWriter::new(&mut buf);
        pack_into(values, bit_width, &mut writer).unwrap();
        let used = writer.finish();
        buf.truncate(used);
        buf
    }

    #[test]
    fn test_bitpack_roundtrip() {
        let original: Vec<u32> = vec![5, 6, 7, 1];
        let packed = pack(&original, 3);
        assert_eq!(packed.len(), 1);
        assert_eq!(packed[0], 5 | (6 << 3) | (7 << 6) | (1 << 9));

        let mut decoded = vec![0u32; original.len()];
        unpack_from(&mut WordReader::new(&packed), 3, &mut decoded).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_full_width_values_cross_word_boundaries() {
        let original: Vec<u32> = vec![u32::MAX, 0, 0x8000_0001, 42];
        let packed = pack(&original, 32);
        assert_eq!(packed, original);

        let odd: Vec<u32> = (0..40u32).map(|i| i.wrapping_mul(2_654_435_761) >> 7).collect();
        let packed = pack(&odd, 25);
        assert_eq!(packed.len(), packed_words(40, 25));
        let mut decoded = vec![0u32; odd.len()];
        unpack_from(&mut WordReader::new(&packed), 25, &mut decoded).unwrap();
        assert_eq!(decoded, odd);
    }

    #[test]
    fn test_zero_width_emits_nothing() {
        assert!(pack(&[0, 0, 0], 0).is_empty());
        let mut decoded = vec![9u32; 3];
        unpack_from(&mut WordReader::new(&[]), 0, &mut decoded).unwrap();
        assert_eq!(decoded, vec![0, 0, 0]);
    }

    #[test]
    fn test_truncated_block_is_corrupt() {
        let packed = pack(&[10, 20, 30, 31], 5);
        let mut decoded = vec![0u32; 8];
        let result = unpack_from(&mut WordReader::new(&packed), 5, &mut decoded);
        assert!(matches!(result, Err(CodecError::CorruptStream(_))));
    }

    #[test]
    fn test_value_exceeding_width_is_rejected() {
        let mut buf = vec![0u32; 4];
        let mut writer = WordWriter::new(&mut buf);
        assert!(pack_into(&[1, 2, 8], 3, &mut writer).is_err());
    }

    #[test]
    fn test_required_bit_width() {
        assert_eq!(required_bit_width(&[]), 0);
        assert_eq!(required_bit_width(&[0, 0]), 0);
        assert_eq!(required_bit_width(&[1, 4, 7]), 3);
        assert_eq!(required_bit_width(&[u32::MAX]), 32);
    }
}

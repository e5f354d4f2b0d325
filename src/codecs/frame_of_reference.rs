//! `frameofreference`: per-block frame-of-reference packing.
//!
//! Each block of up to 128 values stores its minimum and the bit width of
//! `value - minimum`, followed by the packed offsets. No delta coding is
//! involved, so input order does not matter and the input is never mutated.
//!
//! Stream layout: `[count, (min, bit_width, packed offsets...) per block]`.

use crate::error::CodecError;
use crate::kernels::bitpack;
use crate::traits::IntegerCodec;
use crate::utils::{read_count_header, write_count_header, WordReader, WordWriter};

/// Values per block.
pub const BLOCK_SIZE: usize = 128;

#[derive(Debug, Default, Clone, Copy)]
pub struct FrameOfReference;

impl IntegerCodec for FrameOfReference {
    fn name(&self) -> &'static str {
        "frameofreference"
    }

    fn max_encoded_len(&self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        1 + 2 * n.div_ceil(BLOCK_SIZE) + n
    }

    fn encode(&self, input: &mut [u32], output: &mut [u32]) -> Result<usize, CodecError> {
        if input.is_empty() {
            return Ok(0);
        }
        let mut writer = WordWriter::new(output);
        write_count_header(&mut writer, input.len())?;

        let mut offsets = Vec::with_capacity(BLOCK_SIZE);
        for block in input.chunks(BLOCK_SIZE) {
            let min = block.iter().copied().min().unwrap_or(0);
            offsets.clear();
            offsets.extend(block.iter().map(|&v| v - min));
            let bit_width = bitpack::required_bit_width(&offsets);

            writer.push(min)?;
            writer.push(bit_width as u32)?;
            bitpack::pack_into(&offsets, bit_width, &mut writer)?;
        }
        Ok(writer.finish())
    }

    fn decode(&self, input: &[u32], output: &mut [u32]) -> Result<usize, CodecError> {
        if input.is_empty() {
            return Ok(0);
        }
        let mut reader = WordReader::new(input);
        let count = read_count_header(&mut reader, output)?;

        for block in output[..count].chunks_mut(BLOCK_SIZE) {
            let min = reader.next("block minimum")?;
            let bit_width = reader.next("block bit width")?;
            let bit_width = u8::try_from(bit_width)
                .map_err(|_| CodecError::CorruptStream(format!("bit width {bit_width} exceeds 32")))?;
            bitpack::unpack_from(&mut reader, bit_width, block)?;
            for value in block.iter_mut() {
                *value = value.checked_add(min).ok_or_else(|| {
                    CodecError::CorruptStream("frame offset overflows u32".to_string())
                })?;
            }
        }
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_handles_unsorted_input() {
        let original = vec![900u32, 901, 903, 900, 915];
        let mut input = original.clone();
        let encoded = FrameOfReference.encode_to_vec(&mut input).unwrap();
        assert_eq!(input, original);
        // count, min, width (15 -> 4 bits), one packed word
        assert_eq!(encoded, vec![5, 900, 4, encoded[3]]);
        assert_eq!(FrameOfReference.decode_to_vec(&encoded, 5).unwrap(), original);
    }

    #[test]
    fn test_for_spans_multiple_blocks() {
        let original: Vec<u32> = (0..300u32).map(|i| i * 3 + 1_000_000).collect();
        let mut input = original.clone();
        let encoded = FrameOfReference.encode_to_vec(&mut input).unwrap();
        assert!(encoded.len() < original.len());
        assert_eq!(FrameOfReference.decode_to_vec(&encoded, 300).unwrap(), original);
    }

    #[test]
    fn test_for_offset_overflow_is_corrupt() {
        // min = u32::MAX with a 1-bit offset of 1 cannot be valid.
        let result = FrameOfReference.decode_to_vec(&[1, u32::MAX, 1, 1], 1);
        assert!(matches!(result, Err(CodecError::CorruptStream(_))));
    }
}

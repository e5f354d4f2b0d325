//! `bp32`: differential binary packing in blocks of 32 values.
//!
//! Stream layout: `[count, (bit_width, packed deltas...) per block]`. The last
//! block may hold fewer than 32 values.
//!
//! **This codec delta-codes its input in place.** After `encode` returns, the
//! caller's slice holds the successive differences, not the original values.

use crate::error::CodecError;
use crate::kernels::{bitpack, delta};
use crate::traits::IntegerCodec;
use crate::utils::{read_count_header, write_count_header, WordReader, WordWriter};

/// Values per block.
pub const BLOCK_SIZE: usize = 32;

#[derive(Debug, Default, Clone, Copy)]
pub struct BinaryPacking;

impl IntegerCodec for BinaryPacking {
    fn name(&self) -> &'static str {
        "bp32"
    }

    fn mutates_input(&self) -> bool {
        true
    }

    fn max_encoded_len(&self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        // Worst case is every block at full width plus one width word each.
        1 + n.div_ceil(BLOCK_SIZE) + n
    }

    fn encode(&self, input: &mut [u32], output: &mut [u32]) -> Result<usize, CodecError> {
        if input.is_empty() {
            return Ok(0);
        }
        let mut writer = WordWriter::new(output);
        write_count_header(&mut writer, input.len())?;

        delta::encode_in_place(input, 0);
        for block in input.chunks(BLOCK_SIZE) {
            let bit_width = bitpack::required_bit_width(block);
            writer.push(bit_width as u32)?;
            bitpack::pack_into(block, bit_width, &mut writer)?;
        }
        log_metric!("event" = "encode", "codec" = "bp32", "blocks" = input.len().div_ceil(BLOCK_SIZE));
        Ok(writer.finish())
    }

    fn decode(&self, input: &[u32], output: &mut [u32]) -> Result<usize, CodecError> {
        if input.is_empty() {
            return Ok(0);
        }
        let mut reader = WordReader::new(input);
        let count = read_count_header(&mut reader, output)?;

        let values = &mut output[..count];
        for block in values.chunks_mut(BLOCK_SIZE) {
            let bit_width = reader.next("block bit width")?;
            let bit_width = u8::try_from(bit_width)
                .map_err(|_| CodecError::CorruptStream(format!("bit width {bit_width} exceeds 32")))?;
            bitpack::unpack_from(&mut reader, bit_width, block)?;
        }
        delta::decode_in_place(values, 0);
        Ok(count)
    }
}

//! `varint`: delta coding "in passing" followed by LEB128 bytes.
//!
//! Stream layout: `[count, byte_len, bytes packed little-endian into words...]`.
//! The deltas are computed while encoding, so the caller's input is left as is.

use crate::error::CodecError;
use crate::kernels::leb128;
use crate::traits::IntegerCodec;
use crate::utils::{
    read_byte_payload, read_count_header, words_for_bytes, write_byte_payload, write_count_header,
    WordReader, WordWriter,
};

#[derive(Debug, Default, Clone, Copy)]
pub struct VarintCodec;

impl IntegerCodec for VarintCodec {
    fn name(&self) -> &'static str {
        "varint"
    }

    fn max_encoded_len(&self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        2 + words_for_bytes(n * leb128::max_bytes_per_value::<u32>())
    }

    fn encode(&self, input: &mut [u32], output: &mut [u32]) -> Result<usize, CodecError> {
        if input.is_empty() {
            return Ok(0);
        }
        let mut writer = WordWriter::new(output);
        write_count_header(&mut writer, input.len())?;

        let mut bytes = Vec::with_capacity(input.len());
        let mut prev = 0u32;
        for &value in input.iter() {
            leb128::encode_one(value.wrapping_sub(prev), &mut bytes)?;
            prev = value;
        }
        write_byte_payload(&mut writer, &bytes)?;
        Ok(writer.finish())
    }

    fn decode(&self, input: &[u32], output: &mut [u32]) -> Result<usize, CodecError> {
        if input.is_empty() {
            return Ok(0);
        }
        let mut reader = WordReader::new(input);
        let count = read_count_header(&mut reader, output)?;
        let bytes = read_byte_payload(&mut reader)?;

        let values = &mut output[..count];
        leb128::decode(&bytes, values)?;
        let mut acc = 0u32;
        for value in values.iter_mut() {
            acc = acc.wrapping_add(*value);
            *value = acc;
        }
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_varint_small_deltas_take_one_byte_each() {
        let mut input: Vec<u32> = (1000..1100).collect();
        let encoded = VarintCodec.encode_to_vec(&mut input).unwrap();
        // count + byte_len + (2 bytes for 1000, then 99 single-byte deltas) packed
        assert_eq!(encoded[0], 100);
        assert_eq!(encoded[1], 101);
        assert_eq!(encoded.len(), 2 + words_for_bytes(101));
        assert_eq!(VarintCodec.decode_to_vec(&encoded, 100).unwrap(), input);
    }

    #[test]
    fn test_varint_leaves_input_untouched() {
        let original = vec![5u32, 9, 9, 4_000_000_000];
        let mut input = original.clone();
        VarintCodec.encode_to_vec(&mut input).unwrap();
        assert_eq!(input, original);
    }

    #[test]
    fn test_varint_count_mismatch_is_corrupt() {
        let mut input = vec![1u32, 2, 3];
        let mut encoded = VarintCodec.encode_to_vec(&mut input).unwrap();
        encoded[0] = 2;
        let result = VarintCodec.decode_to_vec(&encoded, 3);
        assert!(matches!(result, Err(CodecError::CorruptStream(_))));
    }
}

//! `delta-zstd`: delta coding into a scratch buffer, then zstd over the
//! native-endian bytes of the deltas.
//!
//! Stream layout: `[count, byte_len, zstd frame packed little-endian into words...]`.

use crate::error::CodecError;
use crate::kernels::{delta, zstd};
use crate::traits::IntegerCodec;
use crate::utils::{
    read_byte_payload, read_count_header, typed_slice_to_bytes, words_for_bytes,
    write_byte_payload, write_count_header, WordReader, WordWriter,
};

#[derive(Debug, Clone, Copy)]
pub struct DeltaZstd {
    level: i32,
}

impl DeltaZstd {
    pub fn new(level: i32) -> Self {
        Self { level }
    }

    pub fn level(&self) -> i32 {
        self.level
    }
}

impl Default for DeltaZstd {
    fn default() -> Self {
        Self::new(zstd::DEFAULT_LEVEL)
    }
}

impl IntegerCodec for DeltaZstd {
    fn name(&self) -> &'static str {
        "delta-zstd"
    }

    fn max_encoded_len(&self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        2 + words_for_bytes(zstd::max_compressed_len(n * 4))
    }

    fn encode(&self, input: &mut [u32], output: &mut [u32]) -> Result<usize, CodecError> {
        if input.is_empty() {
            return Ok(0);
        }
        let mut writer = WordWriter::new(output);
        write_count_header(&mut writer, input.len())?;

        let mut deltas = Vec::new();
        delta::encode_into(input, 0, &mut deltas);
        let frame = zstd::encode(&typed_slice_to_bytes(&deltas), self.level)?;
        write_byte_payload(&mut writer, &frame)?;
        Ok(writer.finish())
    }

    fn decode(&self, input: &[u32], output: &mut [u32]) -> Result<usize, CodecError> {
        if input.is_empty() {
            return Ok(0);
        }
        let mut reader = WordReader::new(input);
        let count = read_count_header(&mut reader, output)?;
        let frame = read_byte_payload(&mut reader)?;
        let bytes = zstd::decode(&frame, count * 4)?;

        let values = &mut output[..count];
        for (slot, chunk) in values.iter_mut().zip(bytes.chunks_exact(4)) {
            *slot = u32::from_ne_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        delta::decode_in_place(values, 0);
        Ok(count)
    }
}

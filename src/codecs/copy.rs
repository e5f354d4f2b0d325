//! `copy`: the identity codec. Stores the element count followed by the raw
//! values. Useful as a baseline and as a sanity check for the driver.

use crate::error::CodecError;
use crate::traits::IntegerCodec;
use crate::utils::{read_count_header, write_count_header, WordReader, WordWriter};

#[derive(Debug, Default, Clone, Copy)]
pub struct CopyCodec;

impl IntegerCodec for CopyCodec {
    fn name(&self) -> &'static str {
        "copy"
    }

    fn max_encoded_len(&self, n: usize) -> usize {
        if n == 0 {
            0
        } else {
            n + 1
        }
    }

    fn encode(&self, input: &mut [u32], output: &mut [u32]) -> Result<usize, CodecError> {
        if input.is_empty() {
            return Ok(0);
        }
        let mut writer = WordWriter::new(output);
        writer.reserve(input.len() + 1)?;
        write_count_header(&mut writer, input.len())?;
        writer.extend_from_slice(input)?;
        Ok(writer.finish())
    }

    fn decode(&self, input: &[u32], output: &mut [u32]) -> Result<usize, CodecError> {
        if input.is_empty() {
            return Ok(0);
        }
        let mut reader = WordReader::new(input);
        let count = read_count_header(&mut reader, output)?;
        output[..count].copy_from_slice(reader.take(count, "raw values")?);
        Ok(count)
    }
}

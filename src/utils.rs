//! This module provides a set of shared, low-level utility functions used
//! throughout the codec kernels.
//!
//! Its primary responsibilities include:
//! 1.  Bounded word cursors that turn every out-of-room write into
//!     `BufferTooSmall` and every out-of-data read into `CorruptStream`.
//! 2.  Packing byte streams into the fixed-width word blobs that codecs emit.

use crate::error::CodecError;

//==================================================================================
// 1. Bounded Word Cursors
//==================================================================================

/// A write cursor over a caller-allocated word buffer. It never writes past
/// `output.len()`.
pub(crate) struct WordWriter<'a> {
    output: &'a mut [u32],
    pos: usize,
}

impl<'a> WordWriter<'a> {
    pub(crate) fn new(output: &'a mut [u32]) -> Self {
        Self { output, pos: 0 }
    }

    /// Fails early when `additional` words cannot fit, without writing anything.
    pub(crate) fn reserve(&self, additional: usize) -> Result<(), CodecError> {
        let needed = self.pos + additional;
        if needed > self.output.len() {
            return Err(CodecError::BufferTooSmall {
                needed,
                capacity: self.output.len(),
            });
        }
        Ok(())
    }

    pub(crate) fn push(&mut self, word: u32) -> Result<(), CodecError> {
        self.reserve(1)?;
        self.output[self.pos] = word;
        self.pos += 1;
        Ok(())
    }

    pub(crate) fn extend_from_slice(&mut self, words: &[u32]) -> Result<(), CodecError> {
        self.reserve(words.len())?;
        self.output[self.pos..self.pos + words.len()].copy_from_slice(words);
        self.pos += words.len();
        Ok(())
    }

    /// Number of words written so far.
    pub(crate) fn finish(self) -> usize {
        self.pos
    }
}

/// A read cursor over an encoded word blob.
pub(crate) struct WordReader<'a> {
    input: &'a [u32],
    pos: usize,
}

impl<'a> WordReader<'a> {
    pub(crate) fn new(input: &'a [u32]) -> Self {
        Self { input, pos: 0 }
    }

    pub(crate) fn next(&mut self, what: &str) -> Result<u32, CodecError> {
        let word = *self.input.get(self.pos).ok_or_else(|| {
            CodecError::CorruptStream(format!("unexpected end of stream while reading {what}"))
        })?;
        self.pos += 1;
        Ok(word)
    }

    pub(crate) fn take(&mut self, count: usize, what: &str) -> Result<&'a [u32], CodecError> {
        let end = self
            .pos
            .checked_add(count)
            .filter(|&end| end <= self.input.len())
            .ok_or_else(|| {
                CodecError::CorruptStream(format!(
                    "{what} needs {count} words but only {} remain",
                    self.input.len() - self.pos
                ))
            })?;
        let slice = &self.input[self.pos..end];
        self.pos = end;
        Ok(slice)
    }
}

//==================================================================================
// 2. Shared Stream Framing
//==================================================================================

/// Writes the element-count header. Streams cannot describe more than
/// `u32::MAX` values.
pub(crate) fn write_count_header(writer: &mut WordWriter<'_>, len: usize) -> Result<(), CodecError> {
    let count = u32::try_from(len).map_err(|_| CodecError::InputTooLarge {
        len,
        max: u32::MAX as usize,
    })?;
    writer.push(count)
}

/// Reads the element-count header and checks it against the output capacity.
pub(crate) fn read_count_header(
    reader: &mut WordReader<'_>,
    output: &[u32],
) -> Result<usize, CodecError> {
    let count = reader.next("element count")? as usize;
    if count > output.len() {
        return Err(CodecError::BufferTooSmall {
            needed: count,
            capacity: output.len(),
        });
    }
    Ok(count)
}

/// Number of words needed to hold `byte_len` bytes.
pub(crate) fn words_for_bytes(byte_len: usize) -> usize {
    byte_len.div_ceil(4)
}

/// Writes `[byte_len, packed words...]`, zero-padding the final word.
pub(crate) fn write_byte_payload(writer: &mut WordWriter<'_>, bytes: &[u8]) -> Result<(), CodecError> {
    let byte_len = u32::try_from(bytes.len()).map_err(|_| CodecError::InputTooLarge {
        len: bytes.len(),
        max: u32::MAX as usize,
    })?;
    writer.reserve(1 + words_for_bytes(bytes.len()))?;
    writer.push(byte_len)?;
    for chunk in bytes.chunks(4) {
        let mut word = [0u8; 4];
        word[..chunk.len()].copy_from_slice(chunk);
        writer.push(u32::from_le_bytes(word))?;
    }
    Ok(())
}

/// Inverse of [`write_byte_payload`].
pub(crate) fn read_byte_payload(reader: &mut WordReader<'_>) -> Result<Vec<u8>, CodecError> {
    let byte_len = reader.next("payload byte length")? as usize;
    let words = reader.take(words_for_bytes(byte_len), "byte payload")?;
    let mut bytes: Vec<u8> = words.iter().flat_map(|w| w.to_le_bytes()).collect();
    bytes.truncate(byte_len);
    Ok(bytes)
}

/// Converts a slice of plain-old-data values into an owned byte vector.
pub fn typed_slice_to_bytes<T: bytemuck::Pod>(data: &[T]) -> Vec<u8> {
    bytemuck::cast_slice(data).to_vec()
}

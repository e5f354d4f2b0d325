//! This module defines the capability contract every integer codec implements.
//!
//! A codec turns a sequence of `u32` values into a (usually shorter) blob of
//! `u32` words and back. The caller owns every buffer: encode and decode write
//! into caller-allocated slices and report how many words/integers they used.

use crate::error::CodecError;

/// A paired encode/decode capability for one compression algorithm.
///
/// Implementations are stateless across calls and shared between threads via
/// the registry, hence the `Send + Sync` bound.
///
/// # Contract
/// * `encode` returns the number of words written to `output` and must fail
///   with [`CodecError::BufferTooSmall`] instead of writing past its end.
/// * `decode` returns the number of integers written to `output`. Malformed or
///   truncated input is [`CodecError::CorruptStream`]; an output slice shorter
///   than the encoded element count is [`CodecError::BufferTooSmall`].
/// * `decode` only reads the words its stream describes, so trailing words
///   after the used length never change the result.
/// * For every input within the codec's domain, `decode(encode(s)) == s`.
pub trait IntegerCodec: Send + Sync {
    /// The stable, case-sensitive name this codec is registered under.
    fn name(&self) -> &'static str;

    /// Whether `encode` overwrites `input` (e.g. with an in-place delta pass).
    /// Callers that need the original values afterwards must keep their own copy.
    fn mutates_input(&self) -> bool {
        false
    }

    /// Whether every `u32` value, including `u32::MAX`, round-trips.
    fn supports_full_range(&self) -> bool {
        true
    }

    /// An upper bound on the words `encode` can write for `n` integers.
    fn max_encoded_len(&self, n: usize) -> usize;

    fn encode(&self, input: &mut [u32], output: &mut [u32]) -> Result<usize, CodecError>;

    fn decode(&self, input: &[u32], output: &mut [u32]) -> Result<usize, CodecError>;

    /// Encodes into a freshly allocated buffer sized by [`max_encoded_len`](Self::max_encoded_len),
    /// truncated to the used length.
    fn encode_to_vec(&self, input: &mut [u32]) -> Result<Vec<u32>, CodecError> {
        let mut output = vec![0u32; self.max_encoded_len(input.len())];
        let used = self.encode(input, &mut output)?;
        output.truncate(used);
        Ok(output)
    }

    /// Decodes into a freshly allocated buffer of `capacity` integers,
    /// truncated to the recovered length.
    fn decode_to_vec(&self, input: &[u32], capacity: usize) -> Result<Vec<u32>, CodecError> {
        let mut output = vec![0u32; capacity];
        let recovered = self.decode(input, &mut output)?;
        output.truncate(recovered);
        Ok(output)
    }
}

//! This module contains the pure, stateless kernels for performing Zstandard
//! compression and decompression.
//!
//! It is the entropy-coding stage of the `delta-zstd` codec: it takes a byte
//! buffer already reduced by delta coding and applies zstd to it. This module
//! is a safe, panic-free wrapper around the `zstd` crate.

use std::io::Write;
use zstd::stream::Encoder;

use crate::error::CodecError;

/// The zstd level used when no configuration overrides it.
pub const DEFAULT_LEVEL: i32 = 3;

//==================================================================================
// 1. Public API
//==================================================================================

/// Compresses `input_bytes` into a single zstd frame.
pub fn encode(input_bytes: &[u8], level: i32) -> Result<Vec<u8>, CodecError> {
    let mut output_buf = Vec::with_capacity(max_compressed_len(input_bytes.len()));

    // We use the streaming Encoder, which writes directly to the output buffer.
    let mut encoder =
        Encoder::new(&mut output_buf, level).map_err(|e| CodecError::ZstdError(e.to_string()))?;
    encoder
        .write_all(input_bytes)
        .map_err(|e| CodecError::ZstdError(e.to_string()))?;

    // `finish` is essential to finalize the Zstd frame.
    encoder
        .finish()
        .map_err(|e| CodecError::ZstdError(e.to_string()))?;
    Ok(output_buf)
}

/// Decompresses a zstd frame that must expand to exactly `expected_len` bytes.
/// Decompression stops at `expected_len`, so an oversized frame is rejected
/// without being expanded in full.
pub fn decode(input_bytes: &[u8], expected_len: usize) -> Result<Vec<u8>, CodecError> {
    let decompressed_data = zstd::bulk::decompress(input_bytes, expected_len).map_err(|e| {
        CodecError::CorruptStream(format!("zstd frame (expected {expected_len} bytes): {e}"))
    })?;

    if decompressed_data.len() != expected_len {
        return Err(CodecError::CorruptStream(format!(
            "zstd frame decompressed to {} bytes, expected {}",
            decompressed_data.len(),
            expected_len
        )));
    }
    Ok(decompressed_data)
}

/// Worst-case size of a zstd frame for `src_len` input bytes.
pub fn max_compressed_len(src_len: usize) -> usize {
    zstd::zstd_safe::compress_bound(src_len)
}

//==================================================================================
// 2. Unit Tests
//==================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zstd_roundtrip_highly_compressible_data() {
        let original_bytes = vec![42u8; 10_000];
        let compressed_bytes = encode(&original_bytes, 5).unwrap();
        assert!(compressed_bytes.len() < 50);
        assert!(compressed_bytes.len() <= max_compressed_len(original_bytes.len()));

        let decompressed_bytes = decode(&compressed_bytes, original_bytes.len()).unwrap();
        assert_eq!(original_bytes, decompressed_bytes);
    }

    #[test]
    fn test_zstd_decompress_invalid_data() {
        let result = decode(&[1, 2, 3, 4, 5], 16);
        assert!(matches!(result, Err(CodecError::CorruptStream(_))));
    }

    #[test]
    fn test_zstd_length_mismatch_is_corrupt() {
        let compressed_bytes = encode(b"postings postings postings", DEFAULT_LEVEL).unwrap();
        let result = decode(&compressed_bytes, 4);
        assert!(result.unwrap_err().to_string().contains("expected 4"));

        let result = decode(&compressed_bytes, 1000);
        assert!(matches!(result, Err(CodecError::CorruptStream(_))));
    }

    #[test]
    fn test_oversized_frame_stops_at_expected_len() {
        let compressed_bytes = encode(&vec![0u8; 1 << 22], DEFAULT_LEVEL).unwrap();
        assert!(compressed_bytes.len() < 1024);

        let result = decode(&compressed_bytes, 16);
        assert!(matches!(result, Err(CodecError::CorruptStream(_))));
    }
}

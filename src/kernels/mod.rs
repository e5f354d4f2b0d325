//! This module collects the pure, stateless building blocks the codecs are
//! assembled from. None of these kernels know about stream headers or the
//! registry; the `codecs` module composes them into framed algorithms.

/// Value reduction
pub mod delta;

/// Bit-width reduction
pub mod bitpack;
pub mod leb128;

/// Entropy coding
pub mod zstd;

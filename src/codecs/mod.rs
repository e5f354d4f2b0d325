//! The built-in codecs the default registry is populated with.
//!
//! Every stream produced here starts with the element count; an empty input
//! encodes to zero words. See each module for its layout and whether it
//! mutates the caller's input.

mod binary_packing;
mod copy;
mod delta_zstd;
mod frame_of_reference;
mod varint;

pub use binary_packing::BinaryPacking;
pub use copy::CopyCodec;
pub use delta_zstd::DeltaZstd;
pub use frame_of_reference::FrameOfReference;
pub use varint::VarintCodec;

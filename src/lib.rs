//! This file is the root of the `postings_codec` crate: pluggable codecs for
//! sorted sequences of `u32` (e.g. posting lists of an inverted index), a
//! registry that resolves them by name, and a driver that round-trips data
//! through a chosen codec and verifies the result bit for bit.
//!
//! ```
//! use std::sync::Arc;
//! use postings_codec::{CodecRegistry, RoundTripConfig, RoundTripDriver};
//!
//! let registry = Arc::new(CodecRegistry::with_defaults()?);
//! let config = Arc::new(RoundTripConfig { codec: "varint".into(), ..Default::default() });
//! let mut driver = RoundTripDriver::new(registry, config);
//!
//! let report = driver.run_in_memory(vec![1, 2, 2, 3, 10, 10, 10, 20])?;
//! assert_eq!(report.recovered, vec![1, 2, 2, 3, 10, 10, 10, 20]);
//! # Ok::<(), postings_codec::CodecError>(())
//! ```

//==================================================================================
// 0. Constants
//==================================================================================
/// The crate version, automatically set from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//==================================================================================
// 1. Module Declarations
//==================================================================================
#[macro_use]
mod observability; // Make macros available throughout the crate

pub mod analyze;
pub mod artifact;
pub mod codecs;
pub mod config;
pub mod driver;
pub mod error;
pub mod io;
pub mod kernels;
pub mod registry;
pub mod traits;
pub mod verify;

mod utils;

//==================================================================================
// 2. Public API Re-exports
//==================================================================================
pub use analyze::{analyze, AnalysisReport, SchemeSummary};
pub use artifact::{ArtifactStore, FileArtifact, MemoryArtifact};
pub use config::{OutputSizing, RoundTripConfig};
pub use driver::{DriverState, RoundTripDriver, RoundTripReport};
pub use error::{CodecError, Stage};
pub use registry::{CodecDescriptor, CodecRegistry, CodecRegistryBuilder};
pub use traits::IntegerCodec;

#[doc(hidden)]
pub mod __private {
    pub use log;
}

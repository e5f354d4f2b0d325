// In: src/error.rs

//! This module defines the single, unified error type for the entire postings-codec library.
//! It uses the `thiserror` crate to provide ergonomic, context-aware error handling.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// The step of a round trip at which a failure was observed.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Lookup,
    Encode,
    Persist,
    Load,
    Decode,
    Compare,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Lookup => "lookup",
            Stage::Encode => "encode",
            Stage::Persist => "persist",
            Stage::Load => "load",
            Stage::Decode => "decode",
            Stage::Compare => "compare",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum CodecError {
    // =========================================================================
    // === Codec Contract Errors
    // =========================================================================
    #[error("Unknown codec '{name}' (available: {available})")]
    UnknownCodec { name: String, available: String },

    #[error("Buffer too small: need at least {needed} words, capacity is {capacity}")]
    BufferTooSmall { needed: usize, capacity: usize },

    #[error("Input of {len} values exceeds the {max} a stream can describe")]
    InputTooLarge { len: usize, max: usize },

    #[error("Corrupt encoded stream: {0}")]
    CorruptStream(String),

    #[error(
        "Round-trip mismatch: expected {expected_len} values, recovered {actual_len}, first difference at {first_difference:?}"
    )]
    RoundTripMismatch {
        expected_len: usize,
        actual_len: usize,
        first_difference: Option<usize>,
    },

    #[error("Round trip failed at stage '{stage}': {source}")]
    Stage {
        stage: Stage,
        #[source]
        source: Box<CodecError>,
    },

    // =========================================================================
    // === Configuration & Input Errors
    // =========================================================================
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Cannot parse token #{index} ('{token}') as an unsigned 32-bit integer")]
    Parse { index: usize, token: String },

    #[error("Internal logic error (this is a bug): {0}")]
    InternalError(String),

    // =========================================================================
    // === External Error Wrappers
    // =========================================================================
    /// An error originating from the underlying I/O subsystem (e.g., file not found).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An error from the Serde JSON library, typically while loading a config file.
    #[error("Serde JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("Zstd operation failed: {0}")]
    ZstdError(String),
}

impl CodecError {
    /// Attaches the round-trip stage at which this error surfaced.
    /// An error that already carries a stage is left untouched.
    pub fn at(self, stage: Stage) -> Self {
        match self {
            already @ CodecError::Stage { .. } => already,
            other => CodecError::Stage {
                stage,
                source: Box::new(other),
            },
        }
    }

    /// The stage this error was attributed to, if any.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            CodecError::Stage { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    /// The underlying error with any stage context peeled off.
    pub fn root(&self) -> &CodecError {
        match self {
            CodecError::Stage { source, .. } => source.root(),
            other => other,
        }
    }
}

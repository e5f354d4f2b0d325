// In: src/driver/mod.rs

// ====================================================================================
// ARCHITECTURAL OVERVIEW: The Round-Trip Driver
// ====================================================================================
//
// The driver runs one encode -> persist -> load -> decode -> verify cycle and is
// the externally observable behaviour of the library.
//
//   1. [Registry]        lookup(config.codec)                  -> CodecDescriptor
//   2. [Driver]          keep an untouched reference copy of the input
//   3. [Codec]           encode(working copy, capacity buffer) -> used length
//   4. [ArtifactStore]   persist(encoded[..used]) / load()
//   5. [Codec]           decode(loaded, buffer of N)           -> recovered length
//   6. [verify]          check_round_trip(reference, recovered)
//
// State: Idle -> Encoding -> Persisted -> Decoding -> Verified | Failed.
// Nothing is retried; every error comes back tagged with the stage it hit.
// ====================================================================================

use std::sync::Arc;

use serde::Serialize;

use crate::artifact::{ArtifactStore, MemoryArtifact};
use crate::config::RoundTripConfig;
use crate::error::{CodecError, Stage};
use crate::registry::{CodecDescriptor, CodecRegistry};
use crate::verify::check_round_trip;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DriverState {
    Idle,
    Encoding,
    Persisted,
    Decoding,
    Verified,
    Failed,
}

/// The outcome of a successful round trip.
#[derive(Serialize, Debug, Clone)]
pub struct RoundTripReport {
    pub codec: String,
    pub input_len: usize,
    pub capacity_words: usize,
    pub encoded_words: usize,
    /// Whether the working copy differed from the input after encoding.
    pub input_mutated: bool,
    pub bits_per_integer: f64,
    pub recovered: Vec<u32>,
}

pub struct RoundTripDriver {
    registry: Arc<CodecRegistry>,
    config: Arc<RoundTripConfig>,
    state: DriverState,
}

impl RoundTripDriver {
    pub fn new(registry: Arc<CodecRegistry>, config: Arc<RoundTripConfig>) -> Self {
        Self {
            registry,
            config,
            state: DriverState::Idle,
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn config(&self) -> &RoundTripConfig {
        &self.config
    }

    /// Runs a full round trip with the encoded blob held in memory.
    pub fn run_in_memory(&mut self, input: Vec<u32>) -> Result<RoundTripReport, CodecError> {
        self.run(input, &mut MemoryArtifact::new())
    }

    /// Runs a full round trip of `input` through the configured codec, with
    /// `store` holding the encoded blob between the two halves.
    pub fn run(
        &mut self,
        input: Vec<u32>,
        store: &mut dyn ArtifactStore,
    ) -> Result<RoundTripReport, CodecError> {
        self.state = DriverState::Idle;
        let result = self.execute(input, store);
        self.state = if result.is_ok() {
            DriverState::Verified
        } else {
            DriverState::Failed
        };
        result
    }

    fn execute(
        &mut self,
        mut working: Vec<u32>,
        store: &mut dyn ArtifactStore,
    ) -> Result<RoundTripReport, CodecError> {
        let registry = Arc::clone(&self.registry);
        let descriptor: &CodecDescriptor = registry
            .lookup(&self.config.codec)
            .map_err(|e| e.at(Stage::Lookup))?;
        let codec = descriptor.codec();
        let n = working.len();

        // The reference copy is never aliased with the working copy the codec sees.
        let reference = working.clone();
        if !working.windows(2).all(|w| w[0] <= w[1]) {
            log::warn!(
                "input to '{}' is not sorted; delta-based codecs will compress poorly",
                descriptor.name()
            );
        }

        // --- Encode ---
        self.state = DriverState::Encoding;
        let capacity = self.config.encode_capacity(codec.as_ref(), n);
        let mut encoded = vec![0u32; capacity];
        let used = codec
            .encode(&mut working, &mut encoded)
            .map_err(|e| e.at(Stage::Encode))?;
        if used > capacity {
            return Err(CodecError::InternalError(format!(
                "codec '{}' reported {used} words for a {capacity}-word buffer",
                descriptor.name()
            ))
            .at(Stage::Encode));
        }
        encoded.truncate(used);

        let input_mutated = working != reference;
        if input_mutated && !descriptor.mutates_input() {
            log::warn!(
                "codec '{}' declares a read-only encode but modified its input",
                descriptor.name()
            );
        }
        drop(working);

        store.persist(&encoded).map_err(|e| e.at(Stage::Persist))?;
        self.state = DriverState::Persisted;
        log::debug!("encoded {n} integers into {used} words (capacity {capacity})");

        // --- Decode ---
        self.state = DriverState::Decoding;
        let loaded = store.load().map_err(|e| e.at(Stage::Load))?;
        let mut recovered = vec![0u32; n];
        let recovered_len = codec
            .decode(&loaded, &mut recovered)
            .map_err(|e| e.at(Stage::Decode))?;
        recovered.truncate(recovered_len);

        // --- Verify ---
        check_round_trip(&reference, &recovered).map_err(|e| e.at(Stage::Compare))?;

        let bits_per_integer = if n == 0 {
            0.0
        } else {
            (used * 32) as f64 / n as f64
        };
        log_metric!(
            "event" = "round_trip",
            "codec" = descriptor.name(),
            "integers" = n,
            "words" = used,
            "bits_per_integer" = format!("{bits_per_integer:.3}"),
        );

        Ok(RoundTripReport {
            codec: descriptor.name().to_string(),
            input_len: n,
            capacity_words: capacity,
            encoded_words: used,
            input_mutated,
            bits_per_integer,
            recovered,
        })
    }
}

// In: src/registry.rs

//! The name -> codec binding.
//!
//! A `CodecRegistry` is built exactly once (via [`CodecRegistry::builder`] or
//! one of the default constructors) and has no mutators afterwards. It is
//! meant to be wrapped in an `Arc` and handed to every component that needs to
//! resolve a codec by name; concurrent lookups need no locking.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::codecs::{BinaryPacking, CopyCodec, DeltaZstd, FrameOfReference, VarintCodec};
use crate::config::RoundTripConfig;
use crate::error::CodecError;
use crate::traits::IntegerCodec;

//==================================================================================
// 1. Descriptor
//==================================================================================

/// An immutable (name -> codec) binding.
#[derive(Clone)]
pub struct CodecDescriptor {
    name: &'static str,
    mutates_input: bool,
    codec: Arc<dyn IntegerCodec>,
}

impl CodecDescriptor {
    fn new(codec: Arc<dyn IntegerCodec>) -> Self {
        Self {
            name: codec.name(),
            mutates_input: codec.mutates_input(),
            codec,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether `encode` overwrites the caller's input. Callers that still need
    /// the original values must copy them before encoding.
    pub fn mutates_input(&self) -> bool {
        self.mutates_input
    }

    pub fn codec(&self) -> &Arc<dyn IntegerCodec> {
        &self.codec
    }
}

impl fmt::Debug for CodecDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodecDescriptor")
            .field("name", &self.name)
            .field("mutates_input", &self.mutates_input)
            .field("supports_full_range", &self.codec.supports_full_range())
            .finish()
    }
}

//==================================================================================
// 2. Builder
//==================================================================================

#[derive(Default)]
pub struct CodecRegistryBuilder {
    entries: BTreeMap<&'static str, CodecDescriptor>,
}

impl CodecRegistryBuilder {
    /// Adds a codec under its own `name()`. Registering the same name twice
    /// is a configuration error.
    pub fn register(mut self, codec: Arc<dyn IntegerCodec>) -> Result<Self, CodecError> {
        let descriptor = CodecDescriptor::new(codec);
        if self.entries.contains_key(descriptor.name) {
            return Err(CodecError::Config(format!(
                "codec '{}' is registered twice",
                descriptor.name
            )));
        }
        self.entries.insert(descriptor.name, descriptor);
        Ok(self)
    }

    pub fn build(self) -> CodecRegistry {
        log::debug!(
            "codec registry built with {} entries: {:?}",
            self.entries.len(),
            self.entries.keys().collect::<Vec<_>>()
        );
        CodecRegistry {
            entries: self.entries,
        }
    }
}

//==================================================================================
// 3. Registry
//==================================================================================

pub struct CodecRegistry {
    entries: BTreeMap<&'static str, CodecDescriptor>,
}

impl CodecRegistry {
    pub fn builder() -> CodecRegistryBuilder {
        CodecRegistryBuilder::default()
    }

    /// All built-in codecs, with `delta-zstd` at the level from `config`.
    pub fn from_config(config: &RoundTripConfig) -> Result<Self, CodecError> {
        config.validate()?;
        Ok(Self::builder()
            .register(Arc::new(CopyCodec))?
            .register(Arc::new(VarintCodec))?
            .register(Arc::new(BinaryPacking))?
            .register(Arc::new(FrameOfReference))?
            .register(Arc::new(DeltaZstd::new(config.zstd_level)))?
            .build())
    }

    /// All built-in codecs with default settings.
    pub fn with_defaults() -> Result<Self, CodecError> {
        Self::from_config(&RoundTripConfig::default())
    }

    /// Resolves `name` exactly (case-sensitive). Never falls back to a default.
    pub fn lookup(&self, name: &str) -> Result<&CodecDescriptor, CodecError> {
        self.entries
            .get(name)
            .ok_or_else(|| CodecError::UnknownCodec {
                name: name.to_string(),
                available: self.names().collect::<Vec<_>>().join(", "),
            })
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &CodecDescriptor> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for CodecRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.entries.values()).finish()
    }
}

//==================================================================================
// 4. Unit Tests
//==================================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_register_every_builtin() {
        let registry = CodecRegistry::with_defaults().unwrap();
        let names: Vec<_> = registry.names().collect();
        assert_eq!(
            names,
            vec!["bp32", "copy", "delta-zstd", "frameofreference", "varint"]
        );
        assert!(registry.lookup("bp32").unwrap().mutates_input());
        assert!(!registry.lookup("varint").unwrap().mutates_input());
    }

    #[test]
    fn test_unknown_name_never_falls_back() {
        let registry = CodecRegistry::with_defaults().unwrap();
        match registry.lookup("not-a-real-codec") {
            Err(CodecError::UnknownCodec { name, available }) => {
                assert_eq!(name, "not-a-real-codec");
                assert!(available.contains("varint"));
            }
            other => panic!("Expected UnknownCodec, got {:?}", other),
        }
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let registry = CodecRegistry::with_defaults().unwrap();
        assert!(registry.lookup("BP32").is_err());
        assert!(registry.lookup(" bp32").is_err());
    }

    #[test]
    fn test_duplicate_registration_is_rejected() {
        let result = CodecRegistry::builder()
            .register(Arc::new(CopyCodec))
            .and_then(|b| b.register(Arc::new(CopyCodec)));
        assert!(matches!(result, Err(CodecError::Config(_))));
    }

    #[test]
    fn test_registry_is_shareable_across_threads() {
        let registry = Arc::new(CodecRegistry::with_defaults().unwrap());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || {
                    let codec = registry.lookup("varint").unwrap().codec().clone();
                    let mut input = vec![1u32, 2, 3];
                    let encoded = codec.encode_to_vec(&mut input).unwrap();
                    codec.decode_to_vec(&encoded, 3).unwrap()
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), vec![1, 2, 3]);
        }
    }

    #[test]
    fn test_zstd_level_flows_from_config() {
        let config = RoundTripConfig {
            zstd_level: 9,
            ..RoundTripConfig::default()
        };
        let registry = CodecRegistry::from_config(&config).unwrap();
        assert_eq!(registry.len(), 5);
        assert!(!registry.is_empty());
    }
}

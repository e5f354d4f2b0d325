// In: src/config.rs

//! The single source of truth for round-trip configuration.
//!
//! `RoundTripConfig` is created once at the application boundary (from CLI
//! flags or a JSON file) and then shared, read-only, as an
//! `Arc<RoundTripConfig>` by the registry and the driver.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CodecError;
use crate::kernels::zstd;
use crate::traits::IntegerCodec;

//==================================================================================
// I. Core Configuration Enums & Structs
//==================================================================================

/// How the driver sizes the encode output buffer.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutputSizing {
    /// **Default:** ask the codec for its worst-case size via
    /// `IntegerCodec::max_encoded_len`. Encode can never run out of room.
    #[default]
    CodecBound,

    /// Allocate `n + margin_words`. This is a heuristic: a codec whose worst
    /// case exceeds the margin fails with `BufferTooSmall`.
    FixedMargin,
}

/// The unified configuration for a round trip.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct RoundTripConfig {
    /// Registry name of the codec to use.
    #[serde(default = "default_codec")]
    pub codec: String,

    #[serde(default)]
    pub output_sizing: OutputSizing,

    /// Extra words beyond `n` used by `OutputSizing::FixedMargin`.
    #[serde(default = "default_margin_words")]
    pub margin_words: usize,

    /// Compression level for the `delta-zstd` codec.
    #[serde(default = "default_zstd_level")]
    pub zstd_level: i32,
}

impl Default for RoundTripConfig {
    fn default() -> Self {
        Self {
            codec: default_codec(),
            output_sizing: OutputSizing::default(),
            margin_words: default_margin_words(),
            zstd_level: default_zstd_level(),
        }
    }
}

fn default_codec() -> String {
    "bp32".to_string()
}

fn default_margin_words() -> usize {
    1024
}

fn default_zstd_level() -> i32 {
    zstd::DEFAULT_LEVEL
}

//==================================================================================
// II. Loading & Validation
//==================================================================================

impl RoundTripConfig {
    /// Parses and validates a JSON document. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, CodecError> {
        let config: RoundTripConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CodecError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<(), CodecError> {
        if self.codec.is_empty() {
            return Err(CodecError::Config("codec name must not be empty".to_string()));
        }
        if !(1..=22).contains(&self.zstd_level) {
            return Err(CodecError::Config(format!(
                "zstd_level must be within 1..=22, got {}",
                self.zstd_level
            )));
        }
        Ok(())
    }

    /// Words to allocate for encoding `n` integers with `codec`.
    pub fn encode_capacity(&self, codec: &dyn IntegerCodec, n: usize) -> usize {
        match self.output_sizing {
            OutputSizing::CodecBound => codec.max_encoded_len(n),
            OutputSizing::FixedMargin => n + self.margin_words,
        }
    }
}

//==================================================================================
// III. Unit Tests
//==================================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::codecs::CopyCodec;

    #[test]
    fn test_empty_json_takes_defaults() {
        let config = RoundTripConfig::from_json_str("{}").unwrap();
        assert_eq!(config, RoundTripConfig::default());
        assert_eq!(config.codec, "bp32");
        assert_eq!(config.margin_words, 1024);
    }

    #[test]
    fn test_fixed_margin_from_json() {
        let config = RoundTripConfig::from_json_str(
            r#"{"codec": "varint", "output_sizing": "fixed_margin", "margin_words": 16}"#,
        )
        .unwrap();
        assert_eq!(config.output_sizing, OutputSizing::FixedMargin);
        assert_eq!(config.encode_capacity(&CopyCodec, 10), 26);
    }

    #[test]
    fn test_codec_bound_uses_codec() {
        let config = RoundTripConfig::default();
        assert_eq!(config.encode_capacity(&CopyCodec, 10), 11);
        assert_eq!(config.encode_capacity(&CopyCodec, 0), 0);
    }

    #[test]
    fn test_invalid_level_is_rejected() {
        let result = RoundTripConfig::from_json_str(r#"{"zstd_level": 40}"#);
        assert!(matches!(result, Err(CodecError::Config(_))));
    }

    #[test]
    fn test_malformed_json_is_serde_error() {
        let result = RoundTripConfig::from_json_str("{codec:");
        assert!(matches!(result, Err(CodecError::SerdeJson(_))));
    }
}

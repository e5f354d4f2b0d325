// In: src/analyze.rs

//! Size comparison of every registered codec over a corpus of posting lists.
//!
//! Each list is encoded, decoded and verified with every codec in the
//! registry. The encoded sizes are collected per codec and summarised as a
//! total plus p50/p75/p90/p99, next to an uncompressed baseline of a 4-byte
//! length prefix followed by 4 bytes per value.

use std::fmt;

use serde::Serialize;

use crate::error::{CodecError, Stage};
use crate::registry::{CodecDescriptor, CodecRegistry};
use crate::verify::check_round_trip;

/// Name of the uncompressed baseline in reports.
pub const RAW_BASELINE: &str = "raw";

/// The quantiles every summary reports, in order.
pub const QUANTILES: [f64; 4] = [0.5, 0.75, 0.9, 0.99];

/// Bytes a list of `len` values occupies uncompressed.
pub fn raw_size_bytes(len: usize) -> u64 {
    4 + 4 * len as u64
}

//==================================================================================
// 1. Size Distribution
//==================================================================================

/// Exact per-list sizes for one scheme.
#[derive(Debug, Clone, Default)]
pub struct SizeDistribution {
    sizes: Vec<u64>,
}

impl SizeDistribution {
    pub fn add(&mut self, size: u64) {
        self.sizes.push(size);
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.sizes.iter().sum()
    }

    /// Nearest-rank quantile. An empty distribution yields 0.
    pub fn quantile(&self, q: f64) -> u64 {
        if self.sizes.is_empty() {
            return 0;
        }
        let mut sorted = self.sizes.clone();
        sorted.sort_unstable();
        let rank = (q.clamp(0.0, 1.0) * sorted.len() as f64).ceil() as usize;
        sorted[rank.saturating_sub(1).min(sorted.len() - 1)]
    }

    fn summarize(&self, scheme: &str, raw_total: u64) -> SchemeSummary {
        let total_bytes = self.total();
        let q = QUANTILES.map(|q| self.quantile(q));
        SchemeSummary {
            scheme: scheme.to_string(),
            lists: self.len(),
            total_bytes,
            p50: q[0],
            p75: q[1],
            p90: q[2],
            p99: q[3],
            ratio_to_raw: if raw_total == 0 {
                0.0
            } else {
                total_bytes as f64 / raw_total as f64
            },
        }
    }
}

//==================================================================================
// 2. Reports
//==================================================================================

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SchemeSummary {
    pub scheme: String,
    pub lists: usize,
    pub total_bytes: u64,
    pub p50: u64,
    pub p75: u64,
    pub p90: u64,
    pub p99: u64,
    /// `total_bytes` over the raw baseline's total.
    pub ratio_to_raw: f64,
}

#[derive(Serialize, Debug, Clone)]
pub struct AnalysisReport {
    pub lists: usize,
    pub integers: u64,
    pub raw: SchemeSummary,
    /// One entry per registered codec, in registry order.
    pub codecs: Vec<SchemeSummary>,
}

impl fmt::Display for SchemeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "-----{}-----", self.scheme)?;
        writeln!(f, "50th by posting list size in bytes: {}", self.p50)?;
        writeln!(f, "75th by posting list size in bytes: {}", self.p75)?;
        writeln!(f, "90th by posting list size in bytes: {}", self.p90)?;
        writeln!(f, "99th by posting list size in bytes: {}", self.p99)?;
        writeln!(
            f,
            "Total sum {} ({:.3} of raw)",
            self.total_bytes, self.ratio_to_raw
        )
    }
}

impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Number of posting lists: {} ({} integers)",
            self.lists, self.integers
        )?;
        write!(f, "{}", self.raw)?;
        for summary in &self.codecs {
            write!(f, "{summary}")?;
        }
        Ok(())
    }
}

//==================================================================================
// 3. Analysis
//==================================================================================

/// Runs every list through every codec in `registry` and summarises the
/// encoded sizes. Any codec that fails to round-trip a list aborts the
/// analysis with a stage-tagged error.
pub fn analyze(registry: &CodecRegistry, lists: &[Vec<u32>]) -> Result<AnalysisReport, CodecError> {
    let mut raw = SizeDistribution::default();
    for list in lists {
        raw.add(raw_size_bytes(list.len()));
    }
    let raw_total = raw.total();

    let mut codecs = Vec::with_capacity(registry.len());
    for descriptor in registry.descriptors() {
        let sizes = measure(descriptor, lists).inspect_err(|e| {
            log::error!("codec '{}' failed during analysis: {e}", descriptor.name());
        })?;
        let summary = sizes.summarize(descriptor.name(), raw_total);
        log_metric!(
            "event" = "analyze",
            "codec" = descriptor.name(),
            "lists" = summary.lists,
            "total_bytes" = summary.total_bytes,
            "ratio_to_raw" = format!("{:.3}", summary.ratio_to_raw),
        );
        codecs.push(summary);
    }

    Ok(AnalysisReport {
        lists: lists.len(),
        integers: lists.iter().map(|l| l.len() as u64).sum(),
        raw: raw.summarize(RAW_BASELINE, raw_total),
        codecs,
    })
}

fn measure(descriptor: &CodecDescriptor, lists: &[Vec<u32>]) -> Result<SizeDistribution, CodecError> {
    let codec = descriptor.codec();
    let mut sizes = SizeDistribution::default();
    for list in lists {
        // Encoding may rewrite its input, so each codec sees a fresh copy.
        let mut working = list.clone();
        let encoded = codec
            .encode_to_vec(&mut working)
            .map_err(|e| e.at(Stage::Encode))?;
        let recovered = codec
            .decode_to_vec(&encoded, list.len())
            .map_err(|e| e.at(Stage::Decode))?;
        check_round_trip(list, &recovered).map_err(|e| e.at(Stage::Compare))?;
        sizes.add(encoded.len() as u64 * 4);
    }
    Ok(sizes)
}

//==================================================================================
// 4. Unit Tests
//==================================================================================
#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::traits::IntegerCodec;

    fn corpus() -> Vec<Vec<u32>> {
        vec![
            vec![1],
            vec![1, 2, 3, 4],
            (0..100).map(|i| i * 3).collect(),
            (0..1000).map(|i| 5_000_000 + i * 17).collect(),
        ]
    }

    #[test]
    fn test_quantiles_use_nearest_rank() {
        let mut dist = SizeDistribution::default();
        assert_eq!(dist.quantile(0.5), 0);
        for size in [40, 10, 30, 20] {
            dist.add(size);
        }
        assert_eq!(dist.total(), 100);
        assert_eq!(dist.quantile(0.5), 20);
        assert_eq!(dist.quantile(0.75), 30);
        assert_eq!(dist.quantile(0.99), 40);
        assert_eq!(dist.quantile(0.0), 10);
    }

    #[test]
    fn test_raw_baseline_counts_length_prefix() {
        let registry = CodecRegistry::with_defaults().unwrap();
        let report = analyze(&registry, &corpus()).unwrap();

        assert_eq!(report.lists, 4);
        assert_eq!(report.integers, 1105);
        assert_eq!(report.raw.scheme, RAW_BASELINE);
        assert_eq!(report.raw.total_bytes, 8 + 20 + 404 + 4004);
        assert_eq!(report.raw.p50, 20);
        assert_eq!(report.raw.p99, 4004);
        assert_eq!(report.raw.ratio_to_raw, 1.0);
    }

    #[test]
    fn test_every_codec_is_summarised_with_real_sizes() {
        let registry = CodecRegistry::with_defaults().unwrap();
        let lists = corpus();
        let report = analyze(&registry, &lists).unwrap();

        let names: Vec<_> = report.codecs.iter().map(|s| s.scheme.as_str()).collect();
        assert_eq!(names, registry.names().collect::<Vec<_>>());

        for (summary, descriptor) in report.codecs.iter().zip(registry.descriptors()) {
            let expected: u64 = lists
                .iter()
                .map(|l| {
                    let words = descriptor.codec().encode_to_vec(&mut l.clone()).unwrap();
                    words.len() as u64 * 4
                })
                .sum();
            assert_eq!(summary.total_bytes, expected, "codec '{}'", summary.scheme);
            assert_eq!(summary.lists, lists.len());
        }

        // `copy` is the raw layout itself; the delta codecs must beat it here.
        let copy = report.codecs.iter().find(|s| s.scheme == "copy").unwrap();
        assert_eq!(copy.total_bytes, report.raw.total_bytes);
        let bp32 = report.codecs.iter().find(|s| s.scheme == "bp32").unwrap();
        assert!(bp32.ratio_to_raw < 0.5);
    }

    #[test]
    fn test_empty_corpus() {
        let registry = CodecRegistry::with_defaults().unwrap();
        let report = analyze(&registry, &[]).unwrap();
        assert_eq!(report.raw.total_bytes, 0);
        assert!(report.codecs.iter().all(|s| s.total_bytes == 0 && s.p99 == 0));
        assert!(report.to_string().contains("-----bp32-----"));
    }

    /// Decodes everything as zeros.
    struct BlankingCodec;

    impl IntegerCodec for BlankingCodec {
        fn name(&self) -> &'static str {
            "blanking"
        }

        fn max_encoded_len(&self, _n: usize) -> usize {
            1
        }

        fn encode(&self, input: &mut [u32], output: &mut [u32]) -> Result<usize, CodecError> {
            output[0] = input.len() as u32;
            Ok(1)
        }

        fn decode(&self, input: &[u32], output: &mut [u32]) -> Result<usize, CodecError> {
            let count = input[0] as usize;
            output[..count].fill(0);
            Ok(count)
        }
    }

    #[test]
    fn test_lossy_codec_aborts_analysis() {
        let registry = CodecRegistry::builder()
            .register(Arc::new(BlankingCodec))
            .unwrap()
            .build();
        let err = analyze(&registry, &corpus()).unwrap_err();
        assert_eq!(err.stage(), Some(Stage::Compare));
        assert!(matches!(err.root(), CodecError::RoundTripMismatch { .. }));
    }
}

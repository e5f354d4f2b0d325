// In benches/codec_bench.rs

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use postings_codec::CodecRegistry;

// --- Synthetic posting lists ---

/// Dense list: small gaps, the common case for frequent terms.
fn generate_dense_postings(size: usize) -> Vec<u32> {
    let mut acc = 0u32;
    (0..size as u32)
        .map(|i| {
            acc += 1 + (i.wrapping_mul(2_654_435_761) >> 29);
            acc
        })
        .collect()
}

/// Sparse list: gaps in the thousands, the common case for rare terms.
fn generate_sparse_postings(size: usize) -> Vec<u32> {
    let mut acc = 0u32;
    (0..size as u32)
        .map(|i| {
            acc += 1000 + (i.wrapping_mul(2_654_435_761) >> 22);
            acc
        })
        .collect()
}

// --- Benchmark Suite ---

const BENCH_DATA_SIZE: usize = 65536; // integers

fn bench_codecs(c: &mut Criterion) {
    let registry = CodecRegistry::with_defaults().unwrap();
    let inputs = [
        ("Dense", generate_dense_postings(BENCH_DATA_SIZE)),
        ("Sparse", generate_sparse_postings(BENCH_DATA_SIZE)),
    ];

    let mut group = c.benchmark_group("Codec Comparison");
    group.throughput(Throughput::Elements(BENCH_DATA_SIZE as u64));

    for (label, data) in &inputs {
        for descriptor in registry.descriptors() {
            let codec = descriptor.codec();
            let mut output = vec![0u32; codec.max_encoded_len(data.len())];

            // Encoding may rewrite its input, so every iteration gets a fresh copy.
            group.bench_function(format!("Encode {} ({label})", descriptor.name()), |b| {
                b.iter(|| {
                    let mut working = data.clone();
                    black_box(codec.encode(black_box(&mut working), &mut output).unwrap())
                })
            });

            let encoded = codec.encode_to_vec(&mut data.clone()).unwrap();
            let mut recovered = vec![0u32; data.len()];
            group.bench_function(format!("Decode {} ({label})", descriptor.name()), |b| {
                b.iter(|| black_box(codec.decode(black_box(&encoded), &mut recovered).unwrap()))
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_codecs);
criterion_main!(benches);

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use huffwire::codec::{Decoder, Encoder};
use huffwire::entropy::WeightedAlphabet;
use std::io::Cursor;

fn generate_text(size: usize, kind: &str) -> Vec<u8> {
    match kind {
        "alnum" => (0..size)
            .map(|i| b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789"[i % 62])
            .collect(),
        "latin1" => (0..size).map(|i| if i % 5 == 0 { 0xE9 } else { b'a' + (i % 26) as u8 }).collect(),
        _ => (0..size).map(|i| (i.wrapping_mul(31) % 256) as u8).collect(),
    }
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    for &size in &[16usize, 256, 4096] {
        for kind in ["alnum", "latin1", "binary"] {
            let data = generate_text(size, kind);
            group.throughput(Throughput::Bytes(size as u64));
            group.bench_with_input(
                BenchmarkId::new(kind, size),
                &data,
                |b, data| {
                    b.iter(|| {
                        let mut encoder = Encoder::new(Vec::with_capacity(size));
                        encoder.write_encoded(data).unwrap();
                        black_box(encoder.finish().unwrap());
                    });
                },
            );
        }
    }

    group.bench_function("symbols", |b| {
        b.iter(|| {
            let mut encoder = Encoder::new(Vec::with_capacity(4096));
            for v in (0..1024u32).map(|i| i.wrapping_mul(2_654_435_761)) {
                encoder.write_symbol(v).unwrap();
            }
            black_box(encoder.finish().unwrap());
        });
    });

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    for &size in &[16usize, 256, 4096] {
        for kind in ["alnum", "latin1", "binary"] {
            let mut encoder = Encoder::new(Vec::new());
            encoder.write_encoded(generate_text(size, kind)).unwrap();
            let encoded = encoder.finish().unwrap();

            group.throughput(Throughput::Bytes(size as u64));
            group.bench_with_input(
                BenchmarkId::new(kind, size),
                &encoded,
                |b, encoded| {
                    b.iter(|| {
                        let mut decoder = Decoder::new(Cursor::new(encoded.as_slice()));
                        black_box(decoder.read_value().unwrap());
                    });
                },
            );
        }
    }

    group.finish();
}

fn bench_table_build(c: &mut Criterion) {
    c.bench_function("seal_257_symbols", |b| {
        b.iter(|| {
            let mut alphabet = WeightedAlphabet::new(257);
            alphabet.bump_range(b'a' as usize, b'z' as usize, 30).unwrap();
            alphabet.bump_range(128, 255, 5).unwrap();
            black_box(alphabet.seal().unwrap());
        });
    });
}

criterion_group!(benches, bench_encode, bench_decode, bench_table_build);
criterion_main!(benches);

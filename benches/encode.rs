use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rust_qr_encoder::{ECLevel, EncodeHints, QrWriter, encode};

fn bench_encode_small(c: &mut Criterion) {
    c.bench_function("encode_hello_world_v1_l", |b| {
        b.iter(|| encode(black_box("HELLO WORLD"), ECLevel::L))
    });
}

fn bench_encode_url(c: &mut Criterion) {
    let url = "https://github.com/rizwankce/RustQR?utm_source=bench&utm_medium=criterion";
    c.bench_function("encode_url_byte_m", |b| {
        b.iter(|| encode(black_box(url), ECLevel::M))
    });
}

fn bench_encode_by_level(c: &mut Criterion) {
    let text = "0123456789".repeat(40);
    let mut group = c.benchmark_group("encode_numeric_400");
    for level in [ECLevel::L, ECLevel::M, ECLevel::Q, ECLevel::H] {
        group.bench_with_input(BenchmarkId::from_parameter(level), &level, |b, &level| {
            b.iter(|| encode(black_box(&text), level))
        });
    }
    group.finish();
}

fn bench_encode_large(c: &mut Criterion) {
    let text = "a".repeat(2000);
    c.bench_function("encode_2000_bytes_l", |b| {
        b.iter(|| encode(black_box(&text), ECLevel::L))
    });
}

fn bench_render(c: &mut Criterion) {
    let hints = EncodeHints::default();
    c.bench_function("write_png_size_512", |b| {
        b.iter(|| QrWriter::encode(black_box("HELLO WORLD"), 512, 512, &hints))
    });
}

criterion_group!(
    benches,
    bench_encode_small,
    bench_encode_url,
    bench_encode_by_level,
    bench_encode_large,
    bench_render
);
criterion_main!(benches);

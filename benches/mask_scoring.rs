use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rust_qr_encoder::encoder::mask::mask_penalty;
use rust_qr_encoder::encoder::qr_encoder::choose_mask_pattern;
use rust_qr_encoder::utils::BitSequence;
use rust_qr_encoder::{ECLevel, Version, encode};

fn pseudo_random_bits(num_bytes: usize) -> BitSequence {
    let mut bits = BitSequence::new();
    let mut state = 0x2545_F491u32;
    for _ in 0..num_bytes {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        bits.append_bits(state & 0xFF, 8).unwrap();
    }
    bits
}

fn bench_penalty(c: &mut Criterion) {
    let mut group = c.benchmark_group("mask_penalty");
    for text_len in [10usize, 300, 2000] {
        let symbol = encode(&"a".repeat(text_len), ECLevel::L).unwrap();
        let width = symbol.matrix_width();
        group.bench_with_input(BenchmarkId::from_parameter(width), symbol.matrix(), |b, m| {
            b.iter(|| mask_penalty(black_box(m)))
        });
    }
    group.finish();
}

fn bench_choose_mask(c: &mut Criterion) {
    let mut group = c.benchmark_group("choose_mask_pattern");
    for number in [1u32, 10, 25, 40] {
        let version = Version::for_number(number).unwrap();
        let bits = pseudo_random_bits(version.total_codewords());
        group.bench_with_input(BenchmarkId::from_parameter(number), &bits, |b, bits| {
            b.iter(|| choose_mask_pattern(black_box(bits), ECLevel::M, version))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_penalty, bench_choose_mask);
criterion_main!(benches);

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use unblack_grid::BitGrid;
use unblack_io::pbm::{decode_image_pbm, encode_image_pbm, PbmEncoding};

fn checkerboard() -> BitGrid {
    let (width, height) = (1024, 768);
    let data = (0..width * height)
        .map(|i| (((i % width) + (i / width)) % 2) as u8)
        .collect::<Vec<_>>();
    BitGrid::from_bits([width, height].into(), &data).unwrap()
}

fn bench_pbm(c: &mut Criterion) {
    let mut group = c.benchmark_group("Pbm");

    let grid = checkerboard();
    let plain = encode_image_pbm(&grid, PbmEncoding::Plain);
    let raw = encode_image_pbm(&grid, PbmEncoding::Raw);

    group.bench_function("decode_plain", |b| {
        b.iter(|| black_box(decode_image_pbm(black_box(&plain))).unwrap())
    });

    group.bench_function("decode_raw", |b| {
        b.iter(|| black_box(decode_image_pbm(black_box(&raw))).unwrap())
    });

    group.bench_function("encode_plain", |b| {
        b.iter(|| black_box(encode_image_pbm(black_box(&grid), PbmEncoding::Plain)))
    });

    group.bench_function("encode_raw", |b| {
        b.iter(|| black_box(encode_image_pbm(black_box(&grid), PbmEncoding::Raw)))
    });

    group.finish();
}

criterion_group!(benches, bench_pbm);
criterion_main!(benches);

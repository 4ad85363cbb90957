use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::hint::black_box;

use unblack_grid::{BitGrid, GridSize};
use unblack_imgproc::edges::unblack_edges;

fn random_grid(size: GridSize, density: f64) -> BitGrid {
    let mut rng = StdRng::seed_from_u64(42);
    let data = (0..size.area())
        .map(|_| rng.random_bool(density) as u8)
        .collect::<Vec<_>>();
    BitGrid::from_bits(size, &data).unwrap()
}

fn bench_unblack_edges(c: &mut Criterion) {
    let mut group = c.benchmark_group("UnblackEdges");

    for (width, height) in [(256, 224), (512, 448), (1024, 896)].iter() {
        group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

        let parameter_string = format!("{}x{}", width, height);
        let size: GridSize = [*width, *height].into();

        let all_black = BitGrid::from_size_val(size, true).unwrap();
        let noisy = random_grid(size, 0.6);

        group.bench_with_input(
            BenchmarkId::new("all_black", &parameter_string),
            &all_black,
            |b, grid| {
                b.iter_batched(
                    || grid.clone(),
                    |mut grid| unblack_edges(black_box(&mut grid)).unwrap(),
                    criterion::BatchSize::LargeInput,
                )
            },
        );

        group.bench_with_input(
            BenchmarkId::new("noisy", &parameter_string),
            &noisy,
            |b, grid| {
                b.iter_batched(
                    || grid.clone(),
                    |mut grid| unblack_edges(black_box(&mut grid)).unwrap(),
                    criterion::BatchSize::LargeInput,
                )
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_unblack_edges);
criterion_main!(benches);

//! Render-ladder benchmarks: every variant over several frame sizes, plus
//! the row-parallel renderer.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use spinwheel::{Frame, Spin, Variant};

const FRAME_DIMS: &[usize] = &[
    256,  // 256 KiB - cache resident
    512,  // 1 MiB - L2/L3
    1024, // 4 MiB - L3 and beyond
];

fn benchmark_render_ladder(c: &mut Criterion) {
    for &dim in FRAME_DIMS {
        let mut group = c.benchmark_group(format!("Spin {dim}x{dim}"));
        group.throughput(Throughput::Bytes(
            (dim * dim * std::mem::size_of::<u32>()) as u64,
        ));

        for variant in Variant::ALL {
            group.bench_with_input(
                BenchmarkId::new(variant.name(), dim),
                &dim,
                |b, &dim| {
                    let mut spin = Spin::new();
                    let mut frame = Frame::new(dim);
                    b.iter(|| {
                        spin.render(variant, black_box(&mut frame), 1);
                        black_box(frame.get(0, 0))
                    })
                },
            );
        }

        group.bench_with_input(BenchmarkId::new("par_simd_v6", dim), &dim, |b, &dim| {
            let mut spin = Spin::new();
            let mut frame = Frame::new(dim);
            b.iter(|| {
                spin.par_render(black_box(&mut frame), 1);
                black_box(frame.get(0, 0))
            })
        });

        group.finish();
    }
}

criterion_group!(benches, benchmark_render_ladder);
criterion_main!(benches);

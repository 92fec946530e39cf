use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use streetpano_core::RgbImage;
use streetpano_projection::{project, project_plan, CropParams, CropRequest};

fn synthetic_pano(width: usize, height: usize) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        [(x * 7 % 251) as u8, (y * 13 % 241) as u8, ((x + y) % 256) as u8]
    })
    .expect("pano")
}

fn bench_single_crop(c: &mut Criterion) {
    let pano = synthetic_pano(4096, 2048);
    let mut group = c.benchmark_group("project_single");
    for size in [256usize, 512, 1024] {
        let request = CropRequest::new(135.0, 10.0, 90.0, size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &request, |b, request| {
            b.iter(|| project(black_box(&pano.view()), black_box(request)).expect("crop"))
        });
    }
    group.finish();
}

fn bench_default_sweep(c: &mut Criterion) {
    let pano = synthetic_pano(4096, 2048);
    let plan = CropParams::default().plan().expect("plan");
    c.bench_function("project_default_sweep", |b| {
        b.iter(|| project_plan(black_box(&pano.view()), black_box(&plan)).expect("sweep"))
    });
}

criterion_group!(benches, bench_single_crop, bench_default_sweep);
criterion_main!(benches);

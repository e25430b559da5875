use criterion::{criterion_group, criterion_main, Criterion};

use termbrot_core::{Complex, Julia, Mandelbrot, Viewport};
use termbrot_render::build_grid;

fn bench_default_view(c: &mut Criterion) {
    let mandelbrot = Mandelbrot::new(100);
    let viewport = Viewport::default_mandelbrot(50, 200);

    c.bench_function("grid_50x200_100iter", |b| {
        b.iter(|| build_grid(&mandelbrot, &viewport));
    });
}

fn bench_deep_iterations(c: &mut Criterion) {
    let mandelbrot = Mandelbrot::new(5000);
    let viewport = Viewport::new(Complex::new(-0.743_643_887, 0.131_825_904), 500.0, 60, 240)
        .expect("valid viewport");

    c.bench_function("grid_60x240_5000iter_seahorse", |b| {
        b.iter(|| build_grid(&mandelbrot, &viewport));
    });
}

fn bench_julia(c: &mut Criterion) {
    let julia = Julia::with_default_seed(500);
    let viewport = Viewport::new(Complex::ZERO, 1.0, 50, 200).expect("valid viewport");

    c.bench_function("julia_50x200_500iter", |b| {
        b.iter(|| build_grid(&julia, &viewport));
    });
}

criterion_group!(benches, bench_default_view, bench_deep_iterations, bench_julia);
criterion_main!(benches);

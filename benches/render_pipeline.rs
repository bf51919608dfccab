//! Benchmarks for the render pipeline stages.
//!
//! Run with: cargo bench --bench render_pipeline

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use fractal_navigator::core::actions::cancellation::NeverCancel;
use fractal_navigator::core::actions::refine::geometry::PixelGeometry;
use fractal_navigator::core::actions::refine::oversample::ColourSampler;
use fractal_navigator::core::actions::refine::progressive::refine_slice;
use fractal_navigator::core::actions::render_pattern::{PatternStyle, render_pattern};
use fractal_navigator::core::data::pixel_rect::PixelRect;
use fractal_navigator::core::data::plane_rect::PlaneRect;
use fractal_navigator::core::data::point::Point;
use fractal_navigator::core::fractals::continuous::algorithm::ContinuousFractal;
use fractal_navigator::core::fractals::discrete::presets::PatternPreset;
use fractal_navigator::core::gradient::gradient::DEFAULT_DENSITY;
use fractal_navigator::core::gradient::presets::GradientPreset;

const WIDTH: u32 = 160;
const HEIGHT: u32 = 120;

fn bench_refine_slice(c: &mut Criterion) {
    let fractal = ContinuousFractal::mandelbrot();
    let gradient = GradientPreset::Classic
        .builder(f64::from(fractal.max_iterations()))
        .bezier(DEFAULT_DENSITY)
        .build()
        .unwrap();
    let image = PixelRect::with_size(Point { x: 0, y: 0 }, WIDTH, HEIGHT).unwrap();
    let geometry = PixelGeometry::from_bounds(fractal.natural_bounds(), WIDTH, HEIGHT);

    let mut group = c.benchmark_group("refine_slice");
    for sample in [1, 3] {
        let sampler = ColourSampler::new(
            &fractal,
            &gradient,
            sample,
            geometry.delta_x(),
            geometry.delta_y(),
        );
        for steps in [0, 4] {
            group.bench_with_input(
                BenchmarkId::new(format!("sample_{}", sample), steps),
                &steps,
                |b, &steps| {
                    b.iter(|| {
                        refine_slice(image, geometry, steps, &sampler, &NeverCancel, |_, _| {})
                            .unwrap()
                    })
                },
            );
        }
    }
    group.finish();
}

fn bench_render_pattern(c: &mut Criterion) {
    let fractal = PatternPreset::Sponge.fractal().unwrap();
    let image = PixelRect::with_size(Point { x: 0, y: 0 }, 243, 243).unwrap();

    c.bench_function("render_pattern_sponge_243", |b| {
        b.iter(|| {
            render_pattern(
                &fractal,
                black_box(PlaneRect::unit_square()),
                image,
                PatternStyle::default(),
                &NeverCancel,
            )
            .unwrap()
        })
    });
}

fn bench_gradient_interpolate(c: &mut Criterion) {
    let gradient = GradientPreset::Classic
        .builder(500.0)
        .bezier(DEFAULT_DENSITY)
        .build()
        .unwrap();

    c.bench_function("gradient_interpolate_500", |b| {
        b.iter(|| {
            for position in 0..500 {
                black_box(gradient.interpolate(black_box(f64::from(position) + 0.5)));
            }
        })
    });
}

criterion_group!(
    benches,
    bench_refine_slice,
    bench_render_pattern,
    bench_gradient_interpolate
);
criterion_main!(benches);

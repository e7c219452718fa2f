use criterion::{Criterion, black_box, criterion_group, criterion_main};
use glam::Vec2;
use starstream_math::{Rect, parallax, parallax_delta, visual_scale};

fn bench_parallax_scalar(c: &mut Criterion) {
    let delta = black_box(4.25_f32);
    let depth = black_box(9.0_f32);
    let vp = black_box(10.0_f32);
    c.bench_function("parallax_scalar", |bencher| {
        bencher.iter(|| black_box(parallax(delta, depth, vp)))
    });
}

fn bench_parallax_delta_vec2(c: &mut Criterion) {
    let delta = black_box(Vec2::new(-3.0, 7.5));
    let depth = black_box(4.2_f32);
    let vp = black_box(10.0_f32);
    c.bench_function("parallax_delta_vec2", |bencher| {
        bencher.iter(|| black_box(parallax_delta(delta, depth, vp)))
    });
}

fn bench_visual_scale(c: &mut Criterion) {
    let depth = black_box(9.5_f32);
    let vp = black_box(10.0_f32);
    c.bench_function("visual_scale", |bencher| {
        bencher.iter(|| black_box(visual_scale(depth, vp)))
    });
}

fn bench_rect_contains(c: &mut Criterion) {
    let rect = black_box(Rect::new(Vec2::new(-100.0, -100.0), Vec2::new(100.0, 100.0)));
    let p = black_box(Vec2::new(42.0, -17.0));
    c.bench_function("rect_contains", |bencher| {
        bencher.iter(|| black_box(rect.contains(p)))
    });
}

fn bench_parallax_layer_sweep(c: &mut Criterion) {
    // One tick's worth of displacement applied across a full layer.
    let delta = black_box(Vec2::new(0.2, -4.8));
    let vp = black_box(10.0_f32);
    c.bench_function("parallax_layer_sweep_1000", |bencher| {
        bencher.iter(|| {
            let mut acc = Vec2::ZERO;
            for i in 0..1000 {
                let depth = 9.0 + (i as f32) * 0.000_9;
                acc += parallax_delta(delta, depth, vp);
            }
            black_box(acc)
        })
    });
}

criterion_group!(
    benches,
    bench_parallax_scalar,
    bench_parallax_delta_vec2,
    bench_visual_scale,
    bench_rect_contains,
    bench_parallax_layer_sweep,
);
criterion_main!(benches);

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sw_renderer::basics::PointD;
use sw_renderer::color::Rgba8;
use sw_renderer::rect_rasterizer::RectRasterizer;
use sw_renderer::rect_shape::RectShape;
use sw_renderer::surface::{PixelSurface, Surface};

fn bench_rect(c: &mut Criterion) {
    let mut g = c.benchmark_group("rect");

    let w = 1920u32;
    let h = 1080u32;
    let ras = RectRasterizer::new();

    let base = RectShape::new(PointD::new(960.0, 540.0), 400.0, 300.0)
        .with_fill(Rgba8::new_opaque(255, 0, 0));
    let stroked = base.with_stroke(8.0, Rgba8::BLACK);
    let angle_30 = std::f64::consts::FRAC_PI_6;
    let angle_45 = std::f64::consts::FRAC_PI_4;

    g.bench_function("axis_aligned_fill", |b| {
        let mut surface = Surface::new(w, h);
        b.iter(|| ras.draw(&mut surface, black_box(&base)));
    });

    g.bench_function("axis_aligned_stroked", |b| {
        let mut surface = Surface::new(w, h);
        b.iter(|| ras.draw(&mut surface, black_box(&stroked)));
    });

    g.bench_function("rotated_30deg_fill", |b| {
        let mut surface = Surface::new(w, h);
        let shape = base.with_rotation(angle_30);
        b.iter(|| ras.draw(&mut surface, black_box(&shape)));
    });

    g.bench_function("rotated_45deg_thick_stroke", |b| {
        let mut surface = Surface::new(w, h);
        let shape = stroked.with_rotation(angle_45);
        b.iter(|| ras.draw(&mut surface, black_box(&shape)));
    });

    g.bench_function("rotated_45deg_hairline", |b| {
        let mut surface = Surface::new(w, h);
        let shape = base
            .with_fill(Rgba8::TRANSPARENT)
            .with_stroke(1.0, Rgba8::BLACK)
            .with_rotation(angle_45);
        b.iter(|| ras.draw(&mut surface, black_box(&shape)));
    });

    g.bench_function("clear_full_surface", |b| {
        let mut surface = Surface::new(w, h);
        let full = RectShape::new(PointD::new(960.0, 540.0), w as f64, h as f64);
        b.iter(|| ras.clear(&mut surface, black_box(&full)));
    });

    g.bench_function("clear_per_pixel", |b| {
        let mut surface = Surface::new(w, h);
        b.iter(|| {
            surface.clear_all();
            ras.clear(&mut surface, black_box(&base.with_rotation(angle_30)));
        });
    });

    g.finish();
}

criterion_group!(benches, bench_rect);
criterion_main!(benches);

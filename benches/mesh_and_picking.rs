use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use edu_viz::catalog::{ShapeKind, ORBITS};
use edu_viz::core::window::WindowDimensions;
use edu_viz::geometry::mesh::{shape_mesh, uv_sphere};
use edu_viz::math::Ray;
use edu_viz::scenes::globe::star_field;
use edu_viz::scenes::SolarModel;
use glam::{Vec2, Vec3};
use std::f32::consts::PI;

/// Deterministic direction spread over the front hemisphere
fn direction(seed: u32) -> Vec3 {
    let theta = (seed as f32 * 0.123456) % (2.0 * PI);
    let phi = (seed as f32 * 0.789012) % (0.5 * PI);
    Vec3::new(phi.sin() * theta.cos(), phi.sin() * theta.sin(), -phi.cos())
}

/// Benchmark: building each explorer shape (what a shape switch costs)
fn bench_shape_meshes(c: &mut Criterion) {
    let mut group = c.benchmark_group("shape_mesh");
    for kind in ShapeKind::ALL {
        group.bench_with_input(BenchmarkId::from_parameter(kind), &kind, |b, &kind| {
            b.iter(|| black_box(shape_mesh(black_box(kind))))
        });
    }
    group.finish();
}

/// Benchmark: triangle-level ray test against spheres of growing resolution
fn bench_sphere_intersect(c: &mut Criterion) {
    let mut group = c.benchmark_group("sphere_intersect_local");
    for segments in [16u32, 32, 64] {
        let mesh = uv_sphere(1.0, segments, segments);
        group.bench_with_input(BenchmarkId::new("segments", segments), &segments, |b, _| {
            b.iter(|| {
                let mut hits = 0;
                for i in 0..100 {
                    let ray = Ray::new(Vec3::new(0.0, 0.0, 3.0), direction(i));
                    if mesh.intersect_local(&ray).is_some() {
                        hits += 1;
                    }
                }
                black_box(hits)
            })
        });
    }
    group.finish();
}

/// Benchmark: a click on the solar system, hit and miss
fn bench_solar_click(c: &mut Criterion) {
    let mut model = SolarModel::new(WindowDimensions::new(1280, 800));
    let target = ORBITS[4].id;
    let hit = model
        .camera()
        .view_proj()
        .project_point3(model.planet_position(target).unwrap_or(Vec3::ZERO))
        .truncate();

    c.bench_function("solar_click_hit", |b| b.iter(|| black_box(model.click(black_box(hit)))));
    c.bench_function("solar_click_miss", |b| {
        b.iter(|| black_box(model.click(black_box(Vec2::new(-0.95, 0.95)))))
    });
}

/// Benchmark: generating the globe's star field
fn bench_star_field(c: &mut Criterion) {
    c.bench_function("star_field", |b| b.iter(|| black_box(star_field(black_box(42)))));
}

criterion_group!(
    benches,
    bench_shape_meshes,
    bench_sphere_intersect,
    bench_solar_click,
    bench_star_field
);
criterion_main!(benches);

use std::num::{NonZeroU32, NonZeroUsize};
use std::time::Duration;

use criterion::{Criterion, criterion_group, criterion_main};
use pathlight::{
    Camera, Material, RenderOptions, RenderParams, Scene, Sphere,
    geometry::{WorldPoint, WorldVector},
    render,
    util::Color,
};

fn criterion_benchmark(c: &mut Criterion) {
    let camera = Camera::builder()
        .eye(WorldPoint::new(1.0, 1.0, 4.0))
        .canvas_origin(WorldPoint::new(0.0, 0.0, 0.0))
        .canvas_width(2.0)
        .canvas_height(2.0)
        .pixels_per_unit(NonZeroU32::new(64).unwrap())
        .focal_length(6.0)
        .samples_per_ray(NonZeroU32::new(8).unwrap())
        .build()
        .unwrap();

    let floor = pathlight::Plane::new(
        WorldPoint::origin(),
        WorldVector::new(0.0, 1.0, 0.0),
        Material::diffuse(Color::new(0.6, 0.6, 0.6)),
    )
    .unwrap();
    let light = Sphere::new(
        WorldPoint::new(1.0, 8.0, -4.0),
        4.0,
        Material::emissive(Color::new(1.0, 1.0, 1.0), 2.0).unwrap(),
    )
    .unwrap();
    let ball = Sphere::new(
        WorldPoint::new(1.0, 0.8, -3.0),
        0.8,
        Material::metal(Color::new(0.9, 0.9, 0.9), 0.1).unwrap(),
    )
    .unwrap();

    let params = RenderParams::new(
        NonZeroU32::new(6).unwrap(),
        Color::new(0.02, 0.02, 0.05),
        100.0,
    )
    .unwrap();
    let scene = Scene::new(
        camera,
        vec![floor.into(), light.into(), ball.into()],
        params,
    );
    let options = RenderOptions {
        threads: NonZeroUsize::new(num_cpus::get()).unwrap_or(NonZeroUsize::MIN),
        seed: Some(1),
    };

    c.bench_function("render_scene", |b| {
        b.iter(|| render(&scene, &options).unwrap())
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(20).measurement_time(Duration::from_secs(60));
    targets = criterion_benchmark
}
criterion_main!(benches);

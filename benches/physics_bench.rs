use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use impulse2d::*;
use std::hint::black_box;

const DT: f32 = 1.0 / 60.0;

/// Circles dropped into a box of four planes.
fn prepare_world(body_count: usize) -> PhysicsWorld {
    let mut world = PhysicsWorld::new(DT);
    world.add_actor(Body::plane(Vec2::Y, 0.0).unwrap());
    world.add_actor(Body::plane(Vec2::X, -50.0).unwrap());
    world.add_actor(Body::plane(-Vec2::X, -50.0).unwrap());
    world.add_actor(Body::plane(-Vec2::Y, -200.0).unwrap());

    let columns = 32;
    for i in 0..body_count {
        let x = -45.0 + (i % columns) as f32 * 2.9;
        let y = 2.0 + (i / columns) as f32 * 2.9;
        world.add_actor(
            Body::circle(Vec2::new(x, y), Vec2::new(1.0, 0.0), 1.0, 1.0, Color::WHITE).unwrap(),
        );
    }
    world
}

fn bench_world_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("world_step");
    for &count in &[32usize, 128, 512] {
        group.bench_with_input(BenchmarkId::new("update", count), &count, |b, &count| {
            b.iter(|| {
                let mut world = prepare_world(count);
                world.update(black_box(DT));
            })
        });
    }
    group.finish();
}

fn bench_narrowphase(c: &mut Criterion) {
    let mut group = c.benchmark_group("narrowphase");
    let count = 1000;

    let pairs: Vec<(Body, Body)> = (0..count)
        .map(|i| {
            let x = i as f32 * 4.0;
            let angle = i as f32 * 0.01;
            (
                Body::obb(Vec2::new(x, 0.0), Vec2::ZERO, Vec2::ONE, angle, 1.0, Color::RED)
                    .unwrap(),
                Body::obb(Vec2::new(x + 1.6, 0.3), Vec2::ZERO, Vec2::ONE, -angle, 1.0, Color::RED)
                    .unwrap(),
            )
        })
        .collect();

    group.bench_function("obb_sat", |b| {
        b.iter(|| {
            let mut manifold = Manifold::new(BodyId::new(0, 0), BodyId::new(1, 0));
            for (a, other) in &pairs {
                black_box(NarrowPhase::detect(a, other, &mut manifold));
            }
        })
    });

    group.bench_function("circle_pairs", |b| {
        let circles: Vec<Body> = (0..count)
            .map(|i| {
                Body::circle(Vec2::new(i as f32 * 1.5, 0.0), Vec2::ZERO, 1.0, 1.0, Color::WHITE)
                    .unwrap()
            })
            .collect();
        b.iter(|| {
            let mut manifold = Manifold::new(BodyId::new(0, 0), BodyId::new(1, 0));
            for window in circles.windows(2) {
                black_box(NarrowPhase::detect(&window[0], &window[1], &mut manifold));
            }
        })
    });

    group.finish();
}

criterion_group!(benches, bench_world_step, bench_narrowphase);
criterion_main!(benches);

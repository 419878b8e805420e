//! ECS microbenchmarks using Criterion.
//!
//! These benchmarks measure individual ECS operations in isolation:
//! - Entity create/destroy
//! - View iteration
//! - Component emplace/remove

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use sparse_ecs::{View, World};
use sparse_ecs_bench::components::*;

// =============================================================================
// Create Benchmarks
// =============================================================================

fn bench_create(c: &mut Criterion) {
    let mut group = c.benchmark_group("create");

    for count in [100, 1_000, 10_000] {
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("single_component", count), &count, |b, &n| {
            b.iter(|| {
                let mut world = World::new();
                for _ in 0..n {
                    black_box(world.create((Position::default(),)).unwrap());
                }
            });
        });

        group.bench_with_input(BenchmarkId::new("four_components", count), &count, |b, &n| {
            b.iter(|| {
                let mut world = World::new();
                for _ in 0..n {
                    black_box(
                        world
                            .create((Transform::default(), Position::default(), Rotation::default(), Velocity::default()))
                            .unwrap(),
                    );
                }
            });
        });
    }

    group.finish();
}

// =============================================================================
// Iteration Benchmarks
// =============================================================================

fn bench_simple_iter(c: &mut Criterion) {
    let mut group = c.benchmark_group("simple_iter");

    for count in [1_000, 10_000, 100_000] {
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("pos_vel", count), &count, |b, &n| {
            let mut world = World::new();
            for i in 0..n {
                world
                    .create((Position { x: i as f32, y: 0.0, z: 0.0 }, Velocity { x: 1.0, y: 0.0, z: 0.0 }))
                    .unwrap();
            }
            let view: View<(Position, Velocity)> = world.view();

            b.iter(|| {
                let mut entities = Vec::new();
                view.each(&world, |e, _| {
                    entities.push(e);
                    true
                });
                for e in entities {
                    let mut pos = *world.get::<Position>(e).unwrap();
                    let vel = *world.get::<Velocity>(e).unwrap();
                    pos.x += vel.x;
                    pos.y += vel.y;
                    pos.z += vel.z;
                    world.emplace(e, pos).unwrap();
                }
            });
        });

        group.bench_with_input(BenchmarkId::new("single", count), &count, |b, &n| {
            let mut world = World::new();
            for i in 0..n {
                world.create((Position { x: i as f32, y: 0.0, z: 0.0 },)).unwrap();
            }
            let view: View<(Position,)> = world.view();

            b.iter(|| {
                let mut entities = Vec::new();
                view.each(&world, |e, _| {
                    entities.push(e);
                    true
                });
                for e in entities {
                    let mut pos = *world.get::<Position>(e).unwrap();
                    pos.x += 1.0;
                    world.emplace(e, pos).unwrap();
                }
            });
        });

        group.bench_with_input(BenchmarkId::new("four_components", count), &count, |b, &n| {
            let mut world = World::new();
            for _ in 0..n {
                world
                    .create((Transform::default(), Position::default(), Rotation::default(), Velocity::default()))
                    .unwrap();
            }
            let view: View<(Position, Velocity, Rotation, Transform)> = world.view();

            b.iter(|| {
                let mut entities = Vec::new();
                view.each(&world, |e, _| {
                    entities.push(e);
                    true
                });
                for e in entities {
                    let mut pos = *world.get::<Position>(e).unwrap();
                    let vel = *world.get::<Velocity>(e).unwrap();
                    pos.x += vel.x;
                    pos.y += vel.y;
                    pos.z += vel.z;
                    world.emplace(e, pos).unwrap();
                }
            });
        });
    }

    group.finish();
}

// =============================================================================
// Fragmented Iteration Benchmarks
// =============================================================================

fn bench_fragmented_iter(c: &mut Criterion) {
    let mut group = c.benchmark_group("fragmented_iter");

    let marker_groups = 26;
    let entities_per_group = 20;
    let total = marker_groups * entities_per_group;

    group.throughput(Throughput::Elements(total as u64));

    group.bench_function("26_marker_groups", |b| {
        let mut world = World::new();

        macro_rules! spawn_group {
            ($marker:ident) => {
                for _ in 0..entities_per_group {
                    world.create((Data { value: 1.0 }, $marker)).unwrap();
                }
            };
        }
        spawn_group!(MarkerA);
        spawn_group!(MarkerB);
        spawn_group!(MarkerC);
        spawn_group!(MarkerD);
        spawn_group!(MarkerE);
        spawn_group!(MarkerF);
        spawn_group!(MarkerG);
        spawn_group!(MarkerH);
        spawn_group!(MarkerI);
        spawn_group!(MarkerJ);
        spawn_group!(MarkerK);
        spawn_group!(MarkerL);
        spawn_group!(MarkerM);
        spawn_group!(MarkerN);
        spawn_group!(MarkerO);
        spawn_group!(MarkerP);
        spawn_group!(MarkerQ);
        spawn_group!(MarkerR);
        spawn_group!(MarkerS);
        spawn_group!(MarkerT);
        spawn_group!(MarkerU);
        spawn_group!(MarkerV);
        spawn_group!(MarkerW);
        spawn_group!(MarkerX);
        spawn_group!(MarkerY);
        spawn_group!(MarkerZ);

        let view: View<(Data,)> = world.view();

        b.iter(|| {
            let mut entities = Vec::new();
            view.each(&world, |e, _| {
                entities.push(e);
                true
            });
            for e in entities {
                let mut data = *world.get::<Data>(e).unwrap();
                data.value *= 2.0;
                world.emplace(e, data).unwrap();
            }
        });
    });

    group.finish();
}

// =============================================================================
// Component Migration Benchmarks
// =============================================================================

fn bench_emplace_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("emplace_remove");

    for count in [100, 1_000, 10_000] {
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("emplace_component", count), &count, |b, &n| {
            b.iter_batched(
                || {
                    let mut world = World::new();
                    let entities: Vec<_> = (0..n).map(|_| world.create((Position::default(),)).unwrap()).collect();
                    (world, entities)
                },
                |(mut world, entities)| {
                    for entity in entities {
                        world.emplace(entity, Velocity::default()).unwrap();
                    }
                },
                criterion::BatchSize::SmallInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("remove_component", count), &count, |b, &n| {
            b.iter_batched(
                || {
                    let mut world = World::new();
                    let entities: Vec<_> = (0..n)
                        .map(|_| world.create((Position::default(), Velocity::default())).unwrap())
                        .collect();
                    (world, entities)
                },
                |(mut world, entities)| {
                    for entity in entities {
                        world.remove::<Velocity>(entity);
                    }
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

// =============================================================================
// Destroy Benchmarks
// =============================================================================

fn bench_destroy(c: &mut Criterion) {
    let mut group = c.benchmark_group("destroy");

    for count in [100, 1_000, 10_000] {
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("single_component", count), &count, |b, &n| {
            b.iter_batched(
                || {
                    let mut world = World::new();
                    let entities: Vec<_> = (0..n).map(|_| world.create((Position::default(),)).unwrap()).collect();
                    (world, entities)
                },
                |(mut world, entities)| {
                    for entity in entities {
                        world.destroy(entity);
                    }
                },
                criterion::BatchSize::SmallInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("four_components", count), &count, |b, &n| {
            b.iter_batched(
                || {
                    let mut world = World::new();
                    let entities: Vec<_> = (0..n)
                        .map(|_| {
                            world
                                .create((
                                    Transform::default(),
                                    Position::default(),
                                    Rotation::default(),
                                    Velocity::default(),
                                ))
                                .unwrap()
                        })
                        .collect();
                    (world, entities)
                },
                |(mut world, entities)| {
                    for entity in entities {
                        world.destroy(entity);
                    }
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

// =============================================================================
// Criterion Configuration
// =============================================================================

criterion_group!(
    benches,
    bench_create,
    bench_simple_iter,
    bench_fragmented_iter,
    bench_emplace_remove,
    bench_destroy,
);

criterion_main!(benches);

//! Physics simulation benchmark scenario.
//!
//! Simulates a physics-heavy workload with:
//! - Tens of thousands of rigid bodies
//! - Position, Velocity, Acceleration integration
//! - Transform matrix updates
//!
//! This scenario tests compute-heavy component updates over large entity
//! counts, and multi-component access patterns.

use crate::components::{Acceleration, DeltaTime, Position, Transform, Velocity};
use crate::scenarios::Scenario;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sparse_ecs::{Entity, View, World};

/// Configuration for the physics benchmark.
pub struct PhysicsConfig {
    /// Number of physics bodies.
    pub body_count: usize,
    /// Fixed timestep for physics integration.
    pub delta_time: f32,
    /// Random seed for reproducibility.
    pub seed: u64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self { body_count: 50_000, delta_time: 1.0 / 120.0, seed: 99999 }
    }
}

fn system_integrate_acceleration(world: &mut World) {
    let dt = world.get_singleton::<DeltaTime>().unwrap().0;
    let view: View<(Acceleration, Velocity)> = world.view();
    let mut entities = Vec::new();
    view.each(world, |e, _| {
        entities.push(e);
        true
    });

    for e in entities {
        let accel = *world.get::<Acceleration>(e).unwrap();
        let mut vel = *world.get::<Velocity>(e).unwrap();
        vel.x += accel.x * dt;
        vel.y += accel.y * dt;
        vel.z += accel.z * dt;
        world.emplace(e, vel).unwrap();
    }
}

fn system_integrate_velocity(world: &mut World) {
    let dt = world.get_singleton::<DeltaTime>().unwrap().0;
    let view: View<(Velocity, Position)> = world.view();
    let mut entities = Vec::new();
    view.each(world, |e, _| {
        entities.push(e);
        true
    });

    for e in entities {
        let vel = *world.get::<Velocity>(e).unwrap();
        let mut pos = *world.get::<Position>(e).unwrap();
        pos.x += vel.x * dt;
        pos.y += vel.y * dt;
        pos.z += vel.z * dt;
        world.emplace(e, pos).unwrap();
    }
}

/// Compute-heavy: rebuild each transform's translation column from its
/// position, then renormalize the diagonal. Real transform systems do this
/// work every frame; it's reproduced here to make the benchmark representative.
fn system_update_transforms(world: &mut World) {
    let view: View<(Position, Transform)> = world.view();
    let mut entities = Vec::new();
    view.each(world, |e, _| {
        entities.push(e);
        true
    });

    for e in entities {
        let pos = *world.get::<Position>(e).unwrap();
        let mut transform = *world.get::<Transform>(e).unwrap();

        transform.matrix[0][3] = pos.x;
        transform.matrix[1][3] = pos.y;
        transform.matrix[2][3] = pos.z;

        let scale = 1.0
            / (transform.matrix[0][0] * transform.matrix[0][0]
                + transform.matrix[1][1] * transform.matrix[1][1]
                + transform.matrix[2][2] * transform.matrix[2][2])
                .sqrt();
        transform.matrix[0][0] *= scale;
        transform.matrix[1][1] *= scale;
        transform.matrix[2][2] *= scale;

        world.emplace(e, transform).unwrap();
    }
}

fn system_enforce_boundaries(world: &mut World) {
    let view: View<(Position, Velocity)> = world.view();
    let mut entities = Vec::new();
    view.each(world, |e, _| {
        entities.push(e);
        true
    });

    let bounds = 1000.0;
    for e in entities {
        let mut pos = *world.get::<Position>(e).unwrap();
        let mut vel = *world.get::<Velocity>(e).unwrap();
        let mut changed = false;

        if pos.x.abs() > bounds {
            pos.x = pos.x.signum() * bounds;
            vel.x = -vel.x * 0.8;
            changed = true;
        }
        if pos.y.abs() > bounds {
            pos.y = pos.y.signum() * bounds;
            vel.y = -vel.y * 0.8;
            changed = true;
        }
        if pos.z.abs() > bounds {
            pos.z = pos.z.signum() * bounds;
            vel.z = -vel.z * 0.8;
            changed = true;
        }

        if changed {
            world.emplace(e, pos).unwrap();
            world.emplace(e, vel).unwrap();
        }
    }
}

/// Physics simulation benchmark scenario.
pub struct PhysicsScenario {
    config: PhysicsConfig,
    world: World,
    rng: ChaCha8Rng,
    bodies: Vec<Entity>,
}

impl PhysicsScenario {
    /// Create a new physics scenario with default config.
    pub fn new() -> Self {
        Self::with_config(PhysicsConfig::default())
    }

    /// Create a new physics scenario with custom config.
    pub fn with_config(config: PhysicsConfig) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(config.seed), world: World::new(), bodies: Vec::new(), config }
    }

    fn spawn_body(&mut self) -> Entity {
        let pos = Position {
            x: self.rng.gen_range(-1000.0..1000.0),
            y: self.rng.gen_range(-1000.0..1000.0),
            z: self.rng.gen_range(-1000.0..1000.0),
        };
        let vel = Velocity {
            x: self.rng.gen_range(-10.0..10.0),
            y: self.rng.gen_range(-10.0..10.0),
            z: self.rng.gen_range(-10.0..10.0),
        };
        let accel = Acceleration { x: 0.0, y: -9.81, z: 0.0 };
        let transform = Transform::default();

        self.world.create((pos, vel, accel, transform)).unwrap()
    }

    /// Current body count.
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }
}

impl Default for PhysicsScenario {
    fn default() -> Self {
        Self::new()
    }
}

impl Scenario for PhysicsScenario {
    fn name(&self) -> &'static str {
        "physics"
    }

    fn description(&self) -> &'static str {
        "Physics simulation with acceleration/velocity integration and transforms"
    }

    fn entity_count(&self) -> usize {
        self.config.body_count
    }

    fn setup(&mut self) {
        self.bodies = Vec::with_capacity(self.config.body_count);
        for _ in 0..self.config.body_count {
            let entity = self.spawn_body();
            self.bodies.push(entity);
        }

        self.world.register_singleton(DeltaTime(self.config.delta_time)).unwrap();
    }

    fn update(&mut self) {
        system_integrate_acceleration(&mut self.world);
        system_integrate_velocity(&mut self.world);
        system_update_transforms(&mut self.world);
        system_enforce_boundaries(&mut self.world);
    }

    fn teardown(&mut self) {
        for entity in self.bodies.drain(..) {
            self.world.destroy(entity);
        }
    }
}

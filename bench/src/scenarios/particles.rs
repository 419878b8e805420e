//! Particle system benchmark scenario.
//!
//! Simulates a high-volume particle system with:
//! - Up to 100,000 particles
//! - Simple components: Position, Velocity, Lifetime, Color, Size
//! - Movement, lifetime decay, color fade, and respawn-on-death
//!
//! This scenario tests high entity count iteration performance and entity
//! churn (particles dying and immediately respawning).

use crate::components::{Color, DeltaTime, Lifetime, Particle, Position, Size, Velocity};
use crate::scenarios::Scenario;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sparse_ecs::{View, World};

/// Configuration for the particle benchmark.
pub struct ParticleConfig {
    /// Total number of particles to maintain.
    pub particle_count: usize,
    /// Simulated delta time per frame.
    pub delta_time: f32,
    /// Random seed for reproducibility.
    pub seed: u64,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self { particle_count: 100_000, delta_time: 1.0 / 60.0, seed: 12345 }
    }
}

fn random_particle(rng: &mut ChaCha8Rng) -> (Particle, Position, Velocity, Lifetime, Color, Size) {
    let pos = Position {
        x: rng.gen_range(-100.0..100.0),
        y: rng.gen_range(-100.0..100.0),
        z: rng.gen_range(-100.0..100.0),
    };
    let vel = Velocity {
        x: rng.gen_range(-10.0..10.0),
        y: rng.gen_range(-10.0..10.0),
        z: rng.gen_range(-10.0..10.0),
    };
    let lifetime = Lifetime { remaining: rng.gen_range(1.0..5.0), total: 5.0 };
    let color = Color { r: rng.gen_range(0.0..1.0), g: rng.gen_range(0.0..1.0), b: rng.gen_range(0.0..1.0), a: 1.0 };
    let size = Size { width: rng.gen_range(0.1..2.0), height: rng.gen_range(0.1..2.0) };

    (Particle, pos, vel, lifetime, color, size)
}

fn system_movement(world: &mut World) {
    let dt = world.get_singleton::<DeltaTime>().unwrap().0;
    let view: View<(Position, Velocity)> = world.view();
    let mut entities = Vec::new();
    view.each(world, |e, _| {
        entities.push(e);
        true
    });

    for e in entities {
        let mut pos = *world.get::<Position>(e).unwrap();
        let vel = *world.get::<Velocity>(e).unwrap();
        pos.x += vel.x * dt;
        pos.y += vel.y * dt;
        pos.z += vel.z * dt;
        world.emplace(e, pos).unwrap();
    }
}

fn system_lifetime_and_fade(world: &mut World) {
    let dt = world.get_singleton::<DeltaTime>().unwrap().0;
    let view: View<(Lifetime, Color)> = world.view();
    let mut entities = Vec::new();
    view.each(world, |e, _| {
        entities.push(e);
        true
    });

    let mut dead = Vec::new();
    for e in entities {
        let mut life = *world.get::<Lifetime>(e).unwrap();
        life.remaining -= dt;
        if life.remaining <= 0.0 {
            dead.push(e);
            continue;
        }
        let mut color = *world.get::<Color>(e).unwrap();
        color.a = (life.remaining / life.total).max(0.0);
        world.emplace(e, life).unwrap();
        world.emplace(e, color).unwrap();
    }

    for e in dead {
        world.destroy(e);
    }
}

/// Particle system benchmark scenario.
pub struct ParticleScenario {
    config: ParticleConfig,
    world: World,
    rng: ChaCha8Rng,
}

impl ParticleScenario {
    /// Create a new particle scenario with default config.
    pub fn new() -> Self {
        Self::with_config(ParticleConfig::default())
    }

    /// Create a new particle scenario with custom config.
    pub fn with_config(config: ParticleConfig) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(config.seed), world: World::new(), config }
    }

    /// Get current particle count.
    pub fn current_count(&self) -> usize {
        self.world.all().count()
    }

    fn top_up(&mut self) {
        let missing = self.config.particle_count.saturating_sub(self.current_count());
        for _ in 0..missing {
            let particle = random_particle(&mut self.rng);
            self.world.create(particle).unwrap();
        }
    }
}

impl Default for ParticleScenario {
    fn default() -> Self {
        Self::new()
    }
}

impl Scenario for ParticleScenario {
    fn name(&self) -> &'static str {
        "particles"
    }

    fn description(&self) -> &'static str {
        "High-volume particle system with movement, lifetime, and respawn"
    }

    fn entity_count(&self) -> usize {
        self.config.particle_count
    }

    fn setup(&mut self) {
        for _ in 0..self.config.particle_count {
            let particle = random_particle(&mut self.rng);
            self.world.create(particle).unwrap();
        }

        self.world.register_singleton(DeltaTime(self.config.delta_time)).unwrap();
    }

    fn update(&mut self) {
        system_movement(&mut self.world);
        system_lifetime_and_fade(&mut self.world);
        // Keep the particle count steady: every death this frame is replaced.
        self.top_up();
    }

    fn teardown(&mut self) {
        let entities: Vec<_> = self.world.all().collect();
        for entity in entities {
            self.world.destroy(entity);
        }
    }
}

//! Game world benchmark scenario.
//!
//! Simulates a mixed game world with:
//! - ~10,000 entities across multiple component combinations
//! - NPCs with AI, health, team affiliation
//! - Players
//! - Projectiles with short lifetimes
//! - Static objects
//!
//! This scenario tests several component combinations iterated together and
//! entity churn from expiring projectiles.

use crate::components::{AiState, DeltaTime, Health, Lifetime, Position, Team, Velocity};
use crate::scenarios::Scenario;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sparse_ecs::{Entity, View, World};

fn system_ai(world: &mut World) {
    let dt = world.get_singleton::<DeltaTime>().unwrap().0;
    let view: View<(Position, AiState, Velocity)> = world.view();
    let mut entities = Vec::new();
    view.each(world, |e, _| {
        entities.push(e);
        true
    });

    for e in entities {
        let pos = *world.get::<Position>(e).unwrap();
        let mut ai = *world.get::<AiState>(e).unwrap();
        ai.timer -= dt;
        if ai.timer <= 0.0 {
            ai.state = (ai.state + 1) % 4;
            ai.timer = 2.0;
        }

        let dx = ai.target_x - pos.x;
        let dy = ai.target_y - pos.y;
        let dist = (dx * dx + dy * dy).sqrt().max(0.001);
        let speed = 10.0;
        let vel = Velocity { x: dx / dist * speed, y: dy / dist * speed, z: 0.0 };

        world.emplace(e, ai).unwrap();
        world.emplace(e, vel).unwrap();
    }
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

/// Decay projectile lifetimes and destroy the ones that expired this frame.
fn system_projectile_lifetime(world: &mut World) {
    let dt = world.get_singleton::<DeltaTime>().unwrap().0;
    let view: View<(Lifetime,)> = world.view();
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
        } else {
            world.emplace(e, life).unwrap();
        }
    }

    for e in dead {
        world.destroy(e);
    }
}

/// Configuration for the game world benchmark.
#[derive(Clone)]
pub struct GameWorldConfig {
    /// Number of NPC entities.
    pub npc_count: usize,
    /// Number of player entities.
    pub player_count: usize,
    /// Number of projectile entities.
    pub projectile_count: usize,
    /// Number of static objects.
    pub static_count: usize,
    /// Simulated delta time per frame.
    pub delta_time: f32,
    /// Random seed for reproducibility.
    pub seed: u64,
}

impl Default for GameWorldConfig {
    fn default() -> Self {
        Self {
            npc_count: 5_000,
            player_count: 100,
            projectile_count: 2_000,
            static_count: 3_000,
            delta_time: 1.0 / 60.0,
            seed: 54321,
        }
    }
}

/// Game world benchmark scenario.
pub struct GameWorldScenario {
    config: GameWorldConfig,
    world: World,
    rng: ChaCha8Rng,
}

impl GameWorldScenario {
    /// Create a new game world scenario with default config.
    pub fn new() -> Self {
        Self::with_config(GameWorldConfig::default())
    }

    /// Create a new game world scenario with custom config.
    pub fn with_config(config: GameWorldConfig) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(config.seed), world: World::new(), config }
    }

    fn random_position(&mut self) -> Position {
        Position { x: self.rng.gen_range(-500.0..500.0), y: self.rng.gen_range(-500.0..500.0), z: 0.0 }
    }

    fn spawn_npc(&mut self) -> Entity {
        let pos = self.random_position();
        let vel = Velocity::default();
        let health = Health { current: 100.0, max: 100.0 };
        let ai = AiState {
            state: 0,
            timer: self.rng.gen_range(0.0..5.0),
            target_x: self.rng.gen_range(-500.0..500.0),
            target_y: self.rng.gen_range(-500.0..500.0),
        };
        let team = Team { id: self.rng.gen_range(0..4) };

        self.world.create((pos, vel, health, ai, team)).unwrap()
    }

    fn spawn_player(&mut self) -> Entity {
        let pos = self.random_position();
        let vel = Velocity::default();
        let health = Health { current: 100.0, max: 100.0 };
        let team = Team { id: 0 }; // Players on team 0

        self.world.create((pos, vel, health, team)).unwrap()
    }

    fn spawn_projectile(&mut self) -> Entity {
        let pos = self.random_position();
        let vel = Velocity { x: self.rng.gen_range(-50.0..50.0), y: self.rng.gen_range(-50.0..50.0), z: 0.0 };
        let lifetime = Lifetime { remaining: self.rng.gen_range(0.5..2.0), total: 2.0 };
        let team = Team { id: self.rng.gen_range(0..4) };

        self.world.create((pos, vel, lifetime, team)).unwrap()
    }

    fn spawn_static(&mut self) -> Entity {
        let pos = self.random_position();
        self.world.create((pos,)).unwrap()
    }

    /// Total entity count.
    pub fn total_count(&self) -> usize {
        self.world.all().count()
    }
}

impl Default for GameWorldScenario {
    fn default() -> Self {
        Self::new()
    }
}

impl Scenario for GameWorldScenario {
    fn name(&self) -> &'static str {
        "game_world"
    }

    fn description(&self) -> &'static str {
        "Mixed game world with NPCs, players, projectiles, and static objects"
    }

    fn entity_count(&self) -> usize {
        self.config.npc_count + self.config.player_count + self.config.projectile_count + self.config.static_count
    }

    fn setup(&mut self) {
        for _ in 0..self.config.npc_count {
            self.spawn_npc();
        }
        for _ in 0..self.config.player_count {
            self.spawn_player();
        }
        for _ in 0..self.config.projectile_count {
            self.spawn_projectile();
        }
        for _ in 0..self.config.static_count {
            self.spawn_static();
        }

        self.world.register_singleton(DeltaTime(self.config.delta_time)).unwrap();
    }

    fn update(&mut self) {
        system_movement(&mut self.world);
        system_ai(&mut self.world);
        system_projectile_lifetime(&mut self.world);
    }

    fn teardown(&mut self) {
        let entities: Vec<Entity> = self.world.all().collect();
        for entity in entities {
            self.world.destroy(entity);
        }
    }
}

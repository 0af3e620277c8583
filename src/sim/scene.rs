//! The playfield: player, falling blocks, floor and ceiling
//!
//! One `Scene` lives per session. Restarting builds a fresh one.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::arcade::{self, ArcadeConfig, WorldBounds};
use super::body::{Body, Faces};
use super::collision::{self, PairResolution};
use super::input::{TickInput, apply_input};
use super::spawner::{self, SpawnTimer};
use crate::config::GameConfig;

/// Things that happened during a step, in the order they happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    BlockSpawned { id: u32, lane: u32 },
    BlockDestroyed { id: u32 },
    /// A block pinned the player from above
    Crushed { block_id: u32 },
    /// The player touched the ceiling
    ReachedTop,
}

/// Complete playfield state
pub struct Scene {
    /// Seed the lane RNG was built from
    pub seed: u64,
    pub config: GameConfig,
    pub physics: ArcadeConfig,
    pub player: Body,
    /// Live blocks, oldest first
    pub blocks: Vec<Body>,
    /// Invisible 1px strip along the bottom edge
    pub floor: Body,
    /// Invisible 1px strip along the top edge; touching it wins
    pub ceiling: Body,
    pub spawner: SpawnTimer,
    /// Simulated time, frozen while paused
    pub time_ms: f64,
    rng: Pcg32,
    next_id: u32,
}

impl Scene {
    pub fn new(config: &GameConfig, seed: u64) -> Self {
        let width = config.width as f32;
        let height = config.height as f32;

        let mut player = Body::from_center(
            1,
            Vec2::new(width / 2.0, height - config.player.start_offset),
            Vec2::new(config.player.width, config.player.height),
        );
        player.gravity = Vec2::new(0.0, config.player.gravity);
        player.collide_world_bounds = true;

        let floor = Body::new_static(2, Vec2::new(width / 2.0, height), Vec2::new(width, 1.0));
        let ceiling = Body::new_static(3, Vec2::new(width / 2.0, 0.0), Vec2::new(width, 1.0));

        let physics = ArcadeConfig {
            fps: config.physics_fps,
            // Blocks spawn above the top edge
            bounds: WorldBounds {
                width,
                height,
                check: Faces {
                    up: false,
                    ..Faces::ALL
                },
            },
        };

        let mut scene = Self {
            seed,
            config: config.clone(),
            physics,
            player,
            blocks: Vec::new(),
            floor,
            ceiling,
            spawner: SpawnTimer::new(config.spawn_interval_ms),
            time_ms: 0.0,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 4,
        };

        // First block is queued right away; the timer handles the rest
        scene.spawn_block();
        scene
    }

    /// Allocate a new body ID
    fn next_body_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Drop a block into a random lane
    pub fn spawn_block(&mut self) -> GameEvent {
        let lanes = self.config.lane_count().max(1);
        let lane = self.rng.random_range(0..lanes);
        let id = self.next_body_id();
        self.blocks.push(spawner::spawn_block(id, lane, &self.config));
        log::debug!("Spawned block {} in lane {}", id, lane);
        GameEvent::BlockSpawned { id, lane }
    }

    /// Advance the scene by `dt` seconds
    ///
    /// Order: input, spawn timer, integration, colliders, cleanup.
    pub fn step(&mut self, input: &TickInput, dt: f32) -> Vec<GameEvent> {
        let dt = ArcadeConfig::clamp_step(dt);
        let mut events = Vec::new();

        apply_input(&mut self.player, input, &self.config.player);

        self.time_ms += dt as f64 * 1000.0;
        for _ in 0..self.spawner.advance(dt as f64 * 1000.0) {
            events.push(self.spawn_block());
        }

        let bounds = self.physics.bounds;
        arcade::integrate(&mut self.player, dt);
        arcade::collide_world_bounds(&mut self.player, &bounds);
        for block in &mut self.blocks {
            arcade::integrate(block, dt);
            arcade::collide_world_bounds(block, &bounds);
        }

        self.collide_blocks(&mut events);
        for block in &mut self.blocks {
            arcade::separate(block, &mut self.floor);
        }
        self.collide_player(&mut events);

        self.blocks.retain(|block| {
            if !block.enabled {
                log::debug!("Removed block {}", block.id);
            }
            block.enabled
        });

        events
    }

    /// Blocks against each other, with the stacking/cleanup rule
    fn collide_blocks(&mut self, events: &mut Vec<GameEvent>) {
        for i in 0..self.blocks.len() {
            for j in (i + 1)..self.blocks.len() {
                let (head, tail) = self.blocks.split_at_mut(j);
                let (a, b) = (&mut head[i], &mut tail[0]);
                if arcade::separate(a, b).is_none() {
                    continue;
                }
                if let PairResolution::Destroyed { first, second } =
                    collision::resolve_block_pair(a, b)
                {
                    if first {
                        events.push(GameEvent::BlockDestroyed { id: a.id });
                    }
                    if second {
                        events.push(GameEvent::BlockDestroyed { id: b.id });
                    }
                }
            }
        }
    }

    /// Player against blocks, floor and ceiling
    fn collide_player(&mut self, events: &mut Vec<GameEvent>) {
        for block in &mut self.blocks {
            if arcade::separate(&mut self.player, block).is_some()
                && collision::is_crushed(&self.player, block)
            {
                events.push(GameEvent::Crushed { block_id: block.id });
            }
        }

        arcade::separate(&mut self.player, &mut self.floor);

        if arcade::separate(&mut self.player, &mut self.ceiling).is_some() {
            events.push(GameEvent::ReachedTop);
        }
    }

    /// Number of blocks still in play
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }
}

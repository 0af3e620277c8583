//! Block spawning on a looping timer

use glam::Vec2;

use super::body::Body;
use crate::config::GameConfig;

/// Looping timer measured in simulation milliseconds
///
/// Only advanced while the scene runs, so pausing the session freezes it.
#[derive(Debug, Clone)]
pub struct SpawnTimer {
    pub delay_ms: f64,
    elapsed_ms: f64,
}

impl SpawnTimer {
    pub fn new(delay_ms: f64) -> Self {
        Self {
            delay_ms,
            elapsed_ms: 0.0,
        }
    }

    /// Advance by `dt_ms`; returns how many spawns fell due
    pub fn advance(&mut self, dt_ms: f64) -> u32 {
        if self.delay_ms <= 0.0 {
            return 0;
        }
        self.elapsed_ms += dt_ms.max(0.0);
        let mut fired = 0;
        while self.elapsed_ms >= self.delay_ms {
            self.elapsed_ms -= self.delay_ms;
            fired += 1;
        }
        fired
    }

    /// Time until the next spawn
    pub fn remaining_ms(&self) -> f64 {
        self.delay_ms - self.elapsed_ms
    }
}

/// Number of lanes across `world_width`
pub fn lane_count(world_width: f32, tile_size: f32) -> u32 {
    if tile_size <= 0.0 {
        return 0;
    }
    (world_width / tile_size).floor().max(0.0) as u32
}

/// Pixel x of a lane's centre
pub fn lane_center_x(lane: u32, tile_size: f32) -> f32 {
    (lane as f32 + 0.5) * tile_size
}

/// Build a falling block in `lane`, above the visible top edge
pub fn spawn_block(id: u32, lane: u32, config: &GameConfig) -> Body {
    let center = Vec2::new(lane_center_x(lane, config.tile_size), config.block_spawn_y);
    let mut block = Body::from_center(id, center, Vec2::splat(config.tile_size));
    block.vel = Vec2::new(0.0, config.block_fall_speed);
    block.pushable = false;
    block.collide_world_bounds = true;
    block
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_timer_fires_every_delay() {
        let mut timer = SpawnTimer::new(500.0);
        assert_eq!(timer.advance(499.0), 0);
        assert_eq!(timer.advance(1.0), 1);
        assert_eq!(timer.advance(1000.0), 2);
        assert_eq!(timer.remaining_ms(), 500.0);
    }

    #[test]
    fn test_timer_ignores_negative_time() {
        let mut timer = SpawnTimer::new(500.0);
        assert_eq!(timer.advance(-100.0), 0);
        assert_eq!(timer.remaining_ms(), 500.0);
    }

    #[test]
    fn test_lanes() {
        assert_eq!(lane_count(800.0, 50.0), 16);
        assert_eq!(lane_count(1000.0, 50.0), 20);
        assert_eq!(lane_count(820.0, 50.0), 16);
        assert_eq!(lane_count(40.0, 50.0), 0);
        assert_eq!(lane_center_x(0, 50.0), 25.0);
        assert_eq!(lane_center_x(15, 50.0), 775.0);
    }

    #[test]
    fn test_spawned_block_shape() {
        let config = GameConfig::default();
        let block = spawn_block(7, 3, &config);
        assert_eq!(block.id, 7);
        assert_eq!(block.center(), Vec2::new(175.0, -100.0));
        assert_eq!(block.size, Vec2::splat(50.0));
        assert_eq!(block.vel, Vec2::new(0.0, 300.0));
        assert!(!block.pushable);
        assert!(block.collide_world_bounds);
        // Entirely above the visible area
        assert!(block.bottom() < 0.0);
    }

    proptest! {
        #[test]
        fn spawned_blocks_stay_on_the_grid(width in 50u32..2000, lane_seed in any::<u32>()) {
            let config = GameConfig { width, ..GameConfig::default() };
            let lanes = config.lane_count();
            let lane = lane_seed % lanes;
            let block = spawn_block(1, lane, &config);
            prop_assert!(block.left() >= 0.0);
            prop_assert!(block.right() <= width as f32);
            prop_assert_eq!(block.left() % config.tile_size, 0.0);
        }
    }
}

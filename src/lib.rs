//! Drop And Climb - dodge the falling blocks, then climb them to the top
//!
//! Core modules:
//! - `sim`: Deterministic simulation (arcade physics, spawning, collision policy)
//! - `session`: Start/pause/win/lose flow and the dialog it drives
//! - `game`: Frame controller tying the scene to the session
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Browser glue (keyboard, modal dialog)
//! - `config`: Canvas variants and gameplay tuning

pub mod config;
pub mod error;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod sim;

pub use config::{GameConfig, KeyBindings, PlayerTuning, Variant};
pub use error::{BootError, ConfigError};
pub use game::Game;
pub use session::{Dialog, DialogContent, DismissAction, Session, SessionPhase};

/// Game configuration constants
pub mod consts {
    /// Longest step the physics will integrate in one go (seconds)
    pub const MAX_STEP_SECS: f32 = 0.05;

    /// Side of a block and width of a spawn lane (pixels)
    pub const TILE_SIZE: f32 = 50.0;
    /// Time between block spawns
    pub const SPAWN_INTERVAL_MS: f64 = 500.0;
    /// Downward block speed (pixels/s)
    pub const BLOCK_FALL_SPEED: f32 = 300.0;
    /// Spawn height of a block centre, above the visible top edge
    pub const BLOCK_SPAWN_Y: f32 = -100.0;

    /// Player footprint
    pub const PLAYER_WIDTH: f32 = 30.0;
    pub const PLAYER_HEIGHT: f32 = 100.0;
    /// Horizontal player speed (pixels/s)
    pub const PLAYER_SPEED: f32 = 200.0;
    /// Upward launch speed when jumping (pixels/s)
    pub const PLAYER_JUMP_SPEED: f32 = 1000.0;
    /// Player gravity (pixels/s²)
    pub const PLAYER_GRAVITY: f32 = 3000.0;
    /// Distance from the bottom edge to the player's spawn centre
    pub const PLAYER_START_OFFSET: f32 = 100.0;

    /// Physics step rate; high enough that the display refresh is the real cap
    pub const PHYSICS_FPS: f32 = 1000.0;

    /// Outline drawn around each block, centred on its edge (pixels)
    pub const BLOCK_STROKE_WIDTH: f32 = 3.0;
}

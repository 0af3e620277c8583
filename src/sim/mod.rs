//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (blocks oldest first)
//! - No rendering or platform dependencies

pub mod arcade;
pub mod body;
pub mod collision;
pub mod input;
pub mod scene;
pub mod spawner;

pub use arcade::{ArcadeConfig, Axis, Contact, WorldBounds};
pub use body::{Body, BodyKind, Faces};
pub use collision::{PairResolution, Side, is_crushed, resolve_block_pair};
pub use input::{TickInput, apply_input};
pub use scene::{GameEvent, Scene};
pub use spawner::SpawnTimer;

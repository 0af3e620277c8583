//! Input mapping: logical keys to player velocity

use super::body::Body;
use crate::config::PlayerTuning;

/// Held state of the logical keys for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

/// Set the player's velocity from the held keys
///
/// Left wins over right. Jump launches only while resting on something, so a
/// held jump key re-triggers on every landing.
pub fn apply_input(player: &mut Body, input: &TickInput, tuning: &PlayerTuning) {
    if input.jump && player.on_floor() {
        player.vel.y = -tuning.jump_speed;
    }

    player.vel.x = if input.left {
        -tuning.speed
    } else if input.right {
        tuning.speed
    } else {
        0.0
    };
}

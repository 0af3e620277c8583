//! Gameplay collision rules
//!
//! Run after the arcade solver has separated a pair, in whatever order the
//! pairs come up. Each rule looks only at the two bodies it is handed, so the
//! outcome does not depend on pair order.

use super::body::Body;

/// Which of the two bodies handed to a rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    First,
    Second,
}

/// Outcome of a block-vs-block contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairResolution {
    /// At least one block had scrolled off the top and was destroyed
    Destroyed { first: bool, second: bool },
    /// Stacking settled: `upper` no longer checks its bottom face, the other
    /// block no longer checks its top face
    Stacked { upper: Side },
}

/// Whether a block has left the visible area through the top
#[inline]
pub fn is_off_top(block: &Body) -> bool {
    block.bottom() < 0.0
}

/// Resolve a contact between two blocks
///
/// Blocks fully above the visible area are destroyed and nothing else
/// happens. Otherwise the higher block (smaller y) stops checking its bottom
/// face and the lower one its top face.
pub fn resolve_block_pair(a: &mut Body, b: &mut Body) -> PairResolution {
    let first = is_off_top(a);
    let second = is_off_top(b);
    if first {
        a.destroy();
    }
    if second {
        b.destroy();
    }
    if first || second {
        return PairResolution::Destroyed { first, second };
    }

    if a.pos.y < b.pos.y {
        a.check_collision.down = false;
        b.check_collision.up = false;
        PairResolution::Stacked { upper: Side::First }
    } else {
        b.check_collision.down = false;
        a.check_collision.up = false;
        PairResolution::Stacked { upper: Side::Second }
    }
}

/// Whether the player is pinned under `block`
///
/// Exact edge equality: the solver sets the player's top to the block's
/// bottom when a block pushes it down or it jumps into one from below.
/// Near misses (different frame timing) don't count; a tolerance would be
/// the fix if that ever shows up in play.
#[allow(clippy::float_cmp)]
pub fn is_crushed(player: &Body, block: &Body) -> bool {
    player.top() == block.bottom()
}

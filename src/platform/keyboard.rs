//! Held-key tracking
//!
//! Key events arrive between frames; the frame loop samples the held set once
//! per refresh and turns it into a `TickInput`.

use std::collections::HashSet;

use crate::config::KeyBindings;
use crate::sim::TickInput;

/// Physical keys (`KeyboardEvent.code`) currently held
#[derive(Debug, Default, Clone)]
pub struct KeyState {
    held: HashSet<String>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a keydown (`down = true`) or keyup
    pub fn set(&mut self, code: &str, down: bool) {
        if down {
            self.held.insert(code.to_string());
        } else {
            self.held.remove(code);
        }
    }

    pub fn is_down(&self, code: &str) -> bool {
        self.held.contains(code)
    }

    /// Forget everything, e.g. after the window loses focus
    pub fn clear(&mut self) {
        self.held.clear();
    }

    /// Snapshot for one simulation step
    pub fn tick_input(&self, keys: &KeyBindings) -> TickInput {
        TickInput {
            left: self.is_down(&keys.left),
            right: self.is_down(&keys.right),
            jump: self.is_down(&keys.jump),
        }
    }

    /// Whether the page should swallow this key (so Space doesn't scroll)
    pub fn is_bound(code: &str, keys: &KeyBindings) -> bool {
        [&keys.left, &keys.right, &keys.jump, &keys.pause]
            .iter()
            .any(|k| k.as_str() == code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_held_keys_map_to_input() {
        let keys = KeyBindings::default();
        let mut state = KeyState::new();
        assert_eq!(state.tick_input(&keys), TickInput::default());

        state.set("KeyA", true);
        state.set("Space", true);
        let input = state.tick_input(&keys);
        assert!(input.left && input.jump && !input.right);

        state.set("KeyA", false);
        state.set("KeyD", true);
        let input = state.tick_input(&keys);
        assert!(!input.left && input.right && input.jump);
    }

    #[test]
    fn test_unbound_keys_ignored() {
        let keys = KeyBindings::default();
        let mut state = KeyState::new();
        state.set("ArrowLeft", true);
        state.set("KeyW", true);
        assert_eq!(state.tick_input(&keys), TickInput::default());
        assert!(!KeyState::is_bound("ArrowLeft", &keys));
        assert!(KeyState::is_bound("Space", &keys));
        assert!(KeyState::is_bound("Escape", &keys));
    }

    #[test]
    fn test_rebound_keys() {
        let keys = KeyBindings {
            left: "ArrowLeft".to_string(),
            ..KeyBindings::default()
        };
        let mut state = KeyState::new();
        state.set("KeyA", true);
        assert!(!state.tick_input(&keys).left);
        state.set("ArrowLeft", true);
        assert!(state.tick_input(&keys).left);
    }

    #[test]
    fn test_repeat_and_clear() {
        let mut state = KeyState::new();
        state.set("KeyD", true);
        state.set("KeyD", true);
        state.set("KeyD", false);
        assert!(!state.is_down("KeyD"));

        state.set("KeyA", true);
        state.clear();
        assert!(!state.is_down("KeyA"));
    }
}

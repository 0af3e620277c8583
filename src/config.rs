//! Game configuration
//!
//! Fixed at start-up: the canvas variant plus optional JSON overrides read from
//! the canvas element. Nothing here is persisted.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Canvas size variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Variant {
    /// 800×600
    #[default]
    Classic,
    /// 1000×600
    Wide,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Classic => "classic",
            Variant::Wide => "wide",
        }
    }

    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        match s.trim().to_lowercase().as_str() {
            "classic" | "800" => Ok(Variant::Classic),
            "wide" | "1000" => Ok(Variant::Wide),
            other => Err(ConfigError::UnknownVariant(other.to_string())),
        }
    }

    /// Canvas size in pixels
    pub fn canvas_size(&self) -> (u32, u32) {
        match self {
            Variant::Classic => (800, 600),
            Variant::Wide => (1000, 600),
        }
    }
}

/// Physical keys (`KeyboardEvent.code`) for the logical actions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub left: String,
    pub right: String,
    pub jump: String,
    pub pause: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            left: "KeyA".to_string(),
            right: "KeyD".to_string(),
            jump: "Space".to_string(),
            pause: "Escape".to_string(),
        }
    }
}

/// Player body tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub width: f32,
    pub height: f32,
    /// Horizontal speed (pixels/s)
    pub speed: f32,
    /// Upward launch speed (pixels/s)
    pub jump_speed: f32,
    /// Gravity (pixels/s²)
    pub gravity: f32,
    /// Spawn centre distance from the bottom edge
    pub start_offset: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            speed: PLAYER_SPEED,
            jump_speed: PLAYER_JUMP_SPEED,
            gravity: PLAYER_GRAVITY,
            start_offset: PLAYER_START_OFFSET,
        }
    }
}

/// Complete start-up configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Block size and lane width
    pub tile_size: f32,
    pub spawn_interval_ms: f64,
    pub block_fall_speed: f32,
    /// Spawn centre y; negative is above the visible area
    pub block_spawn_y: f32,
    pub player: PlayerTuning,
    /// Physics step rate cap
    pub physics_fps: f32,
    pub keys: KeyBindings,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::for_variant(Variant::default())
    }
}

impl GameConfig {
    /// Reference tuning at the variant's canvas size
    pub fn for_variant(variant: Variant) -> Self {
        let (width, height) = variant.canvas_size();
        Self {
            width,
            height,
            tile_size: TILE_SIZE,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            block_fall_speed: BLOCK_FALL_SPEED,
            block_spawn_y: BLOCK_SPAWN_Y,
            player: PlayerTuning::default(),
            physics_fps: PHYSICS_FPS,
            keys: KeyBindings::default(),
        }
    }

    /// Parse a JSON document; missing fields take the classic defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply a JSON override document on top of `self`
    pub fn with_overrides(&self, json: &str) -> Result<Self, ConfigError> {
        let mut base = serde_json::to_value(self)?;
        let patch: serde_json::Value = serde_json::from_str(json)?;
        merge_json(&mut base, patch);
        let config: GameConfig = serde_json::from_value(base)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("width", self.width as f64),
            ("height", self.height as f64),
            ("tile_size", self.tile_size as f64),
            ("spawn_interval_ms", self.spawn_interval_ms),
            ("physics_fps", self.physics_fps as f64),
            ("player.width", self.player.width as f64),
            ("player.height", self.player.height as f64),
        ];
        for (field, value) in positive {
            if value <= 0.0 || !value.is_finite() {
                return Err(ConfigError::NotPositive { field, value });
            }
        }

        if self.lane_count() == 0 {
            return Err(ConfigError::NoLanes {
                width: self.width,
                tile: self.tile_size,
            });
        }

        let keys = [
            ("left", &self.keys.left),
            ("right", &self.keys.right),
            ("jump", &self.keys.jump),
            ("pause", &self.keys.pause),
        ];
        for (name, code) in keys {
            if code.trim().is_empty() {
                return Err(ConfigError::EmptyKey(name));
            }
        }

        Ok(())
    }

    /// Number of spawn lanes across the canvas
    pub fn lane_count(&self) -> u32 {
        crate::sim::spawner::lane_count(self.width as f32, self.tile_size)
    }

    /// Shortest physics step (seconds)
    pub fn min_step_secs(&self) -> f32 {
        1.0 / self.physics_fps
    }
}

fn merge_json(base: &mut serde_json::Value, patch: serde_json::Value) {
    match (base, patch) {
        (serde_json::Value::Object(base), serde_json::Value::Object(patch)) => {
            for (key, value) in patch {
                merge_json(base.entry(key).or_insert(serde_json::Value::Null), value);
            }
        }
        (base, patch) => *base = patch,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_sizes() {
        assert_eq!(GameConfig::for_variant(Variant::Classic).width, 800);
        let wide = GameConfig::for_variant(Variant::Wide);
        assert_eq!((wide.width, wide.height), (1000, 600));
        assert_eq!(wide.lane_count(), 20);
        assert_eq!(GameConfig::default().lane_count(), 16);
    }

    #[test]
    fn test_variant_parse() {
        assert_eq!(Variant::parse("Wide").unwrap(), Variant::Wide);
        assert_eq!(Variant::parse(" classic ").unwrap(), Variant::Classic);
        assert!(matches!(
            Variant::parse("huge"),
            Err(ConfigError::UnknownVariant(_))
        ));
    }

    #[test]
    fn test_from_json_partial_uses_defaults() {
        let config = GameConfig::from_json(r#"{ "spawn_interval_ms": 250 }"#).unwrap();
        assert_eq!(config.spawn_interval_ms, 250.0);
        assert_eq!(config.width, 800);
        assert_eq!(config.keys.pause, "Escape");
    }

    #[test]
    fn test_overrides_keep_base_variant() {
        let base = GameConfig::for_variant(Variant::Wide);
        let config = base
            .with_overrides(r#"{ "player": { "speed": 300 } }"#)
            .unwrap();
        assert_eq!(config.width, 1000);
        assert_eq!(config.player.speed, 300.0);
        assert_eq!(config.player.height, PLAYER_HEIGHT);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(matches!(
            GameConfig::from_json(r#"{ "tile_size": 0 }"#),
            Err(ConfigError::NotPositive { field: "tile_size", .. })
        ));
        assert!(matches!(
            GameConfig::from_json(r#"{ "width": 40 }"#),
            Err(ConfigError::NoLanes { .. })
        ));
        assert!(matches!(
            GameConfig::from_json(r#"{ "keys": { "jump": "" } }"#),
            Err(ConfigError::EmptyKey("jump"))
        ));
        assert!(matches!(
            GameConfig::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}

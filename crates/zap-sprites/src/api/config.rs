use serde::{Deserialize, Serialize};

/// Engine configuration, provided by the game.
///
/// Every field has a default, so a JSON config only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Logical ticks per second (default: 60). Drives animation timing.
    pub ticks_per_second: f32,
    /// Most ticks run for one frame before the backlog is dropped (default: 10).
    pub max_ticks_per_frame: u32,
    /// Frame speed for sprites that have not played a sequence (default: 10 fps).
    pub default_frame_speed: f32,
    /// Collision scale given to new sprites (default: 1.0).
    pub default_collision_scale: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            ticks_per_second: 60.0,
            max_ticks_per_frame: 10,
            default_frame_speed: 10.0,
            default_collision_scale: 1.0,
        }
    }
}

impl EngineConfig {
    /// Parse a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Fixed delta time of one tick, in seconds.
    pub fn tick_dt(&self) -> f32 {
        1.0 / self.ticks_per_second
    }
}

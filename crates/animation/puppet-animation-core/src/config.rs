//! Player configuration.

use serde::{Deserialize, Serialize};

use crate::active::BlendSettings;
use crate::clips;
use crate::error::{AnimationError, Result};

const DEFAULT_TICK_RATE_HZ: f32 = 60.0;

/// Clip ids the state selector switches between.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StateClips {
    pub idle: String,
    pub walking: String,
    pub use_idle: String,
    pub use_walk: String,
}

impl Default for StateClips {
    fn default() -> Self {
        Self {
            idle: clips::IDLE.to_string(),
            walking: clips::WALKING.to_string(),
            use_idle: clips::USE_IDLE.to_string(),
            use_walk: clips::USE_WALK.to_string(),
        }
    }
}

/// Configuration for a player. Missing JSON fields fall back to defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Fixed simulation rate. The animation clock advances by exactly
    /// `1 / tick_rate_hz` per processed tick, independent of frame time.
    pub tick_rate_hz: f32,
    /// Envelope applied when a layer switches clips.
    pub blend: BlendSettings,
    pub state_clips: StateClips,
    /// Check "using item while moving" before plain walking. Off by default,
    /// which keeps `UseWalk` out of automatic selection.
    pub use_walk_priority: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_rate_hz: DEFAULT_TICK_RATE_HZ,
            blend: BlendSettings::default(),
            state_clips: StateClips::default(),
            use_walk_priority: false,
        }
    }
}

impl Config {
    /// Seconds per tick. Non-positive or non-finite rates fall back to 60 Hz.
    pub fn fixed_dt(&self) -> f32 {
        if self.tick_rate_hz.is_finite() && self.tick_rate_hz > 0.0 {
            1.0 / self.tick_rate_hz
        } else {
            1.0 / DEFAULT_TICK_RATE_HZ
        }
    }

    pub fn from_json(s: &str) -> Result<Self> {
        serde_json::from_str(s).map_err(|e| AnimationError::Config(e.to_string()))
    }
}

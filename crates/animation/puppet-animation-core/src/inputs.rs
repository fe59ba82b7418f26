//! Input contracts for the player.
//!
//! Hosts build a [`TickInputs`] once per fixed simulation step and a
//! [`DrawContext`] once per render call.

use serde::{Deserialize, Serialize};

use crate::active::AnimationLayer;
use crate::segment::Facing;

/// Locomotion and action flags observed on the host entity this tick.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocomotionInputs {
    pub moving: bool,
    pub using_item: bool,
    pub jumping: bool,
    /// Host AFK counter is above zero.
    pub afk: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum PlayerCommand {
    Play {
        clip: String,
        #[serde(default)]
        layer: AnimationLayer,
    },
    Stop {
        #[serde(default)]
        layer: AnimationLayer,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInputs {
    /// Monotonic host tick counter. Only used to skip ticks already processed.
    pub tick: u64,
    pub paused: bool,
    #[serde(default)]
    pub locomotion: LocomotionInputs,
    /// Applied before stepping, even while paused.
    #[serde(default)]
    pub commands: Vec<PlayerCommand>,
}

impl TickInputs {
    pub fn running(tick: u64, locomotion: LocomotionInputs) -> Self {
        Self {
            tick,
            paused: false,
            locomotion,
            commands: Vec::new(),
        }
    }
}

/// Render-time gating and orientation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawContext {
    pub in_menu: bool,
    /// False while the entity cannot be posed (asleep, dead, ...).
    pub posable: bool,
    pub facing: Facing,
}

impl Default for DrawContext {
    fn default() -> Self {
        Self {
            in_menu: false,
            posable: true,
            facing: Facing::Positive,
        }
    }
}

impl DrawContext {
    pub fn facing(facing: Facing) -> Self {
        Self {
            facing,
            ..Self::default()
        }
    }
}

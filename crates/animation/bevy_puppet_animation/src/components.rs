use bevy::prelude::*;
use puppet_animation_core::{
    clips, AnimationPlayer, DrawParams, Facing, LocomotionInputs, PlayerCommand, SegmentId,
};

/// Root of a posable character. Segment entities are found among its
/// descendants. A [`Puppet`] player is attached on the next fixed tick.
#[derive(Component, Debug, Clone)]
pub struct PuppetRig {
    /// Clip started when the player is attached.
    pub initial_clip: Option<String>,
}

impl Default for PuppetRig {
    fn default() -> Self {
        Self {
            initial_clip: Some(clips::IDLE.to_string()),
        }
    }
}

/// Marks a descendant entity as the visual for one segment.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PuppetSegment(pub SegmentId);

/// Segment transform captured the first time it is seen. Published offsets
/// are applied on top of it.
#[derive(Component, Debug, Clone, Copy)]
pub struct SegmentRest(pub Transform);

/// Gameplay flags sampled once per fixed tick.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Locomotion(pub LocomotionInputs);

#[derive(Component, Debug, Clone, Copy, Default)]
pub struct FacingDirection(pub Facing);

/// Per-rig publish gate (e.g. sitting or mounted rigs are not posable).
#[derive(Component, Debug, Clone, Copy)]
pub struct PoseGate {
    pub posable: bool,
}

impl Default for PoseGate {
    fn default() -> Self {
        Self { posable: true }
    }
}

/// Explicit play/stop requests, drained on the next tick.
#[derive(Component, Debug, Clone, Default)]
pub struct PuppetCommands(pub Vec<PlayerCommand>);

/// The player driving a rig.
#[derive(Component, Debug)]
pub struct Puppet(pub AnimationPlayer);

/// Published draw parameters for a rig. Its initial value is the rest pose.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct PuppetDrawParams(pub DrawParams);

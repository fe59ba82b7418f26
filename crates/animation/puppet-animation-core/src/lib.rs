//! Puppet Animation Core (engine-agnostic)
//!
//! Keyframe sampling, blend envelopes and a layered pose mixer for 2D
//! segmented characters. The host supplies a fixed tick, a rest-pose snapshot
//! and a [`PoseSink`]; this crate owns no game loop and does no I/O.

pub mod accumulate;
pub mod active;
pub mod baking;
pub mod clips;
pub mod config;
pub mod data;
pub mod error;
pub mod inputs;
pub mod interp;
pub mod library;
pub mod mixer;
pub mod outputs;
pub mod player;
pub mod pose;
pub mod sampling;
pub mod segment;
pub mod sink;
pub mod state;
pub mod stored_clip;

// Re-exports for consumers (adapters)
pub use accumulate::PoseAccumulator;
pub use active::{ActiveAnimation, AnimationLayer, BlendSettings, ClipProgress};
pub use baking::{bake_clip, BakedClip, BakingConfig};
pub use config::{Config, StateClips};
pub use data::{AnimationFrame, ProceduralAnimation};
pub use error::{AnimationError, Result};
pub use inputs::{DrawContext, LocomotionInputs, PlayerCommand, TickInputs};
pub use interp::Easing;
pub use library::AnimationLibrary;
pub use mixer::{LayerStack, LayerTick, LayerTickKind};
pub use outputs::PlayerEvent;
pub use player::AnimationPlayer;
pub use pose::{Pose, RestPose};
pub use sampling::sample_segment;
pub use segment::{Facing, SegmentId, SegmentState, StretchAmount, Vec2};
pub use sink::{DrawParams, PoseProvider, PoseSink, SegmentDrawParams};
pub use state::select_clip;
pub use stored_clip::{parse_stored_clip_json, parse_stored_clips_json};

//! Boundary traits between the player and the host renderer.

use serde::{Deserialize, Serialize};

use crate::data::ProceduralAnimation;
use crate::pose::Pose;
use crate::segment::{SegmentId, SegmentState, StretchAmount, Vec2};

/// Receives final per-segment values on publish.
pub trait PoseSink {
    fn apply(&mut self, segment: SegmentId, state: SegmentState);
}

/// Answers "what is the pose at time t". Read-only consumers (held-item
/// placement and the like) sample through this.
pub trait PoseProvider {
    fn resolve_pose(&self, time: f32) -> Pose;
}

impl PoseSink for Pose {
    fn apply(&mut self, segment: SegmentId, state: SegmentState) {
        self.insert(segment, state);
    }
}

impl PoseProvider for ProceduralAnimation {
    fn resolve_pose(&self, time: f32) -> Pose {
        self.state_at_time(time)
    }
}

/// Draw parameters for one segment.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SegmentDrawParams {
    pub position: Vec2,
    pub rotation: f32,
    pub stretch: StretchAmount,
}

impl From<SegmentState> for SegmentDrawParams {
    fn from(s: SegmentState) -> Self {
        Self {
            position: s.position,
            rotation: s.rotation,
            stretch: s.stretch,
        }
    }
}

impl From<SegmentDrawParams> for SegmentState {
    fn from(p: SegmentDrawParams) -> Self {
        SegmentState {
            position: p.position,
            rotation: p.rotation,
            stretch: p.stretch,
        }
    }
}

/// Host-side draw block: one field set per segment. Whatever was last
/// written stays until overwritten.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DrawParams {
    pub head: SegmentDrawParams,
    pub body: SegmentDrawParams,
    pub legs: SegmentDrawParams,
    pub left_arm: SegmentDrawParams,
    pub right_arm: SegmentDrawParams,
}

impl DrawParams {
    pub fn get(&self, segment: SegmentId) -> &SegmentDrawParams {
        match segment {
            SegmentId::Head => &self.head,
            SegmentId::Body => &self.body,
            SegmentId::Legs => &self.legs,
            SegmentId::LeftArm => &self.left_arm,
            SegmentId::RightArm => &self.right_arm,
        }
    }

    pub fn get_mut(&mut self, segment: SegmentId) -> &mut SegmentDrawParams {
        match segment {
            SegmentId::Head => &mut self.head,
            SegmentId::Body => &mut self.body,
            SegmentId::Legs => &mut self.legs,
            SegmentId::LeftArm => &mut self.left_arm,
            SegmentId::RightArm => &mut self.right_arm,
        }
    }

    /// Current values as segment states, for rest-pose capture.
    pub fn state(&self, segment: SegmentId) -> SegmentState {
        (*self.get(segment)).into()
    }
}

impl PoseSink for DrawParams {
    fn apply(&mut self, segment: SegmentId, state: SegmentState) {
        *self.get_mut(segment) = state.into();
    }
}

//! One playing clip on a layer, with its blend-in/blend-out envelope.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::data::ProceduralAnimation;
use crate::interp::Easing;
use crate::pose::Pose;
use crate::segment::SegmentId;

/// Independent animation channel. Each layer only drives the segments in its mask.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimationLayer {
    #[default]
    Base,
    UpperBody,
    LowerBody,
}

impl AnimationLayer {
    pub const ALL: [AnimationLayer; 3] = [
        AnimationLayer::Base,
        AnimationLayer::UpperBody,
        AnimationLayer::LowerBody,
    ];

    pub fn drives(self, segment: SegmentId) -> bool {
        match self {
            AnimationLayer::Base => true,
            AnimationLayer::UpperBody => segment != SegmentId::Legs,
            AnimationLayer::LowerBody => segment == SegmentId::Legs,
        }
    }
}

/// Blend envelope durations (seconds) and shape.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlendSettings {
    pub blend_in: f32,
    pub blend_out: f32,
    pub easing: Easing,
}

/// Outcome of advancing a clip's local clock.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClipProgress {
    Playing,
    Looped,
    /// One-shot reached its end; time is clamped to the duration.
    Finished,
}

#[derive(Clone, Debug)]
pub struct ActiveAnimation {
    pub animation: Arc<ProceduralAnimation>,
    /// Clip-local seconds.
    pub time: f32,
    pub layer: AnimationLayer,
    pub blend_in_duration: f32,
    pub blend_out_duration: f32,
    /// Current weight in [0,1].
    pub blend_factor: f32,
    pub is_blending_in: bool,
    pub is_blending_out: bool,
    // Linear envelope position before easing.
    progress: f32,
    easing: Easing,
}

impl ActiveAnimation {
    pub fn new(
        animation: Arc<ProceduralAnimation>,
        layer: AnimationLayer,
        blend: BlendSettings,
    ) -> Self {
        let blend_in = blend.blend_in.max(0.0);
        let is_blending_in = blend_in > 0.0;
        let progress = if is_blending_in { 0.0 } else { 1.0 };
        Self {
            animation,
            time: 0.0,
            layer,
            blend_in_duration: blend_in,
            blend_out_duration: blend.blend_out.max(0.0),
            blend_factor: blend.easing.apply(progress),
            is_blending_in,
            is_blending_out: false,
            progress,
            easing: blend.easing,
        }
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.animation.id
    }

    /// Start fading out from wherever the envelope currently is.
    pub fn begin_blend_out(&mut self) {
        if self.is_blending_out {
            return;
        }
        self.is_blending_in = false;
        self.is_blending_out = true;
        if self.blend_out_duration <= 0.0 {
            self.progress = 0.0;
            self.blend_factor = 0.0;
        }
    }

    pub fn advance_blend(&mut self, dt: f32) {
        if self.is_blending_in {
            self.progress += dt / self.blend_in_duration;
            if self.progress >= 1.0 {
                self.progress = 1.0;
                self.is_blending_in = false;
            }
        } else if self.is_blending_out && self.blend_out_duration > 0.0 {
            self.progress = (self.progress - dt / self.blend_out_duration).max(0.0);
        }
        self.blend_factor = self.easing.apply(self.progress);
    }

    /// Advance the clip clock. Looping clips wrap, one-shots clamp at the end.
    pub fn advance_time(&mut self, dt: f32) -> ClipProgress {
        let duration = self.animation.duration;
        self.time += dt;
        if self.time <= duration {
            return ClipProgress::Playing;
        }
        if self.animation.looping {
            self.time = if duration > 0.0 {
                self.time % duration
            } else {
                0.0
            };
            ClipProgress::Looped
        } else {
            self.time = duration;
            ClipProgress::Finished
        }
    }

    pub fn restart(&mut self) {
        self.time = 0.0;
    }

    pub fn is_blended_out(&self) -> bool {
        self.is_blending_out && self.progress <= 0.0
    }

    /// One-shot that has reached its end.
    pub fn is_finished(&self) -> bool {
        !self.animation.looping && self.time >= self.animation.duration
    }

    /// Clip pose at the current time, restricted to this layer's segments.
    pub fn sample(&self) -> Pose {
        let layer = self.layer;
        self.animation
            .state_at_time(self.time)
            .iter()
            .filter(|(seg, _)| layer.drives(*seg))
            .map(|(seg, s)| (seg, *s))
            .collect()
    }
}

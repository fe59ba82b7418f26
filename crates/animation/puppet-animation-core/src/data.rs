//! Clip data model: sparse keyframes grouped into named clips.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{AnimationError, Result};
use crate::segment::{SegmentId, SegmentState};

/// A timestamped, sparse keyframe. Segments that do not change at this
/// instant are simply left out.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimationFrame {
    /// Seconds, clip-local.
    pub time: f32,
    pub segments: BTreeMap<SegmentId, SegmentState>,
}

impl AnimationFrame {
    pub fn new(time: f32) -> Self {
        Self {
            time,
            segments: BTreeMap::new(),
        }
    }

    pub fn with(mut self, segment: SegmentId, state: SegmentState) -> Self {
        self.segments.insert(segment, state);
        self
    }

    pub fn get(&self, segment: SegmentId) -> Option<&SegmentState> {
        self.segments.get(&segment)
    }
}

/// A named clip: keyframes sorted by time, a duration and a loop flag.
/// Built once at load and shared immutably afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProceduralAnimation {
    pub id: String,
    pub display_name: String,
    /// Seconds. Authoritative for playback wrap/clamp.
    pub duration: f32,
    pub looping: bool,
    pub frames: Vec<AnimationFrame>,
}

impl ProceduralAnimation {
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        duration: f32,
        looping: bool,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            duration,
            looping,
            frames: Vec::new(),
        }
    }

    pub fn with_frame(mut self, frame: AnimationFrame) -> Self {
        self.insert_frame(frame);
        self
    }

    /// Insert keeping frames ordered by time. Equal timestamps keep insertion order.
    pub fn insert_frame(&mut self, frame: AnimationFrame) {
        let at = self.frames.partition_point(|f| f.time <= frame.time);
        self.frames.insert(at, frame);
    }

    pub fn last_frame_time(&self) -> Option<f32> {
        self.frames.last().map(|f| f.time)
    }

    /// Segments defined by at least one frame, in `SegmentId` order.
    pub fn animated_segments(&self) -> Vec<SegmentId> {
        SegmentId::ALL
            .into_iter()
            .filter(|seg| self.frames.iter().any(|f| f.segments.contains_key(seg)))
            .collect()
    }

    /// Validate basic invariants (non-empty, finite non-decreasing times, sane duration).
    pub fn validate_basic(&self) -> Result<()> {
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(AnimationError::InvalidDuration {
                clip: self.id.clone(),
                duration: self.duration,
            });
        }
        if self.frames.is_empty() {
            return Err(AnimationError::EmptyClip {
                clip: self.id.clone(),
            });
        }
        let mut previous = f32::NEG_INFINITY;
        for (index, frame) in self.frames.iter().enumerate() {
            if !frame.time.is_finite() {
                return Err(AnimationError::NonFiniteTime {
                    clip: self.id.clone(),
                    index,
                    time: frame.time,
                });
            }
            if frame.time < previous {
                return Err(AnimationError::UnsortedFrames {
                    clip: self.id.clone(),
                    index,
                    time: frame.time,
                    previous,
                });
            }
            previous = frame.time;
        }
        Ok(())
    }
}

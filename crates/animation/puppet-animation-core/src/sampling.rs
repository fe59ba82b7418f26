//! Keyframe sampling.
//!
//! Model:
//! - Each segment is sampled independently over the subsequence of frames that define it.
//! - Between two defining frames, position/rotation are linear; stretch is stepped.
//! - Outside the defined range the nearest defining frame is held (no extrapolation).
//! - Segments never defined by the clip are absent from the sampled pose.

use crate::data::{AnimationFrame, ProceduralAnimation};
use crate::pose::Pose;
use crate::segment::{SegmentId, SegmentState};

/// Sample one segment at clip-local time `t` (seconds).
///
/// Returns `None` when no frame defines `segment`. When two defining frames
/// share a timestamp the later one wins, so the bracket span is never zero.
pub fn sample_segment(
    frames: &[AnimationFrame],
    segment: SegmentId,
    t: f32,
) -> Option<SegmentState> {
    let mut before: Option<(f32, &SegmentState)> = None;
    for frame in frames {
        let Some(state) = frame.segments.get(&segment) else {
            continue;
        };
        if frame.time <= t {
            before = Some((frame.time, state));
            continue;
        }
        // First defining frame strictly after t closes the bracket, so
        // t0 <= t < frame.time and the span is positive.
        return Some(match before {
            None => *state,
            Some((t0, left)) => {
                let span = frame.time - t0;
                SegmentState::lerp(left, state, ((t - t0) / span).clamp(0.0, 1.0))
            }
        });
    }
    before.map(|(_, s)| *s)
}

impl ProceduralAnimation {
    /// Pose at clip-local time `t`. Callers wrap or clamp `t` per looping rules.
    pub fn state_at_time(&self, t: f32) -> Pose {
        let mut pose = Pose::new();
        for segment in SegmentId::ALL {
            if let Some(state) = sample_segment(&self.frames, segment, t) {
                pose.insert(segment, state);
            }
        }
        pose
    }
}

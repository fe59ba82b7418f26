//! Accumulation of per-segment contributions and blending into a final Pose.

use crate::pose::Pose;
use crate::segment::{SegmentId, SegmentState, StretchAmount, Vec2};

/// Weighted sums for one segment. Stretch is a step value: the heaviest
/// contribution wins, ties go to the most recent one.
#[derive(Clone, Copy, Debug)]
struct AccumEntry {
    position: Vec2,
    rotation: f32,
    w: f32,
    stretch: StretchAmount,
    stretch_w: f32,
}

impl AccumEntry {
    fn from_state(s: &SegmentState, w: f32) -> Self {
        Self {
            position: Vec2::new(s.position.x * w, s.position.y * w),
            rotation: s.rotation * w,
            w,
            stretch: s.stretch,
            stretch_w: w,
        }
    }

    fn add(&mut self, s: &SegmentState, w: f32) {
        self.position.x += s.position.x * w;
        self.position.y += s.position.y * w;
        self.rotation += s.rotation * w;
        self.w += w;
        if w >= self.stretch_w {
            self.stretch = s.stretch;
            self.stretch_w = w;
        }
    }

    fn finalize(self) -> Option<SegmentState> {
        if self.w > 0.0 {
            Some(SegmentState {
                position: Vec2::new(self.position.x / self.w, self.position.y / self.w),
                rotation: self.rotation / self.w,
                stretch: self.stretch,
            })
        } else {
            None
        }
    }
}

/// Accumulates weighted segment states across active layers.
#[derive(Clone, Debug, Default)]
pub struct PoseAccumulator {
    entries: [Option<AccumEntry>; SegmentId::COUNT],
}

impl PoseAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, segment: SegmentId, state: &SegmentState, weight: f32) {
        if weight <= 0.0 || !weight.is_finite() {
            return;
        }
        match &mut self.entries[segment.index()] {
            Some(entry) => entry.add(state, weight),
            slot @ None => *slot = Some(AccumEntry::from_state(state, weight)),
        }
    }

    pub fn add_pose(&mut self, pose: &Pose, weight: f32) {
        for (segment, state) in pose.iter() {
            self.add(segment, state, weight);
        }
    }

    /// Normalized weighted average per segment; segments nobody touched stay absent.
    pub fn finalize(self) -> Pose {
        SegmentId::ALL
            .into_iter()
            .filter_map(|seg| {
                self.entries[seg.index()]
                    .and_then(AccumEntry::finalize)
                    .map(|s| (seg, s))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_contribution_is_passed_through() {
        let s = SegmentState::new(Vec2::new(3.0, -1.0), 0.4).with_stretch(StretchAmount::Half);
        let mut acc = PoseAccumulator::new();
        acc.add(SegmentId::Head, &s, 0.25);
        let pose = acc.finalize();
        let out = pose.get(SegmentId::Head).unwrap();
        assert!((out.position.x - 3.0).abs() < 1e-6);
        assert!((out.rotation - 0.4).abs() < 1e-6);
        assert_eq!(out.stretch, StretchAmount::Half);
        assert_eq!(pose.len(), 1);
    }

    #[test]
    fn weighted_average_is_normalized() {
        let a = SegmentState::new(Vec2::new(0.0, 0.0), 0.0);
        let b = SegmentState::new(Vec2::new(4.0, 0.0), 1.0).with_stretch(StretchAmount::Full);
        let mut acc = PoseAccumulator::new();
        acc.add(SegmentId::Body, &a, 0.75);
        acc.add(SegmentId::Body, &b, 0.25);
        let out = *acc.finalize().get(SegmentId::Body).unwrap();
        assert!((out.position.x - 1.0).abs() < 1e-6);
        assert!((out.rotation - 0.25).abs() < 1e-6);
        assert_eq!(out.stretch, StretchAmount::None);
    }

    #[test]
    fn zero_weights_are_ignored() {
        let mut acc = PoseAccumulator::new();
        acc.add(SegmentId::Legs, &SegmentState::default(), 0.0);
        assert!(acc.finalize().is_empty());
    }
}

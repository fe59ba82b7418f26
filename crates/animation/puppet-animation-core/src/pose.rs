//! Sparse per-segment poses and the immutable rest-pose snapshot.

use serde::{Deserialize, Serialize};

use crate::segment::{Facing, SegmentId, SegmentState};

/// Sparse mapping from segment to state. Absent segments are "not driven".
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    slots: [Option<SegmentState>; SegmentId::COUNT],
}

impl Pose {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, segment: SegmentId) -> Option<&SegmentState> {
        self.slots[segment.index()].as_ref()
    }

    #[inline]
    pub fn insert(&mut self, segment: SegmentId, state: SegmentState) -> Option<SegmentState> {
        self.slots[segment.index()].replace(state)
    }

    #[inline]
    pub fn remove(&mut self, segment: SegmentId) -> Option<SegmentState> {
        self.slots[segment.index()].take()
    }

    #[inline]
    pub fn contains(&self, segment: SegmentId) -> bool {
        self.slots[segment.index()].is_some()
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Defined segments in [`SegmentId::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (SegmentId, &SegmentState)> + '_ {
        SegmentId::ALL
            .into_iter()
            .filter_map(move |seg| self.get(seg).map(|s| (seg, s)))
    }

    pub fn mirrored(&self, facing: Facing) -> Pose {
        self.iter().map(|(seg, s)| (seg, facing.apply(*s))).collect()
    }
}

impl FromIterator<(SegmentId, SegmentState)> for Pose {
    fn from_iter<I: IntoIterator<Item = (SegmentId, SegmentState)>>(iter: I) -> Self {
        let mut pose = Pose::new();
        for (seg, state) in iter {
            pose.insert(seg, state);
        }
        pose
    }
}

/// Default pose captured once when a player is created. Always complete and
/// never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RestPose(Pose);

impl RestPose {
    /// Capture every segment through a host-provided accessor.
    pub fn capture<F>(mut accessor: F) -> Self
    where
        F: FnMut(SegmentId) -> SegmentState,
    {
        RestPose(SegmentId::ALL.into_iter().map(|s| (s, accessor(s))).collect())
    }

    /// Segments missing from `pose` rest at `SegmentState::default()`.
    pub fn from_pose(pose: &Pose) -> Self {
        Self::capture(|seg| pose.get(seg).copied().unwrap_or_default())
    }

    pub fn get(&self, segment: SegmentId) -> SegmentState {
        self.0.get(segment).copied().unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SegmentId, &SegmentState)> + '_ {
        self.0.iter()
    }

    pub fn as_pose(&self) -> &Pose {
        &self.0
    }
}

impl Default for RestPose {
    fn default() -> Self {
        Self::capture(|_| SegmentState::default())
    }
}

//! Body segments and the per-segment pose value.

use serde::{Deserialize, Serialize};

use crate::interp::functions::lerp_f32;

/// One articulated body part. The set is closed: adding a segment needs
/// matching support on the rendering side.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SegmentId {
    Head,
    Body,
    Legs,
    LeftArm,
    RightArm,
}

impl SegmentId {
    pub const COUNT: usize = 5;

    pub const ALL: [SegmentId; SegmentId::COUNT] = [
        SegmentId::Head,
        SegmentId::Body,
        SegmentId::Legs,
        SegmentId::LeftArm,
        SegmentId::RightArm,
    ];

    /// Dense index in `0..COUNT`, matching the order of [`SegmentId::ALL`].
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            SegmentId::Head => "Head",
            SegmentId::Body => "Body",
            SegmentId::Legs => "Legs",
            SegmentId::LeftArm => "LeftArm",
            SegmentId::RightArm => "RightArm",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        SegmentId::ALL.into_iter().find(|s| s.name() == name)
    }
}

/// Composite arm stretch. Discrete: it is stepped, never interpolated.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StretchAmount {
    #[default]
    None,
    Quarter,
    Half,
    ThreeQuarters,
    Full,
}

impl StretchAmount {
    pub fn fraction(self) -> f32 {
        match self {
            StretchAmount::None => 0.0,
            StretchAmount::Quarter => 0.25,
            StretchAmount::Half => 0.5,
            StretchAmount::ThreeQuarters => 0.75,
            StretchAmount::Full => 1.0,
        }
    }
}

/// 2D offset in host draw units.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn lerp(self, other: Vec2, t: f32) -> Vec2 {
        Vec2 {
            x: lerp_f32(self.x, other.x, t),
            y: lerp_f32(self.y, other.y, t),
        }
    }
}

/// Pose of one segment at one instant, expressed as a delta from the rest pose.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SegmentState {
    pub position: Vec2,
    /// Radians.
    pub rotation: f32,
    #[serde(default)]
    pub stretch: StretchAmount,
}

impl SegmentState {
    pub const fn new(position: Vec2, rotation: f32) -> Self {
        Self {
            position,
            rotation,
            stretch: StretchAmount::None,
        }
    }

    pub const fn with_stretch(mut self, stretch: StretchAmount) -> Self {
        self.stretch = stretch;
        self
    }

    /// Position and rotation blend linearly; stretch snaps to the nearer side.
    pub fn lerp(a: &SegmentState, b: &SegmentState, u: f32) -> SegmentState {
        SegmentState {
            position: a.position.lerp(b.position, u),
            rotation: lerp_f32(a.rotation, b.rotation, u),
            stretch: if u < 0.5 { a.stretch } else { b.stretch },
        }
    }

    /// Horizontal mirror for entities facing the negative direction.
    pub fn mirrored(&self) -> SegmentState {
        SegmentState {
            position: Vec2::new(-self.position.x, self.position.y),
            rotation: -self.rotation,
            stretch: self.stretch,
        }
    }
}

/// Horizontal facing of the posed entity.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Facing {
    #[default]
    Positive,
    Negative,
}

impl Facing {
    /// Map a sign-style direction (`1` / `-1`) onto a facing.
    pub fn from_direction(direction: i32) -> Self {
        if direction < 0 {
            Facing::Negative
        } else {
            Facing::Positive
        }
    }

    #[inline]
    pub fn apply(self, state: SegmentState) -> SegmentState {
        match self {
            Facing::Positive => state,
            Facing::Negative => state.mirrored(),
        }
    }
}

//! Hand-authored clip set registered at startup.
//!
//! Offsets are in host draw units (pixels), rotations in radians. Each clip
//! only keys the segments it animates.

use crate::data::{AnimationFrame, ProceduralAnimation};
use crate::library::AnimationLibrary;
use crate::segment::{SegmentId, SegmentState, StretchAmount, Vec2};

pub const IDLE: &str = "Idle";
pub const WALKING: &str = "Walking";
pub const USE_IDLE: &str = "UseIdle";
pub const USE_WALK: &str = "UseWalk";
pub const JUMP: &str = "Jump";
pub const DASH: &str = "Dash";
pub const DRINK: &str = "Drink";

#[inline]
fn seg(x: f32, y: f32, rotation: f32) -> SegmentState {
    SegmentState::new(Vec2::new(x, y), rotation)
}

/// Slow breathing loop: body and head bob, arms sway slightly.
pub fn idle() -> ProceduralAnimation {
    use SegmentId::*;
    ProceduralAnimation::new(IDLE, "Idle", 2.0, true)
        .with_frame(
            AnimationFrame::new(0.0)
                .with(Head, seg(0.0, 0.0, 0.0))
                .with(Body, seg(0.0, 0.0, 0.0))
                .with(LeftArm, seg(0.0, 0.0, 0.05))
                .with(RightArm, seg(0.0, 0.0, -0.05)),
        )
        .with_frame(
            AnimationFrame::new(1.0)
                .with(Head, seg(0.0, 1.0, 0.02))
                .with(Body, seg(0.0, 1.0, 0.0))
                .with(LeftArm, seg(0.0, 1.0, 0.1))
                .with(RightArm, seg(0.0, 1.0, -0.1)),
        )
        .with_frame(
            AnimationFrame::new(2.0)
                .with(Head, seg(0.0, 0.0, 0.0))
                .with(Body, seg(0.0, 0.0, 0.0))
                .with(LeftArm, seg(0.0, 0.0, 0.05))
                .with(RightArm, seg(0.0, 0.0, -0.05)),
        )
}

fn stride(id: &'static str, name: &'static str, swing_arms: bool) -> ProceduralAnimation {
    use SegmentId::*;
    let mut clip = ProceduralAnimation::new(id, name, 0.8, true);
    for (time, lean, bob, phase) in [
        (0.0, 0.0, 0.0, 1.0),
        (0.2, 0.05, -1.0, 0.0),
        (0.4, 0.0, 0.0, -1.0),
        (0.6, 0.05, -1.0, 0.0),
        (0.8, 0.0, 0.0, 1.0),
    ] {
        let mut frame = AnimationFrame::new(time)
            .with(Body, seg(0.0, bob, lean))
            .with(Head, seg(0.0, bob, lean * 0.5))
            .with(Legs, seg(0.0, 0.0, 0.35 * phase));
        if swing_arms {
            frame = frame
                .with(LeftArm, seg(0.0, bob, -0.4 * phase))
                .with(RightArm, seg(0.0, bob, 0.4 * phase));
        }
        clip.insert_frame(frame);
    }
    clip
}

/// Walk cycle with arm swing.
pub fn walking() -> ProceduralAnimation {
    stride(WALKING, "Walking", true)
}

/// Walk cycle that leaves the arms to the held item.
pub fn use_walk() -> ProceduralAnimation {
    stride(USE_WALK, "Use Walk", false)
}

/// Standing with an item raised. Legs are not keyed.
pub fn use_idle() -> ProceduralAnimation {
    use SegmentId::*;
    ProceduralAnimation::new(USE_IDLE, "Use Idle", 1.0, true)
        .with_frame(
            AnimationFrame::new(0.0)
                .with(Body, seg(0.0, 0.0, 0.0))
                .with(LeftArm, seg(0.0, 0.0, -1.2).with_stretch(StretchAmount::Full))
                .with(RightArm, seg(0.0, 0.0, 0.3)),
        )
        .with_frame(
            AnimationFrame::new(0.5)
                .with(Body, seg(0.0, 0.5, 0.0))
                .with(LeftArm, seg(0.0, 0.5, -1.15).with_stretch(StretchAmount::Full))
                .with(RightArm, seg(0.0, 0.5, 0.35)),
        )
        .with_frame(
            AnimationFrame::new(1.0)
                .with(Body, seg(0.0, 0.0, 0.0))
                .with(LeftArm, seg(0.0, 0.0, -1.2).with_stretch(StretchAmount::Full))
                .with(RightArm, seg(0.0, 0.0, 0.3)),
        )
}

/// Crouch, launch, tuck.
pub fn jump() -> ProceduralAnimation {
    use SegmentId::*;
    ProceduralAnimation::new(JUMP, "Jump", 0.5, false)
        .with_frame(
            AnimationFrame::new(0.0)
                .with(Body, seg(0.0, 2.0, 0.0))
                .with(Legs, seg(0.0, 0.0, 0.0))
                .with(LeftArm, seg(0.0, 2.0, 0.3))
                .with(RightArm, seg(0.0, 2.0, -0.3)),
        )
        .with_frame(
            AnimationFrame::new(0.15)
                .with(Body, seg(0.0, -1.0, -0.05))
                .with(Legs, seg(0.0, 0.0, 0.2))
                .with(LeftArm, seg(0.0, -1.0, -2.2).with_stretch(StretchAmount::ThreeQuarters))
                .with(RightArm, seg(0.0, -1.0, 2.2).with_stretch(StretchAmount::ThreeQuarters)),
        )
        .with_frame(
            AnimationFrame::new(0.5)
                .with(Body, seg(0.0, 0.0, 0.0))
                .with(Legs, seg(0.0, 0.0, 0.0))
                .with(LeftArm, seg(0.0, 0.0, 0.0).with_stretch(StretchAmount::None))
                .with(RightArm, seg(0.0, 0.0, 0.0).with_stretch(StretchAmount::None)),
        )
}

/// Forward lean with arms trailing.
pub fn dash() -> ProceduralAnimation {
    use SegmentId::*;
    ProceduralAnimation::new(DASH, "Dash", 0.4, false)
        .with_frame(
            AnimationFrame::new(0.0)
                .with(Head, seg(0.0, 0.0, 0.0))
                .with(Body, seg(0.0, 0.0, 0.0))
                .with(LeftArm, seg(0.0, 0.0, 0.0))
                .with(RightArm, seg(0.0, 0.0, 0.0)),
        )
        .with_frame(
            AnimationFrame::new(0.1)
                .with(Head, seg(2.0, 1.0, 0.25))
                .with(Body, seg(1.0, 1.0, 0.3))
                .with(LeftArm, seg(-1.0, 1.0, 1.1).with_stretch(StretchAmount::Half))
                .with(RightArm, seg(-1.0, 1.0, 1.3).with_stretch(StretchAmount::Half)),
        )
        .with_frame(
            AnimationFrame::new(0.4)
                .with(Head, seg(0.0, 0.0, 0.0))
                .with(Body, seg(0.0, 0.0, 0.0))
                .with(LeftArm, seg(0.0, 0.0, 0.0).with_stretch(StretchAmount::None))
                .with(RightArm, seg(0.0, 0.0, 0.0).with_stretch(StretchAmount::None)),
        )
}

/// Raise the flask to the mouth, hold, lower. The left arm steps through its
/// stretch sprites on the way up and back down.
pub fn drink() -> ProceduralAnimation {
    use SegmentId::*;
    ProceduralAnimation::new(DRINK, "Drink", 1.0, false)
        .with_frame(
            AnimationFrame::new(0.0)
                .with(Head, seg(0.0, 0.0, 0.0))
                .with(LeftArm, seg(0.0, 0.0, 0.0).with_stretch(StretchAmount::None)),
        )
        .with_frame(
            AnimationFrame::new(0.2)
                .with(LeftArm, seg(0.0, -1.0, -1.6).with_stretch(StretchAmount::Half)),
        )
        .with_frame(
            AnimationFrame::new(0.35)
                .with(Head, seg(0.0, 0.0, -0.3))
                .with(LeftArm, seg(1.0, -2.0, -2.4).with_stretch(StretchAmount::Quarter)),
        )
        .with_frame(
            AnimationFrame::new(0.75)
                .with(Head, seg(0.0, 0.0, -0.3))
                .with(LeftArm, seg(1.0, -2.0, -2.4).with_stretch(StretchAmount::Quarter)),
        )
        .with_frame(
            AnimationFrame::new(1.0)
                .with(Head, seg(0.0, 0.0, 0.0))
                .with(LeftArm, seg(0.0, 0.0, 0.0).with_stretch(StretchAmount::None)),
        )
}

pub fn builtin_clips() -> Vec<ProceduralAnimation> {
    vec![
        idle(),
        walking(),
        use_idle(),
        use_walk(),
        jump(),
        dash(),
        drink(),
    ]
}

pub fn register_builtin_clips(library: &mut AnimationLibrary) {
    for clip in builtin_clips() {
        library.register(clip);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_clips_are_valid_and_end_on_duration() {
        for clip in builtin_clips() {
            clip.validate_basic().expect("builtin clip should validate");
            assert_eq!(clip.last_frame_time(), Some(clip.duration), "{}", clip.id);
        }
    }

    #[test]
    fn use_idle_leaves_legs_alone() {
        assert!(!use_idle().animated_segments().contains(&SegmentId::Legs));
    }

    #[test]
    fn use_walk_does_not_key_arms() {
        let segs = use_walk().animated_segments();
        assert!(!segs.contains(&SegmentId::LeftArm));
        assert!(!segs.contains(&SegmentId::RightArm));
        assert!(segs.contains(&SegmentId::Legs));
    }
}

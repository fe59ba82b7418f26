use std::sync::Arc;

use approx::assert_abs_diff_eq;
use puppet_animation_core::{
    clips, AnimationFrame, AnimationLibrary, AnimationPlayer, Config, DrawContext, DrawParams,
    Facing, LocomotionInputs, PlayerCommand, PlayerEvent, Pose, PoseSink, ProceduralAnimation,
    RestPose, SegmentId, SegmentState, TickInputs, Vec2,
};

const DT: f32 = 1.0 / 60.0;

fn rot(r: f32) -> SegmentState {
    SegmentState::new(Vec2::ZERO, r)
}

fn library_with(extra: Vec<ProceduralAnimation>) -> Arc<AnimationLibrary> {
    let mut lib = AnimationLibrary::with_builtin_clips();
    for clip in extra {
        lib.register(clip);
    }
    Arc::new(lib)
}

fn player_with(extra: Vec<ProceduralAnimation>) -> AnimationPlayer {
    AnimationPlayer::new(library_with(extra), RestPose::default(), Config::default())
}

/// Head rotation 0 → 1 over two seconds.
fn head_ramp() -> ProceduralAnimation {
    ProceduralAnimation::new("Ramp", "Ramp", 2.0, false)
        .with_frame(AnimationFrame::new(0.0).with(SegmentId::Head, rot(0.0)))
        .with_frame(AnimationFrame::new(2.0).with(SegmentId::Head, rot(1.0)))
}

#[test]
fn midpoint_interpolation() {
    let pose = head_ramp().state_at_time(1.0);
    assert_abs_diff_eq!(pose.get(SegmentId::Head).unwrap().rotation, 0.5, epsilon = 1e-6);
}

#[test]
fn sampling_clamps_outside_the_clip() {
    let clip = head_ramp();
    assert_eq!(clip.state_at_time(-5.0).get(SegmentId::Head), Some(&rot(0.0)));
    assert_eq!(clip.state_at_time(100.0).get(SegmentId::Head), Some(&rot(1.0)));
}

#[test]
fn exact_frame_time_returns_frame_value() {
    let walking = clips::walking();
    for frame in &walking.frames {
        let pose = walking.state_at_time(frame.time);
        for (seg, state) in &frame.segments {
            assert_eq!(pose.get(*seg), Some(state), "{seg:?} at {}", frame.time);
        }
    }
}

#[test]
fn single_frame_clip_is_constant() {
    let clip = ProceduralAnimation::new("Hold", "Hold", 1.0, true)
        .with_frame(AnimationFrame::new(0.3).with(SegmentId::Body, rot(0.7)));
    for t in [-1.0, 0.0, 0.3, 0.9, 10.0] {
        assert_eq!(clip.state_at_time(t).get(SegmentId::Body), Some(&rot(0.7)));
    }
}

#[test]
fn looping_clip_wraps_time() {
    let mut p = player_with(vec![]);
    assert!(p.play(clips::WALKING));
    let events = p.advance(1.0).to_vec();
    assert_abs_diff_eq!(p.animation_time(), 0.2, epsilon = 1e-5);
    assert!(events
        .iter()
        .any(|e| matches!(e, PlayerEvent::ClipLooped { clip, .. } if clip == clips::WALKING)));
}

#[test]
fn finished_one_shot_returns_to_idle() {
    let mut p = player_with(vec![]);
    p.play(clips::JUMP);
    let events = p.advance(0.6).to_vec();
    assert_eq!(p.current_animation_id(), Some(clips::IDLE));
    assert_eq!(p.animation_time(), 0.0);
    assert!(p.needs_pose_reset());
    assert!(events
        .iter()
        .any(|e| matches!(e, PlayerEvent::ReturnedToIdle { from } if from == clips::JUMP)));
}

#[test]
fn one_shot_idle_restarts_itself() {
    let one_shot_idle = ProceduralAnimation::new(clips::IDLE, "Idle", 0.5, false)
        .with_frame(AnimationFrame::new(0.0).with(SegmentId::Body, rot(0.0)))
        .with_frame(AnimationFrame::new(0.5).with(SegmentId::Body, rot(1.0)));
    let mut p = player_with(vec![one_shot_idle]);
    p.play(clips::IDLE);
    p.advance(0.6);
    assert_eq!(p.current_animation_id(), Some(clips::IDLE));
    assert_eq!(p.animation_time(), 0.0);
}

#[test]
fn replaying_current_clip_keeps_time() {
    let mut p = player_with(vec![]);
    p.play(clips::WALKING);
    p.advance(0.5);
    let mut sink = Pose::new();
    p.publish(&DrawContext::default(), &mut sink);
    assert!(!p.play(clips::WALKING));
    assert_abs_diff_eq!(p.animation_time(), 0.5, epsilon = 1e-6);
    assert!(!p.needs_pose_reset());
}

/// Counts writes per segment so untouched segments can be told apart.
#[derive(Default)]
struct CountingSink {
    writes: [usize; SegmentId::COUNT],
    last: Pose,
}

impl PoseSink for CountingSink {
    fn apply(&mut self, segment: SegmentId, state: SegmentState) {
        self.writes[segment.index()] += 1;
        self.last.insert(segment, state);
    }
}

#[test]
fn sparse_clip_does_not_touch_undriven_segments() {
    let arms_only = ProceduralAnimation::new("Arms", "Arms", 1.0, true)
        .with_frame(AnimationFrame::new(0.0).with(SegmentId::LeftArm, rot(0.2)))
        .with_frame(AnimationFrame::new(1.0).with(SegmentId::LeftArm, rot(0.4)));
    let mut p = player_with(vec![arms_only]);
    p.play("Arms");

    let mut sink = CountingSink::default();
    // First publish after the switch writes the rest pose everywhere.
    p.publish(&DrawContext::default(), &mut sink);
    assert_eq!(sink.writes[SegmentId::Legs.index()], 1);
    assert_eq!(sink.writes[SegmentId::LeftArm.index()], 2);

    for _ in 0..10 {
        p.advance(DT);
        p.publish(&DrawContext::default(), &mut sink);
    }
    assert_eq!(sink.writes[SegmentId::Legs.index()], 1);
    assert_eq!(sink.writes[SegmentId::Head.index()], 1);
    assert_eq!(sink.writes[SegmentId::LeftArm.index()], 12);
}

#[test]
fn negative_facing_mirrors_output() {
    let pushed = ProceduralAnimation::new("Push", "Push", 1.0, true).with_frame(
        AnimationFrame::new(0.0).with(SegmentId::Head, SegmentState::new(Vec2::new(2.0, 0.0), 0.3)),
    );
    let mut p = player_with(vec![pushed]);
    p.play("Push");
    let mut params = DrawParams::default();
    assert!(p.publish(&DrawContext::facing(Facing::Negative), &mut params));
    assert_eq!(params.head.position, Vec2::new(-2.0, 0.0));
    assert_abs_diff_eq!(params.head.rotation, -0.3);
}

#[test]
fn rest_pose_reset_is_never_mirrored() {
    let rest = RestPose::capture(|seg| match seg {
        SegmentId::Legs => SegmentState::new(Vec2::new(3.0, 1.0), 0.1),
        _ => SegmentState::default(),
    });
    let mut p = AnimationPlayer::new(library_with(vec![]), rest, Config::default());
    p.play(clips::USE_IDLE);
    let mut params = DrawParams::default();
    p.publish(&DrawContext::facing(Facing::Negative), &mut params);
    assert_eq!(params.legs.position, Vec2::new(3.0, 1.0));
    assert_abs_diff_eq!(params.legs.rotation, 0.1);
}

#[test]
fn empty_id_registration_is_ignored() {
    let mut lib = AnimationLibrary::with_builtin_clips();
    let before = lib.ids().into_iter().map(str::to_owned).collect::<Vec<_>>();
    let inserted = lib.register(
        ProceduralAnimation::new("", "Blank", 1.0, true)
            .with_frame(AnimationFrame::new(0.0).with(SegmentId::Head, rot(1.0))),
    );
    assert!(!inserted);
    assert_eq!(lib.ids(), before);
}

#[test]
fn paused_ticks_do_not_advance() {
    let mut p = player_with(vec![]);
    let walk = LocomotionInputs {
        moving: true,
        ..LocomotionInputs::default()
    };
    p.update(&TickInputs::running(1, walk));
    let t = p.animation_time();
    let paused = TickInputs {
        tick: 2,
        paused: true,
        locomotion: walk,
        commands: vec![],
    };
    for _ in 0..5 {
        p.update(&paused);
    }
    assert_eq!(p.animation_time(), t);
    p.update(&TickInputs::running(2, walk));
    assert_abs_diff_eq!(p.animation_time(), 2.0 * DT, epsilon = 1e-6);
}

#[test]
fn one_shot_is_not_interrupted_by_use_or_afk() {
    let mut p = player_with(vec![]);
    p.play(clips::DRINK);
    let using = LocomotionInputs {
        using_item: true,
        afk: true,
        ..LocomotionInputs::default()
    };
    for tick in 1..=10 {
        p.update(&TickInputs::running(tick, using));
    }
    assert_eq!(p.current_animation_id(), Some(clips::DRINK));

    // Walking still wins over an in-progress one-shot.
    let walk = LocomotionInputs {
        moving: true,
        ..LocomotionInputs::default()
    };
    p.update(&TickInputs::running(11, walk));
    assert_eq!(p.current_animation_id(), Some(clips::WALKING));
}

#[test]
fn commands_play_on_layers() {
    let mut p = player_with(vec![]);
    let mut inputs = TickInputs::running(1, LocomotionInputs::default());
    inputs.commands = vec![
        PlayerCommand::Play {
            clip: clips::IDLE.into(),
            layer: Default::default(),
        },
        PlayerCommand::Play {
            clip: "Missing".into(),
            layer: Default::default(),
        },
    ];
    let events = p.update(&inputs).to_vec();
    assert_eq!(p.current_animation_id(), Some(clips::IDLE));
    assert_eq!(
        events
            .iter()
            .filter(|e| matches!(e, PlayerEvent::ClipStarted { .. }))
            .count(),
        1
    );
}

#[test]
fn config_tick_rate_drives_update_step() {
    let cfg = Config {
        tick_rate_hz: 30.0,
        ..Config::default()
    };
    let mut p = AnimationPlayer::new(library_with(vec![]), RestPose::default(), cfg);
    let afk = LocomotionInputs {
        afk: true,
        ..LocomotionInputs::default()
    };
    p.update(&TickInputs::running(0, afk));
    assert_abs_diff_eq!(p.animation_time(), 1.0 / 30.0, epsilon = 1e-6);
}

use std::sync::Arc;

use approx::assert_abs_diff_eq;
use puppet_animation_core::{
    AnimationFrame, AnimationLayer, AnimationLibrary, AnimationPlayer, BlendSettings, Config,
    DrawContext, Easing, PlayerEvent, Pose, ProceduralAnimation, RestPose, SegmentId,
    SegmentState, Vec2,
};

fn rot(r: f32) -> SegmentState {
    SegmentState::new(Vec2::ZERO, r)
}

/// Every segment held at rotation `r`.
fn still(id: &str, r: f32, looping: bool, duration: f32) -> ProceduralAnimation {
    let mut frame = AnimationFrame::new(0.0);
    for seg in SegmentId::ALL {
        frame = frame.with(seg, rot(r));
    }
    ProceduralAnimation::new(id, id, duration, looping).with_frame(frame)
}

fn player(blend: BlendSettings) -> AnimationPlayer {
    let mut lib = AnimationLibrary::new();
    lib.register(still("Idle", 0.0, true, 1.0));
    lib.register(still("A", 0.0, true, 1.0));
    lib.register(still("B", 1.0, true, 1.0));
    lib.register(still("Wave", 2.0, false, 0.5));
    let cfg = Config {
        blend,
        ..Config::default()
    };
    AnimationPlayer::new(Arc::new(lib), RestPose::default(), cfg)
}

fn head(p: &AnimationPlayer) -> f32 {
    p.current_pose().get(SegmentId::Head).map_or(f32::NAN, |s| s.rotation)
}

#[test]
fn crossfade_weights_follow_envelopes() {
    let mut p = player(BlendSettings {
        blend_in: 0.5,
        blend_out: 0.5,
        easing: Easing::Linear,
    });
    p.play("A");
    p.advance(0.5);
    assert_abs_diff_eq!(head(&p), 0.0);

    p.play("B");
    assert_eq!(p.layers().len(), 2);
    p.advance(0.25);
    // A at 0.5, B at 0.5.
    assert_abs_diff_eq!(head(&p), 0.5, epsilon = 1e-5);

    let events = p.advance(0.3).to_vec();
    assert_eq!(p.layers().len(), 1);
    assert_abs_diff_eq!(head(&p), 1.0, epsilon = 1e-5);
    assert!(events.iter().any(|e| matches!(
        e,
        PlayerEvent::LayerBlendedOut { clip, .. } if clip == "A"
    )));
}

#[test]
fn lone_clip_blending_in_shows_full_pose() {
    let mut p = player(BlendSettings {
        blend_in: 1.0,
        ..BlendSettings::default()
    });
    p.play("B");
    p.advance(0.1);
    let active = p.current_animation().unwrap();
    assert!(active.is_blending_in);
    assert_abs_diff_eq!(active.blend_factor, 0.1, epsilon = 1e-6);
    // Normalized by total weight.
    assert_abs_diff_eq!(head(&p), 1.0, epsilon = 1e-6);
}

#[test]
fn upper_body_overlay_leaves_legs_to_base() {
    let mut p = player(BlendSettings::default());
    p.play("A");
    p.play_on(AnimationLayer::UpperBody, "B");
    let pose = p.current_pose();
    assert_abs_diff_eq!(pose.get(SegmentId::Legs).unwrap().rotation, 0.0);
    assert_abs_diff_eq!(pose.get(SegmentId::LeftArm).unwrap().rotation, 0.5);
}

#[test]
fn lower_body_layer_only_drives_legs() {
    let mut p = player(BlendSettings::default());
    p.play_on(AnimationLayer::LowerBody, "B");
    let pose = p.current_pose();
    assert_eq!(pose.len(), 1);
    assert!(pose.contains(SegmentId::Legs));
    // Base layer is untouched by overlays.
    assert!(p.current_animation().is_none());
}

#[test]
fn overlay_one_shot_fades_out_without_touching_base() {
    let mut p = player(BlendSettings::default());
    p.play("A");
    p.play_on(AnimationLayer::UpperBody, "Wave");
    let events = p.advance(0.6).to_vec();
    assert!(events.iter().any(|e| matches!(
        e,
        PlayerEvent::ClipFinished { layer: AnimationLayer::UpperBody, clip } if clip == "Wave"
    )));
    assert!(!events
        .iter()
        .any(|e| matches!(e, PlayerEvent::ReturnedToIdle { .. })));
    assert_eq!(p.current_animation_id(), Some("A"));
    assert_eq!(p.layers().len(), 1);
}

#[test]
fn stop_layer_with_fade_keeps_entry_until_blended_out() {
    let mut p = player(BlendSettings {
        blend_out: 0.2,
        ..BlendSettings::default()
    });
    p.play_on(AnimationLayer::UpperBody, "B");
    p.stop_layer(AnimationLayer::UpperBody);
    assert_eq!(p.layers().len(), 1);
    p.advance(0.1);
    assert_eq!(p.layers().len(), 1);
    p.advance(0.15);
    assert!(p.layers().is_empty());
    assert_eq!(p.current_pose(), Pose::new());
}

#[test]
fn smoothstep_envelope_is_eased() {
    let mut p = player(BlendSettings {
        blend_in: 1.0,
        easing: Easing::SmoothStep,
        ..BlendSettings::default()
    });
    p.play("A");
    p.play_on(AnimationLayer::UpperBody, "B");
    p.advance(0.25);
    let overlay = p
        .layers()
        .iter()
        .find(|a| a.layer == AnimationLayer::UpperBody)
        .unwrap();
    // 3t^2 - 2t^3 at t = 0.25
    assert_abs_diff_eq!(overlay.blend_factor, 0.15625, epsilon = 1e-5);
}

#[test]
fn publish_after_crossfade_writes_blended_values() {
    let mut p = player(BlendSettings {
        blend_in: 1.0,
        blend_out: 1.0,
        easing: Easing::Linear,
    });
    p.play("A");
    p.advance(1.0);
    p.play("B");
    p.advance(0.5);
    let mut out = Pose::new();
    assert!(p.publish(&DrawContext::default(), &mut out));
    assert_abs_diff_eq!(out.get(SegmentId::Body).unwrap().rotation, 0.5, epsilon = 1e-5);
}

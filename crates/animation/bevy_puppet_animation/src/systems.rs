use bevy::prelude::*;
use puppet_animation_core::{AnimationPlayer, DrawContext, RestPose, TickInputs};

use crate::components::{
    FacingDirection, Locomotion, PoseGate, Puppet, PuppetCommands, PuppetDrawParams, PuppetRig,
    PuppetSegment, SegmentRest,
};
use crate::resources::{MenuState, PuppetConfig, PuppetEvent, PuppetLibrary, SimulationClock};

/// Advance the host tick counter unless the simulation is paused.
pub fn advance_clock_system(mut clock: ResMut<SimulationClock>) {
    if !clock.paused {
        clock.tick += 1;
    }
}

/// Record the authored transform of every new segment entity.
pub fn capture_segment_rest_system(
    mut commands: Commands,
    segments: Query<(Entity, &Transform), (With<PuppetSegment>, Without<SegmentRest>)>,
) {
    for (entity, tf) in segments.iter() {
        commands.entity(entity).insert(SegmentRest(*tf));
    }
}

/// Create a player for each rig that has none yet. The rest pose is taken
/// from the rig's draw parameters at this moment and never refreshed.
/// Events from starting the initial clip are forwarded here, since the
/// player's next `update` starts a fresh event buffer.
pub fn attach_players_system(
    mut commands: Commands,
    library: Res<PuppetLibrary>,
    cfg: Res<PuppetConfig>,
    rigs: Query<(Entity, &PuppetRig, Option<&PuppetDrawParams>), Without<Puppet>>,
    mut events: EventWriter<PuppetEvent>,
) {
    for (entity, rig, params) in rigs.iter() {
        let params = params.copied().unwrap_or_default();
        let rest = RestPose::capture(|seg| params.0.state(seg));
        let mut player = AnimationPlayer::new(library.0.clone(), rest, cfg.0.clone());
        if let Some(id) = rig.initial_clip.as_deref() {
            if !player.play(id) {
                warn!("rig {entity:?}: initial clip '{id}' is not registered");
            }
        }
        for event in player.events() {
            events.send(PuppetEvent {
                entity,
                event: event.clone(),
            });
        }
        commands
            .entity(entity)
            .insert((Puppet(player), params));
    }
}

/// Fixed-timestep compute: feed locomotion flags and queued commands to each
/// player and forward the events it raised.
pub fn tick_players_system(
    clock: Res<SimulationClock>,
    mut rigs: Query<(
        Entity,
        &mut Puppet,
        Option<&Locomotion>,
        Option<&mut PuppetCommands>,
    )>,
    mut events: EventWriter<PuppetEvent>,
) {
    for (entity, mut puppet, locomotion, queued) in rigs.iter_mut() {
        let inputs = TickInputs {
            tick: clock.tick,
            paused: clock.paused,
            locomotion: locomotion.map(|l| l.0).unwrap_or_default(),
            commands: queued
                .map(|mut q| std::mem::take(&mut q.0))
                .unwrap_or_default(),
        };
        for event in puppet.0.update(&inputs) {
            events.send(PuppetEvent {
                entity,
                event: event.clone(),
            });
        }
    }
}

/// Publish each player's pose into its rig's draw parameters.
pub fn publish_poses_system(
    menu: Res<MenuState>,
    mut rigs: Query<(
        &mut Puppet,
        &mut PuppetDrawParams,
        Option<&FacingDirection>,
        Option<&PoseGate>,
    )>,
) {
    for (mut puppet, mut params, facing, gate) in rigs.iter_mut() {
        let ctx = DrawContext {
            in_menu: menu.in_menu,
            posable: gate.map_or(true, |g| g.posable),
            facing: facing.map(|f| f.0).unwrap_or_default(),
        };
        puppet.0.publish(&ctx, &mut params.0);
    }
}

/// Write published offsets onto segment transforms under each rig.
pub fn apply_segment_transforms_system(
    rigs: Query<(Entity, &PuppetDrawParams), Changed<PuppetDrawParams>>,
    children: Query<&Children>,
    mut segments: Query<(&PuppetSegment, &SegmentRest, &mut Transform)>,
) {
    fn walk(
        e: Entity,
        params: &PuppetDrawParams,
        children: &Query<&Children>,
        segments: &mut Query<(&PuppetSegment, &SegmentRest, &mut Transform)>,
    ) {
        if let Ok((segment, rest, mut tf)) = segments.get_mut(e) {
            let p = params.0.get(segment.0);
            tf.translation = rest.0.translation + Vec3::new(p.position.x, p.position.y, 0.0);
            tf.rotation = rest.0.rotation * Quat::from_rotation_z(p.rotation);
        }
        if let Ok(cs) = children.get(e) {
            for &c in cs.iter() {
                walk(c, params, children, segments);
            }
        }
    }

    for (root, params) in rigs.iter() {
        walk(root, params, &children, &mut segments);
    }
}

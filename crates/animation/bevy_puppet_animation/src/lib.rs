//! Bevy host for the puppet animation core.
//!
//! The plugin owns the fixed tick, pause flag and draw sink the core expects:
//! players advance in `FixedUpdate` and publish in `PostUpdate`, ahead of
//! transform propagation.

use bevy::prelude::*;
use bevy::transform::TransformSystem;
use puppet_animation_core::Config;

pub mod components;
pub mod resources;
pub mod systems;

pub use components::{
    FacingDirection, Locomotion, PoseGate, Puppet, PuppetCommands, PuppetDrawParams, PuppetRig,
    PuppetSegment, SegmentRest,
};
pub use resources::{MenuState, PuppetConfig, PuppetEvent, PuppetLibrary, SimulationClock};

#[derive(Default)]
pub struct PuppetAnimationPlugin {
    pub config: Config,
}

impl Plugin for PuppetAnimationPlugin {
    fn build(&self, app: &mut App) {
        // Apps may register their own clips before adding the plugin.
        if !app.world().contains_resource::<PuppetLibrary>() {
            app.insert_resource(PuppetLibrary::default());
        }
        app.insert_resource(PuppetConfig(self.config.clone()))
            .insert_resource(Time::<Fixed>::from_seconds(self.config.fixed_dt() as f64))
            .init_resource::<SimulationClock>()
            .init_resource::<MenuState>()
            .add_event::<PuppetEvent>()
            .add_systems(
                FixedUpdate,
                (
                    systems::advance_clock_system,
                    systems::capture_segment_rest_system,
                    systems::attach_players_system,
                    systems::tick_players_system,
                )
                    .chain(),
            )
            .add_systems(
                PostUpdate,
                (
                    systems::publish_poses_system,
                    systems::apply_segment_transforms_system,
                )
                    .chain()
                    .before(TransformSystem::TransformPropagate),
            );
    }
}

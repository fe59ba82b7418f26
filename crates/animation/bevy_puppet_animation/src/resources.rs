use std::sync::Arc;

use bevy::prelude::*;
use puppet_animation_core::{AnimationLibrary, Config, PlayerEvent};

/// Clip registry shared by every rig.
#[derive(Resource, Clone, Debug)]
pub struct PuppetLibrary(pub Arc<AnimationLibrary>);

impl Default for PuppetLibrary {
    fn default() -> Self {
        Self(Arc::new(AnimationLibrary::with_builtin_clips()))
    }
}

#[derive(Resource, Clone, Debug, Default)]
pub struct PuppetConfig(pub Config);

/// Host simulation counter. `tick` only moves while not paused, and players
/// skip ticks they have already seen.
#[derive(Resource, Clone, Copy, Debug, Default)]
pub struct SimulationClock {
    pub tick: u64,
    pub paused: bool,
}

/// Publishing is suppressed while a menu is open.
#[derive(Resource, Clone, Copy, Debug, Default)]
pub struct MenuState {
    pub in_menu: bool,
}

/// Player event tagged with the rig that raised it.
#[derive(Event, Clone, Debug)]
pub struct PuppetEvent {
    pub entity: Entity,
    pub event: PlayerEvent,
}

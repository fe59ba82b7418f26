//! Player: per-entity driver over the layer stack.
//!
//! Methods:
//! - new, play/play_on/play_clip, stop_layer, update (commands → state selection → advance), publish

use std::collections::VecDeque;
use std::sync::Arc;

use crate::active::{ActiveAnimation, AnimationLayer};
use crate::config::Config;
use crate::data::ProceduralAnimation;
use crate::inputs::{DrawContext, PlayerCommand, TickInputs};
use crate::library::AnimationLibrary;
use crate::mixer::{LayerStack, LayerTick, LayerTickKind};
use crate::outputs::PlayerEvent;
use crate::pose::{Pose, RestPose};
use crate::sink::{PoseProvider, PoseSink};
use crate::state::select_clip;

/// Animation state for one posed entity. Clips are borrowed from a shared
/// library; the rest pose is captured once and never mutated.
#[derive(Debug)]
pub struct AnimationPlayer {
    library: Arc<AnimationLibrary>,
    rest_pose: RestPose,
    cfg: Config,
    layers: LayerStack,
    needs_pose_reset: bool,
    last_tick: Option<u64>,
    events: Vec<PlayerEvent>,
}

impl AnimationPlayer {
    /// Create a player. Nothing plays until the first `play` or `update`.
    pub fn new(library: Arc<AnimationLibrary>, rest_pose: RestPose, cfg: Config) -> Self {
        Self {
            library,
            rest_pose,
            cfg,
            layers: LayerStack::new(),
            needs_pose_reset: false,
            last_tick: None,
            events: Vec::new(),
        }
    }

    /// Play a registered clip on the base layer. Unknown ids are ignored.
    pub fn play(&mut self, id: &str) -> bool {
        self.play_on(AnimationLayer::Base, id)
    }

    pub fn play_on(&mut self, layer: AnimationLayer, id: &str) -> bool {
        let clip = self.library.get(id);
        if clip.is_none() {
            log::debug!("ignoring play of unknown clip '{id}' on {layer:?}");
        }
        self.play_clip_on(layer, clip)
    }

    pub fn play_clip(&mut self, clip: Option<Arc<ProceduralAnimation>>) -> bool {
        self.play_clip_on(AnimationLayer::Base, clip)
    }

    /// Switch `layer` to `clip`. `None` and the already-current clip are
    /// no-ops. A real switch starts at time 0 and schedules a pose reset.
    pub fn play_clip_on(
        &mut self,
        layer: AnimationLayer,
        clip: Option<Arc<ProceduralAnimation>>,
    ) -> bool {
        let Some(clip) = clip else {
            return false;
        };
        let id = clip.id.clone();
        let Some(removed) = self.layers.play(clip, layer, self.cfg.blend) else {
            return false;
        };
        log::debug!("{layer:?}: switched to '{id}'");
        self.needs_pose_reset = true;
        for tick in removed {
            self.events.push(PlayerEvent::LayerBlendedOut {
                layer: tick.layer,
                clip: tick.clip,
            });
        }
        self.events.push(PlayerEvent::ClipStarted { layer, clip: id });
        true
    }

    /// Fade out whatever plays on `layer`.
    pub fn stop_layer(&mut self, layer: AnimationLayer) {
        self.layers.stop(layer);
    }

    /// Per-tick entry point. Commands are applied even while paused; clocks
    /// only move on a fresh, unpaused tick.
    pub fn update(&mut self, inputs: &TickInputs) -> &[PlayerEvent] {
        self.events.clear();

        for cmd in &inputs.commands {
            match cmd {
                PlayerCommand::Play { clip, layer } => {
                    self.play_on(*layer, clip);
                }
                PlayerCommand::Stop { layer } => self.stop_layer(*layer),
            }
        }

        if inputs.paused || self.last_tick == Some(inputs.tick) {
            return &self.events;
        }
        self.last_tick = Some(inputs.tick);

        let next = select_clip(
            &inputs.locomotion,
            self.layers.current(AnimationLayer::Base),
            &self.cfg.state_clips,
            self.cfg.use_walk_priority,
        )
        .map(str::to_owned);
        if let Some(id) = next {
            self.play(&id);
        }

        let dt = self.cfg.fixed_dt();
        self.step(dt);
        &self.events
    }

    /// Advance every layer by `dt` seconds without state selection or tick
    /// gating. Returns the events raised by this step alone.
    pub fn advance(&mut self, dt: f32) -> &[PlayerEvent] {
        self.events.clear();
        self.step(dt);
        &self.events
    }

    fn step(&mut self, dt: f32) {
        let mut pending: VecDeque<LayerTick> = self.layers.advance(dt).into();
        while let Some(tick) = pending.pop_front() {
            match tick.kind {
                LayerTickKind::Looped => {
                    log::trace!("{:?}: '{}' looped", tick.layer, tick.clip);
                    self.events.push(PlayerEvent::ClipLooped {
                        layer: tick.layer,
                        clip: tick.clip,
                    });
                }
                LayerTickKind::Finished => {
                    self.events.push(PlayerEvent::ClipFinished {
                        layer: tick.layer,
                        clip: tick.clip.clone(),
                    });
                    if tick.layer == AnimationLayer::Base {
                        self.return_to_idle(tick.clip);
                    } else {
                        // Zero blend-out removes the overlay this tick.
                        self.layers.stop(tick.layer);
                        pending.extend(self.layers.prune());
                    }
                }
                LayerTickKind::BlendedOut => {
                    self.events.push(PlayerEvent::LayerBlendedOut {
                        layer: tick.layer,
                        clip: tick.clip,
                    });
                }
            }
        }
    }

    fn return_to_idle(&mut self, from: String) {
        let idle = self.cfg.state_clips.idle.clone();
        log::debug!("'{from}' finished, returning to '{idle}'");
        if from == idle {
            self.layers.restart(AnimationLayer::Base);
            self.needs_pose_reset = true;
        } else if !self.play(&idle) {
            // No idle clip registered: hold the clamped last frame.
            return;
        }
        self.events.push(PlayerEvent::ReturnedToIdle { from });
    }

    /// Base-layer clip that is current (not fading out).
    pub fn current_animation(&self) -> Option<&ActiveAnimation> {
        self.layers.current(AnimationLayer::Base)
    }

    pub fn current_animation_id(&self) -> Option<&str> {
        self.current_animation().map(ActiveAnimation::id)
    }

    /// Clip-local time of the current base clip, 0 when nothing plays.
    pub fn animation_time(&self) -> f32 {
        self.current_animation().map_or(0.0, |a| a.time)
    }

    pub fn rest_pose(&self) -> &RestPose {
        &self.rest_pose
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    pub fn library(&self) -> &Arc<AnimationLibrary> {
        &self.library
    }

    pub fn layers(&self) -> &LayerStack {
        &self.layers
    }

    pub fn needs_pose_reset(&self) -> bool {
        self.needs_pose_reset
    }

    /// Events raised by the last `update`/`advance`.
    pub fn events(&self) -> &[PlayerEvent] {
        &self.events
    }

    /// Composite of every layer, unmirrored.
    pub fn current_pose(&self) -> Pose {
        self.layers.composite()
    }

    /// Write the current pose into `sink`. Skipped in menus or when the host
    /// says the entity cannot be posed. After a clip switch the rest pose is
    /// written first so segments the new clip does not drive lose the old
    /// clip's offsets.
    pub fn publish<S: PoseSink + ?Sized>(&mut self, ctx: &DrawContext, sink: &mut S) -> bool {
        if ctx.in_menu || !ctx.posable {
            return false;
        }
        if self.needs_pose_reset {
            for (seg, state) in self.rest_pose.iter() {
                sink.apply(seg, *state);
            }
            self.needs_pose_reset = false;
        }
        for (seg, state) in self.layers.composite().iter() {
            sink.apply(seg, ctx.facing.apply(*state));
        }
        true
    }
}

impl PoseProvider for AnimationPlayer {
    /// Samples the current base clip at `time`, or the rest pose when idle.
    fn resolve_pose(&self, time: f32) -> Pose {
        match self.current_animation() {
            Some(active) => active.animation.state_at_time(time),
            None => self.rest_pose.as_pose().clone(),
        }
    }
}

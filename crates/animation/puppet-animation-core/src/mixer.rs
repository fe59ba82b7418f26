//! Layer stack: active clips per layer, advanced and composited every tick.

use std::sync::Arc;

use crate::accumulate::PoseAccumulator;
use crate::active::{ActiveAnimation, AnimationLayer, BlendSettings, ClipProgress};
use crate::data::ProceduralAnimation;
use crate::pose::Pose;

/// What happened to one entry during [`LayerStack::advance`].
#[derive(Clone, Debug, PartialEq)]
pub struct LayerTick {
    pub layer: AnimationLayer,
    pub clip: String,
    pub kind: LayerTickKind,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LayerTickKind {
    Looped,
    Finished,
    BlendedOut,
}

/// Active clips ordered oldest first. Each layer has at most one current
/// entry (not blending out) plus any entries still fading away.
#[derive(Clone, Debug, Default)]
pub struct LayerStack {
    entries: Vec<ActiveAnimation>,
}

impl LayerStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `animation` the current clip of `layer`. Returns `None`, leaving
    /// time untouched, when that clip is already current on the layer.
    /// Otherwise returns the entries removed because an instant blend-out
    /// finished them on the spot.
    pub fn play(
        &mut self,
        animation: Arc<ProceduralAnimation>,
        layer: AnimationLayer,
        blend: BlendSettings,
    ) -> Option<Vec<LayerTick>> {
        if self
            .current(layer)
            .is_some_and(|cur| cur.id() == animation.id)
        {
            return None;
        }
        self.stop(layer);
        self.entries
            .push(ActiveAnimation::new(animation, layer, blend));
        Some(self.prune())
    }

    pub fn current(&self, layer: AnimationLayer) -> Option<&ActiveAnimation> {
        self.entries
            .iter()
            .rev()
            .find(|e| e.layer == layer && !e.is_blending_out)
    }

    pub fn current_mut(&mut self, layer: AnimationLayer) -> Option<&mut ActiveAnimation> {
        self.entries
            .iter_mut()
            .rev()
            .find(|e| e.layer == layer && !e.is_blending_out)
    }

    /// Fade out everything current on `layer`.
    pub fn stop(&mut self, layer: AnimationLayer) {
        for e in self.entries.iter_mut().filter(|e| e.layer == layer) {
            e.begin_blend_out();
        }
    }

    /// Rewind the current clip of `layer` to time 0.
    pub fn restart(&mut self, layer: AnimationLayer) -> bool {
        match self.current_mut(layer) {
            Some(cur) => {
                cur.restart();
                true
            }
            None => false,
        }
    }

    /// Advance envelopes and clocks of every entry by `dt`. Loop and finish
    /// notices are reported for current entries only; entries that finished
    /// fading are removed and reported as blended out.
    pub fn advance(&mut self, dt: f32) -> Vec<LayerTick> {
        let mut ticks = Vec::new();
        for e in self.entries.iter_mut() {
            e.advance_blend(dt);
            let progress = e.advance_time(dt);
            if e.is_blending_out {
                continue;
            }
            let kind = match progress {
                ClipProgress::Playing => continue,
                ClipProgress::Looped => LayerTickKind::Looped,
                ClipProgress::Finished => LayerTickKind::Finished,
            };
            ticks.push(LayerTick {
                layer: e.layer,
                clip: e.id().to_string(),
                kind,
            });
        }
        ticks.extend(self.prune());
        ticks
    }

    /// Drop entries whose blend-out has completed, reporting each one.
    pub fn prune(&mut self) -> Vec<LayerTick> {
        let mut removed = Vec::new();
        self.entries.retain(|e| {
            if e.is_blended_out() {
                removed.push(LayerTick {
                    layer: e.layer,
                    clip: e.id().to_string(),
                    kind: LayerTickKind::BlendedOut,
                });
                false
            } else {
                true
            }
        });
        removed
    }

    /// Weighted composite of all entries by blend factor.
    pub fn composite(&self) -> Pose {
        let mut acc = PoseAccumulator::new();
        for e in &self.entries {
            if e.blend_factor > 0.0 {
                acc.add_pose(&e.sample(), e.blend_factor);
            }
        }
        acc.finalize()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActiveAnimation> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

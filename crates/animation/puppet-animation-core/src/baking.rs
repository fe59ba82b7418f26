//! Baking API: sample a clip at fixed ticks into a flat pose table.

use serde::{Deserialize, Serialize};

use crate::data::ProceduralAnimation;
use crate::pose::Pose;

const DEFAULT_FRAME_RATE: f32 = 60.0;
/// Ten minutes at 60 Hz.
const DEFAULT_MAX_FRAMES: usize = 36_000;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct BakingConfig {
    /// Target frame rate (Hz) for baked samples.
    pub frame_rate: f32,
    /// Upper bound on baked samples. Longer clips are truncated.
    pub max_frames: usize,
}

impl Default for BakingConfig {
    fn default() -> Self {
        Self {
            frame_rate: DEFAULT_FRAME_RATE,
            max_frames: DEFAULT_MAX_FRAMES,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BakedClip {
    pub clip_id: String,
    pub frame_rate: f32,
    pub duration: f32,
    pub looping: bool,
    /// One pose per tick over `[0, duration]`, end inclusive.
    pub frames: Vec<Pose>,
    /// Set when `max_frames` cut the bake short of `duration`.
    pub truncated: bool,
}

impl BakedClip {
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Pose at `tick`, wrapped for looping clips and clamped otherwise.
    pub fn pose_at_tick(&self, tick: usize) -> Option<&Pose> {
        let n = self.frames.len();
        if n == 0 {
            return None;
        }
        let idx = if self.looping && n > 1 {
            // Last sample duplicates time 0 of the next cycle.
            tick % (n - 1)
        } else {
            tick.min(n - 1)
        };
        self.frames.get(idx)
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

/// Bake `clip` by sampling every `1/frame_rate` seconds. The final sample is
/// taken exactly at the duration unless `max_frames` truncates the bake.
pub fn bake_clip(clip: &ProceduralAnimation, cfg: &BakingConfig) -> BakedClip {
    let sr = if cfg.frame_rate.is_finite() && cfg.frame_rate > 0.0 {
        cfg.frame_rate
    } else {
        DEFAULT_FRAME_RATE
    };
    let duration = clip.duration.max(0.0);
    // `as` saturates, so an infinite product lands on usize::MAX.
    let wanted = ((duration * sr).ceil() as usize).saturating_add(1);
    let cap = cfg.max_frames.max(1);
    let frame_count = wanted.min(cap);
    if wanted > cap {
        log::warn!(
            "clip '{}': baking truncated to {} of {} frames",
            clip.id,
            cap,
            wanted
        );
    }
    let frames = (0..frame_count)
        .map(|f| {
            let t = (f as f32 / sr).min(duration);
            clip.state_at_time(t)
        })
        .collect();
    BakedClip {
        clip_id: clip.id.clone(),
        frame_rate: sr,
        duration,
        looping: clip.looping,
        frames,
        truncated: wanted > cap,
    }
}

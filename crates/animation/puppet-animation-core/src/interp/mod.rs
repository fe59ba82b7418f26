//! Easing curves for blend envelopes.

pub mod functions;

use serde::{Deserialize, Serialize};

/// Shape applied to a linear 0..1 progress value.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Easing {
    #[default]
    Linear,
    SmoothStep,
    CubicBezier { x1: f32, y1: f32, x2: f32, y2: f32 },
}

impl Easing {
    /// Eased value of `t`, clamped to [0,1] on input.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::SmoothStep => functions::smoothstep(t),
            Easing::CubicBezier { x1, y1, x2, y2 } => functions::bezier_ease_t(t, x1, y1, x2, y2),
        }
    }
}

//! Events emitted by the player while stepping.

use serde::{Deserialize, Serialize};

use crate::active::AnimationLayer;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum PlayerEvent {
    ClipStarted {
        layer: AnimationLayer,
        clip: String,
    },
    ClipLooped {
        layer: AnimationLayer,
        clip: String,
    },
    ClipFinished {
        layer: AnimationLayer,
        clip: String,
    },
    /// A base-layer one-shot ended and the idle clip took over.
    ReturnedToIdle {
        from: String,
    },
    LayerBlendedOut {
        layer: AnimationLayer,
        clip: String,
    },
}

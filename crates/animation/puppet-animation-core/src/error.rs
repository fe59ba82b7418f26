//! Error types for clip loading and validation.
//!
//! Playback itself never fails: unknown clips are ignored and sampling always
//! yields a pose. Errors only surface when clips or configs are built from
//! external data.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum AnimationError {
    #[error("clip parse error: {0}")]
    Parse(String),

    #[error("config parse error: {0}")]
    Config(String),

    #[error("unknown segment '{name}' in clip '{clip}'")]
    UnknownSegment { clip: String, name: String },

    #[error("clip '{clip}' has no frames")]
    EmptyClip { clip: String },

    #[error("clip '{clip}': frame {index} has non-finite time {time}")]
    NonFiniteTime { clip: String, index: usize, time: f32 },

    #[error("clip '{clip}': frame {index} at {time}s precedes previous frame at {previous}s")]
    UnsortedFrames {
        clip: String,
        index: usize,
        time: f32,
        previous: f32,
    },

    #[error("clip '{clip}': invalid duration {duration}")]
    InvalidDuration { clip: String, duration: f32 },
}

pub type Result<T> = std::result::Result<T, AnimationError>;

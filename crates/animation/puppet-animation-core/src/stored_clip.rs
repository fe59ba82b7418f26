//! Stored clip format: camelCase JSON converted into [`ProceduralAnimation`].

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::data::{AnimationFrame, ProceduralAnimation};
use crate::error::{AnimationError, Result};
use crate::segment::{SegmentId, SegmentState, StretchAmount, Vec2};

/// Parse one stored clip (camelCase JSON object) into a [`ProceduralAnimation`].
///
/// Notes:
/// - Duration and frame times are seconds.
/// - Frames must be listed in non-decreasing time order; equal timestamps
///   keep file order. Out-of-order frames fail with `UnsortedFrames`.
/// - Segment keys use the canonical segment names (`Head`, `LeftArm`, ...).
/// - `position` accepts `{ "x": .., "y": .. }` or `[x, y]`; `stretch` accepts a
///   step name or a fraction in [0,1] snapped to the nearest step.
/// - A duration that differs from the last frame time is kept and only warned
///   about: duration drives playback.
pub fn parse_stored_clip_json(s: &str) -> Result<ProceduralAnimation> {
    let raw: StoredClip =
        serde_json::from_str(s).map_err(|e| AnimationError::Parse(e.to_string()))?;
    to_clip(raw)
}

/// Parse a JSON array of stored clips. The first invalid clip fails the batch.
pub fn parse_stored_clips_json(s: &str) -> Result<Vec<ProceduralAnimation>> {
    let raw: Vec<StoredClip> =
        serde_json::from_str(s).map_err(|e| AnimationError::Parse(e.to_string()))?;
    raw.into_iter().map(to_clip).collect()
}

fn to_clip(raw: StoredClip) -> Result<ProceduralAnimation> {
    let display_name = raw.display_name.unwrap_or_else(|| raw.id.clone());
    let mut clip = ProceduralAnimation::new(raw.id, display_name, raw.duration, raw.looping);
    for rf in raw.frames {
        let mut frame = AnimationFrame::new(rf.time);
        for (name, rs) in rf.segments {
            let Some(segment) = SegmentId::from_name(&name) else {
                return Err(AnimationError::UnknownSegment {
                    clip: clip.id.clone(),
                    name,
                });
            };
            frame.segments.insert(segment, rs.into_state());
        }
        // File order is kept so validation can report the offending index.
        clip.frames.push(frame);
    }
    clip.validate_basic()?;
    if let Some(last) = clip.last_frame_time() {
        if (last - clip.duration).abs() > 1e-4 {
            log::warn!(
                "clip '{}': duration {}s differs from last frame at {}s",
                clip.id,
                clip.duration,
                last
            );
        }
    }
    Ok(clip)
}

// ----- JSON schema (serde) -----

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredClip {
    id: String,
    #[serde(default)]
    display_name: Option<String>,
    duration: f32,
    #[serde(default)]
    looping: bool,
    frames: Vec<StoredFrame>,
}

#[derive(Debug, Deserialize)]
struct StoredFrame {
    time: f32,
    #[serde(default)]
    segments: BTreeMap<String, StoredSegment>,
}

#[derive(Debug, Deserialize)]
struct StoredSegment {
    #[serde(default)]
    position: Option<RawVec2>,
    #[serde(default)]
    rotation: f32,
    #[serde(default)]
    stretch: Option<RawStretch>,
}

impl StoredSegment {
    fn into_state(self) -> SegmentState {
        let position = match self.position {
            Some(RawVec2::Object { x, y }) | Some(RawVec2::Pair([x, y])) => Vec2::new(x, y),
            None => Vec2::ZERO,
        };
        let stretch = match self.stretch {
            Some(RawStretch::Step(s)) => s,
            Some(RawStretch::Fraction(f)) => snap_stretch(f),
            None => StretchAmount::None,
        };
        SegmentState::new(position, self.rotation).with_stretch(stretch)
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawVec2 {
    Object { x: f32, y: f32 },
    Pair([f32; 2]),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawStretch {
    Step(StretchAmount),
    Fraction(f32),
}

fn snap_stretch(f: f32) -> StretchAmount {
    let steps = (f.clamp(0.0, 1.0) * 4.0).round() as u8;
    match steps {
        0 => StretchAmount::None,
        1 => StretchAmount::Quarter,
        2 => StretchAmount::Half,
        3 => StretchAmount::ThreeQuarters,
        _ => StretchAmount::Full,
    }
}

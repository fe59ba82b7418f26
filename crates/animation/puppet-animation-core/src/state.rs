//! Clip selection from locomotion flags.

use crate::active::ActiveAnimation;
use crate::config::StateClips;
use crate::inputs::LocomotionInputs;

/// Pick the base-layer clip for this tick, or `None` to keep what is playing.
///
/// Priority, first match wins:
/// 1. moving, not using an item, not jumping: walking
/// 2. the current clip is a one-shot still in progress: hold it
/// 3. AFK: idle
/// 4. using an item: use-idle
///
/// "Using while moving" never reaches the use-walk clip in this order; with
/// `use_walk_priority` it is checked ahead of rule 1 instead.
pub fn select_clip<'a>(
    inputs: &LocomotionInputs,
    current: Option<&ActiveAnimation>,
    clips: &'a StateClips,
    use_walk_priority: bool,
) -> Option<&'a str> {
    if use_walk_priority && inputs.moving && inputs.using_item && !inputs.jumping {
        return Some(clips.use_walk.as_str());
    }
    if inputs.moving && !inputs.using_item && !inputs.jumping {
        return Some(clips.walking.as_str());
    }
    if current.is_some_and(|c| !c.animation.looping && !c.is_finished()) {
        return None;
    }
    if inputs.afk {
        return Some(clips.idle.as_str());
    }
    if inputs.using_item {
        return Some(clips.use_idle.as_str());
    }
    None
}

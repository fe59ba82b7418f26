//! Clip registry shared read-only by every player.

use std::sync::Arc;

use hashbrown::HashMap;

use crate::clips;
use crate::data::ProceduralAnimation;
use crate::error::Result;
use crate::stored_clip::parse_stored_clips_json;

/// Clips keyed by id. Populated at startup, then wrapped in an `Arc` and
/// shared by reference across players.
#[derive(Clone, Debug, Default)]
pub struct AnimationLibrary {
    clips: HashMap<String, Arc<ProceduralAnimation>>,
}

impl AnimationLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Library pre-populated with the hand-authored clip set.
    pub fn with_builtin_clips() -> Self {
        let mut lib = Self::new();
        clips::register_builtin_clips(&mut lib);
        lib
    }

    /// Register a clip under its id. Clips with an empty id are skipped and
    /// leave the registry untouched. Returns whether the clip was inserted.
    pub fn register(&mut self, clip: ProceduralAnimation) -> bool {
        if clip.id.is_empty() {
            log::warn!(
                "skipping registration of clip '{}' with an empty id",
                clip.display_name
            );
            return false;
        }
        let id = clip.id.clone();
        if self.clips.insert(id.clone(), Arc::new(clip)).is_some() {
            log::debug!("replaced clip '{id}'");
        }
        true
    }

    /// Parse a JSON array of stored clips and register each of them.
    /// Returns how many were inserted.
    pub fn load_json(&mut self, json: &str) -> Result<usize> {
        let mut inserted = 0;
        for clip in parse_stored_clips_json(json)? {
            if self.register(clip) {
                inserted += 1;
            }
        }
        Ok(inserted)
    }

    pub fn get(&self, id: &str) -> Option<Arc<ProceduralAnimation>> {
        self.clips.get(id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.clips.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    /// Registered ids, sorted.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.clips.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

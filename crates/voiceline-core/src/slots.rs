//! Slot-index allocation and dialog deduplication.
//!
//! Every unique (actor, spoken-line) pair in a scene is assigned one stable,
//! gap-aware, monotonically increasing index. The generated slot references
//! become permanent external asset names, so ordering is strict: allocation
//! happens in traversal order, omitted indices are skipped, and exact-text
//! duplicates reuse the slot allocated by their first occurrence.
//!
//! State is keyed by canonical scene id rather than file id, so several
//! aliased files accumulate into one counter and one cache. [`RunContext`]
//! is threaded through the pipeline explicitly and carries the run-wide
//! counters alongside the per-scene state.

use crate::mappings::Mappings;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

/// Format the voice-library path for a scene.
#[must_use]
pub fn voice_library(scene: &str) -> String {
    format!("lib/{scene}_voice.swf")
}

/// Format a slot reference: library path, scene id, zero-padded index.
///
/// Indices are padded to three digits; a scene that outgrows 999 widens the
/// field rather than truncating it, keeping references unique and ordered.
#[must_use]
pub fn slot_reference(scene: &str, index: u32) -> String {
    format!("lib/{scene}_voice.swf:{scene}_{index:03}")
}

/// Outcome of resolving one non-empty dialog line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotResolution {
    /// The stable slot reference for this (actor, text) pair.
    pub slot: String,
    /// True when the pair had already been seen in this scene.
    pub duplicate: bool,
}

/// Run-wide dialog tallies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunCounters {
    /// Every dialog line encountered, including empty and duplicate ones.
    pub total: u64,
    /// Lines with empty subtitle text.
    pub empty: u64,
    /// Exact-text repeats of an already allocated pair.
    pub duplicate: u64,
    /// First occurrences that allocated a slot.
    pub unique: u64,
}

/// Per-scene allocator and dedup cache.
///
/// Created lazily on first use of a canonical scene id and kept for the
/// whole run, so files aliasing the same scene share it. Access is
/// serialized by the sequential pipeline, never by a lock.
#[derive(Debug, Default)]
struct SceneState {
    next_index: u32,
    omitted: HashSet<u32>,
    cache: HashMap<(String, String), String>,
}

impl SceneState {
    fn new(omitted: HashSet<u32>) -> Self {
        Self {
            next_index: 0,
            omitted,
            cache: HashMap::new(),
        }
    }

    /// Next index not in the omission set, advancing the counter past it.
    fn allocate(&mut self) -> u32 {
        let mut index = self.next_index;
        while self.omitted.contains(&index) {
            index += 1;
        }
        self.next_index = index + 1;
        index
    }
}

/// Mutable state for one pipeline run.
///
/// Replaces the ambient process-wide counters of the original toolchain:
/// the pipeline owns one `RunContext`, threads it through every traversal,
/// and reports from it at the end.
#[derive(Debug)]
pub struct RunContext<'a> {
    mappings: &'a Mappings,
    scenes: HashMap<String, SceneState>,
    /// Aggregate dialog tallies.
    pub counters: RunCounters,
    /// Actor id -> number of unique allocations credited to it.
    pub actor_totals: BTreeMap<String, u64>,
    /// File id -> actors participating in that document.
    pub actors_by_file: BTreeMap<String, BTreeSet<String>>,
}

impl<'a> RunContext<'a> {
    #[must_use]
    pub fn new(mappings: &'a Mappings) -> Self {
        Self {
            mappings,
            scenes: HashMap::new(),
            counters: RunCounters::default(),
            actor_totals: BTreeMap::new(),
            actors_by_file: BTreeMap::new(),
        }
    }

    #[must_use]
    pub const fn mappings(&self) -> &'a Mappings {
        self.mappings
    }

    /// Resolve one dialog line against the scene's cache.
    ///
    /// Empty text never allocates and returns `None`; a cached (actor, text)
    /// pair returns its stored slot flagged as duplicate; anything else
    /// allocates the next valid index and credits the actor. All four run
    /// counters are maintained here.
    pub fn resolve_dialog(
        &mut self,
        scene: &str,
        actor: &str,
        text: &str,
    ) -> Option<SlotResolution> {
        self.counters.total += 1;

        if text.is_empty() {
            self.counters.empty += 1;
            return None;
        }

        let omitted = self.mappings.omitted_for(scene);
        let state = self
            .scenes
            .entry(scene.to_string())
            .or_insert_with(|| SceneState::new(omitted));

        let key = (actor.to_string(), text.to_string());
        if let Some(slot) = state.cache.get(&key) {
            self.counters.duplicate += 1;
            return Some(SlotResolution {
                slot: slot.clone(),
                duplicate: true,
            });
        }

        let slot = slot_reference(scene, state.allocate());
        state.cache.insert(key, slot.clone());
        self.counters.unique += 1;
        *self.actor_totals.entry(actor.to_string()).or_insert(0) += 1;

        Some(SlotResolution {
            slot,
            duplicate: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mappings() -> Mappings {
        Mappings::from_toml(
            r#"
registry = ["a"]

[omitted_indices]
a = [0, 2]
"#,
        )
        .unwrap()
    }

    #[test]
    fn allocation_skips_omitted_indices_in_order() {
        let m = mappings();
        let mut ctx = RunContext::new(&m);
        let slots: Vec<String> = (0..3)
            .map(|i| {
                ctx.resolve_dialog("a", "june", &format!("line {i}"))
                    .unwrap()
                    .slot
            })
            .collect();
        assert_eq!(
            slots,
            vec![
                "lib/a_voice.swf:a_001",
                "lib/a_voice.swf:a_003",
                "lib/a_voice.swf:a_004",
            ]
        );
    }

    #[test]
    fn duplicate_returns_identical_slot_and_counts_once() {
        let m = mappings();
        let mut ctx = RunContext::new(&m);
        let first = ctx.resolve_dialog("a", "june", "Hello.").unwrap();
        assert!(!first.duplicate);
        assert_eq!(ctx.counters.duplicate, 0);

        let second = ctx.resolve_dialog("a", "june", "Hello.").unwrap();
        assert!(second.duplicate);
        assert_eq!(second.slot, first.slot);
        assert_eq!(ctx.counters.duplicate, 1);
        assert_eq!(ctx.counters.unique, 1);
    }

    #[test]
    fn same_text_different_actor_allocates() {
        let m = mappings();
        let mut ctx = RunContext::new(&m);
        let a = ctx.resolve_dialog("a", "june", "Hm.").unwrap();
        let b = ctx.resolve_dialog("a", "dockhand", "Hm.").unwrap();
        assert_ne!(a.slot, b.slot);
        assert!(!b.duplicate);
    }

    #[test]
    fn empty_text_never_allocates() {
        let m = mappings();
        let mut ctx = RunContext::new(&m);
        assert!(ctx.resolve_dialog("a", "june", "").is_none());
        assert_eq!(ctx.counters.total, 1);
        assert_eq!(ctx.counters.empty, 1);
        assert_eq!(ctx.counters.unique, 0);
        // The next allocation still starts at the first valid index.
        let first = ctx.resolve_dialog("a", "june", "Hi.").unwrap();
        assert_eq!(first.slot, "lib/a_voice.swf:a_001");
    }

    #[test]
    fn scenes_are_independent() {
        let m = mappings();
        let mut ctx = RunContext::new(&m);
        ctx.resolve_dialog("a", "june", "Hello.").unwrap();
        let other = ctx.resolve_dialog("global", "june", "Hello.").unwrap();
        assert!(!other.duplicate);
        assert_eq!(other.slot, "lib/global_voice.swf:global_000");
    }

    #[test]
    fn actor_totals_count_unique_only() {
        let m = mappings();
        let mut ctx = RunContext::new(&m);
        ctx.resolve_dialog("a", "june", "One.").unwrap();
        ctx.resolve_dialog("a", "june", "Two.").unwrap();
        ctx.resolve_dialog("a", "june", "One.").unwrap();
        let _ = ctx.resolve_dialog("a", "june", "");
        assert_eq!(ctx.actor_totals.get("june"), Some(&2));
    }

    #[test]
    fn wide_indices_widen_instead_of_truncating() {
        assert_eq!(slot_reference("a", 7), "lib/a_voice.swf:a_007");
        assert_eq!(slot_reference("a", 1234), "lib/a_voice.swf:a_1234");
    }
}

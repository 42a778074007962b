//! Static lookup tables loaded once at startup.
//!
//! The original toolchain kept these as untyped module-level objects; here
//! they are deserialized from a single TOML file into immutable typed maps
//! and shared by reference for the lifetime of the run.

use crate::error::Result;
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

/// Reserved file id for the shared global document.
pub const GLOBAL_ID: &str = "global";

/// Immutable lookup tables driving scene processing.
///
/// All tables are keyed by canonical string ids. `registry` fixes the
/// canonical processing order of room file ids; `global` is appended by the
/// pipeline and never listed here.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct Mappings {
    /// Canonical, ordered list of room file ids.
    pub registry: Vec<String>,

    /// File id -> actor owning the avatar in that file.
    pub avatars: BTreeMap<String, String>,

    /// File id -> canonical scene id, for files that alias into a shared
    /// scene. Unlisted files are their own scene.
    pub scene_aliases: BTreeMap<String, String>,

    /// Raw puppet id -> canonical actor id.
    pub actors: BTreeMap<String, String>,

    /// Actor id -> subtitle color (`0xRRGGBB`).
    pub subtitle_colors: BTreeMap<String, String>,

    /// Item id -> owning actor, for global items and combos.
    pub item_owners: BTreeMap<String, String>,

    /// Scene id -> indices that must never be allocated.
    pub omitted_indices: BTreeMap<String, Vec<u32>>,

    /// Bundle name -> file ids it expands to.
    pub bundles: BTreeMap<String, Vec<String>>,
}

impl Mappings {
    /// Load mappings from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    /// Parse mappings from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Canonical scene id for a file id.
    #[must_use]
    pub fn scene_for<'b>(&'b self, file_id: &'b str) -> &'b str {
        self.scene_aliases
            .get(file_id)
            .map_or(file_id, String::as_str)
    }

    /// Omission set for a scene, as a hash set for allocation-time lookups.
    #[must_use]
    pub fn omitted_for(&self, scene: &str) -> HashSet<u32> {
        self.omitted_indices
            .get(scene)
            .map(|v| v.iter().copied().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
registry = ["harbor", "harbor_night", "market"]

[avatars]
harbor = "june"
harbor_night = "june"
market = "june"

[scene_aliases]
harbor_night = "harbor"

[actors]
p_dockhand = "dockhand"

[subtitle_colors]
dockhand = "0x66CC99"

[omitted_indices]
harbor = [0, 2]

[bundles]
town = ["harbor", "market"]
"#;

    #[test]
    fn parses_all_tables() {
        let m = Mappings::from_toml(SAMPLE).unwrap();
        assert_eq!(m.registry.len(), 3);
        assert_eq!(m.actors.get("p_dockhand").unwrap(), "dockhand");
        assert_eq!(m.bundles.get("town").unwrap().len(), 2);
    }

    #[test]
    fn aliases_collapse_to_canonical_scene() {
        let m = Mappings::from_toml(SAMPLE).unwrap();
        assert_eq!(m.scene_for("harbor_night"), "harbor");
        assert_eq!(m.scene_for("harbor"), "harbor");
        assert_eq!(m.scene_for("market"), "market");
    }

    #[test]
    fn scene_for_hands_back_unlisted_ids_borrowed_from_the_caller() {
        let m = Mappings::from_toml(SAMPLE).unwrap();
        let id = String::from("attic");
        assert_eq!(m.scene_for(&id), "attic");
    }

    #[test]
    fn omission_lookup_is_per_scene() {
        let m = Mappings::from_toml(SAMPLE).unwrap();
        let omitted = m.omitted_for("harbor");
        assert!(omitted.contains(&0) && omitted.contains(&2));
        assert!(m.omitted_for("market").is_empty());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Mappings::from_toml("nonsense = true").is_err());
    }
}

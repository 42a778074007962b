//! Puppet-to-actor resolution and subtitle colors.

use crate::mappings::Mappings;

/// Raw puppet id that stands in for whichever actor owns the avatar.
pub const AVATAR_PUPPET: &str = "_avatar";

/// Subtitle color used for the avatar's own lines.
pub const AVATAR_COLOR: &str = "0xFFFFFF";

/// Subtitle color for actors without an assigned color.
pub const NEUTRAL_COLOR: &str = "0xCCCCCC";

/// Resolves raw puppet references against the mapping tables.
#[derive(Debug, Clone, Copy)]
pub struct ActorResolver<'a> {
    mappings: &'a Mappings,
}

impl<'a> ActorResolver<'a> {
    #[must_use]
    pub const fn new(mappings: &'a Mappings) -> Self {
        Self { mappings }
    }

    /// Canonical actor for a puppet reference found in `file_id`'s document.
    ///
    /// The avatar sentinel resolves to the file's designated avatar owner;
    /// everything else goes through the alias table, falling back to the raw
    /// puppet id when unmapped.
    #[must_use]
    pub fn resolve_actor(&self, file_id: &str, puppet: &str) -> String {
        let puppet = if puppet == AVATAR_PUPPET {
            self.mappings
                .avatars
                .get(file_id)
                .map_or(puppet, String::as_str)
        } else {
            puppet
        };
        self.mappings
            .actors
            .get(puppet)
            .cloned()
            .unwrap_or_else(|| puppet.to_string())
    }

    /// Subtitle color for a puppet reference.
    #[must_use]
    pub fn resolve_color(&self, file_id: &str, puppet: &str) -> &'a str {
        if puppet == AVATAR_PUPPET {
            return AVATAR_COLOR;
        }
        let actor = self.resolve_actor(file_id, puppet);
        self.mappings
            .subtitle_colors
            .get(&actor)
            .map_or(NEUTRAL_COLOR, String::as_str)
    }
}

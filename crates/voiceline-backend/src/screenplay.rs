//! Review-document ("screenplay") assembly.
//!
//! Fragments are built bottom-up during traversal: a container renders only
//! when at least one descendant dialog line rendered, so empty branches are
//! pruned instead of emitted as empty divs. Every fragment carries the set
//! of actors appearing inside it; the class lists let the template's cast
//! selector filter the document client-side.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;
use voiceline_core::Result;

/// One record of the per-actor dataset emitted on full runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CastRecord {
    pub cast_id: String,
    pub count: u64,
}

/// A rendered HTML span plus the actors appearing within it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    pub html: String,
    pub actors: BTreeSet<String>,
}

impl Fragment {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.html.is_empty()
    }

    /// Append a rendered dialog line and tag its actor.
    pub fn push_line(&mut self, actor: &str, html: &str) {
        self.html.push_str(html);
        self.actors.insert(actor.to_string());
    }

    /// Tag an actor without rendering anything (container-level actors in
    /// the global document are known even when all their lines are empty).
    pub fn tag(&mut self, actor: &str) {
        self.actors.insert(actor.to_string());
    }

    /// Merge a child fragment's markup and actors into this one.
    pub fn absorb(&mut self, child: Self) {
        self.html.push_str(&child.html);
        self.actors.extend(child.actors);
    }

    /// Wrap this fragment in a classed `<div>` with an optional heading.
    /// An empty fragment stays empty: the container is pruned entirely.
    #[must_use]
    pub fn into_container(self, class: &str, heading: &str) -> Self {
        if self.is_empty() {
            return Self::new();
        }
        let mut classes = class.to_string();
        for actor in &self.actors {
            let _ = write!(classes, " {actor}");
        }
        Self {
            html: format!(r#"<div class="{classes}">{heading}{}</div>"#, self.html),
            actors: self.actors,
        }
    }
}

/// Normalize typographic quote and apostrophe characters to plain
/// equivalents for review rendering.
#[must_use]
pub fn normalize_quotes(text: &str) -> String {
    let text = text.replace('\u{2019}', "'");
    ["&#8222;", "&#8220;", "\u{201e}", "\u{201c}", "\u{201d}"]
        .iter()
        .fold(text, |acc, quote| acc.replace(quote, "\""))
}

/// Render one non-empty dialog line. Duplicates carry a `dup` class so the
/// review document visually distinguishes repeats from first occurrences.
#[must_use]
pub fn render_dialog_line(actor: &str, subtitle: &str, slot: &str, duplicate: bool) -> String {
    let subtitle = normalize_quotes(subtitle);
    let tail = slot.rsplit(':').next().unwrap_or(slot);
    let dup = if duplicate { " dup" } else { "" };
    format!(
        r#"<div class="dialog {actor}{dup}"><tt>{tail}</tt><p><b>{actor}:</b> {subtitle}</p></div>"#
    )
}

/// Substitute id, cast listing and content into the shared HTML template.
///
/// The cast listing is a sorted `<option>` list feeding the template's
/// actor-filter selector.
#[must_use]
pub fn render_document(
    template: &str,
    id: &str,
    cast: &BTreeSet<String>,
    content: &str,
) -> String {
    let mut options = String::new();
    for actor in cast {
        let _ = write!(options, r#"<option value="{actor}">{actor}</option>"#);
    }
    template
        .replacen("{{ id }}", id, 1)
        .replacen("{{ cast }}", &options, 1)
        .replacen("{{ content }}", content, 1)
}

/// Build the cross-file index content: one link per processed id, tagged
/// with the actors participating in that file.
#[must_use]
pub fn index_content(
    files: &[String],
    actors_by_file: &BTreeMap<String, BTreeSet<String>>,
) -> String {
    let mut list = String::from(r#"<ul class="scenes">"#);
    for id in files {
        let mut classes = String::from("dialog");
        if let Some(actors) = actors_by_file.get(id) {
            for actor in actors {
                let _ = write!(classes, " {actor}");
            }
        }
        let _ = write!(
            list,
            r#"<li class="{classes}"><a href="{id}.html">{id}</a></li>"#
        );
    }
    list.push_str("</ul>");
    list
}

/// Serialize the per-actor dataset as a loadable JS file.
pub fn cast_data_js(actor_totals: &BTreeMap<String, u64>) -> Result<String> {
    let records: Vec<CastRecord> = actor_totals
        .iter()
        .map(|(actor, count)| CastRecord {
            cast_id: actor.clone(),
            count: *count,
        })
        .collect();
    let json = serde_json::to_string(&records)?;
    Ok(format!("var cast_data = {json};"))
}

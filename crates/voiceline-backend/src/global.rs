//! Global document traversal.
//!
//! The shared global document holds default responses, item commentary and
//! item combos. It is its own scene with its own omission set and allocator,
//! and its actors are determined at the container level (response id, item
//! owner, combo owner) rather than per dialog line.

use crate::dialog::process_line;
use crate::localize::Localizer;
use crate::patcher::XmlPatcher;
use crate::room::DocumentOutput;
use crate::screenplay::Fragment;
use crate::xml::{children, en_text, required_attr, required_child, title_text};
use voiceline_core::{Result, RunContext, VoicelineError, GLOBAL_ID};

/// Placeholder actor for items and combos without a mapped owner.
const UNKNOWN_OWNER: &str = "???";

/// Process the shared global document.
pub fn process_global(
    raw: &str,
    ctx: &mut RunContext<'_>,
    localizer: &mut dyn Localizer,
) -> Result<DocumentOutput> {
    let doc = roxmltree::Document::parse(raw)?;
    let global = doc.root_element();
    if !global.has_tag_name("global") {
        return Err(VoicelineError::Malformed(format!(
            "{GLOBAL_ID}: expected <global> root, found <{}>",
            global.tag_name().name()
        )));
    }

    let mut patcher = XmlPatcher::new(raw);
    patcher.set_voice_library(GLOBAL_ID);
    localizer.begin_document(GLOBAL_ID)?;

    let owners = &ctx.mappings().item_owners;
    let mut content = Fragment::new();

    // Default responses, one set per responding actor.
    for response in children(required_child(global, "responses")?, "response") {
        let actor = required_attr(response, "id")?.to_string();
        content.tag(&actor);

        let mut response_frag = Fragment::new();
        for action in children(response, "action") {
            let action_title = title_text(action)?;
            let mut action_frag = Fragment::new();
            for dia in children(required_child(action, "dialog")?, "dia") {
                process_line(
                    ctx,
                    &mut patcher,
                    localizer,
                    &mut action_frag,
                    GLOBAL_ID,
                    &actor,
                    en_text(dia),
                    dia.attribute("sound"),
                )?;
            }
            let heading = format!("<h3>{action_title}</h3>");
            response_frag.absorb(action_frag.into_container("action", &heading));
        }

        let heading = format!("<h2>Default Responses: {actor}</h2>");
        content.absorb(response_frag.into_container("set", &heading));
    }

    // Item commentary, attributed to the item's owner.
    for item in children(required_child(global, "items")?, "item") {
        let item_id = required_attr(item, "id")?;
        let item_title = title_text(item)?;
        let actor = owners
            .get(item_id)
            .map_or(UNKNOWN_OWNER, String::as_str)
            .to_string();
        content.tag(&actor);

        let mut item_frag = Fragment::new();
        for action in children(item, "action") {
            let action_title = title_text(action)?;
            let mut action_frag = Fragment::new();
            for dia in children(required_child(action, "dialog")?, "dia") {
                process_line(
                    ctx,
                    &mut patcher,
                    localizer,
                    &mut action_frag,
                    GLOBAL_ID,
                    &actor,
                    en_text(dia),
                    dia.attribute("sound"),
                )?;
            }
            let heading = format!("<h3>{action_title}</h3>");
            item_frag.absorb(action_frag.into_container("action", &heading));
        }

        let heading = format!("<h2>Item: {item_title} ({item_id})</h2>");
        content.absorb(item_frag.into_container("set", &heading));
    }

    // Combos, attributed to the primary item's owner, falling back to the
    // first pool entry's owner. Only the first action carries dialog.
    for combo in children(required_child(global, "combos")?, "combo") {
        let primary = required_attr(combo, "primary")?;
        let pool = combo.attribute("pool").unwrap_or("");
        let actor = owners
            .get(primary)
            .or_else(|| owners.get(pool.split(',').next().unwrap_or("")))
            .map_or(UNKNOWN_OWNER, String::as_str)
            .to_string();
        content.tag(&actor);

        let mut combo_frag = Fragment::new();
        let action = required_child(combo, "action")?;
        for dia in children(required_child(action, "dialog")?, "dia") {
            process_line(
                ctx,
                &mut patcher,
                localizer,
                &mut combo_frag,
                GLOBAL_ID,
                &actor,
                en_text(dia),
                dia.attribute("sound"),
            )?;
        }

        let heading = format!("<h2>Combo: {primary} / {pool}</h2>");
        content.absorb(combo_frag.into_container("action", &heading));
    }

    localizer.finish_document(&mut patcher)?;

    let mut classes = String::new();
    for actor in &content.actors {
        classes.push(' ');
        classes.push_str(actor);
    }
    let html = format!(
        r#"<div class="room{classes}"><h1>{GLOBAL_ID}</h1><div class="splash"><img src="assets/{GLOBAL_ID}.jpg" alt="{GLOBAL_ID}"></div>{}</div>"#,
        content.html
    );

    Ok(DocumentOutput {
        patched_xml: patcher.into_xml(),
        content_html: html,
        actors: content.actors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::localize::NoopLocalizer;
    use voiceline_core::Mappings;

    const GLOBAL: &str = r#"<global voiceLibs="old.swf">
<responses>
<response id="june">
<action><title><en>default</en></title>
<dialog>
<dia sound="raw:g1"><en>That won't work.</en></dia>
</dialog>
</action>
</response>
</responses>
<items>
<item id="rope"><title><en>Rope</en></title>
<action><title><en>look</en></title>
<dialog>
<dia sound="raw:g2"><en>Sturdy rope.</en></dia>
</dialog>
</action>
</item>
</items>
<combos>
<combo primary="rope" pool="hook,plank">
<action><dialog>
<dia sound="raw:g3"><en>Tied together.</en></dia>
</dialog></action>
</combo>
<combo primary="mystery" pool="hook,plank">
<action><dialog>
<dia sound="raw:g4"><en>Tied together.</en></dia>
<dia sound="raw:g5"><en>No use.</en></dia>
</dialog></action>
</combo>
</combos>
</global>"#;

    fn mappings() -> Mappings {
        Mappings::from_toml(
            r#"
registry = ["harbor"]

[item_owners]
rope = "june"
hook = "dockhand"

[omitted_indices]
global = [1]
"#,
        )
        .unwrap()
    }

    #[test]
    fn combos_share_the_global_cache_per_actor() {
        let m = mappings();
        let mut ctx = RunContext::new(&m);
        let out = process_global(GLOBAL, &mut ctx, &mut NoopLocalizer).unwrap();

        // "Tied together." is spoken by june (rope combo) and by dockhand
        // (fallback to the first pool entry): distinct actors, distinct
        // slots, no duplicate.
        assert_eq!(ctx.counters.duplicate, 0);
        assert_eq!(ctx.counters.unique, 5);
        // Index 1 is omitted for the global scene.
        assert!(out
            .patched_xml
            .contains(r#"sound="lib/global_voice.swf:global_000""#));
        assert!(!out.patched_xml.contains("global_001"));
        assert!(out
            .patched_xml
            .contains(r#"sound="lib/global_voice.swf:global_002""#));
    }

    #[test]
    fn repeated_line_same_actor_is_a_duplicate() {
        let m = mappings();
        let mut ctx = RunContext::new(&m);
        let repeated = GLOBAL.replace(
            r#"<dia sound="raw:g5"><en>No use.</en></dia>"#,
            r#"<dia sound="raw:g5"><en>Tied together.</en></dia>"#,
        );
        let out = process_global(&repeated, &mut ctx, &mut NoopLocalizer).unwrap();
        assert_eq!(ctx.counters.duplicate, 1);
        assert_eq!(ctx.counters.unique, 4);
        assert!(out.content_html.contains(" dup\""));
    }

    #[test]
    fn container_actors_follow_owner_tables() {
        let m = mappings();
        let mut ctx = RunContext::new(&m);
        let out = process_global(GLOBAL, &mut ctx, &mut NoopLocalizer).unwrap();
        assert!(out.actors.contains("june"));
        assert!(out.actors.contains("dockhand"));
        assert!(out.content_html.contains("<h2>Item: Rope (rope)</h2>"));
        assert!(out.content_html.contains("<h2>Combo: rope / hook,plank</h2>"));
        assert!(out.content_html.starts_with(r#"<div class="room dockhand june">"#));
    }

    #[test]
    fn unowned_combo_gets_placeholder_actor() {
        let m = Mappings::from_toml(r#"registry = ["harbor"]"#).unwrap();
        let mut ctx = RunContext::new(&m);
        let out = process_global(GLOBAL, &mut ctx, &mut NoopLocalizer).unwrap();
        assert!(out.actors.contains("???"));
    }
}

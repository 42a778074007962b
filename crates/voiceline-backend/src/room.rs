//! Room document traversal.
//!
//! Walks a room's layered states and dialog trees in a fixed order, feeding
//! every dialog line through the scene's allocator/cache, patching the
//! original text in place and assembling the screenplay fragments.

use crate::dialog::process_line;
use crate::localize::Localizer;
use crate::patcher::XmlPatcher;
use crate::screenplay::Fragment;
use crate::xml::{child, children, en_text, required_attr, required_child, title_text};
use std::collections::BTreeSet;
use voiceline_core::{
    resolve_direction, ActorResolver, Point, Result, RunContext, VoicelineError,
};

/// Result of processing one document: the patched text, the assembled
/// review content, and the actors participating in it.
#[derive(Debug, Clone)]
pub struct DocumentOutput {
    pub patched_xml: String,
    pub content_html: String,
    pub actors: BTreeSet<String>,
}

fn point_from(x: Option<&str>, y: Option<&str>) -> Option<Point> {
    let x = x.and_then(|v| v.parse::<f64>().ok())?;
    let y = y.and_then(|v| v.parse::<f64>().ok())?;
    Some(Point::new(x, y))
}

/// Process one room document.
pub fn process_room(
    file_id: &str,
    raw: &str,
    ctx: &mut RunContext<'_>,
    localizer: &mut dyn Localizer,
) -> Result<DocumentOutput> {
    let scene = ctx.mappings().scene_for(file_id).to_string();
    let resolver = ActorResolver::new(ctx.mappings());

    let doc = roxmltree::Document::parse(raw)?;
    let room = doc.root_element();
    if !room.has_tag_name("room") {
        return Err(VoicelineError::Malformed(format!(
            "{file_id}: expected <room> root, found <{}>",
            room.tag_name().name()
        )));
    }

    let mut patcher = XmlPatcher::new(raw);
    patcher.set_voice_library(&scene);
    localizer.begin_document(file_id)?;

    let mut content = Fragment::new();

    // Layers -> states -> actions/items -> dialog lines.
    for layer in children(required_child(room, "layers")?, "layer") {
        let layer_id = required_attr(layer, "id")?;
        let mut layer_frag = Fragment::new();

        for state in children(required_child(layer, "states")?, "state") {
            let state_id = required_attr(state, "id")?;
            let state_title = title_text(state)?;

            // Facing direction and subtitle color, from the state's map
            // parameters. The layer id doubles as the puppet reference.
            if let Some(param) = child(state, "param") {
                let location = point_from(state.attribute("x"), state.attribute("y"));
                let map = point_from(param.attribute("mapX"), param.attribute("mapY"));
                let turn = resolve_direction(map, location);
                let color = resolver.resolve_color(file_id, layer_id);
                patcher.patch_state_param(layer_id, state_id, turn, color)?;
            }

            localizer.state_title(&mut patcher, layer_id, state_id, state_title)?;

            let actions = child(state, "actions")
                .into_iter()
                .flat_map(|n| children(n, "action"));
            let items = child(state, "items")
                .into_iter()
                .flat_map(|n| children(n, "action"));

            let mut state_frag = Fragment::new();
            for action in actions.chain(items) {
                let action_title = title_text(action)?;
                localizer.action_title(&mut patcher, layer_id, state_id, action_title)?;

                let mut action_frag = Fragment::new();
                for dia in children(required_child(action, "dialog")?, "dia") {
                    let puppet = required_attr(dia, "puppet")?;
                    let actor = resolver.resolve_actor(file_id, puppet);
                    process_line(
                        ctx,
                        &mut patcher,
                        localizer,
                        &mut action_frag,
                        &scene,
                        &actor,
                        en_text(dia),
                        dia.attribute("sound"),
                    )?;
                }

                let heading =
                    format!("<h3>{action_title} {state_title} ({state_id})</h3>");
                state_frag.absorb(action_frag.into_container("action", &heading));
            }
            layer_frag.absorb(state_frag);
        }

        let heading = format!("<h2>{layer_id}</h2>");
        content.absorb(layer_frag.into_container("set", &heading));
    }

    // Dialog trees -> tiers -> topics -> dialog lines.
    for tree in children(required_child(room, "trees")?, "tree") {
        let tree_id = required_attr(tree, "id")?;
        let mut tree_frag = Fragment::new();

        for tier in children(tree, "tier") {
            for topic in children(tier, "topic") {
                let topic_id = required_attr(topic, "id")?;
                let mut topic_frag = Fragment::new();

                for dia in children(required_child(topic, "dialog")?, "dia") {
                    let puppet = required_attr(dia, "puppet")?;
                    let actor = resolver.resolve_actor(file_id, puppet);
                    process_line(
                        ctx,
                        &mut patcher,
                        localizer,
                        &mut topic_frag,
                        &scene,
                        &actor,
                        en_text(dia),
                        dia.attribute("sound"),
                    )?;
                }

                let heading = format!("<h3>topic: {topic_id}</h3>");
                tree_frag.absorb(topic_frag.into_container("action", &heading));
            }
        }

        let heading = format!("<h2>Dialog Tree: {tree_id}</h2>");
        content.absorb(tree_frag.into_container("set", &heading));
    }

    localizer.finish_document(&mut patcher)?;

    let html = format!(
        r#"<div class="room {file_id}"><h1>{file_id}</h1><div class="splash"><img src="assets/{file_id}.jpg" alt="{file_id}"></div>{}</div>"#,
        content.html
    );

    Ok(DocumentOutput {
        patched_xml: patcher.into_xml(),
        content_html: html,
        actors: content.actors,
    })
}

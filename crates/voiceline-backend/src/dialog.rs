//! Per-line processing shared by the room and global traversals.

use crate::localize::Localizer;
use crate::patcher::XmlPatcher;
use crate::screenplay::{render_dialog_line, Fragment};
use voiceline_core::{Result, RunContext};

/// Resolve one dialog line, patch its sound reference and render it into
/// the enclosing fragment.
///
/// Empty subtitle text is counted but neither patches nor renders. A
/// resolved line is first offered to the localizer (keyed by its original
/// sound reference), then rewritten to its slot reference.
#[allow(clippy::too_many_arguments)]
pub(crate) fn process_line(
    ctx: &mut RunContext<'_>,
    patcher: &mut XmlPatcher,
    localizer: &mut dyn Localizer,
    fragment: &mut Fragment,
    scene: &str,
    actor: &str,
    text: &str,
    sound: Option<&str>,
) -> Result<()> {
    let Some(resolution) = ctx.resolve_dialog(scene, actor, text) else {
        return Ok(());
    };

    if let Some(original) = sound {
        localizer.dialog_line(patcher, original, &resolution.slot)?;
    }
    patcher.replace_sound(sound, &resolution.slot)?;

    fragment.push_line(
        actor,
        &render_dialog_line(actor, text, &resolution.slot, resolution.duplicate),
    );
    Ok(())
}

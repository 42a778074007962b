//! Textual patching of the original scene documents.
//!
//! Patched documents are produced by in-place substitution on the original
//! text, never by re-serializing the parsed DOM, so formatting outside the
//! touched spans survives untouched. Anchored edits all go through one
//! [`XmlPatcher::patch_first`] primitive that scopes a pattern to a named
//! region of the document.

use regex::Regex;
use std::sync::LazyLock;
use voiceline_core::{voice_library, Result, VoicelineError};

static RE_ELLIPSIS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\.\.\.").expect("regex is compile-time constant"));
static RE_INTERTAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r">\s*<").expect("regex is compile-time constant"));
static RE_VOICE_LIBS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"voiceLibs="[^"]*""#).expect("regex is compile-time constant"));

/// In-place textual patcher for one document.
#[derive(Debug, Clone)]
pub struct XmlPatcher {
    xml: String,
}

impl XmlPatcher {
    /// Wrap the original document text, applying the normalization pass:
    /// low/left double-quote entities become typographic quotes, ellipses
    /// get a leading `&nbsp;`, and inter-tag whitespace collapses so anchored
    /// patterns never straddle formatting-only runs.
    #[must_use]
    pub fn new(raw: &str) -> Self {
        let xml = raw.replace("&#8222;", "\u{201c}").replace("&#8220;", "\u{201d}");
        let xml = RE_ELLIPSIS.replace_all(&xml, "&nbsp;...");
        let xml = RE_INTERTAG.replace_all(&xml, "><");
        Self {
            xml: xml.into_owned(),
        }
    }

    /// Rewrite every voice-library reference to the scene's canonical path.
    pub fn set_voice_library(&mut self, scene: &str) {
        let replacement = format!(r#"voiceLibs="{}""#, voice_library(scene));
        self.xml = RE_VOICE_LIBS
            .replace_all(&self.xml, replacement.as_str())
            .into_owned();
    }

    /// Replace the first `sound="{original}"` attribute with the slot
    /// reference. A resolved line without an original reference is fatal.
    pub fn replace_sound(&mut self, original: Option<&str>, slot: &str) -> Result<()> {
        match original {
            Some(original) if !original.is_empty() => {
                let needle = format!(r#"sound="{original}""#);
                let replacement = format!(r#"sound="{slot}""#);
                self.xml = self.xml.replacen(&needle, &replacement, 1);
                Ok(())
            }
            _ => Err(VoicelineError::MissingReference(format!(
                "dialog line resolved to {slot} has no sound attribute to rewrite"
            ))),
        }
    }

    /// Rewrite the `turnTo` and `subtitle` attributes of the `<param>` inside
    /// one layer/state region: drop any existing direction, insert the
    /// resolved bucket, overwrite the subtitle color.
    pub fn patch_state_param(
        &mut self,
        layer_id: &str,
        state_id: &str,
        turn: u8,
        color: &str,
    ) -> Result<()> {
        let anchor = format!(
            r#"<layer id="{}".+?<state id="{}".+?<param"#,
            regex::escape(layer_id),
            regex::escape(state_id)
        );
        self.patch_first(
            &format!(r#"({anchor}[^>]*?)turnTo="[^"]*"\s*"#),
            "${1}",
        )?;
        self.patch_first(
            &format!("({anchor} )"),
            &format!(r#"${{1}}turnTo="{turn}" "#),
        )?;
        self.patch_first(
            &format!(r#"({anchor}[^>]*?subtitle=)"0x[^"]*""#),
            &format!(r#"${{1}}"{color}""#),
        )?;
        Ok(())
    }

    /// Replace the first match of an anchored pattern. Returns whether the
    /// pattern matched; a miss is not an error (the region may simply lack
    /// the attribute being removed).
    pub fn patch_first(&mut self, pattern: &str, replacement: &str) -> Result<bool> {
        let re = Regex::new(&format!("(?s){pattern}"))?;
        let matched = re.is_match(&self.xml);
        if matched {
            self.xml = re.replace(&self.xml, replacement).into_owned();
        }
        Ok(matched)
    }

    /// Current document text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.xml
    }

    /// Consume the patcher, yielding the patched document.
    #[must_use]
    pub fn into_xml(self) -> String {
        self.xml
    }
}

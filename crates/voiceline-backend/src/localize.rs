//! Seam for the localized-text insertion subsystem.
//!
//! Localized-text insertion is an external collaborator: the traversals hand
//! it the same structural anchors they use for patching (layer/state/action
//! ids and titles, original sound references) so both sets of edits target
//! consistent locations. The toolchain itself ships only the no-op
//! implementation.

use crate::patcher::XmlPatcher;
use voiceline_core::Result;

/// Receives structural anchors during traversal and gets a chance to edit
/// the document at each one.
#[allow(unused_variables)]
pub trait Localizer {
    /// Called once before a document's traversal begins.
    fn begin_document(&mut self, file_id: &str) -> Result<()> {
        Ok(())
    }

    /// A layer/state title anchor.
    fn state_title(
        &mut self,
        patcher: &mut XmlPatcher,
        layer_id: &str,
        state_id: &str,
        title: &str,
    ) -> Result<()> {
        Ok(())
    }

    /// An action title anchor within a layer/state.
    fn action_title(
        &mut self,
        patcher: &mut XmlPatcher,
        layer_id: &str,
        state_id: &str,
        title: &str,
    ) -> Result<()> {
        Ok(())
    }

    /// A resolved dialog line, identified by its original sound reference.
    fn dialog_line(
        &mut self,
        patcher: &mut XmlPatcher,
        original_sound: &str,
        slot: &str,
    ) -> Result<()> {
        Ok(())
    }

    /// Called with the fully patched document before it is written.
    fn finish_document(&mut self, patcher: &mut XmlPatcher) -> Result<()> {
        Ok(())
    }
}

/// Localizer that leaves every document untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLocalizer;

impl Localizer for NoopLocalizer {}

//! Thin roxmltree helpers shared by the room and global traversals.
//!
//! Parsing already guarantees well-formed XML; these helpers turn missing
//! required structure into [`VoicelineError::Malformed`] so traversal code
//! can use `?` throughout.

use roxmltree::Node;
use voiceline_core::{Result, VoicelineError};

/// First child element with the given tag name.
pub fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| n.has_tag_name(name))
}

/// First child element with the given tag name, required.
pub fn required_child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Result<Node<'a, 'input>> {
    child(node, name).ok_or_else(|| {
        VoicelineError::Malformed(format!(
            "<{}> is missing a <{name}> child",
            node.tag_name().name()
        ))
    })
}

/// All child elements with the given tag name, in document order.
pub fn children<'a, 'input>(
    node: Node<'a, 'input>,
    name: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(move |n| n.has_tag_name(name))
}

/// Required attribute value.
pub fn required_attr<'a>(node: Node<'a, '_>, name: &str) -> Result<&'a str> {
    node.attribute(name).ok_or_else(|| {
        VoicelineError::Malformed(format!(
            "<{}> is missing a {name} attribute",
            node.tag_name().name()
        ))
    })
}

/// Text of the `<en>` child, or empty when absent or self-closed.
pub fn en_text<'a>(node: Node<'a, '_>) -> &'a str {
    child(node, "en").and_then(|n| n.text()).unwrap_or("")
}

/// English title text under a `<title>` child, required.
pub fn title_text<'a>(node: Node<'a, '_>) -> Result<&'a str> {
    Ok(en_text(required_child(node, "title")?))
}

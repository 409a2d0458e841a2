//! Text preparation applied before a block is submitted.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use crate::xml::{Document, NodeId};

/// Cross-reference element whose content becomes [`LINK_PLACEHOLDER`].
pub const LINK_TAG: &str = "link";

/// Embedded formula element replaced by [`MATH_PLACEHOLDER`].
pub const MATH_TAG: &str = "math";

/// Explicit line break element.
pub const NEWLINE_TAG: &str = "newline";

pub const LINK_PLACEHOLDER: &str = "LINK";
pub const MATH_PLACEHOLDER: &str = "MATH";

/// A newline followed by indentation (or further blank lines).
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static NEWLINE_INDENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s+").expect("valid regex"));

/// Collapse a newline plus following whitespace into a bare newline.
///
/// Source files indent multi-line prose; the indentation must not reach
/// the checker as extra spaces. Applying it twice changes nothing.
///
/// # Examples
/// ```
/// use cnxml_linter::segment::fold_whitespace;
///
/// assert_eq!(fold_whitespace("line one\n   line two"), "line one\nline two");
/// assert_eq!(fold_whitespace("no  change"), "no  change");
/// ```
pub fn fold_whitespace(text: &str) -> Cow<'_, str> {
    NEWLINE_INDENT.replace_all(text, "\n")
}

/// Replace links and formulas with fixed placeholder words.
///
/// Runs once per document, before segmentation. Link elements stay in
/// the tree with `LINK` as their only content; math elements are
/// swapped for a `MATH` text node.
pub fn substitute_placeholders(doc: &mut Document) {
    for link in doc.find_all(doc.root(), LINK_TAG) {
        doc.set_text_content(link, LINK_PLACEHOLDER);
    }

    for math in doc.find_all(doc.root(), MATH_TAG) {
        doc.replace_with_text(math, MATH_PLACEHOLDER);
    }
}

/// Normalize a block in place so its flattened text is what gets checked.
///
/// Newline elements become `"\n"` text, adjacent text nodes merge, and
/// indentation after newlines is folded away.
pub fn prepare_block(doc: &mut Document, node: NodeId) {
    if !doc.is_text(node) {
        for newline in doc.find_all(node, NEWLINE_TAG) {
            doc.replace_with_text(newline, "\n");
        }
    }

    doc.normalize(node);

    let text_nodes: Vec<NodeId> = doc
        .descendants(node)
        .filter(|&id| doc.is_text(id))
        .collect();

    for id in text_nodes {
        let folded = match doc.text(id).map(fold_whitespace) {
            Some(Cow::Owned(folded)) => folded,
            _ => continue,
        };
        doc.set_text(id, folded);
    }
}

/// Flattened text of a block with both ends trimmed.
#[must_use]
pub fn flatten(doc: &Document, node: NodeId) -> String {
    doc.text_content(node).trim().to_string()
}

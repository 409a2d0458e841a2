//! Mapping checker offsets back to the XML tree.
//!
//! The grammar checker counts offsets in UTF-16 code units, so every
//! measurement here does too.

use crate::xml::{Document, NodeId};

/// Length of a string in UTF-16 code units.
#[must_use]
pub fn utf16_len(text: &str) -> usize {
    text.chars().map(char::len_utf16).sum()
}

/// Byte index of a UTF-16 offset, clamped to the string.
///
/// An offset that falls inside a surrogate pair rounds up to the next
/// character boundary.
#[must_use]
pub fn utf16_to_byte(text: &str, offset: usize) -> usize {
    let mut units = 0;
    for (index, ch) in text.char_indices() {
        if units >= offset {
            return index;
        }
        units += ch.len_utf16();
    }
    text.len()
}

/// Find the element whose text holds the character at `offset`.
///
/// Walks the subtree in document order, summing text lengths with
/// leading whitespace ignored (the submitted text was trimmed). The first
/// text node that carries the sum past `offset` wins, and its parent is
/// returned. `None` when the offset lies beyond the text.
///
/// # Examples
/// ```
/// use cnxml_linter::segment::locate;
/// use cnxml_linter::xml::Document;
///
/// let doc = Document::parse("<para>  An <emphasis>a</emphasis> apple</para>").unwrap();
/// let para = doc.root();
/// let emphasis = doc.find_first(para, "emphasis").unwrap();
///
/// assert_eq!(locate(&doc, para, 0), Some(para));
/// assert_eq!(locate(&doc, para, 3), Some(emphasis));
/// assert_eq!(locate(&doc, para, 5), Some(para));
/// assert_eq!(locate(&doc, para, 50), None);
/// ```
#[must_use]
pub fn locate(doc: &Document, node: NodeId, offset: usize) -> Option<NodeId> {
    let mut seen = 0;

    for id in doc.descendants(node) {
        let Some(text) = doc.text(id) else {
            continue;
        };

        // Nothing but whitespace so far: the trimmed buffer is still empty
        let counted = if seen == 0 { text.trim_start() } else { text };
        seen += utf16_len(counted);

        if seen > offset {
            return doc.parent(id);
        }
    }

    None
}

/// Wrap the matched span of `text` in square brackets.
///
/// Offsets are UTF-16 units and are clamped to the text.
///
/// # Examples
/// ```
/// use cnxml_linter::segment::annotate_context;
///
/// assert_eq!(annotate_context("The Cat sat.", 4, 3), "The [Cat] sat.");
/// ```
#[must_use]
pub fn annotate_context(text: &str, offset: usize, length: usize) -> String {
    let start = utf16_to_byte(text, offset);
    let end = utf16_to_byte(text, offset.saturating_add(length)).max(start);

    format!("{}[{}]{}", &text[..start], &text[start..end], &text[end..])
}

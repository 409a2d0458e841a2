//! Types describing how tags are treated while linting.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::xml::{Document, NodeId};

/// Rule identifiers to ignore, kept sorted for stable request bodies.
pub type SuppressionSet = BTreeSet<String>;

/// Classification of a tag for segmentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagClass {
    /// The whole subtree is one block of prose.
    Atomic,
    /// The subtree is cut out of its parent and checked on its own.
    ExtractFirst,
    /// Transparent; its children are segmented instead.
    Container,
}

/// A tag name, optionally restricted to tags nested inside another tag.
///
/// `within: Some("list")` on tag `item` plays the role of the CSS
/// descendant selector `list item`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagSelector {
    pub tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub within: Option<String>,
}

impl TagSelector {
    /// Selector matching every element with this tag.
    #[must_use]
    pub fn tag(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            within: None,
        }
    }

    /// Selector matching `tag` elements that have an `ancestor` element above them.
    #[must_use]
    pub fn within(tag: impl Into<String>, ancestor: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            within: Some(ancestor.into()),
        }
    }

    /// Check if the selector matches a node.
    ///
    /// Only the node's current ancestors count, so a detached subtree no
    /// longer sees the ancestors above its cut point.
    #[must_use]
    pub fn matches(&self, doc: &Document, node: NodeId) -> bool {
        if doc.is_text(node) || doc.name(node) != self.tag {
            return false;
        }

        match &self.within {
            Some(ancestor) => doc.ancestors(node).any(|a| doc.name(a) == ancestor),
            None => true,
        }
    }
}

/// Grammar rules to ignore inside elements matching any of the selectors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuppressionRule {
    pub selectors: Vec<TagSelector>,
    pub rules: Vec<String>,
}

impl SuppressionRule {
    /// Check if any selector of this rule matches a node.
    #[must_use]
    pub fn applies_to(&self, doc: &Document, node: NodeId) -> bool {
        self.selectors.iter().any(|s| s.matches(doc, node))
    }
}

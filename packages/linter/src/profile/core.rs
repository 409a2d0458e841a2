//! Lint profile mapping tag names to segmentation classes and suppressions.

use serde::{Deserialize, Serialize};

use super::types::{SuppressionRule, SuppressionSet, TagClass, TagSelector};
use crate::xml::{Document, NodeId, TEXT_NODE_NAME};

/// Tag classification plus rule suppressions for one document dialect.
///
/// Built once at startup and shared by reference; nothing mutates it
/// while documents are being linted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LintProfile {
    /// Tags whose subtree is submitted as one block.
    #[serde(default)]
    pub atomic_tags: Vec<String>,
    /// Tags cut out of their parent and checked separately.
    #[serde(default)]
    pub extract_first_tags: Vec<String>,
    #[serde(default)]
    pub suppressions: Vec<SuppressionRule>,
}

impl LintProfile {
    /// Create a new empty profile. Every tag is a container.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark tags as atomic prose blocks.
    pub fn atomic(&mut self, tags: impl IntoIterator<Item = impl Into<String>>) {
        self.atomic_tags.extend(tags.into_iter().map(Into::into));
    }

    /// Mark tags as extract-first.
    pub fn extract_first(&mut self, tags: impl IntoIterator<Item = impl Into<String>>) {
        self.extract_first_tags
            .extend(tags.into_iter().map(Into::into));
    }

    /// Ignore `rules` inside elements matching any of `selectors`.
    pub fn suppress(
        &mut self,
        selectors: impl IntoIterator<Item = TagSelector>,
        rules: impl IntoIterator<Item = impl Into<String>>,
    ) {
        self.suppressions.push(SuppressionRule {
            selectors: selectors.into_iter().collect(),
            rules: rules.into_iter().map(Into::into).collect(),
        });
    }

    /// Classify a tag name. Extract-first wins over atomic.
    #[must_use]
    pub fn classify(&self, tag: &str) -> TagClass {
        if self.extract_first_tags.iter().any(|t| t == tag) {
            TagClass::ExtractFirst
        } else if self.atomic_tags.iter().any(|t| t == tag) {
            TagClass::Atomic
        } else {
            TagClass::Container
        }
    }

    /// Classify a node by its name ([`TEXT_NODE_NAME`] for text).
    #[must_use]
    pub fn classify_node(&self, doc: &Document, node: NodeId) -> TagClass {
        if doc.is_text(node) {
            self.classify(TEXT_NODE_NAME)
        } else {
            self.classify(doc.name(node))
        }
    }

    /// Rules suppressed by selectors matching this node alone.
    #[must_use]
    pub fn own_suppressions(&self, doc: &Document, node: NodeId) -> SuppressionSet {
        self.suppressions
            .iter()
            .filter(|rule| rule.applies_to(doc, node))
            .flat_map(|rule| rule.rules.iter().cloned())
            .collect()
    }

    /// Inherited rules plus the ones this node triggers itself.
    #[must_use]
    pub fn effective_suppressions(
        &self,
        doc: &Document,
        node: NodeId,
        inherited: &SuppressionSet,
    ) -> SuppressionSet {
        let mut effective = inherited.clone();
        effective.extend(self.own_suppressions(doc, node));
        effective
    }

    /// Tags listed both as atomic and extract-first.
    #[must_use]
    pub fn conflicting_tags(&self) -> Vec<&str> {
        self.atomic_tags
            .iter()
            .filter(|t| self.extract_first_tags.contains(t))
            .map(String::as_str)
            .collect()
    }
}

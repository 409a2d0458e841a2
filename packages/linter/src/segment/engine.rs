//! Segment engine that walks a document and checks its prose blocks.

use super::locator::{annotate_context, locate};
use super::normalize::{flatten, prepare_block};
use super::types::{DocumentContext, Issue, IssueSink, LintStats};
use crate::checker::{GrammarChecker, GrammarMatch};
use crate::error::Result;
use crate::profile::{LintProfile, SuppressionSet, TagClass};
use crate::xml::{Document, NodeId};

/// Engine for segmenting documents into prose blocks.
///
/// Decides per node whether it is a block to check, a subtree to cut out
/// and check separately, or a container to descend into. The document is
/// mutated along the way: extracted subtrees are detached and checked
/// blocks are normalized in place.
pub struct SegmentEngine<'a, C: GrammarChecker + ?Sized> {
    profile: &'a LintProfile,
    checker: &'a C,
}

/// State shared by all blocks of one document.
struct Pass<'p> {
    context: &'p DocumentContext,
    sink: &'p mut dyn IssueSink,
    stats: LintStats,
}

impl<'a, C: GrammarChecker + ?Sized> SegmentEngine<'a, C> {
    /// Create a new segment engine.
    #[must_use]
    pub fn new(profile: &'a LintProfile, checker: &'a C) -> Self {
        Self { profile, checker }
    }

    /// Lint a whole document, starting at its root element.
    ///
    /// Placeholders must already be substituted. Issues are handed to
    /// `sink` as soon as each block has been checked.
    pub fn lint_document(
        &self,
        doc: &mut Document,
        context: &DocumentContext,
        sink: &mut dyn IssueSink,
    ) -> Result<LintStats> {
        let mut pass = Pass {
            context,
            sink,
            stats: LintStats::default(),
        };
        let root = doc.root();
        self.segment(doc, root, &SuppressionSet::new(), &mut pass)?;
        Ok(pass.stats)
    }

    fn segment(
        &self,
        doc: &mut Document,
        node: NodeId,
        inherited: &SuppressionSet,
        pass: &mut Pass<'_>,
    ) -> Result<()> {
        let suppressions = self.profile.effective_suppressions(doc, node, inherited);

        let extracted: Vec<NodeId> = doc
            .children(node)
            .iter()
            .copied()
            .filter(|&child| self.profile.classify_node(doc, child) == TagClass::ExtractFirst)
            .collect();
        for child in extracted {
            self.segment(doc, child, &suppressions, pass)?;
            doc.detach(child);
        }

        let has_text = doc
            .children(node)
            .iter()
            .any(|&child| doc.text(child).is_some_and(|t| !t.trim().is_empty()));

        if has_text || self.profile.classify_node(doc, node) == TagClass::Atomic {
            self.extract_nested(doc, node, &suppressions, pass)?;
            return self.check_block(doc, node, &suppressions, pass);
        }

        let children = doc.children(node).to_vec();
        for child in children {
            self.segment(doc, child, &suppressions, pass)?;
        }

        Ok(())
    }

    /// Cut extract-first elements out of a block, however deep they sit.
    ///
    /// Each one is segmented with the suppressions accumulated along its
    /// path before it is detached.
    fn extract_nested(
        &self,
        doc: &mut Document,
        node: NodeId,
        inherited: &SuppressionSet,
        pass: &mut Pass<'_>,
    ) -> Result<()> {
        let children = doc.children(node).to_vec();

        for child in children {
            if doc.is_text(child) {
                continue;
            }

            if self.profile.classify_node(doc, child) == TagClass::ExtractFirst {
                self.segment(doc, child, inherited, pass)?;
                doc.detach(child);
            } else {
                let path = self.profile.effective_suppressions(doc, child, inherited);
                self.extract_nested(doc, child, &path, pass)?;
            }
        }

        Ok(())
    }

    fn check_block(
        &self,
        doc: &mut Document,
        node: NodeId,
        suppressions: &SuppressionSet,
        pass: &mut Pass<'_>,
    ) -> Result<()> {
        prepare_block(doc, node);

        let text = flatten(doc, node);
        if text.is_empty() {
            return Ok(());
        }

        pass.stats.blocks += 1;
        let matches = self.checker.check(&text, suppressions)?;

        for grammar_match in matches {
            let located = locate(doc, node, grammar_match.offset);

            if let Some(element) = located {
                // Only the located node's own selectors, not its ancestors'
                if self
                    .profile
                    .own_suppressions(doc, element)
                    .contains(&grammar_match.rule.id)
                {
                    tracing::debug!(
                        rule = %grammar_match.rule.id,
                        node = %doc.node_path(element),
                        "Dropping match suppressed for node"
                    );
                    pass.stats.suppressed += 1;
                    continue;
                }
            }

            let issue = build_issue(
                doc,
                located.unwrap_or(node),
                &text,
                grammar_match,
                pass.context,
            );
            pass.sink.emit(issue)?;
            pass.stats.issues += 1;
        }

        Ok(())
    }
}

fn build_issue(
    doc: &Document,
    node: NodeId,
    text: &str,
    grammar_match: GrammarMatch,
    context: &DocumentContext,
) -> Issue {
    Issue {
        title: context.title.clone(),
        issue_type: grammar_match.rule.issue_type,
        message: grammar_match.message,
        context: annotate_context(text, grammar_match.offset, grammar_match.length),
        rule: grammar_match.rule.id,
        file: context.file.clone(),
        node_path: doc.node_path(node),
    }
}

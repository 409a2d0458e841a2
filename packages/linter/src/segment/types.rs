//! Records produced by the segmenter.

use crate::error::Result;

/// One grammar issue that survived suppression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// Title of the document the issue was found in.
    pub title: String,
    /// Issue category reported by the checker (e.g. "misspelling").
    pub issue_type: String,
    pub message: String,
    /// Checked text with the offending span in square brackets.
    pub context: String,
    pub rule: String,
    /// Source file path.
    pub file: String,
    /// Ancestor chain of the node holding the issue, root first.
    pub node_path: String,
}

impl Issue {
    /// Fields in output column order.
    #[must_use]
    pub fn as_record(&self) -> [&str; 7] {
        [
            &self.title,
            &self.issue_type,
            &self.message,
            &self.context,
            &self.rule,
            &self.file,
            &self.node_path,
        ]
    }
}

/// Destination for issues as soon as they are found.
pub trait IssueSink {
    fn emit(&mut self, issue: Issue) -> Result<()>;
}

impl IssueSink for Vec<Issue> {
    fn emit(&mut self, issue: Issue) -> Result<()> {
        self.push(issue);
        Ok(())
    }
}

/// Per-document information copied into every issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentContext {
    pub title: String,
    pub file: String,
}

impl DocumentContext {
    #[must_use]
    pub fn new(title: impl Into<String>, file: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            file: file.into(),
        }
    }
}

/// Counters for one or more linted documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LintStats {
    /// Blocks submitted to the checker.
    pub blocks: usize,
    /// Issues emitted.
    pub issues: usize,
    /// Matches dropped by a node-level suppression.
    pub suppressed: usize,
}

impl std::ops::AddAssign for LintStats {
    fn add_assign(&mut self, other: Self) {
        self.blocks += other.blocks;
        self.issues += other.issues;
        self.suppressed += other.suppressed;
    }
}

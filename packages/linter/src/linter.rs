//! Main linter service that ties all components together.

use std::fs;
use std::path::Path;

use crate::checker::GrammarChecker;
use crate::error::{LintError, Result};
use crate::profile::LintProfile;
use crate::segment::{substitute_placeholders, DocumentContext, IssueSink, LintStats, SegmentEngine};
use crate::walker::find_documents;
use crate::xml::Document;

/// Element whose text becomes the title column of every issue.
pub const TITLE_TAG: &str = "title";

/// Outcome of linting a directory tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Documents linted to completion.
    pub files: usize,
    /// Paths skipped because they could not be read or parsed.
    pub failed: usize,
    pub stats: LintStats,
}

/// Lints documents with one profile and one grammar checker.
pub struct Linter<'a, C: GrammarChecker + ?Sized> {
    profile: &'a LintProfile,
    checker: &'a C,
}

impl<'a, C: GrammarChecker + ?Sized> Linter<'a, C> {
    #[must_use]
    pub fn new(profile: &'a LintProfile, checker: &'a C) -> Self {
        Self { profile, checker }
    }

    /// Lint one document given as an XML string.
    ///
    /// # Arguments
    /// * `xml` - Document source
    /// * `file` - Path reported in the file column
    /// * `sink` - Receives issues as they are found
    pub fn lint_source(&self, xml: &str, file: &str, sink: &mut dyn IssueSink) -> Result<LintStats> {
        let mut doc = Document::parse(xml)?;
        substitute_placeholders(&mut doc);

        let title = document_title(&doc).ok_or_else(|| LintError::MissingElement {
            element: TITLE_TAG.to_string(),
            context: file.to_string(),
        })?;
        let context = DocumentContext::new(title, file);

        SegmentEngine::new(self.profile, self.checker).lint_document(&mut doc, &context, sink)
    }

    /// Read and lint one document file.
    pub fn lint_file(&self, path: &Path, sink: &mut dyn IssueSink) -> Result<LintStats> {
        let xml = fs::read_to_string(path).map_err(|source| LintError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        self.lint_source(&xml, &path.display().to_string(), sink)
    }

    /// Lint every document with `extension` below `root`, one after another.
    ///
    /// Paths that cannot be read or parsed are logged and skipped. A
    /// grammar checker or output failure stops the run; issues already
    /// handed to `sink` stay there.
    ///
    /// # Arguments
    /// * `root` - Directory to walk (or a single document)
    /// * `extension` - File extension to select, without the dot
    /// * `sink` - Receives issues as they are found
    /// * `on_file` - Called before each document is linted
    pub fn lint_tree(
        &self,
        root: &Path,
        extension: &str,
        sink: &mut dyn IssueSink,
        mut on_file: impl FnMut(&Path),
    ) -> Result<RunSummary> {
        let mut summary = RunSummary::default();

        for entry in find_documents(root, extension) {
            let path = match entry {
                Ok(path) => path,
                Err(e) => {
                    tracing::error!(error = %e, "Skipping unreadable path");
                    summary.failed += 1;
                    continue;
                }
            };

            on_file(&path);

            match self.lint_file(&path, sink) {
                Ok(stats) => {
                    tracing::info!(
                        file = %path.display(),
                        blocks = stats.blocks,
                        issues = stats.issues,
                        "Linted document"
                    );
                    summary.files += 1;
                    summary.stats += stats;
                }
                Err(e) if e.is_file_local() => {
                    tracing::error!(file = %path.display(), error = %e, "Skipping document");
                    summary.failed += 1;
                }
                Err(e) => return Err(e),
            }
        }

        Ok(summary)
    }
}

/// Trimmed text of the first `title` element in the document.
#[must_use]
pub fn document_title(doc: &Document) -> Option<String> {
    doc.find_first(doc.root(), TITLE_TAG)
        .map(|title| doc.text_content(title).trim().to_string())
}

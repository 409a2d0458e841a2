//! Error types for the linter.
//!
//! `LintError` separates failures that only cost one file (IO, XML,
//! missing title) from failures of the grammar checker, which end the run.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the linter library.
#[derive(Debug, Error)]
pub enum LintError {
    /// Invalid grammar-check server URL.
    #[error("Invalid server URL: '{0}'. Expected an http(s) URL (e.g., http://localhost:8011)")]
    InvalidServerUrl(String),

    /// Invalid file extension filter.
    #[error("Invalid file extension: '{0}'. Expected a bare extension (e.g., cnxml)")]
    InvalidExtension(String),

    /// Invalid HTTP timeout.
    #[error("Invalid timeout: {0} seconds. Expected at least 1")]
    InvalidTimeout(u64),

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The grammar checker answered with a non-success status.
    #[error("Grammar checker returned {status}: {body}")]
    CheckerStatus {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The grammar checker answered with something that is not the expected JSON.
    #[error("Grammar checker returned an unreadable response: {0}")]
    CheckerResponse(#[from] serde_json::Error),

    /// Failed to read an input file or directory.
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to walk a directory tree.
    #[error("Failed to walk directory: {0}")]
    Walk(#[from] walkdir::Error),

    /// XML parsing failed.
    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// Missing required XML element.
    #[error("Missing required XML element: {element} in {context}")]
    MissingElement { element: String, context: String },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV output failed.
    #[error("CSV output failed: {0}")]
    Csv(#[from] csv::Error),

    /// Lint profile could not be (de)serialized.
    #[error("Lint profile YAML failed: {0}")]
    Profile(#[from] serde_yaml_ng::Error),
}

impl LintError {
    /// Whether this error only affects the file being processed.
    ///
    /// Everything else (checker failures, output failures) aborts the run.
    #[must_use]
    pub fn is_file_local(&self) -> bool {
        matches!(
            self,
            Self::Read { .. } | Self::Walk(_) | Self::XmlParse(_) | Self::MissingElement { .. }
        )
    }
}

/// Result type alias for linter operations.
pub type Result<T> = std::result::Result<T, LintError>;

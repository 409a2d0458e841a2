//! CNXML Linter - Grammar-check CNXML documents against a LanguageTool server.
//!
//! This crate walks a directory of CNXML module files, cuts each document
//! into blocks of prose, submits every block to a LanguageTool server and
//! reports the matches as CSV rows.
//!
//! # Example
//!
//! ```
//! use cnxml_linter::segment::fold_whitespace;
//!
//! // Indentation inside multi-line prose never reaches the checker
//! assert_eq!(fold_whitespace("line one\n   line two"), "line one\nline two");
//! ```
//!
//! # Architecture
//!
//! The linter is organized into several modules:
//!
//! - [`config`]: Configuration constants and validation
//! - [`error`]: Error types and Result alias
//! - [`xml`]: Owned, mutable XML tree
//! - [`profile`]: Tag classification and rule suppressions
//! - [`segment`]: Prose segmentation, checking and offset mapping
//! - [`checker`]: Grammar checker trait and LanguageTool client
//! - [`http`]: HTTP client construction
//! - [`output`]: CSV issue writer
//! - [`walker`]: Directory traversal
//! - [`cli`]: Command-line interface
//! - [`linter`]: Main linter service

pub mod checker;
pub mod cli;
pub mod config;
pub mod error;
pub mod http;
pub mod linter;
pub mod output;
pub mod profile;
pub mod segment;
pub mod walker;
pub mod xml;

// Re-export commonly used items
pub use checker::{GrammarChecker, GrammarMatch, LanguageToolClient};
pub use error::{LintError, Result};
pub use linter::{Linter, RunSummary};
pub use profile::{create_cnxml_profile, LintProfile};
pub use segment::{Issue, IssueSink, LintStats};

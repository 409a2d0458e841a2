//! Prose segmentation and checking.
//!
//! Walks a document, decides which subtrees form blocks of prose,
//! submits each block to a grammar checker, and maps reported offsets
//! back to the nodes they came from so node-specific suppressions apply.

mod engine;
mod locator;
mod normalize;
mod types;

pub use engine::SegmentEngine;
pub use locator::{annotate_context, locate, utf16_len, utf16_to_byte};
pub use normalize::{
    flatten, fold_whitespace, prepare_block, substitute_placeholders, LINK_PLACEHOLDER,
    MATH_PLACEHOLDER,
};
pub use types::{DocumentContext, Issue, IssueSink, LintStats};

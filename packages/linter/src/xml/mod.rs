//! XML document model.
//!
//! Documents are parsed with `roxmltree` and copied into an owned tree
//! that the segmenter can rewrite in place.

mod tree;

pub use tree::{Descendants, Document, NodeId, NodeKind, DOCUMENT_NODE_NAME, TEXT_NODE_NAME};

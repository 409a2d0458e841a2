//! Owned, mutable XML tree.
//!
//! `roxmltree` gives a read-only view, but linting rewrites the document
//! while it walks it (placeholders, detached lists, merged text). The
//! parsed document is therefore copied into an arena where every node
//! owns its ordered children by id and keeps a back-reference to its parent.

use roxmltree::{Node, ParsingOptions};

use crate::error::Result;

/// Name reported for text nodes, mirroring the DOM `nodeName`.
pub const TEXT_NODE_NAME: &str = "#text";

/// Name of the document node that heads every node path.
pub const DOCUMENT_NODE_NAME: &str = "#document";

/// Handle of a node inside a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

/// Payload of a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Element with its local name and optional `id` attribute.
    Element { name: String, id: Option<String> },
    /// Character data.
    Text(String),
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// An XML document held as an arena of nodes.
///
/// Detached nodes stay in the arena and remain addressable by their id;
/// they are just no longer reachable from the root.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<NodeData>,
    root: NodeId,
}

impl Document {
    /// Parse an XML string.
    ///
    /// DTDs are allowed since CNXML files commonly declare one. Comments and
    /// processing instructions are dropped.
    ///
    /// # Examples
    /// ```
    /// use cnxml_linter::xml::Document;
    ///
    /// let doc = Document::parse("<para id=\"p1\">Hello <emphasis>world</emphasis></para>").unwrap();
    /// assert_eq!(doc.name(doc.root()), "para");
    /// assert_eq!(doc.text_content(doc.root()), "Hello world");
    /// ```
    pub fn parse(xml: &str) -> Result<Self> {
        let options = ParsingOptions {
            allow_dtd: true,
            ..ParsingOptions::default()
        };
        let parsed = roxmltree::Document::parse_with_options(xml, options)?;
        Ok(Self::from_roxmltree(&parsed))
    }

    /// Copy a parsed `roxmltree` document into an owned tree.
    #[must_use]
    pub fn from_roxmltree(parsed: &roxmltree::Document<'_>) -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            root: NodeId(0),
        };
        doc.root = doc.copy_element(parsed.root_element(), None);
        doc
    }

    fn copy_element(&mut self, source: Node<'_, '_>, parent: Option<NodeId>) -> NodeId {
        let id = self.alloc(
            NodeKind::Element {
                name: source.tag_name().name().to_string(),
                id: source.attribute("id").map(String::from),
            },
            parent,
        );

        for child in source.children() {
            if child.is_element() {
                let child_id = self.copy_element(child, Some(id));
                self.nodes[id.0].children.push(child_id);
            } else if child.is_text() {
                let text = child.text().unwrap_or_default().to_string();
                let child_id = self.alloc(NodeKind::Text(text), Some(id));
                self.nodes[id.0].children.push(child_id);
            }
        }

        id
    }

    fn alloc(&mut self, kind: NodeKind, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            kind,
            parent,
            children: Vec::new(),
        });
        id
    }

    /// The document element.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Payload of a node.
    #[must_use]
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.0].kind
    }

    /// Element name, or [`TEXT_NODE_NAME`] for text nodes.
    #[must_use]
    pub fn name(&self, id: NodeId) -> &str {
        match &self.nodes[id.0].kind {
            NodeKind::Element { name, .. } => name,
            NodeKind::Text(_) => TEXT_NODE_NAME,
        }
    }

    /// The `id` attribute of an element.
    #[must_use]
    pub fn element_id(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id.0].kind {
            NodeKind::Element { id, .. } => id.as_deref(),
            NodeKind::Text(_) => None,
        }
    }

    /// Character data of a text node.
    #[must_use]
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id.0].kind {
            NodeKind::Text(text) => Some(text),
            NodeKind::Element { .. } => None,
        }
    }

    /// Check if a node is a text node.
    #[must_use]
    pub fn is_text(&self, id: NodeId) -> bool {
        matches!(self.nodes[id.0].kind, NodeKind::Text(_))
    }

    /// Parent of a node, `None` for the root and for detached subtrees.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Ordered children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Ancestors of a node, nearest first. The node itself is not included.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |&current| self.parent(current))
    }

    /// Pre-order traversal of a subtree, starting with the node itself.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            doc: self,
            stack: vec![id],
        }
    }

    /// Concatenated character data of all text nodes in a subtree.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        self.descendants(id)
            .filter_map(|node| self.text(node))
            .collect()
    }

    /// First element named `name` in a subtree, in document order.
    #[must_use]
    pub fn find_first(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.descendants(id)
            .find(|&node| !self.is_text(node) && self.name(node) == name)
    }

    /// All elements named `name` in a subtree, in document order.
    #[must_use]
    pub fn find_all(&self, id: NodeId, name: &str) -> Vec<NodeId> {
        self.descendants(id)
            .filter(|&node| !self.is_text(node) && self.name(node) == name)
            .collect()
    }

    /// Human-readable ancestor chain of a node, root first.
    ///
    /// Nodes still attached to the tree start with [`DOCUMENT_NODE_NAME`].
    ///
    /// # Examples
    /// ```
    /// use cnxml_linter::xml::Document;
    ///
    /// let doc = Document::parse(r#"<document><content><para id="p1">Hi</para></content></document>"#).unwrap();
    /// let para = doc.find_first(doc.root(), "para").unwrap();
    /// assert_eq!(doc.node_path(para), "#document > document > content > para#p1");
    /// ```
    #[must_use]
    pub fn node_path(&self, id: NodeId) -> String {
        let mut chain: Vec<NodeId> = self.ancestors(id).collect();
        chain.reverse();
        chain.push(id);

        let attached = chain.first() == Some(&self.root);
        let names = chain.into_iter().map(|node| match self.element_id(node) {
            Some(element_id) => format!("{}#{element_id}", self.name(node)),
            None => self.name(node).to_string(),
        });

        attached
            .then(|| DOCUMENT_NODE_NAME.to_string())
            .into_iter()
            .chain(names)
            .collect::<Vec<_>>()
            .join(" > ")
    }

    /// Remove a node from its parent. The subtree stays intact.
    pub fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id.0].parent.take() {
            self.nodes[parent.0].children.retain(|&child| child != id);
        }
    }

    /// Replace a node with a new text node at the same position.
    ///
    /// Returns the id of the new text node. A detached node is left alone
    /// and the new text node is created detached.
    pub fn replace_with_text(&mut self, id: NodeId, text: impl Into<String>) -> NodeId {
        let parent = self.nodes[id.0].parent;
        let replacement = self.alloc(NodeKind::Text(text.into()), parent);

        if let Some(parent) = parent {
            if let Some(slot) = self.nodes[parent.0]
                .children
                .iter_mut()
                .find(|child| **child == id)
            {
                *slot = replacement;
            }
            self.nodes[id.0].parent = None;
        }

        replacement
    }

    /// Replace all children of an element with a single text node.
    ///
    /// Like the DOM `textContent` setter, an empty string leaves no children.
    pub fn set_text_content(&mut self, id: NodeId, text: impl Into<String>) {
        for child in std::mem::take(&mut self.nodes[id.0].children) {
            self.nodes[child.0].parent = None;
        }

        let text = text.into();
        if !text.is_empty() {
            let child = self.alloc(NodeKind::Text(text), Some(id));
            self.nodes[id.0].children.push(child);
        }
    }

    /// Overwrite the character data of a text node. Elements are ignored.
    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) {
        if let NodeKind::Text(current) = &mut self.nodes[id.0].kind {
            *current = text.into();
        }
    }

    /// Merge adjacent text nodes and drop empty ones throughout a subtree.
    ///
    /// After this, no element in the subtree has two text children in a row.
    pub fn normalize(&mut self, id: NodeId) {
        let elements: Vec<NodeId> = self
            .descendants(id)
            .filter(|&node| !self.is_text(node))
            .collect();

        for element in elements {
            let children = std::mem::take(&mut self.nodes[element.0].children);
            let mut kept: Vec<NodeId> = Vec::with_capacity(children.len());

            for child in children {
                let NodeKind::Text(text) = &mut self.nodes[child.0].kind else {
                    kept.push(child);
                    continue;
                };
                let text = std::mem::take(text);

                let previous_text = kept.last().copied().filter(|&prev| self.is_text(prev));
                match previous_text {
                    _ if text.is_empty() => self.nodes[child.0].parent = None,
                    Some(prev) => {
                        if let NodeKind::Text(merged) = &mut self.nodes[prev.0].kind {
                            merged.push_str(&text);
                        }
                        self.nodes[child.0].parent = None;
                    }
                    None => {
                        self.nodes[child.0].kind = NodeKind::Text(text);
                        kept.push(child);
                    }
                }
            }

            self.nodes[element.0].children = kept;
        }
    }
}

/// Pre-order iterator over a subtree, see [`Document::descendants`].
pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.doc.children(id).iter().rev().copied());
        Some(id)
    }
}

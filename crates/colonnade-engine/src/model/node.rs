use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Type tag of a document node.
///
/// The engine never hard-codes concrete tags; the `column`/`columnBlock`
/// identities arrive through [`crate::schema::LayoutOptions`] and everything
/// else is opaque host vocabulary.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeType(String);

impl NodeType {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeType {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeType({})", self.0)
    }
}

/// Attribute mapping of a node. Order-irrelevant, values are arbitrary JSON.
pub type Attrs = BTreeMap<String, Value>;

/// Typed element of the document tree.
///
/// Serializes to the interchange form hosts exchange documents in:
/// `{"type": ..., "attrs": {...}, "content": [...]}`.
///
/// ## Position arithmetic
///
/// Positions are integer offsets counting boundary tokens. A node with
/// children occupies an opening token, its content, and a closing token
/// (`2 + content size`); a childless node is atomic and occupies a single
/// token. Every valid position therefore denotes a location *between* nodes
/// at some depth, and no operation can split an atomic node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    #[serde(rename = "type")]
    pub kind: NodeType,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attrs: Attrs,
    #[serde(rename = "content", default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(kind: impl Into<NodeType>) -> Self {
        Self {
            kind: kind.into(),
            attrs: Attrs::new(),
            children: Vec::new(),
        }
    }

    /// Convenience constructor for hosts whose schema uses a `text` leaf.
    pub fn text(text: impl Into<String>) -> Self {
        Self::new("text").with_attr("text", text.into())
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    /// A copy of this node carrying `children` instead of its own.
    pub(crate) fn copy(&self, children: Vec<Node>) -> Node {
        Node {
            kind: self.kind.clone(),
            attrs: self.attrs.clone(),
            children,
        }
    }

    pub fn attr(&self, name: &str) -> Option<&Value> {
        self.attrs.get(name)
    }

    pub fn child(&self, index: usize) -> Option<&Node> {
        self.children.get(index)
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Number of position tokens this node occupies in its parent.
    pub fn size(&self) -> usize {
        if self.children.is_empty() {
            1
        } else {
            2 + self.content_size()
        }
    }

    /// Number of positions spanned by this node's content.
    pub fn content_size(&self) -> usize {
        self.children.iter().map(Node::size).sum()
    }

    /// Childless nodes are atomic: they have no interior positions.
    pub fn is_atom(&self) -> bool {
        self.children.is_empty()
    }

    /// Structurally empty nodes carry no content worth preserving.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Whether this node holds atomic content only, i.e. it is a renderable
    /// content unit (a paragraph-like node) rather than a block container.
    pub fn is_textblock(&self) -> bool {
        !self.children.is_empty() && self.children.iter().all(Node::is_atom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn paragraph(text: &str) -> Node {
        Node::new("paragraph").with_children(vec![Node::text(text)])
    }

    // ============ Size arithmetic tests ============

    #[test]
    fn test_atom_size_is_one() {
        assert_eq!(Node::text("Hello").size(), 1);
        assert_eq!(Node::new("paragraph").size(), 1);
    }

    #[test]
    fn test_container_size_counts_boundaries() {
        let para = paragraph("Hello");
        assert_eq!(para.content_size(), 1);
        assert_eq!(para.size(), 3);

        let column = Node::new("column").with_children(vec![para]);
        assert_eq!(column.size(), 5);
    }

    #[test]
    fn test_content_size_sums_children() {
        let doc = Node::new("doc").with_children(vec![paragraph("a"), paragraph("b")]);
        assert_eq!(doc.content_size(), 6);
    }

    #[test]
    fn test_textblock_detection() {
        assert!(paragraph("Hello").is_textblock());
        assert!(!Node::new("column").with_children(vec![paragraph("x")]).is_textblock());
        assert!(!Node::new("column").is_textblock());
    }

    // ============ Serde interchange tests ============

    #[test]
    fn test_node_serializes_to_interchange_form() {
        let node = paragraph("Hello");
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "paragraph",
                "content": [{"type": "text", "attrs": {"text": "Hello"}}],
            })
        );
    }

    #[test]
    fn test_node_deserializes_with_missing_fields() {
        let node: Node = serde_json::from_value(json!({"type": "horizontalRule"})).unwrap();
        assert_eq!(node.kind, NodeType::new("horizontalRule"));
        assert!(node.attrs.is_empty());
        assert!(node.children.is_empty());
    }

    #[test]
    fn test_node_json_round_trip() {
        let doc = Node::new("doc").with_children(vec![
            Node::new("columnBlock").with_children(vec![
                Node::new("column")
                    .with_attr("width", 60)
                    .with_children(vec![paragraph("left")]),
                Node::new("column").with_children(vec![paragraph("right")]),
            ]),
        ]);
        let text = serde_json::to_string(&doc).unwrap();
        let back: Node = serde_json::from_str(&text).unwrap();
        assert_eq!(back, doc);
    }
}

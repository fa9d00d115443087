use crate::model::Node;

use super::position::ResolvedPos;

/// An ancestor matched by [`find_ancestor`], with the position immediately
/// before it.
#[derive(Debug, Clone, PartialEq)]
pub struct FoundNode {
    pub node: Node,
    pub pos: usize,
    pub depth: usize,
}

/// Walk the ancestor chain of `resolved` from the innermost enclosing node
/// upward and return the nearest ancestor the predicate accepts.
///
/// The root is not a candidate: it has no boundary position. Absence is a
/// normal outcome, not an error.
pub fn find_ancestor(
    resolved: &ResolvedPos<'_>,
    predicate: impl Fn(&Node, usize) -> bool,
) -> Option<FoundNode> {
    for depth in (1..=resolved.depth()).rev() {
        let node = resolved.node(depth);
        if predicate(node, depth) {
            return Some(FoundNode {
                node: node.clone(),
                pos: resolved.before(depth),
                depth,
            });
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    use crate::editing::position::resolve;
    use crate::model::NodeType;

    fn paragraph(text: &str) -> Node {
        Node::new("paragraph").with_children(vec![Node::text(text)])
    }

    fn sample_doc() -> Node {
        Node::new("doc").with_children(vec![
            paragraph("a"),
            Node::new("columnBlock").with_children(vec![
                Node::new("column").with_children(vec![paragraph("b")]),
                Node::new("column").with_children(vec![paragraph("c")]),
            ]),
        ])
    }

    #[test]
    fn test_find_ancestor_returns_nearest_match() {
        let doc = sample_doc();
        // inside paragraph("b"), ancestors are paragraph, column, columnBlock
        let resolved = resolve(&doc, 6).unwrap();
        let found = find_ancestor(&resolved, |node, _| node.kind.as_str() == "column").unwrap();
        assert_eq!(found.node.kind, NodeType::new("column"));
        assert_eq!(found.pos, 4);
        assert_eq!(found.depth, 2);
    }

    #[test]
    fn test_find_ancestor_walks_past_nearer_levels() {
        let doc = sample_doc();
        let resolved = resolve(&doc, 6).unwrap();
        let found =
            find_ancestor(&resolved, |node, _| node.kind.as_str() == "columnBlock").unwrap();
        assert_eq!(found.pos, 3);
        assert_eq!(found.depth, 1);
    }

    #[test]
    fn test_find_ancestor_absent_outside_match() {
        let doc = sample_doc();
        // inside paragraph("a"), no column ancestors
        let resolved = resolve(&doc, 1).unwrap();
        assert_eq!(
            find_ancestor(&resolved, |node, _| node.kind.as_str() == "columnBlock"),
            None
        );
    }

    #[test]
    fn test_find_ancestor_skips_root() {
        let doc = sample_doc();
        let resolved = resolve(&doc, 0).unwrap();
        assert_eq!(find_ancestor(&resolved, |_, _| true), None);
    }
}

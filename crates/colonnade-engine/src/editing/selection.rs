use crate::model::Node;

use super::position::{PositionError, resolve};

/// A user selection over the document.
///
/// Range selections describe a contiguous position range (possibly
/// collapsed); node selections cover exactly one node and are what the
/// unwrap transform uses to delete a column block in one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Range { anchor: usize, head: usize },
    Node { at: usize },
}

impl Selection {
    pub fn collapsed(pos: usize) -> Self {
        Selection::Range {
            anchor: pos,
            head: pos,
        }
    }

    pub fn range(anchor: usize, head: usize) -> Self {
        Selection::Range { anchor, head }
    }

    pub fn node(at: usize) -> Self {
        Selection::Node { at }
    }

    /// Leading boundary of the selection.
    pub fn from(&self) -> usize {
        match *self {
            Selection::Range { anchor, head } => anchor.min(head),
            Selection::Node { at } => at,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        matches!(*self, Selection::Range { anchor, head } if anchor == head)
    }

    /// Map this selection through a replacement of `from..to` by content of
    /// size `inserted`. Insertions at a position land before it, so
    /// positions at the edit site shift right; positions inside a deleted
    /// range collapse to its start.
    pub(crate) fn map(&self, from: usize, to: usize, inserted: usize) -> Selection {
        let map_pos = |pos: usize| {
            if pos < from {
                pos
            } else if pos >= to {
                pos + inserted - (to - from)
            } else {
                from
            }
        };
        match *self {
            Selection::Range { anchor, head } => Selection::Range {
                anchor: map_pos(anchor),
                head: map_pos(head),
            },
            Selection::Node { at } => Selection::Node { at: map_pos(at) },
        }
    }
}

/// A selection widened outward to block boundaries.
///
/// `open_start`/`open_end` count how many ancestor levels the range cuts
/// open at each endpoint, relative to the deepest ancestor shared by both.
/// Replacement is only well-formed when the two are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpandedSelection {
    pub from: usize,
    pub to: usize,
    pub open_start: usize,
    pub open_end: usize,
}

impl ExpandedSelection {
    pub fn is_balanced(&self) -> bool {
        self.open_start == self.open_end
    }
}

/// Widen `selection` so both endpoints land on block boundaries.
///
/// Each endpoint moves out of its innermost chain of textblock ancestors:
/// the anchor leftward to the outermost such node's start, the head
/// rightward to its end. Endpoints already sitting between block-level
/// nodes stay put. Pure function of the document and selection.
pub fn expand_selection(
    root: &Node,
    selection: &Selection,
) -> Result<ExpandedSelection, PositionError> {
    let (sel_from, sel_to) = match *selection {
        Selection::Range { anchor, head } => (anchor.min(head), anchor.max(head)),
        Selection::Node { at } => {
            let resolved = resolve(root, at)?;
            let node = resolved
                .node_after()
                .ok_or(PositionError::NoNodeAfter { pos: at })?;
            (at, at + node.size())
        }
    };

    let rf = resolve(root, sel_from)?;
    let mut from_depth = rf.depth();
    while from_depth > 0 && rf.node(from_depth).is_textblock() {
        from_depth -= 1;
    }
    let from = if from_depth == rf.depth() {
        rf.pos
    } else {
        rf.before(from_depth + 1)
    };

    let rt = resolve(root, sel_to)?;
    let mut to_depth = rt.depth();
    while to_depth > 0 && rt.node(to_depth).is_textblock() {
        to_depth -= 1;
    }
    let to = if to_depth == rt.depth() {
        rt.pos
    } else {
        rt.after(to_depth + 1)
    };

    let ef = resolve(root, from)?;
    let et = resolve(root, to)?;
    let shared = ef.shared_depth(&et);
    Ok(ExpandedSelection {
        from,
        to,
        open_start: ef.depth() - shared,
        open_end: et.depth() - shared,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn paragraph(text: &str) -> Node {
        Node::new("paragraph").with_children(vec![Node::text(text)])
    }

    fn doc(children: Vec<Node>) -> Node {
        Node::new("doc").with_children(children)
    }

    // ============ Expansion tests ============

    #[test]
    fn test_expand_collapsed_inside_paragraph() {
        let tree = doc(vec![paragraph("Hello")]);
        let expanded = expand_selection(&tree, &Selection::collapsed(1)).unwrap();
        assert_eq!(
            expanded,
            ExpandedSelection {
                from: 0,
                to: 3,
                open_start: 0,
                open_end: 0
            }
        );
    }

    #[test]
    fn test_expand_range_across_siblings() {
        let tree = doc(vec![paragraph("a"), paragraph("b"), paragraph("c")]);
        // inside paragraph("a") to inside paragraph("b")
        let expanded = expand_selection(&tree, &Selection::range(1, 5)).unwrap();
        assert_eq!(expanded.from, 0);
        assert_eq!(expanded.to, 6);
        assert!(expanded.is_balanced());
    }

    #[test]
    fn test_expand_reversed_range() {
        let tree = doc(vec![paragraph("a"), paragraph("b")]);
        let forward = expand_selection(&tree, &Selection::range(1, 4)).unwrap();
        let backward = expand_selection(&tree, &Selection::range(4, 1)).unwrap();
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_expand_keeps_block_boundary_endpoints() {
        let tree = doc(vec![paragraph("a"), paragraph("b")]);
        let expanded = expand_selection(&tree, &Selection::range(0, 6)).unwrap();
        assert_eq!(expanded.from, 0);
        assert_eq!(expanded.to, 6);
    }

    #[test]
    fn test_expand_inside_nested_textblock() {
        let column = Node::new("column").with_children(vec![paragraph("a"), paragraph("b")]);
        let tree = doc(vec![column]);
        // collapsed inside paragraph("a"), which spans 1..4 inside the column
        let expanded = expand_selection(&tree, &Selection::collapsed(2)).unwrap();
        assert_eq!(
            expanded,
            ExpandedSelection {
                from: 1,
                to: 4,
                open_start: 0,
                open_end: 0
            }
        );
    }

    #[test]
    fn test_expand_depth_mismatch() {
        let quote = Node::new("blockquote").with_children(vec![paragraph("a")]);
        let tree = doc(vec![quote, paragraph("b")]);
        // anchor inside the quoted paragraph, head inside the top-level one
        let expanded = expand_selection(&tree, &Selection::range(2, 6)).unwrap();
        assert_eq!(expanded.open_start, 1);
        assert_eq!(expanded.open_end, 0);
        assert!(!expanded.is_balanced());
    }

    #[test]
    fn test_expand_node_selection() {
        let tree = doc(vec![paragraph("a"), paragraph("b")]);
        let expanded = expand_selection(&tree, &Selection::node(3)).unwrap();
        assert_eq!(expanded.from, 3);
        assert_eq!(expanded.to, 6);
        assert!(expanded.is_balanced());
    }

    #[test]
    fn test_expand_node_selection_without_node() {
        let tree = doc(vec![paragraph("a")]);
        assert_eq!(
            expand_selection(&tree, &Selection::node(3)),
            Err(PositionError::NoNodeAfter { pos: 3 })
        );
    }

    // ============ Mapping tests ============

    #[test]
    fn test_map_positions_after_insert_shift_right() {
        let sel = Selection::node(4);
        assert_eq!(sel.map(4, 4, 3), Selection::node(7));
    }

    #[test]
    fn test_map_positions_before_edit_are_stable() {
        let sel = Selection::range(0, 2);
        assert_eq!(sel.map(5, 8, 1), Selection::range(0, 2));
    }

    #[test]
    fn test_map_collapses_into_deleted_range() {
        let sel = Selection::range(4, 6);
        assert_eq!(sel.map(3, 8, 0), Selection::range(3, 3));
    }

    #[test]
    fn test_map_shifts_past_shrinking_replacement() {
        let sel = Selection::collapsed(10);
        assert_eq!(sel.map(2, 6, 1), Selection::collapsed(7));
    }
}

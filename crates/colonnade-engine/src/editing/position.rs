use thiserror::Error;

use crate::model::Node;

/// Failures of position arithmetic against a concrete tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PositionError {
    #[error("position {pos} is outside the document (content size {size})")]
    OutOfBounds { pos: usize, size: usize },

    #[error("no node starts at position {pos}")]
    NoNodeAfter { pos: usize },

    #[error("range is inverted: {from} > {to}")]
    InvertedRange { from: usize, to: usize },
}

#[derive(Debug, Clone, PartialEq)]
struct PathStep {
    /// Child index descended into at this level.
    index: usize,
    /// Absolute position of the first slot inside that child's content.
    start: usize,
}

/// A position together with the chain of ancestors enclosing it.
///
/// Depth 0 is the document root; `node(depth)` for 1..=depth() walks down to
/// the innermost node the position sits in. Borrows the tree it was resolved
/// against, so it cannot outlive a transaction mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPos<'a> {
    pub pos: usize,
    nodes: Vec<&'a Node>,
    steps: Vec<PathStep>,
    /// Offset of `pos` within the innermost enclosing node's content.
    pub parent_offset: usize,
    /// Child index in the innermost node that `pos` precedes.
    index: usize,
}

impl<'a> ResolvedPos<'a> {
    /// Number of ancestor levels between the root and this position.
    pub fn depth(&self) -> usize {
        self.steps.len()
    }

    /// Ancestor at `depth`; 0 is the root, `depth()` the innermost node.
    pub fn node(&self, depth: usize) -> &'a Node {
        self.nodes[depth]
    }

    /// The node the position is directly inside.
    pub fn parent(&self) -> &'a Node {
        self.nodes[self.depth()]
    }

    /// Child index at `depth`: the index descended through for ancestor
    /// levels, or the boundary index in the innermost node.
    pub fn index(&self, depth: usize) -> usize {
        if depth == self.depth() {
            self.index
        } else {
            self.steps[depth].index
        }
    }

    /// The node starting exactly at this position, if any.
    pub fn node_after(&self) -> Option<&'a Node> {
        self.parent().child(self.index)
    }

    /// Absolute position where the content of the ancestor at `depth` starts.
    pub fn start(&self, depth: usize) -> usize {
        if depth == 0 { 0 } else { self.steps[depth - 1].start }
    }

    /// Absolute position immediately before the ancestor at `depth` (≥ 1).
    pub fn before(&self, depth: usize) -> usize {
        assert!(depth >= 1, "the root has no boundary positions");
        self.start(depth) - 1
    }

    /// Absolute position immediately after the ancestor at `depth` (≥ 1).
    pub fn after(&self, depth: usize) -> usize {
        self.before(depth) + self.nodes[depth].size()
    }

    /// Depth of the deepest ancestor shared with `other`.
    pub fn shared_depth(&self, other: &ResolvedPos<'_>) -> usize {
        let mut depth = 0;
        while depth < self.depth() && depth < other.depth() {
            let (a, b) = (&self.steps[depth], &other.steps[depth]);
            if a.index != b.index || a.start != b.start {
                break;
            }
            depth += 1;
        }
        depth
    }
}

/// Resolve `pos` against `root`, producing its ancestor chain.
///
/// Resolution descends into a child only when the position falls strictly
/// inside it, so the result always describes a location between nodes.
pub fn resolve(root: &Node, pos: usize) -> Result<ResolvedPos<'_>, PositionError> {
    let size = root.content_size();
    if pos > size {
        return Err(PositionError::OutOfBounds { pos, size });
    }

    let mut nodes = vec![root];
    let mut steps = Vec::new();
    let mut node = root;
    let mut start = 0;
    loop {
        let mut cur = start;
        let mut boundary = None;
        let mut descend = None;
        for (i, child) in node.children.iter().enumerate() {
            if pos == cur {
                boundary = Some(i);
                break;
            }
            let end = cur + child.size();
            if pos < end {
                descend = Some((i, cur + 1));
                break;
            }
            cur = end;
        }

        match descend {
            Some((index, content_start)) => {
                steps.push(PathStep {
                    index,
                    start: content_start,
                });
                node = &node.children[index];
                nodes.push(node);
                start = content_start;
            }
            None => {
                return Ok(ResolvedPos {
                    pos,
                    index: boundary.unwrap_or(node.child_count()),
                    parent_offset: pos - start,
                    nodes,
                    steps,
                });
            }
        }
    }
}

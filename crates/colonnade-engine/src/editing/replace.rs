//! Pure tree surgery: replacing a position range and extracting the content
//! between two positions. Positions always denote locations between nodes, so
//! every cut lands on a node boundary; ancestors a cut passes through are
//! split, and split-off parts that end up empty are dropped.

use crate::model::Node;

use super::position::PositionError;

/// Produce a new tree in which the content between `from` and `to` is
/// replaced by `insert`. The input tree is left untouched.
pub(crate) fn replace_range(
    root: &Node,
    from: usize,
    to: usize,
    insert: &[Node],
) -> Result<Node, PositionError> {
    if from > to {
        return Err(PositionError::InvertedRange { from, to });
    }
    let size = root.content_size();
    if to > size {
        return Err(PositionError::OutOfBounds { pos: to, size });
    }
    Ok(root.copy(replace_content(root, from, to, insert)))
}

fn replace_content(node: &Node, from: usize, to: usize, insert: &[Node]) -> Vec<Node> {
    let mut out = Vec::new();
    let mut inserted = false;
    let mut cur = 0;
    for child in &node.children {
        let start = cur;
        let end = start + child.size();
        cur = end;

        if end <= from {
            out.push(child.clone());
            continue;
        }
        if start < from {
            if end > to {
                // both cut points fall inside this child
                out.push(child.copy(replace_content(child, from - start - 1, to - start - 1, insert)));
                inserted = true;
            } else {
                out.extend(cut_before(child, from - start - 1));
            }
            continue;
        }
        if !inserted {
            out.extend(insert.iter().cloned());
            inserted = true;
        }
        if start >= to {
            out.push(child.clone());
        } else if end > to {
            out.extend(cut_after(child, to - start - 1));
        }
        // children wholly inside the range are dropped
    }
    if !inserted {
        out.extend(insert.iter().cloned());
    }
    out
}

/// The content of `root` strictly between `from` and `to`, with ancestors the
/// range cuts through closed into complete nodes.
pub fn content_between(root: &Node, from: usize, to: usize) -> Vec<Node> {
    slice_content(root, from, to)
}

fn slice_content(node: &Node, from: usize, to: usize) -> Vec<Node> {
    let mut out = Vec::new();
    let mut cur = 0;
    for child in &node.children {
        let start = cur;
        let end = start + child.size();
        cur = end;

        if end <= from || start >= to {
            continue;
        }
        if start < from && end > to {
            out.push(child.copy(slice_content(child, from - start - 1, to - start - 1)));
        } else if start < from {
            out.extend(cut_after(child, from - start - 1));
        } else if end > to {
            out.extend(cut_before(child, to - start - 1));
        } else {
            out.push(child.clone());
        }
    }
    out
}

/// The part of `node` whose content lies before the content offset `at`,
/// or `None` when nothing remains on that side.
fn cut_before(node: &Node, at: usize) -> Option<Node> {
    let mut kept = Vec::new();
    let mut cur = 0;
    for child in &node.children {
        let start = cur;
        let end = start + child.size();
        cur = end;
        if end <= at {
            kept.push(child.clone());
            continue;
        }
        if start < at {
            kept.extend(cut_before(child, at - start - 1));
        }
        break;
    }
    if kept.is_empty() { None } else { Some(node.copy(kept)) }
}

/// The part of `node` whose content lies after the content offset `at`.
fn cut_after(node: &Node, at: usize) -> Option<Node> {
    let mut kept = Vec::new();
    let mut cur = 0;
    for child in &node.children {
        let start = cur;
        let end = start + child.size();
        cur = end;
        if end <= at {
            continue;
        }
        if start >= at {
            kept.push(child.clone());
        } else {
            kept.extend(cut_after(child, at - start - 1));
        }
    }
    if kept.is_empty() { None } else { Some(node.copy(kept)) }
}

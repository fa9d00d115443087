use crate::model::Node;

use super::position::{PositionError, resolve};
use super::replace;
use super::selection::Selection;

/// One tree replacement recorded by a transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub from: usize,
    pub to: usize,
    pub inserted: Vec<Node>,
}

/// The edit being built against a document.
///
/// Owns the current root, the current selection, and the ordered log of
/// replacements applied so far. The host editor owns the transaction's
/// lifecycle; the engine mutates one it is handed and never keeps a
/// reference past the call. Every mutation goes through [`replace_range`],
/// which also maps the selection so positions keep pointing at the content
/// they pointed at before the edit.
///
/// [`replace_range`]: Transaction::replace_range
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    doc: Node,
    selection: Selection,
    steps: Vec<Step>,
}

impl Transaction {
    pub fn new(doc: Node, selection: Selection) -> Self {
        Self {
            doc,
            selection,
            steps: Vec::new(),
        }
    }

    pub fn doc(&self) -> &Node {
        &self.doc
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Whether any replacement has been applied.
    pub fn is_modified(&self) -> bool {
        !self.steps.is_empty()
    }

    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = selection;
    }

    /// Consume the transaction, yielding the final document and selection.
    pub fn into_parts(self) -> (Node, Selection) {
        (self.doc, self.selection)
    }

    /// Replace the content between `from` and `to` with `nodes`, recording
    /// the step and mapping the selection through the edit.
    pub fn replace_range(
        &mut self,
        from: usize,
        to: usize,
        nodes: Vec<Node>,
    ) -> Result<(), PositionError> {
        let inserted: usize = nodes.iter().map(Node::size).sum();
        self.doc = replace::replace_range(&self.doc, from, to, &nodes)?;
        self.selection = self.selection.map(from, to, inserted);
        self.steps.push(Step {
            from,
            to,
            inserted: nodes,
        });
        Ok(())
    }

    /// Insert a single node at `at`.
    pub fn insert(&mut self, at: usize, node: Node) -> Result<(), PositionError> {
        self.replace_range(at, at, vec![node])
    }

    /// Delete the content covered by the current selection. For a node
    /// selection this removes exactly the selected node.
    pub fn delete_selection(&mut self) -> Result<(), PositionError> {
        match self.selection {
            Selection::Range { anchor, head } => {
                let (from, to) = (anchor.min(head), anchor.max(head));
                self.replace_range(from, to, Vec::new())
            }
            Selection::Node { at } => {
                let size = {
                    let resolved = resolve(&self.doc, at)?;
                    resolved
                        .node_after()
                        .ok_or(PositionError::NoNodeAfter { pos: at })?
                        .size()
                };
                self.replace_range(at, at + size, Vec::new())
            }
        }
    }
}

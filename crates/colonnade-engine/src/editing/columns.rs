//! The two column transform entry points: wrapping the selected blocks in a
//! column layout and unwrapping an existing layout back to flat content.
//!
//! Both operations are all-or-nothing: they compute the full edit against a
//! draft transaction and only write it back to the caller's transaction once
//! every step has succeeded, so a failed transform leaves the document
//! observably unchanged.

use thiserror::Error;
use tracing::{debug, error, warn};

use crate::model::{Node, NodeType};
use crate::schema::{LayoutOptions, SchemaCapability};

use super::builder::{build_column, build_column_block, build_n_columns};
use super::locate::find_ancestor;
use super::position::{PositionError, resolve};
use super::replace::content_between;
use super::selection::{Selection, expand_selection};
use super::transaction::Transaction;

/// Failures of the column transforms. Every variant leaves the caller's
/// transaction untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColumnError {
    /// The expanded selection opens at different depths on each side, so a
    /// replacement would produce a malformed tree.
    #[error("depth mismatch: selection opens {open_start} levels at the start and {open_end} at the end")]
    DepthMismatch { open_start: usize, open_end: usize },

    /// The enclosing node cannot host a column block at the selection.
    #[error("content not allowed: {parent} cannot host a column block here")]
    ContentNotAllowed { parent: NodeType },

    /// A column layout needs at least two columns.
    #[error("column count must be at least 2, got {0}")]
    InvalidColumnCount(usize),

    /// Tree traversal failed mid-transform.
    #[error("column transform failed: {0}")]
    Internal(#[from] PositionError),
}

/// Turn the blocks covered by the current selection into a `count`-column
/// layout.
///
/// The selection is expanded to block boundaries first; the node enclosing
/// the expanded range must accept a column block per `schema`, and, unless
/// nested column layouts are enabled, must not itself be a column. With
/// `keep_content` the covered blocks move into the first column and the
/// remaining `count - 1` columns are empty; without it the covered blocks
/// are discarded in favor of `count` empty columns. On success the
/// transaction's selection ends as a node selection over the inserted
/// block.
pub fn apply_columns(
    tr: &mut Transaction,
    schema: &impl SchemaCapability,
    options: &LayoutOptions,
    count: usize,
    keep_content: bool,
) -> Result<(), ColumnError> {
    match build_column_edit(tr, schema, options, count, keep_content) {
        Ok(draft) => {
            *tr = draft;
            debug!(count, keep_content, "applied column layout");
            Ok(())
        }
        Err(err) => {
            log_rejection(&err);
            Err(err)
        }
    }
}

fn build_column_edit(
    tr: &Transaction,
    schema: &impl SchemaCapability,
    options: &LayoutOptions,
    count: usize,
    keep_content: bool,
) -> Result<Transaction, ColumnError> {
    if count < 2 {
        return Err(ColumnError::InvalidColumnCount(count));
    }

    let expanded = expand_selection(tr.doc(), tr.selection())?;
    if !expanded.is_balanced() {
        return Err(ColumnError::DepthMismatch {
            open_start: expanded.open_start,
            open_end: expanded.open_end,
        });
    }

    let parent = resolve(tr.doc(), expanded.from)?.parent();
    let nested_rejection = !options.nested_columns && parent.kind == options.column;
    if nested_rejection || !schema.allows_child(&parent.kind, &options.column_block) {
        return Err(ColumnError::ContentNotAllowed {
            parent: parent.kind.clone(),
        });
    }

    let columns = if keep_content {
        let content = content_between(tr.doc(), expanded.from, expanded.to);
        let mut columns = vec![build_column(options, content)];
        columns.extend(build_n_columns(options, count - 1));
        columns
    } else {
        build_n_columns(options, count)
    };
    let block = build_column_block(options, columns);

    let mut draft = tr.clone();
    draft.set_selection(Selection::range(expanded.from, expanded.to));
    draft.replace_range(expanded.from, expanded.to, vec![block])?;
    draft.set_selection(Selection::node(expanded.from));
    Ok(draft)
}

/// Unwrap the column block enclosing the current selection back to flat
/// block content.
///
/// Returns `Ok(false)` when the selection is not inside any column block;
/// that is a defined no-op, not an error. On success the block's non-empty
/// column contents are reinserted at the block's position in document order
/// and the block itself is deleted.
pub fn remove_columns(
    tr: &mut Transaction,
    options: &LayoutOptions,
) -> Result<bool, ColumnError> {
    match build_unwrap_edit(tr, options) {
        Ok(Some(draft)) => {
            *tr = draft;
            debug!("removed column layout");
            Ok(true)
        }
        Ok(None) => {
            debug!("no enclosing column block; nothing to unwrap");
            Ok(false)
        }
        Err(err) => {
            error!(%err, "column unwrap failed; document left unchanged");
            Err(err)
        }
    }
}

fn build_unwrap_edit(
    tr: &Transaction,
    options: &LayoutOptions,
) -> Result<Option<Transaction>, ColumnError> {
    let resolved = resolve(tr.doc(), tr.selection().from())?;
    let Some(found) = find_ancestor(&resolved, |node, _| options.is_column_block(node)) else {
        return Ok(None);
    };

    // contents of every column in document order, reversed so that repeated
    // inserts at the block's start restore the original order
    let mut content: Vec<Node> = found
        .node
        .children
        .iter()
        .filter(|child| options.is_column(child))
        .flat_map(|column| column.children.iter().cloned())
        .collect();
    content.reverse();
    content.retain(|node| !node.is_empty());

    let mut draft = tr.clone();
    draft.set_selection(Selection::node(found.pos));
    for node in content {
        draft.insert(found.pos, node)?;
    }
    draft.delete_selection()?;
    Ok(Some(draft))
}

fn log_rejection(err: &ColumnError) {
    match err {
        ColumnError::DepthMismatch {
            open_start,
            open_end,
        } => warn!(open_start, open_end, "column layout rejected: depth mismatch"),
        ColumnError::ContentNotAllowed { parent } => {
            warn!(parent = %parent, "column layout rejected: content not allowed");
        }
        ColumnError::InvalidColumnCount(count) => {
            warn!(count, "column layout rejected: invalid column count");
        }
        ColumnError::Internal(source) => {
            error!(%source, "column layout failed; document left unchanged");
        }
    }
}

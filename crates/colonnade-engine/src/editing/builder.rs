//! Construction of well-formed column subtrees. The preconditions here are
//! programming contracts, checked with assertions rather than reported as
//! runtime errors.

use crate::model::Node;
use crate::schema::LayoutOptions;

/// Build a single column wrapping `content`.
pub fn build_column(options: &LayoutOptions, content: Vec<Node>) -> Node {
    Node::new(options.column.clone()).with_children(content)
}

/// Build `n` empty columns. `n` must be at least 1.
pub fn build_n_columns(options: &LayoutOptions, n: usize) -> Vec<Node> {
    assert!(n >= 1, "a column run needs at least one column");
    (0..n).map(|_| build_column(options, Vec::new())).collect()
}

/// Wrap `columns` in a column block. Requires at least two children, all of
/// the configured column type.
pub fn build_column_block(options: &LayoutOptions, columns: Vec<Node>) -> Node {
    assert!(
        columns.len() >= 2,
        "a column block needs at least two columns, got {}",
        columns.len()
    );
    assert!(
        columns.iter().all(|column| options.is_column(column)),
        "a column block may only contain columns"
    );
    Node::new(options.column_block.clone()).with_children(columns)
}

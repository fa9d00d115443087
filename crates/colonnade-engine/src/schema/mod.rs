//! Externally supplied containment rules and column layout configuration.
//!
//! The engine never links against a concrete document schema. Hosts hand it
//! two things: a [`SchemaCapability`] answering containment-legality
//! questions, and [`LayoutOptions`] naming the column node types and the
//! nesting policy. Both are constant for the engine's lifetime.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::model::{Node, NodeType};

/// Answers, for a pair of node types, whether the parent may contain the
/// child. Supplied once per host configuration and treated as read-only.
pub trait SchemaCapability {
    fn allows_child(&self, parent: &NodeType, child: &NodeType) -> bool;
}

/// Column layout configuration supplied by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    /// Whether column blocks may appear inside columns.
    pub nested_columns: bool,
    /// Type tag of a single column.
    pub column: NodeType,
    /// Type tag of the block holding a run of columns.
    pub column_block: NodeType,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            nested_columns: false,
            column: NodeType::new("column"),
            column_block: NodeType::new("columnBlock"),
        }
    }
}

impl LayoutOptions {
    pub fn new(nested_columns: bool) -> Self {
        Self {
            nested_columns,
            ..Self::default()
        }
    }

    pub fn with_types(mut self, column: NodeType, column_block: NodeType) -> Self {
        self.column = column;
        self.column_block = column_block;
        self
    }

    pub fn is_column(&self, node: &Node) -> bool {
        node.kind == self.column
    }

    pub fn is_column_block(&self, node: &Node) -> bool {
        node.kind == self.column_block
    }
}

/// Rule-table [`SchemaCapability`] for hosts and tests: containment is
/// allowed exactly for the registered parent/child pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainmentRules {
    allowed: BTreeMap<NodeType, BTreeSet<NodeType>>,
}

impl ContainmentRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allow(mut self, parent: impl Into<NodeType>, child: impl Into<NodeType>) -> Self {
        self.allowed
            .entry(parent.into())
            .or_default()
            .insert(child.into());
        self
    }
}

impl SchemaCapability for ContainmentRules {
    fn allows_child(&self, parent: &NodeType, child: &NodeType) -> bool {
        self.allowed
            .get(parent)
            .is_some_and(|children| children.contains(child))
    }
}

pub mod editing;
pub mod model;
pub mod schema;

// Re-export key types for easier usage
pub use editing::{
    ColumnError, ExpandedSelection, FoundNode, PositionError, Selection, Step, Transaction,
    apply_columns, content_between, expand_selection, find_ancestor, remove_columns, resolve,
};
pub use model::{Attrs, Node, NodeType};
pub use schema::{ContainmentRules, LayoutOptions, SchemaCapability};

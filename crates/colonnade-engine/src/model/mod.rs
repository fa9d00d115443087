//! Document model: typed tree nodes and their position arithmetic.

pub mod node;

pub use node::{Attrs, Node, NodeType};

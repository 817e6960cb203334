//! Syntax trees and the per-language parser adapter.

/// Parser adapter (source text to syntax tree).
pub mod parser;
/// Closed node type and breadth-first traversal.
pub mod tree;

pub use parser::{parse, Language};
pub use tree::{BoolOperator, Node, NodeKind, SyntaxTree, Walk};

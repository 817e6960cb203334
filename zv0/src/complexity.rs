use crate::ast::{NodeKind, SyntaxTree};

/// Structural counts taken from a syntax tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructureCounts {
    /// Simplified cyclomatic complexity (1 + decision points).
    pub cyclomatic_complexity: usize,
    /// Function definitions at any depth.
    pub function_count: usize,
    /// Class definitions at any depth.
    pub class_count: usize,
}

/// Walks the tree once and counts decision points and definitions.
///
/// Every `if`/`elif`, `for`, `while` and `and`/`or` node adds one to the
/// complexity regardless of nesting. `else` arms, ternaries and
/// comprehensions add nothing.
#[must_use]
pub fn analyze_structure(tree: &SyntaxTree) -> StructureCounts {
    let mut counts = StructureCounts {
        cyclomatic_complexity: 1,
        function_count: 0,
        class_count: 0,
    };
    for node in tree.walk() {
        match &node.kind {
            kind if kind.is_branch() => counts.cyclomatic_complexity += 1,
            NodeKind::FunctionDef => counts.function_count += 1,
            NodeKind::ClassDef => counts.class_count += 1,
            _ => {}
        }
    }
    counts
}

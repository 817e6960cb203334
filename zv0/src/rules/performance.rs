use crate::analyzer::{Category, Issue, Severity};
use crate::ast::{Node, NodeKind};
use crate::rules::Rule;

/// Flags loops once the running loop depth exceeds `max_depth`.
///
/// The depth is one flat counter over the whole breadth-first pass: every
/// loop increments it and every function definition resets it to zero. It
/// does not follow lexical nesting, so sibling loops at the same level add
/// up the same way nested ones do.
pub struct NestedLoopRule {
    max_depth: usize,
    depth: usize,
}

impl NestedLoopRule {
    /// Creates the rule with the given depth limit.
    #[must_use]
    pub fn new(max_depth: usize) -> Self {
        Self {
            max_depth,
            depth: 0,
        }
    }
}

impl Rule for NestedLoopRule {
    fn name(&self) -> &'static str {
        "NestedLoopRule"
    }
    fn category(&self) -> Category {
        Category::Performance
    }
    fn visit_node(&mut self, node: &Node) -> Option<Issue> {
        match node.kind {
            NodeKind::For | NodeKind::While => {
                self.depth += 1;
                if self.depth > self.max_depth {
                    return Some(Issue::new(
                        Severity::Medium,
                        node.line,
                        format!("Deeply nested loops (depth {})", self.depth),
                        self.category(),
                    ));
                }
            }
            NodeKind::FunctionDef => self.depth = 0,
            _ => {}
        }
        None
    }
}

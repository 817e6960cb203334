use crate::analyzer::{Category, Issue, Severity};
use crate::ast::{Node, NodeKind};
use crate::rules::Rule;
use rustc_hash::FxHashSet;

/// Flags direct calls to denylisted functions (`eval(...)`).
///
/// Only bare-name callees match; `builtins.eval(...)` or `f = eval; f(...)`
/// are not reported.
pub struct DangerousCallRule<'a> {
    denylist: &'a FxHashSet<String>,
}

impl<'a> DangerousCallRule<'a> {
    /// Creates the rule over the given denylist.
    #[must_use]
    pub fn new(denylist: &'a FxHashSet<String>) -> Self {
        Self { denylist }
    }
}

impl Rule for DangerousCallRule<'_> {
    fn name(&self) -> &'static str {
        "DangerousCallRule"
    }
    fn category(&self) -> Category {
        Category::Security
    }
    fn visit_node(&mut self, node: &Node) -> Option<Issue> {
        let NodeKind::Call {
            callee: Some(name),
        } = &node.kind
        else {
            return None;
        };
        if !self.denylist.contains(name.as_str()) {
            return None;
        }
        Some(Issue::new(
            Severity::High,
            node.line,
            format!("Potentially dangerous function: {name}"),
            self.category(),
        ))
    }
}

use crate::analyzer::Issue;
use crate::ast::SyntaxTree;
use crate::rules::{get_rules, Rule, RuleSettings};

/// Runs detection rules over a syntax tree.
pub struct LinterVisitor<'a> {
    rules: Vec<Box<dyn Rule + 'a>>,
    /// Issues collected so far, grouped by rule in rule order.
    pub issues: Vec<Issue>,
}

impl<'a> LinterVisitor<'a> {
    /// Creates a `LinterVisitor` with the given rules.
    #[must_use]
    pub fn new(rules: Vec<Box<dyn Rule + 'a>>) -> Self {
        Self {
            rules,
            issues: Vec::new(),
        }
    }

    /// Gives every rule its own breadth-first pass over the tree.
    pub fn visit_tree(&mut self, tree: &SyntaxTree) {
        for rule in &mut self.rules {
            let before = self.issues.len();
            self.issues
                .extend(tree.walk().filter_map(|node| rule.visit_node(node)));
            tracing::trace!(
                rule = rule.name(),
                issues = self.issues.len() - before,
                "rule pass finished"
            );
        }
    }
}

/// Detects issues in `tree` with the rules enabled by `settings`.
#[must_use]
pub fn detect_issues(tree: &SyntaxTree, settings: &RuleSettings) -> Vec<Issue> {
    let mut linter = LinterVisitor::new(get_rules(settings));
    linter.visit_tree(tree);
    linter.issues
}

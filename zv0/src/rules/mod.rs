use crate::analyzer::{Category, Issue};
use crate::ast::Node;
use crate::config::AnalysisConfig;
use crate::constants::MAX_LOOP_DEPTH;
use rustc_hash::FxHashSet;

/// Trait defining a detection rule.
///
/// A rule sees every node of the tree once, in breadth-first order, and may
/// keep state across nodes. Rules are built fresh for every analysis.
pub trait Rule {
    /// Returns the descriptive name of the rule.
    fn name(&self) -> &'static str;
    /// Returns the category of the issues this rule emits.
    fn category(&self) -> Category;
    /// Called for each node of the tree.
    fn visit_node(&mut self, node: &Node) -> Option<Issue>;
}

/// Settings that decide which rules run and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSettings {
    /// Enables the dangerous-call rule.
    pub security_checks: bool,
    /// Enables the nested-loop rule.
    pub performance_checks: bool,
    /// Bare function names flagged by the dangerous-call rule.
    pub dangerous_functions: FxHashSet<String>,
    /// Loop depth above which the nested-loop rule fires.
    pub max_loop_depth: usize,
}

impl Default for RuleSettings {
    fn default() -> Self {
        Self::from(&AnalysisConfig::default())
    }
}

impl From<&AnalysisConfig> for RuleSettings {
    fn from(config: &AnalysisConfig) -> Self {
        Self {
            security_checks: config.security_checks,
            performance_checks: config.performance_checks,
            dangerous_functions: config.dangerous_functions.iter().cloned().collect(),
            max_loop_depth: MAX_LOOP_DEPTH,
        }
    }
}

/// Returns the enabled rules, security rules first.
pub fn get_rules(settings: &RuleSettings) -> Vec<Box<dyn Rule + '_>> {
    let mut rules: Vec<Box<dyn Rule + '_>> = Vec::new();
    if settings.security_checks {
        rules.push(Box::new(danger::DangerousCallRule::new(
            &settings.dangerous_functions,
        )));
    }
    if settings.performance_checks {
        rules.push(Box::new(performance::NestedLoopRule::new(
            settings.max_loop_depth,
        )));
    }
    rules
}

/// Module containing security rules.
pub mod danger;
/// Module containing performance rules.
pub mod performance;

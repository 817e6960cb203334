//! Analysis orchestrator.
//!
//! `CodeAnalyzer` runs the pipeline for one unit of source text:
//! parse, metrics and issue detection on the same tree, scoring, then
//! suggestions.

mod types;

pub use types::{AnalysisError, AnalysisReport, Category, ComplexityMetrics, Issue, Severity};

use crate::ast::{parse, Language};
use crate::config::AnalysisConfig;
use crate::linter::detect_issues;
use crate::metrics::calculate_metrics;
use crate::rules::RuleSettings;
use crate::scoring::calculate_scores;
use crate::suggestions::generate_suggestions;
use tracing::{debug, error, Span};

/// Core analysis engine.
///
/// Holds only immutable settings, so one instance can serve any number of
/// calls, including concurrent ones.
#[derive(Debug, Clone)]
pub struct CodeAnalyzer {
    settings: RuleSettings,
    span: Span,
}

impl Default for CodeAnalyzer {
    fn default() -> Self {
        Self::new(RuleSettings::default())
    }
}

impl CodeAnalyzer {
    /// Creates an analyzer with the given rule settings.
    #[must_use]
    pub fn new(settings: RuleSettings) -> Self {
        Self {
            settings,
            span: Span::none(),
        }
    }

    /// Creates an analyzer from the `[analysis]` configuration section.
    #[must_use]
    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::new(RuleSettings::from(config))
    }

    /// Attaches a diagnostics span; everything the analyzer logs is
    /// recorded inside it.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// The rule settings in use.
    #[must_use]
    pub fn settings(&self) -> &RuleSettings {
        &self.settings
    }

    /// Analyzes `code`, returning either a full report or the reason the
    /// analysis could not run.
    ///
    /// `label` identifies the source (usually its path) in diagnostics only.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Parse`] when `code` is not valid `language`.
    pub fn try_analyze_code(
        &self,
        code: &str,
        language: Language,
        label: &str,
    ) -> Result<AnalysisReport, AnalysisError> {
        let _entered = self.span.enter();
        debug!(label, %language, "analyzing");

        let tree = parse(code, language)?;
        let complexity_metrics = calculate_metrics(&tree, code, language);
        let issues = detect_issues(&tree, &self.settings);
        let scores = calculate_scores(&issues, &complexity_metrics);
        let suggestions = generate_suggestions(&issues);

        debug!(
            label,
            overall = scores.overall,
            issues = issues.len(),
            "analysis finished"
        );

        Ok(AnalysisReport {
            overall_score: scores.overall,
            security_score: scores.security,
            maintainability_score: scores.maintainability,
            performance_score: scores.performance,
            complexity_metrics,
            issues,
            suggestions,
        })
    }

    /// Analyzes `code`, never failing: any error becomes the degenerate
    /// report of [`AnalysisReport::from_error`].
    #[must_use]
    pub fn analyze_code(&self, code: &str, language: Language, label: &str) -> AnalysisReport {
        self.try_analyze_code(code, language, label)
            .unwrap_or_else(|err| {
                let _entered = self.span.enter();
                error!(label, "Analysis error: {err}");
                AnalysisReport::from_error(err)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_analyze_distinguishes_failure() {
        let analyzer = CodeAnalyzer::default();
        assert!(analyzer
            .try_analyze_code("def f(:\n", Language::Python, "bad.py")
            .is_err());
        let report = analyzer
            .try_analyze_code("eval('1')\n", Language::Python, "ok.py")
            .unwrap();
        assert_eq!(report.issues.len(), 1);
    }

    #[test]
    fn test_analyze_code_maps_errors_to_report() {
        let report = CodeAnalyzer::default().analyze_code("(", Language::Python, "bad.py");
        assert_eq!(report.overall_score, 0);
        assert_eq!(report.issues.len(), 1);
        assert!(report.issues[0].message.starts_with("Analysis error: "));
        assert_eq!(report.suggestions, vec!["Check your input code"]);
    }

    #[test]
    fn test_settings_from_config() {
        let config = AnalysisConfig {
            security_checks: false,
            ..AnalysisConfig::default()
        };
        let analyzer = CodeAnalyzer::from_config(&config);
        assert!(!analyzer.settings().security_checks);
        let report = analyzer.analyze_code("eval('1')\n", Language::Python, "x.py");
        assert!(report.issues.is_empty());
        assert_eq!(report.overall_score, 100);
    }
}

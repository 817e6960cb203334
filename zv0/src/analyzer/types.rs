//! Type definitions for analysis results.

use crate::constants::ERROR_SUGGESTION;
use serde::Serialize;
use std::fmt;

/// How urgent an issue is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Minor problem.
    Low,
    /// Should be looked at.
    Medium,
    /// Should be fixed.
    High,
}

impl Severity {
    /// Lowercase name, as serialized.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which sub-score an issue affects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Security-sensitive code.
    Security,
    /// Performance hazards.
    Performance,
    /// Anything else, including analysis failures.
    General,
}

impl Category {
    /// Lowercase name, as serialized.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Security => "security",
            Category::Performance => "performance",
            Category::General => "general",
        }
    }

    /// Capitalized name used in suggestions.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Category::Security => "Security",
            Category::Performance => "Performance",
            Category::General => "General",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single flagged location in the analyzed source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    /// How urgent the issue is.
    pub severity: Severity,
    /// 1-indexed line, 0 when the issue concerns the whole file.
    pub line_number: usize,
    /// Human-readable description.
    pub message: String,
    /// Which sub-score the issue affects.
    pub category: Category,
}

impl Issue {
    /// Creates an issue.
    pub fn new(
        severity: Severity,
        line_number: usize,
        message: impl Into<String>,
        category: Category,
    ) -> Self {
        Self {
            severity,
            line_number,
            message: message.into(),
            category,
        }
    }
}

/// Size and shape metrics of one unit of source.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ComplexityMetrics {
    /// Simplified cyclomatic complexity.
    pub cyclomatic_complexity: usize,
    /// Non-blank lines.
    pub lines_of_code: usize,
    /// Full-line comments divided by `lines_of_code`.
    pub comment_ratio: f64,
    /// Function definitions at any depth.
    pub function_count: usize,
    /// Class definitions at any depth.
    pub class_count: usize,
}

/// Result of analyzing one unit of source text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    /// Overall quality score (0-100).
    pub overall_score: u8,
    /// Security score (0-100).
    pub security_score: u8,
    /// Maintainability score (0-100).
    pub maintainability_score: u8,
    /// Performance score (0-100).
    pub performance_score: u8,
    /// Metrics computed from the source.
    pub complexity_metrics: ComplexityMetrics,
    /// Issues in detection order.
    pub issues: Vec<Issue>,
    /// One suggestion per issue, same order.
    pub suggestions: Vec<String>,
}

impl AnalysisReport {
    /// Builds the degenerate report returned when analysis fails.
    ///
    /// All scores and metrics are zero, and the single issue carries the cause.
    pub fn from_error(cause: impl fmt::Display) -> Self {
        Self {
            overall_score: 0,
            security_score: 0,
            maintainability_score: 0,
            performance_score: 0,
            complexity_metrics: ComplexityMetrics::default(),
            issues: vec![Issue::new(
                Severity::High,
                0,
                format!("Analysis error: {cause}"),
                Category::General,
            )],
            suggestions: vec![ERROR_SUGGESTION.to_owned()],
        }
    }
}

/// Why an analysis could not produce a regular report.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    /// The source text is not valid for the declared language.
    #[error("{message} (line {line})")]
    Parse {
        /// 1-indexed line of the error location.
        line: usize,
        /// Parser message.
        message: String,
    },
    /// No parser exists for the requested language tag.
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),
}

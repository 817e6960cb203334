//! Converts issues and metrics into 0-100 quality scores.

use crate::analyzer::{Category, ComplexityMetrics, Issue, Severity};
use crate::constants::COMPLEXITY_THRESHOLD;
use serde::Serialize;

const MAX_SCORE: i64 = 100;
const COMPLEXITY_MAINTAINABILITY_PENALTY: i64 = 10;
const COMPLEXITY_OVERALL_PENALTY: i64 = 5;

/// The four quality scores of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Scores {
    /// Overall quality.
    pub overall: u8,
    /// Security.
    pub security: u8,
    /// Maintainability.
    pub maintainability: u8,
    /// Performance.
    pub performance: u8,
}

/// Points deducted for one issue of the given severity.
#[must_use]
pub fn severity_deduction(severity: Severity) -> i64 {
    match severity {
        Severity::High => 5,
        Severity::Medium => 3,
        Severity::Low => 1,
    }
}

/// Computes the scores for a set of issues and metrics.
///
/// Every score starts at 100. Each issue costs `overall` its severity
/// deduction, and costs the security or performance score the same amount
/// when it belongs to that category. A complexity above the threshold costs
/// maintainability 10 and overall 5, once. Scores never go below 0.
#[must_use]
pub fn calculate_scores(issues: &[Issue], metrics: &ComplexityMetrics) -> Scores {
    let mut overall = MAX_SCORE;
    let mut security = MAX_SCORE;
    let mut maintainability = MAX_SCORE;
    let mut performance = MAX_SCORE;

    for issue in issues {
        let deduction = severity_deduction(issue.severity);
        match issue.category {
            Category::Security => security -= deduction,
            Category::Performance => performance -= deduction,
            Category::General => {}
        }
        overall -= deduction;
    }

    if metrics.cyclomatic_complexity > COMPLEXITY_THRESHOLD {
        maintainability -= COMPLEXITY_MAINTAINABILITY_PENALTY;
        overall -= COMPLEXITY_OVERALL_PENALTY;
    }

    Scores {
        overall: clamp(overall),
        security: clamp(security),
        maintainability: clamp(maintainability),
        performance: clamp(performance),
    }
}

fn clamp(score: i64) -> u8 {
    u8::try_from(score.clamp(0, MAX_SCORE)).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(complexity: usize) -> ComplexityMetrics {
        ComplexityMetrics {
            cyclomatic_complexity: complexity,
            lines_of_code: 10,
            ..ComplexityMetrics::default()
        }
    }

    fn issue(severity: Severity, category: Category) -> Issue {
        Issue::new(severity, 1, "msg", category)
    }

    #[test]
    fn test_no_issues_is_perfect() {
        let scores = calculate_scores(&[], &metrics(1));
        assert_eq!(
            scores,
            Scores {
                overall: 100,
                security: 100,
                maintainability: 100,
                performance: 100
            }
        );
    }

    #[test]
    fn test_deductions_by_severity_and_category() {
        let issues = vec![
            issue(Severity::High, Category::Security),
            issue(Severity::Medium, Category::Performance),
            issue(Severity::Low, Category::General),
        ];
        let scores = calculate_scores(&issues, &metrics(1));
        assert_eq!(scores.security, 95);
        assert_eq!(scores.performance, 97);
        assert_eq!(scores.maintainability, 100);
        assert_eq!(scores.overall, 91);
    }

    #[test]
    fn test_complexity_penalty_is_flat() {
        let at_threshold = calculate_scores(&[], &metrics(10));
        assert_eq!(at_threshold.maintainability, 100);
        assert_eq!(at_threshold.overall, 100);

        for complexity in [11, 50, 10_000] {
            let scores = calculate_scores(&[], &metrics(complexity));
            assert_eq!(scores.maintainability, 90);
            assert_eq!(scores.overall, 95);
            assert_eq!(scores.security, 100);
            assert_eq!(scores.performance, 100);
        }
    }

    #[test]
    fn test_scores_clamp_at_zero() {
        let issues = vec![issue(Severity::High, Category::Security); 40];
        let scores = calculate_scores(&issues, &metrics(25));
        assert_eq!(scores.overall, 0);
        assert_eq!(scores.security, 0);
        assert_eq!(scores.maintainability, 90);
        assert_eq!(scores.performance, 100);
    }

    #[test]
    fn test_permutation_does_not_change_scores() {
        let mut issues = vec![
            issue(Severity::High, Category::Security),
            issue(Severity::Low, Category::Performance),
            issue(Severity::Medium, Category::General),
            issue(Severity::Medium, Category::Performance),
            issue(Severity::High, Category::General),
        ];
        let expected = calculate_scores(&issues, &metrics(12));
        issues.reverse();
        assert_eq!(calculate_scores(&issues, &metrics(12)), expected);
        issues.rotate_left(2);
        assert_eq!(calculate_scores(&issues, &metrics(12)), expected);
        issues.swap(0, 3);
        assert_eq!(calculate_scores(&issues, &metrics(12)), expected);
    }

    #[test]
    fn test_adding_issues_never_raises_scores() {
        let pool = [
            issue(Severity::Low, Category::General),
            issue(Severity::High, Category::Security),
            issue(Severity::Medium, Category::Performance),
        ];
        let mut issues = Vec::new();
        let mut previous = calculate_scores(&issues, &metrics(3));
        for round in 0..60 {
            issues.push(pool[round % pool.len()].clone());
            let current = calculate_scores(&issues, &metrics(3));
            assert!(current.overall <= previous.overall);
            assert!(current.security <= previous.security);
            assert!(current.maintainability <= previous.maintainability);
            assert!(current.performance <= previous.performance);
            assert!(current.overall <= 100);
            previous = current;
        }
        assert_eq!(previous.overall, 0);
    }
}

use crate::analyzer::Issue;

/// Turns each issue into `"<Category>: <message>"`, preserving order.
#[must_use]
pub fn generate_suggestions(issues: &[Issue]) -> Vec<String> {
    issues
        .iter()
        .map(|issue| format!("{}: {}", issue.category.title(), issue.message))
        .collect()
}

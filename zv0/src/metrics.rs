use crate::analyzer::ComplexityMetrics;
use crate::ast::{Language, SyntaxTree};
use crate::complexity::analyze_structure;
use crate::raw_metrics::analyze_raw;

/// Computes the size and shape metrics of one unit of source.
///
/// Line counts come from the text, everything else from a single walk of
/// the tree.
#[must_use]
pub fn calculate_metrics(tree: &SyntaxTree, code: &str, language: Language) -> ComplexityMetrics {
    let raw = analyze_raw(code, language.comment_marker());
    let structure = analyze_structure(tree);
    ComplexityMetrics {
        cyclomatic_complexity: structure.cyclomatic_complexity,
        lines_of_code: raw.loc,
        comment_ratio: raw.comment_ratio(),
        function_count: structure.function_count,
        class_count: structure.class_count,
    }
}

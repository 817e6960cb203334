use crate::analyzer::{AnalysisReport, Severity};
use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use std::io::Write;
use std::path::Path;

/// Print the main header with box-drawing characters.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_header(writer: &mut impl Write) -> std::io::Result<()> {
    writeln!(writer)?;
    writeln!(
        writer,
        "{}",
        "╔════════════════════════════════════════╗".cyan()
    )?;
    writeln!(
        writer,
        "{}",
        "║  ZV.0 Code Analysis Report             ║".cyan().bold()
    )?;
    writeln!(
        writer,
        "{}",
        "╚════════════════════════════════════════╝".cyan()
    )?;
    writeln!(writer)?;
    Ok(())
}

fn colored_score(score: u8) -> String {
    let text = score.to_string();
    match score {
        90..=100 => text.green().bold().to_string(),
        70..=89 => text.yellow().bold().to_string(),
        _ => text.red().bold().to_string(),
    }
}

/// Helper to map severity to a table color.
fn get_severity_color(severity: Severity) -> Color {
    match severity {
        Severity::High => Color::Red,
        Severity::Medium => Color::Yellow,
        Severity::Low => Color::Blue,
    }
}

fn create_table(headers: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers);
    table
}

/// Print the report of one file: scores, metrics, issues and suggestions.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_report(
    writer: &mut impl Write,
    path: &Path,
    report: &AnalysisReport,
) -> std::io::Result<()> {
    writeln!(writer, "{}", path.display().to_string().bold().underline())?;
    writeln!(
        writer,
        "Overall: {}  Security: {}  Maintainability: {}  Performance: {}",
        colored_score(report.overall_score),
        colored_score(report.security_score),
        colored_score(report.maintainability_score),
        colored_score(report.performance_score),
    )?;

    let m = &report.complexity_metrics;
    writeln!(
        writer,
        "{}",
        format!(
            "Complexity: {}  Lines: {}  Comments: {:.0}%  Functions: {}  Classes: {}",
            m.cyclomatic_complexity,
            m.lines_of_code,
            m.comment_ratio * 100.0,
            m.function_count,
            m.class_count
        )
        .dimmed()
    )?;

    if report.issues.is_empty() {
        writeln!(writer, "{}", "[OK] No issues found".green())?;
        writeln!(writer)?;
        return Ok(());
    }

    let mut table = create_table(vec!["Line", "Category", "Message", "Severity"]);
    for issue in &report.issues {
        table.add_row(vec![
            Cell::new(issue.line_number).add_attribute(Attribute::Dim),
            Cell::new(issue.category.title()),
            Cell::new(&issue.message).add_attribute(Attribute::Bold),
            Cell::new(issue.severity.as_str().to_uppercase())
                .fg(get_severity_color(issue.severity)),
        ]);
    }
    writeln!(writer, "{table}")?;

    writeln!(writer, "{}", "Suggestions:".bold())?;
    for suggestion in &report.suggestions {
        writeln!(writer, "  - {suggestion}")?;
    }
    writeln!(writer)?;
    Ok(())
}

/// Print a file that could not be analyzed.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_failure(writer: &mut impl Write, path: &Path, error: &str) -> std::io::Result<()> {
    writeln!(writer, "{}", path.display().to_string().bold().underline())?;
    writeln!(writer, "{} {}", "[ERROR]".red().bold(), error)?;
    writeln!(writer)?;
    Ok(())
}

/// Print the closing summary line.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_summary(
    writer: &mut impl Write,
    analyzed: usize,
    failed: usize,
    total_issues: usize,
) -> std::io::Result<()> {
    let failed_text = if failed == 0 {
        failed.to_string().green()
    } else {
        failed.to_string().red().bold()
    };
    writeln!(
        writer,
        "Files: {}  Failed: {}  Issues: {}",
        analyzed.to_string().bold(),
        failed_text,
        total_issues.to_string().bold()
    )
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
/// Line counts gathered from source text.
pub struct RawMetrics {
    /// Total number of physical lines.
    pub lines: usize,
    /// Lines with non-whitespace content.
    pub loc: usize,
    /// Lines whose content starts with the comment marker.
    pub comments: usize,
    /// Blank lines.
    pub blank: usize,
}

impl RawMetrics {
    /// Share of non-blank lines that are full-line comments, 0 for empty text.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn comment_ratio(&self) -> f64 {
        if self.loc == 0 {
            0.0
        } else {
            self.comments as f64 / self.loc as f64
        }
    }
}

/// Counts lines of `code`.
///
/// A line is a comment line when its trimmed content starts with
/// `comment_marker`; inline trailing comments do not count.
#[must_use]
pub fn analyze_raw(code: &str, comment_marker: &str) -> RawMetrics {
    let mut metrics = RawMetrics::default();
    for line in code.lines() {
        metrics.lines += 1;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            metrics.blank += 1;
            continue;
        }
        metrics.loc += 1;
        if trimmed.starts_with(comment_marker) {
            metrics.comments += 1;
        }
    }
    metrics
}

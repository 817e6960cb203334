//! File-level facade over the analyzer.
//!
//! The agent owns a configuration and a [`CodeAnalyzer`], reads files, and
//! wraps results in the `{success, data | error}` envelope handed to callers.

use crate::analyzer::{AnalysisError, AnalysisReport, CodeAnalyzer};
use crate::ast::Language;
use crate::config::Config;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, info_span, warn};

/// Errors raised before analysis starts.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// The source file could not be read.
    #[error("{}: {source}", .path.display())]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The language tag is not supported.
    #[error(transparent)]
    Language(#[from] AnalysisError),
}

/// Short form of a report, as carried by a successful envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSummary {
    /// Overall quality score.
    pub overall_score: u8,
    /// Number of issues found.
    pub issues: usize,
    /// Improvement suggestions.
    pub suggestions: Vec<String>,
}

impl From<&AnalysisReport> for ReportSummary {
    fn from(report: &AnalysisReport) -> Self {
        Self {
            overall_score: report.overall_score,
            issues: report.issues.len(),
            suggestions: report.suggestions.clone(),
        }
    }
}

/// Result envelope: `{"success": true, "data": ...}` or
/// `{"success": false, "error": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisEnvelope {
    /// Whether the file could be analyzed.
    pub success: bool,
    /// Summary of the report on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ReportSummary>,
    /// Failure message otherwise.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AnalysisEnvelope {
    /// Wraps a report.
    #[must_use]
    pub fn ok(report: &AnalysisReport) -> Self {
        Self {
            success: true,
            data: Some(ReportSummary::from(report)),
            error: None,
        }
    }

    /// Wraps a failure message.
    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Main agent: configuration plus analyzer.
#[derive(Debug, Clone)]
pub struct Agent {
    config: Config,
    analyzer: CodeAnalyzer,
}

impl Agent {
    /// Creates an agent, loading configuration from `config_path` if given.
    ///
    /// A configuration file that cannot be loaded is reported as a warning and
    /// the defaults are used instead.
    #[must_use]
    pub fn new(config_path: Option<&Path>) -> Self {
        let config = match config_path {
            None => Config::default(),
            Some(path) => Config::load_from_file(path).unwrap_or_else(|e| {
                warn!("Error loading config: {e}");
                Config::default()
            }),
        };
        Self::from_config(config)
    }

    /// Creates an agent from an already loaded configuration.
    #[must_use]
    pub fn from_config(config: Config) -> Self {
        let span = info_span!("agent", name = %config.agent.name);
        let analyzer = CodeAnalyzer::from_config(&config.analysis).with_span(span);
        info!(
            version = %config.agent.version,
            "{} initialized",
            config.agent.name
        );
        Self { config, analyzer }
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The analyzer in use.
    #[must_use]
    pub fn analyzer(&self) -> &CodeAnalyzer {
        &self.analyzer
    }

    /// Reads and analyzes one file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the language tag is
    /// unknown. Invalid source is not an error: it yields the error report.
    pub fn analyze_path(&self, path: &Path, language: &str) -> Result<AnalysisReport, AgentError> {
        let language: Language = language.parse()?;
        let code = fs::read_to_string(path).map_err(|source| AgentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(self
            .analyzer
            .analyze_code(&code, language, &path.to_string_lossy()))
    }

    /// Analyzes one file and wraps the outcome in an [`AnalysisEnvelope`].
    #[must_use]
    pub fn analyze_file(&self, path: &Path, language: &str) -> AnalysisEnvelope {
        match self.analyze_path(path, language) {
            Ok(report) => AnalysisEnvelope::ok(&report),
            Err(e) => AnalysisEnvelope::err(e.to_string()),
        }
    }
}

impl Default for Agent {
    fn default() -> Self {
        Self::from_config(Config::default())
    }
}

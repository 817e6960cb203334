//! Core library for the `zv0` code analyzer.
//!
//! Parses source text, derives complexity metrics, flags dangerous calls and
//! deeply nested loops, and turns the findings into scores and suggestions.

#![allow(clippy::similar_names, clippy::items_after_statements)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

/// Module containing the analysis orchestrator and its result types.
/// This includes `CodeAnalyzer`, `AnalysisReport` and `Issue`.
pub mod analyzer;

/// Module containing the file-level agent and its result envelope.
pub mod agent;

/// Module containing the parser adapter and the language-neutral syntax tree.
pub mod ast;

/// Module for loading configuration.
pub mod config;

/// Module containing the analysis rules.
/// This includes the dangerous-call and nested-loop checks.
pub mod rules;

/// Module containing utility functions.
/// This includes line lookup and file discovery.
pub mod utils;

/// Module defining the entry point logic shared by the binary and tests.
pub mod entry_point;

/// Module containing shared constants.
pub mod constants;
/// Module containing the linter that runs rules over a tree.
pub mod linter;

/// Module for colored CLI output and issue tables.
pub mod output;

/// Module defining the command-line interface arguments and structs.
pub mod cli;

/// Module for calculating cyclomatic complexity and structural counts.
pub mod complexity;
/// Module combining raw and structural counts into `ComplexityMetrics`.
pub mod metrics;
/// Module for calculating raw line metrics.
pub mod raw_metrics;
/// Module for turning issues and metrics into scores.
pub mod scoring;
/// Module for turning issues into suggestions.
pub mod suggestions;

use crate::agent::{Agent, AgentError, AnalysisEnvelope};
use crate::analyzer::AnalysisReport;
use crate::cli::Cli;
use crate::config::Config;
use crate::output;
use crate::utils::collect_python_files;
use anyhow::Result;
use clap::Parser;
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// One line of JSON output.
#[derive(Serialize)]
struct FileResult {
    file: String,
    #[serde(flatten)]
    envelope: AnalysisEnvelope,
}

/// Installs the stderr log subscriber. `RUST_LOG` wins over the default level.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // A subscriber may already be installed when running in-process.
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .try_init();
}

fn build_agent(cli: &Cli, first_path: &Path) -> Agent {
    let mut config = match cli.config.as_deref() {
        Some(path) => Config::load_from_file(path).unwrap_or_else(|e| {
            tracing::warn!("Error loading config: {e}");
            Config::default()
        }),
        None => Config::load_from_path(first_path),
    };
    if cli.checks.no_security {
        config.analysis.security_checks = false;
    }
    if cli.checks.no_performance {
        config.analysis.performance_checks = false;
    }
    Agent::from_config(config)
}

/// Runs the analyzer with the given arguments.
///
/// # Errors
///
/// Returns an error if writing the output fails.
pub fn run_with_args(args: Vec<String>) -> Result<i32> {
    run_with_args_to(args, &mut std::io::stdout())
}

/// Runs the analyzer with the given arguments, writing output to `writer`.
///
/// This is the testable version of `run_with_args` that allows output capture.
///
/// # Errors
///
/// Returns an error if writing the output fails.
pub fn run_with_args_to<W: std::io::Write>(args: Vec<String>, writer: &mut W) -> Result<i32> {
    let mut program_args = vec!["zv0".to_owned()];
    program_args.extend(args);
    let cli = match Cli::try_parse_from(program_args) {
        Ok(c) => c,
        Err(e) => match e.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                write!(writer, "{e}")?;
                writer.flush()?;
                return Ok(0);
            }
            _ => {
                eprint!("{e}");
                return Ok(1);
            }
        },
    };

    init_logging(cli.output.verbose);

    let paths = if cli.paths.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        cli.paths.clone()
    };
    if let Some(missing) = paths.iter().find(|p| !p.exists()) {
        eprintln!(
            "Error: The file or directory '{}' does not exist.",
            missing.display()
        );
        return Ok(1);
    }

    let agent = build_agent(&cli, &paths[0]);
    tracing::debug!(threads = rayon::current_num_threads(), exclude = ?cli.exclude, "starting");

    let files: Vec<PathBuf> = paths
        .iter()
        .flat_map(|p| collect_python_files(p, &cli.exclude))
        .collect();

    let results: Vec<(PathBuf, Result<AnalysisReport, AgentError>)> = files
        .into_par_iter()
        .map(|file| {
            let result = agent.analyze_path(&file, &cli.language);
            (file, result)
        })
        .collect();

    let failed = results.iter().filter(|(_, r)| r.is_err()).count();
    let below_threshold = cli.output.fail_under.is_some_and(|threshold| {
        results
            .iter()
            .filter_map(|(_, r)| r.as_ref().ok())
            .any(|report| report.overall_score < threshold)
    });

    if cli.output.json {
        let lines: Vec<FileResult> = results
            .iter()
            .map(|(file, result)| FileResult {
                file: file.display().to_string(),
                envelope: match result {
                    Ok(report) => AnalysisEnvelope::ok(report),
                    Err(e) => AnalysisEnvelope::err(e.to_string()),
                },
            })
            .collect();
        writeln!(writer, "{}", serde_json::to_string_pretty(&lines)?)?;
    } else {
        output::print_header(writer)?;
        let mut total_issues = 0;
        for (file, result) in &results {
            match result {
                Ok(report) => {
                    total_issues += report.issues.len();
                    output::print_report(writer, file, report)?;
                }
                Err(e) => output::print_failure(writer, file, &e.to_string())?,
            }
        }
        output::print_summary(writer, results.len(), failed, total_issues)?;
    }
    writer.flush()?;

    if failed > 0 || below_threshold {
        Ok(1)
    } else {
        Ok(0)
    }
}

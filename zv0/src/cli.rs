use clap::{Args, Parser};
use std::path::PathBuf;

/// Help text for configuration file options, shown at the bottom of --help.
const CONFIG_HELP: &str = "\
CONFIGURATION FILE (.zv0.toml, or [tool.zv0] in pyproject.toml):
  Found by walking up from the first analyzed path, unless --config is given.
  --config also accepts the YAML form of the same keys.

  [agent]
  name = \"ZV.0\"
  version = \"1.0.0\"

  [analysis]
  security_checks = true      # Flag calls to dangerous functions
  performance_checks = true   # Flag deeply nested loops
  dangerous_functions = [\"eval\", \"exec\", \"open\"]
";

/// Options that switch individual checks off.
#[derive(Args, Debug, Default, Clone)]
pub struct CheckOptions {
    /// Disable the dangerous-call check.
    #[arg(long)]
    pub no_security: bool,

    /// Disable the nested-loop check.
    #[arg(long)]
    pub no_performance: bool,
}

/// Options for output formatting and verbosity.
#[derive(Args, Debug, Default, Clone)]
pub struct OutputOptions {
    /// Output JSON envelopes instead of text.
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging on stderr.
    #[arg(short, long)]
    pub verbose: bool,

    /// Exit with code 1 if any file scores below this overall score.
    #[arg(long, value_name = "SCORE", value_parser = clap::value_parser!(u8).range(0..=100))]
    pub fail_under: Option<u8>,
}

/// Command-line arguments for the analyzer.
#[derive(Parser, Debug)]
#[command(
    name = "zv0",
    version,
    about = "Scores Python source for security, maintainability and performance",
    after_help = CONFIG_HELP
)]
pub struct Cli {
    /// Files or directories to analyze. Defaults to the current directory.
    pub paths: Vec<PathBuf>,

    /// Configuration file (TOML or YAML).
    #[arg(long, short = 'c', value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Language of the analyzed files.
    #[arg(long, short = 'l', default_value = "python")]
    pub language: String,

    /// Exclude folders by name (in addition to the defaults).
    #[arg(long, short = 'e', value_name = "DIR")]
    pub exclude: Vec<String>,

    /// Check toggles.
    #[command(flatten)]
    pub checks: CheckOptions,

    /// Output options.
    #[command(flatten)]
    pub output: OutputOptions,
}

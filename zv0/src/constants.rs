use rustc_hash::FxHashSet;
use std::sync::OnceLock;

/// Project-local configuration file name.
pub const CONFIG_FILENAME: &str = ".zv0.toml";

/// Python project file that may carry a `[tool.zv0]` table.
pub const PYPROJECT_FILENAME: &str = "pyproject.toml";

/// Default agent name reported in logs.
pub const DEFAULT_AGENT_NAME: &str = "ZV.0";

/// Default agent version.
pub const DEFAULT_AGENT_VERSION: &str = "1.0.0";

/// Functions flagged by the dangerous-call rule unless configured otherwise.
pub const DEFAULT_DANGEROUS_FUNCTIONS: [&str; 3] = ["eval", "exec", "open"];

/// Loop depth above which the nested-loop rule fires.
pub const MAX_LOOP_DEPTH: usize = 2;

/// Cyclomatic complexity above which the maintainability penalty applies.
pub const COMPLEXITY_THRESHOLD: usize = 10;

/// Suggestion attached to the report of a failed analysis.
pub const ERROR_SUGGESTION: &str = "Check your input code";

/// Set of folders to exclude by default.
pub fn get_default_exclude_folders() -> &'static FxHashSet<&'static str> {
    static SET: OnceLock<FxHashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| {
        let mut s = FxHashSet::default();
        s.insert("__pycache__");
        s.insert(".git");
        s.insert(".pytest_cache");
        s.insert(".mypy_cache");
        s.insert(".tox");
        s.insert("build");
        s.insert("dist");
        s.insert("*.egg-info");
        s.insert("venv");
        s.insert(".venv");
        s
    })
}

pub use get_default_exclude_folders as DEFAULT_EXCLUDE_FOLDERS;

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{
    CONFIG_FILENAME, DEFAULT_AGENT_NAME, DEFAULT_AGENT_VERSION, DEFAULT_DANGEROUS_FUNCTIONS,
    PYPROJECT_FILENAME,
};

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
/// Top-level configuration struct.
///
/// Unknown keys are ignored; missing keys take their defaults.
pub struct Config {
    #[serde(default)]
    /// Identity of the agent.
    pub agent: AgentConfig,
    #[serde(default)]
    /// Which checks run.
    pub analysis: AnalysisConfig,
    /// The path to the configuration file this was loaded from.
    /// `None` if using defaults or programmatic config.
    #[serde(skip)]
    pub config_file_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
/// Agent identity, reported in logs.
pub struct AgentConfig {
    /// Display name.
    #[serde(default = "default_agent_name")]
    pub name: String,
    /// Version string.
    #[serde(default = "default_agent_version")]
    pub version: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
/// Options consumed by the issue detector.
pub struct AnalysisConfig {
    /// Whether to flag calls to dangerous functions.
    #[serde(default = "default_enabled")]
    pub security_checks: bool,
    /// Whether to flag deeply nested loops.
    #[serde(default = "default_enabled")]
    pub performance_checks: bool,
    /// Bare function names considered dangerous.
    #[serde(default = "default_dangerous_functions")]
    pub dangerous_functions: Vec<String>,
}

fn default_agent_name() -> String {
    DEFAULT_AGENT_NAME.to_owned()
}

fn default_agent_version() -> String {
    DEFAULT_AGENT_VERSION.to_owned()
}

fn default_enabled() -> bool {
    true
}

fn default_dangerous_functions() -> Vec<String> {
    DEFAULT_DANGEROUS_FUNCTIONS
        .iter()
        .map(|&name| name.to_owned())
        .collect()
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            version: default_agent_version(),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            security_checks: default_enabled(),
            performance_checks: default_enabled(),
            dangerous_functions: default_dangerous_functions(),
        }
    }
}

/// Errors raised while loading an explicit configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The file is not valid TOML for this schema.
    #[error("invalid TOML in {}: {source}", .path.display())]
    Toml {
        /// File that failed.
        path: PathBuf,
        /// Underlying parse error.
        source: toml::de::Error,
    },
    /// The file is not valid YAML for this schema.
    #[error("invalid YAML in {}: {source}", .path.display())]
    Yaml {
        /// File that failed.
        path: PathBuf,
        /// Underlying parse error.
        source: serde_yaml::Error,
    },
}

#[derive(Debug, Deserialize, Clone)]
struct PyProject {
    tool: ToolConfig,
}

#[derive(Debug, Deserialize, Clone)]
struct ToolConfig {
    zv0: Config,
}

impl Config {
    /// Loads an explicit configuration file.
    ///
    /// `.yaml`/`.yml` files are read as YAML, everything else as TOML. An
    /// empty file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not match the schema.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

        let mut config = if content.trim().is_empty() {
            Config::default()
        } else if is_yaml {
            serde_yaml::from_str::<Config>(&content).map_err(|source| ConfigError::Yaml {
                path: path.to_path_buf(),
                source,
            })?
        } else {
            toml::from_str::<Config>(&content).map_err(|source| ConfigError::Toml {
                path: path.to_path_buf(),
                source,
            })?
        };
        config.config_file_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Loads configuration starting from a specific path and traversing up.
    ///
    /// Unreadable or invalid files are skipped; defaults are returned when
    /// nothing usable is found.
    #[must_use]
    pub fn load_from_path(path: &Path) -> Self {
        let mut current = path.to_path_buf();
        if current.is_file() {
            current.pop();
        }

        loop {
            let zv0_toml = current.join(CONFIG_FILENAME);
            if zv0_toml.exists() {
                match Self::load_from_file(&zv0_toml) {
                    Ok(config) => return config,
                    Err(e) => tracing::debug!("Skipping config: {e}"),
                }
            }

            let pyproject_toml = current.join(PYPROJECT_FILENAME);
            if pyproject_toml.exists() {
                if let Ok(content) = fs::read_to_string(&pyproject_toml) {
                    if let Ok(pyproject) = toml::from_str::<PyProject>(&content) {
                        let mut config = pyproject.tool.zv0;
                        config.config_file_path = Some(pyproject_toml);
                        return config;
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        Config::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.agent.name, "ZV.0");
        assert_eq!(config.agent.version, "1.0.0");
        assert!(config.analysis.security_checks);
        assert!(config.analysis.performance_checks);
        assert_eq!(config.analysis.dangerous_functions, vec!["eval", "exec", "open"]);
    }

    #[test]
    fn test_partial_toml_keeps_defaults_and_ignores_unknown_keys() {
        let content = r"
[analysis]
performance_checks = false
unknown_option = 3

[reporting]
colour = true
";
        let config = toml::from_str::<Config>(content).unwrap();
        assert!(config.analysis.security_checks);
        assert!(!config.analysis.performance_checks);
        assert_eq!(config.analysis.dangerous_functions.len(), 3);
        assert_eq!(config.agent, AgentConfig::default());
    }

    #[test]
    fn test_load_from_file_yaml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("agent.yaml");
        std::fs::write(
            &path,
            "agent:\n  name: Reviewer\nanalysis:\n  security_checks: false\n  dangerous_functions: [compile]\n",
        )
        .unwrap();

        let config = Config::load_from_file(&path).unwrap();
        assert_eq!(config.agent.name, "Reviewer");
        assert_eq!(config.agent.version, "1.0.0");
        assert!(!config.analysis.security_checks);
        assert!(config.analysis.performance_checks);
        assert_eq!(config.analysis.dangerous_functions, vec!["compile"]);
        assert_eq!(config.config_file_path.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn test_load_from_file_empty_is_default() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.yml");
        std::fs::write(&path, "\n").unwrap();
        let config = Config::load_from_file(&path).unwrap();
        assert_eq!(config.analysis, AnalysisConfig::default());
    }

    #[test]
    fn test_load_from_file_errors() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            Config::load_from_file(&dir.path().join("missing.toml")),
            Err(ConfigError::Io { .. })
        ));

        let bad_toml = dir.path().join("bad.toml");
        std::fs::write(&bad_toml, "[analysis\nsecurity_checks = ").unwrap();
        assert!(matches!(
            Config::load_from_file(&bad_toml),
            Err(ConfigError::Toml { .. })
        ));

        let bad_yaml = dir.path().join("bad.yaml");
        std::fs::write(&bad_yaml, "analysis: [unclosed").unwrap();
        assert!(matches!(
            Config::load_from_file(&bad_yaml),
            Err(ConfigError::Yaml { .. })
        ));
    }

    #[test]
    fn test_load_from_path_no_config() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from_path(dir.path());
        assert_eq!(config.analysis, AnalysisConfig::default());
    }

    #[test]
    fn test_load_from_path_zv0_toml() {
        let dir = TempDir::new().unwrap();
        let mut file = std::fs::File::create(dir.path().join(".zv0.toml")).unwrap();
        writeln!(
            file,
            r"[analysis]
security_checks = false
"
        )
        .unwrap();

        let config = Config::load_from_path(dir.path());
        assert!(!config.analysis.security_checks);
        assert!(config.config_file_path.is_some());
    }

    #[test]
    fn test_load_from_path_pyproject_toml() {
        let dir = TempDir::new().unwrap();
        let mut file = std::fs::File::create(dir.path().join("pyproject.toml")).unwrap();
        writeln!(
            file,
            r#"[project]
name = "demo"

[tool.zv0.analysis]
dangerous_functions = ["eval"]
"#
        )
        .unwrap();

        let config = Config::load_from_path(dir.path());
        assert_eq!(config.analysis.dangerous_functions, vec!["eval"]);
    }

    #[test]
    fn test_load_from_path_traverses_up_from_file() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("src").join("pkg");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(
            dir.path().join(".zv0.toml"),
            "[analysis]\nperformance_checks = false\n",
        )
        .unwrap();
        let py_file = nested.join("mod.py");
        std::fs::write(&py_file, "x = 1").unwrap();

        let config = Config::load_from_path(&py_file);
        assert!(!config.analysis.performance_checks);
    }
}

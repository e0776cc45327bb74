//! # Configuration Module
//!
//! This module provides the run configuration for addcopyright: the table of
//! (filename glob, comment prefix) pairs and the set of directory names
//! excluded from the walk.
//!
//! Both carry compiled-in defaults and can be overridden through an
//! `.addcopyright.toml` file or the `ADDCOPYRIGHT_CONFIG` environment
//! variable.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::verbose_log;

/// The default config file name.
pub const DEFAULT_CONFIG_FILENAME: &str = ".addcopyright.toml";

/// Environment variable for specifying config file path.
pub const CONFIG_ENV_VAR: &str = "ADDCOPYRIGHT_CONFIG";

/// Built-in (glob, prefix) table covering the languages of the tree.
const DEFAULT_PAIRS: &[(&str, &str)] = &[
  ("*.h", "//"),
  ("*.c", "//"),
  ("*.hpp", "//"),
  ("*.cc", "//"),
  ("*.py", "#"),
  ("*.cpp", "//"),
  ("*.lua", "--"),
];

/// Directory name patterns pruned from the walk before descent.
const DEFAULT_EXCLUDED_DIRS: &[&str] = &["third_party", "external", "ext", "build*", "out*"];

/// One (filename glob, comment prefix) table entry.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Pair {
  /// Filename glob the entry applies to (e.g. `*.cpp`).
  pub glob: String,

  /// Comment leader for that file type, without the trailing space
  /// (e.g. `//`, `#`, `--`).
  pub prefix: String,
}

impl Pair {
  /// Create a pair from string slices.
  pub fn new(glob: &str, prefix: &str) -> Self {
    Self {
      glob: glob.to_string(),
      prefix: prefix.to_string(),
    }
  }
}

/// On-disk configuration shape. Keys are optional so a file may override only
/// the pair table or only the excluded directories.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
  #[serde(default)]
  pairs: Option<Vec<Pair>>,

  #[serde(default, rename = "excluded-dirs")]
  excluded_dirs: Option<Vec<String>>,
}

/// Immutable configuration for one run.
///
/// Loaded from constants (optionally overridden by a config file) at startup
/// and passed into the driver; nothing mutates it afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
  /// Ordered (glob, prefix) table. The driver makes one pass per entry.
  pub pairs: Vec<Pair>,

  /// Directory name globs excluded from the walk.
  pub excluded_dirs: Vec<String>,
}

impl Default for RunConfig {
  fn default() -> Self {
    Self {
      pairs: DEFAULT_PAIRS.iter().map(|(g, p)| Pair::new(g, p)).collect(),
      excluded_dirs: DEFAULT_EXCLUDED_DIRS.iter().map(|d| (*d).to_string()).collect(),
    }
  }
}

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// The config file could not be read.
  #[error("Failed to read config file '{path}': {source}")]
  ReadError { path: PathBuf, source: std::io::Error },

  /// The config file contains invalid TOML.
  #[error("Failed to parse config file '{path}': {source}")]
  ParseError { path: PathBuf, source: toml::de::Error },

  /// A pair entry is invalid.
  #[error("Invalid pair for glob '{glob}': {message}")]
  InvalidPair { glob: String, message: String },

  /// An excluded directory pattern is invalid.
  #[error("Invalid excluded directory pattern '{pattern}': {message}")]
  InvalidExcludedDir { pattern: String, message: String },
}

impl RunConfig {
  /// Load configuration from a file, overlaying it on the defaults.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    verbose_log!("Loading config from: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
      path: path.to_path_buf(),
      source: e,
    })?;

    let file: ConfigFile = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
      path: path.to_path_buf(),
      source: e,
    })?;

    let defaults = Self::default();
    let config = Self {
      pairs: file.pairs.unwrap_or(defaults.pairs),
      excluded_dirs: file.excluded_dirs.unwrap_or(defaults.excluded_dirs),
    };

    config.validate()?;

    verbose_log!(
      "Loaded {} pairs, {} excluded directory patterns",
      config.pairs.len(),
      config.excluded_dirs.len()
    );

    Ok(config)
  }

  /// Validate the configuration.
  ///
  /// Checks that every glob parses, every prefix is non-empty, and every
  /// excluded directory pattern parses.
  fn validate(&self) -> Result<(), ConfigError> {
    for pair in &self.pairs {
      if pair.glob.is_empty() {
        return Err(ConfigError::InvalidPair {
          glob: pair.glob.clone(),
          message: "glob cannot be empty".to_string(),
        });
      }

      if let Err(e) = glob::Pattern::new(&pair.glob) {
        return Err(ConfigError::InvalidPair {
          glob: pair.glob.clone(),
          message: e.to_string(),
        });
      }

      if pair.prefix.is_empty() {
        return Err(ConfigError::InvalidPair {
          glob: pair.glob.clone(),
          message: "prefix cannot be empty".to_string(),
        });
      }
    }

    for pattern in &self.excluded_dirs {
      if let Err(e) = glob::Pattern::new(pattern) {
        return Err(ConfigError::InvalidExcludedDir {
          pattern: pattern.clone(),
          message: e.to_string(),
        });
      }
    }

    Ok(())
  }
}

/// Discover the configuration file path.
///
/// The configuration file is discovered in the following order:
/// 1. Path specified via `--config` flag (passed as `explicit_path`)
/// 2. Path specified via `ADDCOPYRIGHT_CONFIG` environment variable
/// 3. `.addcopyright.toml` in the scan root
pub fn discover_config_path(explicit_path: Option<&Path>, root: &Path) -> Option<PathBuf> {
  if let Some(path) = explicit_path {
    if path.exists() {
      verbose_log!("Using explicit config path: {}", path.display());
      return Some(path.to_path_buf());
    }
    verbose_log!("Explicit config path does not exist: {}", path.display());
    return None;
  }

  if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
    let path = PathBuf::from(&env_path);
    if path.exists() {
      verbose_log!("Using config from {}: {}", CONFIG_ENV_VAR, path.display());
      return Some(path);
    }
    verbose_log!("{} path does not exist: {}", CONFIG_ENV_VAR, env_path);
  }

  let root_config = root.join(DEFAULT_CONFIG_FILENAME);
  if root_config.exists() {
    verbose_log!("Using root config: {}", root_config.display());
    return Some(root_config);
  }

  verbose_log!("No config file found");
  None
}

/// Load configuration from the discovered path, or return the defaults.
pub fn load_config(explicit_path: Option<&Path>, root: &Path, no_config: bool) -> Result<RunConfig> {
  if no_config {
    verbose_log!("Config file discovery disabled (--no-config)");
    return Ok(RunConfig::default());
  }

  match discover_config_path(explicit_path, root) {
    Some(path) => {
      let config = RunConfig::load(&path).with_context(|| format!("Failed to load config from {}", path.display()))?;
      Ok(config)
    }
    None => Ok(RunConfig::default()),
  }
}

#[cfg(test)]
mod tests {
  use tempfile::TempDir;

  use super::*;

  #[test]
  fn test_default_pair_table() {
    let config = RunConfig::default();

    assert_eq!(config.pairs.len(), 7);
    assert_eq!(config.pairs[0], Pair::new("*.h", "//"));
    assert!(config.pairs.contains(&Pair::new("*.py", "#")));
    assert!(config.pairs.contains(&Pair::new("*.lua", "--")));
    assert!(config.excluded_dirs.contains(&"third_party".to_string()));
    assert!(config.excluded_dirs.contains(&"build*".to_string()));
  }

  #[test]
  fn test_parse_valid_config() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let config_path = temp_dir.path().join(DEFAULT_CONFIG_FILENAME);

    std::fs::write(
      &config_path,
      concat!(
        "pairs = [\n",
        "  { glob = \"*.rs\", prefix = \"//\" },\n",
        "  { glob = \"*.sh\", prefix = \"#\" },\n",
        "]\n",
        "\"excluded-dirs\" = [\"vendor\", \"target\"]\n",
      ),
    )
    .expect("write config");

    let config = RunConfig::load(&config_path).expect("load should succeed");

    assert_eq!(config.pairs.len(), 2);
    assert_eq!(config.pairs[0], Pair::new("*.rs", "//"));
    assert_eq!(config.excluded_dirs, vec!["vendor".to_string(), "target".to_string()]);
  }

  #[test]
  fn test_partial_config_keeps_defaults() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let config_path = temp_dir.path().join(DEFAULT_CONFIG_FILENAME);

    std::fs::write(&config_path, "\"excluded-dirs\" = [\"vendor\"]\n").expect("write config");

    let config = RunConfig::load(&config_path).expect("load should succeed");

    // Pairs fall back to the builtin table.
    assert_eq!(config.pairs, RunConfig::default().pairs);
    assert_eq!(config.excluded_dirs, vec!["vendor".to_string()]);
  }

  #[test]
  fn test_validate_empty_prefix() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let config_path = temp_dir.path().join(DEFAULT_CONFIG_FILENAME);

    std::fs::write(&config_path, "pairs = [{ glob = \"*.rs\", prefix = \"\" }]\n").expect("write config");

    let result = RunConfig::load(&config_path);
    assert!(matches!(result, Err(ConfigError::InvalidPair { .. })));
  }

  #[test]
  fn test_validate_bad_glob() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let config_path = temp_dir.path().join(DEFAULT_CONFIG_FILENAME);

    std::fs::write(&config_path, "pairs = [{ glob = \"[\", prefix = \"//\" }]\n").expect("write config");

    let result = RunConfig::load(&config_path);
    assert!(matches!(result, Err(ConfigError::InvalidPair { .. })));
  }

  #[test]
  fn test_load_config_file_not_found() {
    let result = RunConfig::load(Path::new("/nonexistent/path/.addcopyright.toml"));
    assert!(matches!(result, Err(ConfigError::ReadError { .. })));
  }

  #[test]
  fn test_discover_config_explicit_path() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let config_path = temp_dir.path().join("custom-config.toml");
    std::fs::write(&config_path, "").expect("write config");

    let result = discover_config_path(Some(&config_path), temp_dir.path());
    assert_eq!(result, Some(config_path));
  }

  #[test]
  fn test_discover_config_root() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let config_path = temp_dir.path().join(DEFAULT_CONFIG_FILENAME);
    std::fs::write(&config_path, "").expect("write config");

    let result = discover_config_path(None, temp_dir.path());
    assert_eq!(result, Some(config_path));
  }

  #[test]
  fn test_discover_config_none_found() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let result = discover_config_path(None, temp_dir.path());
    assert!(result.is_none());
  }

  #[test]
  fn test_load_config_no_config_flag_skips_discovery() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let config_path = temp_dir.path().join(DEFAULT_CONFIG_FILENAME);
    std::fs::write(&config_path, "pairs = [{ glob = \"*.rs\", prefix = \"//\" }]\n").expect("write config");

    let config = load_config(None, temp_dir.path(), true).expect("defaults");
    assert_eq!(config, RunConfig::default());
  }
}

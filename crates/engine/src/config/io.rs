//! Configuration IO helpers.

use std::env;
use std::fs::{self, create_dir_all, write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use dirs_next::config_dir;
use tracing::debug;
use wayfinder_util::expand_tilde;

use crate::config::Configuration;

/// Environment variable overriding the configuration file location.
pub const CONFIG_PATH_ENV: &str = "WAYFINDER_CONFIG_PATH";

/// Returns the default path for the configuration file.
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = env::var(CONFIG_PATH_ENV)
        && !path.trim().is_empty()
    {
        return expand_tilde(&path);
    }

    config_dir().unwrap_or_else(|| PathBuf::from(".")).join("wayfinder").join("config.json")
}

/// Loads and parses configuration from the default path.
pub fn load_config() -> anyhow::Result<Configuration> {
    let path = default_config_path();
    load_config_from_path(&path)
}

/// Loads and parses configuration from a specific path.
///
/// A missing file yields the default configuration. Files ending in `.yaml`
/// or `.yml` are read as YAML, everything else as JSON.
pub fn load_config_from_path(path: &Path) -> anyhow::Result<Configuration> {
    if !path.exists() {
        debug!(path = %path.display(), "no configuration file; using defaults");
        return Ok(Configuration::default());
    }

    let content = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let config: Configuration = if is_yaml(path) {
        serde_yaml::from_str(&content).with_context(|| format!("invalid YAML configuration in {}", path.display()))?
    } else {
        serde_json::from_str(&content).with_context(|| format!("invalid JSON configuration in {}", path.display()))?
    };
    debug!(path = %path.display(), providers = config.providers.len(), "loaded configuration");
    Ok(config)
}

/// Saves configuration to a specific path as pretty-printed JSON.
pub fn save_config_to_path(config: &Configuration, path: &Path) -> anyhow::Result<()> {
    if let Some(parent_directory) = path.parent() {
        create_dir_all(parent_directory)?;
    }

    let content = serde_json::to_string_pretty(config)?;
    write(path, content)?;
    Ok(())
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| extension.eq_ignore_ascii_case("yaml") || extension.eq_ignore_ascii_case("yml"))
}

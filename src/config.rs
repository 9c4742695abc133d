use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::cli::OutputFormat;

/// Root configuration structure, deserialized from `.license-reporter/config.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub report: ReportConfig,
    pub metadata: MetadataConfig,
}

/// Report defaults. Command-line flags take precedence.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Output format used when `--format` is not given.
    pub format: Option<OutputFormat>,
    /// Exclude patterns appended to those from `--exclude`.
    pub exclude: Vec<String>,
    /// Project name used when `--project-name` is not given.
    pub project_name: Option<String>,
}

/// Where installed package metadata is looked up.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MetadataConfig {
    /// Extra site-packages directories or environment roots, searched after
    /// any given with `--site-packages`.
    pub site_packages: Vec<PathBuf>,
}

/// Load the configuration, searching in order:
///
/// 1. `config_override`, the path passed via `--config`
/// 2. `<project_path>/.license-reporter/config.toml`
/// 3. `~/.config/license-reporter/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(project_path: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let project_config = project_path.join(".license-reporter").join("config.toml");
    if project_config.exists() {
        return read_config(&project_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home
            .join(".config")
            .join("license-reporter")
            .join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("invalid config {}", path.display()))
}

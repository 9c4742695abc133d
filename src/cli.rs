use std::path::PathBuf;

use clap::Parser;
use serde::Deserialize;

use crate::models::FilterOptions;

/// Project name used by `--legacy-mode`.
pub const LEGACY_PROJECT_NAME: &str = "OSI (Open Source Installer)";

#[derive(Parser, Debug)]
#[command(
    name = "license-reporter",
    about = "Generate third-party license attribution reports for Python projects",
    version
)]
pub struct Cli {
    /// Project path to analyze
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Output format [default: text, or `report.format` from the config file]
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Write the report to FILE instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Include development dependencies
    #[arg(long)]
    pub include_dev: bool,

    /// Include optional dependencies
    #[arg(long)]
    pub include_optional: bool,

    /// Only runtime dependencies, without build, test and stub packages (PyInstaller compliance mode)
    #[arg(long)]
    pub runtime_only: bool,

    /// Include all dependencies (runtime + dev + optional)
    #[arg(long)]
    pub all_deps: bool,

    /// Comma-separated package patterns to exclude (supports `*` and `?`)
    #[arg(long, value_name = "PATTERNS")]
    pub exclude: Option<String>,

    /// Override the detected project name
    #[arg(long, value_name = "NAME")]
    pub project_name: Option<String>,

    /// Runtime-only report with the fixed legacy project name
    #[arg(long)]
    pub legacy_mode: bool,

    /// Additional site-packages directory or environment root to read metadata from (repeatable)
    #[arg(long = "site-packages", value_name = "DIR")]
    pub site_packages: Vec<PathBuf>,

    /// Config file [default: ./.license-reporter/config.toml, fallback ~/.config/license-reporter/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Suppress progress notes and the summary printed after writing an output file
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    #[value(alias = "structured")]
    #[serde(alias = "structured")]
    Json,
    Markdown,
}

impl Cli {
    /// Resolve the dependency-group flags and exclude patterns.
    ///
    /// `--all-deps` forces both include flags and disables `--runtime-only`;
    /// `--runtime-only` disables both include flags. `extra_excludes` (from
    /// the config file) come after the command-line patterns.
    pub fn filter_options(&self, extra_excludes: &[String]) -> FilterOptions {
        let (include_dev, include_optional, runtime_only) = if self.all_deps {
            (true, true, false)
        } else if self.runtime_only {
            (false, false, true)
        } else {
            (self.include_dev, self.include_optional, false)
        };

        let mut exclude_patterns = self
            .exclude
            .as_deref()
            .map(parse_exclude)
            .unwrap_or_default();
        exclude_patterns.extend(extra_excludes.iter().cloned());

        FilterOptions {
            include_dev,
            include_optional,
            runtime_only,
            exclude_patterns,
        }
    }

    /// `--project-name`, else `configured`. Blank names count as absent so
    /// the name is detected from the project instead.
    pub fn project_name_override(&self, configured: Option<&str>) -> Option<String> {
        self.project_name
            .as_deref()
            .into_iter()
            .chain(configured)
            .map(str::trim)
            .find(|name| !name.is_empty())
            .map(str::to_string)
    }
}

/// Split a comma-separated pattern list, dropping empty entries.
pub fn parse_exclude(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

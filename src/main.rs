//! `license-reporter`: build third-party license attribution reports for Python projects.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]) and load the config ([`config::load_config`]).
//! 2. Find dependency manifests ([`locator::discover_manifests`]).
//! 3. Parse each manifest, assigning dependency groups ([`manifest`]).
//! 4. Apply group and exclude filters ([`filter`]).
//! 5. Merge installed metadata and attribution requirements ([`metadata`],
//!    [`license`], [`report::assemble`]).
//! 6. Render the requested format ([`report`]) to stdout or `--output`.
//! 7. Exit `0`, or `1` on an invalid project path, config, or write failure.

mod cli;
mod config;
mod diagnostics;
mod error;
mod filter;
mod license;
mod locator;
mod manifest;
mod metadata;
mod models;
mod report;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use cli::{Cli, OutputFormat, LEGACY_PROJECT_NAME};
use config::load_config;
use diagnostics::{note, warn};
use error::ReporterError;
use filter::filter_dependencies;
use locator::discover_manifests;
use manifest::parse_manifest;
use metadata::site_packages::SitePackagesIndex;
use models::{FilterOptions, Summary};
use report::assemble::{assemble, ReportRequest};

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!("{} {:#}", "error:".red().bold(), err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let path = resolve_project_path(&cli.path)?;
    let config = load_config(&path, cli.config.as_deref())?;

    let (filters, project_name) = if cli.legacy_mode {
        let filters = FilterOptions {
            runtime_only: true,
            ..Default::default()
        };
        (filters, Some(LEGACY_PROJECT_NAME.to_string()))
    } else {
        let project_name = cli.project_name_override(config.report.project_name.as_deref());
        (cli.filter_options(&config.report.exclude), project_name)
    };

    let manifests = discover_manifests(&path);
    if manifests.is_empty() {
        warn(format!(
            "No supported dependency manifests found in {}",
            path.display()
        ));
    }

    let mut all_deps = Vec::new();
    for manifest in &manifests {
        let deps = parse_manifest(manifest);
        if !cli.quiet {
            note(format!("{} {} dependencies", manifest.file_name, deps.len()));
        }
        all_deps.extend(deps);
    }

    let filtered = filter_dependencies(all_deps, &filters)?;

    let mut site_dirs = cli.site_packages.clone();
    site_dirs.extend(config.metadata.site_packages.iter().cloned());
    let index = SitePackagesIndex::discover(&path, &site_dirs);
    if !cli.quiet {
        note(format!(
            "{} installed packages indexed from {} site-packages directories",
            index.len(),
            index.searched().len()
        ));
    }
    if index.is_empty() && !filtered.is_empty() {
        warn("No installed package metadata found; versions and licenses will be reported as unknown");
    }

    let request = ReportRequest {
        project_root: &path,
        project_name,
        filters,
    };
    let report = assemble(&request, &manifests, filtered, &index);

    let format = cli
        .format
        .or(config.report.format)
        .unwrap_or(OutputFormat::Text);
    let output = report::render(&report, format)?;

    match &cli.output {
        Some(file) => {
            std::fs::write(file, &output).map_err(|e| ReporterError::OutputWrite {
                path: file.clone(),
                details: e.to_string(),
            })?;
            if !cli.quiet {
                eprintln!("License report written to {}", file.display());
                print_summary(&report.summary);
            }
        }
        None => println!("{}", output),
    }

    Ok(())
}

/// Absolute, existing project directory.
fn resolve_project_path(path: &Path) -> Result<PathBuf> {
    if !path.exists() {
        return Err(ReporterError::ProjectNotFound {
            path: path.to_path_buf(),
        }
        .into());
    }
    if !path.is_dir() {
        return Err(ReporterError::NotADirectory {
            path: path.to_path_buf(),
        }
        .into());
    }
    path.canonicalize()
        .with_context(|| format!("failed to resolve {}", path.display()))
}

fn print_summary(summary: &Summary) {
    eprintln!(
        "Analyzed {} packages",
        summary.total_packages.to_string().bold()
    );
    if summary.runtime_packages > 0 {
        eprintln!("  - Runtime: {}", summary.runtime_packages.to_string().green());
    }
    if summary.dev_packages > 0 {
        eprintln!("  - Development: {}", summary.dev_packages.to_string().cyan());
    }
    if summary.optional_packages > 0 {
        eprintln!("  - Optional: {}", summary.optional_packages.to_string().cyan());
    }
    eprintln!(
        "  - Requiring attribution: {}",
        summary.requires_attribution.to_string().yellow()
    );
}

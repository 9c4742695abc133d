use std::path::Path;

use anyhow::Result;
use serde::Deserialize;

use super::{constraint_from_toml, read_manifest};
use crate::models::{Dependency, DependencyGroup};

#[derive(Debug, Deserialize)]
struct Pipfile {
    #[serde(default)]
    packages: toml::Table,
    #[serde(default, rename = "dev-packages")]
    dev_packages: toml::Table,
}

/// Parse a `Pipfile`: `[packages]` are runtime, `[dev-packages]` are dev.
pub fn parse(path: &Path) -> Result<Vec<Dependency>> {
    let content = read_manifest(path)?;
    parse_str(&content, path)
}

pub fn parse_str(content: &str, source: &Path) -> Result<Vec<Dependency>> {
    let pipfile: Pipfile = toml::from_str(content)?;

    let runtime = pipfile.packages.iter().map(|(name, spec)| {
        Dependency::new(name, constraint_from_toml(spec), DependencyGroup::Runtime, source)
    });
    let dev = pipfile.dev_packages.iter().map(|(name, spec)| {
        Dependency::new(name, constraint_from_toml(spec), DependencyGroup::Dev, source)
    });

    Ok(runtime.chain(dev).collect())
}

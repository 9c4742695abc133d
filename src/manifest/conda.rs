use std::path::Path;

use anyhow::Result;
use serde::Deserialize;

use super::{dependency_from_spec, read_manifest, split_spec};
use crate::models::{Dependency, DependencyGroup};

/// Conda packages that describe the environment itself.
const SKIPPED: &[&str] = &["python", "pip"];

#[derive(Debug, Deserialize)]
struct Environment {
    #[serde(default)]
    dependencies: Vec<Entry>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Entry {
    Spec(String),
    Pip { pip: Vec<String> },
    Other(serde::de::IgnoredAny),
}

/// Parse a conda environment file. Conda and nested `pip:` entries are runtime.
pub fn parse(path: &Path) -> Result<Vec<Dependency>> {
    let content = read_manifest(path)?;
    parse_str(&content, path)
}

pub fn parse_str(content: &str, source: &Path) -> Result<Vec<Dependency>> {
    let env: Environment = serde_yaml_ng::from_str(content)?;
    let mut deps = Vec::new();

    for entry in &env.dependencies {
        match entry {
            Entry::Spec(spec) => deps.extend(conda_dependency(spec, source)),
            Entry::Pip { pip } => deps.extend(
                pip.iter()
                    .map(|line| line.trim())
                    .filter(|line| !line.starts_with('-'))
                    .filter_map(|line| dependency_from_spec(line, DependencyGroup::Runtime, source)),
            ),
            Entry::Other(_) => {}
        }
    }

    Ok(deps)
}

/// Conda match specs: optional `channel::` prefix, then either an operator
/// constraint (`numpy>=1.24`, `numpy=1.24`) or a space separated one
/// (`numpy 1.24.*`).
fn conda_dependency(spec: &str, source: &Path) -> Option<Dependency> {
    let spec = spec.rsplit("::").next().unwrap_or(spec).trim();
    let (mut name, mut version_spec) = split_spec(spec);
    if let Some((head, tail)) = name.split_once(char::is_whitespace) {
        version_spec = format!("{} {}", tail.trim(), version_spec).trim().to_string();
        name = head.to_string();
    }
    if name.is_empty() || SKIPPED.contains(&name.to_lowercase().as_str()) {
        return None;
    }
    Some(Dependency::new(name, version_spec, DependencyGroup::Runtime, source))
}

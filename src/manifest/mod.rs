//! Manifest parsing, one module per dialect.
//!
//! Every parser returns [`Dependency`] values with their group already
//! assigned by [`classify`]. Parse failures never abort the run: see
//! [`parse_manifest`].

use std::path::Path;

use anyhow::{Context, Result};

use crate::diagnostics::warn;
use crate::locator::Manifest;
use crate::models::{Dependency, DependencyGroup};

pub mod classify;
#[cfg(feature = "conda")]
pub mod conda;
pub mod pipfile;
pub mod pyproject;
pub mod requirements;
pub mod setup_cfg;
pub mod setup_py;

/// Characters that start the version constraint of a requirement spec.
const OPERATORS: [char; 4] = ['<', '>', '=', '!'];

/// Manifest dialects understood by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestKind {
    /// Plain requirements list (`requirements*.txt`).
    Requirements,
    /// `setup.py`, scanned textually.
    SetupScript,
    /// `setup.cfg`.
    SetupConfig,
    /// `pyproject.toml` (PEP 621, PEP 735 and Poetry tables).
    Pyproject,
    Pipfile,
    /// Conda `environment.yml` and friends.
    CondaEnvironment,
}

/// Parse one manifest, downgrading any failure to a warning and an empty result.
pub fn parse_manifest(manifest: &Manifest) -> Vec<Dependency> {
    #[cfg(not(feature = "conda"))]
    if manifest.kind == ManifestKind::CondaEnvironment {
        warn(format!(
            "YAML support is not available (built without the `conda` feature), skipping {}",
            manifest.path.display()
        ));
        return Vec::new();
    }

    match parse(manifest.kind, &manifest.path) {
        Ok(deps) => deps,
        Err(err) => {
            warn(format!("Error parsing {}: {:#}", manifest.path.display(), err));
            Vec::new()
        }
    }
}

fn parse(kind: ManifestKind, path: &Path) -> Result<Vec<Dependency>> {
    match kind {
        ManifestKind::Requirements => requirements::parse(path),
        ManifestKind::SetupScript => setup_py::parse(path),
        ManifestKind::SetupConfig => setup_cfg::parse(path),
        ManifestKind::Pyproject => pyproject::parse(path),
        ManifestKind::Pipfile => pipfile::parse(path),
        #[cfg(feature = "conda")]
        ManifestKind::CondaEnvironment => conda::parse(path),
        #[cfg(not(feature = "conda"))]
        ManifestKind::CondaEnvironment => Ok(Vec::new()),
    }
}

pub(crate) fn read_manifest(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Split a requirement spec at the first comparison operator.
///
/// `"requests>=2.0,<3.0"` becomes `("requests", ">=2.0,<3.0")`; a spec with no
/// operator is all name.
pub fn split_spec(spec: &str) -> (String, String) {
    let spec = spec.trim();
    match spec.find(&OPERATORS[..]) {
        Some(idx) => (spec[..idx].trim().to_string(), spec[idx..].trim().to_string()),
        None => (spec.to_string(), String::new()),
    }
}

/// True if `spec` contains any comparison operator.
pub fn has_operator(spec: &str) -> bool {
    spec.contains(&OPERATORS[..])
}

/// Build a dependency from a requirement spec; `None` when the name is empty.
pub(crate) fn dependency_from_spec(
    spec: &str,
    group: DependencyGroup,
    source: &Path,
) -> Option<Dependency> {
    let (name, version_spec) = split_spec(spec);
    if name.is_empty() {
        return None;
    }
    Some(Dependency::new(name, version_spec, group, source))
}

/// Constraint text for a TOML table value (Poetry, Pipfile).
///
/// Strings are used as-is, inline tables contribute their `version` key and
/// the `"*"` wildcard means no constraint.
pub(crate) fn constraint_from_toml(value: &toml::Value) -> String {
    let raw = match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Table(table) => table
            .get("version")
            .and_then(toml::Value::as_str)
            .unwrap_or_default()
            .to_string(),
        other => other.to_string(),
    };
    if raw.trim() == "*" {
        String::new()
    } else {
        raw
    }
}

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Placeholder used for every metadata field that could not be resolved.
pub const UNKNOWN: &str = "unknown";

/// A dependency as declared in one manifest.
#[derive(Debug, Clone, PartialEq)]
pub struct Dependency {
    pub name: String,
    pub version_spec: String,
    pub group: DependencyGroup,
    /// Manifest that declared this dependency.
    pub source: PathBuf,
}

impl Dependency {
    pub fn new(
        name: impl AsRef<str>,
        version_spec: impl AsRef<str>,
        group: DependencyGroup,
        source: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.as_ref().trim().to_string(),
            version_spec: version_spec.as_ref().trim().to_string(),
            group,
            source: source.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyGroup {
    Runtime,
    Dev,
    Optional,
    Build,
}

impl std::fmt::Display for DependencyGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DependencyGroup::Runtime => write!(f, "runtime"),
            DependencyGroup::Dev => write!(f, "dev"),
            DependencyGroup::Optional => write!(f, "optional"),
            DependencyGroup::Build => write!(f, "build"),
        }
    }
}

/// Locally installed metadata for a package; absent fields hold [`UNKNOWN`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledMetadata {
    pub version: String,
    pub license: String,
    pub author: String,
    pub homepage: String,
}

impl Default for InstalledMetadata {
    fn default() -> Self {
        Self {
            version: UNKNOWN.to_string(),
            license: UNKNOWN.to_string(),
            author: UNKNOWN.to_string(),
            homepage: UNKNOWN.to_string(),
        }
    }
}

/// One merged entry of the report: declared fields plus installed metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageRecord {
    pub name: String,
    pub version: String,
    pub license: String,
    pub author: String,
    pub homepage: String,
    pub requires_attribution: bool,
    pub dependency_type: DependencyGroup,
    pub version_spec: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total_packages: usize,
    pub runtime_packages: usize,
    pub dev_packages: usize,
    pub optional_packages: usize,
    pub requires_attribution: usize,
    pub unknown_licenses: usize,
}

/// Dependency selection flags, echoed in the report as `filters_applied`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub include_dev: bool,
    pub include_optional: bool,
    pub runtime_only: bool,
    pub exclude_patterns: Vec<String>,
}

impl FilterOptions {
    /// True when any flag is set or any exclude pattern is present.
    pub fn is_active(&self) -> bool {
        self.include_dev
            || self.include_optional
            || self.runtime_only
            || !self.exclude_patterns.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub project: String,
    pub project_path: String,
    pub generated_by: String,
    pub report_type: String,
    pub dependency_files: Vec<String>,
    pub packages: Vec<PackageRecord>,
    pub summary: Summary,
    pub excluded_build_tools: Vec<String>,
    pub filters_applied: FilterOptions,
}

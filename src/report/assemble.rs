use std::path::Path;

use crate::filter::excluded_build_tools;
use crate::license::attribution::requires_attribution;
use crate::locator::Manifest;
use crate::manifest::{pyproject, setup_py};
use crate::metadata::MetadataLookup;
use crate::models::{Dependency, DependencyGroup, FilterOptions, PackageRecord, Report, Summary, UNKNOWN};

/// Value of the report's `generated_by` field.
pub const GENERATED_BY: &str = concat!("license-reporter ", env!("CARGO_PKG_VERSION"));

/// Everything the assembler needs besides the dependencies themselves.
#[derive(Debug, Clone)]
pub struct ReportRequest<'a> {
    /// Absolute project root.
    pub project_root: &'a Path,
    /// Explicit project name; detected from the manifests when `None`.
    pub project_name: Option<String>,
    pub filters: FilterOptions,
}

/// Merge filtered dependencies with installed metadata into a [`Report`].
///
/// Packages are ordered by case-insensitive name; dependencies sharing a name
/// keep their manifest order. Summary counts are computed from the final
/// package list.
pub fn assemble(
    request: &ReportRequest<'_>,
    manifests: &[Manifest],
    mut deps: Vec<Dependency>,
    lookup: &impl MetadataLookup,
) -> Report {
    deps.sort_by_key(|d| d.name.to_lowercase());

    let packages: Vec<PackageRecord> = deps
        .into_iter()
        .map(|dep| {
            let meta = lookup.lookup(&dep.name);
            PackageRecord {
                requires_attribution: requires_attribution(&meta.license),
                name: dep.name,
                version: meta.version,
                license: meta.license,
                author: meta.author,
                homepage: meta.homepage,
                dependency_type: dep.group,
                version_spec: dep.version_spec,
            }
        })
        .collect();

    let summary = summarize(&packages);
    let project = request
        .project_name
        .clone()
        .unwrap_or_else(|| detect_project_name(request.project_root));

    Report {
        project,
        project_path: request.project_root.display().to_string(),
        generated_by: GENERATED_BY.to_string(),
        report_type: report_type(&request.filters).to_string(),
        dependency_files: manifests
            .iter()
            .map(|m| m.path.display().to_string())
            .collect(),
        packages,
        summary,
        excluded_build_tools: if request.filters.runtime_only {
            excluded_build_tools()
        } else {
            Vec::new()
        },
        filters_applied: request.filters.clone(),
    }
}

/// Count packages per group, requiring attribution, and with unknown license.
pub fn summarize(packages: &[PackageRecord]) -> Summary {
    let count = |group: DependencyGroup| {
        packages
            .iter()
            .filter(|p| p.dependency_type == group)
            .count()
    };

    Summary {
        total_packages: packages.len(),
        runtime_packages: count(DependencyGroup::Runtime),
        dev_packages: count(DependencyGroup::Dev),
        optional_packages: count(DependencyGroup::Optional),
        requires_attribution: packages.iter().filter(|p| p.requires_attribution).count(),
        unknown_licenses: packages.iter().filter(|p| p.license == UNKNOWN).count(),
    }
}

/// Human-readable label for the filter combination.
pub fn report_type(filters: &FilterOptions) -> &'static str {
    if filters.runtime_only {
        "Runtime Dependencies (PyInstaller Bundled)"
    } else if filters.include_dev && filters.include_optional {
        "All Dependencies (Runtime + Development + Optional)"
    } else if filters.include_dev {
        "Runtime + Development Dependencies"
    } else {
        "Runtime Dependencies"
    }
}

/// Project name from `pyproject.toml`, then `setup.py`, then the directory name.
pub fn detect_project_name(root: &Path) -> String {
    let from_file = |file: &str, extract: fn(&str) -> Option<String>| {
        std::fs::read_to_string(root.join(file))
            .ok()
            .and_then(|content| extract(&content))
    };

    from_file("pyproject.toml", pyproject::project_name)
        .or_else(|| from_file("setup.py", setup_py::project_name))
        .unwrap_or_else(|| {
            root.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| root.display().to_string())
        })
}

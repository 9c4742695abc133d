use crate::models::Report;

use super::yes_no;

const BANNER_WIDTH: usize = 80;
const RULE_WIDTH: usize = 40;

/// Render the plain-text attribution document.
pub fn render(report: &Report) -> String {
    let banner = "=".repeat(BANNER_WIDTH);
    let mut lines: Vec<String> = Vec::new();

    lines.push(banner.clone());
    lines.push("THIRD-PARTY SOFTWARE LICENSES".to_string());
    lines.push(banner.clone());
    lines.push(String::new());
    lines.push(format!("Project: {}", report.project));
    lines.push(format!("Project Path: {}", report.project_path));
    lines.push(format!("Generated by: {}", report.generated_by));
    lines.push(format!("Report Type: {}", report.report_type));
    lines.push(String::new());

    if !report.dependency_files.is_empty() {
        lines.push("DEPENDENCY FILES ANALYZED:".to_string());
        for file in &report.dependency_files {
            lines.push(format!("  - {}", file));
        }
        lines.push(String::new());
    }

    let summary = &report.summary;
    lines.push("SUMMARY:".to_string());
    lines.push(format!("  Total packages: {}", summary.total_packages));
    if summary.runtime_packages > 0 {
        lines.push(format!("  Runtime packages: {}", summary.runtime_packages));
    }
    if summary.dev_packages > 0 {
        lines.push(format!("  Development packages: {}", summary.dev_packages));
    }
    if summary.optional_packages > 0 {
        lines.push(format!("  Optional packages: {}", summary.optional_packages));
    }
    lines.push(format!(
        "  Packages requiring attribution: {}",
        summary.requires_attribution
    ));
    lines.push(format!(
        "  Packages with unknown licenses: {}",
        summary.unknown_licenses
    ));
    lines.push(String::new());

    let filters = &report.filters_applied;
    if filters.is_active() {
        lines.push("FILTERS APPLIED:".to_string());
        if filters.runtime_only {
            lines.push("  - Runtime dependencies only (PyInstaller compliance mode)".to_string());
        }
        if filters.include_dev {
            lines.push("  - Development dependencies included".to_string());
        }
        if filters.include_optional {
            lines.push("  - Optional dependencies included".to_string());
        }
        if !filters.exclude_patterns.is_empty() {
            lines.push(format!(
                "  - Excluded patterns: {}",
                filters.exclude_patterns.join(", ")
            ));
        }
        lines.push(String::new());
    }

    if !report.excluded_build_tools.is_empty() {
        let mut tools = report.excluded_build_tools.clone();
        tools.sort();
        lines.push("EXCLUDED BUILD-TIME DEPENDENCIES:".to_string());
        lines.push("The following build tools are excluded as they are not".to_string());
        lines.push("distributed with the PyInstaller executable:".to_string());
        lines.push(tools.join(", "));
        lines.push(String::new());
    }

    lines.push(banner.clone());
    lines.push("PACKAGE DETAILS".to_string());
    lines.push(banner);
    lines.push(String::new());

    for package in &report.packages {
        lines.push(format!("Package: {}", package.name));
        lines.push(format!("Version: {}", package.version));
        if !package.version_spec.is_empty() {
            lines.push(format!("Version Spec: {}", package.version_spec));
        }
        lines.push(format!("Dependency Type: {}", package.dependency_type));
        lines.push(format!("License: {}", package.license));
        lines.push(format!("Author: {}", package.author));
        lines.push(format!("Homepage: {}", package.homepage));
        lines.push(format!(
            "Requires Attribution: {}",
            yes_no(package.requires_attribution)
        ));
        lines.push("-".repeat(RULE_WIDTH));
        lines.push(String::new());
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::excluded_build_tools;
    use crate::report::fixtures;

    #[test]
    fn test_section_order() {
        let out = render(&fixtures::report());
        let positions: Vec<usize> = [
            "THIRD-PARTY SOFTWARE LICENSES",
            "Project: sample",
            "DEPENDENCY FILES ANALYZED:",
            "SUMMARY:",
            "FILTERS APPLIED:",
            "PACKAGE DETAILS",
            "Package: pytest",
            "Package: requests",
        ]
        .iter()
        .map(|needle| out.find(needle).unwrap())
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(!out.contains("EXCLUDED BUILD-TIME DEPENDENCIES:"));
    }

    #[test]
    fn test_summary_hides_empty_groups() {
        let out = render(&fixtures::report());
        assert!(out.contains("  Runtime packages: 1"));
        assert!(out.contains("  Development packages: 1"));
        assert!(!out.contains("Optional packages"));
        assert!(out.contains("  - Development dependencies included"));
    }

    #[test]
    fn test_package_block() {
        let out = render(&fixtures::report());
        let block = "Package: requests\n\
                     Version: 1.0.0\n\
                     Version Spec: >=2.31\n\
                     Dependency Type: runtime\n\
                     License: Apache 2.0\n\
                     Author: Jane Doe\n\
                     Homepage: https://requests.readthedocs.io\n\
                     Requires Attribution: Yes\n\
                     ----------------------------------------\n";
        assert!(out.contains(block));
        // no version spec line for a bare requirement
        assert!(out.contains("Package: pytest\nVersion: 1.0.0\nDependency Type: dev\n"));
    }

    #[test]
    fn test_runtime_only_sections() {
        let mut report = fixtures::report();
        report.filters_applied = crate::models::FilterOptions {
            runtime_only: true,
            exclude_patterns: vec!["test*".to_string(), "*mock*".to_string()],
            ..Default::default()
        };
        report.excluded_build_tools = excluded_build_tools();

        let out = render(&report);
        assert!(out.contains("  - Runtime dependencies only (PyInstaller compliance mode)"));
        assert!(out.contains("  - Excluded patterns: test*, *mock*"));
        assert!(out.contains("EXCLUDED BUILD-TIME DEPENDENCIES:"));
        assert!(out.contains("autopep8, bandit, black, build,"));
    }

    #[test]
    fn test_no_filters_block_by_default() {
        let mut report = fixtures::report();
        report.filters_applied = Default::default();
        assert!(!render(&report).contains("FILTERS APPLIED:"));
    }
}

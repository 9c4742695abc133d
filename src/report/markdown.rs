use crate::models::{Report, UNKNOWN};

use super::yes_no;

/// Markdown table header for the package overview
const TABLE_HEADER: &str = "| Package | Version | Type | License | Attribution Required |";

/// Markdown table separator line
const TABLE_SEPARATOR: &str = "|---------|---------|------|---------|---------------------|";

/// Render the report as Markdown.
pub fn render(report: &Report) -> String {
    let mut lines: Vec<String> = Vec::new();

    render_header(&mut lines, report);
    render_summary(&mut lines, report);
    render_files(&mut lines, report);
    render_table(&mut lines, report);
    render_details(&mut lines, report);

    lines.join("\n")
}

/// Escapes pipe characters and newlines for safe Markdown table rendering
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

fn render_header(lines: &mut Vec<String>, report: &Report) {
    lines.push("# Third-Party Software Licenses".to_string());
    lines.push(String::new());
    lines.push(format!("**Project:** {}", report.project));
    lines.push(format!("**Project Path:** `{}`", report.project_path));
    lines.push(format!("**Generated by:** {}", report.generated_by));
    lines.push(format!("**Report Type:** {}", report.report_type));
    lines.push(String::new());
}

fn render_summary(lines: &mut Vec<String>, report: &Report) {
    let summary = &report.summary;
    lines.push("## Summary".to_string());
    lines.push(String::new());
    lines.push(format!("- **Total packages:** {}", summary.total_packages));
    if summary.runtime_packages > 0 {
        lines.push(format!("- **Runtime packages:** {}", summary.runtime_packages));
    }
    if summary.dev_packages > 0 {
        lines.push(format!("- **Development packages:** {}", summary.dev_packages));
    }
    if summary.optional_packages > 0 {
        lines.push(format!("- **Optional packages:** {}", summary.optional_packages));
    }
    lines.push(format!(
        "- **Packages requiring attribution:** {}",
        summary.requires_attribution
    ));
    lines.push(format!(
        "- **Packages with unknown licenses:** {}",
        summary.unknown_licenses
    ));
    lines.push(String::new());

    let filters = &report.filters_applied;
    if filters.is_active() {
        lines.push("### Filters Applied".to_string());
        lines.push(String::new());
        if filters.runtime_only {
            lines.push("- Runtime dependencies only (PyInstaller compliance mode)".to_string());
        }
        if filters.include_dev {
            lines.push("- Development dependencies included".to_string());
        }
        if filters.include_optional {
            lines.push("- Optional dependencies included".to_string());
        }
        if !filters.exclude_patterns.is_empty() {
            let patterns: Vec<String> = filters
                .exclude_patterns
                .iter()
                .map(|p| format!("`{}`", p))
                .collect();
            lines.push(format!("- Excluded patterns: {}", patterns.join(", ")));
        }
        lines.push(String::new());
    }

    if !report.excluded_build_tools.is_empty() {
        let mut tools = report.excluded_build_tools.clone();
        tools.sort();
        lines.push("### Excluded Build-Time Dependencies".to_string());
        lines.push(String::new());
        lines.push(
            "The following build tools are excluded as they are not distributed with the PyInstaller executable:"
                .to_string(),
        );
        lines.push(String::new());
        lines.push(tools.join(", "));
        lines.push(String::new());
    }
}

fn render_files(lines: &mut Vec<String>, report: &Report) {
    if report.dependency_files.is_empty() {
        return;
    }
    lines.push("## Dependency Files Analyzed".to_string());
    lines.push(String::new());
    for file in &report.dependency_files {
        lines.push(format!("- `{}`", file));
    }
    lines.push(String::new());
}

fn render_table(lines: &mut Vec<String>, report: &Report) {
    lines.push("## Package Details".to_string());
    lines.push(String::new());
    lines.push(TABLE_HEADER.to_string());
    lines.push(TABLE_SEPARATOR.to_string());

    for package in &report.packages {
        lines.push(format!(
            "| {} | {} | {} | {} | {} |",
            escape_cell(&package.name),
            escape_cell(&package.version),
            package.dependency_type,
            escape_cell(&package.license),
            yes_no(package.requires_attribution)
        ));
    }
    lines.push(String::new());
}

fn render_details(lines: &mut Vec<String>, report: &Report) {
    lines.push("## Detailed License Information".to_string());
    lines.push(String::new());

    for package in &report.packages {
        lines.push(format!("### {}", package.name));
        lines.push(String::new());
        lines.push(format!("- **Version:** {}", package.version));
        if !package.version_spec.is_empty() {
            lines.push(format!("- **Version Specification:** `{}`", package.version_spec));
        }
        lines.push(format!("- **Dependency Type:** {}", package.dependency_type));
        lines.push(format!("- **License:** {}", package.license));
        lines.push(format!("- **Author:** {}", package.author));
        if package.homepage != UNKNOWN {
            lines.push(format!("- **Homepage:** {}", package.homepage));
        }
        lines.push(format!(
            "- **Requires Attribution:** {}",
            yes_no(package.requires_attribution)
        ));
        lines.push(String::new());
    }
}

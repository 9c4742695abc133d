use std::path::Path;

use anyhow::Result;
use regex::Regex;

use super::classify::group_for_filename;
use super::read_manifest;
use crate::models::Dependency;

/// Parse a `requirements*.txt` file. The group comes from the filename.
pub fn parse(path: &Path) -> Result<Vec<Dependency>> {
    let content = read_manifest(path)?;
    parse_str(&content, path)
}

pub fn parse_str(content: &str, source: &Path) -> Result<Vec<Dependency>> {
    let file_name = source
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    let group = group_for_filename(file_name);
    let re = Regex::new(r"^([A-Za-z0-9_.\-]+)(.*)$")?;
    let mut deps = Vec::new();

    for line in content.lines() {
        let line = strip_comment(line).trim();
        // `-e`, `-r`, `--index-url` and other pip options
        if line.is_empty() || line.starts_with('-') {
            continue;
        }
        if let Some(caps) = re.captures(line) {
            deps.push(Dependency::new(&caps[1], &caps[2], group, source));
        }
    }

    Ok(deps)
}

/// Drop a `#` comment that starts the line or follows whitespace.
fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(idx) if idx == 0 || line[..idx].ends_with(char::is_whitespace) => &line[..idx],
        _ => line,
    }
}

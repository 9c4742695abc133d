use std::path::Path;

use anyhow::Result;

use super::classify::group_for_extra;
use super::{dependency_from_spec, read_manifest};
use crate::models::{Dependency, DependencyGroup};

/// Parse `setup.cfg`: `[options] install_requires` and `[options.extras_require]`.
///
/// Values may sit on the key line or on indented continuation lines, one
/// requirement per line.
pub fn parse(path: &Path) -> Result<Vec<Dependency>> {
    let content = read_manifest(path)?;
    Ok(parse_str(&content, path))
}

pub fn parse_str(content: &str, source: &Path) -> Vec<Dependency> {
    let mut deps = Vec::new();
    let mut section = String::new();
    // Group of the key whose value is being read, if it lists requirements.
    let mut current: Option<DependencyGroup> = None;

    for raw in content.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            section = line[1..line.len() - 1].trim().to_lowercase();
            current = None;
            continue;
        }

        if raw.starts_with(char::is_whitespace) {
            if let Some(group) = current {
                deps.extend(dependency_from_value(line, group, source));
            }
            continue;
        }

        let Some(idx) = line.find(&['=', ':'][..]) else {
            current = None;
            continue;
        };
        let key = line[..idx].trim();
        let value = line[idx + 1..].trim();

        current = match section.as_str() {
            "options" if key == "install_requires" => Some(DependencyGroup::Runtime),
            "options.extras_require" => Some(group_for_extra(key)),
            _ => None,
        };

        if let Some(group) = current {
            deps.extend(dependency_from_value(value, group, source));
        }
    }

    deps
}

fn dependency_from_value(value: &str, group: DependencyGroup, source: &Path) -> Option<Dependency> {
    let value = match value.find(" #") {
        Some(idx) => &value[..idx],
        None => value,
    };
    dependency_from_spec(value, group, source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_setup_cfg() {
        let content = r#"
[metadata]
name = cfg-app

[options]
packages = find:
install_requires =
    requests>=2.0
    click  # cli
python_requires = >=3.8

[options.extras_require]
dev =
    pytest
socks = PySocks>=1.5.6
"#;
        let deps = parse_str(content, Path::new("setup.cfg"));
        assert_eq!(deps.len(), 4);
        assert_eq!(deps[0].name, "requests");
        assert_eq!(deps[0].version_spec, ">=2.0");
        assert_eq!(deps[0].group, DependencyGroup::Runtime);
        assert_eq!(deps[1].name, "click");
        assert_eq!(deps[2].name, "pytest");
        assert_eq!(deps[2].group, DependencyGroup::Dev);
        assert_eq!(deps[3].name, "PySocks");
        assert_eq!(deps[3].group, DependencyGroup::Optional);
    }

    #[test]
    fn test_other_keys_are_ignored() {
        let content = "[options]\npackage_dir =\n    = src\n";
        assert!(parse_str(content, Path::new("setup.cfg")).is_empty());
    }
}

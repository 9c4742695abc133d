use std::path::Path;

use anyhow::Result;
use regex::Regex;

use super::{dependency_from_spec, has_operator, read_manifest};
use crate::models::{Dependency, DependencyGroup};

/// Scan `setup.py` for `install_requires` and `extras_require` literals.
///
/// The script is never executed; only the literal list / mapping that follows
/// each keyword is inspected.
pub fn parse(path: &Path) -> Result<Vec<Dependency>> {
    let content = read_manifest(path)?;
    parse_str(&content, path)
}

pub fn parse_str(content: &str, source: &Path) -> Result<Vec<Dependency>> {
    let install_re = Regex::new(r"(?s)install_requires\s*=\s*\[(.*?)\]")?;
    let extras_re = Regex::new(r"(?s)extras_require\s*=\s*\{(.*?)\}")?;
    let quoted_re = Regex::new(r#"["']([^"']+)["']"#)?;
    let mut deps = Vec::new();

    if let Some(caps) = install_re.captures(content) {
        deps.extend(
            quoted_re
                .captures_iter(&caps[1])
                .filter_map(|q| dependency_from_spec(&q[1], DependencyGroup::Runtime, source)),
        );
    }

    // Keys of the mapping are quoted too; only strings carrying a constraint
    // are taken as specs.
    if let Some(caps) = extras_re.captures(content) {
        deps.extend(
            quoted_re
                .captures_iter(&caps[1])
                .filter(|q| has_operator(&q[1]))
                .filter_map(|q| dependency_from_spec(&q[1], DependencyGroup::Optional, source)),
        );
    }

    Ok(deps)
}

/// The literal `name="..."` argument, if any.
pub fn project_name(content: &str) -> Option<String> {
    let re = Regex::new(r#"\bname\s*=\s*["']([^"']+)["']"#).ok()?;
    re.captures(content).map(|caps| caps[1].to_string())
}

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Result;
use serde::Deserialize;

use super::classify::group_for_extra;
use super::{constraint_from_toml, dependency_from_spec, read_manifest};
use crate::models::{Dependency, DependencyGroup};

#[derive(Debug, Default, Deserialize)]
struct Pyproject {
    project: Option<Project>,
    tool: Option<Tool>,
    /// PEP 735 groups; entries may also be `{ include-group = ".." }` tables.
    #[serde(default, rename = "dependency-groups")]
    dependency_groups: BTreeMap<String, Vec<toml::Value>>,
}

#[derive(Debug, Deserialize)]
struct Project {
    name: Option<String>,
    #[serde(default)]
    dependencies: Vec<String>,
    #[serde(default, rename = "optional-dependencies")]
    optional_dependencies: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct Tool {
    poetry: Option<Poetry>,
}

#[derive(Debug, Deserialize)]
struct Poetry {
    name: Option<String>,
    #[serde(default)]
    dependencies: toml::Table,
    #[serde(default, rename = "dev-dependencies")]
    dev_dependencies: toml::Table,
    #[serde(default)]
    group: BTreeMap<String, PoetryGroup>,
}

#[derive(Debug, Deserialize)]
struct PoetryGroup {
    #[serde(default)]
    dependencies: toml::Table,
}

/// Parse `pyproject.toml`: PEP 621 `[project]`, PEP 735 `[dependency-groups]`
/// and the Poetry `[tool.poetry]` tables.
pub fn parse(path: &Path) -> Result<Vec<Dependency>> {
    let content = read_manifest(path)?;
    parse_str(&content, path)
}

pub fn parse_str(content: &str, source: &Path) -> Result<Vec<Dependency>> {
    let pyproject: Pyproject = toml::from_str(content)?;
    let mut deps = Vec::new();

    if let Some(project) = &pyproject.project {
        deps.extend(
            project
                .dependencies
                .iter()
                .filter_map(|spec| dependency_from_spec(spec, DependencyGroup::Runtime, source)),
        );

        for (group_name, specs) in &project.optional_dependencies {
            let group = group_for_extra(group_name);
            deps.extend(
                specs
                    .iter()
                    .filter_map(|spec| dependency_from_spec(spec, group, source)),
            );
        }
    }

    if let Some(poetry) = pyproject.tool.as_ref().and_then(|t| t.poetry.as_ref()) {
        // `python` pins the interpreter, not a package
        deps.extend(
            poetry
                .dependencies
                .iter()
                .filter(|(name, _)| name.as_str() != "python")
                .map(|(name, spec)| {
                    Dependency::new(name, constraint_from_toml(spec), DependencyGroup::Runtime, source)
                }),
        );
        deps.extend(poetry.dev_dependencies.iter().map(|(name, spec)| {
            Dependency::new(name, constraint_from_toml(spec), DependencyGroup::Dev, source)
        }));

        for (group_name, group) in &poetry.group {
            let dep_group = group_for_extra(group_name);
            deps.extend(group.dependencies.iter().map(|(name, spec)| {
                Dependency::new(name, constraint_from_toml(spec), dep_group, source)
            }));
        }
    }

    for (group_name, entries) in &pyproject.dependency_groups {
        let group = group_for_extra(group_name);
        deps.extend(
            entries
                .iter()
                .filter_map(toml::Value::as_str)
                .filter_map(|spec| dependency_from_spec(spec, group, source)),
        );
    }

    Ok(deps)
}

/// Project name from `[project].name`, falling back to `[tool.poetry].name`.
pub fn project_name(content: &str) -> Option<String> {
    let pyproject: Pyproject = toml::from_str(content).ok()?;
    pyproject
        .project
        .and_then(|p| p.name)
        .or_else(|| pyproject.tool.and_then(|t| t.poetry).and_then(|p| p.name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find<'a>(deps: &'a [Dependency], name: &str) -> &'a Dependency {
        deps.iter().find(|d| d.name == name).unwrap()
    }

    #[test]
    fn test_pep621() {
        let content = r#"
[project]
name = "sample"
dependencies = ["requests>=2.31", "click"]

[project.optional-dependencies]
dev = ["pytest>=7"]
docs = ["sphinx"]
socks = ["PySocks!=1.5.7"]
"#;
        let deps = parse_str(content, Path::new("pyproject.toml")).unwrap();
        assert_eq!(deps.len(), 5);
        assert_eq!(deps[0].name, "requests");
        assert_eq!(deps[0].version_spec, ">=2.31");
        assert_eq!(deps[0].group, DependencyGroup::Runtime);
        assert_eq!(find(&deps, "click").group, DependencyGroup::Runtime);
        assert_eq!(find(&deps, "pytest").group, DependencyGroup::Dev);
        assert_eq!(find(&deps, "sphinx").group, DependencyGroup::Dev);
        assert_eq!(find(&deps, "PySocks").group, DependencyGroup::Optional);
        assert_eq!(project_name(content), Some("sample".to_string()));
    }

    #[test]
    fn test_poetry() {
        let content = r#"
[tool.poetry]
name = "poetry-app"

[tool.poetry.dependencies]
python = "^3.10"
httpx = "^0.27"
rich = { version = ">=13", extras = ["jupyter"] }

[tool.poetry.dev-dependencies]
black = "*"

[tool.poetry.group.test.dependencies]
pytest = "^8"

[tool.poetry.group.lint.dependencies]
ruff = "^0.5"

[tool.black]
line-length = 100
"#;
        let deps = parse_str(content, Path::new("pyproject.toml")).unwrap();
        assert_eq!(deps.len(), 5);
        assert!(deps.iter().all(|d| d.name != "python"));
        assert_eq!(find(&deps, "httpx").version_spec, "^0.27");
        assert_eq!(find(&deps, "rich").version_spec, ">=13");
        assert_eq!(find(&deps, "black").group, DependencyGroup::Dev);
        assert_eq!(find(&deps, "black").version_spec, "");
        assert_eq!(find(&deps, "pytest").group, DependencyGroup::Dev);
        assert_eq!(find(&deps, "ruff").group, DependencyGroup::Optional);
        assert_eq!(project_name(content), Some("poetry-app".to_string()));
    }

    #[test]
    fn test_dependency_groups() {
        let content = r#"
[dependency-groups]
test = ["pytest>=8", { include-group = "lint" }]
lint = ["ruff"]
"#;
        let deps = parse_str(content, Path::new("pyproject.toml")).unwrap();
        assert_eq!(deps.len(), 2);
        assert_eq!(find(&deps, "pytest").group, DependencyGroup::Dev);
        assert_eq!(find(&deps, "ruff").group, DependencyGroup::Optional);
    }

    #[test]
    fn test_build_system_only() {
        let content = "[build-system]\nrequires = [\"setuptools\"]\n";
        assert!(parse_str(content, Path::new("pyproject.toml")).unwrap().is_empty());
        assert_eq!(project_name(content), None);
    }

    #[test]
    fn test_malformed_is_error() {
        assert!(parse_str("[project\n", Path::new("pyproject.toml")).is_err());
    }
}

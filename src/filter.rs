use anyhow::Result;
use regex::Regex;

use crate::error::ReporterError;
use crate::models::{Dependency, DependencyGroup, FilterOptions};

/// Build and packaging tools that never ship inside a frozen executable.
pub const BUILD_TOOLS: &[&str] = &[
    "pip", "setuptools", "wheel", "build", "twine", "virtualenv", "venv",
    "pyinstaller", "pytest", "mypy", "black", "flake8", "isort", "coverage",
    "tox", "pre-commit", "sphinx", "mkdocs", "jupyter", "notebook",
    "ipython", "ipykernel", "conda", "mamba", "poetry", "pipenv", "flit",
    "hatch", "pdm", "bandit", "safety", "autopep8", "yapf", "pylint",
    "pydocstyle", "pycodestyle", "pyflakes", "mccabe",
];

/// Name prefixes of type-stub and typing helper packages. Matched case-sensitively.
pub const TYPE_STUB_PREFIXES: &[&str] = &["types-", "typing-extensions", "mypy-extensions", "stub-"];

/// Test frameworks and test helpers.
pub const TEST_PACKAGES: &[&str] = &[
    "pytest", "unittest2", "nose", "nose2", "testtools", "mock",
    "pytest-cov", "pytest-xdist", "pytest-mock", "factory-boy",
    "faker", "hypothesis", "tox", "coverage", "codecov",
];

/// A shell-style exclude pattern (`*`, `?`), matched case-insensitively
/// against the whole package name.
#[derive(Debug, Clone)]
pub struct ExcludePattern {
    regex: Regex,
}

impl ExcludePattern {
    pub fn new(pattern: &str) -> Result<Self> {
        let mut source = String::from("(?i)^");
        for c in pattern.chars() {
            match c {
                '*' => source.push_str(".*"),
                '?' => source.push('.'),
                other => source.push_str(&regex::escape(other.encode_utf8(&mut [0; 4]))),
            }
        }
        source.push('$');

        // Everything but the wildcards is escaped, so only the compiled size
        // limit can reject a pattern.
        let regex = Regex::new(&source).map_err(|e| ReporterError::InvalidPattern {
            pattern: pattern.to_string(),
            details: e.to_string(),
        })?;

        Ok(Self { regex })
    }

    pub fn matches(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }
}

/// Selection rules compiled from [`FilterOptions`].
#[derive(Debug)]
pub struct DependencyFilter {
    include_dev: bool,
    include_optional: bool,
    runtime_only: bool,
    exclude: Vec<ExcludePattern>,
}

impl DependencyFilter {
    pub fn new(options: &FilterOptions) -> Result<Self> {
        let exclude = options
            .exclude_patterns
            .iter()
            .map(|p| ExcludePattern::new(p))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            include_dev: options.include_dev,
            include_optional: options.include_optional,
            runtime_only: options.runtime_only,
            exclude,
        })
    }

    /// Whether `dep` survives every active rule. Rules are checked in order
    /// and the first that rejects wins.
    pub fn keeps(&self, dep: &Dependency) -> bool {
        if self.exclude.iter().any(|p| p.matches(&dep.name)) {
            return false;
        }
        if self.runtime_only && dep.group != DependencyGroup::Runtime {
            return false;
        }
        if dep.group == DependencyGroup::Dev && !self.include_dev {
            return false;
        }
        if dep.group == DependencyGroup::Optional && !self.include_optional {
            return false;
        }
        if self.runtime_only {
            let lower = dep.name.to_lowercase();
            if BUILD_TOOLS.contains(&lower.as_str()) {
                return false;
            }
            if TYPE_STUB_PREFIXES.iter().any(|p| dep.name.starts_with(p)) {
                return false;
            }
            if TEST_PACKAGES.contains(&lower.as_str()) {
                return false;
            }
        }
        true
    }

    /// Keep the surviving dependencies, preserving their order.
    pub fn apply(&self, deps: Vec<Dependency>) -> Vec<Dependency> {
        deps.into_iter().filter(|d| self.keeps(d)).collect()
    }
}

/// Filter `deps` according to `options`.
pub fn filter_dependencies(deps: Vec<Dependency>, options: &FilterOptions) -> Result<Vec<Dependency>> {
    Ok(DependencyFilter::new(options)?.apply(deps))
}

/// The build-tool denylist, sorted, as listed in runtime-only reports.
pub fn excluded_build_tools() -> Vec<String> {
    let mut tools: Vec<String> = BUILD_TOOLS.iter().map(|t| t.to_string()).collect();
    tools.sort();
    tools
}

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::str::contains;
use serde_json::Value;
use tempfile::TempDir;

/// A project directory plus an isolated HOME so no user config or user
/// site-packages leak into the run.
struct Fixture {
    project: TempDir,
    home: TempDir,
}

impl Fixture {
    fn new() -> Self {
        Self {
            project: TempDir::new().unwrap(),
            home: TempDir::new().unwrap(),
        }
    }

    fn write(&self, name: &str, content: &str) -> &Self {
        fs::write(self.project.path().join(name), content).unwrap();
        self
    }

    fn path(&self) -> &Path {
        self.project.path()
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("license-reporter").unwrap();
        cmd.env("HOME", self.home.path())
            .env_remove("VIRTUAL_ENV")
            .arg(self.path());
        cmd
    }

    fn run_json(&self, args: &[&str]) -> Value {
        let out = self
            .cmd()
            .args(["--format", "json"])
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }
}

fn requirements_project() -> Fixture {
    let fixture = Fixture::new();
    fixture
        .write("requirements.txt", "requests==2.31.0\n")
        .write("requirements-dev.txt", "pytest\n");
    fixture
}

fn package_names(report: &Value) -> Vec<String> {
    report["packages"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn default_run_reports_runtime_only() {
    let report = requirements_project().run_json(&[]);
    assert_eq!(package_names(&report), vec!["requests"]);
    assert_eq!(report["summary"]["total_packages"], 1);
    assert_eq!(report["summary"]["runtime_packages"], 1);
    assert_eq!(report["packages"][0]["version_spec"], "==2.31.0");
    assert_eq!(report["packages"][0]["license"], "unknown");
    assert_eq!(report["report_type"], "Runtime Dependencies");
    assert_eq!(report["dependency_files"].as_array().unwrap().len(), 2);
}

#[test]
fn include_dev_adds_dev_requirements() {
    let report = requirements_project().run_json(&["--include-dev"]);
    assert_eq!(package_names(&report), vec!["pytest", "requests"]);
    assert_eq!(report["summary"]["total_packages"], 2);
    assert_eq!(report["summary"]["runtime_packages"], 1);
    assert_eq!(report["summary"]["dev_packages"], 1);
    assert_eq!(report["packages"][0]["dependency_type"], "dev");
}

#[test]
fn runtime_only_overrides_include_dev() {
    let report = requirements_project().run_json(&["--runtime-only", "--include-dev"]);
    assert_eq!(package_names(&report), vec!["requests"]);
    assert_eq!(report["filters_applied"]["runtime_only"], true);
    assert_eq!(report["filters_applied"]["include_dev"], false);
    assert!(!report["excluded_build_tools"].as_array().unwrap().is_empty());
}

#[test]
fn exclude_patterns_are_applied() {
    let fixture = Fixture::new();
    fixture.write("requirements.txt", "requests\npytest-mock\ntestfixtures\n");
    let report = fixture.run_json(&["--exclude", "test*"]);
    assert_eq!(package_names(&report), vec!["pytest-mock", "requests"]);

    let report = fixture.run_json(&["--exclude", "*mock*, test*"]);
    assert_eq!(package_names(&report), vec!["requests"]);
}

#[test]
fn metadata_from_site_packages() {
    let fixture = requirements_project();
    let dist = fixture
        .home
        .path()
        .join("site")
        .join("requests-2.31.0.dist-info");
    fs::create_dir_all(&dist).unwrap();
    fs::write(
        dist.join("METADATA"),
        "Name: requests\nVersion: 2.31.0\nLicense: Apache 2.0\nAuthor: Kenneth Reitz\n",
    )
    .unwrap();
    let site = fixture.home.path().join("site");

    let report = fixture.run_json(&["--site-packages", site.to_str().unwrap()]);
    assert_eq!(report["packages"][0]["version"], "2.31.0");
    assert_eq!(report["packages"][0]["license"], "Apache 2.0");
    assert_eq!(report["packages"][0]["requires_attribution"], true);
    assert_eq!(report["summary"]["unknown_licenses"], 0);
}

#[test]
fn project_name_detection_and_override() {
    let fixture = Fixture::new();
    fixture.write(
        "pyproject.toml",
        "[project]\nname = \"sample-app\"\ndependencies = [\"click>=8\"]\n",
    );
    assert_eq!(fixture.run_json(&[])["project"], "sample-app");
    assert_eq!(
        fixture.run_json(&["--project-name", "Other"])["project"],
        "Other"
    );
}

#[test]
fn blank_project_name_falls_back_to_detection() {
    let fixture = Fixture::new();
    fixture.write("pyproject.toml", "[project]\nname = \"sample-app\"\n");
    assert_eq!(
        fixture.run_json(&["--project-name", ""])["project"],
        "sample-app"
    );
}

#[test]
fn legacy_mode_is_runtime_only() {
    let report = requirements_project().run_json(&["--legacy-mode", "--include-dev"]);
    assert_eq!(report["project"], "OSI (Open Source Installer)");
    assert_eq!(report["report_type"], "Runtime Dependencies (PyInstaller Bundled)");
    assert_eq!(package_names(&report), vec!["requests"]);
}

#[test]
fn text_report_on_stdout() {
    requirements_project()
        .cmd()
        .assert()
        .success()
        .stdout(contains("THIRD-PARTY SOFTWARE LICENSES"))
        .stdout(contains("Package: requests"))
        .stdout(contains("Version Spec: ==2.31.0"));
}

#[test]
fn markdown_report() {
    requirements_project()
        .cmd()
        .args(["--format", "markdown", "--all-deps"])
        .assert()
        .success()
        .stdout(contains("# Third-Party Software Licenses"))
        .stdout(contains("| pytest | unknown | dev | unknown | Yes |"))
        .stdout(contains("### requests"));
}

#[test]
fn output_file_is_written() {
    let fixture = requirements_project();
    let out = fixture.home.path().join("THIRD_PARTY_LICENSES.txt");
    fixture
        .cmd()
        .args(["--output", out.to_str().unwrap()])
        .assert()
        .success()
        .stdout("")
        .stderr(contains("License report written to"))
        .stderr(contains("Analyzed 1 packages"));

    let content = fs::read_to_string(&out).unwrap();
    assert!(content.starts_with(&"=".repeat(80)));
    assert!(content.contains("Package: requests"));
}

#[test]
fn malformed_manifest_is_a_warning() {
    let fixture = requirements_project();
    fixture.write("pyproject.toml", "[project\n");
    fixture
        .cmd()
        .args(["--format", "json"])
        .assert()
        .success()
        .stderr(contains("warning:"))
        .stderr(contains("pyproject.toml"));
}

#[test]
fn config_file_supplies_defaults() {
    let fixture = requirements_project();
    let config_dir = fixture.path().join(".license-reporter");
    fs::create_dir(&config_dir).unwrap();
    fs::write(
        config_dir.join("config.toml"),
        "[report]\nformat = \"markdown\"\nproject_name = \"Configured\"\n",
    )
    .unwrap();

    fixture
        .cmd()
        .assert()
        .success()
        .stdout(contains("**Project:** Configured"));
}

#[test]
fn empty_project_succeeds() {
    let report = Fixture::new().run_json(&[]);
    assert_eq!(report["summary"]["total_packages"], 0);
    assert!(report["packages"].as_array().unwrap().is_empty());
}

#[test]
fn missing_project_path_exits_1() {
    let home = TempDir::new().unwrap();
    Command::cargo_bin("license-reporter")
        .unwrap()
        .env("HOME", home.path())
        .arg("/nonexistent/path/that/does/not/exist")
        .assert()
        .code(1)
        .stderr(contains("does not exist"));
}

#[test]
fn unwritable_output_exits_1() {
    let fixture = requirements_project();
    let out = fixture.home.path().join("missing-dir").join("report.txt");
    fixture
        .cmd()
        .args(["--output", out.to_str().unwrap()])
        .assert()
        .code(1)
        .stderr(contains("error writing to"));
}

#[test]
fn invalid_format_exits_2() {
    requirements_project()
        .cmd()
        .args(["--format", "pdf"])
        .assert()
        .code(2);
}

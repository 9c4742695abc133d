use std::path::{Path, PathBuf};

use crate::manifest::ManifestKind;

/// Recognized manifest filenames, in the order they are consulted.
const CANDIDATES: &[(&str, ManifestKind)] = &[
    ("requirements.txt", ManifestKind::Requirements),
    ("setup.py", ManifestKind::SetupScript),
    ("setup.cfg", ManifestKind::SetupConfig),
    ("pyproject.toml", ManifestKind::Pyproject),
    ("Pipfile", ManifestKind::Pipfile),
    ("environment.yml", ManifestKind::CondaEnvironment),
    ("environment.yaml", ManifestKind::CondaEnvironment),
    ("conda.yml", ManifestKind::CondaEnvironment),
    ("requirements-dev.txt", ManifestKind::Requirements),
    ("dev-requirements.txt", ManifestKind::Requirements),
    ("test-requirements.txt", ManifestKind::Requirements),
];

/// A manifest file found under the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    pub file_name: &'static str,
    pub path: PathBuf,
    pub kind: ManifestKind,
}

/// Find the known dependency manifests that exist directly under `root`.
///
/// Returns an empty list when none are present.
pub fn discover_manifests(root: &Path) -> Vec<Manifest> {
    CANDIDATES
        .iter()
        .filter_map(|&(file_name, kind)| {
            let path = root.join(file_name);
            path.is_file().then_some(Manifest {
                file_name,
                path,
                kind,
            })
        })
        .collect()
}

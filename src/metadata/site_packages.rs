use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::dist_info::parse_metadata;
use super::{normalize_name, MetadataLookup};
use crate::models::InstalledMetadata;

/// Index of installed distributions, keyed by normalized name.
///
/// Directories are indexed in priority order; the first distribution found
/// for a name wins.
#[derive(Debug, Default)]
pub struct SitePackagesIndex {
    entries: HashMap<String, PathBuf>,
    searched: Vec<PathBuf>,
}

impl SitePackagesIndex {
    /// Locate site-packages directories for `project_root`, in order:
    ///
    /// 1. `extra_dirs` (each used as-is and as an environment root)
    /// 2. `$VIRTUAL_ENV`
    /// 3. `<project>/.venv`, `<project>/venv`
    /// 4. the user site under `~/.local`
    pub fn discover(project_root: &Path, extra_dirs: &[PathBuf]) -> Self {
        let mut candidates = Vec::new();

        for dir in extra_dirs {
            candidates.push(dir.clone());
            candidates.extend(env_site_dirs(dir));
        }
        if let Some(venv) = std::env::var_os("VIRTUAL_ENV") {
            candidates.extend(env_site_dirs(Path::new(&venv)));
        }
        for name in [".venv", "venv"] {
            candidates.extend(env_site_dirs(&project_root.join(name)));
        }
        if let Some(home) = dirs::home_dir() {
            candidates.extend(env_site_dirs(&home.join(".local")));
        }

        Self::from_dirs(candidates)
    }

    /// Build an index over exactly the given site-packages directories.
    pub fn from_dirs(site_dirs: impl IntoIterator<Item = PathBuf>) -> Self {
        let mut index = Self::default();
        for dir in site_dirs {
            if dir.is_dir() && !index.searched.contains(&dir) {
                index.index_dir(&dir);
                index.searched.push(dir);
            }
        }
        index
    }

    /// Directories that were indexed.
    pub fn searched(&self) -> &[PathBuf] {
        &self.searched
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn index_dir(&mut self, dir: &Path) {
        let Ok(read) = fs::read_dir(dir) else {
            return;
        };
        let mut paths: Vec<PathBuf> = read.filter_map(|e| e.ok()).map(|e| e.path()).collect();
        paths.sort();

        for path in paths {
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let (stem, metadata_file) = if let Some(stem) = file_name.strip_suffix(".dist-info") {
                (stem, path.join("METADATA"))
            } else if let Some(stem) = file_name.strip_suffix(".egg-info") {
                let file = if path.is_dir() { path.join("PKG-INFO") } else { path.clone() };
                (stem, file)
            } else {
                continue;
            };

            if !metadata_file.is_file() {
                continue;
            }
            // `<name>-<version>`; distribution names in these directories never contain `-`
            let name = stem.split_once('-').map(|(n, _)| n).unwrap_or(stem);
            self.entries
                .entry(normalize_name(name))
                .or_insert(metadata_file);
        }
    }
}

impl MetadataLookup for SitePackagesIndex {
    fn lookup(&self, name: &str) -> InstalledMetadata {
        self.entries
            .get(&normalize_name(name))
            .and_then(|path| fs::read_to_string(path).ok())
            .map(|content| parse_metadata(&content))
            .unwrap_or_default()
    }
}

/// `lib/python*/site-packages` and `Lib/site-packages` under an environment root.
fn env_site_dirs(root: &Path) -> Vec<PathBuf> {
    let mut found = Vec::new();

    if let Ok(read) = fs::read_dir(root.join("lib")) {
        let mut pythons: Vec<PathBuf> = read
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().starts_with("python"))
            .map(|e| e.path().join("site-packages"))
            .filter(|p| p.is_dir())
            .collect();
        pythons.sort();
        found.extend(pythons);
    }

    let windows = root.join("Lib").join("site-packages");
    if windows.is_dir() {
        found.push(windows);
    }

    found
}

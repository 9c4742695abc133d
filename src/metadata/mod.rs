//! Installed package metadata.
//!
//! - [`dist_info`]: parses `METADATA` / `PKG-INFO` headers.
//! - [`site_packages`]: indexes the site-packages directories of local
//!   Python environments and implements [`MetadataLookup`] over them.

use crate::models::InstalledMetadata;

pub mod dist_info;
pub mod site_packages;

/// Source of installed-package metadata.
///
/// A miss is not an error: implementations return [`InstalledMetadata::default`],
/// whose fields are all `"unknown"`.
pub trait MetadataLookup {
    fn lookup(&self, name: &str) -> InstalledMetadata;
}

/// PEP 503 name normalization: lowercase, runs of `-`, `_`, `.` become `-`.
pub fn normalize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_sep = false;
    for c in name.trim().chars() {
        if matches!(c, '-' | '_' | '.') {
            pending_sep = true;
            continue;
        }
        if pending_sep && !out.is_empty() {
            out.push('-');
        }
        pending_sep = false;
        out.extend(c.to_lowercase());
    }
    out
}

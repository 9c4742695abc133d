//! Group assignment rules shared by all manifest dialects.

use crate::models::DependencyGroup;

/// Filename substrings that mark a requirements file as non-runtime.
const FILENAME_GROUPS: &[(&str, DependencyGroup)] = &[
    ("dev", DependencyGroup::Dev),
    ("development", DependencyGroup::Dev),
    ("test", DependencyGroup::Dev),
    ("testing", DependencyGroup::Dev),
    ("doc", DependencyGroup::Dev),
    ("docs", DependencyGroup::Dev),
];

/// Extra / group names whose members are development dependencies.
const DEV_GROUP_NAMES: &[&str] = &["dev", "test", "docs"];

/// Group for every entry of a requirements file, inferred from its filename.
pub fn group_for_filename(file_name: &str) -> DependencyGroup {
    let lower = file_name.to_lowercase();
    FILENAME_GROUPS
        .iter()
        .find(|(needle, _)| lower.contains(needle))
        .map(|&(_, group)| group)
        .unwrap_or(DependencyGroup::Runtime)
}

/// Group for a named extra (optional-dependency table, Poetry group, ...).
pub fn group_for_extra(name: &str) -> DependencyGroup {
    if DEV_GROUP_NAMES.contains(&name) {
        DependencyGroup::Dev
    } else {
        DependencyGroup::Optional
    }
}

/// License families that carry no attribution obligation. Checked first.
const NO_ATTRIBUTION: &[&str] = &["public domain", "unlicense", "wtfpl"];

/// License families that require reproducing the notice.
const ATTRIBUTION_REQUIRED: &[&str] = &[
    "mit",
    "bsd",
    "apache",
    "isc",
    "mpl",
    "mozilla",
    "creative commons",
    "cc-by",
];

/// Whether redistributing a package under `license` requires attribution.
///
/// Matching is by case-insensitive substring. Anything not recognized,
/// including `"unknown"` and the empty string, requires attribution.
pub fn requires_attribution(license: &str) -> bool {
    let lower = license.to_lowercase();

    if NO_ATTRIBUTION.iter().any(|needle| lower.contains(needle)) {
        return false;
    }
    if ATTRIBUTION_REQUIRED.iter().any(|needle| lower.contains(needle)) {
        return true;
    }
    true
}

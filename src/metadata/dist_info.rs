use crate::models::{InstalledMetadata, UNKNOWN};

/// Parse the header block of a core-metadata file (`METADATA`, `PKG-INFO`).
///
/// Fallbacks, first usable value wins:
/// - license: `License` (first line), `License-Expression`, last segment of a
///   `License ::` classifier
/// - author: `Author`, `Author-email`, `Maintainer`
/// - homepage: `Home-page`, `Project-URL` labelled homepage/home, first `Project-URL`
pub fn parse_metadata(content: &str) -> InstalledMetadata {
    let headers = parse_headers(content);
    let first = |key: &str| -> Option<String> {
        headers
            .iter()
            .filter(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| first_line(v))
            .find(|v| usable(v))
    };

    let license_classifier = headers
        .iter()
        .filter(|(k, _)| k.eq_ignore_ascii_case("Classifier"))
        .filter_map(|(_, v)| v.strip_prefix("License ::"))
        .filter_map(|v| v.rsplit("::").next())
        .map(|v| v.trim().to_string())
        .find(|v| usable(v));

    let project_urls: Vec<(String, String)> = headers
        .iter()
        .filter(|(k, _)| k.eq_ignore_ascii_case("Project-URL"))
        .filter_map(|(_, v)| v.split_once(','))
        .map(|(label, url)| (label.trim().to_lowercase(), url.trim().to_string()))
        .collect();
    let labelled_home = project_urls
        .iter()
        .find(|(label, _)| label == "homepage" || label == "home")
        .map(|(_, url)| url.clone());
    let first_url = project_urls.first().map(|(_, url)| url.clone());

    InstalledMetadata {
        version: first("Version").unwrap_or_else(unknown),
        license: first("License")
            .or_else(|| first("License-Expression"))
            .or(license_classifier)
            .unwrap_or_else(unknown),
        author: first("Author")
            .or_else(|| first("Author-email"))
            .or_else(|| first("Maintainer"))
            .unwrap_or_else(unknown),
        homepage: first("Home-page")
            .or(labelled_home)
            .or(first_url)
            .unwrap_or_else(unknown),
    }
}

/// RFC 822 style headers up to the first blank line; continuation lines are
/// folded into the previous value.
fn parse_headers(content: &str) -> Vec<(String, String)> {
    let mut headers: Vec<(String, String)> = Vec::new();

    for line in content.lines() {
        if line.trim().is_empty() {
            break;
        }
        if line.starts_with(char::is_whitespace) {
            if let Some((_, value)) = headers.last_mut() {
                value.push('\n');
                value.push_str(line.trim());
            }
            continue;
        }
        if let Some((key, value)) = line.split_once(':') {
            headers.push((key.trim().to_string(), value.trim().to_string()));
        }
    }

    headers
}

fn first_line(value: &str) -> String {
    value.lines().next().unwrap_or_default().trim().to_string()
}

fn usable(value: &str) -> bool {
    !value.is_empty() && !value.eq_ignore_ascii_case(UNKNOWN) && value != "None"
}

fn unknown() -> String {
    UNKNOWN.to_string()
}

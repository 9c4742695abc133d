use anyhow::Result;

use crate::models::Report;

/// Serialize the report as pretty-printed JSON.
pub fn render(report: &Report) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

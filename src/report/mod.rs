//! Report assembly and rendering.
//!
//! - [`assemble`]: merges filtered dependencies with installed metadata into a [`Report`].
//! - [`text`]: plain-text attribution document.
//! - [`markdown`]: Markdown mirror of the text layout with a summary table.
//! - [`json`]: the report as pretty-printed JSON.

use anyhow::Result;

use crate::cli::OutputFormat;
use crate::models::Report;

pub mod assemble;
pub mod json;
pub mod markdown;
pub mod text;

/// Render `report` in the requested format.
pub fn render(report: &Report, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(text::render(report)),
        OutputFormat::Json => json::render(report),
        OutputFormat::Markdown => Ok(markdown::render(report)),
    }
}

/// Label for a yes/no flag in rendered reports.
pub(crate) fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

//! Packaging specification document generation.
//!
//! A specification snapshot is first assembled into a [`Document`] of six
//! numbered sections, then rendered as:
//!
//! - **Text**: indented plain text for terminals and diffs
//! - **XHTML**: a standalone page for printing and export

mod document;
mod html;
mod text;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use pkspec_model::PackagingSpecification;

pub use document::{Block, DEFAULT_TITLE, Document, RenderOptions, Row, Section, build_document};
pub use html::render_html;
pub use text::render_text;

/// Output format of [`write_report`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Html,
}

impl ReportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ReportFormat::Text => "txt",
            ReportFormat::Html => "xhtml",
        }
    }
}

/// Render `specification` in `format`.
pub fn render_report(
    specification: &PackagingSpecification,
    options: &RenderOptions,
    format: ReportFormat,
) -> Result<String> {
    let document = build_document(specification, options);
    match format {
        ReportFormat::Text => Ok(render_text(&document)),
        ReportFormat::Html => render_html(&document),
    }
}

/// Render `specification` and write it to `output_path`.
pub fn write_report(
    output_path: &Path,
    specification: &PackagingSpecification,
    options: &RenderOptions,
    format: ReportFormat,
) -> Result<()> {
    let rendered = render_report(specification, options, format)?;
    if let Some(parent) = output_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    fs::write(output_path, rendered)
        .with_context(|| format!("write {}", output_path.display()))?;
    tracing::info!("Wrote report to {}", output_path.display());
    Ok(())
}

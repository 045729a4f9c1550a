//! Report persistence.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::html::render_html;
use crate::markdown::render_markdown;
use crate::report::Report;

pub const REPORT_SCHEMA: &str = "dq-pack.quality-report";
pub const REPORT_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Serialize)]
struct ReportPayload<'a> {
    schema: &'static str,
    schema_version: u32,
    #[serde(flatten)]
    report: &'a Report,
}

/// Destination of each rendered report format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub markdown: PathBuf,
    pub html: PathBuf,
    pub json: PathBuf,
}

impl ReportPaths {
    /// `<dir>/<dataset>_dq_report_<run_id>.{md,html,json}`
    pub fn in_dir(dir: &Path, dataset: &str, run_id: &str) -> Self {
        let stem = format!("{dataset}_dq_report_{run_id}");
        Self {
            markdown: dir.join(format!("{stem}.md")),
            html: dir.join(format!("{stem}.html")),
            json: dir.join(format!("{stem}.json")),
        }
    }
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    Ok(())
}

fn write_text(path: &Path, contents: &str) -> Result<()> {
    ensure_parent(path)?;
    fs::write(path, contents).with_context(|| format!("write {}", path.display()))
}

/// Writes the machine-readable report, tagged with its schema name and version.
pub fn write_report_json(report: &Report, path: &Path) -> Result<()> {
    let payload = ReportPayload {
        schema: REPORT_SCHEMA,
        schema_version: REPORT_SCHEMA_VERSION,
        report,
    };
    let json = serde_json::to_string_pretty(&payload).context("serialize report json")?;
    write_text(path, &format!("{json}\n"))
}

/// Writes the Markdown, HTML and JSON renderings of `report`.
pub fn write_report_outputs(report: &Report, paths: &ReportPaths) -> Result<()> {
    write_text(&paths.markdown, &render_markdown(report)?)?;
    let html = render_html(report).context("render html report")?;
    write_text(&paths.html, &html)?;
    write_report_json(report, &paths.json)?;
    info!(
        markdown = %paths.markdown.display(),
        html = %paths.html.display(),
        json = %paths.json.display(),
        "wrote reports"
    );
    Ok(())
}

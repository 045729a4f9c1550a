//! Markdown rendering.

use std::fmt::Write as _;

use anyhow::{Context, Result};
use dq_model::ColumnProfile;

use crate::profile::sorted_for_display;
use crate::report::{FAILED_SAMPLE_LIMIT, FailedSample, Report};

/// Escapes a value for a Markdown table cell.
fn cell(value: &str) -> String {
    value.replace('|', "\\|").replace(['\r', '\n'], " ")
}

fn table_row<I, S>(cells: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let cells: Vec<String> = cells.into_iter().map(|value| cell(value.as_ref())).collect();
    format!("| {} |", cells.join(" | "))
}

pub(crate) fn metadata_entries(report: &Report) -> Vec<(&'static str, String)> {
    let meta = &report.metadata;
    let summary = &report.summary;
    vec![
        ("dataset", meta.dataset.to_string()),
        ("run_id", meta.run_id.clone()),
        (
            "generated_at",
            meta.generated_at.format("%Y-%m-%dT%H:%M:%S").to_string(),
        ),
        ("raw_rows", summary.raw_rows.to_string()),
        ("clean_rows", summary.clean_rows.to_string()),
        ("raw_cols", summary.raw_cols.to_string()),
        ("clean_cols", summary.clean_cols.to_string()),
        ("failed_rules", summary.failed_rules.to_string()),
        ("total_rules", summary.total_rules.to_string()),
    ]
}

pub(crate) fn format_rate(rate: f64) -> String {
    format!("{rate:.3}")
}

/// Renders the full report as Markdown.
pub fn render_markdown(report: &Report) -> Result<String> {
    let mut out = String::new();
    write_markdown(&mut out, report).context("render markdown report")?;
    Ok(out)
}

fn write_markdown(out: &mut String, report: &Report) -> std::fmt::Result {
    writeln!(out, "# Data Quality Report: {}", report.metadata.dataset)?;
    writeln!(out)?;
    writeln!(out, "## Run metadata")?;
    writeln!(out)?;
    for (key, value) in metadata_entries(report) {
        writeln!(out, "- **{key}**: {value}")?;
    }
    writeln!(out)?;

    writeln!(out, "## Validation results")?;
    writeln!(out)?;
    writeln!(out, "| Rule | Severity | Status | Failed | Description |")?;
    writeln!(out, "|---|---|---:|---:|---|")?;
    for result in &report.results {
        writeln!(
            out,
            "{}",
            table_row([
                result.rule_id.as_str(),
                result.severity.as_str(),
                result.status.as_str(),
                result.failed_count.to_string().as_str(),
                result.description.as_str(),
            ])
        )?;
    }
    writeln!(out)?;

    writeln!(
        out,
        "### Failed samples (up to {FAILED_SAMPLE_LIMIT} rows per rule)"
    )?;
    writeln!(out)?;
    for result in report.failed_results() {
        writeln!(
            out,
            "#### {}: {} ({})",
            result.rule_id, result.description, result.severity
        )?;
        writeln!(out)?;
        match report.sample_for(&result.rule_id) {
            Some(sample) if !sample.rows.is_empty() => write_sample(out, sample)?,
            _ => writeln!(out, "_No sample available._")?,
        }
        writeln!(out)?;
    }

    writeln!(out, "## Column profile (raw)")?;
    writeln!(out)?;
    write_profile(out, &report.raw_profile)?;
    writeln!(out)?;
    writeln!(out, "## Column profile (clean)")?;
    writeln!(out)?;
    write_profile(out, &report.clean_profile)?;
    writeln!(out)?;

    let meta = &report.metadata;
    writeln!(out, "## Artifacts")?;
    writeln!(out)?;
    writeln!(out, "- Raw input: `{}`", meta.input_path.display())?;
    writeln!(out, "- Clean output: `{}`", meta.clean_path.display())?;
    writeln!(out, "- Log: `{}`", meta.log_path.display())?;
    Ok(())
}

fn write_sample(out: &mut String, sample: &FailedSample) -> std::fmt::Result {
    let header = std::iter::once("row").chain(sample.columns.iter().map(String::as_str));
    writeln!(out, "{}", table_row(header))?;
    writeln!(
        out,
        "|{}",
        "---|".repeat(sample.columns.len() + 1)
    )?;
    for row in &sample.rows {
        let cells = std::iter::once(row.row.to_string()).chain(row.values.iter().cloned());
        writeln!(out, "{}", table_row(cells))?;
    }
    Ok(())
}

fn write_profile(out: &mut String, profiles: &[ColumnProfile]) -> std::fmt::Result {
    writeln!(out, "| column | type | null_rate | distinct | sample_values |")?;
    writeln!(out, "|---|---|---:|---:|---|")?;
    for profile in sorted_for_display(profiles) {
        writeln!(
            out,
            "{}",
            table_row([
                profile.name.as_str(),
                profile.inferred_type.as_str(),
                format_rate(profile.null_rate).as_str(),
                profile.distinct_count.to_string().as_str(),
                profile.sample_values.join(", ").as_str(),
            ])
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_escape_pipes_and_newlines() {
        assert_eq!(cell("a|b\nc"), "a\\|b c");
        assert_eq!(table_row(["x", "y|z"]), "| x | y\\|z |");
    }
}

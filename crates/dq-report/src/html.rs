//! Standalone HTML rendering.

use anyhow::{Context, Result};
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

use dq_model::{ColumnProfile, RuleStatus};

use crate::markdown::{format_rate, metadata_entries};
use crate::profile::sorted_for_display;
use crate::report::{FAILED_SAMPLE_LIMIT, FailedSample, Report};

const STYLE: &str = "
body { font-family: -apple-system, BlinkMacSystemFont, Segoe UI, Roboto, Arial, sans-serif; margin: 24px; line-height: 1.45; }
h1, h2, h3, h4 { margin-top: 1.2em; }
code { background: #f6f8fa; padding: 2px 4px; border-radius: 4px; }
table { border-collapse: collapse; width: 100%; margin: 12px 0; }
th, td { border: 1px solid #e5e7eb; padding: 8px; font-size: 13px; vertical-align: top; }
th { background: #f3f4f6; text-align: left; }
.badge-pass { color: #065f46; font-weight: 600; }
.badge-fail { color: #991b1b; font-weight: 600; }
.small { color: #6b7280; font-size: 12px; }
";

type HtmlWriter = Writer<Vec<u8>>;

fn start(xml: &mut HtmlWriter, name: &str) -> Result<()> {
    xml.write_event(Event::Start(BytesStart::new(name)))?;
    Ok(())
}

fn start_with_class(xml: &mut HtmlWriter, name: &str, class: &str) -> Result<()> {
    let mut element = BytesStart::new(name);
    element.push_attribute(("class", class));
    xml.write_event(Event::Start(element))?;
    Ok(())
}

fn end(xml: &mut HtmlWriter, name: &str) -> Result<()> {
    xml.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn text(xml: &mut HtmlWriter, value: &str) -> Result<()> {
    xml.write_event(Event::Text(BytesText::new(value)))?;
    Ok(())
}

fn element(xml: &mut HtmlWriter, name: &str, value: &str) -> Result<()> {
    start(xml, name)?;
    text(xml, value)?;
    end(xml, name)
}

fn code_element(xml: &mut HtmlWriter, name: &str, value: &str) -> Result<()> {
    start(xml, name)?;
    element(xml, "code", value)?;
    end(xml, name)
}

fn header_row(xml: &mut HtmlWriter, headers: &[&str]) -> Result<()> {
    start(xml, "thead")?;
    start(xml, "tr")?;
    for header in headers {
        element(xml, "th", header)?;
    }
    end(xml, "tr")?;
    end(xml, "thead")
}

/// Renders the full report as a self-contained HTML page.
pub fn render_html(report: &Report) -> Result<String> {
    let mut xml = Writer::new_with_indent(Vec::new(), b' ', 2);
    let title = format!("Data Quality Report: {}", report.metadata.dataset);

    xml.write_event(Event::DocType(BytesText::from_escaped("html")))?;
    let mut html = BytesStart::new("html");
    html.push_attribute(("lang", "en"));
    xml.write_event(Event::Start(html))?;

    start(&mut xml, "head")?;
    let mut charset = BytesStart::new("meta");
    charset.push_attribute(("charset", "utf-8"));
    xml.write_event(Event::Empty(charset))?;
    let mut viewport = BytesStart::new("meta");
    viewport.push_attribute(("name", "viewport"));
    viewport.push_attribute(("content", "width=device-width, initial-scale=1"));
    xml.write_event(Event::Empty(viewport))?;
    element(&mut xml, "title", &title)?;
    start(&mut xml, "style")?;
    xml.write_event(Event::Text(BytesText::from_escaped(STYLE)))?;
    end(&mut xml, "style")?;
    end(&mut xml, "head")?;

    start(&mut xml, "body")?;
    element(&mut xml, "h1", &title)?;
    start_with_class(&mut xml, "p", "small")?;
    text(&mut xml, "Run ID: ")?;
    element(&mut xml, "code", &report.metadata.run_id)?;
    text(
        &mut xml,
        &format!(
            " | Generated: {}",
            report.metadata.generated_at.format("%Y-%m-%dT%H:%M:%S")
        ),
    )?;
    end(&mut xml, "p")?;

    element(&mut xml, "h2", "Run metadata")?;
    start(&mut xml, "ul")?;
    for (key, value) in metadata_entries(report) {
        start(&mut xml, "li")?;
        element(&mut xml, "b", key)?;
        text(&mut xml, &format!(": {value}"))?;
        end(&mut xml, "li")?;
    }
    end(&mut xml, "ul")?;

    write_results(&mut xml, report)?;
    write_samples(&mut xml, report)?;

    element(&mut xml, "h2", "Column profile (raw)")?;
    write_profile(&mut xml, &report.raw_profile)?;
    element(&mut xml, "h2", "Column profile (clean)")?;
    write_profile(&mut xml, &report.clean_profile)?;

    let meta = &report.metadata;
    element(&mut xml, "h2", "Artifacts")?;
    start(&mut xml, "ul")?;
    for (label, path) in [
        ("Raw input: ", &meta.input_path),
        ("Clean output: ", &meta.clean_path),
        ("Log: ", &meta.log_path),
    ] {
        start(&mut xml, "li")?;
        text(&mut xml, label)?;
        element(&mut xml, "code", &path.display().to_string())?;
        end(&mut xml, "li")?;
    }
    end(&mut xml, "ul")?;

    end(&mut xml, "body")?;
    end(&mut xml, "html")?;

    let mut html = String::from_utf8(xml.into_inner()).context("report html is not utf-8")?;
    html.push('\n');
    Ok(html)
}

fn write_results(xml: &mut HtmlWriter, report: &Report) -> Result<()> {
    element(xml, "h2", "Validation results")?;
    start(xml, "table")?;
    header_row(xml, &["Rule", "Severity", "Status", "Failed", "Description"])?;
    start(xml, "tbody")?;
    for result in &report.results {
        start(xml, "tr")?;
        code_element(xml, "td", &result.rule_id)?;
        element(xml, "td", result.severity.as_str())?;
        let badge = match result.status {
            RuleStatus::Pass => "badge-pass",
            RuleStatus::Fail => "badge-fail",
        };
        start_with_class(xml, "td", badge)?;
        text(xml, result.status.as_str())?;
        end(xml, "td")?;
        element(xml, "td", &result.failed_count.to_string())?;
        element(xml, "td", &result.description)?;
        end(xml, "tr")?;
    }
    end(xml, "tbody")?;
    end(xml, "table")
}

fn write_samples(xml: &mut HtmlWriter, report: &Report) -> Result<()> {
    element(
        xml,
        "h3",
        &format!("Failed samples (up to {FAILED_SAMPLE_LIMIT} rows per rule)"),
    )?;
    for result in report.failed_results() {
        start(xml, "h4")?;
        element(xml, "code", &result.rule_id)?;
        text(
            xml,
            &format!(": {} ({})", result.description, result.severity),
        )?;
        end(xml, "h4")?;
        match report.sample_for(&result.rule_id) {
            Some(sample) if !sample.rows.is_empty() => write_sample(xml, sample)?,
            _ => {
                start(xml, "p")?;
                element(xml, "i", "No sample available.")?;
                end(xml, "p")?;
            }
        }
    }
    Ok(())
}

fn write_sample(xml: &mut HtmlWriter, sample: &FailedSample) -> Result<()> {
    let headers: Vec<&str> = std::iter::once("row")
        .chain(sample.columns.iter().map(String::as_str))
        .collect();
    start(xml, "table")?;
    header_row(xml, &headers)?;
    start(xml, "tbody")?;
    for row in &sample.rows {
        start(xml, "tr")?;
        element(xml, "td", &row.row.to_string())?;
        for value in &row.values {
            element(xml, "td", value)?;
        }
        end(xml, "tr")?;
    }
    end(xml, "tbody")?;
    end(xml, "table")
}

fn write_profile(xml: &mut HtmlWriter, profiles: &[ColumnProfile]) -> Result<()> {
    start(xml, "table")?;
    header_row(
        xml,
        &["column", "type", "null_rate", "distinct", "sample_values"],
    )?;
    start(xml, "tbody")?;
    for profile in sorted_for_display(profiles) {
        start(xml, "tr")?;
        element(xml, "td", &profile.name)?;
        element(xml, "td", profile.inferred_type.as_str())?;
        element(xml, "td", &format_rate(profile.null_rate))?;
        element(xml, "td", &profile.distinct_count.to_string())?;
        element(xml, "td", &profile.sample_values.join(", "))?;
        end(xml, "tr")?;
    }
    end(xml, "tbody")?;
    end(xml, "table")
}

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use dq_cli::pipeline::RunOutcome;
use dq_model::{RuleResult, RuleStatus, Severity};

pub fn print_summary(outcome: &RunOutcome) {
    let report = &outcome.report;
    let meta = &report.metadata;
    let summary = &report.summary;
    println!("Dataset: {}", meta.dataset);
    println!("Run ID: {}", meta.run_id);
    println!(
        "Rows: {} raw -> {} clean ({} columns)",
        summary.raw_rows, summary.clean_rows, summary.clean_cols
    );

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Rule"),
        header_cell("Severity"),
        header_cell("Status"),
        header_cell("Failed"),
        header_cell("Description"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    align_column(&mut table, 2, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Right);
    for result in &report.results {
        table.add_row(vec![
            Cell::new(&result.rule_id)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            severity_cell(result.severity),
            status_cell(result),
            failed_cell(result),
            Cell::new(&result.description),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(format!(
            "{}/{} failed",
            summary.failed_rules, summary.total_rules
        ))
        .add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
    ]);
    println!("{table}");

    let mut artifacts = Table::new();
    artifacts.set_header(vec![header_cell("Artifact"), header_cell("Path")]);
    apply_table_style(&mut artifacts);
    let paths = &outcome.paths;
    for (label, path) in [
        ("Clean CSV", &paths.clean_csv),
        ("Markdown report", &paths.reports.markdown),
        ("HTML report", &paths.reports.html),
        ("JSON report", &paths.reports.json),
        ("Run log", &paths.log),
    ] {
        artifacts.add_row(vec![Cell::new(label), Cell::new(path.display())]);
    }
    println!("{artifacts}");
    println!("Completed in {} ms", outcome.duration_ms);
}

fn severity_cell(severity: Severity) -> Cell {
    match severity {
        Severity::Error => Cell::new("ERROR").fg(Color::Red),
        Severity::Warn => Cell::new("WARN").fg(Color::Yellow),
    }
}

fn status_cell(result: &RuleResult) -> Cell {
    match result.status {
        RuleStatus::Pass => Cell::new("PASS").fg(Color::Green),
        RuleStatus::Fail => Cell::new("FAIL")
            .fg(severity_color(result.severity))
            .add_attribute(Attribute::Bold),
    }
}

fn failed_cell(result: &RuleResult) -> Cell {
    if result.failed_count > 0 {
        Cell::new(result.failed_count)
            .fg(severity_color(result.severity))
            .add_attribute(Attribute::Bold)
    } else {
        dim_cell(result.failed_count)
    }
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Error => Color::Red,
        Severity::Warn => Color::Yellow,
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
    if table.column_count() >= 5 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Fixed(30)),
            ColumnConstraint::LowerBoundary(Width::Fixed(8)),
            ColumnConstraint::LowerBoundary(Width::Fixed(8)),
            ColumnConstraint::LowerBoundary(Width::Fixed(6)),
            ColumnConstraint::UpperBoundary(Width::Percentage(50)),
        ]);
    }
}

pub fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

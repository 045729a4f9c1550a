use std::path::PathBuf;

use anyhow::Result;
use chrono::Local;
use comfy_table::{CellAlignment, Table};

use dq_cli::pipeline::RunOptions;
use dq_model::DatasetKind;
use dq_validate::rules_for_dataset;

use crate::cli::RunArgs;
use crate::summary::{align_column, apply_table_style, header_cell};

pub fn run_datasets() -> Result<()> {
    for kind in DatasetKind::ALL {
        println!("{kind}: {}", kind.description());

        let mut columns = Table::new();
        columns.set_header(vec![header_cell("Column"), header_cell("Kind")]);
        apply_table_style(&mut columns);
        for spec in kind.schema() {
            columns.add_row(vec![spec.name, spec.kind.as_str()]);
        }
        println!("{columns}");

        let mut rules = Table::new();
        rules.set_header(vec![
            header_cell("Rule"),
            header_cell("Severity"),
            header_cell("Columns"),
            header_cell("Description"),
        ]);
        apply_table_style(&mut rules);
        align_column(&mut rules, 1, CellAlignment::Center);
        for rule in rules_for_dataset(kind) {
            rules.add_row(vec![
                rule.id.clone(),
                rule.severity.to_string(),
                rule.check.columns().join(", "),
                rule.description.clone(),
            ]);
        }
        println!("{rules}");
        println!();
    }
    Ok(())
}

/// Run options for `dq-pack run`, stamped with the local clock.
pub fn run_options(args: &RunArgs, log_file: Option<PathBuf>) -> RunOptions {
    RunOptions::new(
        args.input.clone(),
        args.dataset.into(),
        Local::now().naive_local(),
    )
    .with_outdir(args.outdir.clone())
    .with_log_file(log_file)
}

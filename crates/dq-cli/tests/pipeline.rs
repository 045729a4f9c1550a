//! End-to-end pipeline runs against temporary output directories.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};
use tempfile::TempDir;

use dq_cli::pipeline::{EXIT_BLOCKING_FAILURES, EXIT_SUCCESS, RunOptions, run_pipeline};
use dq_model::{DatasetKind, Rule, RuleCheck, RuleStatus, Severity};

const SALES_CSV: &str = "\
order_id,customer_id,region,channel,product,qty,unit_price,revenue,order_date,notes
1,10,Norte,web,Widget,2,9900,19800,2024-01-15,
2,11,,store,Gadget,1,5000,5000,2024-01-16,gift
2,12,Sur,web,Widget,-1,5000,-5000,2024-01-17,
3,13,Sur,web,Widget,3,5000,15000,2024-01-18,
3,13,Sur,web,Widget,3,5000,15000,2024-01-18,
";

fn started_at() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

fn write_input(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn sales_run_writes_clean_data_and_reports() {
    let temp = TempDir::new().unwrap();
    let input = write_input(temp.path(), "sales_raw.csv", SALES_CSV);
    let options = RunOptions::new(input, DatasetKind::Sales, started_at())
        .with_outdir(temp.path().join("outputs"));

    let outcome = run_pipeline(&options).unwrap();
    let summary = &outcome.report.summary;
    assert_eq!(summary.raw_rows, 5);
    assert_eq!(summary.clean_rows, 4);
    assert_eq!(summary.total_rules, 6);
    assert_eq!(summary.failed_rules, 3);
    assert!(outcome.has_blocking_failures());
    assert_eq!(outcome.exit_code(true), EXIT_BLOCKING_FAILURES);
    assert_eq!(outcome.exit_code(false), EXIT_SUCCESS);

    let failed: Vec<&str> = outcome
        .report
        .results
        .iter()
        .filter(|result| result.status == RuleStatus::Fail)
        .map(|result| result.rule_id.as_str())
        .collect();
    assert_eq!(
        failed,
        vec![
            "S001_qty_positive",
            "S005_region_not_null",
            "S006_order_id_unique"
        ]
    );

    let paths = &outcome.paths;
    assert!(paths.logs_dir.is_dir());
    let clean_csv = fs::read_to_string(&paths.clean_csv).unwrap();
    assert!(clean_csv.starts_with("order_id,customer_id,region"));
    assert_eq!(clean_csv.lines().count(), 5);

    let markdown = fs::read_to_string(&paths.reports.markdown).unwrap();
    assert!(markdown.contains("S006_order_id_unique"));
    assert!(fs::read_to_string(&paths.reports.html).unwrap().contains("<table"));

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&paths.reports.json).unwrap()).unwrap();
    assert_eq!(json["metadata"]["run_id"], "sales_20240301_120000");
    assert_eq!(json["summary"]["failed_rules"], 3);
}

#[test]
fn missing_required_column_aborts_run() {
    let temp = TempDir::new().unwrap();
    let input = write_input(
        temp.path(),
        "broken.csv",
        "order_id,region\n1,Norte\n",
    );
    let options = RunOptions::new(input, DatasetKind::Sales, started_at())
        .with_outdir(temp.path().join("outputs"));

    let error = run_pipeline(&options).unwrap_err();
    let message = format!("{error:#}");
    assert!(message.contains("missing required columns"), "{message}");
    assert!(message.contains("revenue"), "{message}");
    assert!(!options.paths().clean_csv.exists());
}

#[test]
fn unreadable_input_is_reported_with_path() {
    let temp = TempDir::new().unwrap();
    let options = RunOptions::new(
        temp.path().join("absent.csv"),
        DatasetKind::Leads,
        started_at(),
    )
    .with_outdir(temp.path().join("outputs"));

    let error = run_pipeline(&options).unwrap_err();
    assert!(format!("{error:#}").contains("absent.csv"));
}

#[test]
fn clean_leads_run_has_no_blocking_failures() {
    let temp = TempDir::new().unwrap();
    let input = write_input(
        temp.path(),
        "leads_raw.csv",
        "lead_id,email,phone,source,status,created_at,city,score,notes\n\
         1,ana@example.com,300 123 4567,web,new,2024-02-01,Bogota,80,\n\
         2,luis@example.com,310-987-6543,ads,won,2024-02-02,Cali,55,call back\n",
    );
    let options = RunOptions::new(input, DatasetKind::Leads, started_at())
        .with_outdir(temp.path().join("outputs"));

    let outcome = run_pipeline(&options).unwrap();
    assert_eq!(outcome.report.summary.failed_rules, 0);
    assert!(!outcome.has_blocking_failures());
    assert_eq!(outcome.exit_code(true), EXIT_SUCCESS);
    assert!(outcome.paths.reports.json.is_file());
}

#[test]
fn rule_evaluation_failure_writes_no_artifacts() {
    let temp = TempDir::new().unwrap();
    let input = write_input(temp.path(), "sales_raw.csv", SALES_CSV);
    let range_on_text = Rule::new(
        "X001_region_range",
        "region must be between 0 and 1",
        Severity::Error,
        RuleCheck::Range {
            column: "region".to_string(),
            min: Some(0.0),
            max: Some(1.0),
        },
    );
    let options = RunOptions::new(input, DatasetKind::Sales, started_at())
        .with_outdir(temp.path().join("outputs"))
        .with_rules(vec![range_on_text]);

    let error = run_pipeline(&options).unwrap_err();
    assert!(format!("{error:#}").contains("X001_region_range"));
    let paths = options.paths();
    assert!(!paths.clean_csv.exists());
    assert!(!paths.reports.json.exists());
    assert!(!paths.reports.markdown.exists());
}

#[test]
fn fractional_quantity_passes_quantity_and_revenue_rules() {
    let temp = TempDir::new().unwrap();
    let input = write_input(
        temp.path(),
        "sales_raw.csv",
        "order_id,customer_id,region,channel,product,qty,unit_price,revenue,order_date,notes\n\
         1,10,Norte,web,Widget,2.5,2000,5000,2024-01-15,\n",
    );
    let options = RunOptions::new(input, DatasetKind::Sales, started_at())
        .with_outdir(temp.path().join("outputs"));

    let outcome = run_pipeline(&options).unwrap();
    assert_eq!(outcome.report.summary.failed_rules, 0);
    let clean_csv = fs::read_to_string(&outcome.paths.clean_csv).unwrap();
    assert!(clean_csv.contains(",2.5,"), "{clean_csv}");
}

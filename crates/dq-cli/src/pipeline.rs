//! Run orchestration: load, clean, validate, profile, report.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use tracing::{info, info_span};

use dq_ingest::{read_csv_table, write_clean_csv};
use dq_model::{DatasetKind, Rule, Table};
use dq_report::{
    Report, ReportInput, ReportMetadata, ReportPaths, build_report, write_report_outputs,
};
use dq_transform::clean_table;
use dq_validate::{RuleEngine, rules_for_dataset};

/// Default root directory for run outputs.
pub const DEFAULT_OUTDIR: &str = "outputs";

/// `<dataset>_<YYYYMMDD>_<HHMMSS>`
pub fn make_run_id(dataset: DatasetKind, started_at: NaiveDateTime) -> String {
    format!("{dataset}_{}", started_at.format("%Y%m%d_%H%M%S"))
}

/// Inputs of one pipeline run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub input: PathBuf,
    pub dataset: DatasetKind,
    pub outdir: PathBuf,
    pub started_at: NaiveDateTime,
    pub run_id: String,
    /// Overrides the default run log location.
    pub log_file: Option<PathBuf>,
    /// Rule set to evaluate; the dataset's built-in rules when `None`.
    pub rules: Option<Vec<Rule>>,
}

impl RunOptions {
    pub fn new(input: PathBuf, dataset: DatasetKind, started_at: NaiveDateTime) -> Self {
        Self {
            input,
            dataset,
            outdir: PathBuf::from(DEFAULT_OUTDIR),
            started_at,
            run_id: make_run_id(dataset, started_at),
            log_file: None,
            rules: None,
        }
    }

    #[must_use]
    pub fn with_outdir(mut self, outdir: PathBuf) -> Self {
        self.outdir = outdir;
        self
    }

    #[must_use]
    pub fn with_log_file(mut self, log_file: Option<PathBuf>) -> Self {
        self.log_file = log_file;
        self
    }

    #[must_use]
    pub fn with_rules(mut self, rules: Vec<Rule>) -> Self {
        self.rules = Some(rules);
        self
    }

    pub fn rules(&self) -> Vec<Rule> {
        self.rules
            .clone()
            .unwrap_or_else(|| rules_for_dataset(self.dataset))
    }

    pub fn paths(&self) -> RunPaths {
        RunPaths::new(
            &self.outdir,
            self.dataset,
            &self.run_id,
            self.log_file.clone(),
        )
    }
}

/// Every file a run writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPaths {
    pub clean_dir: PathBuf,
    pub reports_dir: PathBuf,
    pub logs_dir: PathBuf,
    pub clean_csv: PathBuf,
    pub reports: ReportPaths,
    pub log: PathBuf,
}

impl RunPaths {
    pub fn new(
        outdir: &Path,
        dataset: DatasetKind,
        run_id: &str,
        log_override: Option<PathBuf>,
    ) -> Self {
        let clean_dir = outdir.join("clean");
        let reports_dir = outdir.join("reports");
        let logs_dir = outdir.join("logs");
        Self {
            clean_csv: clean_dir.join(format!("{dataset}_clean_{run_id}.csv")),
            reports: ReportPaths::in_dir(&reports_dir, dataset.as_str(), run_id),
            log: log_override.unwrap_or_else(|| logs_dir.join(format!("run_{run_id}.log"))),
            clean_dir,
            reports_dir,
            logs_dir,
        }
    }

    pub fn create_dirs(&self) -> Result<()> {
        for dir in [&self.clean_dir, &self.reports_dir, &self.logs_dir] {
            fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
        }
        Ok(())
    }
}

/// Result of a completed run.
#[derive(Debug)]
pub struct RunOutcome {
    pub report: Report,
    pub paths: RunPaths,
    pub duration_ms: u128,
}

/// Exit status for a finished run.
pub const EXIT_SUCCESS: i32 = 0;
/// Exit status for a run that could not complete.
pub const EXIT_FATAL: i32 = 1;
/// Exit status for `--fail-on-error` when an error-severity rule failed.
pub const EXIT_BLOCKING_FAILURES: i32 = 2;

/// Process exit status of a completed run.
pub fn run_exit_code(has_blocking_failures: bool, fail_on_error: bool) -> i32 {
    if fail_on_error && has_blocking_failures {
        EXIT_BLOCKING_FAILURES
    } else {
        EXIT_SUCCESS
    }
}

impl RunOutcome {
    pub fn has_blocking_failures(&self) -> bool {
        self.report.has_blocking_failures()
    }

    pub fn exit_code(&self, fail_on_error: bool) -> i32 {
        run_exit_code(self.has_blocking_failures(), fail_on_error)
    }
}

/// Runs the full pipeline for one dataset.
///
/// Rule failures are recorded in the report; only structural problems
/// (unreadable input, missing columns, unevaluable rules, write failures)
/// return an error.
pub fn run_pipeline(options: &RunOptions) -> Result<RunOutcome> {
    let run_span = info_span!("run", dataset = %options.dataset, run_id = %options.run_id);
    let _run_guard = run_span.enter();
    let run_start = Instant::now();
    let paths = options.paths();
    paths.create_dirs()?;

    let raw = info_span!("load").in_scope(|| {
        read_csv_table(&options.input)
            .with_context(|| format!("load {}", options.input.display()))
    })?;

    let clean = info_span!("clean").in_scope(|| -> Result<_> {
        let start = Instant::now();
        let clean = clean_table(&raw, options.dataset)
            .with_context(|| format!("clean {} dataset", options.dataset))?;
        info!(
            raw_rows = raw.height(),
            clean_rows = clean.height(),
            duration_ms = start.elapsed().as_millis(),
            "clean complete"
        );
        Ok(clean)
    })?;

    let results = info_span!("validate").in_scope(|| -> Result<_> {
        let start = Instant::now();
        let engine = RuleEngine::new(options.rules()).context("compile rules")?;
        let results = engine.evaluate(&clean).context("evaluate rules")?;
        info!(
            rules = results.len(),
            failed = results.iter().filter(|result| result.is_failed()).count(),
            duration_ms = start.elapsed().as_millis(),
            "validation complete"
        );
        Ok(results)
    })?;

    let report = info_span!("profile").in_scope(|| {
        build_report(ReportInput {
            metadata: ReportMetadata {
                dataset: options.dataset,
                run_id: options.run_id.clone(),
                generated_at: options.started_at,
                input_path: options.input.clone(),
                clean_path: paths.clean_csv.clone(),
                log_path: paths.log.clone(),
            },
            raw: &raw,
            clean: &clean,
            results,
        })
    });

    info_span!("report").in_scope(|| write_outputs(&clean, &report, &paths))?;

    let duration_ms = run_start.elapsed().as_millis();
    info!(
        failed_rules = report.summary.failed_rules,
        total_rules = report.summary.total_rules,
        duration_ms,
        "run complete"
    );
    Ok(RunOutcome {
        report,
        paths,
        duration_ms,
    })
}

/// Persists the clean table and every report format. Called only after
/// validation finished.
fn write_outputs(clean: &Table, report: &Report, paths: &RunPaths) -> Result<()> {
    write_clean_csv(clean, &paths.clean_csv)
        .with_context(|| format!("write {}", paths.clean_csv.display()))?;
    write_report_outputs(report, &paths.reports)
}

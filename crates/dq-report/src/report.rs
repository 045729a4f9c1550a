//! Report assembly.

use std::path::PathBuf;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use dq_model::{ColumnProfile, DatasetKind, RuleResult, Table};

use crate::profile::profile_table;

/// Maximum number of failing rows kept per failed rule.
pub const FAILED_SAMPLE_LIMIT: usize = 5;

/// Caller-supplied run metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub dataset: DatasetKind,
    pub run_id: String,
    pub generated_at: NaiveDateTime,
    pub input_path: PathBuf,
    pub clean_path: PathBuf,
    pub log_path: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub raw_rows: usize,
    pub raw_cols: usize,
    pub clean_rows: usize,
    pub clean_cols: usize,
    pub total_rules: usize,
    pub failed_rules: usize,
}

/// One sampled failing row: its clean-table index and display values in column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleRow {
    pub row: usize,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedSample {
    pub rule_id: String,
    pub columns: Vec<String>,
    pub rows: Vec<SampleRow>,
}

/// A finished data-quality report. Built once by [`build_report`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    pub summary: RunSummary,
    pub results: Vec<RuleResult>,
    pub failed_samples: Vec<FailedSample>,
    pub raw_profile: Vec<ColumnProfile>,
    pub clean_profile: Vec<ColumnProfile>,
}

impl Report {
    pub fn failed_results(&self) -> impl Iterator<Item = &RuleResult> {
        self.results.iter().filter(|result| result.is_failed())
    }

    pub fn sample_for(&self, rule_id: &str) -> Option<&FailedSample> {
        self.failed_samples
            .iter()
            .find(|sample| sample.rule_id == rule_id)
    }

    /// True when any `error` severity rule failed.
    pub fn has_blocking_failures(&self) -> bool {
        self.results.iter().any(RuleResult::is_blocking)
    }
}

/// Everything [`build_report`] needs from a run.
#[derive(Debug)]
pub struct ReportInput<'a> {
    pub metadata: ReportMetadata,
    pub raw: &'a Table,
    pub clean: &'a Table,
    pub results: Vec<RuleResult>,
}

pub fn build_report(input: ReportInput<'_>) -> Report {
    let ReportInput {
        metadata,
        raw,
        clean,
        results,
    } = input;
    let failed_samples = results
        .iter()
        .filter(|result| result.is_failed())
        .map(|result| sample_failures(clean, result))
        .collect();
    let summary = RunSummary {
        raw_rows: raw.height(),
        raw_cols: raw.width(),
        clean_rows: clean.height(),
        clean_cols: clean.width(),
        total_rules: results.len(),
        failed_rules: results.iter().filter(|result| result.is_failed()).count(),
    };
    Report {
        metadata,
        summary,
        failed_samples,
        raw_profile: profile_table(raw),
        clean_profile: profile_table(clean),
        results,
    }
}

fn sample_failures(clean: &Table, result: &RuleResult) -> FailedSample {
    let rows = result
        .failed_rows
        .iter()
        .take(FAILED_SAMPLE_LIMIT)
        .filter_map(|&row| {
            clean.row(row).map(|cells| SampleRow {
                row,
                values: cells.iter().map(ToString::to_string).collect(),
            })
        })
        .collect();
    FailedSample {
        rule_id: result.rule_id.clone(),
        columns: clean
            .column_names()
            .into_iter()
            .map(str::to_string)
            .collect(),
        rows,
    }
}

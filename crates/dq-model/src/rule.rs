//! Validation rule definitions and their per-run results.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity is metadata for report consumers; it never changes evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warn,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warn => "warn",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The closed set of rule shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum RuleCheck {
    /// Numeric value within inclusive bounds. Missing values fail.
    Range {
        column: String,
        min: Option<f64>,
        max: Option<f64>,
    },
    /// Value must not be missing or blank.
    NotNull { column: String },
    /// Value must have parsed successfully (not the cleaner's missing marker).
    Presence { column: String },
    /// Text value must match a regular expression. Missing values fail.
    Format { column: String, pattern: String },
    /// Product of `factors` must equal `total` within an absolute tolerance.
    /// Any missing operand fails.
    Consistency {
        factors: Vec<String>,
        total: String,
        tolerance: f64,
    },
    /// Non-missing values must not repeat. Every row sharing a repeated value fails.
    Unique { column: String },
}

impl RuleCheck {
    /// Columns the check reads, in a stable order.
    pub fn columns(&self) -> Vec<&str> {
        match self {
            RuleCheck::Range { column, .. }
            | RuleCheck::NotNull { column }
            | RuleCheck::Presence { column }
            | RuleCheck::Format { column, .. }
            | RuleCheck::Unique { column } => vec![column.as_str()],
            RuleCheck::Consistency { factors, total, .. } => factors
                .iter()
                .map(String::as_str)
                .chain(std::iter::once(total.as_str()))
                .collect(),
        }
    }

    pub fn shape_name(&self) -> &'static str {
        match self {
            RuleCheck::Range { .. } => "range",
            RuleCheck::NotNull { .. } => "not_null",
            RuleCheck::Presence { .. } => "presence",
            RuleCheck::Format { .. } => "format",
            RuleCheck::Consistency { .. } => "consistency",
            RuleCheck::Unique { .. } => "unique",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub id: String,
    pub description: String,
    pub severity: Severity,
    pub check: RuleCheck,
}

impl Rule {
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        severity: Severity,
        check: RuleCheck,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            severity,
            check,
        }
    }
}

/// One boolean per row; `true` means the row satisfies the rule.
pub type BoolMask = Vec<bool>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RuleStatus {
    Pass,
    Fail,
}

impl RuleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleStatus::Pass => "PASS",
            RuleStatus::Fail => "FAIL",
        }
    }
}

impl fmt::Display for RuleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleResult {
    pub rule_id: String,
    pub description: String,
    pub severity: Severity,
    pub status: RuleStatus,
    pub failed_count: usize,
    /// Ascending row indices into the clean table.
    pub failed_rows: Vec<usize>,
}

impl RuleResult {
    pub fn from_mask(rule: &Rule, mask: &[bool]) -> Self {
        let failed_rows: Vec<usize> = mask
            .iter()
            .enumerate()
            .filter(|(_, ok)| !**ok)
            .map(|(idx, _)| idx)
            .collect();
        let failed_count = failed_rows.len();
        Self {
            rule_id: rule.id.clone(),
            description: rule.description.clone(),
            severity: rule.severity,
            status: if failed_count > 0 {
                RuleStatus::Fail
            } else {
                RuleStatus::Pass
            },
            failed_count,
            failed_rows,
        }
    }

    pub fn is_failed(&self) -> bool {
        self.status == RuleStatus::Fail
    }

    /// A failed rule with `error` severity.
    pub fn is_blocking(&self) -> bool {
        self.is_failed() && self.severity == Severity::Error
    }
}

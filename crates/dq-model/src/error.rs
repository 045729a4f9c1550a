use std::path::PathBuf;

use thiserror::Error;

/// Fatal conditions of a pipeline run.
///
/// Rows that fail a validation rule are not errors; they are recorded in the
/// report. Only structural problems end up here.
#[derive(Debug, Error)]
pub enum DqError {
    #[error("dataset `{dataset}` is missing required columns: {}", .missing.join(", "))]
    SchemaMismatch {
        dataset: String,
        missing: Vec<String>,
    },

    #[error("rule {rule_id} cannot be evaluated on column `{column}`: {reason}")]
    RuleEvaluation {
        rule_id: String,
        column: String,
        reason: String,
    },

    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse CSV {path}: {message}")]
    Csv { path: PathBuf, message: String },

    #[error("invalid table: {message}")]
    InvalidTable { message: String },

    #[error("failed to build data frame: {message}")]
    Frame { message: String },
}

impl DqError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn rule_evaluation(
        rule_id: impl Into<String>,
        column: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::RuleEvaluation {
            rule_id: rule_id.into(),
            column: column.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DqError>;

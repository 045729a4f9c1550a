//! Shared data model for the data-quality pipeline.

pub mod dataset;
pub mod error;
pub mod profile;
pub mod rule;
pub mod table;

pub use dataset::{ColumnKind, ColumnSpec, DatasetKind};
pub use error::{DqError, Result};
pub use profile::{ColumnProfile, ColumnType};
pub use rule::{BoolMask, Rule, RuleCheck, RuleResult, RuleStatus, Severity};
pub use table::{CellKey, CellValue, Column, Table, format_date};

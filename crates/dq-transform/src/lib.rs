//! Cleaning transforms for raw tables.
//!
//! - **normalization**: cell-level text, digit, numeric and date normalization
//! - **cleaner**: schema check, per-column normalization and exact-row de-duplication

pub mod cleaner;
pub mod normalization;

pub use cleaner::{check_schema, clean_table, drop_duplicate_rows, normalize_column};

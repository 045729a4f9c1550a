//! Raw-to-clean table transform.
//!
//! The cleaner only normalizes values and removes exact duplicate rows: the
//! clean table always has the raw table's columns, in the raw order.

use std::collections::HashSet;

use tracing::{debug, info};

use dq_model::{CellValue, Column, ColumnKind, DatasetKind, DqError, Result, Table};

use crate::normalization::{
    DateOrder, normalize_date, normalize_digits, normalize_float, normalize_integer,
    normalize_text,
};

/// Fails with `SchemaMismatch` when a declared column is absent from `table`.
pub fn check_schema(table: &Table, kind: DatasetKind) -> Result<()> {
    let missing: Vec<String> = kind
        .schema()
        .iter()
        .filter(|spec| !table.has_column(spec.name))
        .map(|spec| spec.name.to_string())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(DqError::SchemaMismatch {
            dataset: kind.as_str().to_string(),
            missing,
        })
    }
}

/// Produces the clean table for a dataset kind.
///
/// Columns are normalized according to their declared kind, then exact
/// duplicate rows are dropped, keeping first occurrences in order. Running the
/// cleaner on its own output is a no-op.
pub fn clean_table(raw: &Table, kind: DatasetKind) -> Result<Table> {
    check_schema(raw, kind)?;
    info!(
        dataset = %kind,
        rows = raw.height(),
        columns = raw.width(),
        "cleaning dataset"
    );
    let columns = raw
        .columns()
        .iter()
        .map(|column| normalize_column(column, kind.column_kind(&column.name)))
        .collect();
    let normalized = Table::new(columns)?;
    drop_duplicate_rows(&normalized)
}

/// Normalizes one column according to its declared kind.
pub fn normalize_column(column: &Column, kind: ColumnKind) -> Column {
    let values = match kind {
        ColumnKind::Text => column.values.iter().map(normalize_text).collect(),
        ColumnKind::Digits => column.values.iter().map(normalize_digits).collect(),
        ColumnKind::Integer => numeric_column(column, normalize_integer),
        ColumnKind::Float => numeric_column(column, normalize_float),
        ColumnKind::Date => date_column(column),
    };
    Column::new(column.name.clone(), values)
}

fn numeric_column(column: &Column, normalize: fn(&CellValue) -> CellValue) -> Vec<CellValue> {
    let values: Vec<CellValue> = column.values.iter().map(normalize).collect();
    let before = column.missing_count();
    let after = values.iter().filter(|value| value.is_missing()).count();
    info!(
        column = %column.name,
        na_rate_before = %percent(before, column.len()),
        na_rate_after = %percent(after, column.len()),
        "coerced numeric column"
    );
    values
}

/// Parses a date column with the day/month order that parses more values.
/// Ties go to day-first.
fn date_column(column: &Column) -> Vec<CellValue> {
    let day_first: Vec<CellValue> = column
        .values
        .iter()
        .map(|value| normalize_date(value, DateOrder::DayFirst))
        .collect();
    let month_first: Vec<CellValue> = column
        .values
        .iter()
        .map(|value| normalize_date(value, DateOrder::MonthFirst))
        .collect();
    let parsed = |values: &[CellValue]| values.iter().filter(|value| !value.is_missing()).count();
    let day_ok = parsed(&day_first);
    let month_ok = parsed(&month_first);
    let (order, chosen) = if day_ok >= month_ok {
        (DateOrder::DayFirst, day_first)
    } else {
        (DateOrder::MonthFirst, month_first)
    };
    info!(
        column = %column.name,
        order = order.as_str(),
        success_rate = %percent(day_ok.max(month_ok), column.len()),
        dayfirst = %percent(day_ok, column.len()),
        monthfirst = %percent(month_ok, column.len()),
        "parsed date column"
    );
    chosen
}

/// Drops rows that repeat an earlier row in every column.
pub fn drop_duplicate_rows(table: &Table) -> Result<Table> {
    let mut seen = HashSet::with_capacity(table.height());
    let keep: Vec<usize> = (0..table.height())
        .filter(|&idx| seen.insert(table.row_key(idx)))
        .collect();
    let dropped = table.height() - keep.len();
    if dropped == 0 {
        debug!(rows = table.height(), "no duplicate rows");
        return Ok(table.clone());
    }
    info!(dropped, rows = keep.len(), "dropped exact duplicate rows");
    table.select_rows(&keep)
}

fn percent(count: usize, total: usize) -> String {
    if total == 0 {
        return "0.0%".to_string();
    }
    format!("{:.1}%", 100.0 * count as f64 / total as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> CellValue {
        CellValue::Text(value.to_string())
    }

    #[test]
    fn date_order_follows_parse_rate() {
        let column = Column::new(
            "order_date",
            vec![text("01/13/2024"), text("02/20/2024"), text("03/04/2024")],
        );
        let clean = normalize_column(&column, ColumnKind::Date);
        let rendered: Vec<String> = clean.values.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["2024-01-13", "2024-02-20", "2024-03-04"]);
    }

    #[test]
    fn date_order_tie_prefers_day_first() {
        let column = Column::new("order_date", vec![text("03/04/2024")]);
        let clean = normalize_column(&column, ColumnKind::Date);
        assert_eq!(clean.values[0].to_string(), "2024-04-03");
    }

    #[test]
    fn percent_handles_empty_columns() {
        assert_eq!(percent(0, 0), "0.0%");
        assert_eq!(percent(1, 4), "25.0%");
    }
}

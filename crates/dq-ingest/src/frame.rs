//! Polars interop for exporting tables.

use std::fs::{self, File};
use std::path::Path;

use polars::prelude::{Column as FrameColumn, CsvWriter, DataFrame, SerWriter};
use tracing::info;

use dq_model::{CellValue, Column, ColumnType, DqError, Result, Table};

fn frame_error(error: impl std::fmt::Display) -> DqError {
    DqError::Frame {
        message: error.to_string(),
    }
}

fn to_frame_column(column: &Column) -> FrameColumn {
    let name = column.name.as_str();
    match ColumnType::infer(&column.values) {
        ColumnType::Integer => {
            let values: Vec<Option<i64>> = column
                .values
                .iter()
                .map(|value| match value {
                    CellValue::Integer(v) => Some(*v),
                    _ => None,
                })
                .collect();
            FrameColumn::new(name.into(), values)
        }
        ColumnType::Float => {
            let values: Vec<Option<f64>> = column.values.iter().map(CellValue::as_f64).collect();
            FrameColumn::new(name.into(), values)
        }
        ColumnType::String | ColumnType::Date => {
            let values: Vec<Option<String>> = column
                .values
                .iter()
                .map(|value| (!value.is_missing()).then(|| value.to_string()))
                .collect();
            FrameColumn::new(name.into(), values)
        }
    }
}

/// Converts a table into a polars `DataFrame`, mapping missing markers to nulls.
pub fn table_to_dataframe(table: &Table) -> Result<DataFrame> {
    let columns: Vec<FrameColumn> = table.columns().iter().map(to_frame_column).collect();
    DataFrame::new(columns).map_err(frame_error)
}

/// Writes a table as CSV (header included), creating parent directories.
pub fn write_clean_csv(table: &Table, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| DqError::io(parent, source))?;
    }
    let mut df = table_to_dataframe(table)?;
    let mut file = File::create(path).map_err(|source| DqError::io(path, source))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)
        .map_err(frame_error)?;
    info!(path = %path.display(), rows = table.height(), "wrote clean csv");
    Ok(())
}

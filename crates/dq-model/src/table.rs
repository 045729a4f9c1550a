//! In-memory table with explicitly typed cells.
//!
//! Every semantic type carries its own missing marker so that rule null
//! handling is an explicit branch instead of an implicit coercion.

use std::fmt;

use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{DqError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Date(NaiveDateTime),
    MissingString,
    MissingNumber,
    MissingDate,
}

impl CellValue {
    pub fn is_missing(&self) -> bool {
        matches!(
            self,
            CellValue::MissingString | CellValue::MissingNumber | CellValue::MissingDate
        )
    }

    /// Numeric view of the cell. Text is never coerced here.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Integer(v) => Some(*v as f64),
            CellValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Hashable identity of the cell, used for distinct counts and row de-duplication.
    pub fn key(&self) -> CellKey {
        match self {
            CellValue::Text(s) => CellKey::Text(s.clone()),
            CellValue::Integer(v) => CellKey::Integer(*v),
            // -0.0 and 0.0 compare equal and must share a key
            CellValue::Float(v) if *v == 0.0 => CellKey::Float(0f64.to_bits()),
            CellValue::Float(v) => CellKey::Float(v.to_bits()),
            CellValue::Date(d) => CellKey::Date(*d),
            CellValue::MissingString => CellKey::MissingString,
            CellValue::MissingNumber => CellKey::MissingNumber,
            CellValue::MissingDate => CellKey::MissingDate,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => f.write_str(s),
            CellValue::Integer(v) => write!(f, "{v}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Date(d) => f.write_str(&format_date(d)),
            CellValue::MissingString | CellValue::MissingNumber | CellValue::MissingDate => Ok(()),
        }
    }
}

/// Formats a parsed date, dropping the time part when it is midnight.
pub fn format_date(value: &NaiveDateTime) -> String {
    if value.time() == NaiveTime::MIN {
        value.format("%Y-%m-%d").to_string()
    } else {
        value.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CellKey {
    Text(String),
    Integer(i64),
    Float(u64),
    Date(NaiveDateTime),
    MissingString,
    MissingNumber,
    MissingDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub values: Vec<CellValue>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<CellValue>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|value| value.is_missing()).count()
    }
}

/// Ordered set of equally long, named columns. Row identity is positional.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<Column>,
    height: usize,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let height = columns.first().map(Column::len).unwrap_or(0);
        if let Some(column) = columns.iter().find(|column| column.len() != height) {
            return Err(DqError::InvalidTable {
                message: format!(
                    "column `{}` has {} values, expected {height}",
                    column.name,
                    column.len()
                ),
            });
        }
        let mut seen = std::collections::BTreeSet::new();
        for column in &columns {
            if !seen.insert(column.name.as_str()) {
                return Err(DqError::InvalidTable {
                    message: format!("duplicate column `{}`", column.name),
                });
            }
        }
        Ok(Self { columns, height })
    }

    /// Builds a table from a header row and row-major cells.
    ///
    /// Short rows are padded with `MissingString`, long rows are truncated.
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Result<Self> {
        let mut columns: Vec<Column> = headers
            .into_iter()
            .map(|name| Column::new(name, Vec::with_capacity(rows.len())))
            .collect();
        for row in rows {
            let mut cells = row.into_iter();
            for column in &mut columns {
                column
                    .values
                    .push(cells.next().unwrap_or(CellValue::MissingString));
            }
        }
        Self::new(columns)
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.height == 0
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|column| column.name.as_str()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Cells of one row in column order.
    pub fn row(&self, index: usize) -> Option<Vec<&CellValue>> {
        if index >= self.height {
            return None;
        }
        Some(
            self.columns
                .iter()
                .map(|column| &column.values[index])
                .collect(),
        )
    }

    pub fn row_key(&self, index: usize) -> Vec<CellKey> {
        self.columns
            .iter()
            .map(|column| column.values[index].key())
            .collect()
    }

    /// New table holding the given rows, in the given order.
    pub fn select_rows(&self, indices: &[usize]) -> Result<Self> {
        if let Some(bad) = indices.iter().find(|&&idx| idx >= self.height) {
            return Err(DqError::InvalidTable {
                message: format!("row {bad} out of range for table of {} rows", self.height),
            });
        }
        let columns = self
            .columns
            .iter()
            .map(|column| {
                Column::new(
                    column.name.clone(),
                    indices.iter().map(|&idx| column.values[idx].clone()).collect(),
                )
            })
            .collect();
        Self::new(columns)
    }
}

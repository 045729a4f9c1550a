use std::fmt;

use serde::{Deserialize, Serialize};

use crate::table::CellValue;

/// Type of a column as observed in its values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    String,
    Integer,
    Float,
    Date,
}

impl ColumnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::String => "string",
            ColumnType::Integer => "integer",
            ColumnType::Float => "float",
            ColumnType::Date => "date",
        }
    }

    /// Infers the representation of a column.
    ///
    /// Integers mixed with floats widen to float, anything mixed with text (or
    /// dates mixed with numbers) is a string. A column with only missing
    /// markers takes the type of its marker.
    pub fn infer(values: &[CellValue]) -> Self {
        let mut has_text = false;
        let mut has_int = false;
        let mut has_float = false;
        let mut has_date = false;
        let mut missing_number = false;
        let mut missing_date = false;
        for value in values {
            match value {
                CellValue::Text(_) => has_text = true,
                CellValue::Integer(_) => has_int = true,
                CellValue::Float(_) => has_float = true,
                CellValue::Date(_) => has_date = true,
                CellValue::MissingNumber => missing_number = true,
                CellValue::MissingDate => missing_date = true,
                CellValue::MissingString => {}
            }
        }
        let numeric = has_int || has_float;
        if has_text || (numeric && has_date) {
            return ColumnType::String;
        }
        if has_float {
            return ColumnType::Float;
        }
        if has_int {
            return ColumnType::Integer;
        }
        if has_date {
            return ColumnType::Date;
        }
        if missing_number {
            ColumnType::Float
        } else if missing_date {
            ColumnType::Date
        } else {
            ColumnType::String
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-column statistics for one table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnProfile {
    pub name: String,
    pub inferred_type: ColumnType,
    /// Missing values over row count, in `[0, 1]`.
    pub null_rate: f64,
    /// Distinct non-missing values.
    pub distinct_count: usize,
    /// First non-missing values in row order, at most three, duplicates kept.
    pub sample_values: Vec<String>,
}

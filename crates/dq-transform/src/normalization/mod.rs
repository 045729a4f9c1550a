//! Cell-level normalization functions used by the cleaner.
//!
//! - **datetime**: tolerant date parsing with day-first / month-first resolution
//! - **numeric**: numeric coercion of decorated text

pub mod datetime;
pub mod numeric;

pub use datetime::{DateOrder, parse_date};
pub use numeric::{integral, parse_number};

use dq_model::CellValue;

/// Trims text; blank text becomes `MissingString`.
pub fn normalize_text(value: &CellValue) -> CellValue {
    match value {
        CellValue::Text(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                CellValue::MissingString
            } else {
                CellValue::Text(trimmed.to_string())
            }
        }
        other if other.is_missing() => CellValue::MissingString,
        other => CellValue::Text(other.to_string()),
    }
}

/// Keeps ASCII digits only; no digits becomes `MissingString`.
pub fn normalize_digits(value: &CellValue) -> CellValue {
    if value.is_missing() {
        return CellValue::MissingString;
    }
    let digits: String = value
        .to_string()
        .chars()
        .filter(char::is_ascii_digit)
        .collect();
    if digits.is_empty() {
        CellValue::MissingString
    } else {
        CellValue::Text(digits)
    }
}

/// Integral values become `Integer`; other finite numbers stay `Float`.
pub fn normalize_integer(value: &CellValue) -> CellValue {
    let parsed = match value {
        CellValue::Integer(v) => return CellValue::Integer(*v),
        CellValue::Float(v) => Some(*v).filter(|v| v.is_finite()),
        CellValue::Text(s) => parse_number(s),
        _ => None,
    };
    match parsed {
        Some(v) => integral(v).map_or(CellValue::Float(v), CellValue::Integer),
        None => CellValue::MissingNumber,
    }
}

pub fn normalize_float(value: &CellValue) -> CellValue {
    let parsed = match value {
        CellValue::Integer(v) => Some(*v as f64),
        CellValue::Float(v) => Some(*v).filter(|v| v.is_finite()),
        CellValue::Text(s) => parse_number(s),
        _ => None,
    };
    parsed.map_or(CellValue::MissingNumber, CellValue::Float)
}

pub fn normalize_date(value: &CellValue, order: DateOrder) -> CellValue {
    match value {
        CellValue::Date(d) => CellValue::Date(*d),
        CellValue::Text(s) => parse_date(s, order).map_or(CellValue::MissingDate, CellValue::Date),
        _ => CellValue::MissingDate,
    }
}

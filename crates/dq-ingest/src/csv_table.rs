use std::fs::File;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::info;

use dq_model::{CellValue, DqError, Result, Table};

/// Cell contents treated as missing on load (compared after trimming).
pub const NULL_TOKENS: &[&str] = &["", "NA", "N/A", "null", "None"];

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

/// Loads a raw cell. Values are kept verbatim; only null tokens are interpreted.
pub fn raw_cell(value: &str) -> CellValue {
    if is_null_token(value) {
        CellValue::MissingString
    } else {
        CellValue::Text(value.to_string())
    }
}

pub fn is_null_token(value: &str) -> bool {
    let trimmed = value.trim();
    NULL_TOKENS.contains(&trimmed)
}

/// Reads a CSV file into a raw table of text cells.
///
/// The first record is the header. Fully blank lines are skipped; short rows
/// are padded with missing cells and long rows truncated.
pub fn read_csv_table(path: &Path) -> Result<Table> {
    let file = File::open(path).map_err(|source| DqError::io(path, source))?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);
    let csv_error = |error: csv::Error| DqError::Csv {
        path: path.to_path_buf(),
        message: error.to_string(),
    };
    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(normalize_header)
        .collect();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        if record.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        rows.push(record.iter().map(raw_cell).collect::<Vec<_>>());
    }
    let table = Table::from_rows(headers, rows)?;
    info!(
        path = %path.display(),
        rows = table.height(),
        columns = table.width(),
        "loaded csv"
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_normalization_strips_bom_and_spaces() {
        assert_eq!(normalize_header("\u{feff}order_id"), "order_id");
        assert_eq!(normalize_header("  unit   price "), "unit price");
    }

    #[test]
    fn null_tokens_become_missing() {
        for token in ["", "  ", "NA", "N/A", "null", " None "] {
            assert_eq!(raw_cell(token), CellValue::MissingString, "{token:?}");
        }
        assert_eq!(raw_cell(" nan "), CellValue::Text(" nan ".to_string()));
        assert_eq!(raw_cell(" Norte "), CellValue::Text(" Norte ".to_string()));
    }
}

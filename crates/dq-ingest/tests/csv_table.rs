use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use tempfile::TempDir;

use dq_ingest::{read_csv_table, write_clean_csv};
use dq_model::{CellValue, Column, DqError, Table};

fn temp_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write file");
    path
}

#[test]
fn reads_raw_cells_verbatim() {
    let dir = TempDir::new().unwrap();
    let path = temp_file(
        &dir,
        "sales.csv",
        "order_id,region,notes\n1001, Norte ,NA\n\n1002,,\"a, b\"\n",
    );
    let table = read_csv_table(&path).expect("read csv");

    assert_eq!(table.column_names(), vec!["order_id", "region", "notes"]);
    assert_eq!(table.height(), 2);
    let region = &table.column("region").unwrap().values;
    assert_eq!(region[0], CellValue::Text(" Norte ".to_string()));
    assert_eq!(region[1], CellValue::MissingString);
    let notes = &table.column("notes").unwrap().values;
    assert_eq!(notes[0], CellValue::MissingString);
    assert_eq!(notes[1], CellValue::Text("a, b".to_string()));
}

#[test]
fn pads_short_rows() {
    let dir = TempDir::new().unwrap();
    let path = temp_file(&dir, "short.csv", "a,b,c\n1\n2,3,4,5\n");
    let table = read_csv_table(&path).expect("read csv");
    assert_eq!(table.height(), 2);
    assert_eq!(table.width(), 3);
    assert_eq!(table.column("c").unwrap().values[0], CellValue::MissingString);
    assert_eq!(
        table.column("c").unwrap().values[1],
        CellValue::Text("4".to_string())
    );
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let error = read_csv_table(&dir.path().join("absent.csv")).unwrap_err();
    assert!(matches!(error, DqError::Io { .. }));
}

#[test]
fn writes_clean_csv_with_nulls_as_empty() {
    let dir = TempDir::new().unwrap();
    let date = NaiveDate::from_ymd_opt(2024, 3, 9)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let table = Table::new(vec![
        Column::new("order_id", vec![CellValue::Integer(1), CellValue::Integer(2)]),
        Column::new("order_date", vec![CellValue::Date(date), CellValue::MissingDate]),
        Column::new(
            "region",
            vec![CellValue::Text("Norte".into()), CellValue::MissingString],
        ),
    ])
    .unwrap();
    let path = dir.path().join("clean").join("sales_clean.csv");

    write_clean_csv(&table, &path).expect("write csv");

    let mut reader = csv::ReaderBuilder::new().from_path(&path).unwrap();
    let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(headers, vec!["order_id", "order_date", "region"]);
    let rows: Vec<Vec<String>> = reader
        .records()
        .map(|record| record.unwrap().iter().map(String::from).collect())
        .collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0], vec!["1", "2024-03-09", "Norte"]);
    assert_eq!(rows[1], vec!["2", "", ""]);
}

//! Column profiling.

use std::collections::HashSet;

use dq_model::{ColumnProfile, ColumnType, Table};

const SAMPLE_VALUES: usize = 3;

/// Profiles every column of `table`, in column order.
pub fn profile_table(table: &Table) -> Vec<ColumnProfile> {
    let rows = table.height();
    table
        .columns()
        .iter()
        .map(|column| {
            let missing = column.missing_count();
            let distinct: HashSet<_> = column
                .values
                .iter()
                .filter(|value| !value.is_missing())
                .map(|value| value.key())
                .collect();
            let sample_values = column
                .values
                .iter()
                .filter(|value| !value.is_missing())
                .take(SAMPLE_VALUES)
                .map(ToString::to_string)
                .collect();
            ColumnProfile {
                name: column.name.clone(),
                inferred_type: ColumnType::infer(&column.values),
                null_rate: if rows == 0 {
                    0.0
                } else {
                    missing as f64 / rows as f64
                },
                distinct_count: distinct.len(),
                sample_values,
            }
        })
        .collect()
}

/// Report ordering: highest null rate first, then fewest distinct values.
/// Ties keep column order.
pub fn sorted_for_display(profiles: &[ColumnProfile]) -> Vec<&ColumnProfile> {
    let mut sorted: Vec<&ColumnProfile> = profiles.iter().collect();
    sorted.sort_by(|a, b| {
        b.null_rate
            .total_cmp(&a.null_rate)
            .then(a.distinct_count.cmp(&b.distinct_count))
    });
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use dq_model::{CellValue, Column};

    fn text(value: &str) -> CellValue {
        CellValue::Text(value.to_string())
    }

    #[test]
    fn profiles_nulls_distincts_and_samples() {
        let table = Table::new(vec![
            Column::new(
                "region",
                vec![
                    text("Norte"),
                    CellValue::MissingString,
                    text("Norte"),
                    text("Sur"),
                    text("Este"),
                ],
            ),
            Column::new(
                "qty",
                vec![
                    CellValue::Integer(1),
                    CellValue::Integer(2),
                    CellValue::MissingNumber,
                    CellValue::MissingNumber,
                    CellValue::Integer(2),
                ],
            ),
        ])
        .unwrap();
        let profiles = profile_table(&table);

        assert_eq!(profiles[0].name, "region");
        assert_eq!(profiles[0].inferred_type, ColumnType::String);
        assert!((profiles[0].null_rate - 0.2).abs() < 1e-12);
        assert_eq!(profiles[0].distinct_count, 3);
        assert_eq!(profiles[0].sample_values, vec!["Norte", "Norte", "Sur"]);

        assert_eq!(profiles[1].inferred_type, ColumnType::Integer);
        assert!((profiles[1].null_rate - 0.4).abs() < 1e-12);
        assert_eq!(profiles[1].distinct_count, 2);
    }

    #[test]
    fn empty_table_has_zero_null_rate() {
        let table = Table::new(vec![Column::new("a", vec![])]).unwrap();
        let profiles = profile_table(&table);
        assert_eq!(profiles[0].null_rate, 0.0);
        assert_eq!(profiles[0].distinct_count, 0);
        assert!(profiles[0].sample_values.is_empty());
        assert_eq!(profiles[0].inferred_type, ColumnType::String);
    }

    #[test]
    fn display_order_sorts_by_null_rate_then_distincts() {
        let profile = |name: &str, null_rate: f64, distinct_count: usize| ColumnProfile {
            name: name.to_string(),
            inferred_type: ColumnType::String,
            null_rate,
            distinct_count,
            sample_values: Vec::new(),
        };
        let profiles = vec![
            profile("a", 0.0, 5),
            profile("b", 0.5, 9),
            profile("c", 0.5, 2),
            profile("d", 0.0, 5),
        ];
        let names: Vec<&str> = sorted_for_display(&profiles)
            .iter()
            .map(|profile| profile.name.as_str())
            .collect();
        assert_eq!(names, vec!["c", "b", "a", "d"]);
    }

    #[test]
    fn profiling_is_deterministic() {
        let table = Table::new(vec![Column::new(
            "email",
            vec![text("a@x.co"), text("b@x.co"), CellValue::MissingString],
        )])
        .unwrap();
        assert_eq!(profile_table(&table), profile_table(&table));
    }
}

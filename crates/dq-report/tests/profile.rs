use dq_model::{CellValue, Column, Table};
use dq_report::{profile_table, sorted_for_display};
use proptest::prelude::*;

fn cell() -> impl Strategy<Value = CellValue> {
    prop_oneof![
        Just(CellValue::MissingString),
        Just(CellValue::MissingNumber),
        (-5i64..5).prop_map(CellValue::Integer),
        "[a-c]{0,2}".prop_map(CellValue::Text),
    ]
}

fn table() -> impl Strategy<Value = Table> {
    (1usize..4, 0usize..12).prop_flat_map(|(width, height)| {
        prop::collection::vec(prop::collection::vec(cell(), height), width).prop_map(|columns| {
            let columns = columns
                .into_iter()
                .enumerate()
                .map(|(index, values)| Column::new(format!("c{index}"), values))
                .collect();
            Table::new(columns).unwrap()
        })
    })
}

proptest! {
    #[test]
    fn profiling_is_deterministic(table in table()) {
        prop_assert_eq!(profile_table(&table), profile_table(&table));
    }

    #[test]
    fn profile_statistics_stay_in_bounds(table in table()) {
        let profiles = profile_table(&table);
        prop_assert_eq!(profiles.len(), table.width());
        for (profile, column) in profiles.iter().zip(table.columns()) {
            let present = table.height() - column.missing_count();
            prop_assert!((0.0..=1.0).contains(&profile.null_rate));
            prop_assert!(profile.distinct_count <= present);
            prop_assert_eq!(profile.sample_values.len(), present.min(3));
        }
    }

    #[test]
    fn display_order_is_a_permutation(table in table()) {
        let profiles = profile_table(&table);
        let sorted = sorted_for_display(&profiles);
        prop_assert_eq!(sorted.len(), profiles.len());
        for pair in sorted.windows(2) {
            prop_assert!(pair[0].null_rate >= pair[1].null_rate);
        }
    }
}

use dq_model::{
    CellValue, Column, DatasetKind, Rule, RuleCheck, RuleResult, RuleStatus, Severity, Table,
};
use dq_validate::{RuleEngine, evaluate_rule, evaluate_rules, rules_for_dataset};
use proptest::prelude::*;

fn text(value: &str) -> CellValue {
    CellValue::Text(value.to_string())
}

fn sales_row(
    order_id: i64,
    region: Option<&str>,
    qty: Option<i64>,
    unit_price: f64,
    revenue: f64,
) -> Vec<CellValue> {
    vec![
        CellValue::Integer(order_id),
        CellValue::Integer(77),
        region.map_or(CellValue::MissingString, text),
        text("web"),
        text("Widget"),
        qty.map_or(CellValue::MissingNumber, CellValue::Integer),
        CellValue::Float(unit_price),
        CellValue::Float(revenue),
        CellValue::Date(
            chrono::NaiveDate::from_ymd_opt(2024, 1, 15)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        ),
        CellValue::MissingString,
    ]
}

fn sales_table(rows: Vec<Vec<CellValue>>) -> Table {
    let headers = DatasetKind::Sales
        .schema()
        .iter()
        .map(|spec| spec.name.to_string())
        .collect();
    Table::from_rows(headers, rows).unwrap()
}

fn result<'a>(results: &'a [RuleResult], id: &str) -> &'a RuleResult {
    results.iter().find(|result| result.rule_id == id).unwrap()
}

#[test]
fn revenue_off_by_factor_fails_consistency() {
    let table = sales_table(vec![sales_row(1, Some("Norte"), Some(5), 9900.0, 49.5)]);
    let results = evaluate_rules(&table, &rules_for_dataset(DatasetKind::Sales)).unwrap();

    let s004 = result(&results, "S004_revenue_consistency");
    assert_eq!(s004.status, RuleStatus::Fail);
    assert_eq!(s004.failed_rows, vec![0]);
    assert_eq!(s004.severity, Severity::Warn);
    assert_eq!(result(&results, "S001_qty_positive").status, RuleStatus::Pass);
}

#[test]
fn negative_qty_fails_range_and_consistency_independently() {
    let table = sales_table(vec![
        sales_row(1, Some("Norte"), Some(2), 9900.0, 19800.0),
        sales_row(2, Some("Sur"), Some(-1), 9900.0, 9900.0),
    ]);
    let results = evaluate_rules(&table, &rules_for_dataset(DatasetKind::Sales)).unwrap();

    assert_eq!(results.len(), 6);
    assert_eq!(result(&results, "S001_qty_positive").failed_rows, vec![1]);
    assert_eq!(result(&results, "S004_revenue_consistency").failed_rows, vec![1]);
    assert_eq!(result(&results, "S002_unit_price_reasonable").failed_count, 0);
}

#[test]
fn every_row_sharing_an_id_fails_uniqueness() {
    let table = sales_table(vec![
        sales_row(7, Some("Norte"), Some(1), 1000.0, 1000.0),
        sales_row(8, None, Some(1), 1000.0, 1000.0),
        sales_row(7, Some("Sur"), Some(2), 1000.0, 2000.0),
    ]);
    let results = evaluate_rules(&table, &rules_for_dataset(DatasetKind::Sales)).unwrap();

    let s006 = result(&results, "S006_order_id_unique");
    assert_eq!(s006.failed_rows, vec![0, 2]);
    assert!(s006.is_blocking());
    assert_eq!(result(&results, "S005_region_not_null").failed_rows, vec![1]);
}

#[test]
fn missing_qty_fails_range() {
    let table = sales_table(vec![sales_row(1, Some("Norte"), None, 1000.0, 1000.0)]);
    let results = evaluate_rules(&table, &rules_for_dataset(DatasetKind::Sales)).unwrap();
    assert_eq!(result(&results, "S001_qty_positive").failed_count, 1);
    assert_eq!(result(&results, "S004_revenue_consistency").failed_count, 1);
}

#[test]
fn email_format_rejects_missing_at_sign_and_nulls() {
    let table = Table::new(vec![Column::new(
        "email",
        vec![
            text("ana@example.com"),
            text("voqkrugmail.com"),
            CellValue::MissingString,
            text("a b@example.com"),
        ],
    )])
    .unwrap();
    let l001 = rules_for_dataset(DatasetKind::Leads)
        .into_iter()
        .find(|rule| rule.id == "L001_email_format")
        .unwrap();
    assert_eq!(
        evaluate_rule(&table, &l001).unwrap(),
        vec![true, false, false, false]
    );
}

#[test]
fn phone_length_requires_ten_digits() {
    let table = Table::new(vec![Column::new(
        "phone",
        vec![text("3001234567"), text("573001234567"), CellValue::MissingString],
    )])
    .unwrap();
    let l002 = rules_for_dataset(DatasetKind::Leads)
        .into_iter()
        .find(|rule| rule.id == "L002_phone_length")
        .unwrap();
    assert_eq!(evaluate_rule(&table, &l002).unwrap(), vec![true, false, false]);
}

#[test]
fn engine_keeps_declaration_order() {
    let engine = RuleEngine::new(rules_for_dataset(DatasetKind::Leads)).unwrap();
    let ids: Vec<&str> = engine.rules().map(|rule| rule.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "L001_email_format",
            "L002_phone_length",
            "L003_created_at_valid",
            "L004_score_range",
            "L005_lead_id_unique",
        ]
    );
}

fn score_cell() -> impl Strategy<Value = CellValue> {
    prop_oneof![
        Just(CellValue::MissingNumber),
        (-50.0f64..150.0).prop_map(CellValue::Float),
    ]
}

fn id_cell() -> impl Strategy<Value = CellValue> {
    prop_oneof![
        Just(CellValue::MissingNumber),
        (0i64..6).prop_map(CellValue::Integer),
    ]
}

proptest! {
    #[test]
    fn failed_count_matches_false_mask_entries(scores in prop::collection::vec(score_cell(), 0..40)) {
        let table = Table::new(vec![Column::new("score", scores.clone())]).unwrap();
        let rule = Rule::new(
            "T_score",
            "score in range",
            Severity::Warn,
            RuleCheck::Range { column: "score".to_string(), min: Some(0.0), max: Some(100.0) },
        );
        let mask = evaluate_rule(&table, &rule).unwrap();
        let results = evaluate_rules(&table, std::slice::from_ref(&rule)).unwrap();
        let expected = scores
            .iter()
            .filter(|value| !value.as_f64().is_some_and(|v| (0.0..=100.0).contains(&v)))
            .count();
        prop_assert_eq!(mask.len(), table.height());
        prop_assert_eq!(results[0].failed_count, mask.iter().filter(|ok| !**ok).count());
        prop_assert_eq!(results[0].failed_count, expected);
        prop_assert_eq!(results[0].status == RuleStatus::Fail, expected > 0);
    }

    #[test]
    fn repeated_values_fail_every_occurrence(ids in prop::collection::vec(id_cell(), 0..40)) {
        let table = Table::new(vec![Column::new("lead_id", ids.clone())]).unwrap();
        let rule = Rule::new(
            "T_unique",
            "lead_id unique",
            Severity::Error,
            RuleCheck::Unique { column: "lead_id".to_string() },
        );
        let mask = evaluate_rule(&table, &rule).unwrap();
        for (idx, value) in ids.iter().enumerate() {
            let occurrences = ids.iter().filter(|other| *other == value).count();
            let should_pass = value.is_missing() || occurrences == 1;
            prop_assert_eq!(mask[idx], should_pass);
        }
    }
}

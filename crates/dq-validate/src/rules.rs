//! Built-in rule sets.

use dq_model::{DatasetKind, Rule, RuleCheck, Severity};

const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";
const PHONE_PATTERN: &str = r"^\d{10}$";

fn range(column: &str, min: Option<f64>, max: Option<f64>) -> RuleCheck {
    RuleCheck::Range {
        column: column.to_string(),
        min,
        max,
    }
}

fn presence(column: &str) -> RuleCheck {
    RuleCheck::Presence {
        column: column.to_string(),
    }
}

fn unique(column: &str) -> RuleCheck {
    RuleCheck::Unique {
        column: column.to_string(),
    }
}

fn format(column: &str, pattern: &str) -> RuleCheck {
    RuleCheck::Format {
        column: column.to_string(),
        pattern: pattern.to_string(),
    }
}

/// Rules for a dataset kind, in evaluation and report order.
pub fn rules_for_dataset(kind: DatasetKind) -> Vec<Rule> {
    match kind {
        DatasetKind::Sales => sales_rules(),
        DatasetKind::Leads => leads_rules(),
    }
}

fn sales_rules() -> Vec<Rule> {
    vec![
        Rule::new(
            "S001_qty_positive",
            "qty must be >= 1",
            Severity::Error,
            range("qty", Some(1.0), None),
        ),
        Rule::new(
            "S002_unit_price_reasonable",
            "unit_price must be between 1,000 and 200,000",
            Severity::Error,
            range("unit_price", Some(1_000.0), Some(200_000.0)),
        ),
        Rule::new(
            "S003_order_date_present",
            "order_date must be a valid parsed date",
            Severity::Error,
            presence("order_date"),
        ),
        Rule::new(
            "S004_revenue_consistency",
            "revenue should equal qty * unit_price (tolerance 1 peso)",
            Severity::Warn,
            RuleCheck::Consistency {
                factors: vec!["qty".to_string(), "unit_price".to_string()],
                total: "revenue".to_string(),
                tolerance: 1.0,
            },
        ),
        Rule::new(
            "S005_region_not_null",
            "region must not be null",
            Severity::Warn,
            RuleCheck::NotNull {
                column: "region".to_string(),
            },
        ),
        Rule::new(
            "S006_order_id_unique",
            "order_id must be unique after cleaning",
            Severity::Error,
            unique("order_id"),
        ),
    ]
}

fn leads_rules() -> Vec<Rule> {
    vec![
        Rule::new(
            "L001_email_format",
            "email must be valid format",
            Severity::Error,
            format("email", EMAIL_PATTERN),
        ),
        Rule::new(
            "L002_phone_length",
            "phone must have 10 digits (Colombia mobile standard)",
            Severity::Warn,
            format("phone", PHONE_PATTERN),
        ),
        Rule::new(
            "L003_created_at_valid",
            "created_at must be a valid parsed date",
            Severity::Error,
            presence("created_at"),
        ),
        Rule::new(
            "L004_score_range",
            "score must be between 0 and 100",
            Severity::Warn,
            range("score", Some(0.0), Some(100.0)),
        ),
        Rule::new(
            "L005_lead_id_unique",
            "lead_id must be unique after cleaning",
            Severity::Error,
            unique("lead_id"),
        ),
    ]
}

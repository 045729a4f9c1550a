//! Rule evaluation for clean tables.
//!
//! Rules come from a fixed, per-dataset list ([`rules_for_dataset`]). Each rule
//! yields a boolean mask over the clean table; failing rows are data, not
//! errors. Only structural problems (a referenced column is absent, a numeric
//! rule over non-numeric values, an invalid pattern) abort evaluation.

pub mod engine;
pub mod rules;

pub use engine::{RuleEngine, evaluate_rule, evaluate_rules};
pub use rules::rules_for_dataset;

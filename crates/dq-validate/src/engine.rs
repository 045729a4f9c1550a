//! Rule engine.
//!
//! Each [`RuleCheck`] shape maps to a mask builder. Every rule runs over the
//! full table; severity never changes evaluation, it is only carried into
//! the result.

use std::collections::HashMap;

use regex::Regex;
use tracing::{debug, info};

use dq_model::{BoolMask, CellValue, Column, DqError, Result, Rule, RuleCheck, RuleResult, Table};

/// A rule with its pattern compiled, when it has one.
#[derive(Debug, Clone)]
struct CompiledRule {
    rule: Rule,
    pattern: Option<Regex>,
}

impl CompiledRule {
    fn compile(rule: Rule) -> Result<Self> {
        let pattern = match &rule.check {
            RuleCheck::Format { column, pattern } => Some(Regex::new(pattern).map_err(|err| {
                DqError::rule_evaluation(&rule.id, column, format!("invalid pattern: {err}"))
            })?),
            _ => None,
        };
        Ok(Self { rule, pattern })
    }
}

/// Evaluates an ordered rule list against clean tables.
#[derive(Debug, Clone, Default)]
pub struct RuleEngine {
    rules: Vec<CompiledRule>,
}

impl RuleEngine {
    /// Compiles `rules`. Fails on the first invalid format pattern.
    pub fn new(rules: Vec<Rule>) -> Result<Self> {
        let rules = rules
            .into_iter()
            .map(CompiledRule::compile)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter().map(|compiled| &compiled.rule)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Runs every rule, in declaration order, and returns one result per rule.
    pub fn evaluate(&self, table: &Table) -> Result<Vec<RuleResult>> {
        let mut results = Vec::with_capacity(self.rules.len());
        for compiled in &self.rules {
            let mask = compiled_mask(compiled, table)?;
            let result = RuleResult::from_mask(&compiled.rule, &mask);
            info!(
                rule_id = %result.rule_id,
                status = %result.status,
                failed_count = result.failed_count,
                "evaluated rule"
            );
            results.push(result);
        }
        Ok(results)
    }
}

/// Evaluates `rules` against `table`; one result per rule, in order.
pub fn evaluate_rules(table: &Table, rules: &[Rule]) -> Result<Vec<RuleResult>> {
    RuleEngine::new(rules.to_vec())?.evaluate(table)
}

/// Row mask for a single rule. `true` means the row satisfies it.
pub fn evaluate_rule(table: &Table, rule: &Rule) -> Result<BoolMask> {
    let compiled = CompiledRule::compile(rule.clone())?;
    compiled_mask(&compiled, table)
}

fn compiled_mask(compiled: &CompiledRule, table: &Table) -> Result<BoolMask> {
    let rule = &compiled.rule;
    debug!(rule_id = %rule.id, shape = rule.check.shape_name(), "building mask");
    match &rule.check {
        RuleCheck::Range { column, min, max } => {
            let values = numeric_values(rule, require_column(rule, table, column)?)?;
            Ok(values
                .into_iter()
                .map(|value| value.is_some_and(|v| within(v, *min, *max)))
                .collect())
        }
        RuleCheck::NotNull { column } => Ok(require_column(rule, table, column)?
            .values
            .iter()
            .map(|value| match value {
                CellValue::Text(s) => !s.trim().is_empty(),
                other => !other.is_missing(),
            })
            .collect()),
        RuleCheck::Presence { column } => Ok(require_column(rule, table, column)?
            .values
            .iter()
            .map(|value| !value.is_missing())
            .collect()),
        RuleCheck::Format { column, pattern } => {
            let column = require_column(rule, table, column)?;
            let regex = match &compiled.pattern {
                Some(regex) => regex,
                None => {
                    return Err(DqError::rule_evaluation(
                        &rule.id,
                        &column.name,
                        format!("pattern `{pattern}` was not compiled"),
                    ));
                }
            };
            Ok(column
                .values
                .iter()
                .map(|value| match value {
                    CellValue::Text(s) => regex.is_match(s),
                    other if other.is_missing() => false,
                    other => regex.is_match(&other.to_string()),
                })
                .collect())
        }
        RuleCheck::Consistency {
            factors,
            total,
            tolerance,
        } => {
            let factor_values = factors
                .iter()
                .map(|name| numeric_values(rule, require_column(rule, table, name)?))
                .collect::<Result<Vec<_>>>()?;
            let totals = numeric_values(rule, require_column(rule, table, total)?)?;
            Ok((0..table.height())
                .map(|row| {
                    let product = factor_values
                        .iter()
                        .try_fold(1.0, |acc, column| column[row].map(|v| acc * v));
                    match (product, totals[row]) {
                        (Some(product), Some(total)) => (product - total).abs() <= *tolerance,
                        _ => false,
                    }
                })
                .collect())
        }
        RuleCheck::Unique { column } => {
            let column = require_column(rule, table, column)?;
            let mut counts = HashMap::new();
            for value in column.values.iter().filter(|value| !value.is_missing()) {
                *counts.entry(value.key()).or_insert(0usize) += 1;
            }
            Ok(column
                .values
                .iter()
                .map(|value| value.is_missing() || counts.get(&value.key()) == Some(&1))
                .collect())
        }
    }
}

fn within(value: f64, min: Option<f64>, max: Option<f64>) -> bool {
    min.is_none_or(|min| value >= min) && max.is_none_or(|max| value <= max)
}

fn require_column<'a>(rule: &Rule, table: &'a Table, name: &str) -> Result<&'a Column> {
    table
        .column(name)
        .ok_or_else(|| DqError::rule_evaluation(&rule.id, name, "column not found"))
}

/// Numeric view of a column; `None` for missing markers.
fn numeric_values(rule: &Rule, column: &Column) -> Result<Vec<Option<f64>>> {
    column
        .values
        .iter()
        .enumerate()
        .map(|(row, value)| match value {
            CellValue::Integer(_) | CellValue::Float(_) => Ok(value.as_f64()),
            other if other.is_missing() => Ok(None),
            other => Err(DqError::rule_evaluation(
                &rule.id,
                &column.name,
                format!("non-numeric value `{other}` at row {row}"),
            )),
        })
        .collect()
}

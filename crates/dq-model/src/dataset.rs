//! Dataset types and their fixed input schemas.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How a declared column is normalized by the cleaner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    /// Free text, trimmed.
    Text,
    /// Digits only (phone numbers and similar identifiers).
    Digits,
    Integer,
    Float,
    Date,
}

impl ColumnKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnKind::Text => "text",
            ColumnKind::Digits => "digits",
            ColumnKind::Integer => "integer",
            ColumnKind::Float => "float",
            ColumnKind::Date => "date",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub kind: ColumnKind,
}

const fn spec(name: &'static str, kind: ColumnKind) -> ColumnSpec {
    ColumnSpec { name, kind }
}

const SALES_SCHEMA: &[ColumnSpec] = &[
    spec("order_id", ColumnKind::Integer),
    spec("customer_id", ColumnKind::Integer),
    spec("region", ColumnKind::Text),
    spec("channel", ColumnKind::Text),
    spec("product", ColumnKind::Text),
    spec("qty", ColumnKind::Integer),
    spec("unit_price", ColumnKind::Float),
    spec("revenue", ColumnKind::Float),
    spec("order_date", ColumnKind::Date),
    spec("notes", ColumnKind::Text),
];

const LEADS_SCHEMA: &[ColumnSpec] = &[
    spec("lead_id", ColumnKind::Integer),
    spec("email", ColumnKind::Text),
    spec("phone", ColumnKind::Digits),
    spec("source", ColumnKind::Text),
    spec("status", ColumnKind::Text),
    spec("created_at", ColumnKind::Date),
    spec("city", ColumnKind::Text),
    spec("score", ColumnKind::Float),
    spec("notes", ColumnKind::Text),
];

/// A named schema plus a fixed rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetKind {
    Sales,
    Leads,
}

impl DatasetKind {
    pub const ALL: [DatasetKind; 2] = [DatasetKind::Sales, DatasetKind::Leads];

    pub fn as_str(&self) -> &'static str {
        match self {
            DatasetKind::Sales => "sales",
            DatasetKind::Leads => "leads",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            DatasetKind::Sales => "Sales orders (one record per order)",
            DatasetKind::Leads => "Marketing leads (one record per lead)",
        }
    }

    /// Required columns, in canonical order.
    pub fn schema(&self) -> &'static [ColumnSpec] {
        match self {
            DatasetKind::Sales => SALES_SCHEMA,
            DatasetKind::Leads => LEADS_SCHEMA,
        }
    }

    /// Declared kind of a column; columns outside the schema are text.
    pub fn column_kind(&self, name: &str) -> ColumnKind {
        self.schema()
            .iter()
            .find(|spec| spec.name == name)
            .map(|spec| spec.kind)
            .unwrap_or(ColumnKind::Text)
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatasetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sales" => Ok(DatasetKind::Sales),
            "leads" => Ok(DatasetKind::Leads),
            other => Err(format!("unknown dataset: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dataset_names() {
        assert_eq!("sales".parse::<DatasetKind>(), Ok(DatasetKind::Sales));
        assert_eq!(" Leads ".parse::<DatasetKind>(), Ok(DatasetKind::Leads));
        assert!("orders".parse::<DatasetKind>().is_err());
    }

    #[test]
    fn unknown_columns_default_to_text() {
        assert_eq!(DatasetKind::Sales.column_kind("comment"), ColumnKind::Text);
        assert_eq!(DatasetKind::Leads.column_kind("phone"), ColumnKind::Digits);
    }
}

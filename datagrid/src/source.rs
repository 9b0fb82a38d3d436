//! Data sources that column filters narrow.

use serde_json::{Map, Value};

use crate::column::value_to_string;

/// Condition a column applies to a data source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterCondition {
    /// Cell text equals the value.
    Equals(String),
    /// Cell text contains the value, ignoring case.
    Contains(String),
}

impl FilterCondition {
    /// Whether `cell` satisfies the condition.
    pub fn matches(&self, cell: &str) -> bool {
        match self {
            FilterCondition::Equals(value) => cell == value,
            FilterCondition::Contains(value) => {
                cell.to_lowercase().contains(&value.to_lowercase())
            }
        }
    }
}

/// Something a column filter can narrow.
pub trait DataSource {
    /// Restricts the source to rows whose `column` satisfies `condition`.
    fn narrow(&mut self, column: &str, condition: &FilterCondition);
}

/// In-memory rows keyed by column name.
#[derive(Debug, Clone, Default)]
pub struct RowSet {
    rows: Vec<Map<String, Value>>,
}

impl RowSet {
    pub fn new(rows: Vec<Map<String, Value>>) -> Self {
        Self { rows }
    }

    /// Builds a row set from JSON objects; other values are skipped.
    pub fn from_values(values: impl IntoIterator<Item = Value>) -> Self {
        Self {
            rows: values
                .into_iter()
                .filter_map(|v| match v {
                    Value::Object(map) => Some(map),
                    _ => None,
                })
                .collect(),
        }
    }

    pub fn rows(&self) -> &[Map<String, Value>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl DataSource for RowSet {
    fn narrow(&mut self, column: &str, condition: &FilterCondition) {
        self.rows.retain(|row| {
            row.get(column)
                .is_some_and(|cell| condition.matches(&value_to_string(cell)))
        });
    }
}

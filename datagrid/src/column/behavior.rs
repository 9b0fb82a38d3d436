//! Column behaviours: how cell values are formatted and how filter values
//! narrow a data source.

use std::fmt;

use serde_json::Value;

use super::{Column, value_to_string};
use crate::error::{GridError, Result};
use crate::source::{DataSource, FilterCondition};

/// Formatting and filtering strategy of a column.
///
/// The defaults convert the value to a string and ignore filter values.
pub trait ColumnBehavior: fmt::Debug + Send + Sync {
    /// Formats a cell's raw value for display.
    fn format_content(&self, column: &Column, value: &Value, row: Option<&Value>) -> String {
        let _ = (column, row);
        value_to_string(value)
    }

    /// Narrows `source` by a filter value entered for `column`.
    fn apply_filter(&self, column: &Column, source: &mut dyn DataSource, value: &str) -> Result<()> {
        let _ = (column, source, value);
        Ok(())
    }
}

/// Plain column: string conversion only, filtering is a no-op.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainColumn;

impl ColumnBehavior for PlainColumn {}

/// Text column.
///
/// Formatting runs the column's format callbacks first, then its
/// replacements, then truncates to `max_length` characters (ending in `…`).
/// Filtering keeps rows whose cell contains the value, ignoring case.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextColumn;

impl ColumnBehavior for TextColumn {
    fn format_content(&self, column: &Column, value: &Value, row: Option<&Value>) -> String {
        let mut text = value_to_string(value);
        for callback in column.format_callbacks() {
            text = callback(text, row);
        }
        for replacement in column.replacements() {
            text = replacement.apply(&text);
        }
        truncate(text, column.max_length())
    }

    fn apply_filter(&self, column: &Column, source: &mut dyn DataSource, value: &str) -> Result<()> {
        let name = column.name().ok_or(GridError::NotAttached)?;
        if value.is_empty() {
            return Ok(());
        }
        source.narrow(&name, &FilterCondition::Contains(value.to_string()));
        Ok(())
    }
}

fn truncate(text: String, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        return text;
    }
    let mut out: String = text.chars().take(max_length.saturating_sub(1)).collect();
    out.push('…');
    out
}

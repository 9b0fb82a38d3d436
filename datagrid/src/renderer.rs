//! Cell renderers.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::column::Column;
use crate::error::{GridError, Result};

/// Draws a column's cells.
pub trait ColumnRenderer: fmt::Debug + Send + Sync {
    /// Renders one cell of `column` for the given raw value and row.
    fn render_cell(&self, column: &Column, value: &Value, row: Option<&Value>) -> String;
}

/// How a column's cells are drawn: by registry name or by a renderer object.
#[derive(Debug, Clone)]
pub enum RendererRef {
    /// Resolved by the grid's renderer registry.
    ById(String),
    /// Used directly.
    ByInstance(Arc<dyn ColumnRenderer>),
}

impl RendererRef {
    /// The identifier, for renderers referenced by name.
    pub fn id(&self) -> Option<&str> {
        match self {
            RendererRef::ById(id) => Some(id),
            RendererRef::ByInstance(_) => None,
        }
    }

    pub fn instance(&self) -> Option<&Arc<dyn ColumnRenderer>> {
        match self {
            RendererRef::ById(_) => None,
            RendererRef::ByInstance(renderer) => Some(renderer),
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        match self {
            RendererRef::ById(id) if id.trim().is_empty() => Err(GridError::invalid_argument(
                "Renderer can only be string id or renderer object itself",
            )),
            _ => Ok(()),
        }
    }
}

impl From<&str> for RendererRef {
    fn from(id: &str) -> Self {
        RendererRef::ById(id.to_string())
    }
}

impl From<String> for RendererRef {
    fn from(id: String) -> Self {
        RendererRef::ById(id)
    }
}

impl From<Arc<dyn ColumnRenderer>> for RendererRef {
    fn from(renderer: Arc<dyn ColumnRenderer>) -> Self {
        RendererRef::ByInstance(renderer)
    }
}

/// Renders the formatted content inside a copy of the column's cell prototype.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrototypeRenderer;

impl ColumnRenderer for PrototypeRenderer {
    fn render_cell(&self, column: &Column, value: &Value, row: Option<&Value>) -> String {
        column
            .cell_prototype()
            .with_text(column.format_content(value, row))
            .render()
    }
}

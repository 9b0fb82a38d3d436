//! Data grid columns
//!
//! Columns describe how one field of a row is displayed, ordered and
//! filtered. They are declared standalone, attached to a [`Grid`] later, and
//! then push default sorting and filtering into the grid's persisted state.

pub mod attach;
pub mod codec;
pub mod column;
pub mod config;
pub mod error;
pub mod filter;
pub mod grid;
pub mod html;
pub mod renderer;
pub mod source;

pub use attach::{AttachOutcome, Attachment, AttachmentMonitor};
pub use codec::{SortDirection, StateMap};
pub use column::{Column, ColumnBehavior, ColumnId, PlainColumn, TextColumn};
pub use config::{ColumnConfig, GridConfig};
pub use error::{GridError, Result};
pub use filter::{
    CheckboxFilter, ColumnFilter, DateFilter, FilterId, FilterKind, FilterRegistry,
    SelectboxFilter, SharedFilter, TextFilter,
};
pub use grid::{Grid, GridBuilder, GridId, GridStateSnapshot, LinkGenerator, Translator};
pub use html::{Caption, HtmlElement};
pub use renderer::{ColumnRenderer, RendererRef};
pub use source::{DataSource, FilterCondition, RowSet};

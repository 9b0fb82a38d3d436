//! Grid columns.
//!
//! A [`Column`] describes how one field of a row is displayed, ordered and
//! filtered. Columns are declared standalone and learn their name and owner
//! when [`Grid::add_column`] attaches them:
//!
//! ```
//! use datagrid::{Column, Grid};
//!
//! let column = Column::new();
//! assert!(column.try_owner().is_none());
//!
//! let grid = Grid::new();
//! let column = grid.add_column("status", column).unwrap();
//! assert_eq!(column.caption().unwrap().as_text(), "status");
//! ```

mod behavior;

pub use behavior::{ColumnBehavior, PlainColumn, TextColumn};

use std::fmt;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::debug;
use regex::Regex;
use serde_json::Value;

use crate::attach::{AttachOutcome, Attachment, AttachmentMonitor};
use crate::codec::SortDirection;
use crate::config::ColumnConfig;
use crate::error::{GridError, Result};
use crate::filter::{
    CheckboxFilter, DateFilter, FilterRegistry, SelectboxFilter, SharedFilter, TextFilter,
};
use crate::grid::{Grid, StateField, WeakGrid};
use crate::html::{Caption, HtmlElement};
use crate::renderer::RendererRef;
use crate::source::DataSource;

/// Transform applied to a cell's text before display. Receives the current
/// text and the row it belongs to.
pub type FormatCallback = Arc<dyn Fn(String, Option<&Value>) -> String + Send + Sync>;

/// Converts a raw cell value to display text.
///
/// `null` and `false` become empty, `true` becomes `"1"`, strings are taken
/// verbatim and everything else uses its JSON form.
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::Null | Value::Bool(false) => String::new(),
        Value::Bool(true) => "1".to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// A regex substitution applied to displayed values.
#[derive(Debug, Clone)]
pub struct Replacement {
    pattern: Regex,
    replacement: String,
}

impl Replacement {
    pub fn new(pattern: &str, replacement: impl Into<String>) -> Result<Self> {
        let compiled = Regex::new(pattern).map_err(|e| GridError::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self {
            pattern: compiled,
            replacement: replacement.into(),
        })
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn apply(&self, text: &str) -> String {
        self.pattern
            .replace_all(text, self.replacement.as_str())
            .into_owned()
    }
}

/// Unique identifier for a column instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColumnId(usize);

impl ColumnId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

struct ColumnInner {
    name: Option<String>,
    caption: Option<Caption>,
    max_length: NonZeroUsize,
    orderable: bool,
    replacements: Vec<Replacement>,
    format_callbacks: Vec<FormatCallback>,
    renderer: RendererRef,
    header: HtmlElement,
    cell: HtmlElement,
    ajax_class: String,
    filters: FilterRegistry,
    owner: Attachment<WeakGrid>,
}

/// A grid column.
///
/// `Column` is a cheap handle; clones share state. Configuration methods
/// take `&self` and return it for chaining.
#[derive(Clone)]
pub struct Column {
    id: ColumnId,
    inner: Arc<RwLock<ColumnInner>>,
    behavior: Arc<dyn ColumnBehavior>,
}

impl Column {
    /// Creates a detached column with default configuration.
    pub fn new() -> Self {
        Self::with_config(ColumnConfig::default())
    }

    /// Creates a detached column from `config`.
    pub fn with_config(config: ColumnConfig) -> Self {
        Self {
            id: ColumnId::new(),
            inner: Arc::new(RwLock::new(ColumnInner {
                name: None,
                caption: None,
                max_length: config.max_length,
                orderable: config.orderable,
                replacements: Vec::new(),
                format_callbacks: Vec::new(),
                renderer: RendererRef::ById(config.renderer),
                header: HtmlElement::empty(),
                cell: HtmlElement::empty(),
                ajax_class: config.ajax_class,
                filters: FilterRegistry::new(),
                owner: Attachment::Detached,
            })),
            behavior: Arc::new(PlainColumn),
        }
    }

    /// Creates a detached column with a caption.
    pub fn captioned(caption: impl Into<Caption>) -> Self {
        Self::new().with_caption(caption)
    }

    /// Creates a detached text column (see [`TextColumn`]).
    pub fn text() -> Self {
        Self::new().with_behavior(TextColumn)
    }

    /// Sets the caption while building.
    pub fn with_caption(self, caption: impl Into<Caption>) -> Self {
        self.set_caption(caption);
        self
    }

    /// Replaces the formatting/filtering behaviour while building.
    pub fn with_behavior(mut self, behavior: impl ColumnBehavior + 'static) -> Self {
        self.behavior = Arc::new(behavior);
        self
    }

    pub fn id(&self) -> ColumnId {
        self.id
    }

    /// Name assigned by the grid; `None` while detached.
    pub fn name(&self) -> Option<String> {
        self.inner.read().map(|g| g.name.clone()).unwrap_or(None)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, ColumnInner>> {
        self.inner.read().map_err(|_| GridError::StateUnavailable)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, ColumnInner>> {
        self.inner.write().map_err(|_| GridError::StateUnavailable)
    }

    // -------------------------------------------------------------------------
    // Attachment
    // -------------------------------------------------------------------------

    pub fn is_attached(&self) -> bool {
        self.inner
            .read()
            .map(|g| g.owner.is_attached())
            .unwrap_or(false)
    }

    /// The grid this column is bound to.
    pub fn owner(&self) -> Result<Grid> {
        self.try_owner().ok_or(GridError::NotAttached)
    }

    /// The grid this column is bound to, if any.
    pub fn try_owner(&self) -> Option<Grid> {
        self.inner
            .read()
            .ok()
            .and_then(|g| g.owner.owner().and_then(WeakGrid::upgrade))
    }

    /// Names the column and binds it to `grid` under a single lock.
    ///
    /// The name is committed only when the column was still detached.
    /// Re-binding to the same grid under the same name is a no-op; anything
    /// else fails with `AlreadyAttached` and leaves the column untouched.
    pub(crate) fn bind(&self, name: &str, grid: &Grid) -> Result<AttachOutcome> {
        let mut inner = self.write()?;
        if inner.owner.is_attached() {
            let same_grid = inner.owner.owner().is_some_and(|owner| owner.id() == grid.id());
            if same_grid && inner.name.as_deref() == Some(name) {
                return Ok(AttachOutcome::Unchanged);
            }
            return Err(GridError::AlreadyAttached {
                column: inner.name.clone().unwrap_or_default(),
            });
        }
        let previous = inner.name.replace(name.to_string());
        let outcome = attach_locked(&mut inner, grid);
        match outcome {
            Ok(AttachOutcome::Bound) => {
                inner.filters.set_column(name);
                Ok(AttachOutcome::Bound)
            }
            other => {
                inner.name = previous;
                other
            }
        }
    }

    /// Owner and name, both required by grid-backed operations.
    fn bound(&self) -> Result<(Grid, String)> {
        let grid = self.owner()?;
        let name = self.name().ok_or(GridError::NotAttached)?;
        Ok((grid, name))
    }

    // -------------------------------------------------------------------------
    // Caption and links
    // -------------------------------------------------------------------------

    /// Caption as configured, before translation.
    pub fn raw_caption(&self) -> Option<Caption> {
        self.inner.read().map(|g| g.caption.clone()).unwrap_or(None)
    }

    pub fn set_caption(&self, caption: impl Into<Caption>) -> &Self {
        if let Ok(mut inner) = self.inner.write() {
            inner.caption = Some(caption.into());
        }
        self
    }

    /// Caption translated through the owning grid.
    ///
    /// Rich captions carrying a `title` get the title translated; other rich
    /// captions get their text translated.
    pub fn caption(&self) -> Result<Caption> {
        let grid = self.owner()?;
        let caption = self
            .raw_caption()
            .unwrap_or_else(|| Caption::Text(String::new()));
        Ok(match caption {
            Caption::Html(el) => match el.title() {
                Some(title) => {
                    let translated = grid.translate(title);
                    Caption::Html(el.with_title(translated))
                }
                None => {
                    let translated = grid.translate(el.text());
                    Caption::Html(el.with_text(translated))
                }
            },
            Caption::Text(text) => Caption::Text(grid.translate(&text)),
        })
    }

    /// Link ordering the grid by this column.
    pub fn order_link(&self, direction: Option<SortDirection>) -> Result<String> {
        let (grid, name) = self.bound()?;
        Ok(grid.link(
            &grid.config().order_signal,
            &[
                ("by", Some(name.as_str())),
                ("dir", direction.map(SortDirection::code)),
            ],
        ))
    }

    pub fn is_orderable(&self) -> bool {
        self.inner.read().map(|g| g.orderable).unwrap_or(false)
    }

    pub fn set_orderable(&self, orderable: bool) -> &Self {
        if let Ok(mut inner) = self.inner.write() {
            inner.orderable = orderable;
        }
        self
    }

    pub fn ajax_class(&self) -> String {
        self.inner
            .read()
            .map(|g| g.ajax_class.clone())
            .unwrap_or_default()
    }

    // -------------------------------------------------------------------------
    // Prototypes
    // -------------------------------------------------------------------------

    /// Template of the header cell.
    pub fn header_prototype(&self) -> HtmlElement {
        self.inner
            .read()
            .map(|g| g.header.clone())
            .unwrap_or_default()
    }

    /// Template of body cells.
    pub fn cell_prototype(&self) -> HtmlElement {
        self.inner
            .read()
            .map(|g| g.cell.clone())
            .unwrap_or_default()
    }

    /// Edits the header template in place.
    pub fn update_header(&self, edit: impl FnOnce(&mut HtmlElement)) -> &Self {
        if let Ok(mut inner) = self.inner.write() {
            edit(&mut inner.header);
        }
        self
    }

    /// Edits the cell template in place.
    pub fn update_cell(&self, edit: impl FnOnce(&mut HtmlElement)) -> &Self {
        if let Ok(mut inner) = self.inner.write() {
            edit(&mut inner.cell);
        }
        self
    }

    // -------------------------------------------------------------------------
    // Content
    // -------------------------------------------------------------------------

    pub fn max_length(&self) -> usize {
        self.inner
            .read()
            .map(|g| g.max_length.get())
            .unwrap_or(0)
    }

    /// Sets the maximum displayed length; zero is rejected.
    pub fn set_max_length(&self, max_length: usize) -> Result<&Self> {
        let max_length = NonZeroUsize::new(max_length)
            .ok_or_else(|| GridError::invalid_argument("Max length must be positive"))?;
        self.write()?.max_length = max_length;
        Ok(self)
    }

    /// Adds a regex replacement applied to displayed values.
    pub fn add_replacement(&self, pattern: &str, replacement: impl Into<String>) -> Result<&Self> {
        let replacement = Replacement::new(pattern, replacement)?;
        self.write()?.replacements.push(replacement);
        Ok(self)
    }

    pub fn replacements(&self) -> Vec<Replacement> {
        self.inner
            .read()
            .map(|g| g.replacements.clone())
            .unwrap_or_default()
    }

    /// Adds a transform applied to cell text before replacements.
    pub fn add_format_callback<F>(&self, callback: F) -> &Self
    where
        F: Fn(String, Option<&Value>) -> String + Send + Sync + 'static,
    {
        if let Ok(mut inner) = self.inner.write() {
            inner.format_callbacks.push(Arc::new(callback));
        }
        self
    }

    pub fn format_callbacks(&self) -> Vec<FormatCallback> {
        self.inner
            .read()
            .map(|g| g.format_callbacks.clone())
            .unwrap_or_default()
    }

    /// Formats a cell's raw value for display.
    pub fn format_content(&self, value: &Value, row: Option<&Value>) -> String {
        self.behavior.format_content(self, value, row)
    }

    /// Narrows `source` to rows matching `value` in this column.
    pub fn apply_filter(&self, source: &mut dyn DataSource, value: &str) -> Result<()> {
        self.behavior.apply_filter(self, source, value)
    }

    // -------------------------------------------------------------------------
    // Renderer
    // -------------------------------------------------------------------------

    pub fn renderer(&self) -> RendererRef {
        self.inner
            .read()
            .map(|g| g.renderer.clone())
            .unwrap_or_else(|_| RendererRef::ById(ColumnConfig::default().renderer))
    }

    /// Sets the renderer, by identifier or instance.
    pub fn set_renderer(&self, renderer: impl Into<RendererRef>) -> Result<&Self> {
        let renderer = renderer.into();
        renderer.validate()?;
        self.write()?.renderer = renderer;
        Ok(self)
    }

    /// Renders a cell when the renderer is an instance.
    ///
    /// Renderers referenced by id are resolved by the host, so this returns
    /// `None` for them.
    pub fn render_cell(&self, value: &Value, row: Option<&Value>) -> Option<String> {
        match self.renderer() {
            RendererRef::ByInstance(renderer) => Some(renderer.render_cell(self, value, row)),
            RendererRef::ById(_) => None,
        }
    }

    // -------------------------------------------------------------------------
    // Filters
    // -------------------------------------------------------------------------

    pub fn has_filter(&self) -> bool {
        self.inner
            .read()
            .map(|g| g.filters.has())
            .unwrap_or(false)
    }

    /// The column's filter.
    pub fn filter(&self) -> Result<SharedFilter> {
        self.read()?.filters.get()
    }

    /// The column's filter, if any.
    pub fn try_filter(&self) -> Option<SharedFilter> {
        self.inner.read().ok().and_then(|g| g.filters.try_get())
    }

    /// Read-only copy of the filter registry, taken at call time.
    pub fn filters(&self) -> FilterRegistry {
        self.inner
            .read()
            .map(|g| g.filters.clone())
            .unwrap_or_default()
    }

    /// Removes the column's filter, returning it.
    pub fn remove_filter(&self) -> Result<Option<SharedFilter>> {
        Ok(self.write()?.filters.remove())
    }

    /// Registers `filter`, replacing any previous one.
    pub fn set_filter(&self, filter: SharedFilter) -> Result<()> {
        self.write()?.filters.set(filter);
        Ok(())
    }

    /// Alias for [`Column::add_text_filter`].
    pub fn add_filter(&self) -> Result<TextFilter> {
        self.add_text_filter()
    }

    /// Adds a single-line text filter.
    pub fn add_text_filter(&self) -> Result<TextFilter> {
        let filter = TextFilter::new();
        self.set_filter(Arc::new(filter.clone()))?;
        Ok(filter)
    }

    /// Adds a date filter.
    pub fn add_date_filter(&self) -> Result<DateFilter> {
        let filter = DateFilter::new();
        self.set_filter(Arc::new(filter.clone()))?;
        Ok(filter)
    }

    /// Adds a checkbox filter.
    pub fn add_checkbox_filter(&self) -> Result<CheckboxFilter> {
        let filter = CheckboxFilter::new();
        self.set_filter(Arc::new(filter.clone()))?;
        Ok(filter)
    }

    /// Adds a select box filter over `items`.
    pub fn add_selectbox_filter<I, S>(
        &self,
        items: I,
        first_empty: bool,
        translate_items: bool,
    ) -> Result<SelectboxFilter>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let filter = SelectboxFilter::new(items, first_empty);
        filter.translate_items(translate_items);
        self.set_filter(Arc::new(filter.clone()))?;
        Ok(filter)
    }

    // -------------------------------------------------------------------------
    // Default sorting and filtering
    // -------------------------------------------------------------------------

    /// Makes the grid sort by this column by default.
    ///
    /// `order` is one of `ASC`, `DESC`, `A` or `D`, in any case.
    pub fn add_default_sorting(&self, order: &str) -> Result<&Self> {
        let direction: SortDirection = order.parse()?;
        let (grid, name) = self.bound()?;
        grid.update_state(StateField::DefaultOrder, |map| {
            map.insert(name, direction.code());
            Ok(())
        })?;
        Ok(self)
    }

    /// Drops this column from the grid's default sorting.
    pub fn remove_default_sorting(&self) -> Result<&Self> {
        let (grid, name) = self.bound()?;
        grid.update_state(StateField::DefaultOrder, |map| {
            map.remove(&name);
            Ok(())
        })?;
        Ok(self)
    }

    /// Pre-fills this column's filter with `value`.
    pub fn add_default_filtering(&self, value: impl Into<String>) -> Result<&Self> {
        let value = value.into();
        let (grid, name) = self.bound()?;
        grid.update_state(StateField::DefaultFilters, |map| {
            map.insert(name, value);
            Ok(())
        })?;
        Ok(self)
    }

    /// Drops this column from the grid's default filters.
    pub fn remove_default_filtering(&self) -> Result<&Self> {
        let (grid, name) = self.bound()?;
        grid.update_state(StateField::DefaultFilters, |map| {
            map.remove(&name);
            Ok(())
        })?;
        Ok(self)
    }
}

impl AttachmentMonitor<Grid> for Column {
    /// Binds a named column to `grid`.
    ///
    /// The grid assigns the name on insertion, so a column that was never
    /// named stays detached and this fails with `NotAttached`.
    fn on_attached(&self, grid: &Grid) -> Result<()> {
        let mut inner = self.write()?;
        if inner.name.is_none() {
            return Err(GridError::NotAttached);
        }
        attach_locked(&mut inner, grid).map(|_| ())
    }
}

/// Records `grid` as owner and resolves the caption fallback.
fn attach_locked(inner: &mut ColumnInner, grid: &Grid) -> Result<AttachOutcome> {
    match inner
        .owner
        .attach(grid.downgrade(), |current, offered| current.id() == offered.id())
    {
        AttachOutcome::Bound => {
            if inner.caption.is_none()
                && let Some(name) = inner.name.clone()
            {
                inner.caption = Some(Caption::Text(name));
            }
            debug!("Column {:?} attached to grid {:?}", inner.name, grid.id());
            Ok(AttachOutcome::Bound)
        }
        AttachOutcome::Unchanged => Ok(AttachOutcome::Unchanged),
        AttachOutcome::Conflict => Err(GridError::AlreadyAttached {
            column: inner.name.clone().unwrap_or_default(),
        }),
    }
}

impl Default for Column {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("id", &self.id)
            .field("name", &self.name())
            .field("behavior", &self.behavior)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::filter::{ColumnFilter, FilterKind};
    use crate::renderer::{ColumnRenderer, PrototypeRenderer};

    #[test]
    fn test_defaults() {
        let column = Column::new();
        assert_eq!(column.max_length(), 100);
        assert!(column.is_orderable());
        assert_eq!(column.renderer().id(), Some("Column"));
        assert_eq!(column.ajax_class(), "datagrid-ajax");
        assert!(column.name().is_none());
        assert!(column.raw_caption().is_none());
        assert!(!column.has_filter());
    }

    #[test]
    fn test_config_overrides_defaults() {
        let column = Column::with_config(
            ColumnConfig::default()
                .with_max_length(NonZeroUsize::new(20).unwrap())
                .with_orderable(false)
                .with_renderer("Text"),
        );
        assert_eq!(column.max_length(), 20);
        assert!(!column.is_orderable());
        assert_eq!(column.renderer().id(), Some("Text"));
    }

    #[test]
    fn test_detached_operations_fail() {
        let column = Column::captioned("Name");
        assert_eq!(column.owner().unwrap_err(), GridError::NotAttached);
        assert_eq!(column.caption().unwrap_err(), GridError::NotAttached);
        assert_eq!(column.order_link(None).unwrap_err(), GridError::NotAttached);
        assert!(column.add_default_sorting("ASC").is_err());
        assert!(column.remove_default_sorting().is_err());
        assert!(column.add_default_filtering("x").is_err());
        assert!(column.remove_default_filtering().is_err());
    }

    #[test]
    fn test_invalid_order_checked_before_attachment() {
        let column = Column::new();
        assert!(matches!(
            column.add_default_sorting("up"),
            Err(GridError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_set_max_length_rejects_zero() {
        let column = Column::new();
        assert!(column.set_max_length(0).is_err());
        assert_eq!(column.max_length(), 100);
        column.set_max_length(12).unwrap();
        assert_eq!(column.max_length(), 12);
    }

    #[test]
    fn test_one_char_limit_truncates_to_ellipsis() {
        let column = Column::with_config(
            ColumnConfig::default()
                .with_max_length(NonZeroUsize::MIN)
                .with_renderer("Text"),
        );
        assert_eq!(column.max_length(), 1);
        assert!(column.set_max_length(0).is_err());
        assert_eq!(column.max_length(), 1);

        let column = Column::text();
        column.set_max_length(1).unwrap();
        assert_eq!(column.format_content(&json!("abc"), None), "…");
    }

    #[test]
    fn test_failed_bind_keeps_name() {
        let first = Grid::new();
        let second = Grid::new();
        let column = first.add_column("a", Column::new()).unwrap();
        assert!(column.bind("b", &second).is_err());
        assert_eq!(column.name().as_deref(), Some("a"));
        assert_eq!(column.filters().column(), "a");
        assert_eq!(column.bind("a", &first).unwrap(), AttachOutcome::Unchanged);
    }

    #[test]
    fn test_set_renderer() {
        let column = Column::new();
        assert!(column.set_renderer("").is_err());
        assert_eq!(column.renderer().id(), Some("Column"));
        column.set_renderer("Numeric").unwrap();
        assert_eq!(column.renderer().id(), Some("Numeric"));

        let renderer: Arc<dyn ColumnRenderer> = Arc::new(PrototypeRenderer);
        column.set_renderer(renderer).unwrap();
        assert!(column.renderer().instance().is_some());
    }

    #[test]
    fn test_render_cell_uses_prototype() {
        let column = Column::new();
        assert_eq!(column.render_cell(&json!("x"), None), None);
        column.update_cell(|cell| {
            *cell = HtmlElement::el("td").with_attr("class", "name");
        });
        let renderer: Arc<dyn ColumnRenderer> = Arc::new(PrototypeRenderer);
        column.set_renderer(renderer).unwrap();
        assert_eq!(
            column.render_cell(&json!("a&b"), None).as_deref(),
            Some("<td class=\"name\">a&amp;b</td>")
        );
    }

    #[test]
    fn test_default_format_content() {
        let column = Column::new();
        assert_eq!(column.format_content(&json!("abc"), None), "abc");
        assert_eq!(column.format_content(&json!(42), None), "42");
        assert_eq!(column.format_content(&json!(null), None), "");
        assert_eq!(column.format_content(&json!(true), None), "1");
    }

    #[test]
    fn test_filters_work_detached() {
        let column = Column::new();
        let filter = column.add_checkbox_filter().unwrap();
        assert!(column.has_filter());
        assert_eq!(column.filter().unwrap().kind(), FilterKind::Checkbox);
        assert_eq!(column.filter().unwrap().id(), filter.id());
        assert!(column.remove_filter().unwrap().is_some());
        assert_eq!(column.filter().unwrap_err(), GridError::no_filter(""));
    }

    #[test]
    fn test_bad_replacement_pattern() {
        let column = Column::new();
        assert!(matches!(
            column.add_replacement("(", "x"),
            Err(GridError::InvalidPattern { .. })
        ));
        assert!(column.replacements().is_empty());
    }

    #[test]
    fn test_header_prototype_edits() {
        let column = Column::new();
        column.update_header(|header| {
            header.set_attr("class", "sortable");
        });
        assert_eq!(column.header_prototype().attr("class"), Some("sortable"));
        assert_eq!(column.cell_prototype(), HtmlElement::empty());
    }
}

//! The grid host: owns columns, translation, link generation and the
//! persisted default order / default filter state.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock, Weak};

use log::{debug, trace, warn};
use serde::Serialize;
use url::form_urlencoded;

use crate::codec::{self, StateMap};
use crate::column::Column;
use crate::config::GridConfig;
use crate::error::{GridError, Result};

/// Translates user-facing text.
pub trait Translator: Send + Sync {
    fn translate(&self, text: &str) -> String;
}

impl<F> Translator for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn translate(&self, text: &str) -> String {
        self(text)
    }
}

/// Translator that returns its input unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTranslator;

impl Translator for IdentityTranslator {
    fn translate(&self, text: &str) -> String {
        text.to_string()
    }
}

/// Builds links to grid signals.
pub trait LinkGenerator: Send + Sync {
    /// Link firing `signal` with the given parameters; `None` values are omitted.
    fn link(&self, signal: &str, params: &[(&str, Option<&str>)]) -> String;
}

/// Generates `{base}?do={signal}&key=value...` links.
#[derive(Debug, Clone, Default)]
pub struct QueryLinkGenerator {
    base: String,
}

impl QueryLinkGenerator {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }
}

impl LinkGenerator for QueryLinkGenerator {
    fn link(&self, signal: &str, params: &[(&str, Option<&str>)]) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        query.append_pair("do", signal);
        for (key, value) in params {
            if let Some(value) = value {
                query.append_pair(key, value);
            }
        }
        format!("{}?{}", self.base, query.finish())
    }
}

/// Unique identifier for a grid instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridId(usize);

impl GridId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

/// Which piece of persisted state an update targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateField {
    DefaultOrder,
    DefaultFilters,
}

#[derive(Debug, Default)]
struct GridState {
    default_order: String,
    default_filters: String,
}

impl GridState {
    fn field_mut(&mut self, field: StateField) -> &mut String {
        match field {
            StateField::DefaultOrder => &mut self.default_order,
            StateField::DefaultFilters => &mut self.default_filters,
        }
    }
}

/// Decoded view of both state strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridStateSnapshot {
    pub default_order: StateMap,
    pub default_filters: StateMap,
}

struct GridShared {
    config: GridConfig,
    translator: Box<dyn Translator>,
    links: Box<dyn LinkGenerator>,
    state: RwLock<GridState>,
    columns: RwLock<Vec<Column>>,
}

/// A data grid.
///
/// `Grid` is a cheap handle; clones refer to the same grid. Columns hold a
/// weak reference back, so dropping every handle drops the columns' owner.
///
/// # Example
///
/// ```
/// use datagrid::{Column, Grid};
///
/// let grid = Grid::builder().default_order("age=d").build();
/// let column = grid.add_column("name", Column::new()).unwrap();
/// column.add_default_sorting("ASC").unwrap();
/// assert_eq!(grid.default_order(), "age=d&name=a");
/// ```
#[derive(Clone)]
pub struct Grid {
    id: GridId,
    shared: Arc<GridShared>,
}

impl Grid {
    /// Creates a grid with default configuration.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> GridBuilder {
        GridBuilder::default()
    }

    pub fn id(&self) -> GridId {
        self.id
    }

    pub fn config(&self) -> &GridConfig {
        &self.shared.config
    }

    pub fn translate(&self, text: &str) -> String {
        self.shared.translator.translate(text)
    }

    pub fn link(&self, signal: &str, params: &[(&str, Option<&str>)]) -> String {
        self.shared.links.link(signal, params)
    }

    // -------------------------------------------------------------------------
    // Columns
    // -------------------------------------------------------------------------

    /// Inserts `column` under `name` and attaches it to this grid.
    ///
    /// Returns the column handle for further configuration. Inserting a
    /// column that is already part of this grid under the same name is a
    /// no-op.
    pub fn add_column(&self, name: &str, column: Column) -> Result<Column> {
        let mut columns = self
            .shared
            .columns
            .write()
            .map_err(|_| GridError::StateUnavailable)?;

        if let Some(existing) = columns.iter().find(|c| c.name().as_deref() == Some(name)) {
            if existing.id() == column.id() {
                return Ok(column);
            }
            return Err(GridError::DuplicateColumn(name.to_string()));
        }

        // Name and owner are committed together under the column's lock.
        column.bind(name, self)?;
        debug!("Column `{}` added to grid {:?}", name, self.id);
        columns.push(column.clone());
        Ok(column)
    }

    /// Looks up a column by name.
    pub fn column(&self, name: &str) -> Option<Column> {
        self.shared.columns.read().ok().and_then(|columns| {
            columns
                .iter()
                .find(|c| c.name().as_deref() == Some(name))
                .cloned()
        })
    }

    /// All columns in insertion order.
    pub fn columns(&self) -> Vec<Column> {
        self.shared
            .columns
            .read()
            .map(|columns| columns.clone())
            .unwrap_or_default()
    }

    /// Names of the columns that need a filter input in the header.
    pub fn filtered_columns(&self) -> Vec<String> {
        self.columns()
            .iter()
            .filter(|c| c.has_filter())
            .filter_map(|c| c.name())
            .collect()
    }

    // -------------------------------------------------------------------------
    // Persisted state
    // -------------------------------------------------------------------------

    /// Encoded default order (`name=a&age=d`).
    pub fn default_order(&self) -> String {
        self.read_field(StateField::DefaultOrder)
    }

    pub fn set_default_order(&self, value: impl Into<String>) {
        self.write_field(StateField::DefaultOrder, value.into());
    }

    /// Encoded default filters (`status=open`).
    pub fn default_filters(&self) -> String {
        self.read_field(StateField::DefaultFilters)
    }

    pub fn set_default_filters(&self, value: impl Into<String>) {
        self.write_field(StateField::DefaultFilters, value.into());
    }

    /// Decodes both state strings.
    pub fn snapshot(&self) -> GridStateSnapshot {
        GridStateSnapshot {
            default_order: codec::decode(&self.default_order()),
            default_filters: codec::decode(&self.default_filters()),
        }
    }

    /// Runs a read-decode-mutate-encode-write cycle on one state field.
    ///
    /// The write lock is held for the whole cycle. If `mutate` fails the
    /// stored string is left untouched; if it leaves the map unchanged
    /// nothing is written.
    pub fn update_state<F>(&self, field: StateField, mutate: F) -> Result<()>
    where
        F: FnOnce(&mut StateMap) -> Result<()>,
    {
        let mut state = self.shared.state.write().map_err(|_| {
            warn!("Grid {:?} state lock poisoned", self.id);
            GridError::StateUnavailable
        })?;
        let slot = state.field_mut(field);
        let before = codec::decode(slot);
        let mut map = before.clone();
        mutate(&mut map)?;
        if map != before {
            *slot = codec::encode(&map);
            trace!("Grid {:?} {:?} = {}", self.id, field, slot);
        }
        Ok(())
    }

    fn read_field(&self, field: StateField) -> String {
        self.shared
            .state
            .read()
            .map(|state| match field {
                StateField::DefaultOrder => state.default_order.clone(),
                StateField::DefaultFilters => state.default_filters.clone(),
            })
            .unwrap_or_default()
    }

    fn write_field(&self, field: StateField, value: String) {
        if let Ok(mut state) = self.shared.state.write() {
            *state.field_mut(field) = value;
        }
    }

    pub(crate) fn downgrade(&self) -> WeakGrid {
        WeakGrid {
            id: self.id,
            shared: Arc::downgrade(&self.shared),
        }
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid")
            .field("id", &self.id)
            .field("config", &self.shared.config)
            .finish_non_exhaustive()
    }
}

/// Non-owning reference to a grid, held by attached columns.
#[derive(Debug, Clone)]
pub(crate) struct WeakGrid {
    id: GridId,
    shared: Weak<GridShared>,
}

impl WeakGrid {
    pub(crate) fn id(&self) -> GridId {
        self.id
    }

    pub(crate) fn upgrade(&self) -> Option<Grid> {
        self.shared.upgrade().map(|shared| Grid {
            id: self.id,
            shared,
        })
    }
}

impl fmt::Debug for GridShared {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridShared")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Grid`].
#[derive(Default)]
pub struct GridBuilder {
    config: GridConfig,
    translator: Option<Box<dyn Translator>>,
    links: Option<Box<dyn LinkGenerator>>,
    default_order: String,
    default_filters: String,
}

impl GridBuilder {
    pub fn config(mut self, config: GridConfig) -> Self {
        self.config = config;
        self
    }

    pub fn translator(mut self, translator: impl Translator + 'static) -> Self {
        self.translator = Some(Box::new(translator));
        self
    }

    pub fn link_generator(mut self, links: impl LinkGenerator + 'static) -> Self {
        self.links = Some(Box::new(links));
        self
    }

    /// Pre-seeds the encoded default order, e.g. from a URL.
    pub fn default_order(mut self, encoded: impl Into<String>) -> Self {
        self.default_order = encoded.into();
        self
    }

    /// Pre-seeds the encoded default filters.
    pub fn default_filters(mut self, encoded: impl Into<String>) -> Self {
        self.default_filters = encoded.into();
        self
    }

    pub fn build(self) -> Grid {
        let base_path = self.config.base_path.clone();
        let links = self.links.unwrap_or_else(|| {
            Box::new(QueryLinkGenerator::new(base_path)) as Box<dyn LinkGenerator>
        });
        Grid {
            id: GridId::new(),
            shared: Arc::new(GridShared {
                translator: self
                    .translator
                    .unwrap_or_else(|| Box::new(IdentityTranslator) as Box<dyn Translator>),
                links,
                state: RwLock::new(GridState {
                    default_order: self.default_order,
                    default_filters: self.default_filters,
                }),
                columns: RwLock::new(Vec::new()),
                config: self.config,
            }),
        }
    }
}

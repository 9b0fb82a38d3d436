//! Column and grid configuration

use std::num::NonZeroUsize;

const DEFAULT_MAX_LENGTH: NonZeroUsize = NonZeroUsize::MIN.saturating_add(99);

/// Defaults applied to freshly constructed columns.
///
/// # Example
///
/// ```
/// use std::num::NonZeroUsize;
///
/// use datagrid::config::ColumnConfig;
///
/// let config = ColumnConfig::default()
///     .with_max_length(NonZeroUsize::new(40).unwrap())
///     .with_renderer("TextColumn");
/// assert_eq!(config.max_length.get(), 40);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnConfig {
    /// Upper bound on displayed characters.
    ///
    /// Default: 100
    pub max_length: NonZeroUsize,

    /// Renderer identifier used until one is set explicitly.
    ///
    /// Default: `"Column"`
    pub renderer: String,

    /// CSS class put on links that should be followed via ajax.
    ///
    /// Default: `"datagrid-ajax"`
    pub ajax_class: String,

    /// Whether new columns can be ordered by.
    ///
    /// Default: `true`
    pub orderable: bool,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_MAX_LENGTH,
            renderer: "Column".to_string(),
            ajax_class: "datagrid-ajax".to_string(),
            orderable: true,
        }
    }
}

impl ColumnConfig {
    /// Creates a new column config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum displayed length.
    pub fn with_max_length(mut self, max_length: NonZeroUsize) -> Self {
        self.max_length = max_length;
        self
    }

    /// Sets the default renderer identifier.
    pub fn with_renderer(mut self, renderer: impl Into<String>) -> Self {
        self.renderer = renderer.into();
        self
    }

    /// Sets the ajax CSS class.
    pub fn with_ajax_class(mut self, class: impl Into<String>) -> Self {
        self.ajax_class = class.into();
        self
    }

    /// Sets whether columns start out orderable.
    pub fn with_orderable(mut self, orderable: bool) -> Self {
        self.orderable = orderable;
        self
    }
}

/// Settings of the grid host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridConfig {
    /// Signal name used for order links.
    ///
    /// Default: `"order"`
    pub order_signal: String,

    /// Path that generated links point at.
    ///
    /// Default: empty (links are relative query strings)
    pub base_path: String,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            order_signal: "order".to_string(),
            base_path: String::new(),
        }
    }
}

impl GridConfig {
    /// Creates a new grid config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the order signal name.
    pub fn with_order_signal(mut self, signal: impl Into<String>) -> Self {
        self.order_signal = signal.into();
        self
    }

    /// Sets the link base path.
    pub fn with_base_path(mut self, path: impl Into<String>) -> Self {
        self.base_path = path.into();
        self
    }
}

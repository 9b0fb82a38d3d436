//! Single-input filters: text, date and checkbox.

use std::any::Any;
use std::sync::{Arc, RwLock};

use super::{ColumnFilter, FilterId, FilterKind};

/// State shared by the single-input filters.
#[derive(Debug, Clone)]
struct InputCore {
    id: FilterId,
    value: Arc<RwLock<Option<String>>>,
}

impl InputCore {
    fn new() -> Self {
        Self {
            id: FilterId::new(),
            value: Arc::new(RwLock::new(None)),
        }
    }

    fn value(&self) -> Option<String> {
        self.value.read().map(|guard| guard.clone()).unwrap_or(None)
    }

    fn set_value(&self, value: Option<String>) {
        if let Ok(mut guard) = self.value.write() {
            *guard = value;
        }
    }
}

/// Single-line text filter.
#[derive(Debug, Clone)]
pub struct TextFilter {
    core: InputCore,
}

impl TextFilter {
    pub fn new() -> Self {
        Self {
            core: InputCore::new(),
        }
    }
}

impl Default for TextFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl ColumnFilter for TextFilter {
    fn id(&self) -> FilterId {
        self.core.id
    }

    fn kind(&self) -> FilterKind {
        FilterKind::Text
    }

    fn value(&self) -> Option<String> {
        self.core.value()
    }

    fn set_value(&self, value: Option<String>) {
        self.core.set_value(value);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Text filter whose input is a date.
#[derive(Debug, Clone)]
pub struct DateFilter {
    core: InputCore,
    format: Arc<RwLock<String>>,
}

impl DateFilter {
    pub fn new() -> Self {
        Self {
            core: InputCore::new(),
            format: Arc::new(RwLock::new("%Y-%m-%d".to_string())),
        }
    }

    /// Date format the input expects (strftime style).
    pub fn format(&self) -> String {
        self.format
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    pub fn set_format(&self, format: impl Into<String>) -> &Self {
        if let Ok(mut guard) = self.format.write() {
            *guard = format.into();
        }
        self
    }
}

impl Default for DateFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl ColumnFilter for DateFilter {
    fn id(&self) -> FilterId {
        self.core.id
    }

    fn kind(&self) -> FilterKind {
        FilterKind::Date
    }

    fn value(&self) -> Option<String> {
        self.core.value()
    }

    fn set_value(&self, value: Option<String>) {
        self.core.set_value(value);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Checkbox filter; a checked box is the value `"1"`.
#[derive(Debug, Clone)]
pub struct CheckboxFilter {
    core: InputCore,
}

impl CheckboxFilter {
    pub fn new() -> Self {
        Self {
            core: InputCore::new(),
        }
    }

    pub fn is_checked(&self) -> bool {
        self.core.value().is_some_and(|v| v == "1")
    }

    pub fn set_checked(&self, checked: bool) -> &Self {
        self.core.set_value(checked.then(|| "1".to_string()));
        self
    }
}

impl Default for CheckboxFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl ColumnFilter for CheckboxFilter {
    fn id(&self) -> FilterId {
        self.core.id
    }

    fn kind(&self) -> FilterKind {
        FilterKind::Checkbox
    }

    fn value(&self) -> Option<String> {
        self.core.value()
    }

    fn set_value(&self, value: Option<String>) {
        self.core.set_value(value);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

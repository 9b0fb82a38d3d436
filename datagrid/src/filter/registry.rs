//! Per-column filter container.

use log::debug;

use super::SharedFilter;
use crate::error::{GridError, Result};

/// Holds the single filter of a column.
///
/// The slot is keyed by the column's name, which stays empty until the
/// column is attached to a grid. Outside the crate a registry is read-only;
/// filters are changed through [`crate::Column::set_filter`] and
/// [`crate::Column::remove_filter`].
#[derive(Debug, Clone, Default)]
pub struct FilterRegistry {
    column: String,
    filter: Option<SharedFilter>,
}

impl FilterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name of the column the registry belongs to.
    pub fn column(&self) -> &str {
        &self.column
    }

    pub(crate) fn set_column(&mut self, column: impl Into<String>) {
        self.column = column.into();
    }

    /// Returns `true` if a filter is registered.
    pub fn has(&self) -> bool {
        self.filter.is_some()
    }

    /// Returns the registered filter.
    pub fn get(&self) -> Result<SharedFilter> {
        self.try_get()
            .ok_or_else(|| GridError::no_filter(self.column.clone()))
    }

    /// Returns the registered filter, if any.
    pub fn try_get(&self) -> Option<SharedFilter> {
        self.filter.clone()
    }

    /// Registers `filter`, dropping the previous one first.
    ///
    /// Returns the filter that was replaced.
    pub(crate) fn set(&mut self, filter: SharedFilter) -> Option<SharedFilter> {
        let previous = self.remove();
        if let Some(old) = &previous {
            debug!(
                "Replacing filter {} on column `{}` with {}",
                old.id(),
                self.column,
                filter.id()
            );
        }
        self.filter = Some(filter);
        previous
    }

    /// Removes and returns the registered filter.
    pub(crate) fn remove(&mut self) -> Option<SharedFilter> {
        self.filter.take()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::filter::{ColumnFilter, DateFilter, TextFilter};

    #[test]
    fn test_empty_registry() {
        let mut registry = FilterRegistry::new();
        registry.set_column("name");
        assert!(!registry.has());
        assert!(registry.try_get().is_none());
        assert_eq!(registry.get().unwrap_err(), GridError::no_filter("name"));
    }

    #[test]
    fn test_set_replaces_previous() {
        let mut registry = FilterRegistry::new();
        let text = TextFilter::new();
        let date = DateFilter::new();
        assert!(registry.set(Arc::new(text.clone())).is_none());
        let replaced = registry.set(Arc::new(date.clone())).unwrap();
        assert_eq!(replaced.id(), text.id());
        assert_eq!(registry.get().unwrap().id(), date.id());
    }

    #[test]
    fn test_remove() {
        let mut registry = FilterRegistry::new();
        registry.set(Arc::new(TextFilter::new()));
        assert!(registry.remove().is_some());
        assert!(!registry.has());
        assert!(registry.remove().is_none());
    }
}

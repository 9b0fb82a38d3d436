//! Select box filter.

use std::any::Any;
use std::sync::{Arc, RwLock};

use super::{ColumnFilter, FilterId, FilterKind};
use crate::grid::Grid;

#[derive(Debug, Default)]
struct SelectboxInner {
    items: Vec<String>,
    first_empty: bool,
    translate_items: bool,
    value: Option<String>,
}

/// Filter offering a fixed list of choices.
#[derive(Debug, Clone)]
pub struct SelectboxFilter {
    id: FilterId,
    inner: Arc<RwLock<SelectboxInner>>,
}

impl SelectboxFilter {
    /// Creates a select box over `items`, optionally led by an empty choice.
    ///
    /// Item labels are translated by default.
    pub fn new<I, S>(items: I, first_empty: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: FilterId::new(),
            inner: Arc::new(RwLock::new(SelectboxInner {
                items: items.into_iter().map(Into::into).collect(),
                first_empty,
                translate_items: true,
                value: None,
            })),
        }
    }

    /// Choices offered by the select box, including the leading empty one.
    pub fn items(&self) -> Vec<String> {
        self.inner
            .read()
            .map(|guard| {
                let mut items = Vec::with_capacity(guard.items.len() + 1);
                if guard.first_empty {
                    items.push(String::new());
                }
                items.extend(guard.items.iter().cloned());
                items
            })
            .unwrap_or_default()
    }

    /// Replaces the configured choices.
    pub fn set_items<I, S>(&self, items: I) -> &Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if let Ok(mut guard) = self.inner.write() {
            guard.items = items.into_iter().map(Into::into).collect();
        }
        self
    }

    pub fn first_empty(&self) -> bool {
        self.inner.read().map(|g| g.first_empty).unwrap_or(false)
    }

    pub fn translates_items(&self) -> bool {
        self.inner.read().map(|g| g.translate_items).unwrap_or(false)
    }

    /// Sets whether item labels pass through the grid's translator.
    pub fn translate_items(&self, translate: bool) -> &Self {
        if let Ok(mut guard) = self.inner.write() {
            guard.translate_items = translate;
        }
        self
    }

    /// Labels as displayed by `grid`; the empty choice is never translated.
    pub fn display_items(&self, grid: &Grid) -> Vec<String> {
        let translate = self.translates_items();
        self.items()
            .into_iter()
            .map(|item| {
                if translate && !item.is_empty() {
                    grid.translate(&item)
                } else {
                    item
                }
            })
            .collect()
    }
}

impl ColumnFilter for SelectboxFilter {
    fn id(&self) -> FilterId {
        self.id
    }

    fn kind(&self) -> FilterKind {
        FilterKind::Selectbox
    }

    fn value(&self) -> Option<String> {
        self.inner.read().map(|g| g.value.clone()).unwrap_or(None)
    }

    fn set_value(&self, value: Option<String>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.value = value;
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_items_with_empty_first() {
        let filter = SelectboxFilter::new(["open", "closed"], true);
        assert_eq!(filter.items(), vec!["", "open", "closed"]);
        assert!(filter.translates_items());
    }

    #[test]
    fn test_items_without_empty_first() {
        let filter = SelectboxFilter::new(vec!["a".to_string()], false);
        assert_eq!(filter.items(), vec!["a"]);
        filter.set_items(["x", "y"]);
        assert_eq!(filter.items(), vec!["x", "y"]);
    }

    #[test]
    fn test_display_items_translation() {
        let grid = Grid::builder()
            .translator(|text: &str| text.to_uppercase())
            .build();
        let filter = SelectboxFilter::new(["open"], true);
        assert_eq!(filter.display_items(&grid), vec!["", "OPEN"]);
        filter.translate_items(false);
        assert_eq!(filter.display_items(&grid), vec!["", "open"]);
    }
}

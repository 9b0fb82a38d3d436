//! Column filters.
//!
//! A filter is the input mechanism a column offers for narrowing the grid's
//! rows. Each column keeps at most one of them in its [`FilterRegistry`].

mod input;
mod registry;
mod selectbox;

pub use input::{CheckboxFilter, DateFilter, TextFilter};
pub use registry::FilterRegistry;
pub use selectbox::SelectboxFilter;

use std::any::Any;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Unique identifier for a filter instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FilterId(usize);

impl FilterId {
    pub(crate) fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl fmt::Display for FilterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "__filter_{}", self.0)
    }
}

/// Input mechanism of a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Text,
    Date,
    Checkbox,
    Selectbox,
}

/// Capability shared by all column filters.
///
/// Filters are cheap handles; clones share state, so a filter returned from
/// a column's factory method can be configured after registration.
pub trait ColumnFilter: fmt::Debug + Send + Sync {
    /// Identity of this filter instance.
    fn id(&self) -> FilterId;

    fn kind(&self) -> FilterKind;

    /// Value the filter input is pre-filled with.
    fn value(&self) -> Option<String>;

    fn set_value(&self, value: Option<String>);

    /// Access to the concrete type for downcasting.
    fn as_any(&self) -> &dyn Any;
}

/// A registered filter.
pub type SharedFilter = Arc<dyn ColumnFilter>;

impl dyn ColumnFilter {
    /// Downcasts to a concrete filter type.
    pub fn downcast_ref<F: ColumnFilter + 'static>(&self) -> Option<&F> {
        self.as_any().downcast_ref::<F>()
    }
}

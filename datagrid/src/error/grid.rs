//! Column and grid error types

/// Errors raised while configuring columns or mutating grid state.
///
/// All of these signal configuration mistakes rather than transient
/// conditions, so none of them is retryable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// The operation needs a bound grid but the column is still detached.
    #[error("Column is not attached to a grid")]
    NotAttached,

    /// A value fell outside its allowed set.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A filter was required but the column has none.
    #[error("Column `{column}` has no filter")]
    NoFilter {
        /// Name of the column, empty while detached.
        column: String,
    },

    /// The column is already bound to a different grid.
    #[error("Column `{column}` is already attached to another grid")]
    AlreadyAttached {
        /// Name of the column.
        column: String,
    },

    /// Another column with the same name already lives in the grid.
    #[error("Grid already has a column named `{0}`")]
    DuplicateColumn(String),

    /// A replacement pattern failed to compile.
    #[error("Invalid replacement pattern `{pattern}`: {message}")]
    InvalidPattern {
        /// The rejected pattern.
        pattern: String,
        /// Compiler message.
        message: String,
    },

    /// A state lock was poisoned by a panicking writer.
    #[error("Grid state is unavailable")]
    StateUnavailable,
}

impl GridError {
    /// Creates a new invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Creates a new missing filter error for the named column.
    pub fn no_filter(column: impl Into<String>) -> Self {
        Self::NoFilter {
            column: column.into(),
        }
    }

    /// Returns `true` if the error means a bound grid was required.
    pub fn is_not_attached(&self) -> bool {
        matches!(self, Self::NotAttached)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_column() {
        let error = GridError::no_filter("status");
        assert_eq!(error.to_string(), "Column `status` has no filter");
    }

    #[test]
    fn test_invalid_argument_message() {
        let error = GridError::invalid_argument("bad order");
        assert_eq!(error.to_string(), "Invalid argument: bad order");
        assert!(!error.is_not_attached());
        assert!(GridError::NotAttached.is_not_attached());
    }
}

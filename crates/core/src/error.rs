//! Error types for Tabula.
//!
//! The view engine degrades silently on malformed data; only schema and
//! configuration problems detected at construction are reported as errors.

use alloc::string::String;
use thiserror::Error;

/// Result type alias for Tabula operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors surfaced while building a view.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Two visible columns share the same key.
    #[error("Duplicate column key: {key}")]
    DuplicateColumn { key: String },
    /// The page size must be at least one row.
    #[error("Invalid page size: {size}")]
    InvalidPageSize { size: usize },
    /// No visible column with the given key.
    #[error("Column not found: {key}")]
    ColumnNotFound { key: String },
}

impl Error {
    /// Creates a duplicate column error.
    pub fn duplicate_column(key: impl Into<String>) -> Self {
        Error::DuplicateColumn { key: key.into() }
    }

    /// Creates an invalid page size error.
    pub fn invalid_page_size(size: usize) -> Self {
        Error::InvalidPageSize { size }
    }

    /// Creates a column not found error.
    pub fn column_not_found(key: impl Into<String>) -> Self {
        Error::ColumnNotFound { key: key.into() }
    }
}

//! Data access contract.

use async_trait::async_trait;
use roster_query::EffectiveFilterSet;

use crate::error::AccessorError;
use crate::row::Row;

/// Source of student records and upcoming quizzes.
///
/// Implementations must honor every constraint in the filter set exactly
/// and must not return columns outside its projection. [`crate::matching`]
/// is the reference for both.
#[async_trait]
pub trait DataAccessor: Send + Sync {
    /// Rows of `filters.dataset()` matching `filters`, reduced to
    /// `filters.projection().fetch_columns()`.
    ///
    /// # Errors
    /// - [`AccessorError::DataUnavailable`] if the store cannot be reached
    /// - [`AccessorError::SchemaMismatch`] if the dataset lacks a needed column
    async fn fetch(&self, filters: &EffectiveFilterSet) -> Result<Vec<Row>, AccessorError>;
}

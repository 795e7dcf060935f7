//! Public API trait for the student records module.
//!
//! Consumers obtain the client and call it with an authenticated
//! [`Identity`]. Scope is derived from the identity on every call; nothing
//! in the query text can widen it.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use roster_query::EffectiveFilterSet;
use roster_security::Identity;

use crate::error::QueryError;
use crate::response::Response;

/// Natural-language query access to student records.
///
/// # Example
///
/// ```ignore
/// use student_records_sdk::StudentRecordsClient;
///
/// let response = client.query(&identity, "Grade 8 ki performance dikhao", Utc::now()).await?;
/// for row in &response.rows {
///     println!("{}", row.get("student_name").unwrap_or(&CellValue::Null));
/// }
/// ```
#[async_trait]
pub trait StudentRecordsClient: Send + Sync {
    /// Resolve `text`, restrict it to `identity`'s scope and fetch the rows.
    ///
    /// `now` is the reference time for relative windows and for what counts
    /// as upcoming.
    ///
    /// # Errors
    /// - [`QueryError::DataUnavailable`] if the data store is unreachable; the
    ///   error carries the filter set to pass to [`Self::retry`]
    /// - [`QueryError::SchemaMismatch`] if the data does not have the
    ///   expected shape
    async fn query(
        &self,
        identity: &Identity,
        text: &str,
        now: DateTime<Utc>,
    ) -> Result<Response, QueryError>;

    /// Re-run a previously composed filter set without resolving text again.
    ///
    /// The filter set is re-checked against `identity`'s scope before use.
    ///
    /// # Errors
    /// Same as [`Self::query`].
    async fn retry(
        &self,
        identity: &Identity,
        filters: &EffectiveFilterSet,
        now: DateTime<Utc>,
    ) -> Result<Response, QueryError>;

    /// Example queries matching `partial`.
    fn suggestions(&self, partial: &str) -> Vec<String>;
}

//! Error types for the student records SDK.

use roster_query::EffectiveFilterSet;
use thiserror::Error;

/// Failures a [`crate::DataAccessor`] may report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessorError {
    /// The backing store could not be reached. Retryable.
    #[error("data unavailable: {0}")]
    DataUnavailable(String),

    /// A dataset lacks a column the filter set or projection needs.
    #[error("schema mismatch: {0}")]
    SchemaMismatch(String),
}

impl AccessorError {
    /// Schema mismatch for a missing `column` in `dataset`.
    #[must_use]
    pub fn missing_column(dataset: &str, column: &str) -> Self {
        Self::SchemaMismatch(format!("{dataset} has no column '{column}'"))
    }
}

/// Errors returned by [`crate::StudentRecordsClient::query`] and
/// [`crate::StudentRecordsClient::retry`].
#[derive(Debug, Clone, Error)]
pub enum QueryError {
    /// The accessor could not reach its store.
    ///
    /// Carries the effective filter set so the caller can retry the same
    /// query without re-resolving it.
    #[error("data unavailable: {reason}")]
    DataUnavailable {
        filters: Box<EffectiveFilterSet>,
        reason: String,
    },

    /// The dataset does not have the expected shape. Not retryable; no
    /// partial response is produced.
    #[error("schema mismatch: {0}")]
    SchemaMismatch(String),
}

impl QueryError {
    /// Attach the filter set an accessor failure happened under.
    #[must_use]
    pub fn from_accessor(error: AccessorError, filters: &EffectiveFilterSet) -> Self {
        match error {
            AccessorError::DataUnavailable(reason) => Self::DataUnavailable {
                filters: Box::new(filters.clone()),
                reason,
            },
            AccessorError::SchemaMismatch(detail) => Self::SchemaMismatch(detail),
        }
    }

    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::DataUnavailable { .. })
    }

    /// Filter set to pass to `retry`, if this error is retryable.
    #[must_use]
    pub fn retry_filters(&self) -> Option<&EffectiveFilterSet> {
        match self {
            Self::DataUnavailable { filters, .. } => Some(filters.as_ref()),
            Self::SchemaMismatch(_) => None,
        }
    }
}

/// Errors returned by [`crate::IdentityProvider`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Unknown user, inactive user or wrong credential; the three are
    /// indistinguishable.
    #[error("authentication failed")]
    AuthFailed,
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use roster_query::{QueryIntent, compose};
    use roster_security::{Capabilities, ScopePredicate};

    fn filters() -> EffectiveFilterSet {
        compose(
            &ScopePredicate::unrestricted(),
            &[],
            QueryIntent::GenericList,
            Capabilities::default(),
        )
    }

    #[test]
    fn unavailable_is_retryable_and_keeps_filters() {
        let eff = filters();
        let err = QueryError::from_accessor(AccessorError::DataUnavailable("down".to_owned()), &eff);
        assert!(err.is_retryable());
        assert_eq!(err.retry_filters(), Some(&eff));
        assert_eq!(err.to_string(), "data unavailable: down");
    }

    #[test]
    fn schema_mismatch_is_fatal() {
        let err = QueryError::from_accessor(AccessorError::missing_column("student_records", "grade"), &filters());
        assert!(!err.is_retryable());
        assert!(err.retry_filters().is_none());
        assert_eq!(
            err.to_string(),
            "schema mismatch: student_records has no column 'grade'"
        );
    }
}

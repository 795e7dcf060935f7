use roster_query::EffectiveFilterSet;
use student_records_sdk::{AccessorError, QueryError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("data accessor failed: {source}")]
    Accessor {
        #[source]
        source: AccessorError,
        filters: Box<EffectiveFilterSet>,
    },
}

impl DomainError {
    pub(crate) fn accessor(source: AccessorError, filters: &EffectiveFilterSet) -> Self {
        Self::Accessor {
            source,
            filters: Box::new(filters.clone()),
        }
    }
}

impl From<DomainError> for QueryError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Accessor {
                source: AccessorError::DataUnavailable(reason),
                filters,
            } => QueryError::DataUnavailable { filters, reason },
            DomainError::Accessor {
                source: AccessorError::SchemaMismatch(detail),
                ..
            } => QueryError::SchemaMismatch(detail),
        }
    }
}

use roster_query::QueryIntent;
use thiserror::Error;

/// Resolver configuration that cannot be compiled.
#[derive(Error, Debug)]
pub enum ResolverError {
    #[error("invalid pattern for {intent}: '{pattern}'")]
    InvalidPattern {
        intent: QueryIntent,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid {table} vocabulary")]
    InvalidVocabulary {
        table: &'static str,
        #[source]
        source: regex::Error,
    },

    #[error("{0} cannot appear in the intent table")]
    ReservedIntent(QueryIntent),

    #[error("invalid resolver configuration: {0}")]
    InvalidConfig(String),
}

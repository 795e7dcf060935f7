use thiserror::Error;

use crate::{AccessLevel, Dimension};

/// A malformed identity definition.
///
/// Raised while identities are built from configuration, never at query time.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    #[error("identity id must not be empty")]
    MissingId,

    #[error("identity '{id}': {level} access requires a {expected} constraint")]
    MissingConstraint {
        id: String,
        level: AccessLevel,
        expected: Dimension,
    },

    #[error("identity '{id}': {level} access cannot constrain {dimension}")]
    UnexpectedConstraint {
        id: String,
        level: AccessLevel,
        dimension: Dimension,
    },

    #[error("identity '{id}': combined access requires at least two dimensions, got {count}")]
    TooFewDimensions { id: String, count: usize },

    #[error("identity '{id}': allowed values for {dimension} must not be empty")]
    EmptyValueSet { id: String, dimension: Dimension },

    #[error("identity '{id}': {dimension} value '{value}' must be {expected}")]
    ValueType {
        id: String,
        dimension: Dimension,
        value: String,
        expected: &'static str,
    },
}

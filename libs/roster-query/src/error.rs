use chrono::NaiveDate;
use thiserror::Error;

use crate::field::{Field, FieldKind};
use crate::filter::FilterOp;

/// A query filter that cannot be built.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("operator {op} is not supported on field {field}")]
    UnsupportedOperation { field: Field, op: FilterOp },

    #[error("type mismatch for field {field}: expected {expected}, got {got}")]
    TypeMismatch {
        field: Field,
        expected: FieldKind,
        got: &'static str,
    },

    #[error("value set for field {0} must not be empty")]
    EmptySet(Field),

    #[error("date range starts after it ends: {start} > {end}")]
    InvertedRange { start: NaiveDate, end: NaiveDate },
}

pub type FilterResult<T> = Result<T, FilterError>;

use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;
use roster_security::{Dimension, ScopeValue};
use serde::{Deserialize, Serialize};

use crate::error::{FilterError, FilterResult};
use crate::field::{Field, FieldKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FilterOp {
    Equals,
    LessThan,
    GreaterThan,
    In,
    Between,
}

impl fmt::Display for FilterOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterOp::Equals => write!(f, "EQUALS"),
            FilterOp::LessThan => write!(f, "LESS_THAN"),
            FilterOp::GreaterThan => write!(f, "GREATER_THAN"),
            FilterOp::In => write!(f, "IN"),
            FilterOp::Between => write!(f, "BETWEEN"),
        }
    }
}

/// Inclusive calendar date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// # Errors
    /// Returns [`FilterError::InvertedRange`] when `start` is after `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> FilterResult<Self> {
        if start > end {
            return Err(FilterError::InvertedRange { start, end });
        }
        Ok(Self { start, end })
    }

    #[must_use]
    pub fn single_day(day: NaiveDate) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    #[inline]
    #[must_use]
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    #[inline]
    #[must_use]
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    #[must_use]
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }

    /// Overlap of two ranges, `None` when they are disjoint.
    #[must_use]
    pub fn intersect(&self, other: &DateRange) -> Option<DateRange> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (start <= end).then_some(DateRange { start, end })
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FilterValue {
    One(ScopeValue),
    Many(BTreeSet<ScopeValue>),
    Threshold(i64),
    Dates(DateRange),
}

impl FilterValue {
    const fn describe(&self) -> &'static str {
        match self {
            FilterValue::One(_) => "single value",
            FilterValue::Many(_) => "value set",
            FilterValue::Threshold(_) => "threshold",
            FilterValue::Dates(_) => "date range",
        }
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::One(v) => write!(f, "{v}"),
            FilterValue::Many(values) => {
                f.write_str("{")?;
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{v}")?;
                }
                f.write_str("}")
            }
            FilterValue::Threshold(v) => write!(f, "{v}"),
            FilterValue::Dates(range) => write!(f, "{range}"),
        }
    }
}

/// A single (field, operator, value) condition derived from query text.
///
/// Query filters are untrusted input: they only ever narrow the caller's scope.
/// Construction guarantees the operator fits the field:
/// `EQUALS`/`IN` on scope dimensions, `LESS_THAN`/`GREATER_THAN` on metrics,
/// `BETWEEN` on the time window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryFilter {
    field: Field,
    op: FilterOp,
    value: FilterValue,
}

impl QueryFilter {
    /// Build a filter, checking that operator and value fit the field.
    ///
    /// # Errors
    /// Returns [`FilterError`] when the operator is not supported on the
    /// field, the value has the wrong shape or type, or a value set is empty.
    pub fn new(field: Field, op: FilterOp, value: FilterValue) -> FilterResult<Self> {
        let supported = match op {
            FilterOp::Equals | FilterOp::In => field.dimension().is_some(),
            FilterOp::LessThan | FilterOp::GreaterThan => field.is_metric(),
            FilterOp::Between => field == Field::TimeWindow,
        };
        if !supported {
            return Err(FilterError::UnsupportedOperation { field, op });
        }

        let shape_ok = matches!(
            (op, &value),
            (FilterOp::Equals, FilterValue::One(_))
                | (FilterOp::In, FilterValue::Many(_))
                | (FilterOp::LessThan | FilterOp::GreaterThan, FilterValue::Threshold(_))
                | (FilterOp::Between, FilterValue::Dates(_))
        );
        if !shape_ok {
            return Err(FilterError::TypeMismatch {
                field,
                expected: field.kind(),
                got: value.describe(),
            });
        }

        match &value {
            FilterValue::One(v) => check_scalar(field, v)?,
            FilterValue::Many(values) => {
                if values.is_empty() {
                    return Err(FilterError::EmptySet(field));
                }
                for v in values {
                    check_scalar(field, v)?;
                }
            }
            FilterValue::Threshold(_) | FilterValue::Dates(_) => {}
        }

        Ok(Self { field, op, value })
    }

    /// `dimension EQUALS value`.
    ///
    /// # Errors
    /// Returns [`FilterError::TypeMismatch`] when the value type does not fit
    /// the dimension (grades are integers, everything else is text).
    pub fn equals(dimension: Dimension, value: impl Into<ScopeValue>) -> FilterResult<Self> {
        Self::new(
            dimension.into(),
            FilterOp::Equals,
            FilterValue::One(value.into()),
        )
    }

    /// `dimension IN values`.
    ///
    /// # Errors
    /// Returns [`FilterError`] for an empty set or mistyped values.
    pub fn one_of<I, V>(dimension: Dimension, values: I) -> FilterResult<Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<ScopeValue>,
    {
        Self::new(
            dimension.into(),
            FilterOp::In,
            FilterValue::Many(values.into_iter().map(Into::into).collect()),
        )
    }

    /// `metric LESS_THAN threshold`.
    ///
    /// # Errors
    /// Returns [`FilterError::UnsupportedOperation`] unless `field` is a metric.
    pub fn less_than(field: Field, threshold: i64) -> FilterResult<Self> {
        Self::new(field, FilterOp::LessThan, FilterValue::Threshold(threshold))
    }

    /// `metric GREATER_THAN threshold`.
    ///
    /// # Errors
    /// Returns [`FilterError::UnsupportedOperation`] unless `field` is a metric.
    pub fn greater_than(field: Field, threshold: i64) -> FilterResult<Self> {
        Self::new(field, FilterOp::GreaterThan, FilterValue::Threshold(threshold))
    }

    /// `time_window BETWEEN range`.
    #[must_use]
    pub fn within(range: DateRange) -> Self {
        Self {
            field: Field::TimeWindow,
            op: FilterOp::Between,
            value: FilterValue::Dates(range),
        }
    }

    #[inline]
    #[must_use]
    pub fn field(&self) -> Field {
        self.field
    }

    #[inline]
    #[must_use]
    pub fn op(&self) -> FilterOp {
        self.op
    }

    #[inline]
    #[must_use]
    pub fn value(&self) -> &FilterValue {
        &self.value
    }

    /// Values requested by a membership filter (`EQUALS` or `IN`).
    #[must_use]
    pub fn requested_values(&self) -> Option<BTreeSet<ScopeValue>> {
        match &self.value {
            FilterValue::One(v) => Some(BTreeSet::from([v.clone()])),
            FilterValue::Many(values) => Some(values.clone()),
            FilterValue::Threshold(_) | FilterValue::Dates(_) => None,
        }
    }

    #[must_use]
    pub fn date_range(&self) -> Option<DateRange> {
        match &self.value {
            FilterValue::Dates(range) => Some(*range),
            FilterValue::One(_) | FilterValue::Many(_) | FilterValue::Threshold(_) => None,
        }
    }

    /// Whether a numeric cell satisfies a threshold filter.
    ///
    /// Always false for non-threshold filters.
    #[must_use]
    pub fn accepts_number(&self, cell: i64) -> bool {
        match (self.op, &self.value) {
            (FilterOp::LessThan, FilterValue::Threshold(t)) => cell < *t,
            (FilterOp::GreaterThan, FilterValue::Threshold(t)) => cell > *t,
            _ => false,
        }
    }

    /// Whether two filters target the same field in a way that cannot both
    /// hold as written, so the later one must replace the earlier.
    ///
    /// Membership filters conflict with each other, a comparison conflicts only
    /// with the same comparison, and two time windows conflict.
    #[must_use]
    pub fn conflicts_with(&self, other: &QueryFilter) -> bool {
        self.field == other.field && self.op_family() == other.op_family()
    }

    const fn op_family(&self) -> u8 {
        match self.op {
            FilterOp::Equals | FilterOp::In => 0,
            FilterOp::LessThan => 1,
            FilterOp::GreaterThan => 2,
            FilterOp::Between => 3,
        }
    }
}

impl fmt::Display for QueryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.field, self.op, self.value)
    }
}

fn check_scalar(field: Field, value: &ScopeValue) -> FilterResult<()> {
    let ok = match field.kind() {
        FieldKind::Int => value.as_int().is_some(),
        FieldKind::Text => value.as_text().is_some(),
        FieldKind::DateRange => false,
    };
    if ok {
        Ok(())
    } else {
        Err(FilterError::TypeMismatch {
            field,
            expected: field.kind(),
            got: match value {
                ScopeValue::Int(_) => "integer",
                ScopeValue::Text(_) => "text",
            },
        })
    }
}

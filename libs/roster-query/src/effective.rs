use std::collections::{BTreeMap, BTreeSet};

use roster_security::{Dimension, ScopeValue};
use serde::Serialize;

use crate::field::Field;
use crate::filter::{DateRange, QueryFilter};
use crate::intent::{Dataset, QueryIntent};
use crate::projection::Projection;

/// Whether a composed filter set can match anything at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    Open,
    /// The query asked only for values outside the caller's scope on `field`.
    EmptyResult { field: Field },
}

/// The authoritative filter set for one query: caller scope intersected with
/// query filters, plus the projection.
///
/// Produced by [`crate::compose`] and handed verbatim to the data accessor.
/// Every constraint here is AND-ed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EffectiveFilterSet {
    pub(crate) intent: QueryIntent,
    pub(crate) dataset: Dataset,
    pub(crate) allowed: BTreeMap<Dimension, BTreeSet<ScopeValue>>,
    pub(crate) value_filters: Vec<QueryFilter>,
    pub(crate) time_window: Option<DateRange>,
    pub(crate) projection: Projection,
    pub(crate) requested: Vec<QueryFilter>,
    pub(crate) outcome: Outcome,
}

impl EffectiveFilterSet {
    #[inline]
    #[must_use]
    pub fn intent(&self) -> QueryIntent {
        self.intent
    }

    #[inline]
    #[must_use]
    pub fn dataset(&self) -> Dataset {
        self.dataset
    }

    /// Allowed values per constrained dimension. Unlisted dimensions are open.
    #[inline]
    #[must_use]
    pub fn allowed(&self) -> &BTreeMap<Dimension, BTreeSet<ScopeValue>> {
        &self.allowed
    }

    #[must_use]
    pub fn allowed_for(&self, dimension: Dimension) -> Option<&BTreeSet<ScopeValue>> {
        self.allowed.get(&dimension)
    }

    /// Threshold filters on metric fields.
    #[inline]
    #[must_use]
    pub fn value_filters(&self) -> &[QueryFilter] {
        &self.value_filters
    }

    #[inline]
    #[must_use]
    pub fn time_window(&self) -> Option<DateRange> {
        self.time_window
    }

    #[inline]
    #[must_use]
    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Query filters this set was composed from, in the order given.
    #[inline]
    #[must_use]
    pub fn requested(&self) -> &[QueryFilter] {
        &self.requested
    }

    #[inline]
    #[must_use]
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    #[must_use]
    pub fn is_empty_result(&self) -> bool {
        matches!(self.outcome, Outcome::EmptyResult { .. })
    }

    /// Whether a record's dimension value is inside the allowed set.
    #[must_use]
    pub fn permits(&self, dimension: Dimension, value: &ScopeValue) -> bool {
        self.allowed
            .get(&dimension)
            .is_none_or(|allowed| allowed.contains(value))
    }
}

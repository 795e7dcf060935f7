//! Merge of caller scope with query-derived filters.
//!
//! Scope can only be narrowed here. A query filter on a scope-constrained
//! dimension intersects with the scope's allowed values; an empty intersection
//! produces [`Outcome::EmptyResult`] and never falls back to the full scope.

use std::collections::{BTreeMap, BTreeSet};

use roster_security::{Capabilities, Dimension, ScopePredicate, ScopeValue};

use crate::effective::{EffectiveFilterSet, Outcome};
use crate::field::Field;
use crate::filter::{DateRange, FilterOp, QueryFilter};
use crate::intent::QueryIntent;
use crate::projection::Projection;

/// Build the effective filter set for one query.
///
/// Filters are applied in order and AND-ed: two membership filters on the same
/// dimension narrow to their intersection, two time windows to their overlap.
/// Threshold filters pass through unchanged, including those on sensitive
/// fields; sensitivity affects only the projection. A threshold on a metric
/// the intent's dataset does not carry is dropped.
#[must_use]
pub fn compose(
    scope: &ScopePredicate,
    filters: &[QueryFilter],
    intent: QueryIntent,
    capabilities: Capabilities,
) -> EffectiveFilterSet {
    let mut state = Composition {
        allowed: scope.constraints().clone(),
        value_filters: Vec::new(),
        time_window: None,
        outcome: Outcome::Open,
    };

    let dataset = intent.dataset();
    for filter in filters {
        match filter.op() {
            FilterOp::Equals | FilterOp::In => state.narrow(filter),
            FilterOp::LessThan | FilterOp::GreaterThan => {
                if dataset.has_column(filter.field().name()) {
                    state.value_filters.push(filter.clone());
                } else {
                    tracing::debug!(
                        filter = %filter,
                        dataset = %dataset,
                        "dropping threshold on a column the dataset does not have"
                    );
                }
            }
            FilterOp::Between => state.restrict_window(filter),
        }
    }

    let effective = EffectiveFilterSet {
        intent,
        dataset,
        allowed: state.allowed,
        value_filters: state.value_filters,
        time_window: state.time_window,
        projection: Projection::for_intent(intent, capabilities),
        requested: filters.to_vec(),
        outcome: state.outcome,
    };

    tracing::debug!(
        intent = %intent,
        dataset = %effective.dataset,
        constrained = effective.allowed.len(),
        value_filters = effective.value_filters.len(),
        empty_result = effective.is_empty_result(),
        "composed effective filter set"
    );
    effective
}

struct Composition {
    allowed: BTreeMap<Dimension, BTreeSet<ScopeValue>>,
    value_filters: Vec<QueryFilter>,
    time_window: Option<DateRange>,
    outcome: Outcome,
}

impl Composition {
    fn narrow(&mut self, filter: &QueryFilter) {
        let (Some(dimension), Some(requested)) =
            (filter.field().dimension(), filter.requested_values())
        else {
            return;
        };
        let narrowed: BTreeSet<ScopeValue> = match self.allowed.get(&dimension) {
            Some(current) => current.intersection(&requested).cloned().collect(),
            None => requested,
        };
        if narrowed.is_empty() {
            self.mark_empty(filter.field());
        }
        self.allowed.insert(dimension, narrowed);
    }

    fn restrict_window(&mut self, filter: &QueryFilter) {
        let Some(range) = filter.date_range() else {
            return;
        };
        match self.time_window {
            None => self.time_window = Some(range),
            Some(current) => match current.intersect(&range) {
                Some(overlap) => self.time_window = Some(overlap),
                None => self.mark_empty(Field::TimeWindow),
            },
        }
    }

    fn mark_empty(&mut self, field: Field) {
        if self.outcome == Outcome::Open {
            self.outcome = Outcome::EmptyResult { field };
        }
    }
}

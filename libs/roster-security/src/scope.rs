use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::dimension::{Dimension, ScopeValue};

/// The set of records an identity may see, as per-dimension allowed values.
///
/// A dimension absent from the map is unconstrained. A predicate with no
/// constrained dimensions is unrestricted. Constraints on different dimensions
/// are AND-ed; there is no way to express a union across dimensions.
///
/// A constrained dimension with an empty value set matches nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopePredicate {
    constraints: BTreeMap<Dimension, BTreeSet<ScopeValue>>,
}

impl ScopePredicate {
    // ── Constructors ────────────────────────────────────────────────

    /// Predicate matching every record.
    #[must_use]
    pub fn unrestricted() -> Self {
        Self {
            constraints: BTreeMap::new(),
        }
    }

    /// Predicate constraining a single dimension.
    #[must_use]
    pub fn only<I, V>(dimension: Dimension, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<ScopeValue>,
    {
        let mut constraints = BTreeMap::new();
        constraints.insert(dimension, values.into_iter().map(Into::into).collect());
        Self { constraints }
    }

    // ── Accessors ───────────────────────────────────────────────────

    #[inline]
    #[must_use]
    pub fn is_unrestricted(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Allowed values for `dimension`, or `None` when it is unconstrained.
    #[inline]
    #[must_use]
    pub fn allowed(&self, dimension: Dimension) -> Option<&BTreeSet<ScopeValue>> {
        self.constraints.get(&dimension)
    }

    #[inline]
    #[must_use]
    pub fn constraints(&self) -> &BTreeMap<Dimension, BTreeSet<ScopeValue>> {
        &self.constraints
    }

    pub fn constrained_dimensions(&self) -> impl Iterator<Item = Dimension> + '_ {
        self.constraints.keys().copied()
    }

    /// Whether a record with `value` in `dimension` passes this dimension's constraint.
    #[must_use]
    pub fn permits(&self, dimension: Dimension, value: &ScopeValue) -> bool {
        self.constraints
            .get(&dimension)
            .is_none_or(|allowed| allowed.contains(value))
    }

    /// True when some constrained dimension allows no value at all.
    #[must_use]
    pub fn denies_all(&self) -> bool {
        self.constraints.values().any(BTreeSet::is_empty)
    }

    // ── Composition ─────────────────────────────────────────────────

    /// AND of two predicates: per-dimension intersection of allowed values.
    ///
    /// A dimension constrained by only one side keeps that side's values.
    #[must_use]
    pub fn intersect(&self, other: &ScopePredicate) -> ScopePredicate {
        let mut constraints = self.constraints.clone();
        for (dimension, theirs) in &other.constraints {
            constraints
                .entry(*dimension)
                .and_modify(|ours| {
                    ours.retain(|v| theirs.contains(v));
                })
                .or_insert_with(|| theirs.clone());
        }
        ScopePredicate { constraints }
    }
}

//! Query response returned to callers.

use std::collections::BTreeMap;

use roster_query::{EffectiveFilterSet, QueryIntent};
use serde::Serialize;

use crate::row::Row;

/// Why a response has the rows it has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultStatus {
    /// At least one row matched.
    Rows,
    /// The query was well-formed and in scope, but nothing matched.
    NoMatches,
    /// The query asked only for values outside the caller's scope.
    EmptyScope,
    /// No intent pattern matched the text.
    Unrecognized,
}

impl ResultStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rows => "rows",
            Self::NoMatches => "no_matches",
            Self::EmptyScope => "empty_scope",
            Self::Unrecognized => "unrecognized",
        }
    }
}

/// Score statistics over the returned rows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreStats {
    pub min: i64,
    pub max: i64,
    pub average: f64,
    /// Rows that carry a score.
    pub scored: usize,
}

/// Aggregates over the returned rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResultSummary {
    pub rows: usize,
    pub distinct_students: usize,
    /// Row count per grade, when grade is a visible column.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub grades: BTreeMap<i64, usize>,
    /// Present only when `quiz_score` is a visible column.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scores: Option<ScoreStats>,
}

/// Result of one query.
#[derive(Debug, Clone, Serialize)]
pub struct Response {
    pub status: ResultStatus,
    pub intent: QueryIntent,
    /// Normalized, transliterated query text the intent was resolved from.
    /// Empty for retried queries.
    pub interpreted: String,
    /// Columns present in every row, in display order.
    pub columns: Vec<&'static str>,
    pub rows: Vec<Row>,
    /// The effective filter set the rows were selected with.
    pub filters: EffectiveFilterSet,
    /// Intents a caller may want to ask about next.
    pub follow_ups: Vec<QueryIntent>,
    pub summary: ResultSummary,
    /// Whether the caller may export these rows.
    pub export_allowed: bool,
}

impl Response {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

use std::collections::{BTreeMap, BTreeSet};

use roster_query::Projection;
use roster_query::columns as col;
use student_records_sdk::{ResultSummary, Row, ScoreStats};

/// Aggregates over shaped rows.
///
/// Only visible columns are read, so a summary never exposes a value the rows
/// themselves do not show.
#[must_use]
pub fn summarize(rows: &[Row], projection: &Projection) -> ResultSummary {
    let distinct_students = if projection.is_visible(col::STUDENT_ID) {
        rows.iter()
            .filter_map(|row| row.get(col::STUDENT_ID))
            .collect::<BTreeSet<_>>()
            .len()
    } else {
        0
    };

    let mut grades = BTreeMap::new();
    if projection.is_visible(col::GRADE) {
        for grade in rows.iter().filter_map(|row| row.get(col::GRADE)?.as_int()) {
            *grades.entry(grade).or_insert(0) += 1;
        }
    }

    let scores = if projection.is_visible(col::QUIZ_SCORE) {
        score_stats(rows.iter().filter_map(|row| row.get(col::QUIZ_SCORE)?.as_int()))
    } else {
        None
    };

    ResultSummary {
        rows: rows.len(),
        distinct_students,
        grades,
        scores,
    }
}

fn score_stats(scores: impl Iterator<Item = i64>) -> Option<ScoreStats> {
    let mut min = i64::MAX;
    let mut max = i64::MIN;
    let mut sum = 0i64;
    let mut scored = 0usize;
    for score in scores {
        min = min.min(score);
        max = max.max(score);
        sum = sum.saturating_add(score);
        scored += 1;
    }
    if scored == 0 {
        return None;
    }
    // Scores are percentages; both operands are far below 2^52.
    #[allow(clippy::cast_precision_loss)]
    let average = sum as f64 / scored as f64;
    Some(ScoreStats {
        min,
        max,
        average,
        scored,
    })
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use roster_query::QueryIntent;
    use roster_security::Capabilities;

    fn row(id: &str, grade: i64, score: Option<i64>) -> Row {
        Row::new()
            .with(col::STUDENT_ID, id)
            .with(col::GRADE, grade)
            .with(col::QUIZ_SCORE, score)
    }

    fn rows() -> Vec<Row> {
        vec![
            row("S1", 8, Some(90)),
            row("S1", 8, Some(70)),
            row("S2", 9, None),
            row("S3", 9, Some(50)),
        ]
    }

    #[test]
    fn scores_reported_when_visible() {
        let caps = Capabilities {
            can_view_sensitive: true,
            can_export: false,
        };
        let projection = Projection::for_intent(QueryIntent::Performance, caps);
        let summary = summarize(&rows(), &projection);
        assert_eq!(summary.rows, 4);
        assert_eq!(summary.distinct_students, 3);
        assert_eq!(summary.grades, BTreeMap::from([(8, 2), (9, 2)]));
        let stats = summary.scores.unwrap();
        assert_eq!((stats.min, stats.max, stats.scored), (50, 90, 3));
        assert!((stats.average - 70.0).abs() < 1e-9);
    }

    #[test]
    fn scores_hidden_without_capability() {
        let projection = Projection::for_intent(QueryIntent::Performance, Capabilities::default());
        assert!(summarize(&rows(), &projection).scores.is_none());
    }

    #[test]
    fn empty_rows() {
        let projection = Projection::for_intent(QueryIntent::GenericList, Capabilities::default());
        let summary = summarize(&[], &projection);
        assert_eq!(summary, ResultSummary::default());
    }
}

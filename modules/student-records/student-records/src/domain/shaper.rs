//! Turns an effective filter set into a [`Response`].

use std::cmp::Ordering;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use roster_query::columns as col;
use roster_query::{EffectiveFilterSet, QueryIntent};
use roster_security::{Identity, can_export};
use student_records_sdk::{CellValue, DataAccessor, Response, ResultStatus, Row};

use super::error::DomainError;
use super::follow_ups::follow_ups;
use super::summary::summarize;
use crate::config::ShaperConfig;

/// Fetches rows through a [`DataAccessor`] and post-processes them per intent.
pub struct ResultShaper {
    accessor: Arc<dyn DataAccessor>,
    config: ShaperConfig,
}

impl ResultShaper {
    #[must_use]
    pub fn new(accessor: Arc<dyn DataAccessor>, config: ShaperConfig) -> Self {
        Self { accessor, config }
    }

    /// Build the response for `filters`, composed for `identity`.
    ///
    /// Empty-result and unrecognized filter sets never reach the accessor.
    ///
    /// # Errors
    /// Returns [`DomainError::Accessor`] if the accessor fails.
    pub async fn shape(
        &self,
        identity: &Identity,
        filters: EffectiveFilterSet,
        interpreted: String,
        now: DateTime<Utc>,
    ) -> Result<Response, DomainError> {
        let intent = filters.intent();
        let short_circuit = if intent == QueryIntent::Unrecognized {
            Some(ResultStatus::Unrecognized)
        } else if filters.is_empty_result() {
            Some(ResultStatus::EmptyScope)
        } else {
            None
        };

        let mut rows = if short_circuit.is_some() {
            Vec::new()
        } else {
            let fetched = self
                .accessor
                .fetch(&filters)
                .await
                .map_err(|e| DomainError::accessor(e, &filters))?;
            self.post_process(intent, fetched, now)
        };

        let visible = filters.projection().visible();
        for row in &mut rows {
            row.retain_columns(visible);
        }

        let status = short_circuit.unwrap_or(if rows.is_empty() {
            ResultStatus::NoMatches
        } else {
            ResultStatus::Rows
        });
        tracing::debug!(
            intent = %intent,
            status = status.as_str(),
            rows = rows.len(),
            "shaped response"
        );

        Ok(Response {
            status,
            intent,
            interpreted,
            columns: visible.to_vec(),
            summary: summarize(&rows, filters.projection()),
            rows,
            follow_ups: follow_ups(intent).to_vec(),
            filters,
            export_allowed: can_export(identity),
        })
    }

    fn post_process(&self, intent: QueryIntent, mut rows: Vec<Row>, now: DateTime<Utc>) -> Vec<Row> {
        match intent {
            QueryIntent::HomeworkStatus => {
                rows.retain(|row| cell_bool(row, col::HOMEWORK_SUBMITTED) == Some(false));
            }
            QueryIntent::TopPerformers => {
                rows.retain(|row| score(row).is_some());
                rows.sort_by(|a, b| score(b).cmp(&score(a)).then_with(|| by_student_id(a, b)));
                rows.truncate(self.config.top_limit);
            }
            QueryIntent::LowPerformers => {
                let threshold = self.config.low_score_threshold;
                rows.retain(|row| score(row).is_some_and(|s| s < threshold));
                rows.sort_by(|a, b| score(a).cmp(&score(b)).then_with(|| by_student_id(a, b)));
                rows.truncate(self.config.top_limit);
            }
            QueryIntent::UpcomingQuizzes => {
                let today = now.date_naive();
                rows.retain(|row| {
                    row.get(col::SCHEDULED_DATE)
                        .and_then(CellValue::as_date)
                        .is_some_and(|day| day > today)
                });
                rows.sort_by(|a, b| {
                    a.get(col::SCHEDULED_DATE)
                        .cmp(&b.get(col::SCHEDULED_DATE))
                        .then_with(|| a.get(col::QUIZ_ID).cmp(&b.get(col::QUIZ_ID)))
                });
            }
            QueryIntent::Performance
            | QueryIntent::Attendance
            | QueryIntent::GenericList
            | QueryIntent::Unrecognized => {}
        }
        rows
    }
}

fn score(row: &Row) -> Option<i64> {
    row.get(col::QUIZ_SCORE).and_then(CellValue::as_int)
}

fn cell_bool(row: &Row, column: &str) -> Option<bool> {
    row.get(column).and_then(CellValue::as_bool)
}

fn by_student_id(a: &Row, b: &Row) -> Ordering {
    let (a, b) = (a.get(col::STUDENT_ID), b.get(col::STUDENT_ID));
    match (a.and_then(CellValue::as_text), b.and_then(CellValue::as_text)) {
        (Some(a), Some(b)) => natural_cmp(a, b),
        _ => a.cmp(&b),
    }
}

/// Orders ids like `S2` before `S10`: the alphabetic prefix first, then the
/// trailing digits by numeric value, then the raw text.
fn natural_cmp(a: &str, b: &str) -> Ordering {
    let (a_prefix, a_num) = split_numeric_suffix(a);
    let (b_prefix, b_num) = split_numeric_suffix(b);
    a_prefix
        .cmp(b_prefix)
        .then_with(|| a_num.len().cmp(&b_num.len()))
        .then_with(|| a_num.cmp(b_num))
        .then_with(|| a.cmp(b))
}

/// Splits `S007` into `("S", "7")`; the digits carry no leading zeros.
fn split_numeric_suffix(id: &str) -> (&str, &str) {
    let prefix = id.trim_end_matches(|c: char| c.is_ascii_digit());
    (prefix, id[prefix.len()..].trim_start_matches('0'))
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{NaiveDate, TimeZone};
    use roster_query::{QueryFilter, compose};
    use roster_security::{AccessLevel, Capabilities, Dimension, ScopePredicate};
    use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};
    use student_records_sdk::{AccessorError, matching};

    struct Fixed {
        rows: Vec<Row>,
        calls: AtomicUsize,
    }

    impl Fixed {
        fn new(rows: Vec<Row>) -> Arc<Self> {
            Arc::new(Self {
                rows,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl DataAccessor for Fixed {
        async fn fetch(&self, filters: &EffectiveFilterSet) -> Result<Vec<Row>, AccessorError> {
            self.calls.fetch_add(1, AtomicOrdering::SeqCst);
            matching::select(filters, &self.rows)
        }
    }

    const SENSITIVE: Capabilities = Capabilities {
        can_view_sensitive: true,
        can_export: false,
    };

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap()
    }

    fn student(id: &str, score: Option<i64>, submitted: bool) -> Row {
        Row::new()
            .with(col::STUDENT_ID, id)
            .with(col::STUDENT_NAME, format!("Student {id}"))
            .with(col::GRADE, 8)
            .with(col::CLASS_SECTION, "A")
            .with(col::REGION, "North")
            .with(col::SUBJECT, "Science")
            .with(col::HOMEWORK_ASSIGNMENT, "Chapter 3")
            .with(col::HOMEWORK_SUBMITTED, submitted)
            .with(col::SUBMISSION_DATE, None::<NaiveDate>)
            .with(col::QUIZ_TOPIC, "Motion")
            .with(col::QUIZ_SCORE, score)
            .with(col::QUIZ_DATE, NaiveDate::from_ymd_opt(2026, 10, 12).unwrap())
            .with(col::ATTENDANCE_PERCENTAGE, 90)
    }

    fn quiz(id: &str, day: u32) -> Row {
        Row::new()
            .with(col::QUIZ_ID, id)
            .with(col::SUBJECT, "Science")
            .with(col::TOPIC, "Light")
            .with(col::SCHEDULED_DATE, NaiveDate::from_ymd_opt(2026, 10, day).unwrap())
            .with(col::GRADE, 8)
            .with(col::CLASS_SECTION, "A")
            .with(col::REGION, "North")
            .with(col::DURATION_MINUTES, 30)
            .with(col::TOTAL_MARKS, 50)
    }

    fn ids(response: &Response, column: &str) -> Vec<String> {
        response
            .rows
            .iter()
            .map(|r| r.get(column).unwrap().to_string())
            .collect()
    }

    fn caller(caps: Capabilities) -> Identity {
        Identity::builder("tester", AccessLevel::Super)
            .can_view_sensitive(caps.can_view_sensitive)
            .can_export(caps.can_export)
            .build()
            .unwrap()
    }

    async fn run(rows: Vec<Row>, intent: QueryIntent, caps: Capabilities) -> Response {
        let eff = compose(&ScopePredicate::unrestricted(), &[], intent, caps);
        ResultShaper::new(Fixed::new(rows), ShaperConfig::default())
            .shape(&caller(caps), eff, String::new(), now())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn top_performers_break_ties_by_student_id() {
        let rows = vec![
            student("S3", Some(90), true),
            student("S1", Some(90), true),
            student("S2", Some(95), true),
            student("S4", None, true),
        ];
        let response = run(rows, QueryIntent::TopPerformers, SENSITIVE).await;
        assert_eq!(ids(&response, col::STUDENT_ID), ["S2", "S1", "S3"]);
        assert_eq!(response.status, ResultStatus::Rows);
    }

    #[tokio::test]
    async fn tied_ids_sort_numerically() {
        let rows = ["S10", "S2", "S1", "T1"]
            .into_iter()
            .map(|id| student(id, Some(80), true))
            .collect();
        let response = run(rows, QueryIntent::TopPerformers, SENSITIVE).await;
        assert_eq!(ids(&response, col::STUDENT_ID), ["S1", "S2", "S10", "T1"]);

        let rows = ["S10", "S9"]
            .into_iter()
            .map(|id| student(id, Some(40), true))
            .collect();
        let response = run(rows, QueryIntent::LowPerformers, SENSITIVE).await;
        assert_eq!(ids(&response, col::STUDENT_ID), ["S9", "S10"]);
    }

    #[test]
    fn natural_order_handles_padding_and_bare_prefixes() {
        assert_eq!(natural_cmp("S2", "S10"), Ordering::Less);
        assert_eq!(natural_cmp("S007", "S10"), Ordering::Less);
        assert_eq!(natural_cmp("S01", "S1"), Ordering::Less);
        assert_eq!(natural_cmp("S", "S0"), Ordering::Less);
        assert_eq!(natural_cmp("A9", "B1"), Ordering::Less);
    }

    #[tokio::test]
    async fn ranking_without_sensitive_access_hides_score() {
        let rows = vec![student("S1", Some(70), true), student("S2", Some(80), true)];
        let response = run(rows, QueryIntent::TopPerformers, Capabilities::default()).await;
        assert_eq!(ids(&response, col::STUDENT_ID), ["S2", "S1"]);
        assert!(response.rows.iter().all(|r| !r.contains(col::QUIZ_SCORE)));
        assert!(!response.columns.contains(&col::QUIZ_SCORE));
    }

    #[tokio::test]
    async fn low_performers_below_threshold_ascending() {
        let rows = vec![
            student("S1", Some(59), true),
            student("S2", Some(60), true),
            student("S3", Some(45), true),
            student("S4", None, true),
        ];
        let response = run(rows, QueryIntent::LowPerformers, SENSITIVE).await;
        assert_eq!(ids(&response, col::STUDENT_ID), ["S3", "S1"]);
    }

    #[tokio::test]
    async fn top_performers_capped() {
        let rows = (0..15)
            .map(|i| student(&format!("S{i:02}"), Some(50 + i), true))
            .collect();
        let response = run(rows, QueryIntent::TopPerformers, SENSITIVE).await;
        assert_eq!(response.rows.len(), 10);
        assert_eq!(ids(&response, col::STUDENT_ID)[0], "S14");
    }

    #[tokio::test]
    async fn homework_status_keeps_pending_only() {
        let rows = vec![student("S1", Some(70), true), student("S2", Some(70), false)];
        let response = run(rows, QueryIntent::HomeworkStatus, SENSITIVE).await;
        assert_eq!(ids(&response, col::STUDENT_ID), ["S2"]);
        assert!(!response.rows[0].contains(col::HOMEWORK_SUBMITTED));
    }

    #[tokio::test]
    async fn upcoming_excludes_past_and_today() {
        let rows = vec![quiz("Q3", 25), quiz("Q1", 12), quiz("Q2", 19), quiz("Q0", 25)];
        let response = run(rows, QueryIntent::UpcomingQuizzes, SENSITIVE).await;
        assert_eq!(ids(&response, col::QUIZ_ID), ["Q0", "Q3"]);
    }

    #[tokio::test]
    async fn empty_scope_skips_accessor() {
        let accessor = Fixed::new(vec![student("S1", Some(70), true)]);
        let filters = [QueryFilter::equals(Dimension::Region, "South").unwrap()];
        let eff = compose(
            &ScopePredicate::only(Dimension::Region, ["North"]),
            &filters,
            QueryIntent::GenericList,
            SENSITIVE,
        );
        let response = ResultShaper::new(accessor.clone(), ShaperConfig::default())
            .shape(&caller(SENSITIVE), eff, String::new(), now())
            .await
            .unwrap();
        assert_eq!(response.status, ResultStatus::EmptyScope);
        assert!(response.rows.is_empty());
        assert_eq!(accessor.calls.load(AtomicOrdering::SeqCst), 0);
    }

    #[tokio::test]
    async fn no_matches_is_distinct_from_empty_scope() {
        let response = run(vec![], QueryIntent::Attendance, SENSITIVE).await;
        assert_eq!(response.status, ResultStatus::NoMatches);
        assert_eq!(
            response.follow_ups,
            [QueryIntent::LowPerformers, QueryIntent::HomeworkStatus]
        );
    }
}

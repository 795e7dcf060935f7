//! Reference evaluation of an [`EffectiveFilterSet`] against rows.
//!
//! Accessors that hold rows in memory can use these directly. Accessors that
//! push filters down to a store must produce the same results.

use roster_query::EffectiveFilterSet;

use crate::error::AccessorError;
use crate::row::{CellValue, Row};

/// Whether `row` satisfies every constraint in `filters`.
///
/// Null cells never satisfy a dimension constraint, a threshold or a time
/// window.
///
/// # Errors
/// Returns [`AccessorError::SchemaMismatch`] if the row lacks a column one of
/// the constraints applies to.
pub fn row_matches(filters: &EffectiveFilterSet, row: &Row) -> Result<bool, AccessorError> {
    let dataset = filters.dataset().name();

    for (dimension, allowed) in filters.allowed() {
        let cell = cell(row, dataset, dimension.column())?;
        let inside = cell
            .to_scope_value()
            .is_some_and(|value| allowed.contains(&value));
        if !inside {
            return Ok(false);
        }
    }

    for filter in filters.value_filters() {
        let cell = cell(row, dataset, filter.field().name())?;
        if !cell.as_int().is_some_and(|v| filter.accepts_number(v)) {
            return Ok(false);
        }
    }

    if let Some(window) = filters.time_window() {
        let cell = cell(row, dataset, filters.dataset().date_column())?;
        if !cell.as_date().is_some_and(|day| window.contains(day)) {
            return Ok(false);
        }
    }

    Ok(true)
}

/// Copy of `row` reduced to the projection's fetch columns.
///
/// # Errors
/// Returns [`AccessorError::SchemaMismatch`] if a projected column is missing.
pub fn project(filters: &EffectiveFilterSet, row: &Row) -> Result<Row, AccessorError> {
    let dataset = filters.dataset().name();
    filters
        .projection()
        .fetch_columns()
        .map(|column| Ok((column, cell(row, dataset, column)?.clone())))
        .collect()
}

/// Filter and project `rows` in one pass.
///
/// An empty-result filter set yields no rows without looking at the data.
///
/// # Errors
/// Returns [`AccessorError::SchemaMismatch`] on the first row lacking a needed
/// column.
pub fn select<'a, I>(filters: &EffectiveFilterSet, rows: I) -> Result<Vec<Row>, AccessorError>
where
    I: IntoIterator<Item = &'a Row>,
{
    if filters.is_empty_result() {
        return Ok(Vec::new());
    }
    let mut out = Vec::new();
    for row in rows {
        if row_matches(filters, row)? {
            out.push(project(filters, row)?);
        }
    }
    Ok(out)
}

fn cell<'r>(row: &'r Row, dataset: &str, column: &str) -> Result<&'r CellValue, AccessorError> {
    row.get(column)
        .ok_or_else(|| AccessorError::missing_column(dataset, column))
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use roster_query::{DateRange, Field, QueryFilter, QueryIntent, compose};
    use roster_security::{Capabilities, Dimension, ScopePredicate};

    fn student(id: &str, region: &str, grade: i64, score: Option<i64>) -> Row {
        Row::new()
            .with("student_id", id)
            .with("student_name", "Asha")
            .with("grade", grade)
            .with("class_section", "A")
            .with("region", region)
            .with("subject", "Math")
            .with("quiz_topic", "Fractions")
            .with("quiz_score", score)
            .with("quiz_date", NaiveDate::from_ymd_opt(2026, 10, 12).unwrap())
            .with("attendance_percentage", 88)
    }

    fn sensitive() -> Capabilities {
        Capabilities {
            can_view_sensitive: true,
            can_export: false,
        }
    }

    #[test]
    fn dimension_constraints_are_enforced() {
        let eff = compose(
            &ScopePredicate::only(Dimension::Region, ["North"]),
            &[],
            QueryIntent::GenericList,
            sensitive(),
        );
        assert!(row_matches(&eff, &student("S1", "North", 8, Some(70))).unwrap());
        assert!(!row_matches(&eff, &student("S2", "South", 8, Some(70))).unwrap());
    }

    #[test]
    fn null_score_fails_threshold() {
        let filters = [QueryFilter::less_than(Field::QuizScore, 60).unwrap()];
        let eff = compose(&ScopePredicate::unrestricted(), &filters, QueryIntent::Performance, sensitive());
        assert!(row_matches(&eff, &student("S1", "North", 8, Some(45))).unwrap());
        assert!(!row_matches(&eff, &student("S2", "North", 8, Some(75))).unwrap());
        assert!(!row_matches(&eff, &student("S3", "North", 8, None)).unwrap());
    }

    #[test]
    fn time_window_uses_dataset_date_column() {
        let d = |day| NaiveDate::from_ymd_opt(2026, 10, day).unwrap();
        let filters = [QueryFilter::within(DateRange::new(d(13), d(19)).unwrap())];
        let eff = compose(&ScopePredicate::unrestricted(), &filters, QueryIntent::Performance, sensitive());
        assert!(!row_matches(&eff, &student("S1", "North", 8, Some(70))).unwrap());
    }

    #[test]
    fn missing_filtered_column_is_schema_mismatch() {
        let eff = compose(
            &ScopePredicate::only(Dimension::Subject, ["Math"]),
            &[],
            QueryIntent::GenericList,
            sensitive(),
        );
        let row = Row::new().with("student_id", "S1");
        assert!(matches!(
            row_matches(&eff, &row),
            Err(AccessorError::SchemaMismatch(_))
        ));
    }

    #[test]
    fn projection_strips_unrequested_columns() {
        let eff = compose(&ScopePredicate::unrestricted(), &[], QueryIntent::Attendance, Capabilities::default());
        let rows = [student("S1", "North", 8, Some(70))];
        let out = select(&eff, &rows).unwrap();
        assert_eq!(out.len(), 1);
        assert!(!out[0].contains("quiz_score"));
        assert!(!out[0].contains("attendance_percentage"));
        assert!(out[0].contains("student_name"));
    }

    #[test]
    fn empty_result_short_circuits() {
        let filters = [QueryFilter::equals(Dimension::Region, "South").unwrap()];
        let eff = compose(
            &ScopePredicate::only(Dimension::Region, ["North"]),
            &filters,
            QueryIntent::GenericList,
            sensitive(),
        );
        let rows = [Row::new()];
        assert!(select(&eff, &rows).unwrap().is_empty());
    }
}

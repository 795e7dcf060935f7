#![allow(clippy::unwrap_used, clippy::expect_used)]

use chrono::NaiveDate;
use query_resolver::{QueryResolver, ResolverConfig, ResolverError};
use roster_query::{Field, FilterOp, QueryFilter, QueryIntent};
use roster_security::Dimension;

fn resolver() -> QueryResolver {
    QueryResolver::new(&ResolverConfig::default()).unwrap()
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

fn resolve(text: &str) -> (QueryIntent, Vec<String>) {
    let r = resolver().resolve_on(text, today());
    (r.intent, r.filters.iter().map(ToString::to_string).collect())
}

#[test]
fn hinglish_grade_performance() {
    let r = resolver().resolve_on("Grade 8 ki performance dikhao", today());
    assert_eq!(r.intent, QueryIntent::Performance);
    assert_eq!(r.filters, vec![QueryFilter::equals(Dimension::Grade, 8).unwrap()]);
}

#[test]
fn attendance_threshold() {
    let r = resolver().resolve_on("Show students with attendance less than 80%", today());
    assert_eq!(r.intent, QueryIntent::Attendance);
    assert!(r.filters.contains(&QueryFilter::less_than(Field::AttendancePercentage, 80).unwrap()));
}

#[test]
fn homework_status_in_both_languages() {
    let (intent, filters) = resolve("Which students haven't submitted their homework?");
    assert_eq!(intent, QueryIntent::HomeworkStatus);
    assert!(filters.is_empty());

    let (intent, _) = resolve("Kaunse students ne homework submit nahi kiya?");
    assert_eq!(intent, QueryIntent::HomeworkStatus);

    let (intent, filters) = resolve("Pending homework for class B in science");
    assert_eq!(intent, QueryIntent::HomeworkStatus);
    assert_eq!(filters, ["class_section EQUALS B", "subject EQUALS Science"]);
}

#[test]
fn upcoming_quizzes() {
    assert_eq!(resolve("List all upcoming quizzes").0, QueryIntent::UpcomingQuizzes);
    assert_eq!(resolve("Aane wale quiz ki list dikhao").0, QueryIntent::UpcomingQuizzes);

    let (intent, filters) = resolve("Tests scheduled next week for grade 7");
    assert_eq!(intent, QueryIntent::UpcomingQuizzes);
    assert_eq!(
        filters,
        ["time_window BETWEEN 2026-10-19..2026-10-26", "grade EQUALS 7"]
    );
}

#[test]
fn rankings() {
    assert_eq!(resolve("Who are the top performing students?").0, QueryIntent::TopPerformers);
    assert_eq!(resolve("Sabse acche students kaun hain?").0, QueryIntent::TopPerformers);
    assert_eq!(resolve("Show the weakest students in maths").0, QueryIntent::LowPerformers);
    assert_eq!(resolve("sabse kam marks wale bachche").0, QueryIntent::LowPerformers);
}

#[test]
fn low_attendance_is_attendance() {
    assert_eq!(resolve("kam attendance wale students").0, QueryIntent::Attendance);
}

#[test]
fn quiz_score_thresholds() {
    let (intent, filters) = resolve("Which students scored less than 60 in quiz?");
    assert_eq!(intent, QueryIntent::Performance);
    assert_eq!(filters, ["quiz_score LESS_THAN 60"]);

    let (intent, filters) = resolve("Quiz mein 60 se kam marks wale students");
    assert_eq!(intent, QueryIntent::Performance);
    assert_eq!(filters, ["quiz_score LESS_THAN 60"]);

    let (_, filters) = resolve("attendance 90 se zyada in grade 10");
    assert_eq!(filters, ["attendance_percentage GREATER_THAN 90", "grade EQUALS 10"]);
}

#[test]
fn bare_hindi_comparisons() {
    let (intent, filters) = resolve("attendance zyada 80");
    assert_eq!(intent, QueryIntent::Attendance);
    assert_eq!(filters, ["attendance_percentage GREATER_THAN 80"]);

    assert_eq!(resolve("attendance kam 75").1, ["attendance_percentage LESS_THAN 75"]);
    assert_eq!(resolve("attendance 75 kam").1, ["attendance_percentage LESS_THAN 75"]);
    assert_eq!(resolve("marks 50 se adhik").1, ["quiz_score GREATER_THAN 50"]);
}

#[test]
fn kam_without_a_number_still_ranks() {
    let (intent, filters) = resolve("kam marks wale students");
    assert_eq!(intent, QueryIntent::LowPerformers);
    assert!(filters.is_empty());

    let (intent, filters) = resolve("Grade 8 ke kam marks wale students");
    assert_eq!(intent, QueryIntent::LowPerformers);
    assert_eq!(filters, ["grade EQUALS 8"]);
}

#[test]
fn time_windows_from_hindi() {
    let (intent, filters) = resolve("Pichhle week ki performance dikhao");
    assert_eq!(intent, QueryIntent::Performance);
    assert_eq!(filters, ["time_window BETWEEN 2026-10-12..2026-10-19"]);

    let (_, filters) = resolve("is hafte ki performance");
    assert_eq!(filters, ["time_window BETWEEN 2026-10-19..2026-10-25"]);
}

#[test]
fn generic_listing() {
    let (intent, filters) = resolve("Grade 9 Class A ke sabhi students");
    assert_eq!(intent, QueryIntent::GenericList);
    assert_eq!(filters, ["grade EQUALS 9", "class_section EQUALS A"]);

    let (intent, filters) = resolve("North region ke students ki list");
    assert_eq!(intent, QueryIntent::GenericList);
    assert_eq!(filters, ["region EQUALS North"]);
}

#[test]
fn numbers_without_dimension_are_discarded() {
    let r = resolver().resolve_on("show 25 students", today());
    assert_eq!(r.intent, QueryIntent::GenericList);
    assert!(r.filters.is_empty());
}

#[test]
fn conflicting_filters_last_writer_wins() {
    let r = resolver().resolve_on("grade 8 students, no wait, grade 9 students", today());
    assert_eq!(r.filters.len(), 1);
    assert_eq!(r.filters[0].op(), FilterOp::Equals);
    assert_eq!(r.filters[0].to_string(), "grade EQUALS 9");
}

#[test]
fn unrecognized_text() {
    for text in ["", "   ", "??!!", "hello there", "kal milte hain"] {
        let r = resolver().resolve_on(text, today());
        assert_eq!(r.intent, QueryIntent::Unrecognized, "{text}");
        assert!(r.filters.is_empty());
    }
}

#[test]
fn custom_pattern_table_is_honored() {
    let mut config = ResolverConfig::default();
    config.intents.retain(|e| e.intent == QueryIntent::Attendance);
    let resolver = QueryResolver::new(&config).unwrap();
    assert_eq!(
        resolver.resolve_on("show performance", today()).intent,
        QueryIntent::Unrecognized
    );
    assert_eq!(
        resolver.resolve_on("absent students", today()).intent,
        QueryIntent::Attendance
    );
}

#[test]
fn invalid_pattern_fails_construction() {
    let mut config = ResolverConfig::default();
    config.intents[0].patterns.push("(".to_owned());
    assert!(matches!(
        QueryResolver::new(&config),
        Err(ResolverError::InvalidPattern { .. })
    ));
}

#[test]
fn suggestions_filter_the_catalog() {
    let resolver = resolver();
    assert_eq!(resolver.suggestions("").len(), 8);
    assert!(
        resolver
            .suggestions("quiz")
            .iter()
            .all(|s| s.to_lowercase().contains("quiz"))
    );
}

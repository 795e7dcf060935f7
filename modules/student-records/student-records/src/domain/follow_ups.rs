use roster_query::QueryIntent;

/// Intents worth suggesting after a query of `intent`.
#[must_use]
pub fn follow_ups(intent: QueryIntent) -> &'static [QueryIntent] {
    use QueryIntent::{
        Attendance, GenericList, HomeworkStatus, LowPerformers, Performance, TopPerformers,
        Unrecognized, UpcomingQuizzes,
    };
    match intent {
        HomeworkStatus => &[Attendance, Performance],
        Performance => &[TopPerformers, LowPerformers],
        Attendance => &[LowPerformers, HomeworkStatus],
        UpcomingQuizzes => &[Performance, HomeworkStatus],
        TopPerformers => &[LowPerformers, Performance],
        LowPerformers => &[Attendance, HomeworkStatus],
        GenericList => &[Performance, HomeworkStatus, UpcomingQuizzes],
        Unrecognized => &[GenericList, HomeworkStatus, UpcomingQuizzes],
    }
}

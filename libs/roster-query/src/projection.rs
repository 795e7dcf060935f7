use roster_security::Capabilities;
use serde::Serialize;

use crate::columns::{self as col, is_sensitive};
use crate::intent::QueryIntent;

/// Columns returned for a query.
///
/// `visible` columns reach the caller. `hidden` columns are fetched only so
/// the result can be post-processed (ordering, pending-work checks) and are
/// stripped before the response is packaged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Projection {
    visible: Vec<&'static str>,
    hidden: Vec<&'static str>,
}

impl Projection {
    /// Projection for `intent`, with sensitive columns suppressed unless the
    /// caller may view them.
    #[must_use]
    pub fn for_intent(intent: QueryIntent, capabilities: Capabilities) -> Self {
        let visible: Vec<&'static str> = display_columns(intent)
            .iter()
            .copied()
            .filter(|c| capabilities.can_view_sensitive || !is_sensitive(c))
            .collect();
        let hidden = working_columns(intent)
            .iter()
            .copied()
            .filter(|c| !visible.contains(c))
            .collect();
        Self { visible, hidden }
    }

    #[inline]
    #[must_use]
    pub fn visible(&self) -> &[&'static str] {
        &self.visible
    }

    #[inline]
    #[must_use]
    pub fn hidden(&self) -> &[&'static str] {
        &self.hidden
    }

    #[must_use]
    pub fn is_visible(&self, column: &str) -> bool {
        self.visible.contains(&column)
    }

    /// Every column the accessor has to return: visible first, then hidden.
    pub fn fetch_columns(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.visible.iter().chain(self.hidden.iter()).copied()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.visible.is_empty() && self.hidden.is_empty()
    }
}

fn display_columns(intent: QueryIntent) -> &'static [&'static str] {
    match intent {
        QueryIntent::HomeworkStatus => &[
            col::STUDENT_ID,
            col::STUDENT_NAME,
            col::GRADE,
            col::CLASS_SECTION,
            col::SUBJECT,
            col::HOMEWORK_ASSIGNMENT,
            col::SUBMISSION_DATE,
        ],
        QueryIntent::Performance => &[
            col::STUDENT_ID,
            col::STUDENT_NAME,
            col::GRADE,
            col::CLASS_SECTION,
            col::SUBJECT,
            col::QUIZ_SCORE,
            col::ATTENDANCE_PERCENTAGE,
            col::HOMEWORK_SUBMITTED,
        ],
        QueryIntent::Attendance => &[
            col::STUDENT_ID,
            col::STUDENT_NAME,
            col::GRADE,
            col::CLASS_SECTION,
            col::REGION,
            col::ATTENDANCE_PERCENTAGE,
        ],
        QueryIntent::UpcomingQuizzes => &[
            col::QUIZ_ID,
            col::SUBJECT,
            col::TOPIC,
            col::SCHEDULED_DATE,
            col::GRADE,
            col::CLASS_SECTION,
            col::REGION,
            col::DURATION_MINUTES,
            col::TOTAL_MARKS,
        ],
        QueryIntent::TopPerformers | QueryIntent::LowPerformers => &[
            col::STUDENT_ID,
            col::STUDENT_NAME,
            col::GRADE,
            col::CLASS_SECTION,
            col::QUIZ_TOPIC,
            col::QUIZ_SCORE,
            col::QUIZ_DATE,
        ],
        QueryIntent::GenericList => &[
            col::STUDENT_ID,
            col::STUDENT_NAME,
            col::GRADE,
            col::CLASS_SECTION,
            col::REGION,
            col::SUBJECT,
            col::ATTENDANCE_PERCENTAGE,
        ],
        QueryIntent::Unrecognized => &[],
    }
}

fn working_columns(intent: QueryIntent) -> &'static [&'static str] {
    match intent {
        QueryIntent::HomeworkStatus => &[col::HOMEWORK_SUBMITTED, col::STUDENT_ID],
        QueryIntent::TopPerformers | QueryIntent::LowPerformers => {
            &[col::QUIZ_SCORE, col::STUDENT_ID]
        }
        QueryIntent::UpcomingQuizzes => &[col::SCHEDULED_DATE, col::QUIZ_ID],
        QueryIntent::Performance | QueryIntent::Attendance | QueryIntent::GenericList => {
            &[col::STUDENT_ID]
        }
        QueryIntent::Unrecognized => &[],
    }
}

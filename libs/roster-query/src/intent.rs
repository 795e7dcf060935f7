use std::fmt;

use serde::{Deserialize, Serialize};

use crate::columns;

/// What an operator is asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QueryIntent {
    HomeworkStatus,
    Performance,
    Attendance,
    UpcomingQuizzes,
    TopPerformers,
    LowPerformers,
    GenericList,
    Unrecognized,
}

impl QueryIntent {
    pub const ALL: [QueryIntent; 8] = [
        QueryIntent::HomeworkStatus,
        QueryIntent::Performance,
        QueryIntent::Attendance,
        QueryIntent::UpcomingQuizzes,
        QueryIntent::TopPerformers,
        QueryIntent::LowPerformers,
        QueryIntent::GenericList,
        QueryIntent::Unrecognized,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            QueryIntent::HomeworkStatus => "HOMEWORK_STATUS",
            QueryIntent::Performance => "PERFORMANCE",
            QueryIntent::Attendance => "ATTENDANCE",
            QueryIntent::UpcomingQuizzes => "UPCOMING_QUIZZES",
            QueryIntent::TopPerformers => "TOP_PERFORMERS",
            QueryIntent::LowPerformers => "LOW_PERFORMERS",
            QueryIntent::GenericList => "GENERIC_LIST",
            QueryIntent::Unrecognized => "UNRECOGNIZED",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|i| i.as_str().eq_ignore_ascii_case(name))
    }

    /// The dataset this intent reads.
    #[must_use]
    pub const fn dataset(self) -> Dataset {
        match self {
            QueryIntent::UpcomingQuizzes => Dataset::UpcomingQuizzes,
            QueryIntent::HomeworkStatus
            | QueryIntent::Performance
            | QueryIntent::Attendance
            | QueryIntent::TopPerformers
            | QueryIntent::LowPerformers
            | QueryIntent::GenericList
            | QueryIntent::Unrecognized => Dataset::StudentRecords,
        }
    }
}

impl fmt::Display for QueryIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dataset {
    StudentRecords,
    UpcomingQuizzes,
}

impl Dataset {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Dataset::StudentRecords => "student_records",
            Dataset::UpcomingQuizzes => "upcoming_quizzes",
        }
    }

    /// Date column a time window applies to.
    #[must_use]
    pub const fn date_column(self) -> &'static str {
        match self {
            Dataset::StudentRecords => columns::QUIZ_DATE,
            Dataset::UpcomingQuizzes => columns::SCHEDULED_DATE,
        }
    }

    /// Every column a row of this dataset carries.
    #[must_use]
    pub const fn columns(self) -> &'static [&'static str] {
        match self {
            Dataset::StudentRecords => &columns::STUDENT_RECORDS,
            Dataset::UpcomingQuizzes => &columns::UPCOMING_QUIZZES,
        }
    }

    #[must_use]
    pub fn has_column(self, column: &str) -> bool {
        self.columns().contains(&column)
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for intent in QueryIntent::ALL {
            assert_eq!(QueryIntent::from_name(intent.as_str()), Some(intent));
        }
        assert_eq!(
            QueryIntent::from_name("top_performers"),
            Some(QueryIntent::TopPerformers)
        );
        assert_eq!(QueryIntent::from_name("unknown"), None);
    }

    #[test]
    fn serializes_screaming_case() {
        let json = serde_json::to_string(&QueryIntent::UpcomingQuizzes).unwrap();
        assert_eq!(json, "\"UPCOMING_QUIZZES\"");
    }

    #[test]
    fn only_upcoming_quizzes_reads_quiz_dataset() {
        for intent in QueryIntent::ALL {
            let expected = if intent == QueryIntent::UpcomingQuizzes {
                Dataset::UpcomingQuizzes
            } else {
                Dataset::StudentRecords
            };
            assert_eq!(intent.dataset(), expected, "{intent}");
        }
    }
}

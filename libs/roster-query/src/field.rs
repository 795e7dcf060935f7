use std::fmt;

use roster_security::Dimension;
use serde::{Deserialize, Serialize};

use crate::columns;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Int,
    DateRange,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Text => write!(f, "Text"),
            FieldKind::Int => write!(f, "Int"),
            FieldKind::DateRange => write!(f, "DateRange"),
        }
    }
}

/// Anything a query filter can target: the four scope dimensions plus the
/// value-bearing fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Region,
    Grade,
    ClassSection,
    Subject,
    QuizScore,
    AttendancePercentage,
    TimeWindow,
}

impl Field {
    pub const FIELDS: &'static [Field] = &[
        Field::Region,
        Field::Grade,
        Field::ClassSection,
        Field::Subject,
        Field::QuizScore,
        Field::AttendancePercentage,
        Field::TimeWindow,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Field::Region => columns::REGION,
            Field::Grade => columns::GRADE,
            Field::ClassSection => columns::CLASS_SECTION,
            Field::Subject => columns::SUBJECT,
            Field::QuizScore => columns::QUIZ_SCORE,
            Field::AttendancePercentage => columns::ATTENDANCE_PERCENTAGE,
            Field::TimeWindow => "time_window",
        }
    }

    #[must_use]
    pub const fn kind(self) -> FieldKind {
        match self {
            Field::Region | Field::ClassSection | Field::Subject => FieldKind::Text,
            Field::Grade | Field::QuizScore | Field::AttendancePercentage => FieldKind::Int,
            Field::TimeWindow => FieldKind::DateRange,
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::FIELDS
            .iter()
            .copied()
            .find(|f| f.name().eq_ignore_ascii_case(name))
    }

    /// The scope dimension behind this field, if it is one.
    #[must_use]
    pub const fn dimension(self) -> Option<Dimension> {
        match self {
            Field::Region => Some(Dimension::Region),
            Field::Grade => Some(Dimension::Grade),
            Field::ClassSection => Some(Dimension::ClassSection),
            Field::Subject => Some(Dimension::Subject),
            Field::QuizScore | Field::AttendancePercentage | Field::TimeWindow => None,
        }
    }

    /// Score-like fields compared against a numeric threshold.
    #[must_use]
    pub const fn is_metric(self) -> bool {
        matches!(self, Field::QuizScore | Field::AttendancePercentage)
    }
}

impl From<Dimension> for Field {
    fn from(d: Dimension) -> Self {
        match d {
            Dimension::Region => Field::Region,
            Dimension::Grade => Field::Grade,
            Dimension::ClassSection => Field::ClassSection,
            Dimension::Subject => Field::Subject,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

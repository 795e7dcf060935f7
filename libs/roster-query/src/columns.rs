//! Column names of the two datasets.

// student_records
pub const STUDENT_ID: &str = "student_id";
pub const STUDENT_NAME: &str = "student_name";
pub const GRADE: &str = "grade";
pub const CLASS_SECTION: &str = "class_section";
pub const REGION: &str = "region";
pub const SUBJECT: &str = "subject";
pub const HOMEWORK_ASSIGNMENT: &str = "homework_assignment";
pub const HOMEWORK_SUBMITTED: &str = "homework_submitted";
pub const SUBMISSION_DATE: &str = "submission_date";
pub const QUIZ_TOPIC: &str = "quiz_topic";
pub const QUIZ_SCORE: &str = "quiz_score";
pub const QUIZ_DATE: &str = "quiz_date";
pub const ATTENDANCE_PERCENTAGE: &str = "attendance_percentage";

// upcoming_quizzes
pub const QUIZ_ID: &str = "quiz_id";
pub const TOPIC: &str = "topic";
pub const SCHEDULED_DATE: &str = "scheduled_date";
pub const DURATION_MINUTES: &str = "duration_minutes";
pub const TOTAL_MARKS: &str = "total_marks";

pub const STUDENT_RECORDS: [&str; 13] = [
    STUDENT_ID,
    STUDENT_NAME,
    GRADE,
    CLASS_SECTION,
    REGION,
    SUBJECT,
    HOMEWORK_ASSIGNMENT,
    HOMEWORK_SUBMITTED,
    SUBMISSION_DATE,
    QUIZ_TOPIC,
    QUIZ_SCORE,
    QUIZ_DATE,
    ATTENDANCE_PERCENTAGE,
];

pub const UPCOMING_QUIZZES: [&str; 9] = [
    QUIZ_ID,
    SUBJECT,
    TOPIC,
    SCHEDULED_DATE,
    GRADE,
    CLASS_SECTION,
    REGION,
    DURATION_MINUTES,
    TOTAL_MARKS,
];

/// Columns only identities with `can_view_sensitive` may see.
pub const SENSITIVE: [&str; 2] = [QUIZ_SCORE, ATTENDANCE_PERCENTAGE];

#[inline]
#[must_use]
pub fn is_sensitive(column: &str) -> bool {
    SENSITIVE.contains(&column)
}

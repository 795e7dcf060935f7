//! Resolver tables: lexicon, intent patterns and extraction vocabularies.
//!
//! Every table has a built-in default, so an empty configuration section
//! yields a working English/Hindi-English resolver.

use std::collections::BTreeMap;

use roster_query::QueryIntent;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolverConfig {
    /// Transliteration pre-pass: phrase (one or more tokens) to English.
    pub lexicon: BTreeMap<String, String>,

    /// Ordered intent table. The first entry with a matching pattern wins.
    pub intents: Vec<IntentPatterns>,

    /// Closed region list, in canonical spelling.
    pub regions: Vec<String>,

    /// Closed subject list with aliases.
    pub subjects: Vec<SubjectConfig>,

    /// Class section letters, in canonical spelling.
    pub class_sections: Vec<String>,

    pub grades: GradeConfig,

    pub comparisons: ComparisonConfig,

    pub metrics: MetricConfig,

    pub time_windows: Vec<TimeWindowConfig>,

    /// Example queries offered to operators.
    pub suggestions: Vec<String>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            lexicon: default_lexicon(),
            intents: default_intents(),
            regions: to_strings(&["North", "South", "East", "West", "Central"]),
            subjects: default_subjects(),
            class_sections: to_strings(&["A", "B", "C", "D"]),
            grades: GradeConfig::default(),
            comparisons: ComparisonConfig::default(),
            metrics: MetricConfig::default(),
            time_windows: default_time_windows(),
            suggestions: default_suggestions(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IntentPatterns {
    pub intent: QueryIntent,
    /// Regular expressions over the interpreted (normalized, transliterated) text.
    pub patterns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubjectConfig {
    pub name: String,
    /// Lower-case spellings that refer to this subject, single or multi-word.
    #[serde(default)]
    pub aliases: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GradeConfig {
    /// Words a grade numeral follows (`grade 8`) or precedes (`8th grade`).
    pub keywords: Vec<String>,
    pub min: i64,
    pub max: i64,
}

impl Default for GradeConfig {
    fn default() -> Self {
        Self {
            keywords: to_strings(&["grade", "grades", "class", "classes", "std", "standard"]),
            min: 1,
            max: 12,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ComparisonConfig {
    pub less_than: Vec<String>,
    pub greater_than: Vec<String>,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            less_than: to_strings(&[
                "less than",
                "lower than",
                "fewer than",
                "below",
                "under",
                "lower",
            ]),
            greater_than: to_strings(&[
                "more than",
                "greater than",
                "higher than",
                "above",
                "over",
                "higher",
            ]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MetricConfig {
    /// Tokens that attribute a nearby threshold to `quiz_score`.
    pub quiz_score: Vec<String>,
    /// Tokens that attribute a nearby threshold to `attendance_percentage`.
    pub attendance_percentage: Vec<String>,
    /// How many tokens away from a comparison a keyword may sit.
    pub window: usize,
}

impl Default for MetricConfig {
    fn default() -> Self {
        Self {
            quiz_score: to_strings(&["score", "scores", "scored", "quiz", "quizzes", "result"]),
            attendance_percentage: to_strings(&["attendance", "present"]),
            window: 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TimeWindowConfig {
    pub phrase: String,
    pub window: RelativeWindow,
}

/// A date range relative to the reference day of a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RelativeWindow {
    /// `days` days back up to and including the reference day.
    LastDays { days: u32 },
    /// From the reference day up to `days` days ahead.
    NextDays { days: u32 },
    /// Monday through Sunday of the reference day's week.
    ThisWeek,
    Today,
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}

fn default_lexicon() -> BTreeMap<String, String> {
    [
        ("kaunse", "which"),
        ("kaun", "who"),
        ("kitne", "how many"),
        ("kya", "what"),
        ("bachche", "students"),
        ("bacche", "students"),
        ("vidyarthi", "students"),
        ("ghar ka kaam", "homework"),
        ("test", "quiz"),
        ("tests", "quiz"),
        ("pariksha", "quiz"),
        ("jama", "submitted"),
        ("diya", "submitted"),
        ("nahi", "not"),
        ("nahin", "not"),
        ("havent", "have not"),
        ("hasnt", "has not"),
        ("didnt", "did not"),
        ("dont", "do not"),
        ("kiya", "done"),
        ("hai", "is"),
        ("hain", "are"),
        ("kaksha", "class"),
        ("pichhla", "last"),
        ("pichhle", "last"),
        ("pichhe", "last"),
        ("agla", "next"),
        ("agle", "next"),
        ("is hafta", "this week"),
        ("is hafte", "this week"),
        ("hafta", "week"),
        ("hafte", "week"),
        ("mahina", "month"),
        ("mahine", "month"),
        ("aaj", "today"),
        ("pradarshan", "performance"),
        ("marks", "score"),
        ("ank", "score"),
        ("upasthiti", "attendance"),
        ("hazri", "attendance"),
        ("dikhao", "show"),
        ("dekho", "show"),
        ("batao", "tell"),
        ("suchi", "list"),
        ("aane wale", "upcoming"),
        ("aane wali", "upcoming"),
        ("sabse acche", "best"),
        ("sabse zyada", "highest"),
        ("sabse kam", "lowest"),
        ("sabse", "top"),
        ("acche", "good"),
        ("se kam", "less than"),
        ("se zyada", "more than"),
        ("se adhik", "more than"),
        ("zyada", "higher"),
        ("adhik", "higher"),
        ("kam", "lower"),
        ("kharab", "poor"),
        ("mushkil", "struggling"),
        ("sabhi", "all"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_owned(), v.to_owned()))
    .collect()
}

fn intent(intent: QueryIntent, patterns: &[&str]) -> IntentPatterns {
    IntentPatterns {
        intent,
        patterns: to_strings(patterns),
    }
}

fn default_intents() -> Vec<IntentPatterns> {
    vec![
        intent(
            QueryIntent::HomeworkStatus,
            &[
                r"\bhomework\b.*\b(not|never)\b.*\bsubmit",
                r"\bhomework\b.*\bsubmit\w*\b.*\bnot\b",
                r"\bnot\b.*\bsubmit\w*\b.*\bhomework\b",
                r"\b(pending|missing|incomplete|unsubmitted|overdue)\b.*\bhomework\b",
                r"\bhomework\b.*\b(pending|missing|status|submissions?)\b",
            ],
        ),
        intent(
            QueryIntent::UpcomingQuizzes,
            &[
                r"\b(upcoming|next|scheduled|future)\b.*\bquiz",
                r"\bquiz\w*\b.*\b(upcoming|scheduled|coming up)\b",
            ],
        ),
        intent(
            QueryIntent::Attendance,
            &[r"\b(attendance|absent|absentees|absence)\b"],
        ),
        intent(
            QueryIntent::TopPerformers,
            &[
                r"\b(top|best|highest)\b.*\b(students|performers?|performing|performance|scores?|scorers?)\b",
                r"\b(toppers?|rankers?)\b",
            ],
        ),
        intent(
            QueryIntent::LowPerformers,
            &[
                r"\b(low|lower|poor|worst|lowest|weak|weakest|struggling)\b.*\b(students|performers?|performing|performance|scores?|scorers?)\b",
                r"\bfailing\b",
            ],
        ),
        intent(
            QueryIntent::Performance,
            &[
                r"\bperformance\b",
                r"\bquiz\w*\b.*\b(scores?|scored|results?)\b",
                r"\b(scores?|scored|results?)\b.*\bquiz",
                r"\b(scores?|scored|results?)\b",
            ],
        ),
        intent(
            QueryIntent::GenericList,
            &[
                r"\b(list|show|display|all|students|who|which)\b",
                r"\b(grade|class|section|region)\b",
            ],
        ),
    ]
}

fn subject(name: &str, aliases: &[&str]) -> SubjectConfig {
    SubjectConfig {
        name: name.to_owned(),
        aliases: to_strings(aliases),
    }
}

fn default_subjects() -> Vec<SubjectConfig> {
    vec![
        subject("Mathematics", &["mathematics", "maths", "math", "ganit"]),
        subject("Science", &["science", "vigyan"]),
        subject("English", &["english"]),
        subject("Hindi", &["hindi"]),
        subject(
            "Social Studies",
            &["social studies", "social science", "sst"],
        ),
    ]
}

fn window(phrase: &str, window: RelativeWindow) -> TimeWindowConfig {
    TimeWindowConfig {
        phrase: phrase.to_owned(),
        window,
    }
}

fn default_time_windows() -> Vec<TimeWindowConfig> {
    vec![
        window("last week", RelativeWindow::LastDays { days: 7 }),
        window("past week", RelativeWindow::LastDays { days: 7 }),
        window("this week", RelativeWindow::ThisWeek),
        window("current week", RelativeWindow::ThisWeek),
        window("last month", RelativeWindow::LastDays { days: 30 }),
        window("next week", RelativeWindow::NextDays { days: 7 }),
        window("today", RelativeWindow::Today),
    ]
}

fn default_suggestions() -> Vec<String> {
    to_strings(&[
        "Which students haven't submitted their homework?",
        "Kaunse students ne homework submit nahi kiya?",
        "Show me Grade 8 performance data",
        "Grade 8 ki performance data dikhao",
        "List all upcoming quizzes",
        "Aane wale quiz ki list dikhao",
        "Who are the top performing students?",
        "Sabse acche students kaun hain?",
        "Show last week performance data",
        "Pichhle week ki performance dikhao",
        "Which students scored less than 60 in quiz?",
        "Quiz mein 60 se kam marks wale students",
        "Show me all students in Grade 9 Class A",
        "Grade 9 Class A ke sabhi students",
        "List students from North region",
        "North region ke students ki list",
    ])
}

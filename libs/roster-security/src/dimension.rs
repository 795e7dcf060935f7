use std::fmt;

use serde::{Deserialize, Serialize};

/// Attribute of a student record that an access scope can constrain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Region,
    Grade,
    ClassSection,
    Subject,
}

impl Dimension {
    pub const ALL: [Dimension; 4] = [
        Dimension::Region,
        Dimension::Grade,
        Dimension::ClassSection,
        Dimension::Subject,
    ];

    /// Column name carrying this dimension in every dataset.
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Dimension::Region => "region",
            Dimension::Grade => "grade",
            Dimension::ClassSection => "class_section",
            Dimension::Subject => "subject",
        }
    }

    #[must_use]
    pub fn from_column(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.column() == name)
    }

    /// Whether values of this dimension are integers rather than text.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Dimension::Grade)
    }

    /// Whether `value` has the representation this dimension stores.
    #[must_use]
    pub fn accepts(self, value: &ScopeValue) -> bool {
        match value {
            ScopeValue::Int(_) => self.is_numeric(),
            ScopeValue::Text(_) => !self.is_numeric(),
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// A scalar value a scope or a filter can hold for a dimension.
///
/// Grades are integers; regions, class sections and subjects are text in
/// their canonical spelling (`"North"`, `"A"`, `"Mathematics"`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScopeValue {
    Int(i64),
    Text(String),
}

impl ScopeValue {
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ScopeValue::Int(v) => Some(*v),
            ScopeValue::Text(_) => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ScopeValue::Text(v) => Some(v),
            ScopeValue::Int(_) => None,
        }
    }
}

impl fmt::Display for ScopeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScopeValue::Int(v) => write!(f, "{v}"),
            ScopeValue::Text(v) => f.write_str(v),
        }
    }
}

impl From<i64> for ScopeValue {
    fn from(v: i64) -> Self {
        ScopeValue::Int(v)
    }
}

impl From<i32> for ScopeValue {
    fn from(v: i32) -> Self {
        ScopeValue::Int(i64::from(v))
    }
}

impl From<&str> for ScopeValue {
    fn from(v: &str) -> Self {
        ScopeValue::Text(v.to_owned())
    }
}

impl From<String> for ScopeValue {
    fn from(v: String) -> Self {
        ScopeValue::Text(v)
    }
}

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dimension::Dimension;

/// Administrative access level of an identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessLevel {
    /// Unrestricted access to every record.
    Super,
    Region,
    Grade,
    Class,
    Subject,
    /// Two or more dimension constraints, all of which must hold.
    Combined,
}

impl AccessLevel {
    /// The single dimension a one-dimension level constrains.
    ///
    /// Returns `None` for `Super` and `Combined`.
    #[must_use]
    pub const fn dimension(self) -> Option<Dimension> {
        match self {
            AccessLevel::Region => Some(Dimension::Region),
            AccessLevel::Grade => Some(Dimension::Grade),
            AccessLevel::Class => Some(Dimension::ClassSection),
            AccessLevel::Subject => Some(Dimension::Subject),
            AccessLevel::Super | AccessLevel::Combined => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            AccessLevel::Super => "super",
            AccessLevel::Region => "region",
            AccessLevel::Grade => "grade",
            AccessLevel::Class => "class",
            AccessLevel::Subject => "subject",
            AccessLevel::Combined => "combined",
        }
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

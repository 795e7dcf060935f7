//! Row values exchanged between data accessors and the result shaper.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use roster_security::ScopeValue;
use serde::{Deserialize, Serialize};

/// A single cell.
///
/// Deserialization is untagged: `null`, booleans, integers, `YYYY-MM-DD`
/// strings and other strings map to the respective variant, in that order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Bool(bool),
    Int(i64),
    Date(NaiveDate),
    Text(String),
}

impl CellValue {
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v),
            _ => None,
        }
    }

    /// The cell as a scope value, for dimension membership checks.
    #[must_use]
    pub fn to_scope_value(&self) -> Option<ScopeValue> {
        match self {
            Self::Int(v) => Some(ScopeValue::Int(*v)),
            Self::Text(v) => Some(ScopeValue::Text(v.clone())),
            Self::Null | Self::Bool(_) | Self::Date(_) => None,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Bool(_) => 1,
            Self::Int(_) => 2,
            Self::Date(_) => 3,
            Self::Text(_) => 4,
        }
    }
}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Nulls sort first; values of different kinds order by kind.
impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Int(a), Self::Int(b)) => a.cmp(b),
            (Self::Date(a), Self::Date(b)) => a.cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("-"),
            Self::Bool(true) => f.write_str("yes"),
            Self::Bool(false) => f.write_str("no"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Date(v) => write!(f, "{v}"),
            Self::Text(v) => f.write_str(v),
        }
    }
}

impl From<i64> for CellValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for CellValue {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<bool> for CellValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(v: NaiveDate) -> Self {
        Self::Date(v)
    }
}

impl From<&str> for CellValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

impl From<String> for CellValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

/// One record, keyed by column name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(BTreeMap<String, CellValue>);

impl Row {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, column: &str, value: impl Into<CellValue>) -> Self {
        self.0.insert(column.to_owned(), value.into());
        self
    }

    pub fn insert(&mut self, column: &str, value: impl Into<CellValue>) {
        self.0.insert(column.to_owned(), value.into());
    }

    #[must_use]
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.0.get(column)
    }

    #[must_use]
    pub fn contains(&self, column: &str) -> bool {
        self.0.contains_key(column)
    }

    /// Keep only `columns`, in place.
    pub fn retain_columns(&mut self, columns: &[&str]) {
        self.0.retain(|k, _| columns.contains(&k.as_str()));
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> FromIterator<(&'a str, CellValue)> for Row {
    fn from_iter<I: IntoIterator<Item = (&'a str, CellValue)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.to_owned(), v)).collect())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn cells_deserialize_by_shape() {
        let row: Row = serde_json::from_str(
            r#"{"a": null, "b": true, "c": 72, "d": "2026-10-12", "e": "North"}"#,
        )
        .unwrap();
        assert_eq!(row.get("a"), Some(&CellValue::Null));
        assert_eq!(row.get("b"), Some(&CellValue::Bool(true)));
        assert_eq!(row.get("c"), Some(&CellValue::Int(72)));
        assert_eq!(
            row.get("d").and_then(CellValue::as_date),
            NaiveDate::from_ymd_opt(2026, 10, 12)
        );
        assert_eq!(row.get("e").and_then(CellValue::as_text), Some("North"));
    }

    #[test]
    fn nulls_sort_first() {
        let mut cells = vec![CellValue::Int(5), CellValue::Null, CellValue::Int(1)];
        cells.sort();
        assert_eq!(cells, [CellValue::Null, CellValue::Int(1), CellValue::Int(5)]);
    }

    #[test]
    fn retain_columns_drops_the_rest() {
        let mut row = Row::new().with("a", 1).with("b", "x").with("c", false);
        row.retain_columns(&["a", "c"]);
        assert_eq!(row.columns().collect::<Vec<_>>(), ["a", "c"]);
    }

    #[test]
    fn option_maps_to_null() {
        assert!(CellValue::from(None::<i64>).is_null());
        assert_eq!(CellValue::from(Some(3)), CellValue::Int(3));
    }
}

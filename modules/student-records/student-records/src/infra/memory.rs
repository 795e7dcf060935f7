//! In-memory data accessor over a read-only snapshot.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use roster_query::{Dataset, EffectiveFilterSet};
use serde::Deserialize;
use student_records_sdk::{AccessorError, DataAccessor, Row, matching};

use crate::error::SnapshotError;

/// Both datasets, as loaded from a JSON document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Snapshot {
    #[serde(default)]
    pub student_records: Vec<Row>,
    #[serde(default)]
    pub upcoming_quizzes: Vec<Row>,
}

impl Snapshot {
    /// # Errors
    /// Returns [`SnapshotError::Parse`] if `json` is not a snapshot document.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    /// # Errors
    /// Returns [`SnapshotError`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let json = std::fs::read_to_string(path).map_err(|source| SnapshotError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let snapshot = Self::from_json(&json)?;
        tracing::debug!(
            path = %path.display(),
            student_records = snapshot.student_records.len(),
            upcoming_quizzes = snapshot.upcoming_quizzes.len(),
            "loaded data snapshot"
        );
        Ok(snapshot)
    }

    #[must_use]
    pub fn rows(&self, dataset: Dataset) -> &[Row] {
        match dataset {
            Dataset::StudentRecords => &self.student_records,
            Dataset::UpcomingQuizzes => &self.upcoming_quizzes,
        }
    }
}

/// [`DataAccessor`] evaluating filter sets against a [`Snapshot`].
///
/// Can be switched offline to exercise the `DATA_UNAVAILABLE` path.
pub struct InMemoryAccessor {
    snapshot: Snapshot,
    available: AtomicBool,
}

impl InMemoryAccessor {
    #[must_use]
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            snapshot,
            available: AtomicBool::new(true),
        }
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::Release);
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        self.available.load(Ordering::Acquire)
    }
}

#[async_trait]
impl DataAccessor for InMemoryAccessor {
    async fn fetch(&self, filters: &EffectiveFilterSet) -> Result<Vec<Row>, AccessorError> {
        if !self.is_available() {
            return Err(AccessorError::DataUnavailable(
                "in-memory snapshot is offline".to_owned(),
            ));
        }
        let rows = matching::select(filters, self.snapshot.rows(filters.dataset()))?;
        tracing::debug!(
            dataset = %filters.dataset(),
            rows = rows.len(),
            "in-memory fetch"
        );
        Ok(rows)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use roster_query::{QueryIntent, compose};
    use roster_security::{Capabilities, ScopePredicate};
    use std::io::Write;

    const DOC: &str = r#"{
        "student_records": [
            {"student_id": "S001", "student_name": "Aarav", "grade": 8, "class_section": "A",
             "region": "North", "subject": "Science", "attendance_percentage": 91}
        ],
        "upcoming_quizzes": []
    }"#;

    fn listing() -> EffectiveFilterSet {
        compose(
            &ScopePredicate::unrestricted(),
            &[],
            QueryIntent::GenericList,
            Capabilities::default(),
        )
    }

    #[tokio::test]
    async fn fetches_from_loaded_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(DOC.as_bytes()).unwrap();

        let accessor = InMemoryAccessor::new(Snapshot::load(file.path()).unwrap());
        let rows = accessor.fetch(&listing()).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("student_name").unwrap().as_text(), Some("Aarav"));
    }

    #[tokio::test]
    async fn offline_accessor_is_unavailable() {
        let accessor = InMemoryAccessor::new(Snapshot::from_json(DOC).unwrap());
        accessor.set_available(false);
        assert!(matches!(
            accessor.fetch(&listing()).await,
            Err(AccessorError::DataUnavailable(_))
        ));
        accessor.set_available(true);
        assert!(accessor.fetch(&listing()).await.is_ok());
    }

    #[tokio::test]
    async fn missing_column_is_schema_mismatch() {
        let doc = r#"{"student_records": [{"student_id": "S001"}]}"#;
        let accessor = InMemoryAccessor::new(Snapshot::from_json(doc).unwrap());
        assert!(matches!(
            accessor.fetch(&listing()).await,
            Err(AccessorError::SchemaMismatch(_))
        ));
    }

    #[test]
    fn missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Snapshot::load(&dir.path().join("absent.json")),
            Err(SnapshotError::Read { .. })
        ));
    }
}

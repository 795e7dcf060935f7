//! In-process client for the student records module.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use roster_query::EffectiveFilterSet;
use roster_security::Identity;
use student_records_sdk::{QueryError, Response, StudentRecordsClient};

use super::{DomainError, Service};

/// Local client wrapping the records service.
pub struct StudentRecordsLocalClient {
    svc: Arc<Service>,
}

impl StudentRecordsLocalClient {
    #[must_use]
    pub fn new(svc: Arc<Service>) -> Self {
        Self { svc }
    }
}

fn log_and_convert(op: &str, e: DomainError) -> QueryError {
    tracing::error!(operation = op, error = %e, "student-records call failed");
    e.into()
}

#[async_trait]
impl StudentRecordsClient for StudentRecordsLocalClient {
    async fn query(
        &self,
        identity: &Identity,
        text: &str,
        now: DateTime<Utc>,
    ) -> Result<Response, QueryError> {
        self.svc
            .query(identity, text, now)
            .await
            .map_err(|e| log_and_convert("query", e))
    }

    async fn retry(
        &self,
        identity: &Identity,
        filters: &EffectiveFilterSet,
        now: DateTime<Utc>,
    ) -> Result<Response, QueryError> {
        self.svc
            .retry(identity, filters, now)
            .await
            .map_err(|e| log_and_convert("retry", e))
    }

    fn suggestions(&self, partial: &str) -> Vec<String> {
        self.svc.suggestions(partial)
    }
}

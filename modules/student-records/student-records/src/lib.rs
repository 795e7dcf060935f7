#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Student records module.
//!
//! Answers natural-language questions about student records for an
//! authenticated administrator. Each query is resolved to an intent and
//! filters, intersected with the administrator's scope, fetched through a
//! [`DataAccessor`](student_records_sdk::DataAccessor) and shaped into a
//! [`Response`](student_records_sdk::Response).
//!
//! Consumers use the [`StudentRecordsClient`](student_records_sdk::StudentRecordsClient)
//! and [`IdentityProvider`](student_records_sdk::IdentityProvider) handed out
//! by [`StudentRecordsModule`].

pub mod config;
pub mod domain;
pub mod error;
pub mod infra;
pub mod module;

pub use config::{IdentityConfig, ShaperConfig, StudentRecordsConfig};
pub use error::{ConfigError, SnapshotError};
pub use infra::{InMemoryAccessor, Snapshot, StaticIdentityProvider};
pub use module::StudentRecordsModule;

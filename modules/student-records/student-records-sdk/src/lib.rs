#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Student records SDK
//!
//! Contracts shared by the student records module, its data accessors and
//! identity providers:
//!
//! - [`StudentRecordsClient`]: the query API consumers call
//! - [`DataAccessor`]: the data boundary, fed an [`EffectiveFilterSet`]
//! - [`IdentityProvider`]: credentials to [`Identity`]
//!
//! [`matching`] holds the reference filter evaluation every accessor must
//! agree with.
//!
//! ## Example
//!
//! ```ignore
//! use student_records_sdk::{IdentityProvider, StudentRecordsClient};
//!
//! let identity = provider.authenticate("principal_north", "north123").await?;
//! let response = client.query(&identity, "Show students with attendance less than 80%", now).await?;
//! println!("{} rows", response.summary.rows);
//! ```
//!
//! [`EffectiveFilterSet`]: roster_query::EffectiveFilterSet
//! [`Identity`]: roster_security::Identity

pub mod accessor;
pub mod api;
pub mod error;
pub mod identity_provider;
pub mod matching;
pub mod response;
pub mod row;

pub use accessor::DataAccessor;
pub use api::StudentRecordsClient;
pub use error::{AccessorError, AuthError, QueryError};
pub use identity_provider::IdentityProvider;
pub use response::{Response, ResultStatus, ResultSummary, ScoreStats};
pub use row::{CellValue, Row};

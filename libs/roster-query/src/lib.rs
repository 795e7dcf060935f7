#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Query vocabulary shared by the resolver, the composer and data accessors.
//!
//! The resolver produces a [`QueryIntent`] and untrusted [`QueryFilter`]s;
//! [`compose`] merges them with the caller's scope into the authoritative
//! [`EffectiveFilterSet`].
pub mod columns;
pub mod compose;
pub mod effective;
pub mod error;
pub mod field;
pub mod filter;
pub mod intent;
pub mod projection;

pub use compose::compose;
pub use effective::{EffectiveFilterSet, Outcome};
pub use error::{FilterError, FilterResult};
pub use field::{Field, FieldKind};
pub use filter::{DateRange, FilterOp, FilterValue, QueryFilter};
pub use intent::{Dataset, QueryIntent};
pub use projection::Projection;

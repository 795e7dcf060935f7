#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Access model for roster queries.
//!
//! An [`Identity`] is an administrator with one [`AccessLevel`], per-dimension
//! allowed values and capability flags. [`derive_scope`] turns it into a
//! [`ScopePredicate`], the only thing the rest of the system consults to
//! decide which records are visible.
//!
//! ```
//! use roster_security::{AccessLevel, Dimension, Identity, derive_scope};
//!
//! let identity = Identity::builder("east67_admin", AccessLevel::Combined)
//!     .allow(Dimension::Region, ["East"])
//!     .allow(Dimension::Grade, [6, 7])
//!     .can_export(true)
//!     .build()?;
//!
//! let scope = derive_scope(&identity);
//! assert!(scope.permits(Dimension::Grade, &7.into()));
//! assert!(!scope.permits(Dimension::Grade, &8.into()));
//! # Ok::<(), roster_security::IdentityError>(())
//! ```
pub mod access_level;
pub mod dimension;
pub mod error;
pub mod identity;
pub mod policy;
pub mod scope;

pub use access_level::AccessLevel;
pub use dimension::{Dimension, ScopeValue};
pub use error::IdentityError;
pub use identity::{Capabilities, Identity, IdentityBuilder};
pub use policy::{can_export, can_view_sensitive, derive_scope};
pub use scope::ScopePredicate;

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Query intent resolution.
//!
//! Free-form English or Hindi-English text goes through normalization, a
//! transliteration pre-pass, an ordered intent pattern table and a separate
//! filter extraction pass. All tables come from [`ResolverConfig`].
//!
//! ```
//! use query_resolver::{QueryResolver, ResolverConfig};
//! use roster_query::QueryIntent;
//!
//! let resolver = QueryResolver::new(&ResolverConfig::default())?;
//! let resolution = resolver.resolve("Grade 8 ki performance dikhao");
//! assert_eq!(resolution.intent, QueryIntent::Performance);
//! assert_eq!(resolution.filters[0].to_string(), "grade EQUALS 8");
//! # Ok::<(), query_resolver::ResolverError>(())
//! ```
pub mod config;
pub mod domain;
pub mod error;
pub mod resolver;

pub use config::{RelativeWindow, ResolverConfig};
pub use error::ResolverError;
pub use resolver::{QueryResolver, Resolution};

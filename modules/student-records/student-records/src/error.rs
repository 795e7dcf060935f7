//! Errors raised while building the module from configuration.

use std::path::PathBuf;

use query_resolver::ResolverError;
use roster_security::IdentityError;
use thiserror::Error;

/// Configuration could not be turned into a working module.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Resolver(#[from] ResolverError),

    /// An identity's scope does not fit its access level.
    #[error("identity '{username}' is malformed: {source}")]
    Identity {
        username: String,
        #[source]
        source: IdentityError,
    },

    #[error("identity '{username}' has an invalid password digest")]
    CredentialDigest { username: String },

    #[error("identity '{0}' is configured more than once")]
    DuplicateIdentity(String),

    #[error("shaper.top_limit must be greater than zero")]
    ZeroTopLimit,
}

/// A data snapshot could not be loaded.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to read snapshot {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid snapshot document: {0}")]
    Parse(#[from] serde_json::Error),
}

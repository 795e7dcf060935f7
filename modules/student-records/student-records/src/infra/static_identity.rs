//! Identity provider backed by the configured account table.

use std::collections::HashMap;

use async_trait::async_trait;
use roster_security::Identity;
use sha2::{Digest, Sha256};
use student_records_sdk::{AuthError, IdentityProvider};

use crate::config::IdentityConfig;
use crate::error::ConfigError;

struct Account {
    digest: [u8; 32],
    active: bool,
    identity: Identity,
}

/// Authenticates against a fixed set of accounts.
///
/// Every account's identity is built and validated when the provider is
/// created; a malformed account fails construction.
pub struct StaticIdentityProvider {
    accounts: HashMap<String, Account>,
    order: Vec<String>,
}

impl std::fmt::Debug for StaticIdentityProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticIdentityProvider")
            .field("accounts", &self.order)
            .finish_non_exhaustive()
    }
}

impl StaticIdentityProvider {
    /// # Errors
    /// Returns [`ConfigError`] if an account is duplicated, has a malformed
    /// scope for its access level, or its digest is not 64 hex characters.
    pub fn from_config(accounts: &[IdentityConfig]) -> Result<Self, ConfigError> {
        let mut by_name = HashMap::with_capacity(accounts.len());
        let mut order = Vec::with_capacity(accounts.len());

        for cfg in accounts {
            let account = Account {
                digest: parse_digest(cfg)?,
                active: cfg.active,
                identity: build_identity(cfg)?,
            };
            if by_name.insert(cfg.username.clone(), account).is_some() {
                return Err(ConfigError::DuplicateIdentity(cfg.username.clone()));
            }
            order.push(cfg.username.clone());
        }

        tracing::debug!(accounts = order.len(), "loaded static identities");
        Ok(Self {
            accounts: by_name,
            order,
        })
    }
}

fn parse_digest(cfg: &IdentityConfig) -> Result<[u8; 32], ConfigError> {
    let mut digest = [0u8; 32];
    hex::decode_to_slice(cfg.password_sha256.trim(), &mut digest).map_err(|_| {
        ConfigError::CredentialDigest {
            username: cfg.username.clone(),
        }
    })?;
    Ok(digest)
}

fn build_identity(cfg: &IdentityConfig) -> Result<Identity, ConfigError> {
    let display_name = if cfg.display_name.is_empty() {
        cfg.username.as_str()
    } else {
        cfg.display_name.as_str()
    };
    let mut builder = Identity::builder(cfg.username.as_str(), cfg.access_level)
        .display_name(display_name)
        .can_view_sensitive(cfg.can_view_sensitive)
        .can_export(cfg.can_export);
    for (dimension, values) in &cfg.scope {
        builder = builder.allow(*dimension, values.iter().cloned());
    }
    builder.build().map_err(|source| ConfigError::Identity {
        username: cfg.username.clone(),
        source,
    })
}

#[async_trait]
impl IdentityProvider for StaticIdentityProvider {
    async fn authenticate(&self, username: &str, credential: &str) -> Result<Identity, AuthError> {
        let Some(account) = self.accounts.get(username) else {
            tracing::debug!(username, "unknown user");
            return Err(AuthError::AuthFailed);
        };
        let offered = Sha256::digest(credential.as_bytes());
        if !account.active || offered.as_slice() != account.digest.as_slice() {
            tracing::debug!(username, active = account.active, "authentication rejected");
            return Err(AuthError::AuthFailed);
        }
        Ok(account.identity.clone())
    }

    async fn identities(&self) -> Vec<Identity> {
        self.order
            .iter()
            .filter_map(|name| self.accounts.get(name))
            .filter(|account| account.active)
            .map(|account| account.identity.clone())
            .collect()
    }
}

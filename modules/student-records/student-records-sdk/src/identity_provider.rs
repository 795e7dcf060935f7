//! Caller authentication contract.

use async_trait::async_trait;
use roster_security::Identity;

use crate::error::AuthError;

/// Maps credentials to an [`Identity`].
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// # Errors
    /// Returns [`AuthError::AuthFailed`] for an unknown user, an inactive user
    /// or a wrong credential.
    async fn authenticate(&self, username: &str, credential: &str) -> Result<Identity, AuthError>;

    /// Every active identity the provider knows, for operator inspection.
    async fn identities(&self) -> Vec<Identity>;
}

//! Wiring of the student records module.

use std::sync::Arc;

use query_resolver::QueryResolver;
use student_records_sdk::{DataAccessor, IdentityProvider, StudentRecordsClient};

use crate::config::StudentRecordsConfig;
use crate::domain::{ResultShaper, Service, StudentRecordsLocalClient};
use crate::error::ConfigError;
use crate::infra::StaticIdentityProvider;

/// The assembled module: a query client and the identity provider its
/// callers authenticate against.
pub struct StudentRecordsModule {
    client: Arc<StudentRecordsLocalClient>,
    identities: Arc<StaticIdentityProvider>,
}

impl StudentRecordsModule {
    /// Build every component from `config`, reading data through `accessor`.
    ///
    /// # Errors
    /// Returns [`ConfigError`] if a resolver table does not compile, an
    /// identity is malformed, or the shaper settings are invalid.
    pub fn init(
        config: &StudentRecordsConfig,
        accessor: Arc<dyn DataAccessor>,
    ) -> Result<Self, ConfigError> {
        if config.shaper.top_limit == 0 {
            return Err(ConfigError::ZeroTopLimit);
        }
        let resolver = QueryResolver::new(&config.resolver)?;
        let identities = StaticIdentityProvider::from_config(&config.identities)?;
        let shaper = ResultShaper::new(accessor, config.shaper.clone());
        let svc = Arc::new(Service::new(resolver, shaper));

        tracing::info!(
            identities = config.identities.len(),
            intents = config.resolver.intents.len(),
            "student records module initialized"
        );
        Ok(Self {
            client: Arc::new(StudentRecordsLocalClient::new(svc)),
            identities: Arc::new(identities),
        })
    }

    #[must_use]
    pub fn client(&self) -> Arc<dyn StudentRecordsClient> {
        self.client.clone()
    }

    #[must_use]
    pub fn identity_provider(&self) -> Arc<dyn IdentityProvider> {
        self.identities.clone()
    }
}

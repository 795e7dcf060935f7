use chrono::{DateTime, Utc};
use query_resolver::QueryResolver;
use roster_query::{EffectiveFilterSet, compose};
use roster_security::{Identity, derive_scope};
use student_records_sdk::Response;
use tracing::{debug, instrument};

use super::error::DomainError;
use super::shaper::ResultShaper;

/// Query pipeline: scope derivation, intent resolution, composition and
/// shaping.
pub struct Service {
    resolver: QueryResolver,
    shaper: ResultShaper,
}

impl Service {
    #[must_use]
    pub fn new(resolver: QueryResolver, shaper: ResultShaper) -> Self {
        Self { resolver, shaper }
    }

    /// Answer `text` for `identity`.
    ///
    /// # Errors
    /// Returns [`DomainError::Accessor`] if the data accessor fails.
    #[instrument(skip(self, identity, text), fields(identity = %identity.id(), level = %identity.access_level()))]
    pub async fn query(
        &self,
        identity: &Identity,
        text: &str,
        now: DateTime<Utc>,
    ) -> Result<Response, DomainError> {
        let scope = derive_scope(identity);
        let resolution = self.resolver.resolve_on(text, now.date_naive());
        debug!(
            intent = %resolution.intent,
            interpreted = %resolution.interpreted,
            filters = resolution.filters.len(),
            "query resolved"
        );

        let filters = compose(
            &scope,
            &resolution.filters,
            resolution.intent,
            identity.capabilities(),
        );
        self.shaper
            .shape(identity, filters, resolution.interpreted, now)
            .await
    }

    /// Re-run a composed filter set for `identity`.
    ///
    /// The set is recomposed from its requested filters under the identity's
    /// current scope, so a filter set composed for someone else cannot widen
    /// what this identity sees.
    ///
    /// # Errors
    /// Returns [`DomainError::Accessor`] if the data accessor fails.
    #[instrument(skip(self, identity, previous), fields(identity = %identity.id(), intent = %previous.intent()))]
    pub async fn retry(
        &self,
        identity: &Identity,
        previous: &EffectiveFilterSet,
        now: DateTime<Utc>,
    ) -> Result<Response, DomainError> {
        let filters = compose(
            &derive_scope(identity),
            previous.requested(),
            previous.intent(),
            identity.capabilities(),
        );
        self.shaper.shape(identity, filters, String::new(), now).await
    }

    #[must_use]
    pub fn suggestions(&self, partial: &str) -> Vec<String> {
        self.resolver
            .suggestions(partial)
            .into_iter()
            .map(str::to_owned)
            .collect()
    }
}

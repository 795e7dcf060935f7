use chrono::NaiveDate;
use roster_query::{QueryFilter, QueryIntent};
use serde::Serialize;

use crate::config::ResolverConfig;
use crate::domain::extract::FilterExtractor;
use crate::domain::lexicon::Lexicon;
use crate::domain::normalize::normalize;
use crate::domain::patterns::IntentTable;
use crate::domain::suggest::suggest;
use crate::error::ResolverError;

/// Outcome of resolving one query text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub intent: QueryIntent,
    /// Untrusted filters, ordered by appearance. Always empty for `UNRECOGNIZED`.
    pub filters: Vec<QueryFilter>,
    /// Normalized and transliterated text the patterns ran against.
    pub interpreted: String,
    /// Pattern that selected the intent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_pattern: Option<String>,
}

/// Maps free-form query text to an intent and filters.
///
/// Built once from [`ResolverConfig`]; resolution is pure and never fails.
pub struct QueryResolver {
    lexicon: Lexicon,
    intents: IntentTable,
    extractor: FilterExtractor,
    suggestions: Vec<String>,
}

impl QueryResolver {
    /// # Errors
    /// Returns [`ResolverError`] if any pattern or vocabulary in the
    /// configuration does not compile.
    pub fn new(config: &ResolverConfig) -> Result<Self, ResolverError> {
        Ok(Self {
            lexicon: Lexicon::new(&config.lexicon),
            intents: IntentTable::compile(&config.intents)?,
            extractor: FilterExtractor::new(config)?,
            suggestions: config.suggestions.clone(),
        })
    }

    /// Resolve `text`, taking relative time windows from the local date.
    #[must_use]
    pub fn resolve(&self, text: &str) -> Resolution {
        self.resolve_on(text, chrono::Local::now().date_naive())
    }

    /// Resolve `text` with `today` as the reference day for relative windows.
    #[must_use]
    pub fn resolve_on(&self, text: &str, today: NaiveDate) -> Resolution {
        let interpreted = self.interpret(text);

        let Some(selected) = self.intents.select(&interpreted) else {
            tracing::debug!(query = %interpreted, "no intent pattern matched");
            return Resolution {
                intent: QueryIntent::Unrecognized,
                filters: Vec::new(),
                interpreted,
                matched_pattern: None,
            };
        };

        let filters = self.extractor.extract(&interpreted, today);
        tracing::debug!(
            intent = %selected.intent,
            pattern = %selected.pattern,
            filters = filters.len(),
            "resolved query"
        );
        Resolution {
            intent: selected.intent,
            filters,
            interpreted,
            matched_pattern: Some(selected.pattern),
        }
    }

    /// Normalized, transliterated form of `text`.
    #[must_use]
    pub fn interpret(&self, text: &str) -> String {
        self.lexicon.apply(&normalize(text))
    }

    #[must_use]
    pub fn suggestions(&self, partial: &str) -> Vec<&str> {
        suggest(&self.suggestions, partial)
    }
}

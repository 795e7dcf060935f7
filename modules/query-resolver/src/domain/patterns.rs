use regex::Regex;
use roster_query::QueryIntent;

use crate::config::IntentPatterns;
use crate::error::ResolverError;

struct CompiledIntent {
    intent: QueryIntent,
    patterns: Vec<Regex>,
}

/// Ordered intent table compiled from configuration.
pub struct IntentTable {
    entries: Vec<CompiledIntent>,
}

/// The intent selected for a text and the pattern that selected it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntentMatch {
    pub intent: QueryIntent,
    pub pattern: String,
}

impl IntentTable {
    /// Compile every pattern up front.
    ///
    /// # Errors
    /// Returns [`ResolverError::InvalidPattern`] for a pattern that does not
    /// compile and [`ResolverError::ReservedIntent`] if the table lists
    /// `UNRECOGNIZED`, which is only ever the fallback.
    pub fn compile(table: &[IntentPatterns]) -> Result<Self, ResolverError> {
        let mut entries = Vec::with_capacity(table.len());
        for entry in table {
            if entry.intent == QueryIntent::Unrecognized {
                return Err(ResolverError::ReservedIntent(entry.intent));
            }
            let patterns = entry
                .patterns
                .iter()
                .map(|p| {
                    Regex::new(p).map_err(|source| ResolverError::InvalidPattern {
                        intent: entry.intent,
                        pattern: p.clone(),
                        source,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            entries.push(CompiledIntent {
                intent: entry.intent,
                patterns,
            });
        }
        Ok(Self { entries })
    }

    /// First entry, in declared order, with a pattern matching `text`.
    #[must_use]
    pub fn select(&self, text: &str) -> Option<IntentMatch> {
        self.entries.iter().find_map(|entry| {
            entry
                .patterns
                .iter()
                .find(|re| re.is_match(text))
                .map(|re| IntentMatch {
                    intent: entry.intent,
                    pattern: re.as_str().to_owned(),
                })
        })
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn entry(intent: QueryIntent, patterns: &[&str]) -> IntentPatterns {
        IntentPatterns {
            intent,
            patterns: patterns.iter().map(|p| (*p).to_owned()).collect(),
        }
    }

    #[test]
    fn declared_order_decides_ties() {
        let table = IntentTable::compile(&[
            entry(QueryIntent::Attendance, &[r"\battendance\b"]),
            entry(QueryIntent::LowPerformers, &[r"\blow\b"]),
        ])
        .unwrap();
        let m = table.select("low attendance students").unwrap();
        assert_eq!(m.intent, QueryIntent::Attendance);
        assert_eq!(m.pattern, r"\battendance\b");
    }

    #[test]
    fn no_match_is_none() {
        let table = IntentTable::compile(&[entry(QueryIntent::Performance, &["performance"])]).unwrap();
        assert!(table.select("hello there").is_none());
    }

    #[test]
    fn bad_pattern_is_reported() {
        let err = IntentTable::compile(&[entry(QueryIntent::Performance, &["(unclosed"])])
            .err()
            .unwrap();
        assert!(matches!(
            err,
            ResolverError::InvalidPattern {
                intent: QueryIntent::Performance,
                ..
            }
        ));
    }

    #[test]
    fn unrecognized_cannot_be_configured() {
        let err = IntentTable::compile(&[entry(QueryIntent::Unrecognized, &["x"])])
            .err()
            .unwrap();
        assert!(matches!(err, ResolverError::ReservedIntent(_)));
    }
}

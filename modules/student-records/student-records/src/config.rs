//! Configuration for the student records module.

use std::collections::BTreeMap;

use query_resolver::ResolverConfig;
use roster_security::{AccessLevel, Dimension, ScopeValue};
use serde::{Deserialize, Serialize};

/// Module configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StudentRecordsConfig {
    /// Intent patterns, lexicon and filter vocabulary.
    pub resolver: ResolverConfig,

    /// Post-processing applied to fetched rows.
    pub shaper: ShaperConfig,

    /// Administrators known to the static identity provider.
    pub identities: Vec<IdentityConfig>,
}

/// Result shaping parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShaperConfig {
    /// Row cap for `TOP_PERFORMERS` and `LOW_PERFORMERS`.
    pub top_limit: usize,

    /// `LOW_PERFORMERS` keeps scores strictly below this.
    pub low_score_threshold: i64,
}

impl Default for ShaperConfig {
    fn default() -> Self {
        Self {
            top_limit: 10,
            low_score_threshold: 60,
        }
    }
}

/// One administrator account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IdentityConfig {
    pub username: String,

    #[serde(default)]
    pub display_name: String,

    /// Lowercase hex SHA-256 of the password.
    pub password_sha256: String,

    pub access_level: AccessLevel,

    /// Allowed values per dimension. Must be empty for `super`.
    #[serde(default)]
    pub scope: BTreeMap<Dimension, Vec<ScopeValue>>,

    #[serde(default)]
    pub can_view_sensitive: bool,

    #[serde(default)]
    pub can_export: bool,

    /// Inactive accounts cannot authenticate.
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn identity_from_yaml() {
        let yaml = r"
username: east67_admin
display_name: East Region Grade 6-7 Administrator
password_sha256: 354fd0a46cb1b95e66b0b52d48e41f3a624d9967799a916efa4f09f929679ff8
access_level: combined
scope:
  region: [East]
  grade: [6, 7]
can_export: true
";
        let cfg: IdentityConfig = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(cfg.access_level, AccessLevel::Combined);
        assert_eq!(
            cfg.scope.get(&Dimension::Grade),
            Some(&vec![ScopeValue::Int(6), ScopeValue::Int(7)])
        );
        assert!(cfg.active);
        assert!(!cfg.can_view_sensitive);
    }

    #[test]
    fn shaper_defaults_fill_missing_fields() {
        let cfg: StudentRecordsConfig = serde_saphyr::from_str("shaper:\n  top_limit: 3\n").unwrap();
        assert_eq!(cfg.shaper.top_limit, 3);
        assert_eq!(cfg.shaper.low_score_threshold, 60);
        assert!(cfg.identities.is_empty());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let res: Result<StudentRecordsConfig, _> = serde_saphyr::from_str("shaper:\n  limit: 3\n");
        assert!(res.is_err());
    }
}

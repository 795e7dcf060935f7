use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::access_level::AccessLevel;
use crate::dimension::{Dimension, ScopeValue};
use crate::error::IdentityError;

/// Capability flags granted to an identity independently of its scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Capabilities {
    pub can_view_sensitive: bool,
    pub can_export: bool,
}

/// An authenticated administrator.
///
/// Built once from configuration through [`IdentityBuilder`], which enforces
/// the access-level invariants. Never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    id: String,
    display_name: String,
    access_level: AccessLevel,
    constraints: BTreeMap<Dimension, BTreeSet<ScopeValue>>,
    capabilities: Capabilities,
}

impl Identity {
    /// Start building an identity with the given stable id and access level.
    #[must_use]
    pub fn builder(id: impl Into<String>, access_level: AccessLevel) -> IdentityBuilder {
        IdentityBuilder {
            id: id.into(),
            display_name: None,
            access_level,
            constraints: BTreeMap::new(),
            capabilities: Capabilities::default(),
        }
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    #[inline]
    #[must_use]
    pub fn access_level(&self) -> AccessLevel {
        self.access_level
    }

    #[inline]
    #[must_use]
    pub fn constraints(&self) -> &BTreeMap<Dimension, BTreeSet<ScopeValue>> {
        &self.constraints
    }

    #[inline]
    #[must_use]
    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }
}

pub struct IdentityBuilder {
    id: String,
    display_name: Option<String>,
    access_level: AccessLevel,
    constraints: BTreeMap<Dimension, BTreeSet<ScopeValue>>,
    capabilities: Capabilities,
}

impl IdentityBuilder {
    #[must_use]
    pub fn display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Add allowed values for a dimension. Repeated calls extend the set.
    #[must_use]
    pub fn allow<I, V>(mut self, dimension: Dimension, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<ScopeValue>,
    {
        self.constraints
            .entry(dimension)
            .or_default()
            .extend(values.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn can_view_sensitive(mut self, allowed: bool) -> Self {
        self.capabilities.can_view_sensitive = allowed;
        self
    }

    #[must_use]
    pub fn can_export(mut self, allowed: bool) -> Self {
        self.capabilities.can_export = allowed;
        self
    }

    /// Validate and build the identity.
    ///
    /// Constraints given to a `Super` identity are dropped with a warning.
    ///
    /// # Errors
    /// Returns [`IdentityError`] when the id is empty, a value set is empty,
    /// a value has the wrong type for its dimension, a single-dimension level is missing its constraint or carries another
    /// dimension, or a combined level has fewer than two dimensions.
    pub fn build(mut self) -> Result<Identity, IdentityError> {
        if self.id.trim().is_empty() {
            return Err(IdentityError::MissingId);
        }

        if self.access_level == AccessLevel::Super {
            if !self.constraints.is_empty() {
                tracing::warn!(
                    identity = %self.id,
                    dimensions = self.constraints.len(),
                    "ignoring scope constraints on super identity"
                );
                self.constraints.clear();
            }
        } else {
            self.validate_constraints()?;
        }

        let display_name = self.display_name.unwrap_or_else(|| self.id.clone());
        Ok(Identity {
            id: self.id,
            display_name,
            access_level: self.access_level,
            constraints: self.constraints,
            capabilities: self.capabilities,
        })
    }

    fn validate_constraints(&self) -> Result<(), IdentityError> {
        if let Some((dimension, _)) = self.constraints.iter().find(|(_, v)| v.is_empty()) {
            return Err(IdentityError::EmptyValueSet {
                id: self.id.clone(),
                dimension: *dimension,
            });
        }

        for (dimension, values) in &self.constraints {
            if let Some(value) = values.iter().find(|v| !dimension.accepts(v)) {
                return Err(IdentityError::ValueType {
                    id: self.id.clone(),
                    dimension: *dimension,
                    value: value.to_string(),
                    expected: if dimension.is_numeric() {
                        "an integer"
                    } else {
                        "text"
                    },
                });
            }
        }

        let Some(expected) = self.access_level.dimension() else {
            // Combined
            if self.constraints.len() < 2 {
                return Err(IdentityError::TooFewDimensions {
                    id: self.id.clone(),
                    count: self.constraints.len(),
                });
            }
            return Ok(());
        };

        if let Some(other) = self.constraints.keys().find(|d| **d != expected) {
            return Err(IdentityError::UnexpectedConstraint {
                id: self.id.clone(),
                level: self.access_level,
                dimension: *other,
            });
        }
        if !self.constraints.contains_key(&expected) {
            return Err(IdentityError::MissingConstraint {
                id: self.id.clone(),
                level: self.access_level,
                expected,
            });
        }
        Ok(())
    }
}

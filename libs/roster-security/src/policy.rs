//! Scope derivation and capability checks.
//!
//! All functions here are pure and total over a well-formed [`Identity`].

use crate::access_level::AccessLevel;
use crate::identity::Identity;
use crate::scope::ScopePredicate;

/// Compute the scope predicate an identity is limited to.
///
/// `Super` maps to the unrestricted predicate. Single-dimension levels
/// constrain exactly their own dimension. `Combined` is the intersection of
/// one single-dimension predicate per configured dimension.
#[must_use]
pub fn derive_scope(identity: &Identity) -> ScopePredicate {
    match identity.access_level() {
        AccessLevel::Super => ScopePredicate::unrestricted(),
        AccessLevel::Region
        | AccessLevel::Grade
        | AccessLevel::Class
        | AccessLevel::Subject
        | AccessLevel::Combined => identity
            .constraints()
            .iter()
            .map(|(dimension, values)| ScopePredicate::only(*dimension, values.iter().cloned()))
            .fold(ScopePredicate::unrestricted(), |acc, p| acc.intersect(&p)),
    }
}

#[inline]
#[must_use]
pub fn can_view_sensitive(identity: &Identity) -> bool {
    identity.capabilities().can_view_sensitive
}

#[inline]
#[must_use]
pub fn can_export(identity: &Identity) -> bool {
    identity.capabilities().can_export
}

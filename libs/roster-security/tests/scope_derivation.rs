#![allow(clippy::unwrap_used, clippy::expect_used)]

use roster_security::{
    AccessLevel, Dimension, Identity, ScopePredicate, ScopeValue, can_export, can_view_sensitive,
    derive_scope,
};

fn values<V: Into<ScopeValue> + Clone>(items: &[V]) -> Vec<ScopeValue> {
    items.iter().cloned().map(Into::into).collect()
}

#[test]
fn super_identity_is_unrestricted() {
    let identity = Identity::builder("super_admin", AccessLevel::Super)
        .can_view_sensitive(true)
        .can_export(true)
        .build()
        .unwrap();

    assert_eq!(derive_scope(&identity), ScopePredicate::unrestricted());
    assert!(can_view_sensitive(&identity));
    assert!(can_export(&identity));
}

#[test]
fn single_dimension_levels_constrain_their_dimension() {
    let cases = [
        (AccessLevel::Region, Dimension::Region, values(&["South"])),
        (AccessLevel::Grade, Dimension::Grade, values(&[8_i64, 9])),
        (AccessLevel::Class, Dimension::ClassSection, values(&["A", "B"])),
        (
            AccessLevel::Subject,
            Dimension::Subject,
            values(&["Mathematics", "Science"]),
        ),
    ];

    for (level, dimension, allowed) in cases {
        let identity = Identity::builder(format!("{level}_admin"), level)
            .allow(dimension, allowed.clone())
            .build()
            .unwrap();
        let scope = derive_scope(&identity);

        assert_eq!(
            scope.constrained_dimensions().collect::<Vec<_>>(),
            vec![dimension],
            "{level}"
        );
        let got: Vec<ScopeValue> = scope.allowed(dimension).unwrap().iter().cloned().collect();
        let mut want = allowed;
        want.sort();
        assert_eq!(got, want);
    }
}

#[test]
fn combined_scope_requires_every_dimension() {
    let identity = Identity::builder("east67_admin", AccessLevel::Combined)
        .allow(Dimension::Region, ["East"])
        .allow(Dimension::Grade, [6, 7])
        .can_export(true)
        .build()
        .unwrap();
    let scope = derive_scope(&identity);

    assert!(scope.permits(Dimension::Region, &"East".into()));
    assert!(!scope.permits(Dimension::Region, &"North".into()));
    assert!(scope.permits(Dimension::Grade, &6.into()));
    assert!(!scope.permits(Dimension::Grade, &8.into()));
    assert!(scope.permits(Dimension::Subject, &"English".into()));
    assert!(!can_view_sensitive(&identity));
    assert!(can_export(&identity));
}

#[test]
fn derivation_is_deterministic() {
    let identity = Identity::builder("classab_admin", AccessLevel::Class)
        .allow(Dimension::ClassSection, ["B", "A"])
        .build()
        .unwrap();
    assert_eq!(derive_scope(&identity), derive_scope(&identity.clone()));
}

use super::*;

fn v(major: u64, minor: u64, patch: u64) -> Version {
    Version::new(major, minor, patch)
}

#[test]
fn test_builder_adds_identity_capability() {
    let unit = Unit::builder("org.example.core", v(1, 2, 0)).build();
    let caps = unit.provided_capabilities();
    assert_eq!(caps.len(), 1);
    assert_eq!(caps[0].namespace, NAMESPACE_IU);
    assert_eq!(caps[0].name, "org.example.core");
    assert_eq!(caps[0].version, v(1, 2, 0));
}

#[test]
fn test_builder_keeps_explicit_identity_capability() {
    let unit = Unit::builder("a", v(1, 0, 0))
        .provides(Capability::new(NAMESPACE_IU, "a", v(1, 0, 0)))
        .build();
    assert_eq!(unit.provided_capabilities().len(), 1);
}

#[test]
fn test_unit_satisfies_own_identity_requirement() {
    let unit = Unit::builder("a", v(1, 0, 0)).build();
    assert!(unit.satisfies(&Requirement::new(NAMESPACE_IU, "a")));
    assert!(!unit.satisfies(&Requirement::new(NAMESPACE_IU, "b")));
}

#[test]
fn test_unit_satisfies_any_capability() {
    let unit = Unit::builder("a", v(1, 0, 0))
        .provides(Capability::new("java.package", "a.api", v(1, 0, 0)))
        .provides(Capability::new("java.package", "a.spi", v(2, 0, 0)))
        .build();
    assert!(unit.satisfies(&Requirement::new("java.package", "a.spi")));
    assert!(!unit.satisfies(
        &Requirement::new("java.package", "a.api").with_range("[2.0,3.0)".parse().unwrap())
    ));
}

#[test]
fn test_requirement_lists_are_separate() {
    let unit = Unit::builder("a", v(1, 0, 0))
        .requires(Requirement::new("osgi.bundle", "b"))
        .meta_requires(Requirement::new("osgi.bundle", "tooling"))
        .build();
    assert_eq!(unit.requirements().len(), 1);
    assert_eq!(unit.meta_requirements().len(), 1);
    assert_eq!(unit.meta_requirements()[0].name, "tooling");
}

#[test]
fn test_kind_classification() {
    let bundle = Unit::builder("a", v(1, 0, 0))
        .provides(Capability::new(NAMESPACE_OSGI_BUNDLE, "a", v(1, 0, 0)))
        .build();
    assert_eq!(bundle.kind(), UnitKind::Bundle);

    let fragment = Unit::builder("a.linux", v(1, 0, 0))
        .provides(Capability::new(NAMESPACE_OSGI_BUNDLE, "a.linux", v(1, 0, 0)))
        .provides(Capability::new(NAMESPACE_OSGI_FRAGMENT, "a", v(1, 0, 0)))
        .build();
    assert_eq!(fragment.kind(), UnitKind::Fragment);
    assert!(fragment.is_fragment());

    let feature = Unit::builder("org.example.feature.group", v(1, 0, 0)).build();
    assert_eq!(feature.kind(), UnitKind::Feature);

    let product = Unit::builder("org.example.product", v(1, 0, 0))
        .property(PROP_TYPE_PRODUCT, "true")
        .build();
    assert_eq!(product.kind(), UnitKind::Product);

    let category = Unit::builder("category.main", v(1, 0, 0))
        .property(PROP_TYPE_CATEGORY, "true")
        .build();
    assert_eq!(category.kind(), UnitKind::Category);

    let other = Unit::builder("config.a", v(1, 0, 0)).build();
    assert_eq!(other.kind(), UnitKind::Other);
}

#[test]
fn test_unit_kind_display_and_serde() {
    assert_eq!(UnitKind::Fragment.to_string(), "fragment");
    let parsed: UnitKind = serde_json::from_str("\"feature\"").unwrap();
    assert_eq!(parsed, UnitKind::Feature);
}

#[test]
fn test_identical_units_are_distinct_instances() {
    let first = Unit::builder("a", v(1, 0, 0)).build();
    let second = Unit::builder("a", v(1, 0, 0)).build();
    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(first.to_string(), second.to_string());
}

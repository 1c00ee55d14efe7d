use super::*;

#[test]
fn test_requirement_defaults() {
    let req = Requirement::new("osgi.bundle", "org.example");
    assert!(req.range.is_none());
    assert!(req.filter.is_none());
    assert!(!req.optional);
    assert_eq!(req.min(), 1);
    assert_eq!(req.max, u32::MAX);
    assert!(req.greedy);
}

#[test]
fn test_optional_requirement_has_zero_min() {
    let req = Requirement::new("osgi.bundle", "org.example").optional();
    assert_eq!(req.min(), 0);
    assert!(!req.is_mandatory_compile());
}

#[test]
fn test_mandatory_compile_namespaces() {
    assert!(Requirement::new(NAMESPACE_OSGI_BUNDLE, "a").is_mandatory_compile());
    assert!(Requirement::new(NAMESPACE_JAVA_PACKAGE, "a.b").is_mandatory_compile());
    assert!(!Requirement::new(NAMESPACE_IU, "a").is_mandatory_compile());
}

#[test]
fn test_requirement_display() {
    let req = Requirement::new("osgi.bundle", "bundleB");
    assert_eq!(req.to_string(), "osgi.bundle; bundleB");

    let ranged = req
        .clone()
        .with_range("[1.0,2.0)".parse().unwrap())
        .with_filter(Filter::attribute_equals("osgi.os", "linux"));
    assert_eq!(ranged.to_string(), "osgi.bundle; bundleB [1.0.0,2.0.0) (osgi.os=linux)");
}

#[test]
fn test_filter_debug_shows_description() {
    let filter = Filter::attribute_equals("osgi.ws", "gtk");
    let debug = format!("{:?}", filter);
    assert!(debug.contains("(osgi.ws=gtk)"));
}

#[test]
fn test_capability_attributes() {
    let cap = Capability::new("osgi.bundle", "a", Version::new(1, 0, 0)).with_attribute("osgi.os", "linux");
    assert_eq!(cap.attribute("osgi.os"), Some("linux"));
    assert_eq!(cap.attribute("osgi.ws"), None);
    assert_eq!(cap.to_string(), "osgi.bundle; a 1.0.0");
}

#[test]
fn test_capability_identity_ignores_attributes() {
    let plain = Capability::new("osgi.bundle", "a", Version::new(1, 0, 0));
    let tagged = plain.clone().with_attribute("osgi.os", "linux");
    assert_eq!(plain, tagged);

    let mut seen = std::collections::HashSet::new();
    seen.insert(plain.clone());
    assert!(seen.contains(&tagged));

    assert_ne!(plain, Capability::new("osgi.bundle", "a", Version::new(1, 0, 1)));
    assert_ne!(plain, Capability::new("java.package", "a", Version::new(1, 0, 0)));
}

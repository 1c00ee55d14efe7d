use super::*;
use crate::metadata::capability::Filter;
use crate::metadata::version::{Version, VersionRange};

fn bundle(name: &str, version: Version) -> Capability {
    Capability::new("osgi.bundle", name, version)
}

#[test]
fn test_matches_namespace_and_name() {
    let req = Requirement::new("osgi.bundle", "org.example.core");
    assert!(satisfies(&req, &bundle("org.example.core", Version::new(1, 0, 0))));
}

#[test]
fn test_namespace_mismatch() {
    let req = Requirement::new("java.package", "org.example.core");
    assert!(!satisfies(&req, &bundle("org.example.core", Version::new(1, 0, 0))));
}

#[test]
fn test_name_mismatch() {
    let req = Requirement::new("osgi.bundle", "org.example.core");
    assert!(!satisfies(&req, &bundle("org.example.ui", Version::new(1, 0, 0))));
}

#[test]
fn test_absent_range_matches_any_version() {
    let req = Requirement::new("osgi.bundle", "a");
    assert!(satisfies(&req, &bundle("a", Version::new(0, 0, 1))));
    assert!(satisfies(&req, &bundle("a", Version::new(42, 0, 0))));
}

#[test]
fn test_range_bounds_are_applied() {
    let req =
        Requirement::new("osgi.bundle", "a").with_range("[1.0,2.0)".parse::<VersionRange>().unwrap());
    assert!(satisfies(&req, &bundle("a", Version::new(1, 4, 0))));
    assert!(!satisfies(&req, &bundle("a", Version::new(2, 0, 0))));
}

#[test]
fn test_filter_must_hold() {
    let req = Requirement::new("osgi.bundle", "a").with_filter(Filter::attribute_equals("osgi.os", "linux"));
    let linux = bundle("a", Version::new(1, 0, 0)).with_attribute("osgi.os", "linux");
    let win32 = bundle("a", Version::new(1, 0, 0)).with_attribute("osgi.os", "win32");
    let plain = bundle("a", Version::new(1, 0, 0));

    assert!(satisfies(&req, &linux));
    assert!(!satisfies(&req, &win32));
    assert!(!satisfies(&req, &plain));
}

#[test]
fn test_custom_predicate_filter() {
    let req = Requirement::new("osgi.bundle", "a")
        .with_filter(Filter::new("(major>=3)", |cap: &Capability| cap.version.major() >= 3));
    assert!(satisfies(&req, &bundle("a", Version::new(3, 1, 0))));
    assert!(!satisfies(&req, &bundle("a", Version::new(2, 9, 0))));
}

#[test]
fn test_optional_and_max_do_not_affect_matching() {
    let req = Requirement::new("osgi.bundle", "a").optional().with_max(1).non_greedy();
    assert!(satisfies(&req, &bundle("a", Version::new(1, 0, 0))));
}

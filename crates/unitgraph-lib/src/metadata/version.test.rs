use super::*;

#[test]
fn test_parse_full_version() {
    assert_eq!(parse_version("1.2.3").unwrap(), Version::new(1, 2, 3));
}

#[test]
fn test_parse_pads_missing_segments() {
    assert_eq!(parse_version("1").unwrap(), Version::new(1, 0, 0));
    assert_eq!(parse_version("4.7").unwrap(), Version::new(4, 7, 0));
}

#[test]
fn test_parse_keeps_qualifier_verbatim() {
    let version = parse_version("3.18.0.v20230101-1200").unwrap();
    assert_eq!((version.major(), version.minor(), version.micro()), (3, 18, 0));
    assert_eq!(version.qualifier(), "v20230101-1200");
    assert_eq!(version.to_string(), "3.18.0.v20230101-1200");
}

#[test]
fn test_parse_qualifier_keeps_underscores() {
    let version = parse_version("1.0.0.I2024_01").unwrap();
    assert_eq!(version.qualifier(), "I2024_01");
    assert_eq!(version, Version::new(1, 0, 0).with_qualifier("I2024_01"));
}

#[test]
fn test_qualifier_orders_as_string() {
    let nine = parse_version("1.0.0.9").unwrap();
    let ten = parse_version("1.0.0.10").unwrap();
    assert!(nine > ten);

    // '_' sorts after 'Z', '-' before it
    assert!(parse_version("1.0.0.a_b").unwrap() > parse_version("1.0.0.aZ").unwrap());
    assert!(parse_version("1.0.0.a-b").unwrap() < parse_version("1.0.0.aZ").unwrap());
}

#[test]
fn test_unqualified_sorts_below_qualified() {
    let plain = Version::new(1, 0, 0);
    let qualified = plain.clone().with_qualifier("v1");
    assert!(plain < qualified);
    assert!(qualified < Version::new(1, 0, 1));
}

#[test]
fn test_range_with_qualified_bounds() {
    let numeric: VersionRange = "[1.0.0.10,2.0)".parse().unwrap();
    assert!(numeric.contains(&parse_version("1.0.0.9").unwrap()));
    assert!(!numeric.contains(&Version::new(1, 0, 0)));

    let underscore: VersionRange = "[1.0.0.aZ,2.0)".parse().unwrap();
    assert!(underscore.contains(&parse_version("1.0.0.a_b").unwrap()));
    assert!(!underscore.contains(&parse_version("1.0.0.a-b").unwrap()));
}

#[test]
fn test_parse_rejects_garbage() {
    assert!(parse_version("").is_err());
    assert!(parse_version("one.two").is_err());
    assert!(parse_version("1..2").is_err());
    assert!(parse_version("1.0.0.").is_err());
    assert!(parse_version("1.0.0.v+1").is_err());
}

#[test]
fn test_range_inclusive_exclusive() {
    let range: VersionRange = "[1.0,2.0)".parse().unwrap();
    assert!(range.contains(&Version::new(1, 0, 0)));
    assert!(range.contains(&Version::new(1, 9, 9)));
    assert!(!range.contains(&Version::new(2, 0, 0)));
    assert!(!range.contains(&Version::new(0, 9, 0)));
}

#[test]
fn test_range_exclusive_lower_inclusive_upper() {
    let range: VersionRange = "(1.0,2.0]".parse().unwrap();
    assert!(!range.contains(&Version::new(1, 0, 0)));
    assert!(range.contains(&Version::new(2, 0, 0)));
}

#[test]
fn test_bare_version_is_lower_bound_only() {
    let range: VersionRange = "1.5".parse().unwrap();
    assert!(!range.contains(&Version::new(1, 4, 99)));
    assert!(range.contains(&Version::new(1, 5, 0)));
    assert!(range.contains(&Version::new(99, 0, 0)));
}

#[test]
fn test_exact_range() {
    let range: VersionRange = "[1.2.3,1.2.3]".parse().unwrap();
    assert_eq!(range, VersionRange::exactly(Version::new(1, 2, 3)));
    assert!(range.contains(&Version::new(1, 2, 3)));
    assert!(!range.contains(&Version::new(1, 2, 4)));
}

#[test]
fn test_range_parse_errors() {
    assert!("".parse::<VersionRange>().is_err());
    assert!("[1.0,2.0".parse::<VersionRange>().is_err());
    assert!("[1.0]".parse::<VersionRange>().is_err());
    assert!("[2.0,1.0)".parse::<VersionRange>().is_err());
    assert!("[a,b)".parse::<VersionRange>().is_err());
}

#[test]
fn test_range_display_roundtrips_syntax() {
    assert_eq!("[1.0,2.0)".parse::<VersionRange>().unwrap().to_string(), "[1.0.0,2.0.0)");
    assert_eq!("(1,2]".parse::<VersionRange>().unwrap().to_string(), "(1.0.0,2.0.0]");
    assert_eq!("1.5".parse::<VersionRange>().unwrap().to_string(), "1.5.0");
}

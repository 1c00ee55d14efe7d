use super::*;
use crate::metadata::UnitKind;
use std::fs;
use tempfile::TempDir;

const TOML_MANIFEST: &str = r#"
[[project]]
key = "projectA"

[[project.unit]]
id = "bundleA"
version = "1.0.0.qualifier"
properties = { "some.key" = "value" }
provides = [{ namespace = "osgi.bundle", name = "bundleA" }]
requires = [{ namespace = "osgi.bundle", name = "bundleB", range = "[1.0,2.0)", max = 1, filter = { key = "osgi.os", value = "linux" } }]
meta_requires = [{ namespace = "osgi.bundle", name = "tooling", optional = true, greedy = false }]

[[project]]
key = "projectB"

[[project.unit]]
id = "bundleB"
version = "1.2"
provides = [{ namespace = "osgi.bundle", name = "bundleB", attributes = { "osgi.os" = "linux" } }]
"#;

const YAML_MANIFEST: &str = r#"
project:
  - key: projectA
    unit:
      - id: bundleA
        version: "1.0.0"
        requires:
          - namespace: osgi.bundle
            name: bundleB
  - key: projectB
    unit:
      - id: bundleB
        version: "1.0.0"
        provides:
          - namespace: osgi.bundle
            name: bundleB
"#;

const JSON_MANIFEST: &str = r#"{
  "project": [
    {
      "key": "projectA",
      "unit": [
        { "id": "bundleA", "version": "1.0.0",
          "requires": [{ "namespace": "osgi.bundle", "name": "bundleB", "optional": true }] }
      ]
    },
    {
      "key": "projectB",
      "unit": [
        { "id": "bundleB", "version": "1.0.0",
          "provides": [{ "namespace": "osgi.bundle", "name": "bundleB" }] }
      ]
    }
  ]
}"#;

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_format_from_extension() {
    assert_eq!(
        ManifestFormat::from_path(Path::new("build.toml")),
        Some(ManifestFormat::Toml)
    );
    assert_eq!(
        ManifestFormat::from_path(Path::new("build.YML")),
        Some(ManifestFormat::Yaml)
    );
    assert_eq!(
        ManifestFormat::from_path(Path::new("build.yaml")),
        Some(ManifestFormat::Yaml)
    );
    assert_eq!(
        ManifestFormat::from_path(Path::new("build.json")),
        Some(ManifestFormat::Json)
    );
    assert_eq!(ManifestFormat::from_path(Path::new("build.xml")), None);
    assert_eq!(ManifestFormat::from_path(Path::new("build")), None);
}

#[test]
fn test_load_toml_manifest() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "build.toml", TOML_MANIFEST);

    let manifest = load_manifest(&path).unwrap();
    assert_eq!(manifest.projects.len(), 2);
    assert_eq!(manifest.projects[0].key, "projectA");

    let unit = &manifest.projects[0].units[0];
    assert_eq!(unit.requires[0].range.as_deref(), Some("[1.0,2.0)"));
    assert_eq!(unit.requires[0].max, Some(1));
    assert!(unit.requires[0].greedy);
    assert!(!unit.meta_requires[0].greedy);
}

#[test]
fn test_toml_units_convert() {
    let manifest = BuildManifest::parse(TOML_MANIFEST, ManifestFormat::Toml, Path::new("x.toml"))
        .unwrap();
    let projects = manifest.into_projects().unwrap();

    let (project, units) = &projects[0];
    assert_eq!(project.key(), "projectA");
    let unit = &units[0];
    assert_eq!(unit.id(), "bundleA");
    assert_eq!(unit.version().to_string(), "1.0.0.qualifier");
    assert_eq!(unit.property("some.key"), Some("value"));
    assert_eq!(unit.kind(), UnitKind::Bundle);

    // identity capability plus the declared one, which inherits the unit version
    let caps = unit.provided_capabilities();
    assert_eq!(caps.len(), 2);
    assert_eq!(caps[1].version, *unit.version());

    let requirement = &unit.requirements()[0];
    assert_eq!(requirement.max, 1);
    assert_eq!(requirement.filter.as_ref().map(|f| f.description()), Some("(osgi.os=linux)"));
    assert_eq!(requirement.to_string(), "osgi.bundle; bundleB [1.0.0,2.0.0) (osgi.os=linux)");

    let meta = &unit.meta_requirements()[0];
    assert!(meta.optional);
    assert!(!meta.greedy);

    let provider = &projects[1].1[0];
    assert_eq!(provider.version().to_string(), "1.2.0");
    assert!(provider.satisfies(requirement));
}

#[test]
fn test_load_yaml_manifest() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "build.yaml", YAML_MANIFEST);

    let projects = load_manifest(&path).unwrap().into_projects().unwrap();
    assert_eq!(projects.len(), 2);
    assert_eq!(projects[0].1[0].requirements().len(), 1);
    assert_eq!(projects[1].0.key(), "projectB");
}

#[test]
fn test_load_json_manifest() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "build.json", JSON_MANIFEST);

    let projects = load_manifest(&path).unwrap().into_projects().unwrap();
    assert!(projects[0].1[0].requirements()[0].optional);
}

#[test]
fn test_unsupported_extension() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "build.ini", "");
    assert!(matches!(
        load_manifest(&path),
        Err(ManifestError::UnsupportedFormat { .. })
    ));
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");
    assert!(matches!(load_manifest(&path), Err(ManifestError::Io { .. })));
}

#[test]
fn test_parse_errors_per_format() {
    let dir = TempDir::new().unwrap();

    let toml = write(&dir, "bad.toml", "[[project]\nkey =");
    assert!(matches!(load_manifest(&toml), Err(ManifestError::Toml { .. })));

    let json = write(&dir, "bad.json", "{\"project\": [");
    assert!(matches!(load_manifest(&json), Err(ManifestError::Json { .. })));

    let yaml = write(&dir, "bad.yaml", "project:\n  - key: [unclosed\n");
    assert!(matches!(load_manifest(&yaml), Err(ManifestError::Yaml { .. })));
}

#[test]
fn test_unknown_fields_are_rejected() {
    let content = "[[project]]\nkey = \"a\"\ncolour = \"red\"\n";
    assert!(BuildManifest::parse(content, ManifestFormat::Toml, Path::new("x.toml")).is_err());
}

#[test]
fn test_invalid_version_names_the_unit() {
    let content = r#"
[[project]]
key = "a"

[[project.unit]]
id = "broken"
version = "one.two"
"#;
    let manifest = BuildManifest::parse(content, ManifestFormat::Toml, Path::new("x.toml")).unwrap();
    let err = manifest.into_projects().unwrap_err();
    assert!(matches!(err, ManifestError::InvalidVersion { ref unit, .. } if unit == "broken"));
    assert!(err.to_string().starts_with("Unit broken:"));
}

#[test]
fn test_invalid_range_names_the_unit() {
    let content = r#"
[[project]]
key = "a"

[[project.unit]]
id = "needy"
version = "1.0.0"
requires = [{ namespace = "osgi.bundle", name = "b", range = "[2.0,1.0]" }]
"#;
    let manifest = BuildManifest::parse(content, ManifestFormat::Toml, Path::new("x.toml")).unwrap();
    let err = manifest.into_projects().unwrap_err();
    assert!(matches!(
        err,
        ManifestError::InvalidVersion {
            source: VersionError::InvalidRange { .. },
            ..
        }
    ));
}

#[test]
fn test_empty_manifest() {
    let manifest = BuildManifest::parse("", ManifestFormat::Toml, Path::new("x.toml")).unwrap();
    assert!(manifest.into_projects().unwrap().is_empty());
}

//! E2E tests for manifest discovery and the supported manifest formats

use anyhow::Result;
use unitgraph_tests::{BuildFixture, SAMPLE_JSON, SAMPLE_TOML, SAMPLE_YAML};

#[test]
fn e2e_every_format_builds_the_same_graph() -> Result<()> {
    let toml = BuildFixture::with_manifest("unitgraph.toml", SAMPLE_TOML)?;
    let yaml = BuildFixture::with_manifest("unitgraph.yaml", SAMPLE_YAML)?;
    let json = BuildFixture::with_manifest("unitgraph.json", SAMPLE_JSON)?;

    let expected = toml.run(&["dump"])?;
    assert_eq!(yaml.run(&["dump"])?, expected);
    assert_eq!(json.run(&["dump"])?, expected);
    Ok(())
}

#[test]
fn e2e_discovery_prefers_toml() -> Result<()> {
    let fixture = BuildFixture::with_manifest("unitgraph.toml", SAMPLE_TOML)?;
    fixture.files.write_file("unitgraph.json", "{ not json")?;

    let config = fixture.config(&["projects"])?;

    assert_eq!(config.app_config.manifest, Some(fixture.file("unitgraph.toml")));
    Ok(())
}

#[test]
fn e2e_discovers_yml_extension() -> Result<()> {
    let fixture = BuildFixture::with_manifest("unitgraph.yml", SAMPLE_YAML)?;

    assert!(fixture.run(&["projects"])?.starts_with("core\n"));
    Ok(())
}

#[test]
fn e2e_explicit_manifest_path() -> Result<()> {
    let fixture = BuildFixture::with_manifest("builds/release.json", SAMPLE_JSON)?;
    let manifest = fixture.file("builds/release.json");

    let output = fixture.run(&["--manifest", manifest.to_str().expect("utf-8 path"), "cycles"])?;

    assert!(output.contains("ui, help"));
    Ok(())
}

#[test]
fn e2e_missing_manifest_is_reported() -> Result<()> {
    let fixture = BuildFixture::empty()?;

    let err = fixture.run(&["projects"]).unwrap_err();

    assert!(err.to_string().contains("No build manifest found"));
    Ok(())
}

#[test]
fn e2e_version_needs_no_manifest() -> Result<()> {
    let fixture = BuildFixture::empty()?;

    let output = fixture.run(&["version"])?;

    assert!(output.starts_with("unitgraph "));
    Ok(())
}

#[test]
fn e2e_broken_manifest_names_the_file() -> Result<()> {
    let fixture = BuildFixture::with_manifest("unitgraph.toml", "[[project]]\nkey = 3\n")?;

    let err = fixture.run(&["projects"]).unwrap_err();

    assert!(format!("{:#}", err).contains("unitgraph.toml"));
    Ok(())
}

#[test]
fn e2e_empty_project_is_rejected() -> Result<()> {
    let fixture = BuildFixture::with_manifest("unitgraph.toml", "[[project]]\nkey = \"lonely\"\n")?;

    let err = fixture.run(&["projects"]).unwrap_err();

    assert!(format!("{:#}", err).contains("Project lonely has no units"));
    Ok(())
}

#[test]
fn e2e_duplicate_project_key_is_rejected() -> Result<()> {
    let fixture = BuildFixture::with_manifest(
        "unitgraph.toml",
        r#"
[[project]]
key = "a"

[[project.unit]]
id = "dup"
version = "1.0.0"

[[project]]
key = "a"

[[project.unit]]
id = "other"
version = "1.0.0"
"#,
    )?;

    let err = fixture.run(&["projects"]).unwrap_err();

    assert!(format!("{:#}", err).contains("Project a is registered more than once"));
    Ok(())
}

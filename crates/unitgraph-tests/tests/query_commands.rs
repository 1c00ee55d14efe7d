//! E2E tests for the query commands: deps, projects, cycles, unsatisfied
//!
//! Every test runs the full path from command line parsing through manifest
//! loading and graph construction to the rendered output.

use anyhow::Result;
use unitgraph_tests::BuildFixture;

#[test]
fn e2e_projects_lists_every_project_with_its_dependencies() -> Result<()> {
    let fixture = BuildFixture::sample()?;

    let output = fixture.run(&["projects"])?;

    assert_eq!(
        output,
        "core\n\
         ui -> core, help\n\
         help -> ui\n\
         ui.gtk [fragment] -> ui\n\
         site -> core, ui, help\n"
    );
    Ok(())
}

#[test]
fn e2e_projects_json() -> Result<()> {
    let fixture = BuildFixture::sample()?;

    let json = fixture.run_json(&["projects", "--format", "json"])?;

    let entries = json.as_array().expect("array of projects");
    assert_eq!(entries.len(), 5);
    assert_eq!(entries[3]["project"], "ui.gtk");
    assert_eq!(entries[3]["fragment"], true);
    assert_eq!(entries[4]["dependencies"], serde_json::json!(["core", "ui", "help"]));
    Ok(())
}

#[test]
fn e2e_deps_lists_units_of_other_projects() -> Result<()> {
    let fixture = BuildFixture::sample()?;

    let output = fixture.run(&["deps", "ui"])?;

    assert_eq!(
        output,
        "org.acme.core 1.2.0 (bundle) from core\n\
         org.acme.help 1.0.0 (bundle) from help\n"
    );
    Ok(())
}

#[test]
fn e2e_deps_exclusion_leaves_nothing() -> Result<()> {
    let fixture = BuildFixture::sample()?;

    let output = fixture.run(&["deps", "ui", "--exclude", "bundle"])?;

    assert_eq!(output, "ui has no dependencies on other projects\n");
    Ok(())
}

#[test]
fn e2e_deps_of_leaf_project() -> Result<()> {
    let fixture = BuildFixture::sample()?;

    assert_eq!(
        fixture.run(&["deps", "core"])?,
        "core has no dependencies on other projects\n"
    );
    Ok(())
}

#[test]
fn e2e_deps_json() -> Result<()> {
    let fixture = BuildFixture::sample()?;

    let json = fixture.run_json(&["deps", "site", "--format", "json"])?;

    let ids: Vec<&str> = json
        .as_array()
        .expect("array of units")
        .iter()
        .filter_map(|entry| entry["id"].as_str())
        .collect();
    assert_eq!(ids, vec!["org.acme.core", "org.acme.ui", "org.acme.help"]);
    assert_eq!(json[0]["kind"], "bundle");
    assert_eq!(json[0]["project"], "core");
    Ok(())
}

#[test]
fn e2e_deps_unknown_project_fails() -> Result<()> {
    let fixture = BuildFixture::sample()?;

    let err = fixture.run(&["deps", "nope"]).unwrap_err();

    assert!(err.to_string().contains("Unknown project 'nope'"));
    Ok(())
}

#[test]
fn e2e_cycles_reports_ui_and_help() -> Result<()> {
    let fixture = BuildFixture::sample()?;

    let output = fixture.run(&["cycles"])?;
    assert!(output.contains("cycle 1:"));
    assert!(output.contains("ui, help"));

    let json = fixture.run_json(&["cycles", "--format", "json"])?;
    assert_eq!(json, serde_json::json!([["ui", "help"]]));
    Ok(())
}

#[test]
fn e2e_cycles_none() -> Result<()> {
    let fixture = BuildFixture::with_manifest(
        "unitgraph.toml",
        r#"
[[project]]
key = "a"

[[project.unit]]
id = "a"
version = "1.0.0"
requires = [{ namespace = "osgi.bundle", name = "b" }]

[[project]]
key = "b"

[[project.unit]]
id = "b"
version = "1.0.0"
provides = [{ namespace = "osgi.bundle", name = "b" }]
"#,
    )?;

    assert_eq!(fixture.run(&["cycles"])?, "No cycles\n");
    Ok(())
}

#[test]
fn e2e_unsatisfied_reports_optional_extras() -> Result<()> {
    let fixture = BuildFixture::sample()?;

    let output = fixture.run(&["unsatisfied"])?;

    assert_eq!(
        output,
        "site: org.acme.feature.group 1.0.0 requires osgi.bundle; org.acme.extras (optional)\n"
    );
    Ok(())
}

#[test]
fn e2e_unsatisfied_json() -> Result<()> {
    let fixture = BuildFixture::sample()?;

    let json = fixture.run_json(&["unsatisfied", "--format", "json"])?;

    assert_eq!(json[0]["project"], "site");
    assert_eq!(json[0]["optional"], true);
    assert_eq!(json[0]["requirement"], "osgi.bundle; org.acme.extras");
    Ok(())
}

#[test]
fn e2e_naive_scan_matches_indexed_scan() -> Result<()> {
    let fixture = BuildFixture::sample()?;

    let indexed = fixture.run(&["projects"])?;
    let naive = fixture.run(&["--no-index", "--jobs", "1", "projects"])?;

    assert_eq!(indexed, naive);
    Ok(())
}

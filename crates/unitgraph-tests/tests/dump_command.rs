//! E2E tests for DOT dumps, both the dump command and the --dump option

use anyhow::Result;
use unitgraph_tests::BuildFixture;

#[test]
fn e2e_dump_to_stdout() -> Result<()> {
    let fixture = BuildFixture::sample()?;

    let dot = fixture.run(&["dump"])?;

    assert!(dot.starts_with("digraph ProjectDependencies {\n  rankdir=LR;\n  node [shape=box];\n"));
    assert!(dot.ends_with("}\n"));
    for (index, key) in ["core", "ui", "help", "ui.gtk", "site"].iter().enumerate() {
        assert!(dot.contains(&format!("  p{} [label=\"{}\"];", index, key)));
    }
    // ui <-> help is a cycle, everything else is plain
    assert!(dot.contains("  p1 -> p2 [color=red"));
    assert!(dot.contains("  p2 -> p1 [color=red"));
    assert!(dot.contains("  p1 -> p0 [color=black"));
    assert!(dot.contains("  p3 -> p1 [color=black"));
    Ok(())
}

#[test]
fn e2e_dump_to_file() -> Result<()> {
    let fixture = BuildFixture::sample()?;
    let target = fixture.file("graph.dot");

    let output = fixture.run(&["dump", "--out", target.to_str().expect("utf-8 path")])?;

    assert!(output.is_empty());
    assert_eq!(fixture.files.read_file("graph.dot")?, fixture.run(&["dump"])?);
    Ok(())
}

#[test]
fn e2e_dump_option_writes_alongside_any_command() -> Result<()> {
    let fixture = BuildFixture::sample()?;
    let target = fixture.file("side.dot");

    let output = fixture.run(&["--dump", target.to_str().expect("utf-8 path"), "cycles"])?;

    assert!(output.contains("cycle 1:"));
    assert!(fixture.files.file_exists("side.dot"));
    assert!(fixture.files.read_file("side.dot")?.starts_with("digraph ProjectDependencies {"));
    Ok(())
}

#[test]
fn e2e_dump_into_missing_directory_fails() -> Result<()> {
    let fixture = BuildFixture::sample()?;
    let target = fixture.file("missing/graph.dot");

    let err = fixture
        .run(&["dump", "-o", target.to_str().expect("utf-8 path")])
        .unwrap_err();

    assert!(format!("{:#}", err).contains("Failed to write graph dump"));
    assert!(!fixture.files.file_exists("missing/graph.dot"));
    Ok(())
}

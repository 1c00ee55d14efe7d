use super::*;

#[test]
fn test_writes_manifest_into_nested_directory() -> std::io::Result<()> {
    let fixture = ManifestFixture::new()?;

    let path = fixture.write_file("builds/main/unitgraph.toml", "[[project]]\nkey = \"a\"\n")?;

    assert_eq!(path, fixture.path().join("builds/main/unitgraph.toml"));
    assert!(fixture.file_exists("builds/main/unitgraph.toml"));
    assert_eq!(
        fixture.read_file("builds/main/unitgraph.toml")?,
        "[[project]]\nkey = \"a\"\n"
    );
    Ok(())
}

#[test]
fn test_directory_removed_on_drop() -> std::io::Result<()> {
    let fixture = ManifestFixture::new()?;
    let root = fixture.path().to_path_buf();
    fixture.write_file("graph.dot", "digraph {}")?;

    drop(fixture);
    assert!(!root.exists());
    Ok(())
}

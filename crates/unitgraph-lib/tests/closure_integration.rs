//! Manifest to graph to dump, through the public API only

use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use unitgraph_lib::closure::{BuildOptions, DependencyClosureGraph, EdgeKind};
use unitgraph_lib::manifest::load_manifest;
use unitgraph_lib::metadata::{Project, Unit, UnitKind};

/// A small Eclipse-style build:
/// - `core` bundle
/// - `ui` bundle needing core and a package from `help`
/// - `ui.linux` fragment of ui
/// - `help` needing ui back (cycle ui <-> help)
/// - `product` with a feature, needing everything
const BUILD: &str = r#"
[[project]]
key = "core"

[[project.unit]]
id = "org.example.core"
version = "2.1.0"
provides = [
    { namespace = "osgi.bundle", name = "org.example.core" },
    { namespace = "java.package", name = "org.example.core.api", version = "2.1.0" },
]

[[project]]
key = "ui"

[[project.unit]]
id = "org.example.ui"
version = "1.0.0"
provides = [{ namespace = "osgi.bundle", name = "org.example.ui" }]
requires = [
    { namespace = "java.package", name = "org.example.core.api", range = "[2.0,3.0)" },
    { namespace = "java.package", name = "org.example.help.api" },
    { namespace = "osgi.bundle", name = "org.example.ui" },
]

[[project]]
key = "ui.linux"

[[project.unit]]
id = "org.example.ui.linux"
version = "1.0.0"
provides = [
    { namespace = "osgi.bundle", name = "org.example.ui.linux" },
    { namespace = "osgi.fragment", name = "org.example.ui" },
]
requires = [{ namespace = "osgi.bundle", name = "org.example.ui" }]

[[project]]
key = "help"

[[project.unit]]
id = "org.example.help"
version = "1.0.0"
provides = [
    { namespace = "osgi.bundle", name = "org.example.help" },
    { namespace = "java.package", name = "org.example.help.api" },
]
requires = [{ namespace = "osgi.bundle", name = "org.example.ui" }]
meta_requires = [{ namespace = "osgi.bundle", name = "org.example.product" }]

[[project]]
key = "product"

[[project.unit]]
id = "org.example.product"
version = "1.0.0"
properties = { "org.eclipse.equinox.p2.type.product" = "true" }
requires = [{ namespace = "org.eclipse.equinox.p2.iu", name = "org.example.feature.group" }]

[[project.unit]]
id = "org.example.feature.group"
version = "1.0.0"
provides = [{ namespace = "org.eclipse.equinox.p2.eclipse.type", name = "feature" }]
requires = [
    { namespace = "osgi.bundle", name = "org.example.core" },
    { namespace = "osgi.bundle", name = "org.example.ui" },
    { namespace = "osgi.bundle", name = "org.example.help" },
    { namespace = "osgi.bundle", name = "org.example.docs", optional = true },
]
"#;

fn graph_with(options: &BuildOptions) -> (TempDir, DependencyClosureGraph) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("build.toml");
    std::fs::write(&path, BUILD).unwrap();

    let projects = load_manifest(&path).unwrap().into_projects().unwrap();
    let graph = DependencyClosureGraph::build_with(projects, options).unwrap();
    (dir, graph)
}

fn keys<'a>(projects: impl IntoIterator<Item = &'a Project>) -> Vec<&'a str> {
    projects.into_iter().map(Project::key).collect()
}

fn ids(units: &[&Arc<Unit>]) -> Vec<String> {
    units.iter().map(|unit| unit.id().to_string()).collect()
}

#[test]
fn test_project_dependencies_from_manifest() {
    let (_dir, graph) = graph_with(&BuildOptions::default());

    assert_eq!(keys(graph.dependency_projects(&Project::new("ui"))), vec!["core", "help"]);
    assert_eq!(keys(graph.dependency_projects(&Project::new("ui.linux"))), vec!["ui"]);
    assert_eq!(keys(graph.dependency_projects(&Project::new("help"))), vec!["ui"]);
    assert_eq!(
        keys(graph.dependency_projects(&Project::new("product"))),
        vec!["core", "ui", "help"]
    );
    assert!(graph.dependency_projects(&Project::new("core")).is_empty());
}

#[test]
fn test_fragments_and_kinds() {
    let (_dir, graph) = graph_with(&BuildOptions::default());

    assert!(graph.is_fragment(&Project::new("ui.linux")));
    assert!(!graph.is_fragment(&Project::new("ui")));

    let product_units = graph.project_units(&Project::new("product"));
    assert_eq!(product_units[0].kind(), UnitKind::Product);
    assert_eq!(product_units[1].kind(), UnitKind::Feature);
}

#[test]
fn test_exclusion_and_context() {
    let (_dir, graph) = graph_with(&BuildOptions::default());
    let ui = graph.project_dependencies(&Project::new("ui"));

    assert_eq!(ids(&ui.dependencies(&[])), vec!["org.example.core", "org.example.help"]);
    assert!(ui.dependencies(&[UnitKind::Bundle]).is_empty());

    let core = Arc::clone(&graph.project_units(&Project::new("core"))[0]);
    assert_eq!(ids(&ui.dependencies_with_context(&[core])), vec!["org.example.help"]);
}

#[test]
fn test_cycles_self_references_and_unsatisfied() {
    let (_dir, graph) = graph_with(&BuildOptions::default());

    assert_eq!(
        graph
            .cycles()
            .into_iter()
            .map(|members| keys(members))
            .collect::<Vec<_>>(),
        vec![vec!["ui", "help"]]
    );
    assert_eq!(
        graph.classify(&Project::new("ui"), &Project::new("help")),
        Some(EdgeKind::Cycle)
    );
    assert_eq!(
        graph.classify(&Project::new("ui.linux"), &Project::new("ui")),
        Some(EdgeKind::Dependency)
    );
    assert_eq!(
        graph.classify(&Project::new("ui"), &Project::new("ui")),
        Some(EdgeKind::SelfReference)
    );
    // the meta requirement on the product never becomes an edge
    assert_eq!(graph.classify(&Project::new("help"), &Project::new("product")), None);

    let unsatisfied = graph.unsatisfied_requirements();
    assert_eq!(unsatisfied.len(), 1);
    assert_eq!(unsatisfied[0].requirement.name, "org.example.docs");
    assert!(unsatisfied[0].requirement.optional);
}

#[test]
fn test_options_do_not_change_results() {
    let (_a, indexed) = graph_with(&BuildOptions::default());
    let (_b, naive) = graph_with(&BuildOptions {
        jobs: Some(3),
        index_capabilities: false,
    });

    assert_eq!(indexed.to_dot(), naive.to_dot());
    for project in indexed.projects() {
        assert_eq!(
            keys(indexed.dependency_projects(project)),
            keys(naive.dependency_projects(project))
        );
    }
}

#[test]
fn test_dump_round_trip() {
    let (dir, graph) = graph_with(&BuildOptions::default());
    let target = dir.path().join("graph.dot");
    graph.dump(&target).unwrap();

    let dot = std::fs::read_to_string(&target).unwrap();
    assert!(dot.starts_with("digraph ProjectDependencies {"));
    for key in ["core", "ui", "ui.linux", "help", "product"] {
        assert!(dot.contains(&format!("[label=\"{}\"];", key)), "missing {key}");
    }
    assert!(dot.contains("color=red"));
    assert!(dot.contains("color=gray, style=dashed"));
    assert!(dot.contains("->"));
}

#[test]
fn test_dump_path_must_be_writable() {
    let (dir, graph) = graph_with(&BuildOptions::default());
    let target = dir.path().join("no").join("such").join("dir.dot");
    assert!(graph.dump(Path::new(&target)).is_err());
}

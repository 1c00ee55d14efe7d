use super::*;
use crate::metadata::{Capability, Filter, Project, Unit, Version};
use std::sync::Arc;

fn v1() -> Version {
    Version::new(1, 0, 0)
}

fn provider(key: &str) -> Arc<Unit> {
    Unit::builder(key, v1())
        .provides(Capability::new("osgi.bundle", key, v1()))
        .provides(Capability::new("java.package", format!("{key}.api"), v1()))
        .build()
}

/// Project A holding one unit with `requirements`, and project B providing b
fn pair(requirements: Vec<Requirement>) -> DependencyClosureGraph {
    let mut a = Unit::builder("a", v1()).provides(Capability::new("osgi.bundle", "a", v1()));
    for requirement in requirements {
        a = a.requires(requirement);
    }
    DependencyClosureGraph::build(vec![
        (Project::new("A"), vec![a.build()]),
        (Project::new("B"), vec![provider("b")]),
    ])
    .unwrap()
}

#[test]
fn test_structural_literals() {
    let graph = pair(vec![Requirement::new("osgi.bundle", "b")]);
    let dot = render_dot(&graph);

    assert!(dot.starts_with("digraph ProjectDependencies {\n"));
    assert!(dot.contains("  rankdir=LR;\n"));
    assert!(dot.contains("  p0 [label=\"A\"];\n"));
    assert!(dot.contains("  p1 [label=\"B\"];\n"));
    assert!(dot.contains("->"));
    assert!(dot.ends_with("}\n"));
}

#[test]
fn test_acyclic_edge_is_black() {
    let graph = pair(vec![Requirement::new("osgi.bundle", "b")]);
    assert!(graph.to_dot().contains("  p0 -> p1 [color=black, label="));
}

#[test]
fn test_cycle_edges_are_red() {
    let a = Unit::builder("a", v1())
        .requires(Requirement::new("org.eclipse.equinox.p2.iu", "b"))
        .build();
    let b = Unit::builder("b", v1())
        .requires(Requirement::new("org.eclipse.equinox.p2.iu", "a"))
        .build();
    let graph = DependencyClosureGraph::build(vec![
        (Project::new("A"), vec![a]),
        (Project::new("B"), vec![b]),
    ])
    .unwrap();
    let dot = graph.to_dot();

    assert!(dot.contains("  p0 -> p1 [color=red, label="));
    assert!(dot.contains("  p1 -> p0 [color=red, label="));
    assert!(!dot.contains("color=black"));
}

#[test]
fn test_self_reference_is_gray_loop() {
    let a = Unit::builder("a", v1())
        .requires(Requirement::new("org.eclipse.equinox.p2.iu", "a"))
        .build();
    let graph = DependencyClosureGraph::build(vec![(Project::new("A"), vec![a])]).unwrap();
    let dot = graph.to_dot();

    assert!(dot.contains("  p0 -> p0 [color=gray, style=dashed, label="));
    assert!(!dot.contains("color=red"));
}

#[test]
fn test_plain_label_is_quoted() {
    let graph = pair(vec![
        Requirement::new("org.eclipse.equinox.p2.iu", "b").non_greedy(),
    ]);
    assert!(
        graph
            .to_dot()
            .contains("label=\"org.eclipse.equinox.p2.iu; b\"];")
    );
}

#[test]
fn test_plain_labels_joined_by_newline_escape() {
    let c = Unit::builder("c", v1())
        .requires(Requirement::new("org.eclipse.equinox.p2.iu", "b").non_greedy())
        .requires(Requirement::new("org.eclipse.equinox.p2.eclipse.type", "bundle").non_greedy())
        .build();
    let b = Unit::builder("b", v1())
        .provides(Capability::new("org.eclipse.equinox.p2.eclipse.type", "bundle", v1()))
        .build();
    let graph = DependencyClosureGraph::build(vec![
        (Project::new("C"), vec![c]),
        (Project::new("B"), vec![b]),
    ])
    .unwrap();
    assert!(graph.to_dot().contains(
        "label=\"org.eclipse.equinox.p2.iu; b\\norg.eclipse.equinox.p2.eclipse.type; bundle\"];"
    ));
}

#[test]
fn test_requirement_styles() {
    let graph = pair(vec![Requirement::new("osgi.bundle", "b")]);
    assert!(graph.to_dot().contains("label=<<B><U>osgi.bundle; b</U></B>>"));

    let graph = pair(vec![Requirement::new("osgi.bundle", "b").non_greedy()]);
    assert!(graph.to_dot().contains("label=<<B>osgi.bundle; b</B>>"));

    let graph = pair(vec![Requirement::new("osgi.bundle", "b").optional()]);
    assert!(graph.to_dot().contains("label=<<I><U>osgi.bundle; b</U></I>>"));
}

#[test]
fn test_html_label_lines() {
    let graph = pair(vec![
        Requirement::new("osgi.bundle", "b"),
        Requirement::new("java.package", "b.api").with_range("[1.0,2.0)".parse().unwrap()),
    ]);
    assert!(graph.to_dot().contains(
        "label=<<B><U>osgi.bundle; b</U></B><BR/><B><U>java.package; b.api [1.0.0,2.0.0)</U></B>>"
    ));
}

#[test]
fn test_html_text_is_escaped() {
    let filter = Filter::new("(&(os=linux)(arch<x86))", |_| true);
    let graph = pair(vec![Requirement::new("osgi.bundle", "b").with_filter(filter)]);
    assert!(
        graph
            .to_dot()
            .contains("osgi.bundle; b (&amp;(os=linux)(arch&lt;x86))")
    );
}

#[test]
fn test_project_key_is_escaped() {
    let graph = DependencyClosureGraph::build(vec![(
        Project::new("group:\"odd\\name\""),
        vec![provider("x")],
    )])
    .unwrap();
    assert!(
        graph
            .to_dot()
            .contains("p0 [label=\"group:\\\"odd\\\\name\\\"\"];")
    );
}

#[test]
fn test_graph_without_edges() {
    let graph = DependencyClosureGraph::build(vec![(Project::new("A"), vec![provider("a")])])
        .unwrap();
    let dot = graph.to_dot();
    assert!(dot.contains("p0 [label=\"A\"];"));
    assert!(!dot.contains("->"));
}

#[test]
fn test_rendering_is_stable() {
    let graph = pair(vec![Requirement::new("osgi.bundle", "b")]);
    assert_eq!(graph.to_dot(), graph.to_dot());
}

#[test]
fn test_write_dot_matches_render() {
    let graph = pair(vec![Requirement::new("osgi.bundle", "b")]);
    let mut buffer = Vec::new();
    write_dot(&graph, &mut buffer).unwrap();
    assert_eq!(String::from_utf8(buffer).unwrap(), render_dot(&graph));
}

#[test]
fn test_dump_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("graph.dot");
    let graph = pair(vec![Requirement::new("osgi.bundle", "b")]);

    graph.dump(&path).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), graph.to_dot());

    // overwrites an existing dump
    graph.dump(&path).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), graph.to_dot());
}

#[test]
fn test_dump_into_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("graph.dot");
    let graph = pair(vec![Requirement::new("osgi.bundle", "b")]);

    assert!(graph.dump(&path).is_err());
    assert!(!path.exists());
}

#[test]
fn test_html_quotes_and_angle_brackets_are_escaped() {
    let filter = Filter::new("(name=\"b\")(version>=1)", |_| true);
    let graph = pair(vec![Requirement::new("osgi.bundle", "b").with_filter(filter)]);
    assert!(
        graph
            .to_dot()
            .contains("osgi.bundle; b (name=&quot;b&quot;)(version&gt;=1)")
    );
}

/// Writer that rejects every write
struct BrokenPipe;

impl Write for BrokenPipe {
    fn write(&mut self, _: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_write_dot_reports_writer_errors() {
    let graph = pair(vec![Requirement::new("osgi.bundle", "b")]);
    let err = write_dot(&graph, BrokenPipe).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
}
